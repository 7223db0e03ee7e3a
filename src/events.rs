//! Structured conversation events.
//!
//! The engine reports what happened (a symptom matched, a stage changed, a
//! diagnosis computed) to an injected observer instead of printing. The
//! default observer forwards to `tracing`; tests install recording
//! observers to assert on the event stream.

use crate::models::{Stage, SymptomId};

/// One observable step of a conversation. Borrows from the engine's working
/// state; observers that need to keep events copy what they need.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntakeEvent<'a> {
    SymptomMatched { word: &'a str, id: SymptomId },
    StageChanged { from: Stage, to: Stage },
    DiagnosisComputed { condition: &'a str },
}

pub trait IntakeObserver {
    fn on_event(&self, event: IntakeEvent<'_>);
}

/// Default observer: structured log lines via `tracing`.
pub struct TracingObserver;

impl IntakeObserver for TracingObserver {
    fn on_event(&self, event: IntakeEvent<'_>) {
        match event {
            IntakeEvent::SymptomMatched { word, id } => {
                tracing::debug!(word, id, "Symptom matched");
            }
            IntakeEvent::StageChanged { from, to } => {
                tracing::info!(from = from.as_str(), to = to.as_str(), "Stage changed");
            }
            IntakeEvent::DiagnosisComputed { condition } => {
                tracing::info!(condition, "Diagnosis computed");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tracing_observer_accepts_all_events() {
        let observer = TracingObserver;
        observer.on_event(IntakeEvent::SymptomMatched { word: "fever", id: 1 });
        observer.on_event(IntakeEvent::StageChanged {
            from: Stage::Collecting,
            to: Stage::Done,
        });
        observer.on_event(IntakeEvent::DiagnosisComputed { condition: "Influenza" });
    }
}
