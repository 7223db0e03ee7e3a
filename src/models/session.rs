use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::enums::Stage;
use super::SymptomId;

/// Per-user conversation state.
///
/// Owned by the transport layer (one per session key) and mutated only
/// through `chatbot::IntakeEngine`. The shape is fixed: every field the
/// conversation flow touches is declared here, nothing is looked up
/// dynamically.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub stage: Stage,
    /// Normalized symptom names entered so far. Duplicates are rejected.
    pub symptom_words: Vec<String>,
    /// Catalog ids, resolved from `symptom_words` at the stop transition.
    pub symptom_ids: Vec<SymptomId>,
    /// Deduplicated follow-up questions, in presentation order. Computed
    /// once at the stop transition and immutable afterwards.
    pub followups: Vec<String>,
    /// Raw answer text keyed by question. Collected for the record; not
    /// consumed by diagnosis yet.
    pub followup_answers: HashMap<String, String>,
    /// Cursor into `followups`. Never exceeds `followups.len()`.
    pub followup_index: usize,
}

impl Session {
    pub fn new() -> Self {
        Self {
            stage: Stage::Collecting,
            symptom_words: Vec::new(),
            symptom_ids: Vec::new(),
            followups: Vec::new(),
            followup_answers: HashMap::new(),
            followup_index: 0,
        }
    }

    /// Reset to the initial collecting state. Idempotent.
    pub fn reset(&mut self) {
        *self = Session::new();
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_session_is_collecting_and_empty() {
        let session = Session::new();
        assert_eq!(session.stage, Stage::Collecting);
        assert!(session.symptom_words.is_empty());
        assert!(session.symptom_ids.is_empty());
        assert!(session.followups.is_empty());
        assert!(session.followup_answers.is_empty());
        assert_eq!(session.followup_index, 0);
    }

    #[test]
    fn reset_discards_prior_history() {
        let mut session = Session::new();
        session.stage = Stage::Done;
        session.symptom_words.push("fever".into());
        session.symptom_ids.push(1);
        session.followups.push("Since when?".into());
        session.followup_answers.insert("Since when?".into(), "3 days".into());
        session.followup_index = 1;

        session.reset();

        assert_eq!(session.stage, Stage::Collecting);
        assert!(session.symptom_words.is_empty());
        assert!(session.followup_answers.is_empty());
        assert_eq!(session.followup_index, 0);
    }
}
