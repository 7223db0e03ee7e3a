//! Conversation state machine.
//!
//! `IntakeEngine` owns the collect → follow-up → done lifecycle for one
//! `Session` at a time: it matches free text to catalog symptoms while
//! collecting, resolves the collected words at the stop command, walks the
//! follow-up questions, and hands the finished consultation to the history
//! sink. Bad input (unrecognized symptom, duplicate, nothing resolvable) is
//! answered with an ordinary message and leaves the session untouched; only
//! gateway failures surface as errors.

use std::collections::{HashMap, HashSet};

use crate::db::DatabaseError;
use crate::diagnosis;
use crate::events::{IntakeEvent, IntakeObserver};
use crate::kb::{HistorySink, KnowledgeBase};
use crate::models::{Session, Stage, SymptomId};
use crate::nlp;

/// Inputs that end the collecting stage, compared after trim + lowercase.
pub const STOP_KEYWORDS: &[&str] = &["done", "stop", "finish"];

pub const MSG_NOT_RECOGNIZED: &str =
    "Symptom not recognized. Please try another symptom or check your spelling.";
pub const MSG_DUPLICATE_SYMPTOM: &str =
    "This symptom has already been added. Please enter another symptom.";
pub const MSG_SYMPTOM_RECORDED: &str =
    "Symptom recorded. Any more symptoms? Type 'stop' when finished.";
pub const MSG_NO_VALID_SYMPTOMS: &str =
    "No valid symptoms provided. Please enter at least one symptom and try again.";
pub const MSG_SESSION_FINISHED: &str =
    "Session finished. Reset the session to start a new consultation.";
pub const MSG_ALL_ANSWERED: &str = "All questions answered.";

/// Orchestration hub for one conversation turn.
///
/// Holds borrowed collaborator handles; the transport layer constructs one
/// per request around whatever gateway backs the current connection.
pub struct IntakeEngine<'a> {
    kb: &'a dyn KnowledgeBase,
    history: &'a dyn HistorySink,
    observer: &'a dyn IntakeObserver,
}

impl<'a> IntakeEngine<'a> {
    pub fn new(
        kb: &'a dyn KnowledgeBase,
        history: &'a dyn HistorySink,
        observer: &'a dyn IntakeObserver,
    ) -> Self {
        Self { kb, history, observer }
    }

    /// Reset a session to the initial collecting state. Idempotent.
    pub fn start_session(&self, session: &mut Session) {
        session.reset();
        tracing::debug!("Session started");
    }

    /// The single conversational entry point. Dispatches on the current
    /// stage; every reachable path returns a human-readable sentence.
    pub fn handle_message(
        &self,
        session: &mut Session,
        text: &str,
    ) -> Result<String, DatabaseError> {
        let command = text.trim().to_lowercase();
        match session.stage {
            Stage::Collecting => {
                if STOP_KEYWORDS.contains(&command.as_str()) {
                    self.finish_collecting(session)
                } else {
                    self.collect_symptom(session, text)
                }
            }
            Stage::AwaitingFollowup => self.record_followup_answer(session, text),
            Stage::Done => Ok(MSG_SESSION_FINISHED.to_string()),
        }
    }

    /// Collecting stage: try to recognize one symptom in the utterance.
    /// Only the first matched word is recorded, even when several symptoms
    /// occur in one message.
    fn collect_symptom(
        &self,
        session: &mut Session,
        user_text: &str,
    ) -> Result<String, DatabaseError> {
        let matched = nlp::match_symptoms(self.kb, user_text)?;

        let Some((word, id)) = matched.matches.first() else {
            return Ok(MSG_NOT_RECOGNIZED.to_string());
        };
        self.observer
            .on_event(IntakeEvent::SymptomMatched { word, id: *id });

        if session.symptom_words.iter().any(|known| known == word) {
            return Ok(MSG_DUPLICATE_SYMPTOM.to_string());
        }

        session.symptom_words.push(word.clone());
        Ok(MSG_SYMPTOM_RECORDED.to_string())
    }

    /// Stop transition: resolve collected words to catalog ids, gather
    /// follow-up questions, and either start the follow-up stage or go
    /// straight to the diagnosis.
    fn finish_collecting(&self, session: &mut Session) -> Result<String, DatabaseError> {
        let word_to_id: HashMap<String, SymptomId> = self
            .kb
            .symptoms()?
            .into_iter()
            .map(|(id, name)| (name.trim().to_lowercase(), id))
            .collect();

        // Words with no exact catalog-name match (e.g. recorded synonyms)
        // are dropped here; that matches the resolution contract.
        let resolved: Vec<SymptomId> = session
            .symptom_words
            .iter()
            .filter_map(|word| word_to_id.get(word).copied())
            .collect();

        if resolved.is_empty() {
            return Ok(MSG_NO_VALID_SYMPTOMS.to_string());
        }
        session.symptom_ids = resolved;

        let mut followups = Vec::new();
        let mut seen = HashSet::new();
        for id in &session.symptom_ids {
            for question in self.kb.followups_for_symptom(*id)? {
                if seen.insert(question.clone()) {
                    followups.push(question);
                }
            }
        }
        session.followups = followups;
        session.followup_index = 0;

        if !session.followups.is_empty() {
            self.set_stage(session, Stage::AwaitingFollowup);
            return Ok(numbered_question(&session.followups, 0));
        }

        self.complete(session)
    }

    /// Follow-up stage: record the raw answer against the current question
    /// and either ask the next one or finish with the diagnosis.
    fn record_followup_answer(
        &self,
        session: &mut Session,
        user_text: &str,
    ) -> Result<String, DatabaseError> {
        let index = session.followup_index;
        if index >= session.followups.len() {
            // Unreachable through handle_message: the last answer moves the
            // session to Done before the cursor can pass the end.
            debug_assert!(false, "follow-up cursor past the end of the question list");
            return Ok(MSG_ALL_ANSWERED.to_string());
        }

        let question = session.followups[index].clone();
        session.followup_answers.insert(question, user_text.to_string());
        session.followup_index += 1;

        if session.followup_index < session.followups.len() {
            return Ok(numbered_question(&session.followups, session.followup_index));
        }

        self.complete(session)
    }

    /// Resolve the diagnosis, log the consultation, and close the session.
    fn complete(&self, session: &mut Session) -> Result<String, DatabaseError> {
        let result = diagnosis::diagnose(self.kb, &session.symptom_ids)?;
        let answer = format!(
            "<b>Diagnosis:</b> {}<br><br><b>First Aid:</b> {}",
            result.condition, result.first_aid
        );
        self.observer.on_event(IntakeEvent::DiagnosisComputed {
            condition: &result.condition,
        });

        let query = session.symptom_words.join(", ");
        if let Err(error) = self.history.log_consultation(&query, &answer) {
            // The diagnosis is already computed; a failed history write must
            // not withhold it from the user.
            tracing::warn!(%error, "Failed to log consultation history");
        }

        self.set_stage(session, Stage::Done);
        Ok(answer)
    }

    fn set_stage(&self, session: &mut Session, to: Stage) {
        let from = session.stage;
        session.stage = to;
        self.observer.on_event(IntakeEvent::StageChanged { from, to });
    }
}

fn numbered_question(followups: &[String], index: usize) -> String {
    format!(
        "<b>Follow-up Question {} of {}:</b><br>{}",
        index + 1,
        followups.len(),
        followups[index]
    )
}
