//! Knowledge-base gateway seam.
//!
//! The conversation core never talks to storage directly: it reads the
//! symptom catalog through `KnowledgeBase` and writes completed
//! consultations through `HistorySink`. `SqliteGateway` implements both on
//! top of `db::repository`; tests substitute their own implementations.

pub mod sqlite;

pub use sqlite::SqliteGateway;

use std::collections::HashMap;

use crate::db::DatabaseError;
use crate::models::{DiseaseMatch, SymptomId};

/// Read-only view of the symptom knowledge base.
pub trait KnowledgeBase {
    /// Full catalog as `(id, canonical name)` pairs, ordered by id.
    fn symptoms(&self) -> Result<Vec<(SymptomId, String)>, DatabaseError>;

    /// Synonym table keyed by canonical symptom name.
    fn symptom_synonyms(&self) -> Result<HashMap<String, Vec<String>>, DatabaseError>;

    /// Follow-up questions attached to one symptom.
    fn followups_for_symptom(&self, id: SymptomId) -> Result<Vec<String>, DatabaseError>;

    /// Candidate diseases for the given symptoms, ordered by score
    /// descending. Empty input yields an empty list.
    fn diseases_for_symptoms(
        &self,
        ids: &[SymptomId],
    ) -> Result<Vec<DiseaseMatch>, DatabaseError>;

    /// `(condition_suggestion, first_aid)` texts for the given symptoms,
    /// each "; "-joined across non-empty entries. Empty input yields empty
    /// strings.
    fn condition_advice(&self, ids: &[SymptomId]) -> Result<(String, String), DatabaseError>;
}

/// Write side for completed consultations. Invoked exactly once per
/// diagnosis; failures are reported but must not block the response.
pub trait HistorySink {
    fn log_consultation(&self, user_query: &str, bot_response: &str)
        -> Result<(), DatabaseError>;
}
