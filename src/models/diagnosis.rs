use serde::{Deserialize, Serialize};

/// Resolved outcome of a consultation: a condition label (possibly annotated
/// with runner-up candidates and catalog suggestions) and first-aid advice.
/// Ephemeral; returned to the caller and logged, never stored on the session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnosis {
    pub condition: String,
    pub first_aid: String,
}
