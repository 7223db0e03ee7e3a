use serde::{Deserialize, Serialize};

/// A candidate disease returned by the knowledge base, annotated with the
/// number of queried symptoms linked to it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiseaseMatch {
    pub disease_id: i64,
    pub name: String,
    pub score: i64,
}
