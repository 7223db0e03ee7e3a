use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// One completed consultation as stored in `consultation_history`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConsultationRecord {
    pub id: i64,
    pub user_query: String,
    pub bot_response: String,
    pub created_at: NaiveDateTime,
}
