use std::collections::HashMap;

use rusqlite::Connection;

use super::{HistorySink, KnowledgeBase};
use crate::db::{self, DatabaseError};
use crate::models::{DiseaseMatch, SymptomId};

/// SQLite-backed gateway. Borrows a connection for the duration of one
/// request; the transport layer opens a fresh connection per call.
pub struct SqliteGateway<'a> {
    conn: &'a Connection,
}

impl<'a> SqliteGateway<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }
}

impl KnowledgeBase for SqliteGateway<'_> {
    fn symptoms(&self) -> Result<Vec<(SymptomId, String)>, DatabaseError> {
        db::get_symptom_catalog(self.conn)
    }

    fn symptom_synonyms(&self) -> Result<HashMap<String, Vec<String>>, DatabaseError> {
        db::get_symptom_synonyms(self.conn)
    }

    fn followups_for_symptom(&self, id: SymptomId) -> Result<Vec<String>, DatabaseError> {
        db::get_followups_for_symptom(self.conn, id)
    }

    fn diseases_for_symptoms(
        &self,
        ids: &[SymptomId],
    ) -> Result<Vec<DiseaseMatch>, DatabaseError> {
        db::get_diseases_for_symptoms(self.conn, ids)
    }

    fn condition_advice(&self, ids: &[SymptomId]) -> Result<(String, String), DatabaseError> {
        db::get_condition_advice(self.conn, ids)
    }
}

impl HistorySink for SqliteGateway<'_> {
    fn log_consultation(
        &self,
        user_query: &str,
        bot_response: &str,
    ) -> Result<(), DatabaseError> {
        db::insert_consultation(self.conn, user_query, bot_response)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::sqlite::{open_memory_database, seed_catalog};

    #[test]
    fn gateway_reads_seeded_catalog() {
        let conn = open_memory_database().unwrap();
        seed_catalog(&conn).unwrap();
        let gateway = SqliteGateway::new(&conn);

        let catalog = gateway.symptoms().unwrap();
        assert!(catalog.iter().any(|(_, name)| name == "fever"));

        let synonyms = gateway.symptom_synonyms().unwrap();
        assert!(synonyms
            .get("fever")
            .unwrap()
            .iter()
            .any(|term| term == "high temperature"));
    }

    #[test]
    fn gateway_logs_consultations() {
        let conn = open_memory_database().unwrap();
        let gateway = SqliteGateway::new(&conn);

        gateway.log_consultation("fever", "advice").unwrap();
        let records = db::list_consultations(&conn, 10).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].user_query, "fever");
    }
}
