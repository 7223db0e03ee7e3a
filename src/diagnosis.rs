//! Diagnosis resolution: rank candidate diseases for a symptom set and
//! assemble the condition label and first-aid advice.

use crate::db::DatabaseError;
use crate::kb::KnowledgeBase;
use crate::models::{Diagnosis, SymptomId};

/// Label when no disease in the knowledge base links to the symptoms.
pub const UNKNOWN_CONDITION: &str = "Unknown Condition";

/// First-aid fallback when the catalog has no advice for the symptoms.
pub const FIRST_AID_FALLBACK: &str =
    "Please consult a healthcare professional for proper diagnosis and treatment.";

/// Sentinel pair returned for an empty symptom set.
pub const NO_SYMPTOMS: (&str, &str) = ("No symptoms provided", "Please enter at least one symptom.");

/// How many runner-up candidates are appended to the label.
const MAX_ALTERNATIVES: usize = 2;

/// Resolve a symptom set to a condition label and first-aid advice.
///
/// The caller is expected to check for an empty set first; the resolver
/// re-checks and answers with the fixed sentinel pair rather than failing.
/// Deterministic for fixed knowledge-base contents.
pub fn diagnose(
    kb: &dyn KnowledgeBase,
    symptom_ids: &[SymptomId],
) -> Result<Diagnosis, DatabaseError> {
    if symptom_ids.is_empty() {
        return Ok(Diagnosis {
            condition: NO_SYMPTOMS.0.to_string(),
            first_aid: NO_SYMPTOMS.1.to_string(),
        });
    }

    let candidates = kb.diseases_for_symptoms(symptom_ids)?;

    let mut label = match candidates.first() {
        Some(top) => {
            let mut name = top.name.clone();
            if candidates.len() > 1 {
                let alternatives: Vec<&str> = candidates[1..]
                    .iter()
                    .take(MAX_ALTERNATIVES)
                    .map(|c| c.name.as_str())
                    .collect();
                name.push_str(&format!(" (Also consider: {})", alternatives.join(", ")));
            }
            name
        }
        None => UNKNOWN_CONDITION.to_string(),
    };

    let (conditions, mut first_aid) = kb.condition_advice(symptom_ids)?;
    if !conditions.is_empty() {
        label = format!("{label} - {conditions}");
    }
    if first_aid.is_empty() {
        first_aid = FIRST_AID_FALLBACK.to_string();
    }

    tracing::debug!(condition = %label, "Diagnosis resolved");
    Ok(Diagnosis {
        condition: label,
        first_aid,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::sqlite::open_memory_database;
    use crate::kb::SqliteGateway;
    use rusqlite::{params, Connection};

    fn insert_symptom(
        conn: &Connection,
        name: &str,
        condition: Option<&str>,
        first_aid: Option<&str>,
    ) -> SymptomId {
        conn.execute(
            "INSERT INTO symptoms (name, condition_suggestion, first_aid) VALUES (?1, ?2, ?3)",
            params![name, condition, first_aid],
        )
        .unwrap();
        conn.last_insert_rowid()
    }

    fn insert_disease(conn: &Connection, name: &str, symptom_ids: &[SymptomId]) {
        conn.execute("INSERT INTO diseases (name) VALUES (?1)", params![name])
            .unwrap();
        let disease_id = conn.last_insert_rowid();
        for id in symptom_ids {
            conn.execute(
                "INSERT INTO disease_symptoms (disease_id, symptom_id) VALUES (?1, ?2)",
                params![disease_id, id],
            )
            .unwrap();
        }
    }

    #[test]
    fn empty_set_yields_sentinel_pair() {
        let conn = open_memory_database().unwrap();
        let gateway = SqliteGateway::new(&conn);

        let diagnosis = diagnose(&gateway, &[]).unwrap();
        assert_eq!(diagnosis.condition, "No symptoms provided");
        assert_eq!(diagnosis.first_aid, "Please enter at least one symptom.");
    }

    #[test]
    fn single_candidate_is_plain_label() {
        let conn = open_memory_database().unwrap();
        let fever = insert_symptom(&conn, "fever", None, None);
        insert_disease(&conn, "Influenza", &[fever]);
        let gateway = SqliteGateway::new(&conn);

        let diagnosis = diagnose(&gateway, &[fever]).unwrap();
        assert_eq!(diagnosis.condition, "Influenza");
        assert_eq!(diagnosis.first_aid, FIRST_AID_FALLBACK);
    }

    #[test]
    fn runner_ups_capped_at_two() {
        let conn = open_memory_database().unwrap();
        let fever = insert_symptom(&conn, "fever", None, None);
        let cough = insert_symptom(&conn, "cough", None, None);
        insert_disease(&conn, "Influenza", &[fever, cough]);
        insert_disease(&conn, "Common Cold", &[cough]);
        insert_disease(&conn, "Bronchitis", &[cough]);
        insert_disease(&conn, "Pneumonia", &[cough]);
        let gateway = SqliteGateway::new(&conn);

        let diagnosis = diagnose(&gateway, &[fever, cough]).unwrap();
        assert_eq!(
            diagnosis.condition,
            "Influenza (Also consider: Common Cold, Bronchitis)"
        );
    }

    #[test]
    fn no_candidate_yields_unknown_condition() {
        let conn = open_memory_database().unwrap();
        let fever = insert_symptom(&conn, "fever", None, None);
        let gateway = SqliteGateway::new(&conn);

        let diagnosis = diagnose(&gateway, &[fever]).unwrap();
        assert_eq!(diagnosis.condition, UNKNOWN_CONDITION);
    }

    #[test]
    fn suggestions_appended_to_label() {
        let conn = open_memory_database().unwrap();
        let fever = insert_symptom(&conn, "fever", Some("Possible infection"), Some("Rest."));
        insert_disease(&conn, "Influenza", &[fever]);
        let gateway = SqliteGateway::new(&conn);

        let diagnosis = diagnose(&gateway, &[fever]).unwrap();
        assert_eq!(diagnosis.condition, "Influenza - Possible infection");
        assert_eq!(diagnosis.first_aid, "Rest.");
    }

    #[test]
    fn unknown_condition_still_carries_suggestions() {
        let conn = open_memory_database().unwrap();
        let rash = insert_symptom(&conn, "rash", Some("Possible dermatitis"), None);
        let gateway = SqliteGateway::new(&conn);

        let diagnosis = diagnose(&gateway, &[rash]).unwrap();
        assert_eq!(diagnosis.condition, "Unknown Condition - Possible dermatitis");
        assert_eq!(diagnosis.first_aid, FIRST_AID_FALLBACK);
    }

    #[test]
    fn deterministic_for_same_inputs() {
        let conn = open_memory_database().unwrap();
        let fever = insert_symptom(&conn, "fever", Some("Infection"), Some("Rest."));
        let cough = insert_symptom(&conn, "cough", None, None);
        insert_disease(&conn, "Influenza", &[fever, cough]);
        insert_disease(&conn, "Common Cold", &[cough]);
        let gateway = SqliteGateway::new(&conn);

        let first = diagnose(&gateway, &[fever, cough]).unwrap();
        let second = diagnose(&gateway, &[fever, cough]).unwrap();
        assert_eq!(first, second);
    }
}
