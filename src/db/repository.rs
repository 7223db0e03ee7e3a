use std::collections::HashMap;

use rusqlite::{params, params_from_iter, Connection};

use super::DatabaseError;
use crate::models::{ConsultationRecord, DiseaseMatch, SymptomId};

// ═══════════════════════════════════════════
// Symptom catalog
// ═══════════════════════════════════════════

/// Full symptom catalog as `(id, canonical name)` pairs, ordered by id.
pub fn get_symptom_catalog(conn: &Connection) -> Result<Vec<(SymptomId, String)>, DatabaseError> {
    let mut stmt = conn.prepare("SELECT id, name FROM symptoms ORDER BY id")?;
    let rows = stmt.query_map([], |row| {
        Ok((row.get::<_, i64>(0)?, row.get::<_, String>(1)?))
    })?;

    let mut catalog = Vec::new();
    for row in rows {
        let (id, name) = row?;
        catalog.push((id, name.trim().to_string()));
    }
    Ok(catalog)
}

/// Synonym table keyed by canonical symptom name.
pub fn get_symptom_synonyms(
    conn: &Connection,
) -> Result<HashMap<String, Vec<String>>, DatabaseError> {
    let mut stmt = conn.prepare(
        "SELECT s.name, sy.term
         FROM symptoms s
         JOIN synonyms sy ON sy.symptom_id = s.id
         ORDER BY sy.id",
    )?;
    let rows = stmt.query_map([], |row| {
        Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
    })?;

    let mut synonyms: HashMap<String, Vec<String>> = HashMap::new();
    for row in rows {
        let (name, term) = row?;
        synonyms
            .entry(name.trim().to_string())
            .or_default()
            .push(term.trim().to_string());
    }
    Ok(synonyms)
}

/// Follow-up questions attached to one symptom, in catalog order.
pub fn get_followups_for_symptom(
    conn: &Connection,
    symptom_id: SymptomId,
) -> Result<Vec<String>, DatabaseError> {
    let mut stmt = conn.prepare(
        "SELECT question_text FROM follow_up_questions WHERE symptom_id = ?1 ORDER BY id",
    )?;
    let rows = stmt.query_map(params![symptom_id], |row| row.get::<_, String>(0))?;

    let mut questions = Vec::new();
    for row in rows {
        questions.push(row?);
    }
    Ok(questions)
}

// ═══════════════════════════════════════════
// Disease ranking & advice
// ═══════════════════════════════════════════

/// Diseases linked to any of the given symptoms, scored by how many of the
/// queried symptoms each disease shares. Ordered by score descending, then
/// by disease id so equal scores rank deterministically.
pub fn get_diseases_for_symptoms(
    conn: &Connection,
    symptom_ids: &[SymptomId],
) -> Result<Vec<DiseaseMatch>, DatabaseError> {
    if symptom_ids.is_empty() {
        return Ok(Vec::new());
    }

    let placeholders = vec!["?"; symptom_ids.len()].join(",");
    let sql = format!(
        "SELECT ds.disease_id, d.name, COUNT(*) AS score
         FROM disease_symptoms ds
         JOIN diseases d ON d.id = ds.disease_id
         WHERE ds.symptom_id IN ({placeholders})
         GROUP BY ds.disease_id, d.name
         ORDER BY score DESC, ds.disease_id"
    );

    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(params_from_iter(symptom_ids.iter()), |row| {
        Ok(DiseaseMatch {
            disease_id: row.get(0)?,
            name: row.get(1)?,
            score: row.get(2)?,
        })
    })?;

    let mut matches = Vec::new();
    for row in rows {
        matches.push(row?);
    }
    Ok(matches)
}

/// Condition-suggestion and first-aid texts for the given symptoms.
/// Non-empty entries are joined with "; "; both strings are empty when the
/// input is empty or nothing is recorded in the catalog.
pub fn get_condition_advice(
    conn: &Connection,
    symptom_ids: &[SymptomId],
) -> Result<(String, String), DatabaseError> {
    if symptom_ids.is_empty() {
        return Ok((String::new(), String::new()));
    }

    let placeholders = vec!["?"; symptom_ids.len()].join(",");
    let sql = format!(
        "SELECT condition_suggestion, first_aid FROM symptoms
         WHERE id IN ({placeholders})
         ORDER BY id"
    );

    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(params_from_iter(symptom_ids.iter()), |row| {
        Ok((
            row.get::<_, Option<String>>(0)?,
            row.get::<_, Option<String>>(1)?,
        ))
    })?;

    let mut conditions = Vec::new();
    let mut first_aids = Vec::new();
    for row in rows {
        let (condition, first_aid) = row?;
        if let Some(text) = condition.filter(|t| !t.is_empty()) {
            conditions.push(text);
        }
        if let Some(text) = first_aid.filter(|t| !t.is_empty()) {
            first_aids.push(text);
        }
    }

    Ok((conditions.join("; "), first_aids.join("; ")))
}

// ═══════════════════════════════════════════
// Consultation history
// ═══════════════════════════════════════════

pub fn insert_consultation(
    conn: &Connection,
    user_query: &str,
    bot_response: &str,
) -> Result<i64, DatabaseError> {
    conn.execute(
        "INSERT INTO consultation_history (user_query, bot_response) VALUES (?1, ?2)",
        params![user_query, bot_response],
    )?;
    Ok(conn.last_insert_rowid())
}

/// Most recent consultations, newest first.
pub fn list_consultations(
    conn: &Connection,
    limit: u32,
) -> Result<Vec<ConsultationRecord>, DatabaseError> {
    let mut stmt = conn.prepare(
        "SELECT id, user_query, bot_response, created_at
         FROM consultation_history
         ORDER BY id DESC
         LIMIT ?1",
    )?;
    let rows = stmt.query_map(params![limit], |row| {
        Ok(ConsultationRecord {
            id: row.get(0)?,
            user_query: row.get(1)?,
            bot_response: row.get(2)?,
            created_at: row.get(3)?,
        })
    })?;

    let mut records = Vec::new();
    for row in rows {
        records.push(row?);
    }
    Ok(records)
}
