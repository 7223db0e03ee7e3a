//! Text normalization and keyword symptom matching.
//!
//! Matching is deliberately lightweight: lowercase, strip punctuation, drop
//! stopwords, then substring-match catalog names and synonyms against the
//! cleaned text. A short symptom name occurring inside a longer word still
//! matches; callers rely on that approximation, so it must not be tightened
//! to word-boundary matching without reworking the conversation flow.

use std::sync::LazyLock;

use regex::Regex;

use crate::db::DatabaseError;
use crate::kb::KnowledgeBase;
use crate::models::SymptomId;

static NON_WORD: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^\w\s]").unwrap());

/// Tokens removed before matching.
pub const STOPWORDS: &[&str] = &[
    "the", "and", "but", "or", "is", "a", "an", "to", "of", "have", "has", "i", "am", "my",
];

/// Result of matching one utterance: deduplicated catalog ids in
/// first-occurrence order, plus the `(matched text, id)` pairs behind them.
/// Consumed immediately by the conversation engine, never stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SymptomMatch {
    pub ids: Vec<SymptomId>,
    pub matches: Vec<(String, SymptomId)>,
}

impl SymptomMatch {
    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }

    /// The first matched text of the utterance, if any.
    pub fn first_word(&self) -> Option<&str> {
        self.matches.first().map(|(word, _)| word.as_str())
    }
}

/// Strip punctuation, lowercase, and drop stopwords.
///
/// Returns the rejoined cleaned string (used for substring matching) and
/// the surviving tokens. Pure; empty input yields empty outputs.
pub fn normalize(text: &str) -> (String, Vec<String>) {
    let lowercased = text.to_lowercase();
    let stripped = NON_WORD.replace_all(&lowercased, "");
    let tokens: Vec<String> = stripped
        .split_whitespace()
        .filter(|word| !STOPWORDS.contains(word))
        .map(str::to_string)
        .collect();
    (tokens.join(" "), tokens)
}

/// Match an utterance against the symptom catalog and synonym table.
///
/// For each catalog entry the canonical name is tried first; a hit skips the
/// entry's synonyms. Otherwise the first matching synonym wins. Matching is
/// case- and punctuation-insensitive, substring-based.
pub fn match_symptoms(
    kb: &dyn KnowledgeBase,
    user_text: &str,
) -> Result<SymptomMatch, DatabaseError> {
    let (normalized, _tokens) = normalize(user_text);

    let catalog = kb.symptoms()?;
    let synonyms = kb.symptom_synonyms()?;

    let mut ids = Vec::new();
    let mut matches = Vec::new();

    for (id, name) in &catalog {
        let name_lower = name.trim().to_lowercase();
        if normalized.contains(&name_lower) {
            if !ids.contains(id) {
                ids.push(*id);
            }
            matches.push((name_lower, *id));
            continue;
        }

        if let Some(terms) = synonyms.get(name.trim()) {
            for term in terms {
                let term_lower = term.trim().to_lowercase();
                if normalized.contains(&term_lower) {
                    if !ids.contains(id) {
                        ids.push(*id);
                    }
                    matches.push((term_lower, *id));
                    break;
                }
            }
        }
    }

    tracing::debug!(input = user_text, matched = ids.len(), "Symptom matching complete");
    Ok(SymptomMatch { ids, matches })
}
