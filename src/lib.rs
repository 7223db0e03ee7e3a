//! Triago — conversational symptom intake assistant.
//!
//! A user reports symptoms in free text; the conversation core matches them
//! against a local knowledge base, asks clarifying follow-up questions, and
//! answers with a best-effort condition suggestion plus first-aid advice.
//! Keyword matching, not medical reasoning: the result is intake triage
//! support, never a clinical diagnosis.

pub mod api;
pub mod chatbot;
pub mod config;
pub mod core_state;
pub mod db;
pub mod diagnosis;
pub mod events;
pub mod kb;
pub mod models;
pub mod nlp;
