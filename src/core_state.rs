//! Transport-agnostic application state.
//!
//! `CoreState` is shared by every transport handler. It owns the session
//! registry (one `Session` per key) and knows where the knowledge base
//! lives; handlers open a fresh SQLite connection per request. The registry
//! lock also provides the per-session serialization the conversation core
//! assumes: a session is only ever mutated while the write lock is held.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{RwLock, RwLockWriteGuard};

use rusqlite::Connection;
use thiserror::Error;
use uuid::Uuid;

use crate::db::{self, DatabaseError};
use crate::models::Session;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Session registry lock poisoned")]
    LockPoisoned,

    #[error(transparent)]
    Database(#[from] DatabaseError),
}

pub struct CoreState {
    db_path: PathBuf,
    sessions: RwLock<HashMap<Uuid, Session>>,
}

impl CoreState {
    pub fn new(db_path: PathBuf) -> Self {
        Self {
            db_path,
            sessions: RwLock::new(HashMap::new()),
        }
    }

    /// Open a connection to the knowledge-base database.
    pub fn open_db(&self) -> Result<Connection, CoreError> {
        Ok(db::open_database(&self.db_path)?)
    }

    /// Exclusive access to the session registry.
    pub fn sessions_mut(
        &self,
    ) -> Result<RwLockWriteGuard<'_, HashMap<Uuid, Session>>, CoreError> {
        self.sessions.write().map_err(|_| CoreError::LockPoisoned)
    }

    /// Create a fresh session and return its key.
    pub fn create_session(&self) -> Result<Uuid, CoreError> {
        let id = Uuid::new_v4();
        self.sessions_mut()?.insert(id, Session::new());
        tracing::debug!(session_id = %id, "Session created");
        Ok(id)
    }

    /// Reset the session with the given key, creating it if absent.
    pub fn reset_session(&self, id: Uuid) -> Result<(), CoreError> {
        self.sessions_mut()?.entry(id).or_default().reset();
        tracing::debug!(session_id = %id, "Session reset");
        Ok(())
    }

    /// Number of live sessions.
    pub fn session_count(&self) -> Result<usize, CoreError> {
        Ok(self
            .sessions
            .read()
            .map_err(|_| CoreError::LockPoisoned)?
            .len())
    }
}
