//! Access gate and session context.
//!
//! DESIGN
//! ======
//! Access is guarded by one shared password checked on the client. A
//! successful login persists a flag under [`AUTH_STORAGE_KEY`] so the next
//! start skips the prompt. There is no ambient global: views receive the
//! [`Session`] returned by [`SessionContext::login`] or
//! [`SessionContext::restore`], and [`SessionContext::logout`] consumes it.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use time::OffsetDateTime;
use tracing::{info, warn};

pub const AUTH_STORAGE_KEY: &str = "chatbw-authenticated";
pub const INCORRECT_PASSWORD_MESSAGE: &str = "Senha incorreta, tente novamente.";

const SESSION_FILE_NAME: &str = "session.json";

// =============================================================================
// ERRORS
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("session storage I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("session storage is corrupt: {0}")]
    Format(#[from] serde_json::Error),
}

#[derive(Debug, thiserror::Error)]
pub enum GateError {
    #[error("Senha incorreta, tente novamente.")]
    IncorrectPassword,
    #[error(transparent)]
    Store(#[from] StoreError),
}

// =============================================================================
// STORAGE
// =============================================================================

/// Small string key/value store that survives restarts.
pub trait SessionStore: Send + Sync {
    /// # Errors
    ///
    /// Returns an error if the backing storage cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// # Errors
    ///
    /// Returns an error if the backing storage cannot be written.
    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;

    /// # Errors
    ///
    /// Returns an error if the backing storage cannot be written.
    fn remove(&self, key: &str) -> Result<(), StoreError>;
}

/// Process-local store; nothing survives a restart.
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    values: Mutex<HashMap<String, String>>,
}

impl MemorySessionStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStore for MemorySessionStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let values = self.values.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(values.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let mut values = self.values.lock().unwrap_or_else(PoisonError::into_inner);
        values.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        let mut values = self.values.lock().unwrap_or_else(PoisonError::into_inner);
        values.remove(key);
        Ok(())
    }
}

/// JSON object persisted at `<dir>/session.json`.
#[derive(Debug, Clone)]
pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    #[must_use]
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        Self { path: dir.as_ref().join(SESSION_FILE_NAME) }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<HashMap<String, String>, StoreError> {
        match std::fs::read_to_string(&self.path) {
            Ok(raw) if raw.trim().is_empty() => Ok(HashMap::new()),
            Ok(raw) => Ok(serde_json::from_str(&raw)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(HashMap::new()),
            Err(e) => Err(e.into()),
        }
    }

    fn save(&self, values: &HashMap<String, String>) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.path, serde_json::to_string_pretty(values)?)?;
        Ok(())
    }
}

impl SessionStore for FileSessionStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.load()?.remove(key))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let mut values = self.load()?;
        values.insert(key.to_string(), value.to_string());
        self.save(&values)
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        let mut values = self.load()?;
        if values.remove(key).is_some() {
            self.save(&values)?;
        }
        Ok(())
    }
}

// =============================================================================
// GATE + SESSION
// =============================================================================

/// Holds the configured shared password.
#[derive(Clone)]
pub struct AccessGate {
    password: String,
}

impl AccessGate {
    #[must_use]
    pub fn new(password: impl Into<String>) -> Self {
        Self { password: password.into() }
    }

    /// Exact, case-sensitive comparison; no trimming.
    #[must_use]
    pub fn check(&self, candidate: &str) -> bool {
        candidate == self.password
    }
}

impl std::fmt::Debug for AccessGate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AccessGate").finish_non_exhaustive()
    }
}

/// Which screen the front end should show.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Auth,
    Chat,
}

/// Proof of authentication handed to views. Only [`SessionContext`] creates one.
#[derive(Debug)]
pub struct Session {
    started_at: OffsetDateTime,
}

impl Session {
    fn start() -> Self {
        Self { started_at: OffsetDateTime::now_utc() }
    }

    #[must_use]
    pub fn started_at(&self) -> OffsetDateTime {
        self.started_at
    }
}

/// Login state for one front end.
pub struct SessionContext<S: SessionStore> {
    gate: AccessGate,
    store: S,
    view: View,
    error: Option<String>,
}

impl<S: SessionStore> SessionContext<S> {
    #[must_use]
    pub fn new(gate: AccessGate, store: S) -> Self {
        Self { gate, store, view: View::Auth, error: None }
    }

    #[must_use]
    pub fn view(&self) -> View {
        self.view
    }

    /// Inline error from the last failed login, if any.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Resume a session persisted by an earlier login.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    pub fn restore(&mut self) -> Result<Option<Session>, GateError> {
        let authenticated = self.store.get(AUTH_STORAGE_KEY)?.as_deref() == Some("true");
        if !authenticated {
            self.view = View::Auth;
            return Ok(None);
        }
        self.view = View::Chat;
        Ok(Some(Session::start()))
    }

    /// Check `password` and, on match, persist the flag and switch to chat.
    ///
    /// # Errors
    ///
    /// Returns [`GateError::IncorrectPassword`] on mismatch (flag left unset,
    /// inline error recorded) or a store error if persisting fails.
    pub fn login(&mut self, password: &str) -> Result<Session, GateError> {
        if !self.gate.check(password) {
            warn!("gate: incorrect password");
            self.error = Some(INCORRECT_PASSWORD_MESSAGE.to_string());
            self.view = View::Auth;
            return Err(GateError::IncorrectPassword);
        }
        self.store.set(AUTH_STORAGE_KEY, "true")?;
        self.error = None;
        self.view = View::Chat;
        info!("gate: authenticated");
        Ok(Session::start())
    }

    /// End `session`, clear the persisted flag, and return to the auth view.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be written.
    pub fn logout(&mut self, session: Session) -> Result<(), GateError> {
        self.store.remove(AUTH_STORAGE_KEY)?;
        self.view = View::Auth;
        info!(started_at = %session.started_at, "gate: logged out");
        Ok(())
    }
}

#[cfg(test)]
#[path = "gate_test.rs"]
mod tests;
