use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

use crate::external_api::ApiError;

pub const ADMIN_USERNAME: &str = "admin";
pub const ADMIN_PASSWORD: &str = "adm!nPrueb!ta";

/// Proof of a successful admin login
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Session {
    pub token: Uuid,
    pub issued_at: DateTime<Utc>,
}

impl Session {
    fn issue() -> Self {
        Self {
            token: Uuid::new_v4(),
            issued_at: Utc::now(),
        }
    }
}

pub trait SessionStore {
    fn load(&self) -> Result<Option<Session>, ApiError>;

    fn save(&self, session: &Session) -> Result<(), ApiError>;

    fn clear(&self) -> Result<(), ApiError>;
}

/// Session persisted as JSON so it survives between runs
pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

impl SessionStore for FileSessionStore {
    fn load(&self) -> Result<Option<Session>, ApiError> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        match serde_json::from_str(&content) {
            Ok(session) => Ok(Some(session)),
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "ignoring unreadable session file");
                Ok(None)
            }
        }
    }

    fn save(&self, session: &Session) -> Result<(), ApiError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, serde_json::to_string_pretty(session)?)?;
        Ok(())
    }

    fn clear(&self) -> Result<(), ApiError> {
        match fs::remove_file(&self.path) {
            Err(e) if e.kind() != ErrorKind::NotFound => Err(e.into()),
            _ => Ok(()),
        }
    }
}

/// Decides whether admin commands may run.
///
/// The credential pair is fixed and checked here only; the backend endpoints do
/// not verify the session.
pub struct CredentialGate<S: SessionStore> {
    store: S,
}

impl<S: SessionStore> CredentialGate<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// `true` and a persisted session on a match, `false` with nothing changed otherwise
    pub fn authenticate(&self, username: &str, password: &str) -> Result<bool, ApiError> {
        if username != ADMIN_USERNAME || password != ADMIN_PASSWORD {
            warn!(username, "rejected login");
            return Ok(false);
        }
        self.store.save(&Session::issue())?;
        info!(username, "admin session started");
        Ok(true)
    }

    pub fn logout(&self) -> Result<(), ApiError> {
        self.store.clear()
    }

    pub fn session(&self) -> Result<Option<Session>, ApiError> {
        self.store.load()
    }

    pub fn is_authenticated(&self) -> Result<bool, ApiError> {
        Ok(self.session()?.is_some())
    }

    pub fn require(&self) -> Result<Session, ApiError> {
        self.session()?.ok_or(ApiError::NotAuthenticated)
    }
}
