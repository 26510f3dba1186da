//! The login session.
//!
//! A session is a user id and role persisted to a local JSON file. The
//! catalog service never validates it: whoever can write the file is logged
//! in.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use homestore_core::{Role, UserId};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::error::AppError;

/// Errors reading or writing the session file.
#[derive(Debug, Error)]
pub enum SessionError {
    /// Filesystem operation failed.
    #[error("session file error: {0}")]
    Io(#[from] std::io::Error),

    /// The session could not be encoded.
    #[error("session encoding error: {0}")]
    Json(#[from] serde_json::Error),
}

/// The logged-in user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub user_id: UserId,
    pub role: Role,
}

impl Session {
    #[must_use]
    pub const fn new(user_id: UserId, role: Role) -> Self {
        Self { user_id, role }
    }

    #[must_use]
    pub const fn is_admin(&self) -> bool {
        self.role.is_admin()
    }
}

/// Reads and writes the session file.
#[derive(Debug, Clone)]
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    /// A store backed by `path`. Nothing is touched until the first call.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Location of the session file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The stored session, if any.
    ///
    /// A missing file means logged out. An unreadable record is logged and
    /// also treated as logged out.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Io` if the file exists but cannot be read.
    pub async fn load(&self) -> Result<Option<Session>, SessionError> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        match serde_json::from_slice(&bytes) {
            Ok(session) => Ok(Some(session)),
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "Ignoring unreadable session file");
                Ok(None)
            }
        }
    }

    /// The stored session, or `AppError::Unauthorized` when logged out.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Unauthorized` without a session and
    /// `AppError::Session` if the file cannot be read.
    pub async fn require(&self) -> Result<Session, AppError> {
        self.load().await?.ok_or(AppError::Unauthorized)
    }

    /// Persist `session`, creating parent directories as needed.
    ///
    /// # Errors
    ///
    /// Returns `SessionError` if the file cannot be written.
    pub async fn save(&self, session: &Session) -> Result<(), SessionError> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            tokio::fs::create_dir_all(parent).await?;
        }
        let json = serde_json::to_vec_pretty(session)?;
        tokio::fs::write(&self.path, json).await?;
        debug!(user_id = %session.user_id, "Session saved");
        Ok(())
    }

    /// Forget the session. Clearing an absent session is not an error.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Io` if the file exists but cannot be removed.
    pub async fn clear(&self) -> Result<(), SessionError> {
        match tokio::fs::remove_file(&self.path).await {
            Ok(()) => {
                debug!("Session cleared");
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
