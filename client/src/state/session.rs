//! Session data that survives a reload: the last used connector.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::core::error::{AppError, Result};

/// Contents of the session file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PersistedSession {
    /// Registry key of the connector used for the last successful connection
    pub saved_connector: Option<String>,
}

/// JSON file holding the [`PersistedSession`].
#[derive(Debug, Clone)]
pub struct SessionFile {
    path: PathBuf,
}

impl SessionFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the session. A missing file is an empty session.
    pub fn load(&self) -> Result<PersistedSession> {
        if !self.path.exists() {
            return Ok(PersistedSession::default());
        }
        let content = std::fs::read_to_string(&self.path)?;
        serde_json::from_str(&content).map_err(|e| {
            AppError::State(format!("Malformed session file {}: {}", self.path.display(), e))
        })
    }

    /// Load the session, falling back to an empty one on any error.
    pub fn load_or_default(&self) -> PersistedSession {
        match self.load() {
            Ok(session) => session,
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "Failed to load session, starting fresh");
                PersistedSession::default()
            }
        }
    }

    pub fn save(&self, session: &PersistedSession) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let content = serde_json::to_string_pretty(session)?;
        std::fs::write(&self.path, content)?;
        tracing::debug!(path = %self.path.display(), "Session saved");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_file() -> SessionFile {
        let dir = std::env::temp_dir().join(format!("dapp-client-{}", uuid::Uuid::new_v4()));
        SessionFile::new(dir.join("session.json"))
    }

    #[test]
    fn test_missing_file_is_empty_session() {
        let file = scratch_file();
        assert_eq!(file.load().unwrap(), PersistedSession::default());
    }

    #[test]
    fn test_save_then_load() {
        let file = scratch_file();
        let session = PersistedSession {
            saved_connector: Some("injected".to_string()),
        };
        file.save(&session).unwrap();
        assert_eq!(file.load().unwrap(), session);
        let _ = std::fs::remove_dir_all(file.path().parent().unwrap());
    }

    #[test]
    fn test_malformed_file_is_state_error() {
        let file = scratch_file();
        std::fs::create_dir_all(file.path().parent().unwrap()).unwrap();
        std::fs::write(file.path(), "{ not json").unwrap();

        assert!(matches!(file.load(), Err(AppError::State(_))));
        assert_eq!(file.load_or_default(), PersistedSession::default());
        let _ = std::fs::remove_dir_all(file.path().parent().unwrap());
    }
}
