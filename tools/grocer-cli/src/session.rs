//! Session persistence between CLI invocations.

use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use grocer_commerce::session::Session;
use serde::{Deserialize, Serialize};

/// Session file name, kept beside the config file.
pub const SESSION_FILE: &str = ".grocer-session.toml";

/// The shopper session as stored on disk.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StoredSession {
    #[serde(flatten)]
    pub session: Session,

    /// When the current address logged in.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logged_in_at: Option<DateTime<Utc>>,
}

impl StoredSession {
    /// Load the session; a missing file is an anonymous session.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read session file: {}", path.display()))?;
        toml::from_str(&content)
            .with_context(|| format!("Failed to parse session file: {}", path.display()))
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write session file: {}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use grocer_commerce::session::LoginPolicy;

    #[test]
    fn test_session_file_roundtrip() {
        let dir = std::env::temp_dir().join(format!("grocer-session-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join(SESSION_FILE);

        let mut stored = StoredSession::load(&path).unwrap();
        assert!(!stored.session.is_logged_in());

        stored
            .session
            .login("shopper@example.com", &LoginPolicy::open())
            .unwrap();
        stored.logged_in_at = Some(Utc::now());
        stored.save(&path).unwrap();

        let loaded = StoredSession::load(&path).unwrap();
        assert_eq!(loaded.session.email(), Some("shopper@example.com"));
        assert!(loaded.logged_in_at.is_some());

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_anonymous_session_serializes_empty() {
        let content = toml::to_string_pretty(&StoredSession::default()).unwrap();
        assert!(content.trim().is_empty());
    }
}
