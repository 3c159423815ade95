//! Remote snapshot sync seam
//!
//! The board has a configured remote-database handle (endpoint + project id
//! from the environment) but no UI flow pushes to it. [`RemoteSync`] is the
//! capability a future sync backend would implement; [`BoardStore::push_remote`]
//! is the only caller.
//!
//! [`BoardStore::push_remote`]: crate::BoardStore::push_remote

use thiserror::Error;
use tracing::debug;

use crate::card::Card;

/// Default environment variable holding the remote endpoint URL
pub const DEFAULT_ENDPOINT_ENV: &str = "KANBOARD_REMOTE_URL";

/// Default environment variable holding the remote project identifier
pub const DEFAULT_PROJECT_ENV: &str = "KANBOARD_REMOTE_PROJECT_ID";

/// Errors from a remote sync backend
#[derive(Debug, Error)]
pub enum RemoteError {
    #[error("Remote is not configured (missing {0})")]
    NotConfigured(String),

    #[error("Remote rejected snapshot: {0}")]
    Rejected(String),
}

/// Capability: persist a full board snapshot somewhere else
pub trait RemoteSync {
    fn push_snapshot(&self, cards: &[Card]) -> Result<(), RemoteError>;
}

/// Connection settings for the remote database
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RemoteConfig {
    pub endpoint: Option<String>,
    pub project_id: Option<String>,
}

impl RemoteConfig {
    /// Read endpoint and project id from the named environment variables
    ///
    /// Empty values count as unset.
    pub fn from_env(endpoint_env: &str, project_env: &str) -> Self {
        let read = |name: &str| std::env::var(name).ok().filter(|v| !v.trim().is_empty());
        let config = Self {
            endpoint: read(endpoint_env),
            project_id: read(project_env),
        };
        debug!(?config, endpoint_env, project_env, "RemoteConfig::from_env: loaded");
        config
    }

    /// Both endpoint and project id are present
    pub fn is_configured(&self) -> bool {
        self.endpoint.is_some() && self.project_id.is_some()
    }

    /// Fail with the first missing setting
    pub fn require(&self) -> Result<(&str, &str), RemoteError> {
        let endpoint = self
            .endpoint
            .as_deref()
            .ok_or_else(|| RemoteError::NotConfigured("endpoint".to_string()))?;
        let project = self
            .project_id
            .as_deref()
            .ok_or_else(|| RemoteError::NotConfigured("project id".to_string()))?;
        Ok((endpoint, project))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    const ENDPOINT: &str = "BOARDSTORE_TEST_REMOTE_URL";
    const PROJECT: &str = "BOARDSTORE_TEST_REMOTE_PROJECT";

    fn clear() {
        // SAFETY: tests touching these variables are serialized
        unsafe {
            std::env::remove_var(ENDPOINT);
            std::env::remove_var(PROJECT);
        }
    }

    #[test]
    #[serial]
    fn test_from_env_unset() {
        clear();
        let config = RemoteConfig::from_env(ENDPOINT, PROJECT);
        assert_eq!(config, RemoteConfig::default());
        assert!(!config.is_configured());
        assert!(matches!(config.require(), Err(RemoteError::NotConfigured(_))));
    }

    #[test]
    #[serial]
    fn test_from_env_set() {
        clear();
        unsafe {
            std::env::set_var(ENDPOINT, "https://db.example.test/v1");
            std::env::set_var(PROJECT, "board-123");
        }
        let config = RemoteConfig::from_env(ENDPOINT, PROJECT);
        assert!(config.is_configured());
        assert_eq!(config.require().unwrap(), ("https://db.example.test/v1", "board-123"));
        clear();
    }

    #[test]
    #[serial]
    fn test_from_env_blank_is_unset() {
        clear();
        unsafe {
            std::env::set_var(ENDPOINT, "  ");
            std::env::set_var(PROJECT, "board-123");
        }
        let config = RemoteConfig::from_env(ENDPOINT, PROJECT);
        assert_eq!(config.endpoint, None);
        assert!(!config.is_configured());
        clear();
    }
}
