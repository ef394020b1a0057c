// src/config.rs
// =============================================================================
// Runtime configuration.
//
// Everything has a sensible default so the tool works out of the box.
// Environment variables override the defaults, and the CLI can override
// individual values on top of that.
//
//   REPO_FINDER_API_BASE      search endpoint (default: GitHub's)
//   REPO_FINDER_PREFS         path of the JSON preference file
//   REPO_FINDER_TIMEOUT_SECS  per-request timeout
//   REPO_FINDER_USER_AGENT    User-Agent header (GitHub rejects requests without one)
// =============================================================================

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub const DEFAULT_API_BASE: &str = "https://api.github.com/search/repositories";
pub const DEFAULT_PREFS_FILE: &str = "repo-finder-prefs.json";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Repository search endpoint, without query string
    pub api_base: String,
    /// Where `JsonFilePreferenceStore` keeps filter preferences
    pub preferences_path: PathBuf,
    /// Request timeout in seconds
    pub timeout_secs: u64,
    pub user_agent: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            preferences_path: PathBuf::from(DEFAULT_PREFS_FILE),
            timeout_secs: 10,
            user_agent: format!("repo-finder/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl Config {
    /// Defaults overridden by the process environment
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    // Separated from from_env() so tests don't have to touch the real environment
    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(base) = lookup("REPO_FINDER_API_BASE") {
            config.api_base = base;
        }
        if let Some(path) = lookup("REPO_FINDER_PREFS") {
            config.preferences_path = PathBuf::from(path);
        }
        if let Some(raw) = lookup("REPO_FINDER_TIMEOUT_SECS") {
            match raw.parse() {
                Ok(secs) => config.timeout_secs = secs,
                Err(_) => tracing::warn!(value = %raw, "ignoring invalid REPO_FINDER_TIMEOUT_SECS"),
            }
        }
        if let Some(agent) = lookup("REPO_FINDER_USER_AGENT") {
            config.user_agent = agent;
        }

        config
    }
}
