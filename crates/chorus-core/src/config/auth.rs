//! Authentication configuration.

use serde::{Deserialize, Serialize};

/// Token persistence and login policy.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Path of the persisted token document.
    #[serde(default = "default_token_path")]
    pub token_path: String,
    /// Lifetime of a stored token in days, counted from the last write.
    #[serde(default = "default_token_ttl")]
    pub token_ttl_days: u32,
    /// Serialize overlapping `login` calls behind a single in-flight guard.
    ///
    /// Off by default: the latest completing login wins.
    #[serde(default)]
    pub exclusive_login: bool,
    /// Course identifier of the restricted youth content group.
    #[serde(default = "default_youth_course")]
    pub youth_course: u32,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            token_path: default_token_path(),
            token_ttl_days: default_token_ttl(),
            exclusive_login: false,
            youth_course: default_youth_course(),
        }
    }
}

fn default_token_path() -> String {
    "data/session/token.json".to_string()
}

fn default_token_ttl() -> u32 {
    30
}

fn default_youth_course() -> u32 {
    6
}
