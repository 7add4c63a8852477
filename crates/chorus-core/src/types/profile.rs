//! Current-user profile as reported by the portal.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Role tier of a user, ordered from most restricted to most privileged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "u8", into = "u8")]
pub enum UserStatus {
    /// Minor or otherwise restricted account (wire value `0`).
    Restricted,
    /// Regular member (wire value `1`).
    Standard,
    /// Privileged member with personal statistics (wire value `2`).
    Privileged,
    /// Curator (wire value `3`).
    Curator,
    /// A tier this client does not know yet. Only `0` restricts access, so
    /// it is treated as unrestricted.
    Other(u8),
}

impl UserStatus {
    /// Whether this is the most-restricted tier.
    pub fn is_restricted(self) -> bool {
        matches!(self, Self::Restricted)
    }
}

impl From<u8> for UserStatus {
    fn from(value: u8) -> Self {
        match value {
            0 => Self::Restricted,
            1 => Self::Standard,
            2 => Self::Privileged,
            3 => Self::Curator,
            other => Self::Other(other),
        }
    }
}

impl From<UserStatus> for u8 {
    fn from(status: UserStatus) -> Self {
        match status {
            UserStatus::Restricted => 0,
            UserStatus::Standard => 1,
            UserStatus::Privileged => 2,
            UserStatus::Curator => 3,
            UserStatus::Other(value) => value,
        }
    }
}

impl fmt::Display for UserStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Restricted => write!(f, "restricted"),
            Self::Standard => write!(f, "standard"),
            Self::Privileged => write!(f, "privileged"),
            Self::Curator => write!(f, "curator"),
            Self::Other(value) => write!(f, "status {value}"),
        }
    }
}

/// The authenticated user's profile.
///
/// Fields the session layer does not use are ignored on decode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    /// Server-side identifier.
    #[serde(default)]
    pub id: Option<i64>,
    /// Role tier.
    pub user_status: UserStatus,
    /// Given name, used for the avatar initials.
    #[serde(default)]
    pub first_name: String,
    /// Family name.
    #[serde(default)]
    pub last_name: Option<String>,
    /// Login name.
    #[serde(default)]
    pub username: Option<String>,
}

impl UserProfile {
    /// Builds a profile with only the fields the session layer reads.
    pub fn new(user_status: UserStatus, first_name: impl Into<String>) -> Self {
        Self {
            id: None,
            user_status,
            first_name: first_name.into(),
            last_name: None,
            username: None,
        }
    }

    /// Avatar initials: first letter of the first one or two words of the
    /// given name, uppercased.
    pub fn initials(&self) -> Option<String> {
        let initials: String = self
            .first_name
            .split_whitespace()
            .take(2)
            .filter_map(|word| word.chars().next())
            .flat_map(char::to_uppercase)
            .collect();
        (!initials.is_empty()).then_some(initials)
    }
}
