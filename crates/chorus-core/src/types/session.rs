//! Session flags observed by the rest of the application.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Snapshot of the authentication flags.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// A non-expired token was present at the last observation point.
    pub is_logged: bool,
    /// A login is in flight.
    pub loading: bool,
    /// The last login or an authenticated request failed.
    pub error: bool,
}

impl Session {
    /// Derives the controller state from the flags.
    ///
    /// `loading` takes precedence over `error`, which takes precedence over
    /// `is_logged`.
    pub fn state(&self) -> AuthState {
        if self.loading {
            AuthState::Authenticating
        } else if self.error {
            AuthState::Failed
        } else if self.is_logged {
            AuthState::Authenticated
        } else {
            AuthState::Anonymous
        }
    }
}

/// States of the auth controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuthState {
    /// No token.
    Anonymous,
    /// A login is in flight.
    Authenticating,
    /// A token is stored.
    Authenticated,
    /// The last attempt failed; `is_logged` keeps its prior value.
    Failed,
}

impl fmt::Display for AuthState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Anonymous => write!(f, "anonymous"),
            Self::Authenticating => write!(f, "authenticating"),
            Self::Authenticated => write!(f, "authenticated"),
            Self::Failed => write!(f, "failed"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_precedence() {
        let mut session = Session::default();
        assert_eq!(session.state(), AuthState::Anonymous);

        session.is_logged = true;
        assert_eq!(session.state(), AuthState::Authenticated);

        session.error = true;
        assert_eq!(session.state(), AuthState::Failed);
        assert!(session.is_logged);

        session.loading = true;
        assert_eq!(session.state(), AuthState::Authenticating);
    }
}
