//! Opaque credential token.

use std::fmt;

use serde::{Deserialize, Serialize};

/// An access token issued by the credential authority.
///
/// The value is never printed by `Debug`.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Token(String);

impl Token {
    /// Wraps a raw token string.
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Returns the raw token for use in an `Authorization` header.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the token and returns the raw string.
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Token").field(&"<redacted>").finish()
    }
}

impl From<String> for Token {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for Token {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// Successful response of the credential exchange.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenGrant {
    /// Access token, the only part the session persists.
    pub access: Token,
    /// Refresh token, if the authority issued one.
    #[serde(default)]
    pub refresh: Option<Token>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_is_redacted() {
        let token = Token::new("eyJhbGciOi.secret");
        let printed = format!("{token:?}");
        assert!(!printed.contains("secret"));
        assert_eq!(token.as_str(), "eyJhbGciOi.secret");
    }

    #[test]
    fn test_grant_without_refresh() {
        let grant: TokenGrant = serde_json::from_str(r#"{"access": "T1"}"#).unwrap();
        assert_eq!(grant.access, Token::new("T1"));
        assert!(grant.refresh.is_none());
    }
}
