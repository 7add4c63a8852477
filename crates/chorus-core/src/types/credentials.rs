//! Login credentials.

use std::fmt;

/// Identifier/secret pair submitted to the credential exchange.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    /// Login name.
    pub identifier: String,
    /// Password.
    pub secret: String,
}

impl Credentials {
    /// Creates a credential pair.
    pub fn new(identifier: impl Into<String>, secret: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            secret: secret.into(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("identifier", &self.identifier)
            .field("secret", &"<redacted>")
            .finish()
    }
}
