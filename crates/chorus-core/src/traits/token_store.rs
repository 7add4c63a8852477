//! Durable credential token persistence.

use crate::result::AppResult;
use crate::types::Token;

/// Persistence for the single session token.
///
/// Expiration is enforced by the backend: `get` never returns a token whose
/// TTL has elapsed. Operations are synchronous; the controller relies on a
/// write being complete before it flips the session flags.
pub trait TokenStore: Send + Sync + std::fmt::Debug + 'static {
    /// Returns the stored token, if present and not expired.
    fn get(&self) -> AppResult<Option<Token>>;

    /// Stores `token` for `ttl_days`, replacing any existing token.
    fn set(&self, token: &Token, ttl_days: u32) -> AppResult<()>;

    /// Removes the token. Succeeds when no token is stored.
    fn clear(&self) -> AppResult<()>;
}
