//! Process-local token store.

use std::sync::Mutex;

use chrono::{DateTime, Duration, Utc};

use chorus_core::error::AppError;
use chorus_core::result::AppResult;
use chorus_core::traits::TokenStore;
use chorus_core::types::Token;

/// Token store that lives only as long as the process.
///
/// Used for ephemeral sessions and in tests.
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    slot: Mutex<Option<(Token, DateTime<Utc>)>>,
}

impl MemoryTokenStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store already holding `token` for `ttl_days`.
    pub fn with_token(token: impl Into<Token>, ttl_days: u32) -> Self {
        let expires_at = Utc::now() + Duration::days(i64::from(ttl_days));
        Self {
            slot: Mutex::new(Some((token.into(), expires_at))),
        }
    }

    fn slot(&self) -> AppResult<std::sync::MutexGuard<'_, Option<(Token, DateTime<Utc>)>>> {
        self.slot
            .lock()
            .map_err(|_| AppError::internal("Token store lock poisoned"))
    }
}

impl TokenStore for MemoryTokenStore {
    fn get(&self) -> AppResult<Option<Token>> {
        let mut slot = self.slot()?;
        if matches!(&*slot, Some((_, expires_at)) if *expires_at <= Utc::now()) {
            *slot = None;
        }
        Ok(slot.as_ref().map(|(token, _)| token.clone()))
    }

    fn set(&self, token: &Token, ttl_days: u32) -> AppResult<()> {
        let expires_at = Utc::now() + Duration::days(i64::from(ttl_days));
        *self.slot()? = Some((token.clone(), expires_at));
        Ok(())
    }

    fn clear(&self) -> AppResult<()> {
        *self.slot()? = None;
        Ok(())
    }
}
