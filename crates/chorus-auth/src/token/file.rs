//! Token persistence in a JSON document on disk.

use std::collections::BTreeMap;
use std::io::ErrorKind as IoErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use chorus_core::error::{AppError, ErrorKind};
use chorus_core::result::AppResult;
use chorus_core::traits::TokenStore;
use chorus_core::types::Token;

/// Key under which the session token is stored.
pub const TOKEN_KEY: &str = "token";

/// One persisted value with its expiry.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct StoredToken {
    value: Token,
    expires_at: DateTime<Utc>,
}

/// Token store backed by a small JSON document.
///
/// The document maps [`TOKEN_KEY`] to the token and its expiry. Writes go
/// through a temporary file and a rename, so a crash never leaves a torn
/// document behind. Expired records are dropped on read.
#[derive(Debug)]
pub struct FileTokenStore {
    /// Location of the document.
    path: PathBuf,
    /// Serializes read-modify-write cycles within the process.
    lock: Mutex<()>,
}

impl FileTokenStore {
    /// Creates a store at `path`. Nothing is touched on disk until the
    /// first write.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    /// Location of the document.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_document(&self) -> AppResult<BTreeMap<String, StoredToken>> {
        match std::fs::read(&self.path) {
            Ok(bytes) if bytes.is_empty() => Ok(BTreeMap::new()),
            Ok(bytes) => Ok(serde_json::from_slice(&bytes)?),
            Err(e) if e.kind() == IoErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(e) => Err(AppError::with_source(
                ErrorKind::Storage,
                format!("Failed to read token file {}: {e}", self.path.display()),
                e,
            )),
        }
    }

    fn write_document(&self, document: &BTreeMap<String, StoredToken>) -> AppResult<()> {
        if document.is_empty() {
            return match std::fs::remove_file(&self.path) {
                Ok(()) => Ok(()),
                Err(e) if e.kind() == IoErrorKind::NotFound => Ok(()),
                Err(e) => Err(e.into()),
            };
        }

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }

        let tmp = self.path.with_extension("json.tmp");
        std::fs::write(&tmp, serde_json::to_vec_pretty(document)?)?;
        std::fs::rename(&tmp, &self.path)?;
        Ok(())
    }

    fn guard(&self) -> AppResult<std::sync::MutexGuard<'_, ()>> {
        self.lock
            .lock()
            .map_err(|_| AppError::internal("Token store lock poisoned"))
    }
}

impl TokenStore for FileTokenStore {
    fn get(&self) -> AppResult<Option<Token>> {
        let _guard = self.guard()?;
        let mut document = self.read_document()?;

        match document.get(TOKEN_KEY) {
            Some(stored) if stored.expires_at > Utc::now() => Ok(Some(stored.value.clone())),
            Some(stored) => {
                info!(expired_at = %stored.expires_at, "Stored token expired, removing");
                document.remove(TOKEN_KEY);
                self.write_document(&document)?;
                Ok(None)
            }
            None => Ok(None),
        }
    }

    fn set(&self, token: &Token, ttl_days: u32) -> AppResult<()> {
        let _guard = self.guard()?;
        let mut document = self.read_document().unwrap_or_default();
        let expires_at = Utc::now() + Duration::days(i64::from(ttl_days));

        document.insert(
            TOKEN_KEY.to_string(),
            StoredToken {
                value: token.clone(),
                expires_at,
            },
        );
        self.write_document(&document)?;

        debug!(path = %self.path.display(), %expires_at, "Token persisted");
        Ok(())
    }

    fn clear(&self) -> AppResult<()> {
        let _guard = self.guard()?;
        let mut document = self.read_document().unwrap_or_default();
        document.remove(TOKEN_KEY);
        self.write_document(&document)?;

        debug!(path = %self.path.display(), "Token cleared");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store_in(dir: &tempfile::TempDir) -> FileTokenStore {
        FileTokenStore::new(dir.path().join("session").join("token.json"))
    }

    #[test]
    fn test_get_without_file() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        assert_eq!(store.get().unwrap(), None);
    }

    #[test]
    fn test_set_then_get() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        store.set(&Token::new("T1"), 30).unwrap();
        assert_eq!(store.get().unwrap(), Some(Token::new("T1")));
    }

    #[test]
    fn test_survives_new_instance() {
        let dir = tempfile::tempdir().unwrap();
        store_in(&dir).set(&Token::new("T1"), 30).unwrap();

        let reopened = store_in(&dir);
        assert_eq!(reopened.get().unwrap(), Some(Token::new("T1")));
    }

    #[test]
    fn test_set_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        store.set(&Token::new("T1"), 30).unwrap();
        store.set(&Token::new("T2"), 30).unwrap();
        assert_eq!(store.get().unwrap(), Some(Token::new("T2")));
    }

    #[test]
    fn test_clear_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        store.clear().unwrap();
        store.set(&Token::new("T1"), 30).unwrap();
        store.clear().unwrap();
        store.clear().unwrap();
        assert_eq!(store.get().unwrap(), None);
        assert!(!store.path().exists());
    }

    #[test]
    fn test_expired_token_is_dropped() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        store.set(&Token::new("T1"), 30).unwrap();

        let expired = serde_json::json!({
            TOKEN_KEY: { "value": "T1", "expires_at": "2000-01-01T00:00:00Z" }
        });
        std::fs::write(store.path(), expired.to_string()).unwrap();

        assert_eq!(store.get().unwrap(), None);
        assert!(!store.path().exists());
    }

    #[test]
    fn test_zero_ttl_is_already_expired() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        store.set(&Token::new("T1"), 0).unwrap();
        assert_eq!(store.get().unwrap(), None);
    }

    #[test]
    fn test_corrupt_document_is_an_error_on_read() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        std::fs::create_dir_all(store.path().parent().unwrap()).unwrap();
        std::fs::write(store.path(), b"{not json").unwrap();

        assert!(store.get().is_err());

        // A write replaces the unreadable document.
        store.set(&Token::new("T3"), 30).unwrap();
        assert_eq!(store.get().unwrap(), Some(Token::new("T3")));
    }
}
