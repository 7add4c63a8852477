//! Auth controller: login, logout, and the session flags.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use tokio::sync::{Mutex, watch};
use tracing::{debug, error, info, warn};

use chorus_core::config::AuthConfig;
use chorus_core::error::AuthError;
use chorus_core::result::AppResult;
use chorus_core::traits::{CredentialExchange, QueryCache, TokenStore};
use chorus_core::types::{AuthState, Credentials, Session};

/// Owns the session flags and keeps them consistent with the token store
/// and the query cache.
///
/// Ordering guarantees:
/// - `login` persists the token before `is_logged` becomes true.
/// - `logout` purges the cache before `is_logged` becomes false.
///
/// Every flag change is one `send_modify`, so subscribers never observe a
/// partially applied transition.
pub struct AuthController {
    /// Durable token persistence.
    tokens: Arc<dyn TokenStore>,
    /// Responses fetched under the current identity.
    cache: Arc<dyn QueryCache>,
    /// Credential authority.
    exchange: Arc<dyn CredentialExchange>,
    /// Current flags; receivers are handed out by `subscribe`.
    state: watch::Sender<Session>,
    /// Lifetime given to freshly issued tokens.
    token_ttl_days: u32,
    /// Present when overlapping logins must be serialized.
    login_gate: Option<Mutex<()>>,
    /// Logins started and not yet settled or dropped.
    in_flight: AtomicUsize,
}

impl std::fmt::Debug for AuthController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthController")
            .field("session", &*self.state.borrow())
            .field("token_ttl_days", &self.token_ttl_days)
            .field("exclusive_login", &self.login_gate.is_some())
            .finish()
    }
}

impl AuthController {
    /// Creates the controller, deriving the initial state from one read of
    /// the token store.
    ///
    /// An unreadable store is logged and treated as holding no token.
    pub fn new(
        tokens: Arc<dyn TokenStore>,
        cache: Arc<dyn QueryCache>,
        exchange: Arc<dyn CredentialExchange>,
        config: &AuthConfig,
    ) -> Self {
        let is_logged = match tokens.get() {
            Ok(token) => token.is_some(),
            Err(e) => {
                warn!(error = %e, "Failed to read stored token, starting anonymous");
                false
            }
        };

        info!(is_logged, "Session initialized from token store");

        Self {
            tokens,
            cache,
            exchange,
            state: watch::Sender::new(Session {
                is_logged,
                ..Session::default()
            }),
            token_ttl_days: config.token_ttl_days,
            login_gate: config.exclusive_login.then(|| Mutex::new(())),
            in_flight: AtomicUsize::new(0),
        }
    }

    /// Current flags.
    pub fn session(&self) -> Session {
        *self.state.borrow()
    }

    /// Current state, derived from the flags.
    pub fn state(&self) -> AuthState {
        self.session().state()
    }

    /// Whether a token is stored.
    pub fn is_logged(&self) -> bool {
        self.state.borrow().is_logged
    }

    /// Receives every subsequent change of the flags.
    pub fn subscribe(&self) -> watch::Receiver<Session> {
        self.state.subscribe()
    }

    /// Exchanges `credentials` for a token and persists it.
    ///
    /// On failure `is_logged` and the stored token keep their previous
    /// values and `error` is raised. Without `exclusive_login`, overlapping
    /// calls are not rejected: the last one to complete wins. `loading` is
    /// raised for the whole call, including the wait for the login gate,
    /// and is released even when the future is dropped before completion.
    pub async fn login(&self, credentials: &Credentials) -> Result<(), AuthError> {
        info!(identifier = %credentials.identifier, "Login started");
        let pending = PendingLogin::begin(self);

        let _gate = match &self.login_gate {
            Some(gate) => Some(gate.lock().await),
            None => None,
        };

        let result = self.exchange_and_persist(credentials).await;

        match &result {
            Ok(()) => {
                pending.settle(|s| {
                    s.is_logged = true;
                    s.error = false;
                });
                info!(identifier = %credentials.identifier, "Login succeeded");
            }
            Err(e) => {
                pending.settle(|s| s.error = true);
                warn!(identifier = %credentials.identifier, error = %e, "Login failed");
            }
        }

        result
    }

    async fn exchange_and_persist(&self, credentials: &Credentials) -> Result<(), AuthError> {
        let grant = self.exchange.exchange(credentials).await?;
        self.tokens
            .set(&grant.access, self.token_ttl_days)
            .map_err(|e| AuthError::Storage(e.message))
    }

    /// Removes the token, purges every cached response, and becomes
    /// anonymous.
    ///
    /// Idempotent. The cache is purged even when the token cannot be
    /// removed; in that case the session stays logged in (the token is
    /// still there) and the storage error is returned.
    pub fn logout(&self) -> AppResult<()> {
        let cleared = self.tokens.clear();

        let purged = self.cache.entry_count();
        self.cache.invalidate_all();

        match cleared {
            Ok(()) => {
                self.state.send_modify(|s| {
                    s.is_logged = false;
                    s.error = false;
                });
                info!(purged, "Logged out");
                Ok(())
            }
            Err(e) => {
                self.state.send_modify(|s| s.error = true);
                error!(purged, error = %e, "Failed to remove stored token during logout");
                Err(e)
            }
        }
    }

    /// Sets the error flag. Used by request layers that detect failures
    /// outside `login`.
    pub fn set_error(&self, error: bool) {
        self.state.send_if_modified(|s| {
            let changed = s.error != error;
            s.error = error;
            changed
        });
    }

    /// Sets the loading flag.
    pub fn set_loading(&self, loading: bool) {
        self.state.send_if_modified(|s| {
            let changed = s.loading != loading;
            s.loading = loading;
            changed
        });
    }
}

/// Keeps one login counted in `in_flight` until it settles or is dropped.
struct PendingLogin<'a> {
    controller: &'a AuthController,
    settled: bool,
}

impl<'a> PendingLogin<'a> {
    fn begin(controller: &'a AuthController) -> Self {
        controller.in_flight.fetch_add(1, Ordering::SeqCst);
        controller.state.send_modify(|s| s.loading = true);
        Self {
            controller,
            settled: false,
        }
    }

    /// Applies the outcome and the recomputed `loading` in one transition.
    fn settle(mut self, outcome: impl FnOnce(&mut Session)) {
        self.settled = true;
        let still_loading = self.release();
        self.controller.state.send_modify(|s| {
            outcome(s);
            s.loading = still_loading;
        });
    }

    /// Returns whether other logins are still in flight.
    fn release(&self) -> bool {
        self.controller.in_flight.fetch_sub(1, Ordering::SeqCst) > 1
    }
}

impl Drop for PendingLogin<'_> {
    fn drop(&mut self) {
        if self.settled {
            return;
        }
        let still_loading = self.release();
        self.controller.state.send_modify(|s| s.loading = still_loading);
        debug!("Login abandoned before completion");
    }
}
