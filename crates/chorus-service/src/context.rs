//! Process-wide session context.

use std::sync::Arc;

use tracing::{info, warn};

use chorus_auth::entitlement::{Capabilities, catalog_query};
use chorus_auth::{AuthController, FileTokenStore, MemoryTokenStore};
use chorus_cache::{CacheManager, keys};
use chorus_client::ApiClient;
use chorus_core::config::AppConfig;
use chorus_core::error::{AppError, ErrorKind};
use chorus_core::result::AppResult;
use chorus_core::traits::{CatalogSource, CredentialExchange, ProfileSource, QueryCache, TokenStore};
use chorus_core::types::{ContentDescriptor, CourseId, Credentials, Token, UserProfile};

use crate::query::{IdentityEpoch, cached};

/// Everything the session layer shares across the application.
///
/// Constructed once at startup and handed out by reference. It is never
/// torn down; `logout` is the only reset.
pub struct SessionContext {
    /// Loaded configuration.
    config: AppConfig,
    /// Durable token persistence.
    tokens: Arc<dyn TokenStore>,
    /// Responses fetched under the current identity.
    cache: CacheManager,
    /// Session state machine.
    controller: AuthController,
    /// Profile endpoint.
    profiles: Arc<dyn ProfileSource>,
    /// Material listings.
    catalog: Arc<dyn CatalogSource>,
    /// Guards the cache against fetches outliving an identity.
    epoch: IdentityEpoch,
}

impl std::fmt::Debug for SessionContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionContext")
            .field("controller", &self.controller)
            .field("cache", &self.cache)
            .finish()
    }
}

impl SessionContext {
    /// Builds the context from configuration: a file token store, the
    /// in-memory cache, and the HTTP client.
    pub fn new(config: AppConfig) -> AppResult<Self> {
        let tokens = Arc::new(FileTokenStore::new(&config.auth.token_path));
        Self::with_token_store(config, tokens)
    }

    /// Like [`SessionContext::new`], but the token lives only as long as
    /// the process and nothing is written to disk.
    pub fn ephemeral(config: AppConfig) -> AppResult<Self> {
        Self::with_token_store(config, Arc::new(MemoryTokenStore::new()))
    }

    fn with_token_store(config: AppConfig, tokens: Arc<dyn TokenStore>) -> AppResult<Self> {
        let client = Arc::new(ApiClient::new(&config.api)?);

        Ok(Self::from_parts(
            config,
            tokens,
            client.clone(),
            client.clone(),
            client,
        ))
    }

    /// Builds the context from explicit collaborators.
    pub fn from_parts(
        config: AppConfig,
        tokens: Arc<dyn TokenStore>,
        exchange: Arc<dyn CredentialExchange>,
        profiles: Arc<dyn ProfileSource>,
        catalog: Arc<dyn CatalogSource>,
    ) -> Self {
        let cache = CacheManager::new(&config.cache);
        let controller = AuthController::new(
            tokens.clone(),
            Arc::new(cache.clone()),
            exchange,
            &config.auth,
        );

        Self {
            config,
            tokens,
            cache,
            controller,
            profiles,
            catalog,
            epoch: IdentityEpoch::default(),
        }
    }

    /// Loaded configuration.
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// The auth controller.
    pub fn controller(&self) -> &AuthController {
        &self.controller
    }

    /// The query cache.
    pub fn cache(&self) -> &CacheManager {
        &self.cache
    }

    /// Logs in and starts a new identity generation.
    ///
    /// Responses cached under a previous identity are purged, so switching
    /// accounts without a logout never serves the old user's data.
    pub async fn login(&self, credentials: &Credentials) -> AppResult<()> {
        self.controller.login(credentials).await?;
        self.epoch.advance();
        self.cache.invalidate_all();
        Ok(())
    }

    /// Logs out. In-flight fetches started before this call will not
    /// populate the cache.
    pub fn logout(&self) -> AppResult<()> {
        self.epoch.advance();
        self.controller.logout()
    }

    /// Profile of the logged-in user, or `None` when anonymous.
    pub async fn current_user(&self) -> AppResult<Option<UserProfile>> {
        if !self.controller.is_logged() {
            return Ok(None);
        }

        let token = self.token()?;
        let profile = cached(&self.cache, &self.epoch, keys::current_user(), || async {
            self.profiles.fetch_profile(&token).await
        })
        .await;

        self.report(profile).map(Some)
    }

    /// Downloadable materials of `group`, fetched through the listing that
    /// matches the profile's role.
    pub async fn group_materials(
        &self,
        profile: &UserProfile,
        group: CourseId,
    ) -> AppResult<Vec<ContentDescriptor>> {
        let token = self.token()?;
        let query = catalog_query(profile, group);
        let materials = cached(&self.cache, &self.epoch, keys::materials(&query), || async {
            self.catalog.fetch_catalog(&token, &query).await
        })
        .await;

        self.report(materials)
    }

    /// Recomputes the capabilities from the current profile and the youth
    /// group catalog.
    ///
    /// Anonymous sessions get no capabilities and trigger no requests. A
    /// failed catalog fetch only denies the youth section.
    pub async fn capabilities(&self) -> AppResult<Capabilities> {
        let youth = CourseId(self.config.auth.youth_course);

        let Some(profile) = self.current_user().await? else {
            return Ok(Capabilities::default());
        };
        let catalog = self
            .group_materials(&profile, youth)
            .await
            .unwrap_or_default();

        Ok(Capabilities::derive(Some(&profile), &catalog, youth))
    }

    fn token(&self) -> AppResult<Token> {
        self.tokens
            .get()?
            .ok_or_else(|| AppError::authentication("No stored token"))
    }

    /// Raises the session error flag when the server refuses our token.
    fn report<T>(&self, result: AppResult<T>) -> AppResult<T> {
        if let Err(e) = &result {
            if e.kind == ErrorKind::Authentication {
                warn!(error = %e, "Authenticated request refused");
                self.controller.set_error(true);
            } else {
                info!(error = %e, "Authenticated request failed");
            }
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use async_trait::async_trait;
    use chorus_core::error::AuthError;
    use chorus_core::traits::QueryCache;
    use chorus_core::types::{CatalogEndpoint, CatalogQuery, TokenGrant, UserStatus};
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// In-process portal with a fixed profile and catalog.
    struct FakePortal {
        status: UserStatus,
        youth_materials: Vec<ContentDescriptor>,
        profile_calls: AtomicUsize,
        refuse_profile: bool,
        catalog_down: bool,
    }

    impl FakePortal {
        fn new(status: UserStatus, youth_materials: Vec<ContentDescriptor>) -> Self {
            Self {
                status,
                youth_materials,
                profile_calls: AtomicUsize::new(0),
                refuse_profile: false,
                catalog_down: false,
            }
        }
    }

    #[async_trait]
    impl CredentialExchange for FakePortal {
        async fn exchange(&self, credentials: &Credentials) -> Result<TokenGrant, AuthError> {
            if credentials.secret == "b" {
                Ok(TokenGrant {
                    access: Token::new("T1"),
                    refresh: None,
                })
            } else {
                Err(AuthError::Rejected("bad credentials".into()))
            }
        }
    }

    #[async_trait]
    impl ProfileSource for FakePortal {
        async fn fetch_profile(&self, _token: &Token) -> AppResult<UserProfile> {
            self.profile_calls.fetch_add(1, Ordering::SeqCst);
            if self.refuse_profile {
                return Err(AppError::authentication("token expired"));
            }
            Ok(UserProfile::new(self.status, "Vera"))
        }
    }

    #[async_trait]
    impl CatalogSource for FakePortal {
        async fn fetch_catalog(
            &self,
            _token: &Token,
            query: &CatalogQuery,
        ) -> AppResult<Vec<ContentDescriptor>> {
            assert_eq!(
                query.endpoint == CatalogEndpoint::Staff,
                self.status.is_restricted()
            );
            if self.catalog_down {
                return Err(AppError::external_service("503"));
            }
            Ok(self.youth_materials.clone())
        }
    }

    fn context(portal: FakePortal) -> (SessionContext, Arc<FakePortal>) {
        let portal = Arc::new(portal);
        let ctx = SessionContext::from_parts(
            AppConfig::default(),
            Arc::new(MemoryTokenStore::new()),
            portal.clone(),
            portal.clone(),
            portal.clone(),
        );
        (ctx, portal)
    }

    #[tokio::test]
    async fn test_anonymous_has_no_capabilities() {
        let (ctx, portal) = context(FakePortal::new(UserStatus::Standard, vec![]));
        assert_eq!(ctx.capabilities().await.unwrap(), Capabilities::default());
        assert_eq!(portal.profile_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_standard_user_sees_youth_section() {
        let (ctx, _) = context(FakePortal::new(
            UserStatus::Standard,
            vec![ContentDescriptor::new(6, true)],
        ));
        ctx.login(&Credentials::new("a", "b")).await.unwrap();

        let caps = ctx.capabilities().await.unwrap();
        assert!(caps.youth_section);
        assert!(!caps.personal_statistics);
    }

    #[tokio::test]
    async fn test_restricted_user_uses_staff_listing_and_is_denied() {
        let (ctx, _) = context(FakePortal::new(
            UserStatus::Restricted,
            vec![ContentDescriptor::new(6, true)],
        ));
        ctx.login(&Credentials::new("a", "b")).await.unwrap();

        assert!(!ctx.capabilities().await.unwrap().youth_section);
    }

    #[tokio::test]
    async fn test_profile_is_cached_until_logout() {
        let (ctx, portal) = context(FakePortal::new(UserStatus::Privileged, vec![]));
        ctx.login(&Credentials::new("a", "b")).await.unwrap();

        ctx.current_user().await.unwrap();
        ctx.current_user().await.unwrap();
        assert_eq!(portal.profile_calls.load(Ordering::SeqCst), 1);

        ctx.capabilities().await.unwrap();
        assert_eq!(ctx.cache().entry_count(), 2);

        ctx.logout().unwrap();
        assert_eq!(ctx.cache().entry_count(), 0);
        assert_eq!(ctx.current_user().await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_refused_token_raises_error_flag() {
        let mut portal = FakePortal::new(UserStatus::Standard, vec![]);
        portal.refuse_profile = true;
        let (ctx, _) = context(portal);
        ctx.login(&Credentials::new("a", "b")).await.unwrap();
        assert!(!ctx.controller().session().error);

        let err = ctx.current_user().await.unwrap_err();

        assert_eq!(err.kind, ErrorKind::Authentication);
        assert!(ctx.controller().session().error);
        assert_eq!(ctx.cache().entry_count(), 0);
    }

    #[tokio::test]
    async fn test_catalog_outage_only_denies_youth_section() {
        let mut portal = FakePortal::new(UserStatus::Privileged, vec![]);
        portal.catalog_down = true;
        let (ctx, _) = context(portal);
        ctx.login(&Credentials::new("a", "b")).await.unwrap();

        let caps = ctx.capabilities().await.unwrap();

        assert!(caps.profile && caps.choir_statistics && caps.penalties);
        assert!(caps.personal_statistics);
        assert!(!caps.youth_section);
        assert!(!ctx.controller().session().error);
        assert_eq!(ctx.cache().entry_count(), 1);
    }

    #[tokio::test]
    async fn test_relogin_purges_previous_identity() {
        let (ctx, portal) = context(FakePortal::new(UserStatus::Standard, vec![]));
        ctx.login(&Credentials::new("a", "b")).await.unwrap();
        ctx.current_user().await.unwrap();
        assert_eq!(ctx.cache().entry_count(), 1);

        ctx.login(&Credentials::new("c", "b")).await.unwrap();

        assert_eq!(ctx.cache().entry_count(), 0);
        ctx.current_user().await.unwrap();
        assert_eq!(portal.profile_calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_rejected_login_maps_to_authentication_kind() {
        let (ctx, _) = context(FakePortal::new(UserStatus::Standard, vec![]));
        let err = ctx
            .login(&Credentials::new("a", "wrong"))
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Authentication);
        assert!(!ctx.controller().is_logged());
    }
}
