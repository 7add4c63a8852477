//! Contracts of the portal endpoints the session layer talks to.

use async_trait::async_trait;

use crate::error::AuthError;
use crate::result::AppResult;
use crate::types::{CatalogQuery, ContentDescriptor, Credentials, Token, TokenGrant, UserProfile};

/// Exchanges credentials for an access token.
#[async_trait]
pub trait CredentialExchange: Send + Sync + 'static {
    /// Submits `credentials` to the authority.
    async fn exchange(&self, credentials: &Credentials) -> Result<TokenGrant, AuthError>;
}

/// Fetches the current user's profile.
#[async_trait]
pub trait ProfileSource: Send + Sync + 'static {
    /// Fetches the profile of the user owning `token`.
    async fn fetch_profile(&self, token: &Token) -> AppResult<UserProfile>;
}

/// Fetches content descriptors.
#[async_trait]
pub trait CatalogSource: Send + Sync + 'static {
    /// Runs a role-specific catalog query.
    async fn fetch_catalog(
        &self,
        token: &Token,
        query: &CatalogQuery,
    ) -> AppResult<Vec<ContentDescriptor>>;
}
