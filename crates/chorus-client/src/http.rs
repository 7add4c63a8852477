//! Portal API client.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use serde::de::DeserializeOwned;
use tracing::debug;

use chorus_core::config::ApiConfig;
use chorus_core::error::{AppError, AuthError, ErrorKind};
use chorus_core::result::AppResult;
use chorus_core::traits::{CatalogSource, CredentialExchange, ProfileSource};
use chorus_core::types::{
    CatalogEndpoint, CatalogQuery, ContentDescriptor, Credentials, Token, TokenGrant, UserProfile,
};

use crate::dto::{ErrorBody, MaterialListing, TokenRequest};

// Endpoint paths are relative to the base URL, which always ends with `/`,
// so a base such as `https://host/portal` keeps its prefix.

/// Token obtain endpoint.
pub const TOKEN_PATH: &str = "api/v1/token/";
/// Current-user profile endpoint.
pub const PROFILE_PATH: &str = "api/v1/client/user/";
/// Staff material listing.
pub const STAFF_MATERIALS_PATH: &str = "api/v1/material/";
/// Client material listing.
pub const CLIENT_MATERIALS_PATH: &str = "api/v1/client/material/";

/// HTTP client for the portal API.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    base_url: Url,
}

impl ApiClient {
    /// Builds a client from configuration.
    pub fn new(config: &ApiConfig) -> AppResult<Self> {
        let base = format!("{}/", config.base_url.trim_end_matches('/'));
        let base_url = Url::parse(&base).map_err(|e| {
            AppError::configuration(format!("Invalid API base URL '{}': {e}", config.base_url))
        })?;

        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| {
                AppError::with_source(
                    ErrorKind::Configuration,
                    format!("Failed to build HTTP client: {e}"),
                    e,
                )
            })?;

        Ok(Self { http, base_url })
    }

    fn url(&self, path: &str) -> AppResult<Url> {
        self.base_url
            .join(path)
            .map_err(|e| AppError::internal(format!("Invalid endpoint path '{path}': {e}")))
    }

    /// GETs `url` with the bearer token and decodes the JSON body.
    async fn get_json<T: DeserializeOwned>(&self, url: Url, token: &Token) -> AppResult<T> {
        debug!(%url, "GET");
        let response = self
            .http
            .get(url.clone())
            .bearer_auth(token.as_str())
            .send()
            .await
            .map_err(|e| {
                AppError::with_source(
                    ErrorKind::ExternalService,
                    format!("Request to {url} failed: {e}"),
                    e,
                )
            })?;

        let status = response.status();
        let body = response.bytes().await.map_err(|e| {
            AppError::with_source(
                ErrorKind::ExternalService,
                format!("Failed to read response from {url}: {e}"),
                e,
            )
        })?;

        match status {
            s if s.is_success() => Ok(serde_json::from_slice(&body)?),
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Err(AppError::authentication(
                format!("{url} refused the token: {}", detail(&body, status)),
            )),
            StatusCode::NOT_FOUND => Err(AppError::not_found(format!("{url} not found"))),
            _ => Err(AppError::external_service(format!(
                "{url} answered {status}: {}",
                detail(&body, status)
            ))),
        }
    }
}

/// Extracts the portal's `detail` message, falling back to the status text.
fn detail(body: &[u8], status: StatusCode) -> String {
    serde_json::from_slice::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.detail)
        .unwrap_or_else(|| status.to_string())
}

#[async_trait]
impl CredentialExchange for ApiClient {
    async fn exchange(&self, credentials: &Credentials) -> Result<TokenGrant, AuthError> {
        let url = self
            .url(TOKEN_PATH)
            .map_err(|e| AuthError::Network(e.message))?;

        let response = self
            .http
            .post(url)
            .json(&TokenRequest::from(credentials))
            .send()
            .await
            .map_err(|e| AuthError::Network(e.to_string()))?;

        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|e| AuthError::Network(e.to_string()))?;

        match status {
            s if s.is_success() => serde_json::from_slice::<TokenGrant>(&body)
                .map_err(|e| AuthError::MalformedResponse(e.to_string())),
            StatusCode::BAD_REQUEST | StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                Err(AuthError::Rejected(detail(&body, status)))
            }
            _ => Err(AuthError::Network(format!(
                "token endpoint answered {status}"
            ))),
        }
    }
}

#[async_trait]
impl ProfileSource for ApiClient {
    async fn fetch_profile(&self, token: &Token) -> AppResult<UserProfile> {
        self.get_json(self.url(PROFILE_PATH)?, token).await
    }
}

#[async_trait]
impl CatalogSource for ApiClient {
    async fn fetch_catalog(
        &self,
        token: &Token,
        query: &CatalogQuery,
    ) -> AppResult<Vec<ContentDescriptor>> {
        let path = match query.endpoint {
            CatalogEndpoint::Staff => STAFF_MATERIALS_PATH,
            CatalogEndpoint::Client => CLIENT_MATERIALS_PATH,
        };

        let mut url = self.url(path)?;
        url.query_pairs_mut().extend_pairs(query.params());

        let listing: MaterialListing = self.get_json(url, token).await?;
        Ok(listing.into_descriptors())
    }
}
