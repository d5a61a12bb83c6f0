//! ECR authorization token fetching.

pub mod fetcher;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::error::CredentialError;
use crate::proxy::ProxyConfig;
use crate::store::AwsCredentialsEntry;

pub use fetcher::EcrTokenFetcher;

/// Raw result of one `GetAuthorizationToken` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthorizationToken {
    /// Base64 string decoding to `AWS:<password>`.
    pub authorization_token: String,
    /// Registry endpoint the token is valid for, as reported by ECR.
    pub proxy_endpoint: Option<String>,
    /// Token expiry as reported by ECR (~12h out). Carried for logging
    /// only: every password resolution fetches a fresh token, so expiry is
    /// never used to serve a cached one.
    pub expires_at: Option<DateTime<Utc>>,
}

/// Issues one ECR bearer token for a given AWS identity and region.
///
/// Implementations must be safe to call concurrently. The bundled
/// [`EcrTokenFetcher`] builds a fresh client per call and holds nothing
/// between calls; an implementation that pools connections must itself be
/// thread-safe, since one fetcher instance is shared across every
/// credential the catalog derives.
#[async_trait]
pub trait TokenFetcher: Send + Sync {
    /// Perform exactly one authorization-token request against `region`,
    /// authenticated with `identity`, routed through `proxy` when present.
    async fn fetch_token(
        &self,
        identity: &AwsCredentialsEntry,
        region: &str,
        proxy: Option<&ProxyConfig>,
    ) -> Result<AuthorizationToken, CredentialError>;
}
