use std::sync::Arc;

use base64::Engine;
use tracing::{debug, warn};

use crate::error::CredentialError;
use crate::proxy::ProxyConfig;
use crate::store::{CredentialStore, ScopeContext};
use crate::token::TokenFetcher;

/// Username every ECR login token pairs with.
pub const ECR_USERNAME: &str = "AWS";

/// How a credential's id names its region.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum RegionBinding {
    /// Addressable per region: id is `ecr:<region>:<credentials_id>`.
    Explicit,
    /// The catalog's default-region variant, keeping the legacy id shape
    /// `ecr:<credentials_id>` so it stays distinguishable from the
    /// explicit entry for the same region.
    Default,
}

/// A named, region-scoped registry credential.
///
/// Immutable once constructed, and cheap to construct: the catalog creates
/// these on every listing. The expensive part, one `GetAuthorizationToken`
/// round trip, happens only in [`password`](Self::password), freshly on
/// every call. ECR tokens expire, so a cached token could fail docker
/// logins hours later.
#[derive(Clone)]
pub struct RegistryCredential {
    credentials_id: String,
    region: String,
    description: String,
    binding: RegionBinding,
    lookup: ScopeContext,
    store: Arc<dyn CredentialStore>,
    fetcher: Arc<dyn TokenFetcher>,
    proxy: Option<ProxyConfig>,
}

impl RegistryCredential {
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn new(
        credentials_id: String,
        region: String,
        description: String,
        binding: RegionBinding,
        lookup: ScopeContext,
        store: Arc<dyn CredentialStore>,
        fetcher: Arc<dyn TokenFetcher>,
        proxy: Option<ProxyConfig>,
    ) -> Self {
        Self {
            credentials_id,
            region,
            description,
            binding,
            lookup,
            store,
            fetcher,
            proxy,
        }
    }

    /// Composite identifier a consumer selects this credential by.
    pub fn id(&self) -> String {
        match self.binding {
            RegionBinding::Explicit => format!("ecr:{}:{}", self.region, self.credentials_id),
            RegionBinding::Default => format!("ecr:{}", self.credentials_id),
        }
    }

    /// Id of the AWS credentials entry this credential is backed by.
    pub fn credentials_id(&self) -> &str {
        &self.credentials_id
    }

    pub fn region(&self) -> &str {
        &self.region
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// Registry login username. Constant for ECR, independent of region
    /// and identity.
    pub fn username(&self) -> &'static str {
        ECR_USERNAME
    }

    /// Resolve the short-lived registry password.
    ///
    /// Looks the backing AWS identity up in the credential store, performs
    /// one token fetch and decodes the returned `AWS:<password>` pair.
    /// Every call is a fresh network round trip.
    pub async fn password(&self) -> Result<String, CredentialError> {
        let entry = self
            .store
            .find(&self.credentials_id, &self.lookup)
            .await
            .ok_or_else(|| CredentialError::CredentialNotFound(self.credentials_id.clone()))?;

        debug!(credential = %self.id(), region = %self.region, "resolving registry password");

        let token = self
            .fetcher
            .fetch_token(&entry, &self.region, self.proxy.as_ref())
            .await?;

        if let Some(expires_at) = token.expires_at {
            debug!(credential = %self.id(), %expires_at, "received ECR authorization token");
        }

        decode_password(&token.authorization_token)
    }
}

/// Decode a base64 `user:password` authorization token and return the
/// password segment.
fn decode_password(token: &str) -> Result<String, CredentialError> {
    let decoded = base64::engine::general_purpose::STANDARD
        .decode(token)
        .map_err(|_| CredentialError::MalformedToken("not valid base64".to_string()))?;

    let decoded = String::from_utf8(decoded)
        .map_err(|_| CredentialError::MalformedToken("not valid UTF-8".to_string()))?;

    let (user, password) = decoded
        .split_once(':')
        .ok_or_else(|| CredentialError::MalformedToken("missing `:` separator".to_string()))?;

    if password.is_empty() {
        return Err(CredentialError::MalformedToken(
            "empty password segment".to_string(),
        ));
    }

    if user != ECR_USERNAME {
        warn!(user, "ECR token username differs from expected literal");
    }

    Ok(password.to_string())
}

// Two credentials with the same id are interchangeable.
impl PartialEq for RegistryCredential {
    fn eq(&self, other: &Self) -> bool {
        self.id() == other.id()
    }
}

impl Eq for RegistryCredential {}

impl std::hash::Hash for RegistryCredential {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.id().hash(state);
    }
}

impl std::fmt::Debug for RegistryCredential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegistryCredential")
            .field("id", &self.id())
            .field("description", &self.description)
            .finish()
    }
}
