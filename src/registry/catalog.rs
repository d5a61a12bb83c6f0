use std::sync::Arc;

use tracing::debug;

use super::credential::{RegionBinding, RegistryCredential};
use crate::proxy::ProxyConfig;
use crate::regions;
use crate::settings::Settings;
use crate::store::{AwsCredentialsEntry, CredentialStore, ScopeContext};
use crate::token::TokenFetcher;

/// Derives registry credentials from the AWS identities in a credential
/// store.
///
/// For every visible identity the catalog synthesizes one default-region
/// credential plus one credential per region in its table, so a consumer
/// can address any region by id without re-querying. Listing is a pure
/// enumeration: no network I/O happens until `password()` is called on a
/// selected credential. Listing may run on every credential-binding
/// resolution, so it has to stay cheap.
pub struct CredentialCatalog {
    store: Arc<dyn CredentialStore>,
    fetcher: Arc<dyn TokenFetcher>,
    default_region: String,
    regions: Vec<String>,
    proxy: Option<ProxyConfig>,
}

impl CredentialCatalog {
    /// Catalog over the built-in region table with the standard default
    /// region.
    pub fn new(store: Arc<dyn CredentialStore>, fetcher: Arc<dyn TokenFetcher>) -> Self {
        Self {
            store,
            fetcher,
            default_region: regions::DEFAULT_REGION.to_string(),
            regions: regions::all().iter().map(|r| r.to_string()).collect(),
            proxy: None,
        }
    }

    /// Catalog configured from a loaded [`Settings`].
    pub fn from_settings(
        settings: &Settings,
        store: Arc<dyn CredentialStore>,
        fetcher: Arc<dyn TokenFetcher>,
    ) -> Self {
        let mut catalog = Self::new(store, fetcher)
            .with_default_region(settings.default_region.clone());
        if let Some(regions) = &settings.regions {
            catalog = catalog.with_regions(regions.clone());
        }
        if let Some(proxy) = &settings.proxy {
            catalog = catalog.with_proxy(proxy.clone());
        }
        catalog
    }

    pub fn with_default_region(mut self, region: impl Into<String>) -> Self {
        self.default_region = region.into();
        self
    }

    /// Replace the region table. Unknown ids are kept; they fail at fetch
    /// time inside the AWS layer.
    pub fn with_regions<I, S>(mut self, regions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.regions = regions.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_proxy(mut self, proxy: ProxyConfig) -> Self {
        self.proxy = Some(proxy);
        self
    }

    pub fn default_region(&self) -> &str {
        &self.default_region
    }

    pub fn regions(&self) -> &[String] {
        &self.regions
    }

    /// Enumerate the registry credentials visible in `ctx`.
    ///
    /// One store query, zero network calls. Empty when the store has no
    /// visible AWS identities.
    pub async fn list(&self, ctx: &ScopeContext) -> Vec<RegistryCredential> {
        let entries = self.store.list(ctx).await;
        let mut derived = Vec::with_capacity(entries.len() * (self.regions.len() + 1));

        for entry in &entries {
            debug!(
                id = %entry.id,
                scope = ?entry.scope,
                "deriving registry credentials for AWS identity"
            );
            derived.push(self.credential_for(entry, &self.default_region, RegionBinding::Default, ctx));
            for region in &self.regions {
                derived.push(self.credential_for(entry, region, RegionBinding::Explicit, ctx));
            }
        }

        derived
    }

    fn credential_for(
        &self,
        entry: &AwsCredentialsEntry,
        region: &str,
        binding: RegionBinding,
        ctx: &ScopeContext,
    ) -> RegistryCredential {
        RegistryCredential::new(
            entry.id.clone(),
            region.to_string(),
            entry.description.clone(),
            binding,
            ctx.clone(),
            self.store.clone(),
            self.fetcher.clone(),
            self.proxy.clone(),
        )
    }
}
