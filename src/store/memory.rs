use async_trait::async_trait;
use tracing::debug;

use super::{AwsCredentialsEntry, CredentialScope, CredentialStore, ScopeContext};

/// Credential store backed by a fixed in-memory list.
///
/// Suitable for hosts whose AWS identities come from static configuration,
/// and for tests. System-scoped entries are only visible to system-level
/// lookup contexts.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCredentialStore {
    entries: Vec<AwsCredentialsEntry>,
}

impl InMemoryCredentialStore {
    pub fn new(entries: Vec<AwsCredentialsEntry>) -> Self {
        Self { entries }
    }
}

#[async_trait]
impl CredentialStore for InMemoryCredentialStore {
    async fn list(&self, ctx: &ScopeContext) -> Vec<AwsCredentialsEntry> {
        let visible: Vec<AwsCredentialsEntry> = self
            .entries
            .iter()
            .filter(|entry| ctx.system || entry.scope == CredentialScope::Global)
            .cloned()
            .collect();
        debug!(
            total = self.entries.len(),
            visible = visible.len(),
            system = ctx.system,
            "listed in-memory AWS credentials"
        );
        visible
    }
}
