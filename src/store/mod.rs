//! Credential store seam.
//!
//! The store holding long-lived AWS access credentials belongs to the host
//! application. This crate only consumes it through [`CredentialStore`],
//! injected at catalog construction, so nothing here reaches for global
//! host state and everything is testable with a fake store.

pub mod memory;

use async_trait::async_trait;
use serde::Deserialize;

pub use memory::InMemoryCredentialStore;

/// Visibility class of a stored credential, as defined by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CredentialScope {
    /// Visible to every lookup context.
    Global,
    /// Visible only to system-level lookups.
    System,
}

/// Long-lived AWS access credentials owned by the host's credential store.
///
/// Borrowed for the duration of one token request; never persisted here.
#[derive(Clone, Deserialize)]
pub struct AwsCredentialsEntry {
    pub id: String,
    pub scope: CredentialScope,
    #[serde(default)]
    pub description: String,
    pub access_key_id: String,
    pub secret_access_key: String,
    #[serde(default)]
    pub session_token: Option<String>,
}

// Keep the secret key and session token out of logs.
impl std::fmt::Debug for AwsCredentialsEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AwsCredentialsEntry")
            .field("id", &self.id)
            .field("scope", &self.scope)
            .field("description", &self.description)
            .field("access_key_id", &self.access_key_id)
            .field("secret_access_key", &"<redacted>")
            .field("session_token", &self.session_token.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

/// Identifies who is performing a credential lookup.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScopeContext {
    /// Lookup runs with system-level access.
    pub system: bool,
    /// Logical item the lookup is scoped to, if any (a job, a folder,
    /// whatever the host's access-control model names).
    pub item: Option<String>,
}

impl ScopeContext {
    /// A system-level lookup context (sees every scope).
    pub fn system() -> Self {
        Self {
            system: true,
            item: None,
        }
    }

    /// A lookup scoped to a named item.
    pub fn item(name: impl Into<String>) -> Self {
        Self {
            system: false,
            item: Some(name.into()),
        }
    }
}

/// External credential store consumed by the catalog.
///
/// Implementations must be safe to call concurrently; this crate only reads.
/// Access-control policy and encryption-at-rest are the store's concern.
#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// All AWS credential entries visible in `ctx`.
    async fn list(&self, ctx: &ScopeContext) -> Vec<AwsCredentialsEntry>;

    /// The entry with the given id, if visible in `ctx`.
    async fn find(&self, id: &str, ctx: &ScopeContext) -> Option<AwsCredentialsEntry> {
        self.list(ctx).await.into_iter().find(|entry| entry.id == id)
    }
}
