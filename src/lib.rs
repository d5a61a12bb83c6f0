//! On-demand AWS ECR login tokens exposed as short-lived Docker registry
//! credentials.
//!
//! The host application owns credential storage and UI; this crate owns token
//! issuance. [`CredentialCatalog`] derives one [`RegistryCredential`] per
//! (AWS identity × region) from an injected [`CredentialStore`]. Listing is a
//! pure enumeration; the network round trip to ECR happens only when a
//! selected credential's `password()` is resolved, and every resolution
//! fetches a fresh token (ECR tokens expire, so nothing is cached).

pub mod error;
pub mod proxy;
pub mod regions;
pub mod registry;
pub mod settings;
pub mod store;
pub mod token;

pub use error::CredentialError;
pub use proxy::ProxyConfig;
pub use registry::{
    to_registry_token, CredentialCatalog, RegistryCredential, RegistryToken, TokenKind,
};
pub use settings::Settings;
pub use store::{AwsCredentialsEntry, CredentialScope, CredentialStore, ScopeContext};
pub use token::{AuthorizationToken, EcrTokenFetcher, TokenFetcher};
