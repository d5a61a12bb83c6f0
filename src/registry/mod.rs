//! Per-region registry credentials derived from stored AWS identities.

pub mod catalog;
pub mod credential;
pub mod token_source;

pub use catalog::CredentialCatalog;
pub use credential::{RegistryCredential, ECR_USERNAME};
pub use token_source::{to_registry_token, RegistryToken, TokenKind, TOKEN_IDENTITY};
