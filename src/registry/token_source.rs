use base64::Engine;
use tracing::debug;

use super::credential::RegistryCredential;
use crate::error::CredentialError;

/// Placeholder identity required by legacy registry-token formats.
pub const TOKEN_IDENTITY: &str = "nobody@example.com";

/// Token shapes a [`RegistryCredential`] can be converted into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum TokenKind {
    /// `docker login`-compatible token: identity plus base64
    /// `user:password` secret.
    DockerRegistry,
}

/// Registry login token handed to the consuming build/pipeline layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistryToken {
    /// Email-style identity field of the legacy registry token format.
    pub identity: String,
    /// Base64 `user:password` pair.
    pub secret: String,
}

/// Convert a registry credential into the consumer's token shape.
///
/// Resolves the credential's password (one fresh ECR round trip) and
/// packages it. Failures from the resolution propagate unchanged.
pub async fn to_registry_token(
    credential: &RegistryCredential,
    kind: TokenKind,
) -> Result<RegistryToken, CredentialError> {
    match kind {
        TokenKind::DockerRegistry => {
            debug!(credential = %credential.id(), "converting credential to Docker registry token");
            let password = credential.password().await?;
            let secret = base64::engine::general_purpose::STANDARD
                .encode(format!("{}:{}", credential.username(), password));
            Ok(RegistryToken {
                identity: TOKEN_IDENTITY.to_string(),
                secret,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use async_trait::async_trait;
    use base64::Engine;

    use super::*;
    use crate::proxy::ProxyConfig;
    use crate::registry::catalog::CredentialCatalog;
    use crate::store::{
        AwsCredentialsEntry, CredentialScope, CredentialStore, InMemoryCredentialStore,
        ScopeContext,
    };
    use crate::token::{AuthorizationToken, TokenFetcher};

    struct StubFetcher {
        token: Option<String>,
    }

    #[async_trait]
    impl TokenFetcher for StubFetcher {
        async fn fetch_token(
            &self,
            _identity: &AwsCredentialsEntry,
            _region: &str,
            _proxy: Option<&ProxyConfig>,
        ) -> Result<AuthorizationToken, CredentialError> {
            match &self.token {
                Some(token) => Ok(AuthorizationToken {
                    authorization_token: token.clone(),
                    proxy_endpoint: None,
                    expires_at: None,
                }),
                None => Err(CredentialError::NoTokenReturned),
            }
        }
    }

    async fn first_credential(fetcher: StubFetcher) -> RegistryCredential {
        let store: Arc<dyn CredentialStore> =
            Arc::new(InMemoryCredentialStore::new(vec![AwsCredentialsEntry {
                id: "aws-creds".to_string(),
                scope: CredentialScope::Global,
                description: "team credentials".to_string(),
                access_key_id: "AKIAEXAMPLE".to_string(),
                secret_access_key: "wJalrXUtnFEMI".to_string(),
                session_token: None,
            }]));
        let catalog =
            CredentialCatalog::new(store, Arc::new(fetcher)).with_regions(["us-east-1"]);
        catalog
            .list(&ScopeContext::system())
            .await
            .into_iter()
            .next()
            .expect("catalog lists at least one credential")
    }

    #[tokio::test]
    async fn test_token_packages_username_and_password() {
        let raw = base64::engine::general_purpose::STANDARD.encode("AWS:secret123");
        let credential = first_credential(StubFetcher { token: Some(raw) }).await;

        let token = to_registry_token(&credential, TokenKind::DockerRegistry)
            .await
            .unwrap();

        assert_eq!(token.identity, "nobody@example.com");
        let decoded = base64::engine::general_purpose::STANDARD
            .decode(token.secret)
            .unwrap();
        assert_eq!(String::from_utf8(decoded).unwrap(), "AWS:secret123");
    }

    #[tokio::test]
    async fn test_fetch_failure_propagates() {
        let credential = first_credential(StubFetcher { token: None }).await;

        assert!(matches!(
            to_registry_token(&credential, TokenKind::DockerRegistry).await,
            Err(CredentialError::NoTokenReturned)
        ));
    }
}
