use std::time::Duration;

use async_trait::async_trait;
use aws_config::retry::RetryConfig;
use aws_config::timeout::TimeoutConfig;
use aws_config::BehaviorVersion;
use aws_sdk_ecr::Client as EcrClient;
use chrono::DateTime;
use tracing::{debug, warn};

use super::{AuthorizationToken, TokenFetcher};
use crate::error::CredentialError;
use crate::proxy::ProxyConfig;
use crate::store::AwsCredentialsEntry;

/// Extract a clean error message from an AWS SDK error's Debug output.
///
/// SDK errors have verbose Debug output; the meaningful part is the
/// `message: Some("...")` field when present.
fn format_sdk_error<E: std::fmt::Debug>(err: &E) -> String {
    let debug_str = format!("{:?}", err);

    if let Some(start) = debug_str.find("message: Some(\"") {
        let start = start + 15;
        if let Some(end) = debug_str[start..].find("\")") {
            return debug_str[start..start + end].to_string();
        }
    }

    if debug_str.len() > 200 {
        format!("{}...", &debug_str[..200])
    } else {
        debug_str
    }
}

/// [`TokenFetcher`] backed by the AWS SDK.
///
/// Builds a region-scoped `aws_sdk_ecr::Client` per call and drops it when
/// the call returns, so no connections are held between token requests.
/// Transient-fault handling is the SDK's standard retry policy; this layer
/// never retries on top of it.
#[derive(Debug, Clone, Default)]
pub struct EcrTokenFetcher {
    operation_timeout: Option<Duration>,
}

impl EcrTokenFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bound the whole token-fetch operation, retries included. Without
    /// this the SDK's defaults apply.
    pub fn with_operation_timeout(mut self, timeout: Duration) -> Self {
        self.operation_timeout = Some(timeout);
        self
    }

    /// Fetcher configured from loaded [`Settings`].
    pub fn from_settings(settings: &crate::settings::Settings) -> Self {
        match settings.operation_timeout_secs {
            Some(secs) => Self::new().with_operation_timeout(Duration::from_secs(secs)),
            None => Self::new(),
        }
    }
}

#[async_trait]
impl TokenFetcher for EcrTokenFetcher {
    async fn fetch_token(
        &self,
        identity: &AwsCredentialsEntry,
        region: &str,
        proxy: Option<&ProxyConfig>,
    ) -> Result<AuthorizationToken, CredentialError> {
        let credentials = aws_sdk_ecr::config::Credentials::new(
            &identity.access_key_id,
            &identity.secret_access_key,
            identity.session_token.clone(),
            None,
            "credential-store",
        );

        let mut loader = aws_config::defaults(BehaviorVersion::latest())
            .credentials_provider(credentials)
            .region(aws_config::Region::new(region.to_string()))
            .retry_config(RetryConfig::standard());

        if let Some(timeout) = self.operation_timeout {
            loader = loader.timeout_config(
                TimeoutConfig::builder()
                    .operation_timeout(timeout)
                    .build(),
            );
        }

        if let Some(proxy) = proxy {
            debug!(proxy = %proxy.proxy_uri(), "routing ECR request through proxy");
            loader = loader.http_client(proxy.http_client()?);
        }

        let aws_config = loader.load().await;
        let client = EcrClient::new(&aws_config);

        debug!(identity = %identity.id, region, "requesting ECR authorization token");

        let response = client.get_authorization_token().send().await.map_err(|e| {
            warn!(
                identity = %identity.id,
                region,
                error = %format_sdk_error(&e),
                "ECR authorization token request failed"
            );
            CredentialError::service(e)
        })?;

        let auth_data = response
            .authorization_data()
            .first()
            .ok_or(CredentialError::NoTokenReturned)?;

        let token = auth_data
            .authorization_token()
            .ok_or(CredentialError::NoTokenReturned)?;

        let expires_at = auth_data
            .expires_at()
            .and_then(|ts| DateTime::from_timestamp(ts.secs(), ts.subsec_nanos()));

        Ok(AuthorizationToken {
            authorization_token: token.to_string(),
            proxy_endpoint: auth_data.proxy_endpoint().map(String::from),
            expires_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FakeSdkError;

    impl std::fmt::Debug for FakeSdkError {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            write!(
                f,
                "ServiceError {{ err: Unhandled {{ message: Some(\"User is not authorized\") }} }}"
            )
        }
    }

    #[test]
    fn test_format_sdk_error_extracts_message() {
        assert_eq!(format_sdk_error(&FakeSdkError), "User is not authorized");
    }

    #[test]
    fn test_format_sdk_error_truncates_long_output() {
        let err = "x".repeat(500);
        let formatted = format_sdk_error(&err);
        assert!(formatted.len() < 250);
        assert!(formatted.ends_with("..."));
    }

    #[test]
    fn test_operation_timeout_is_stored() {
        let fetcher = EcrTokenFetcher::new().with_operation_timeout(Duration::from_secs(30));
        assert_eq!(fetcher.operation_timeout, Some(Duration::from_secs(30)));
    }

    #[test]
    fn test_from_settings_maps_timeout() {
        let settings = crate::settings::Settings {
            operation_timeout_secs: Some(15),
            ..Default::default()
        };
        let fetcher = EcrTokenFetcher::from_settings(&settings);
        assert_eq!(fetcher.operation_timeout, Some(Duration::from_secs(15)));

        let fetcher = EcrTokenFetcher::from_settings(&crate::settings::Settings::default());
        assert_eq!(fetcher.operation_timeout, None);
    }
}
