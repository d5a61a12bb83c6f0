// Proxy configuration for the HTTP transport behind the ECR client.
//
// The host environment supplies these values; this crate only threads them
// into the AWS SDK's HTTP client when a token is fetched.

use aws_sdk_ecr::config::SharedHttpClient;
use aws_smithy_http_client::proxy::ProxyConfig as HttpProxyConfig;
use aws_smithy_http_client::{tls, Builder, Connector};
use serde::Deserialize;

use crate::error::CredentialError;

/// Outbound HTTP proxy settings applied to the ECR API call.
///
/// Host and port are always set together. Username and password are
/// optional; no-proxy host patterns are passed through to the transport
/// verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ProxyConfig {
    pub host: String,
    pub port: u16,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
    /// Hosts that bypass the proxy (NO_PROXY-style patterns).
    #[serde(default)]
    pub no_proxy_hosts: Vec<String>,
}

impl ProxyConfig {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
            username: None,
            password: None,
            no_proxy_hosts: Vec::new(),
        }
    }

    pub fn with_basic_auth(mut self, username: impl Into<String>, password: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self.password = Some(password.into());
        self
    }

    pub fn with_no_proxy_hosts<I, S>(mut self, hosts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.no_proxy_hosts = hosts.into_iter().map(Into::into).collect();
        self
    }

    /// Proxy endpoint in URI form, e.g. `http://proxy.example.com:3128`.
    pub fn proxy_uri(&self) -> String {
        format!("http://{}:{}", self.host, self.port)
    }

    /// Build an HTTP client that routes the ECR call through this proxy.
    /// The client is scoped to one SDK config and dropped with it.
    pub(crate) fn http_client(&self) -> Result<SharedHttpClient, CredentialError> {
        let mut proxy = HttpProxyConfig::https(self.proxy_uri())
            .map_err(|e| CredentialError::InvalidProxy(e.to_string()))?;
        if let (Some(username), Some(password)) = (&self.username, &self.password) {
            proxy = proxy.with_basic_auth(username, password);
        }
        if !self.no_proxy_hosts.is_empty() {
            proxy = proxy.no_proxy(self.no_proxy_hosts.join(","));
        }
        Ok(Builder::new().build_with_connector_fn(move |_settings, _components| {
            Connector::builder()
                .proxy_config(proxy.clone())
                .tls_provider(tls::Provider::Rustls(tls::rustls_provider::CryptoMode::AwsLc))
                .build()
        }))
    }
}
