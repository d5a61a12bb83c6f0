use thiserror::Error;

/// Underlying SDK or transport error, preserved for diagnostics.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors surfaced while resolving an ECR registry credential.
///
/// Every variant is fatal to the single password resolution that produced
/// it. Catalog listing never returns these: listing and fetching are
/// decoupled, so a broken identity only fails at use.
#[derive(Debug, Error)]
pub enum CredentialError {
    /// The referenced AWS credentials id has no matching entry in the
    /// credential store. Token fetching is never attempted in this case.
    #[error("no AWS credentials with id `{0}` found in the credential store")]
    CredentialNotFound(String),

    /// The ECR API call failed (network, authentication, throttling,
    /// unknown region). Retry policy is the SDK's own; this layer does not
    /// retry on top of it.
    #[error("ECR authorization token request failed")]
    Service(#[source] BoxError),

    /// The API call succeeded but returned no authorization data. Treated
    /// as a hard failure, never as an empty credential.
    #[error("ECR returned no authorization data")]
    NoTokenReturned,

    /// The returned token did not decode to the expected `AWS:<password>`
    /// shape. Indicates an API contract violation.
    #[error("malformed ECR authorization token: {0}")]
    MalformedToken(String),

    /// The supplied proxy configuration could not be applied to the HTTP
    /// transport.
    #[error("invalid proxy configuration: {0}")]
    InvalidProxy(String),
}

impl CredentialError {
    /// Wrap an SDK error, keeping it as the source for diagnostics.
    pub fn service(err: impl Into<BoxError>) -> Self {
        Self::Service(err.into())
    }
}
