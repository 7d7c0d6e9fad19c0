// Provider Error Types

use syncribullet_media_providers::ProviderClientError;

/// Errors a list provider can report to the catalog pipeline
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    /// Credentials were sent and rejected
    #[error("Authentication failure: {0}")]
    AuthenticationFailure(String),

    #[error("Upstream unavailable: {0}")]
    UpstreamUnavailable(String),

    /// Unknown object type or status, or the upstream answered 404
    #[error("Not found: {0}")]
    NotFound(String),
}

pub type Result<T> = std::result::Result<T, ProviderError>;

impl From<ProviderClientError> for ProviderError {
    fn from(error: ProviderClientError) -> Self {
        match error {
            ProviderClientError::Auth(msg) => Self::AuthenticationFailure(msg),
            ProviderClientError::NotFound(msg) => Self::NotFound(msg),
            ProviderClientError::InvalidHeader(msg) => {
                Self::AuthenticationFailure(format!("unusable credential: {msg}"))
            }
            other => Self::UpstreamUnavailable(other.to_string()),
        }
    }
}
