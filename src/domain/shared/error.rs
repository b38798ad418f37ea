//! Domain errors

use thiserror::Error;

/// Domain result type
pub type Result<T> = std::result::Result<T, DomainError>;

#[derive(Error, Debug, Clone)]
pub enum DomainError {
    #[error("Call {0} not found")]
    CallNotFound(String),

    #[error("Provider request to {endpoint} failed: {message}")]
    ProviderRequest { endpoint: String, message: String },

    #[error("Classification failed: {0}")]
    Classification(String),

    #[error("Webhook delivery to {url} failed: {message}")]
    WebhookDelivery { url: String, message: String },

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid state transition: {0}")]
    InvalidStateTransition(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl DomainError {
    /// Whether the request layer should answer with a 400-class response.
    pub fn is_bad_request(&self) -> bool {
        matches!(
            self,
            DomainError::CallNotFound(_)
                | DomainError::Validation(_)
                | DomainError::InvalidStateTransition(_)
        )
    }
}
