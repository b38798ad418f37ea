//! IVR classification interface

use crate::domain::shared::result::Result;
use async_trait::async_trait;

/// Converts a heard IVR utterance into a textual directive
///
/// The output is free-form model text and is not guaranteed to contain a
/// recognized action verb; translating it into an action is
/// [`Directive::parse`](crate::domain::call::directive::Directive)'s job.
/// Fails with `DomainError::Classification` on transport or model failure.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait IvrClassifier: Send + Sync {
    async fn classify(&self, heard: &str) -> Result<String>;
}
