//! Telephony gateway interface

use crate::domain::shared::result::Result;
use crate::domain::shared::value_objects::{CallId, ProviderCallId};
use async_trait::async_trait;

/// Outbound call placement request
///
/// `client_state` carries the internal call id so provider callbacks can
/// be correlated without a registry hit.
#[derive(Debug, Clone)]
pub struct PlaceCallRequest {
    pub to: String,
    pub client_state: CallId,
}

/// Thin request wrapper over the telephony provider
///
/// Each method is a single request/response round trip with no retry and
/// no local state; failures surface as `DomainError::ProviderRequest` and
/// the orchestrator decides whether to propagate or suppress.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TelephonyGateway: Send + Sync {
    /// Place an outbound call, returning the provider's call handle
    async fn place_call(&self, request: PlaceCallRequest) -> Result<ProviderCallId>;

    /// Send touch-tone digits into a live call
    async fn send_dtmf(&self, provider_call_id: &ProviderCallId, digits: &str) -> Result<()>;

    /// Speak text into a live call
    async fn speak(&self, provider_call_id: &ProviderCallId, text: &str) -> Result<()>;

    /// Hang up a live call
    async fn hangup(&self, provider_call_id: &ProviderCallId) -> Result<()>;
}
