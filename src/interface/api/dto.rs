//! API DTOs

use crate::domain::shared::value_objects::CallId;
use serde::{Deserialize, Serialize};

/// Start-call request body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StartCallRequest {
    #[serde(default)]
    pub office_id: String,
    pub patient_ref: String,
    pub insurance_phone_number: String,
    #[serde(default)]
    pub insurance_name: Option<String>,
}

/// Start-call response body
#[derive(Debug, Serialize, Deserialize)]
pub struct StartCallResponse {
    pub call_id: CallId,
}

/// IVR turn request body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IvrTurnRequest {
    pub call_id: String,
    pub audio_data: String,
}

/// End-call request body
///
/// `status` stays a raw string here so an out-of-enum value maps to a
/// 400-class validation error instead of a deserialization rejection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EndCallRequest {
    pub call_id: String,
    pub status: String,
    #[serde(default)]
    pub notes: Option<String>,
}

/// Provider event callback envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderEventEnvelope {
    pub data: ProviderEvent,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderEvent {
    pub event_type: String,
    #[serde(default)]
    pub payload: Option<ProviderEventPayload>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProviderEventPayload {
    #[serde(default)]
    pub call_control_id: Option<String>,
    #[serde(default)]
    pub transcription: Option<TranscriptionPayload>,
    #[serde(default)]
    pub client_state: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranscriptionPayload {
    #[serde(default)]
    pub text: Option<String>,
}

/// Generic acknowledgement body
#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub status: &'static str,
}

impl StatusResponse {
    pub fn success() -> Self {
        Self { status: "success" }
    }

    pub fn received() -> Self {
        Self { status: "received" }
    }
}

/// Error body returned by the exception mapping
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub active_calls: usize,
}
