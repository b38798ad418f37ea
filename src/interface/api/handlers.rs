//! Call webhook API handlers

use super::dto::{
    EndCallRequest, HealthResponse, IvrTurnRequest, ProviderEventEnvelope, StartCallRequest,
    StartCallResponse, StatusResponse,
};
use crate::application::orchestrator::{CallOrchestrator, InitiateCallRequest};
use crate::domain::call::value_object::CallStatus;
use crate::domain::shared::error::DomainError;
use crate::domain::shared::value_objects::{CallId, ProviderCallId};
use crate::infrastructure::logging::FanoutLogger;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use std::sync::Arc;

const SERVICE: &str = "WebhookController";

/// Shared handler state
#[derive(Clone)]
pub struct AppState {
    pub orchestrator: Arc<CallOrchestrator>,
    pub logger: FanoutLogger,
}

/// Domain error wrapped for HTTP mapping
///
/// Recognized validation failures map to 400; everything else is a
/// generic 500 so upstream details never leak to callers.
#[derive(Debug)]
pub struct ApiError(DomainError);

impl From<DomainError> for ApiError {
    fn from(e: DomainError) -> Self {
        Self(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = if self.0.is_bad_request() {
            (StatusCode::BAD_REQUEST, self.0.to_string())
        } else {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error".to_string(),
            )
        };

        (
            status,
            Json(super::dto::ErrorResponse { error: message }),
        )
            .into_response()
    }
}

/// POST /call/start
pub async fn start_call(
    State(state): State<AppState>,
    Json(request): Json<StartCallRequest>,
) -> Result<Json<StartCallResponse>, ApiError> {
    if request.patient_ref.trim().is_empty() {
        return Err(DomainError::Validation("patient_ref must not be empty".to_string()).into());
    }
    if request.insurance_phone_number.trim().is_empty() {
        return Err(DomainError::Validation(
            "insurance_phone_number must not be empty".to_string(),
        )
        .into());
    }

    let call_id = state
        .orchestrator
        .initiate_call(InitiateCallRequest {
            office_id: request.office_id,
            patient_ref: request.patient_ref,
            insurance_phone_number: request.insurance_phone_number,
            insurance_name: request.insurance_name,
        })
        .await?;

    Ok(Json(StartCallResponse { call_id }))
}

/// POST /call/ivr
pub async fn handle_ivr_turn(
    State(state): State<AppState>,
    Json(request): Json<IvrTurnRequest>,
) -> Result<Json<StatusResponse>, ApiError> {
    let call_id = CallId::from_string(request.call_id);

    if let Err(e) = state
        .orchestrator
        .handle_ivr_response(&call_id, &request.audio_data)
        .await
    {
        state
            .logger
            .error(SERVICE, &format!("Error handling IVR response: {}", e))
            .await;
        return Err(e.into());
    }

    Ok(Json(StatusResponse::success()))
}

/// POST /call/end
pub async fn end_call(
    State(state): State<AppState>,
    Json(request): Json<EndCallRequest>,
) -> Result<Json<StatusResponse>, ApiError> {
    let status = parse_end_status(&request.status)?;

    state
        .orchestrator
        .end_call(
            &CallId::from_string(request.call_id),
            status,
            request.notes,
        )
        .await?;

    Ok(Json(StatusResponse::success()))
}

/// POST /call/events, the provider event callback
pub async fn handle_provider_event(
    State(state): State<AppState>,
    Json(envelope): Json<ProviderEventEnvelope>,
) -> Result<Json<StatusResponse>, ApiError> {
    let event = envelope.data;
    state
        .logger
        .info(SERVICE, &format!("Received Telnyx event: {}", event.event_type))
        .await;

    let payload = event.payload.unwrap_or_default();

    match event.event_type.as_str() {
        "call.transcription.received" => {
            let call_control_id = payload.call_control_id.ok_or_else(|| {
                DomainError::Validation("missing call_control_id".to_string())
            })?;

            let call_id = state
                .orchestrator
                .call_id_for_provider_id(&ProviderCallId::new(call_control_id))
                .await
                .ok_or_else(|| DomainError::CallNotFound("unknown provider call id".to_string()))?;

            if let Some(text) = payload.transcription.and_then(|t| t.text) {
                if let Err(e) = state.orchestrator.handle_ivr_response(&call_id, &text).await {
                    state
                        .logger
                        .error(SERVICE, &format!("Transcription handler failed: {}", e))
                        .await;
                    return Err(e.into());
                }
            }
        }
        "call.hangup" | "call.ended" => {
            // client_state round-trips the internal call id through the provider
            if let Some(client_state) = payload.client_state {
                state
                    .orchestrator
                    .end_call(
                        &CallId::from_string(client_state),
                        CallStatus::Completed,
                        None,
                    )
                    .await?;
            }
        }
        other => {
            state
                .logger
                .warn(SERVICE, &format!("Invalid event type: {}", other))
                .await;
        }
    }

    Ok(Json(StatusResponse::received()))
}

/// GET /health
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        active_calls: state.orchestrator.active_call_count().await,
    })
}

/// Map the wire status string onto the closed enum, rejecting anything
/// outside it before the orchestrator sees the request.
fn parse_end_status(raw: &str) -> Result<CallStatus, ApiError> {
    let status: CallStatus = serde_json::from_value(serde_json::Value::String(raw.to_string()))
        .map_err(|_| DomainError::Validation("Invalid status value".to_string()))?;

    if !status.is_terminal() {
        return Err(DomainError::Validation("Invalid status value".to_string()).into());
    }

    Ok(status)
}
