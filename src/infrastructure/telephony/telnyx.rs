//! Telnyx call-control gateway

use crate::config::TelnyxConfig;
use crate::domain::call::gateway::{PlaceCallRequest, TelephonyGateway};
use crate::domain::shared::error::DomainError;
use crate::domain::shared::result::Result;
use crate::domain::shared::value_objects::ProviderCallId;
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;
use tracing::info;

/// HTTP client for the Telnyx v2 call-control API
///
/// One request/response round trip per operation; no retries, no local
/// state. Callback URLs point back at this service so provider events can
/// be routed to the orchestrator.
pub struct TelnyxGateway {
    config: TelnyxConfig,
    /// Public base URL of this service, used for webhook and audio URLs
    base_url: String,
    client: Client,
}

#[derive(Debug, Deserialize)]
struct TelnyxCallResponse {
    data: TelnyxCallData,
}

#[derive(Debug, Deserialize)]
struct TelnyxCallData {
    call_control_id: String,
}

impl TelnyxGateway {
    pub fn new(config: TelnyxConfig, base_url: String) -> Self {
        Self {
            config,
            base_url,
            client: Client::new(),
        }
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.config.api_url, path)
    }

    /// Audio played to the callee while the IVR is navigated
    fn greeting_url(&self) -> String {
        format!("{}/audio/greeting.mp3", self.base_url)
    }

    async fn post(&self, path: &str, body: serde_json::Value) -> Result<reqwest::Response> {
        let url = self.endpoint(path);
        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.config.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| DomainError::ProviderRequest {
                endpoint: path.to_string(),
                message: e.to_string(),
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(DomainError::ProviderRequest {
                endpoint: path.to_string(),
                message: format!("{}: {}", status, body),
            });
        }

        Ok(response)
    }
}

#[async_trait]
impl TelephonyGateway for TelnyxGateway {
    async fn place_call(&self, request: PlaceCallRequest) -> Result<ProviderCallId> {
        let body = json!({
            "connection_id": self.config.connection_id,
            "to": request.to,
            "from": self.config.from_number,
            "webhook_url": format!("{}/call/events", self.base_url),
            "webhook_url_method": "POST",
            "client_state": request.client_state,
            "audio_url": self.greeting_url(),
            "timeout_secs": self.config.answer_timeout_secs,
            "time_limit_secs": self.config.max_call_duration_secs,
            "answering_machine_detection": "premium",
            "media_encryption": "SRTP",
            "sip_headers": [
                { "name": "User-to-User", "value": request.client_state }
            ],
            "sip_transport_protocol": "UDP",
            "stream_track": "both_tracks",
            "send_silence_when_idle": true,
            "record_channels": "dual",
            "record_format": "mp3",
            "record_trim": "trim-silence",
            "transcription_config": {
                "enabled": true,
                "language": "en"
            }
        });

        let response = self.post("/calls", body).await?;
        let parsed: TelnyxCallResponse =
            response
                .json()
                .await
                .map_err(|e| DomainError::ProviderRequest {
                    endpoint: "/calls".to_string(),
                    message: format!("malformed response: {}", e),
                })?;

        info!("Telnyx call initiated: {}", parsed.data.call_control_id);
        Ok(ProviderCallId::new(parsed.data.call_control_id))
    }

    async fn send_dtmf(&self, provider_call_id: &ProviderCallId, digits: &str) -> Result<()> {
        self.post(
            &format!("/calls/{}/actions/dtmf", provider_call_id),
            json!({ "digits": digits }),
        )
        .await?;
        info!("Sent DTMF {} for call {}", digits, provider_call_id);
        Ok(())
    }

    async fn speak(&self, provider_call_id: &ProviderCallId, text: &str) -> Result<()> {
        self.post(
            &format!("/calls/{}/actions/speak", provider_call_id),
            json!({
                "payload": text,
                "payload_type": "text",
                "service_level": "premium",
                "voice": "female",
                "language": "en"
            }),
        )
        .await?;
        info!("Spoke text for call {}", provider_call_id);
        Ok(())
    }

    async fn hangup(&self, provider_call_id: &ProviderCallId) -> Result<()> {
        self.post(
            &format!("/calls/{}/actions/hangup", provider_call_id),
            json!({}),
        )
        .await?;
        Ok(())
    }
}
