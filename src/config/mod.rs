//! Configuration management
//!
//! All knobs come from environment variables (a `.env` file is honored in
//! development). Required variables are validated up front so a
//! misconfigured process fails at startup, not on the first call.

use serde::{Deserialize, Serialize};
use std::env;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub telnyx: TelnyxConfig,
    pub gemini: GeminiConfig,
    pub webhooks: WebhookConfig,
    /// Public base URL of this service, used for provider callbacks
    pub base_url: String,
    /// Ceiling on how long staff keep the human-detected hold window open
    pub max_wait_for_staff_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TelnyxConfig {
    pub api_url: String,
    pub api_key: String,
    pub connection_id: String,
    pub from_number: String,
    /// Provider-enforced answer timeout
    pub answer_timeout_secs: u64,
    /// Provider-enforced hard ceiling on call duration
    pub max_call_duration_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeminiConfig {
    pub api_url: String,
    pub api_key: String,
    pub model: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebhookConfig {
    pub human_detected_url: String,
    pub call_completed_url: String,
}

fn required(name: &str) -> anyhow::Result<String> {
    env::var(name).map_err(|_| anyhow::anyhow!("Missing required environment variable: {}", name))
}

fn numeric(name: &str, default: u64) -> u64 {
    env::var(name)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

impl Config {
    /// Load and validate configuration from the environment
    pub fn from_env() -> anyhow::Result<Self> {
        Ok(Self {
            server: ServerConfig {
                host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
                port: numeric("PORT", 3000) as u16,
            },
            telnyx: TelnyxConfig {
                api_url: env::var("TELNYX_API_URL")
                    .unwrap_or_else(|_| "https://api.telnyx.com/v2".to_string()),
                api_key: required("TELNYX_API_KEY")?,
                connection_id: required("TELNYX_CONNECTION_ID")?,
                from_number: env::var("TELNYX_FROM_NUMBER")
                    .unwrap_or_else(|_| "+18885551234".to_string()),
                answer_timeout_secs: numeric("ANSWER_TIMEOUT_SECS", 30),
                max_call_duration_secs: numeric("MAX_CALL_DURATION", 3600),
            },
            gemini: GeminiConfig {
                api_url: env::var("GEMINI_API_URL")
                    .unwrap_or_else(|_| "https://generativelanguage.googleapis.com".to_string()),
                api_key: required("GEMINI_API_KEY")?,
                model: env::var("GEMINI_MODEL").unwrap_or_else(|_| "gemini-pro".to_string()),
            },
            webhooks: WebhookConfig {
                human_detected_url: required("HUMAN_DETECTED_WEBHOOK_URL")?,
                call_completed_url: required("CALL_COMPLETED_WEBHOOK_URL")?,
            },
            base_url: required("BASE_URL")?,
            max_wait_for_staff_secs: numeric("MAX_WAIT_FOR_STAFF", 300),
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 3000,
            },
            telnyx: TelnyxConfig {
                api_url: "https://api.telnyx.com/v2".to_string(),
                api_key: String::new(),
                connection_id: String::new(),
                from_number: "+18885551234".to_string(),
                answer_timeout_secs: 30,
                max_call_duration_secs: 3600,
            },
            gemini: GeminiConfig {
                api_url: "https://generativelanguage.googleapis.com".to_string(),
                api_key: String::new(),
                model: "gemini-pro".to_string(),
            },
            webhooks: WebhookConfig {
                human_detected_url: String::new(),
                call_completed_url: String::new(),
            },
            base_url: "http://localhost:3000".to_string(),
            max_wait_for_staff_secs: 300,
        }
    }
}
