//! Gemini IVR classifier

use crate::config::GeminiConfig;
use crate::domain::call::classifier::IvrClassifier;
use crate::domain::shared::error::DomainError;
use crate::domain::shared::result::Result;
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;

/// Classifies heard IVR audio transcripts through the Gemini
/// `generateContent` endpoint and returns the raw model text.
pub struct GeminiClassifier {
    config: GeminiConfig,
    client: Client,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Content,
}

#[derive(Debug, Deserialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
struct Part {
    text: String,
}

impl GeminiClassifier {
    pub fn new(config: GeminiConfig) -> Self {
        Self {
            config,
            client: Client::new(),
        }
    }

    fn generate_url(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.config.api_url, self.config.model
        )
    }
}

#[async_trait]
impl IvrClassifier for GeminiClassifier {
    async fn classify(&self, heard: &str) -> Result<String> {
        let prompt = format!(
            "Analyze this IVR response and determine the next action: {}",
            heard
        );
        let body = json!({
            "contents": [{ "parts": [{ "text": prompt }] }]
        });

        let response = self
            .client
            .post(self.generate_url())
            .query(&[("key", self.config.api_key.as_str())])
            .json(&body)
            .send()
            .await
            .map_err(|e| DomainError::Classification(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(DomainError::Classification(format!("{}: {}", status, body)));
        }

        let parsed: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| DomainError::Classification(format!("malformed response: {}", e)))?;

        parsed
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content.parts.into_iter().next())
            .map(|p| p.text)
            .ok_or_else(|| DomainError::Classification("empty model response".to_string()))
    }
}
