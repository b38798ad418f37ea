//! HTTP webhook notifier

use crate::config::WebhookConfig;
use crate::domain::call::aggregate::CallRecord;
use crate::domain::call::notifier::{CallNotifier, HumanDetectedPayload};
use crate::domain::shared::error::DomainError;
use crate::domain::shared::result::Result;
use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;

/// POSTs lifecycle notifications to the configured webhook URLs.
/// Deliveries are awaited to completion or failure but never retried.
pub struct HttpCallNotifier {
    config: WebhookConfig,
    client: Client,
}

impl HttpCallNotifier {
    pub fn new(config: WebhookConfig) -> Self {
        Self {
            config,
            client: Client::new(),
        }
    }

    async fn post<T: Serialize + ?Sized>(&self, url: &str, payload: &T) -> Result<()> {
        let response = self
            .client
            .post(url)
            .json(payload)
            .send()
            .await
            .map_err(|e| DomainError::WebhookDelivery {
                url: url.to_string(),
                message: e.to_string(),
            })?;

        if !response.status().is_success() {
            return Err(DomainError::WebhookDelivery {
                url: url.to_string(),
                message: response.status().to_string(),
            });
        }

        Ok(())
    }
}

#[async_trait]
impl CallNotifier for HttpCallNotifier {
    async fn human_detected(&self, payload: &HumanDetectedPayload) -> Result<()> {
        self.post(&self.config.human_detected_url, payload).await
    }

    async fn call_completed(&self, record: &CallRecord) -> Result<()> {
        self.post(&self.config.call_completed_url, record).await
    }
}
