//! Outbound webhook notification interface

use crate::domain::call::aggregate::CallRecord;
use crate::domain::shared::result::Result;
use crate::domain::shared::value_objects::CallId;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Payload posted when a live person is detected on the line
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HumanDetectedPayload {
    pub call_id: CallId,
    pub timestamp: DateTime<Utc>,
    pub office_id: String,
    pub patient_ref: String,
    /// Dial-in link staff can use to join the held call
    pub join_link: String,
    pub notes: String,
}

impl HumanDetectedPayload {
    pub fn new(call_id: CallId, office_id: String, patient_ref: String) -> Self {
        let join_link = format!("tel:{},,{}#", office_id, call_id);
        Self {
            call_id,
            timestamp: Utc::now(),
            office_id,
            patient_ref,
            join_link,
            notes: "Live person detected, ready to transfer".to_string(),
        }
    }
}

/// Posts lifecycle notifications to the configured external webhooks
///
/// Deliveries are awaited but never retried; failures surface as
/// `DomainError::WebhookDelivery` (at-most-once semantics).
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CallNotifier: Send + Sync {
    /// Notify that a live person is on the line and staff should join
    async fn human_detected(&self, payload: &HumanDetectedPayload) -> Result<()>;

    /// Post the full finalized record
    async fn call_completed(&self, record: &CallRecord) -> Result<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_join_link_embeds_office_and_call_id() {
        let call_id = CallId::new();
        let payload = HumanDetectedPayload::new(
            call_id.clone(),
            "o1".to_string(),
            "p1".to_string(),
        );

        assert_eq!(payload.join_link, format!("tel:o1,,{}#", call_id));
        assert!(payload.join_link.contains(call_id.as_str()));
    }
}
