//! Call record aggregate root

use crate::domain::call::value_object::{CallStatus, TranscriptEntry};
use crate::domain::shared::error::DomainError;
use crate::domain::shared::result::Result;
use crate::domain::shared::value_objects::{CallId, ProviderCallId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Call record aggregate root
///
/// Owned by the registry, mutated only through the orchestrator. Tracks a
/// single outbound call from creation until a terminal status deletes it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CallRecord {
    pub call_id: CallId,
    /// Set once the provider acknowledges placement, never changed after
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provider_call_id: Option<ProviderCallId>,
    pub office_id: String,
    pub patient_ref: String,
    pub insurance_phone_number: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub insurance_name: Option<String>,
    pub status: CallStatus,
    pub timestamp_start: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp_end: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_seconds: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub ivr_transcript: Vec<TranscriptEntry>,
}

impl CallRecord {
    /// Create a new pending record
    pub fn new(
        office_id: String,
        patient_ref: String,
        insurance_phone_number: String,
        insurance_name: Option<String>,
    ) -> Self {
        Self {
            call_id: CallId::new(),
            provider_call_id: None,
            office_id,
            patient_ref,
            insurance_phone_number,
            insurance_name,
            status: CallStatus::Pending,
            timestamp_start: Utc::now(),
            timestamp_end: None,
            duration_seconds: None,
            notes: None,
            ivr_transcript: Vec::new(),
        }
    }

    /// Record the provider's call handle after placement is acknowledged
    pub fn assign_provider_call_id(&mut self, provider_call_id: ProviderCallId) -> Result<()> {
        if self.provider_call_id.is_some() {
            return Err(DomainError::InvalidStateTransition(format!(
                "Call {} already has a provider call id",
                self.call_id
            )));
        }
        self.provider_call_id = Some(provider_call_id);
        Ok(())
    }

    /// Append one processed IVR turn to the transcript
    pub fn append_transcript(&mut self, heard: String, bot_action: String) {
        self.ivr_transcript.push(TranscriptEntry {
            timestamp: Utc::now(),
            heard,
            bot_action,
        });
    }

    /// Transition to a new status
    pub fn transition_to(&mut self, new_status: CallStatus) -> Result<()> {
        if !self.status.can_transition_to(&new_status) {
            return Err(DomainError::InvalidStateTransition(format!(
                "Cannot transition from {} to {}",
                self.status, new_status
            )));
        }
        self.status = new_status;
        Ok(())
    }

    /// Finalize the record with a terminal status and duration accounting
    ///
    /// `duration_seconds` is the second-floor difference between start and
    /// end; the clock is monotonically non-decreasing so it is never
    /// negative.
    pub fn finalize(&mut self, status: CallStatus, notes: Option<String>) -> Result<()> {
        if !status.is_terminal() {
            return Err(DomainError::Validation(format!(
                "{} is not a terminal status",
                status
            )));
        }
        self.transition_to(status)?;

        let ended_at = Utc::now();
        self.timestamp_end = Some(ended_at);
        self.duration_seconds = Some((ended_at - self.timestamp_start).num_seconds());
        self.notes = notes;
        Ok(())
    }

    pub fn is_finalized(&self) -> bool {
        self.status.is_terminal()
    }
}
