//! Call lifecycle orchestrator
//!
//! Drives the state machine over [`CallStatus`]: creates calls, interprets
//! classified IVR turns, hands off to staff when a live person is
//! detected, and finalizes calls with duration accounting and webhook
//! notification. Collaborator failures are logged and re-raised unchanged;
//! nothing here retries.

use crate::domain::call::aggregate::CallRecord;
use crate::domain::call::classifier::IvrClassifier;
use crate::domain::call::directive::Directive;
use crate::domain::call::gateway::{PlaceCallRequest, TelephonyGateway};
use crate::domain::call::notifier::{CallNotifier, HumanDetectedPayload};
use crate::domain::call::repository::CallRegistry;
use crate::domain::call::value_object::CallStatus;
use crate::domain::shared::error::DomainError;
use crate::domain::shared::result::Result;
use crate::domain::shared::value_objects::{CallId, ProviderCallId};
use crate::infrastructure::logging::FanoutLogger;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;

const SERVICE: &str = "CallService";

/// Start-call request as the orchestrator sees it
#[derive(Debug, Clone)]
pub struct InitiateCallRequest {
    pub office_id: String,
    pub patient_ref: String,
    pub insurance_phone_number: String,
    pub insurance_name: Option<String>,
}

/// The call lifecycle orchestrator
///
/// All mutating operations on one call are serialized through a per-call
/// mutex held for the operation's full duration, including the blocking
/// round trips to collaborators. Distinct calls proceed independently.
pub struct CallOrchestrator {
    registry: Arc<dyn CallRegistry>,
    gateway: Arc<dyn TelephonyGateway>,
    classifier: Arc<dyn IvrClassifier>,
    notifier: Arc<dyn CallNotifier>,
    logger: FanoutLogger,
    locks: Mutex<HashMap<CallId, Arc<Mutex<()>>>>,
}

impl CallOrchestrator {
    pub fn new(
        registry: Arc<dyn CallRegistry>,
        gateway: Arc<dyn TelephonyGateway>,
        classifier: Arc<dyn IvrClassifier>,
        notifier: Arc<dyn CallNotifier>,
        logger: FanoutLogger,
    ) -> Self {
        Self {
            registry,
            gateway,
            classifier,
            notifier,
            logger,
            locks: Mutex::new(HashMap::new()),
        }
    }

    /// Create a pending record, place the outbound call, and record the
    /// provider's handle. On placement failure the record is deleted and
    /// the error re-raised verbatim: the call never existed.
    pub async fn initiate_call(&self, request: InitiateCallRequest) -> Result<CallId> {
        let record = CallRecord::new(
            request.office_id,
            request.patient_ref,
            request.insurance_phone_number.clone(),
            request.insurance_name,
        );
        let call_id = record.call_id.clone();

        self.registry.create(record).await?;
        self.logger
            .info(
                SERVICE,
                &format!(
                    "Initiating call {} to {}",
                    call_id, request.insurance_phone_number
                ),
            )
            .await;

        let lock = self.call_lock(&call_id).await;
        let _guard = lock.lock().await;

        let placement = self
            .gateway
            .place_call(PlaceCallRequest {
                to: request.insurance_phone_number,
                client_state: call_id.clone(),
            })
            .await;

        match placement {
            Ok(provider_call_id) => {
                // The record still exists locally at this point; looked up
                // by internal id, not provider id.
                if let Some(mut record) = self.registry.get(&call_id).await {
                    record.assign_provider_call_id(provider_call_id)?;
                    self.registry.put(record).await?;
                }
                Ok(call_id)
            }
            Err(e) => {
                self.logger
                    .error(SERVICE, &format!("Failed to initiate call {}", call_id))
                    .await;
                self.registry.delete(&call_id).await;
                drop(_guard);
                self.remove_lock(&call_id).await;
                Err(e)
            }
        }
    }

    /// Process one IVR turn: classify the heard text, append it to the
    /// transcript, then act on the directive. The transcript entry is
    /// persisted before the branch runs, so partial progress survives a
    /// branch failure.
    pub async fn handle_ivr_response(&self, call_id: &CallId, heard: &str) -> Result<()> {
        let lock = self.call_lock(call_id).await;
        let _guard = lock.lock().await;

        let mut record = self
            .registry
            .get(call_id)
            .await
            .ok_or_else(|| DomainError::CallNotFound(call_id.to_string()))?;

        let action = match self.classifier.classify(heard).await {
            Ok(action) => action,
            Err(e) => {
                self.logger
                    .error(
                        SERVICE,
                        &format!("Error processing IVR response for call {}: {}", call_id, e),
                    )
                    .await;
                return Err(e);
            }
        };

        record.append_transcript(heard.to_string(), action.clone());
        self.registry.put(record.clone()).await?;

        match Directive::parse(&action) {
            Directive::HumanDetected => self.handle_human_detected(record).await,
            Directive::PressDigits(digits) => {
                let provider_call_id = Self::require_provider_call_id(&record)?;
                self.gateway.send_dtmf(&provider_call_id, &digits).await
            }
            Directive::Speak(text) => {
                let provider_call_id = Self::require_provider_call_id(&record)?;
                self.gateway.speak(&provider_call_id, &text).await
            }
            // The classifier is not guaranteed to return an actionable
            // directive; silence is the correct response.
            Directive::Unrecognized => Ok(()),
        }
    }

    /// Finalize a call: best-effort provider hang-up, duration accounting,
    /// completed webhook, then deletion. A hang-up or webhook failure
    /// aborts before deletion, leaving the record live and finalizable
    /// again (at-most-once-ish, see DESIGN.md).
    pub async fn end_call(
        &self,
        call_id: &CallId,
        status: CallStatus,
        notes: Option<String>,
    ) -> Result<()> {
        if !status.is_terminal() {
            return Err(DomainError::Validation(format!(
                "{} is not a valid end status",
                status
            )));
        }

        let lock = self.call_lock(call_id).await;
        let _guard = lock.lock().await;

        let mut record = self
            .registry
            .get(call_id)
            .await
            .ok_or_else(|| DomainError::CallNotFound(call_id.to_string()))?;

        if let Some(provider_call_id) = &record.provider_call_id {
            if let Err(e) = self.gateway.hangup(provider_call_id).await {
                self.logger
                    .error(SERVICE, &format!("Error ending call {}: {}", call_id, e))
                    .await;
                return Err(e);
            }
        }

        record.finalize(status, notes)?;

        if let Err(e) = self.notifier.call_completed(&record).await {
            self.logger
                .error(SERVICE, &format!("Error ending call {}: {}", call_id, e))
                .await;
            return Err(e);
        }

        self.registry.delete(call_id).await;
        drop(_guard);
        self.remove_lock(call_id).await;

        self.logger
            .info(
                SERVICE,
                &format!("Call {} ended with status {}", call_id, status),
            )
            .await;
        Ok(())
    }

    /// Reverse lookup from the provider's call handle; never fails
    pub async fn call_id_for_provider_id(
        &self,
        provider_call_id: &ProviderCallId,
    ) -> Option<CallId> {
        self.registry.find_by_provider_call_id(provider_call_id).await
    }

    /// Number of live calls, for the health endpoint
    pub async fn active_call_count(&self) -> usize {
        self.registry.active_count().await
    }

    async fn handle_human_detected(&self, mut record: CallRecord) -> Result<()> {
        // A human heard before the provider acknowledged placement is an
        // inconsistent turn; reject rather than queue (DESIGN.md).
        if record.provider_call_id.is_none() {
            return Err(DomainError::Validation(format!(
                "Call {} has no provider call id yet",
                record.call_id
            )));
        }

        let payload = HumanDetectedPayload::new(
            record.call_id.clone(),
            record.office_id.clone(),
            record.patient_ref.clone(),
        );

        if let Err(e) = self.notifier.human_detected(&payload).await {
            self.logger
                .error(
                    SERVICE,
                    &format!(
                        "Error sending human detected webhook for call {}: {}",
                        record.call_id, e
                    ),
                )
                .await;
            return Err(e);
        }

        record.transition_to(CallStatus::WaitingForStaff)?;
        self.registry.put(record.clone()).await?;

        self.logger
            .info(
                SERVICE,
                &format!("Human detected for call {}, webhook sent", record.call_id),
            )
            .await;
        Ok(())
    }

    fn require_provider_call_id(record: &CallRecord) -> Result<ProviderCallId> {
        record.provider_call_id.clone().ok_or_else(|| {
            DomainError::CallNotFound(format!(
                "{} not found or missing provider id",
                record.call_id
            ))
        })
    }

    async fn call_lock(&self, call_id: &CallId) -> Arc<Mutex<()>> {
        let mut locks = self.locks.lock().await;
        locks
            .entry(call_id.clone())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }

    async fn remove_lock(&self, call_id: &CallId) {
        self.locks.lock().await.remove(call_id);
    }
}
