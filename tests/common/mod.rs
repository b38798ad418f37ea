//! Shared test doubles for the orchestrator's collaborators

#![allow(dead_code)]

use async_trait::async_trait;
use ivrpilot::application::CallOrchestrator;
use ivrpilot::domain::call::aggregate::CallRecord;
use ivrpilot::domain::call::classifier::IvrClassifier;
use ivrpilot::domain::call::gateway::{PlaceCallRequest, TelephonyGateway};
use ivrpilot::domain::call::notifier::{CallNotifier, HumanDetectedPayload};
use ivrpilot::domain::shared::error::DomainError;
use ivrpilot::domain::shared::result::Result;
use ivrpilot::domain::shared::value_objects::ProviderCallId;
use ivrpilot::infrastructure::logging::FanoutLogger;
use ivrpilot::infrastructure::persistence::InMemoryCallRegistry;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

/// Gateway double that records every provider interaction
#[derive(Default)]
pub struct StubGateway {
    pub fail_placement: AtomicBool,
    pub fail_hangup: AtomicBool,
    pub placed: Mutex<Vec<PlaceCallRequest>>,
    pub dtmf_sent: Mutex<Vec<(String, String)>>,
    pub spoken: Mutex<Vec<(String, String)>>,
    pub hangups: Mutex<Vec<String>>,
}

#[async_trait]
impl TelephonyGateway for StubGateway {
    async fn place_call(&self, request: PlaceCallRequest) -> Result<ProviderCallId> {
        if self.fail_placement.load(Ordering::SeqCst) {
            return Err(DomainError::ProviderRequest {
                endpoint: "/calls".to_string(),
                message: "placement refused".to_string(),
            });
        }
        let provider_call_id = format!("pcid-{}", self.placed.lock().unwrap().len() + 1);
        self.placed.lock().unwrap().push(request);
        Ok(ProviderCallId::new(provider_call_id))
    }

    async fn send_dtmf(&self, provider_call_id: &ProviderCallId, digits: &str) -> Result<()> {
        self.dtmf_sent
            .lock()
            .unwrap()
            .push((provider_call_id.to_string(), digits.to_string()));
        Ok(())
    }

    async fn speak(&self, provider_call_id: &ProviderCallId, text: &str) -> Result<()> {
        self.spoken
            .lock()
            .unwrap()
            .push((provider_call_id.to_string(), text.to_string()));
        Ok(())
    }

    async fn hangup(&self, provider_call_id: &ProviderCallId) -> Result<()> {
        if self.fail_hangup.load(Ordering::SeqCst) {
            return Err(DomainError::ProviderRequest {
                endpoint: "/actions/hangup".to_string(),
                message: "hangup refused".to_string(),
            });
        }
        self.hangups
            .lock()
            .unwrap()
            .push(provider_call_id.to_string());
        Ok(())
    }
}

/// Classifier double that replays a scripted directive
pub struct StubClassifier {
    pub directive: Mutex<String>,
}

impl StubClassifier {
    pub fn returning(directive: &str) -> Self {
        Self {
            directive: Mutex::new(directive.to_string()),
        }
    }

    pub fn set_directive(&self, directive: &str) {
        *self.directive.lock().unwrap() = directive.to_string();
    }
}

#[async_trait]
impl IvrClassifier for StubClassifier {
    async fn classify(&self, _heard: &str) -> Result<String> {
        Ok(self.directive.lock().unwrap().clone())
    }
}

/// Notifier double that captures webhook payloads
#[derive(Default)]
pub struct StubNotifier {
    pub fail_human: AtomicBool,
    pub fail_completed: AtomicBool,
    pub human_payloads: Mutex<Vec<HumanDetectedPayload>>,
    pub completed_records: Mutex<Vec<CallRecord>>,
}

#[async_trait]
impl CallNotifier for StubNotifier {
    async fn human_detected(&self, payload: &HumanDetectedPayload) -> Result<()> {
        if self.fail_human.load(Ordering::SeqCst) {
            return Err(DomainError::WebhookDelivery {
                url: "http://hooks.test/human".to_string(),
                message: "500".to_string(),
            });
        }
        self.human_payloads.lock().unwrap().push(payload.clone());
        Ok(())
    }

    async fn call_completed(&self, record: &CallRecord) -> Result<()> {
        if self.fail_completed.load(Ordering::SeqCst) {
            return Err(DomainError::WebhookDelivery {
                url: "http://hooks.test/completed".to_string(),
                message: "502".to_string(),
            });
        }
        self.completed_records.lock().unwrap().push(record.clone());
        Ok(())
    }
}

/// Fully wired orchestrator over the stub collaborators
pub struct TestApp {
    pub orchestrator: Arc<CallOrchestrator>,
    pub registry: Arc<InMemoryCallRegistry>,
    pub gateway: Arc<StubGateway>,
    pub classifier: Arc<StubClassifier>,
    pub notifier: Arc<StubNotifier>,
}

pub fn build_test_app(directive: &str) -> TestApp {
    let registry = Arc::new(InMemoryCallRegistry::new());
    let gateway = Arc::new(StubGateway::default());
    let classifier = Arc::new(StubClassifier::returning(directive));
    let notifier = Arc::new(StubNotifier::default());

    let orchestrator = Arc::new(CallOrchestrator::new(
        registry.clone(),
        gateway.clone(),
        classifier.clone(),
        notifier.clone(),
        FanoutLogger::tracing_only(),
    ));

    TestApp {
        orchestrator,
        registry,
        gateway,
        classifier,
        notifier,
    }
}
