//! In-memory call registry

use crate::domain::call::aggregate::CallRecord;
use crate::domain::call::repository::CallRegistry;
use crate::domain::shared::error::DomainError;
use crate::domain::shared::result::Result;
use crate::domain::shared::value_objects::{CallId, ProviderCallId};
use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;

/// Memory-resident registry of live calls
///
/// State does not survive a process restart. The map is safe for
/// concurrent access on distinct keys; callers serialize writes to a
/// single key (see the orchestrator's per-call locks).
pub struct InMemoryCallRegistry {
    calls: RwLock<HashMap<CallId, CallRecord>>,
}

impl InMemoryCallRegistry {
    pub fn new() -> Self {
        Self {
            calls: RwLock::new(HashMap::new()),
        }
    }
}

impl Default for InMemoryCallRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CallRegistry for InMemoryCallRegistry {
    async fn create(&self, record: CallRecord) -> Result<()> {
        let mut calls = self.calls.write().await;
        if calls.contains_key(&record.call_id) {
            return Err(DomainError::Validation(format!(
                "Call {} already exists",
                record.call_id
            )));
        }
        calls.insert(record.call_id.clone(), record);
        Ok(())
    }

    async fn get(&self, id: &CallId) -> Option<CallRecord> {
        self.calls.read().await.get(id).cloned()
    }

    async fn put(&self, record: CallRecord) -> Result<()> {
        let mut calls = self.calls.write().await;
        if !calls.contains_key(&record.call_id) {
            return Err(DomainError::CallNotFound(record.call_id.to_string()));
        }
        calls.insert(record.call_id.clone(), record);
        Ok(())
    }

    async fn delete(&self, id: &CallId) {
        self.calls.write().await.remove(id);
    }

    async fn find_by_provider_call_id(
        &self,
        provider_call_id: &ProviderCallId,
    ) -> Option<CallId> {
        // Linear scan is fine at the expected concurrent-call cardinality;
        // switch to an incrementally maintained reverse index if that grows.
        self.calls
            .read()
            .await
            .values()
            .find(|record| record.provider_call_id.as_ref() == Some(provider_call_id))
            .map(|record| record.call_id.clone())
    }

    async fn active_count(&self) -> usize {
        self.calls.read().await.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_record() -> CallRecord {
        CallRecord::new(
            "office-1".to_string(),
            "patient-1".to_string(),
            "+18005551234".to_string(),
            None,
        )
    }

    #[tokio::test]
    async fn test_create_get_delete() {
        let registry = InMemoryCallRegistry::new();
        let record = test_record();
        let id = record.call_id.clone();

        registry.create(record).await.unwrap();
        assert!(registry.get(&id).await.is_some());
        assert_eq!(registry.active_count().await, 1);

        registry.delete(&id).await;
        assert!(registry.get(&id).await.is_none());
        assert_eq!(registry.active_count().await, 0);
    }

    #[tokio::test]
    async fn test_create_rejects_duplicate_id() {
        let registry = InMemoryCallRegistry::new();
        let record = test_record();

        registry.create(record.clone()).await.unwrap();
        assert!(registry.create(record).await.is_err());
    }

    #[tokio::test]
    async fn test_put_requires_live_record() {
        let registry = InMemoryCallRegistry::new();
        let record = test_record();
        assert!(matches!(
            registry.put(record).await,
            Err(DomainError::CallNotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_reverse_lookup() {
        let registry = InMemoryCallRegistry::new();
        let mut record = test_record();
        let id = record.call_id.clone();
        record
            .assign_provider_call_id(ProviderCallId::new("pcid-1"))
            .unwrap();
        registry.create(record).await.unwrap();

        assert_eq!(
            registry
                .find_by_provider_call_id(&ProviderCallId::new("pcid-1"))
                .await,
            Some(id.clone())
        );
        assert_eq!(
            registry
                .find_by_provider_call_id(&ProviderCallId::new("pcid-2"))
                .await,
            None
        );

        registry.delete(&id).await;
        assert_eq!(
            registry
                .find_by_provider_call_id(&ProviderCallId::new("pcid-1"))
                .await,
            None
        );
    }
}
