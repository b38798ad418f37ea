//! Call registry interface

use crate::domain::call::aggregate::CallRecord;
use crate::domain::shared::result::Result;
use crate::domain::shared::value_objects::{CallId, ProviderCallId};
use async_trait::async_trait;

/// Registry of live call records
///
/// Defined in the domain layer as a trait (port) and implemented in the
/// infrastructure layer. Implementations must be safe for concurrent
/// access from independent call flows; per-call write serialization is
/// the orchestrator's job.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CallRegistry: Send + Sync {
    /// Insert a new record; fails if the call id is already live
    async fn create(&self, record: CallRecord) -> Result<()>;

    /// Fetch a record by its internal id
    async fn get(&self, id: &CallId) -> Option<CallRecord>;

    /// Replace an existing record; fails if the call id is not live
    async fn put(&self, record: CallRecord) -> Result<()>;

    /// Remove a record
    async fn delete(&self, id: &CallId);

    /// Reverse lookup from the provider's call handle; never fails
    async fn find_by_provider_call_id(&self, provider_call_id: &ProviderCallId)
        -> Option<CallId>;

    /// Number of live records
    async fn active_count(&self) -> usize;
}
