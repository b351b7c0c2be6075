//! Durable keyed storage for visit requests.
//!
//! Every state transition goes through [`VisitRequestStorage::compare_and_swap`]:
//! the write only lands if the stored version still matches the one the caller
//! read, so two racing writers can never both succeed.

use crate::common_models::visit::{VisitRequest, VisitRequestId};
use crate::visit_request_storage::error::VisitRequestStorageError;
use crate::visit_request_storage::model::{CasOutcome, VisitRequestFilter};

pub mod error;
pub mod imp;
pub mod model;

#[cfg_attr(any(test, feature = "mock"), mockall::automock)]
#[async_trait::async_trait]
pub trait VisitRequestStorage: Send + Sync {
    /// Inserts a new record. Fails if the id is already taken.
    async fn create(&self, request: VisitRequest) -> Result<(), VisitRequestStorageError>;

    async fn get(
        &self,
        id: &VisitRequestId,
    ) -> Result<Option<VisitRequest>, VisitRequestStorageError>;

    /// Replaces the record with `updated` if its stored version equals
    /// `expected_version`. On success the stored version is incremented and the
    /// stored record returned.
    async fn compare_and_swap(
        &self,
        expected_version: u64,
        updated: VisitRequest,
    ) -> Result<CasOutcome, VisitRequestStorageError>;

    /// Records matching `filter`, newest first.
    async fn list(
        &self,
        filter: VisitRequestFilter,
    ) -> Result<Vec<VisitRequest>, VisitRequestStorageError>;
}
