//! Durable keyed storage for minted access credentials.
//!
//! At most one credential exists per visit request, and a credential flips
//! from unconsumed to consumed exactly once.

use time::OffsetDateTime;

use crate::access_credential_storage::error::AccessCredentialStorageError;
use crate::access_credential_storage::model::ConsumeOutcome;
use crate::common_models::{
    access_credential::{AccessCredential, AccessCredentialId},
    visit::VisitRequestId,
};

pub mod error;
pub mod imp;
pub mod model;

#[cfg_attr(any(test, feature = "mock"), mockall::automock)]
#[async_trait::async_trait]
pub trait AccessCredentialStorage: Send + Sync {
    /// Fails with [`AccessCredentialStorageError::AlreadyIssued`] if the visit
    /// request already has a credential.
    async fn create(&self, credential: AccessCredential)
        -> Result<(), AccessCredentialStorageError>;

    async fn get_by_visit_request(
        &self,
        visit_request_id: &VisitRequestId,
    ) -> Result<Option<AccessCredential>, AccessCredentialStorageError>;

    async fn count_by_visit_request(
        &self,
        visit_request_id: &VisitRequestId,
    ) -> Result<usize, AccessCredentialStorageError>;

    /// Atomically marks the credential consumed at `now`, unless it is already
    /// consumed or `now` is past its validity.
    async fn consume(
        &self,
        id: &AccessCredentialId,
        now: OffsetDateTime,
    ) -> Result<ConsumeOutcome, AccessCredentialStorageError>;
}
