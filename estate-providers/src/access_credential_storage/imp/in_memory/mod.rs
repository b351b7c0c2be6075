use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use time::OffsetDateTime;
use tokio::sync::Mutex;

use crate::access_credential_storage::{
    error::AccessCredentialStorageError, model::ConsumeOutcome, AccessCredentialStorage,
};
use crate::common_models::{
    access_credential::{AccessCredential, AccessCredentialId},
    visit::VisitRequestId,
};

#[cfg(test)]
mod test;

#[derive(Clone, Default)]
pub struct InMemoryAccessCredentialStorage {
    storage: Arc<Mutex<HashMap<AccessCredentialId, AccessCredential>>>,
}

impl InMemoryAccessCredentialStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AccessCredentialStorage for InMemoryAccessCredentialStorage {
    async fn create(
        &self,
        credential: AccessCredential,
    ) -> Result<(), AccessCredentialStorageError> {
        let mut hash_map_handle = self.storage.lock().await;

        if hash_map_handle
            .values()
            .any(|existing| existing.visit_request_id == credential.visit_request_id)
        {
            return Err(AccessCredentialStorageError::AlreadyIssued(
                credential.visit_request_id,
            ));
        }

        hash_map_handle.insert(credential.id, credential);

        Ok(())
    }

    async fn get_by_visit_request(
        &self,
        visit_request_id: &VisitRequestId,
    ) -> Result<Option<AccessCredential>, AccessCredentialStorageError> {
        let hash_map_handle = self.storage.lock().await;

        Ok(hash_map_handle
            .values()
            .find(|credential| &credential.visit_request_id == visit_request_id)
            .cloned())
    }

    async fn count_by_visit_request(
        &self,
        visit_request_id: &VisitRequestId,
    ) -> Result<usize, AccessCredentialStorageError> {
        let hash_map_handle = self.storage.lock().await;

        Ok(hash_map_handle
            .values()
            .filter(|credential| &credential.visit_request_id == visit_request_id)
            .count())
    }

    async fn consume(
        &self,
        id: &AccessCredentialId,
        now: OffsetDateTime,
    ) -> Result<ConsumeOutcome, AccessCredentialStorageError> {
        let mut hash_map_handle = self.storage.lock().await;

        let credential = hash_map_handle
            .get_mut(id)
            .ok_or(AccessCredentialStorageError::NotFound(*id))?;

        if credential.consumed {
            return Ok(ConsumeOutcome::AlreadyConsumed(credential.clone()));
        }
        if credential.is_expired_at(now) {
            return Ok(ConsumeOutcome::Expired(credential.clone()));
        }

        credential.consumed = true;
        credential.consumed_at = Some(now);

        Ok(ConsumeOutcome::Consumed(credential.clone()))
    }
}
