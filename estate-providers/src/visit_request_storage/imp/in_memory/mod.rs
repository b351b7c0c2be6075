use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::common_models::visit::{VisitRequest, VisitRequestId};
use crate::visit_request_storage::{
    error::VisitRequestStorageError,
    model::{CasOutcome, VisitRequestFilter},
    VisitRequestStorage,
};

#[cfg(test)]
mod test;

#[derive(Clone, Default)]
pub struct InMemoryVisitRequestStorage {
    storage: Arc<Mutex<HashMap<VisitRequestId, VisitRequest>>>,
}

impl InMemoryVisitRequestStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl VisitRequestStorage for InMemoryVisitRequestStorage {
    async fn create(&self, request: VisitRequest) -> Result<(), VisitRequestStorageError> {
        let mut hash_map_handle = self.storage.lock().await;

        if hash_map_handle.contains_key(&request.id) {
            return Err(VisitRequestStorageError::AlreadyExists(request.id));
        }

        hash_map_handle.insert(request.id, request);

        Ok(())
    }

    async fn get(
        &self,
        id: &VisitRequestId,
    ) -> Result<Option<VisitRequest>, VisitRequestStorageError> {
        let hash_map_handle = self.storage.lock().await;

        Ok(hash_map_handle.get(id).cloned())
    }

    async fn compare_and_swap(
        &self,
        expected_version: u64,
        mut updated: VisitRequest,
    ) -> Result<CasOutcome, VisitRequestStorageError> {
        let mut hash_map_handle = self.storage.lock().await;

        let current = hash_map_handle
            .get_mut(&updated.id)
            .ok_or(VisitRequestStorageError::NotFound(updated.id))?;

        if current.version != expected_version {
            return Ok(CasOutcome::Conflict(current.clone()));
        }

        updated.version = expected_version + 1;
        *current = updated.clone();

        Ok(CasOutcome::Swapped(updated))
    }

    async fn list(
        &self,
        filter: VisitRequestFilter,
    ) -> Result<Vec<VisitRequest>, VisitRequestStorageError> {
        let hash_map_handle = self.storage.lock().await;

        let mut requests: Vec<VisitRequest> = hash_map_handle
            .values()
            .filter(|request| filter.matches(request))
            .cloned()
            .collect();
        drop(hash_map_handle);

        requests.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        if let Some(limit) = filter.limit {
            requests.truncate(limit);
        }

        Ok(requests)
    }
}
