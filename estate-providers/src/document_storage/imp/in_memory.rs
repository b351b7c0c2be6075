use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::common_models::document::DocumentRef;
use crate::document_storage::{error::DocumentStorageError, DocumentStorage};

#[derive(Clone, Default)]
pub struct InMemoryDocumentStorage {
    storage: Arc<Mutex<HashMap<DocumentRef, Vec<u8>>>>,
}

impl InMemoryDocumentStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn contains(&self, document: &DocumentRef) -> bool {
        self.storage.lock().await.contains_key(document)
    }
}

#[async_trait]
impl DocumentStorage for InMemoryDocumentStorage {
    async fn store(&self, content: Vec<u8>) -> Result<DocumentRef, DocumentStorageError> {
        if content.is_empty() {
            return Err(DocumentStorageError::EmptyDocument);
        }

        let document = DocumentRef::from(format!("documents/{}", Uuid::new_v4()));
        self.storage
            .lock()
            .await
            .insert(document.to_owned(), content);

        Ok(document)
    }

    async fn delete(&self, document: &DocumentRef) -> Result<(), DocumentStorageError> {
        self.storage.lock().await.remove(document);

        Ok(())
    }
}
