//! Storage for identity and vehicle document captures. Content is opaque here.

use crate::common_models::document::DocumentRef;
use crate::document_storage::error::DocumentStorageError;

pub mod error;
pub mod imp;

#[cfg_attr(any(test, feature = "mock"), mockall::automock)]
#[async_trait::async_trait]
pub trait DocumentStorage: Send + Sync {
    async fn store(&self, content: Vec<u8>) -> Result<DocumentRef, DocumentStorageError>;

    /// Deleting a document that is already gone succeeds.
    async fn delete(&self, document: &DocumentRef) -> Result<(), DocumentStorageError>;
}
