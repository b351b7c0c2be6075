use thiserror::Error;

use crate::common_models::visit::VisitRequestId;

#[derive(Clone, Debug, Error)]
pub enum VisitRequestStorageError {
    #[error("Visit request already exists: `{0}`")]
    AlreadyExists(VisitRequestId),
    #[error("Visit request not found: `{0}`")]
    NotFound(VisitRequestId),
    #[error("Storage backend error: `{0}`")]
    Backend(String),
}
