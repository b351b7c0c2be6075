use thiserror::Error;

use crate::common_models::{access_credential::AccessCredentialId, visit::VisitRequestId};

#[derive(Clone, Debug, Error)]
pub enum AccessCredentialStorageError {
    #[error("Credential already issued for visit request: `{0}`")]
    AlreadyIssued(VisitRequestId),
    #[error("Access credential not found: `{0}`")]
    NotFound(AccessCredentialId),
    #[error("Storage backend error: `{0}`")]
    Backend(String),
}
