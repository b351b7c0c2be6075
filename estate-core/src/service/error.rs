use estate_providers::{
    access_credential_storage::error::AccessCredentialStorageError,
    common_models::{
        document::{DocumentBundleError, DocumentKind},
        resident::{ResidentReference, UnitReference},
        visit::{VisitRequestId, VisitStatus},
    },
    credential_codec::error::CodecError,
    document_storage::error::DocumentStorageError,
    pin_validation::error::PinValidationError,
    resident_directory::error::ResidentDirectoryError,
    visit_request_storage::error::VisitRequestStorageError,
};
use strum::Display;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum VisitServiceError {
    #[error("Validation error: `{0}`")]
    Validation(#[from] ValidationError),
    #[error("Conflict: `{0}`")]
    Conflict(#[from] ConflictError),
    #[error("Not found: `{0}`")]
    NotFound(#[from] NotFoundError),
    #[error("Dependency error: `{0}`")]
    Dependency(#[from] DependencyError),
    #[error("Resident `{0}` is not allowed to decide this visit request")]
    NotAuthorized(ResidentReference),

    #[error("Visit request storage error: `{0}`")]
    VisitRequestStorage(#[from] VisitRequestStorageError),
    #[error("Access credential storage error: `{0}`")]
    AccessCredentialStorage(#[from] AccessCredentialStorageError),
    #[error("Credential codec error: `{0}`")]
    Codec(#[from] CodecError),
}

/// Input the caller can fix. Never retried.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Missing document: `{0}`")]
    MissingDocument(DocumentKind),
    #[error("PIN is required in PIN mode")]
    MissingPin,
    #[error("Invalid PIN")]
    InvalidPin,
}

/// The caller's view is stale; refresh state instead of repeating the call.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConflictError {
    #[error("Visit request already decided: `{0}`")]
    AlreadyDecided(VisitStatus),
    #[error("Visit request expired")]
    RequestExpired,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum NotFoundError {
    #[error("Visit request `{0}`")]
    VisitRequest(VisitRequestId),
    #[error("Unit `{0}`")]
    Unit(UnitReference),
}

/// A collaborator could not answer. Nothing was persisted.
#[derive(Debug, Error)]
pub enum DependencyError {
    #[error("PIN validation: `{0}`")]
    PinValidation(#[from] PinValidationError),
    #[error("Resident directory: `{0}`")]
    ResidentDirectory(#[from] ResidentDirectoryError),
    #[error("Document storage: `{0}`")]
    DocumentStorage(#[from] DocumentStorageError),
}

#[derive(Clone, Copy, Debug, Display, Eq, PartialEq)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorKind {
    Validation,
    Conflict,
    NotFound,
    Dependency,
    NotAuthorized,
    Internal,
}

impl VisitServiceError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            VisitServiceError::Validation(_) => ErrorKind::Validation,
            VisitServiceError::Conflict(_) => ErrorKind::Conflict,
            VisitServiceError::NotFound(_) => ErrorKind::NotFound,
            VisitServiceError::Dependency(_) => ErrorKind::Dependency,
            VisitServiceError::NotAuthorized(_) => ErrorKind::NotAuthorized,
            VisitServiceError::VisitRequestStorage(_)
            | VisitServiceError::AccessCredentialStorage(_)
            | VisitServiceError::Codec(_) => ErrorKind::Internal,
        }
    }
}

impl From<DocumentBundleError> for ValidationError {
    fn from(error: DocumentBundleError) -> Self {
        match error {
            DocumentBundleError::MissingDocument(kind) => ValidationError::MissingDocument(kind),
        }
    }
}
