use thiserror::Error;

#[derive(Clone, Debug, Error)]
pub enum DocumentStorageError {
    #[error("Empty document")]
    EmptyDocument,
    #[error("Store error: `{0}`")]
    Store(String),
    #[error("Delete error: `{0}`")]
    Delete(String),
}
