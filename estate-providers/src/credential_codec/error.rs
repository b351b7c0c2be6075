use estate_crypto::MacError;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CodecError {
    #[error("Malformed token")]
    Malformed,
    #[error("Encoding error: `{0}`")]
    Encoding(String),
    #[error("MAC error: `{0}`")]
    Mac(#[from] MacError),
}
