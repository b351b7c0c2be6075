use thiserror::Error;

#[derive(Debug, Error)]
pub enum PinValidationError {
    #[error("PIN service unavailable: `{0}`")]
    Unavailable(String),
    #[error("Invalid PIN service request: `{0}`")]
    InvalidRequest(String),
    #[error("Invalid PIN service response: `{0}`")]
    InvalidResponse(String),
}
