use thiserror::Error;

#[derive(Debug, Error)]
pub enum ResidentDirectoryError {
    #[error("Resident directory unavailable: `{0}`")]
    Unavailable(String),
    #[error("Invalid resident directory request: `{0}`")]
    InvalidRequest(String),
    #[error("Invalid resident directory response: `{0}`")]
    InvalidResponse(String),
}
