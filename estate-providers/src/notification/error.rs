use std::time::Duration;

use thiserror::Error;

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum NotificationError {
    #[error("Notification failed: `{0}`")]
    Failed(String),
    #[error("Notification timed out after {0:?}")]
    Timeout(Duration),
}
