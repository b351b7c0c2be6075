//! Outbound notifications to residents and visitors.
//!
//! Delivery is best-effort: callers treat a failed dispatch as something to
//! log, never as a reason to undo the state change that triggered it.

use crate::notification::error::NotificationError;
use crate::notification::model::{NotificationKind, NotificationPayload, NotificationTarget};

pub mod error;
pub mod imp;
pub mod model;

#[cfg_attr(any(test, feature = "mock"), mockall::automock)]
#[async_trait::async_trait]
pub trait NotificationDispatcher: Send + Sync {
    async fn notify(
        &self,
        target: &NotificationTarget,
        kind: NotificationKind,
        payload: &NotificationPayload,
    ) -> Result<(), NotificationError>;
}
