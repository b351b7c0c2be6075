use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::notification::{
    error::NotificationError,
    model::{NotificationKind, NotificationPayload, NotificationTarget},
    NotificationDispatcher,
};


#[derive(Clone, Debug)]
pub struct Params {
    pub max_attempts: u32,
    pub attempt_timeout: Duration,
    /// Wait before attempt `n + 1` is `backoff * n`.
    pub backoff: Duration,
}

/// Bounded retry around another dispatcher. Each attempt is cut off after
/// `attempt_timeout`; the last failure is returned once attempts run out.
pub struct RetryingNotificationDispatcher {
    inner: Arc<dyn NotificationDispatcher>,
    params: Params,
}

impl RetryingNotificationDispatcher {
    pub fn new(inner: Arc<dyn NotificationDispatcher>, params: Params) -> Self {
        Self { inner, params }
    }
}

#[async_trait]
impl NotificationDispatcher for RetryingNotificationDispatcher {
    async fn notify(
        &self,
        target: &NotificationTarget,
        kind: NotificationKind,
        payload: &NotificationPayload,
    ) -> Result<(), NotificationError> {
        let max_attempts = self.params.max_attempts.max(1);
        let mut last_error = NotificationError::Failed("no attempt made".to_string());

        for attempt in 1..=max_attempts {
            let result = tokio::time::timeout(
                self.params.attempt_timeout,
                self.inner.notify(target, kind, payload),
            )
            .await
            .unwrap_or(Err(NotificationError::Timeout(self.params.attempt_timeout)));

            match result {
                Ok(()) => {
                    debug!(%kind, attempt, "notification delivered");
                    return Ok(());
                }
                Err(error) => {
                    warn!(%kind, attempt, max_attempts, %error, "notification attempt failed");
                    last_error = error;
                }
            }

            if attempt < max_attempts {
                tokio::time::sleep(self.params.backoff * attempt).await;
            }
        }

        Err(last_error)
    }
}
