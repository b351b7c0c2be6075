use async_trait::async_trait;
use tracing::info;

use crate::notification::{
    error::NotificationError,
    model::{NotificationKind, NotificationPayload, NotificationTarget},
    NotificationDispatcher,
};

/// Writes notifications to the log instead of delivering them.
#[derive(Clone, Copy, Default)]
pub struct TracingNotificationDispatcher;

#[async_trait]
impl NotificationDispatcher for TracingNotificationDispatcher {
    async fn notify(
        &self,
        target: &NotificationTarget,
        kind: NotificationKind,
        payload: &NotificationPayload,
    ) -> Result<(), NotificationError> {
        let recipient = match target {
            NotificationTarget::Resident(resident) => format!("resident {resident}"),
            NotificationTarget::Visitor { .. } => "visitor".to_string(),
        };

        info!(
            %kind,
            %recipient,
            visit_request_id = %payload.visit_request_id,
            unit = %payload.unit,
            carries_credential = payload.credential.is_some(),
            "notification dispatched"
        );

        Ok(())
    }
}
