//! Visitor-facing read model. Clients poll [`StatusService::describe`] at the
//! suggested interval instead of relying on push notifications, which may be
//! dropped.

use std::sync::Arc;
use std::time::Duration;

use estate_providers::{
    clock::Clock,
    common_models::{access_credential::CredentialState, visit::VisitRequestId},
};

use crate::service::error::VisitServiceError;
use crate::service::visit_service::VisitService;

use self::dto::{CredentialSnapshot, VisitStatusSnapshot};

pub mod dto;


pub struct StatusService {
    visit_service: Arc<VisitService>,
    clock: Arc<dyn Clock>,
    poll_interval: Duration,
}

impl StatusService {
    pub fn new(visit_service: Arc<VisitService>, clock: Arc<dyn Clock>, poll_interval: Duration) -> Self {
        Self {
            visit_service,
            clock,
            poll_interval,
        }
    }

    /// Projection over the lifecycle's reads; never writes.
    pub async fn describe(
        &self,
        id: &VisitRequestId,
    ) -> Result<VisitStatusSnapshot, VisitServiceError> {
        let request = self.visit_service.get_visit_request(id).await?;
        let credential = self.visit_service.get_credential(id).await?;

        let now = self.clock.now();
        let status = request.status_at(now);

        let credential = credential.map(|credential| {
            let state = credential.state_at(now);
            CredentialSnapshot {
                valid_until: credential.valid_until,
                consumed: credential.consumed,
                consumed_at: credential.consumed_at,
                state,
                token: (state == CredentialState::Issued).then_some(credential.token),
            }
        });

        Ok(VisitStatusSnapshot {
            visit_request_id: request.id,
            status,
            resident_name: request.resident_name,
            credential,
            next_poll_after: (!status.is_terminal()).then_some(self.poll_interval),
        })
    }
}
