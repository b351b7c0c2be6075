use std::time::Duration;

use estate_providers::common_models::{
    access_credential::CredentialState,
    visit::{VisitRequestId, VisitStatus},
};
use serde::Serialize;
use time::OffsetDateTime;

/// What a polling visitor client sees for one visit request.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VisitStatusSnapshot {
    pub visit_request_id: VisitRequestId,
    pub status: VisitStatus,
    pub resident_name: Option<String>,
    pub credential: Option<CredentialSnapshot>,
    /// `None` once the status can no longer change.
    pub next_poll_after: Option<Duration>,
}

#[derive(Clone, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CredentialSnapshot {
    #[serde(with = "time::serde::rfc3339")]
    pub valid_until: OffsetDateTime,
    pub consumed: bool,
    #[serde(with = "time::serde::rfc3339::option")]
    pub consumed_at: Option<OffsetDateTime>,
    pub state: CredentialState,
    /// Only while the credential can still be presented at the gate.
    pub token: Option<String>,
}

impl std::fmt::Debug for CredentialSnapshot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialSnapshot")
            .field("valid_until", &self.valid_until)
            .field("consumed", &self.consumed)
            .field("consumed_at", &self.consumed_at)
            .field("state", &self.state)
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}
