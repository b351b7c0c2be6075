use serde::{Deserialize, Serialize};
use strum::Display;
use time::OffsetDateTime;
use uuid::Uuid;

use super::{
    macros::{impl_display, impl_from, impl_into},
    visit::VisitRequestId,
};

#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct AccessCredentialId(Uuid);
impl_display!(AccessCredentialId);
impl_from!(AccessCredentialId; Uuid);
impl_into!(AccessCredentialId; Uuid);

impl AccessCredentialId {
    pub fn new_random() -> Self {
        Self(Uuid::new_v4())
    }
}

/// Single-use gate pass minted when a visit request is granted.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessCredential {
    pub id: AccessCredentialId,
    pub visit_request_id: VisitRequestId,
    pub token: String,
    #[serde(with = "time::serde::rfc3339")]
    pub issued_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub valid_until: OffsetDateTime,
    pub consumed: bool,
    #[serde(with = "time::serde::rfc3339::option")]
    pub consumed_at: Option<OffsetDateTime>,
}

#[derive(Clone, Copy, Debug, Display, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum CredentialState {
    Issued,
    Consumed,
    Expired,
}

impl AccessCredential {
    pub fn is_expired_at(&self, now: OffsetDateTime) -> bool {
        now > self.valid_until
    }

    /// Consumption wins over expiry: a pass used in time stays CONSUMED.
    pub fn state_at(&self, now: OffsetDateTime) -> CredentialState {
        if self.consumed {
            CredentialState::Consumed
        } else if self.is_expired_at(now) {
            CredentialState::Expired
        } else {
            CredentialState::Issued
        }
    }
}
