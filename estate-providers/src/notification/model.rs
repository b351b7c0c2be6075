use serde::Serialize;
use strum::Display;
use time::OffsetDateTime;

use crate::common_models::{
    resident::{EstateReference, ResidentReference, UnitReference},
    visit::VisitRequestId,
};

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum NotificationTarget {
    Resident(ResidentReference),
    /// Phone number or other contact the visitor supplied.
    Visitor { contact: String },
}

#[derive(Clone, Copy, Debug, Display, Eq, PartialEq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum NotificationKind {
    NewVisitRequest,
    VisitGranted,
    VisitDenied,
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationPayload {
    pub visit_request_id: VisitRequestId,
    pub estate: EstateReference,
    pub unit: UnitReference,
    pub guest_name: String,
    pub credential: Option<CredentialDelivery>,
}

/// Gate pass handed to a granted visitor.
#[derive(Clone, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CredentialDelivery {
    pub token: String,
    #[serde(with = "time::serde::rfc3339")]
    pub valid_until: OffsetDateTime,
}

impl std::fmt::Debug for CredentialDelivery {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialDelivery")
            .field("token", &"<redacted>")
            .field("valid_until", &self.valid_until)
            .finish()
    }
}
