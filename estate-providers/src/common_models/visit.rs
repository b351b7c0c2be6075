use serde::{Deserialize, Serialize};
use strum::Display;
use time::OffsetDateTime;
use uuid::Uuid;

use super::{
    document::DocumentBundle,
    macros::{impl_display, impl_from, impl_into},
    resident::{EstateReference, ResidentReference, UnitReference},
};

#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct VisitRequestId(Uuid);
impl_display!(VisitRequestId);
impl_from!(VisitRequestId; Uuid);
impl_into!(VisitRequestId; Uuid);

impl VisitRequestId {
    pub fn new_random() -> Self {
        Self(Uuid::new_v4())
    }
}

/// How the visitor entered the flow. Fixed at creation.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VisitMode {
    /// Pre-arranged visit; the PIN is kept for audit only.
    Pin {
        #[serde(rename = "pinPresented")]
        pin_presented: String,
    },
    Qr,
}

impl VisitMode {
    pub fn name(&self) -> &'static str {
        match self {
            VisitMode::Pin { .. } => "PIN",
            VisitMode::Qr => "QR",
        }
    }
}

#[derive(Clone, Copy, Debug, Display, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum TravelType {
    Driver,
    Pedestrian,
}

#[derive(Clone, Copy, Debug, Display, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum VisitStatus {
    Pending,
    Granted,
    Denied,
    Expired,
}

impl VisitStatus {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, VisitStatus::Pending)
    }
}

#[derive(Clone, Copy, Debug, Display, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum Decision {
    Grant,
    Deny,
}

impl Decision {
    pub fn resulting_status(&self) -> VisitStatus {
        match self {
            Decision::Grant => VisitStatus::Granted,
            Decision::Deny => VisitStatus::Denied,
        }
    }
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GuestInfo {
    pub name: String,
    pub contact: String,
    pub purpose: Option<String>,
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VisitRequest {
    pub id: VisitRequestId,
    pub estate: EstateReference,
    pub mode: VisitMode,
    pub travel_type: TravelType,
    /// `None` once the documents have been released.
    pub documents: Option<DocumentBundle>,
    pub unit: UnitReference,
    pub guest: GuestInfo,
    pub resident: ResidentReference,
    pub resident_name: Option<String>,
    pub status: VisitStatus,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339::option")]
    pub decided_at: Option<OffsetDateTime>,
    pub decided_by: Option<ResidentReference>,
    #[serde(with = "time::serde::rfc3339")]
    pub expires_at: OffsetDateTime,

    /// Bumped by every successful compare-and-swap.
    pub version: u64,
}

impl VisitRequest {
    pub fn is_past_window(&self, now: OffsetDateTime) -> bool {
        now > self.expires_at
    }

    /// Status as any reader must observe it at `now`.
    ///
    /// A stored PENDING record past its window reads as EXPIRED whether or not
    /// the sweep has rewritten it.
    pub fn status_at(&self, now: OffsetDateTime) -> VisitStatus {
        if self.status.is_terminal() {
            self.status
        } else if self.is_past_window(now) {
            VisitStatus::Expired
        } else {
            VisitStatus::Pending
        }
    }
}
