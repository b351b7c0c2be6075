use estate_providers::common_models::{
    document::DocumentSubmission,
    resident::{EstateReference, UnitReference},
    visit::{GuestInfo, TravelType, VisitRequest, VisitRequestId, VisitStatus},
};
use strum::Display;
use time::OffsetDateTime;

#[derive(Clone, Eq, PartialEq)]
pub enum SubmissionMode {
    Pin { pin: String },
    Qr,
}

impl std::fmt::Debug for SubmissionMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SubmissionMode::Pin { .. } => f.write_str("Pin { .. }"),
            SubmissionMode::Qr => f.write_str("Qr"),
        }
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SubmitVisitRequest {
    pub estate: EstateReference,
    pub mode: SubmissionMode,
    pub travel_type: TravelType,
    pub documents: DocumentSubmission,
    pub unit: UnitReference,
    pub guest: GuestInfo,
}

/// A stored request together with the status a reader observes right now.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct VisitRecord {
    pub status: VisitStatus,
    pub request: VisitRequest,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum PresentationOutcome {
    Admit(AdmittedVisit),
    Reject(RejectReason),
}

/// What the gate scanner shows the guard on admission.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AdmittedVisit {
    pub visit_request_id: VisitRequestId,
    pub guest_name: String,
    pub unit: UnitReference,
    pub travel_type: TravelType,
    pub consumed_at: OffsetDateTime,
}

#[derive(Clone, Copy, Debug, Display, Eq, PartialEq)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum RejectReason {
    Malformed,
    NotFound,
    Expired,
    AlreadyUsed,
}

impl PresentationOutcome {
    pub fn is_admitted(&self) -> bool {
        matches!(self, PresentationOutcome::Admit(_))
    }
}

impl RejectReason {
    /// Text for the guard's screen. Not meant to be shown to the visitor.
    pub fn operator_message(&self) -> &'static str {
        match self {
            RejectReason::Malformed => "Code not recognised. Ask the visitor to show the pass again.",
            RejectReason::NotFound => "No matching pass. Contact the resident.",
            RejectReason::Expired => "Pass has expired. The resident must approve a new visit.",
            RejectReason::AlreadyUsed => "Pass has already been used.",
        }
    }
}
