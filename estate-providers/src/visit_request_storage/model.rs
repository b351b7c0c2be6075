use time::OffsetDateTime;

use crate::common_models::{
    resident::{EstateReference, ResidentReference},
    visit::{VisitRequest, VisitStatus},
};

/// Result of a conditional write.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum CasOutcome {
    /// The write landed; carries the record as now stored.
    Swapped(VisitRequest),
    /// Another writer got there first; carries the current record.
    Conflict(VisitRequest),
}

/// Conjunctive filter over stored records. `None` fields match everything.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct VisitRequestFilter {
    pub estate: Option<EstateReference>,
    pub resident: Option<ResidentReference>,
    /// Matches the stored status, not the status computed at read time.
    pub stored_status: Option<VisitStatus>,
    pub expires_before: Option<OffsetDateTime>,
    pub limit: Option<usize>,
}

impl VisitRequestFilter {
    pub fn matches(&self, request: &VisitRequest) -> bool {
        self.estate
            .as_ref()
            .map_or(true, |estate| &request.estate == estate)
            && self
                .resident
                .as_ref()
                .map_or(true, |resident| &request.resident == resident)
            && self
                .stored_status
                .map_or(true, |status| request.status == status)
            && self
                .expires_before
                .map_or(true, |cutoff| request.expires_at < cutoff)
    }
}
