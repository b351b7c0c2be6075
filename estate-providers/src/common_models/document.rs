use serde::{Deserialize, Serialize};
use strum::Display;
use thiserror::Error;

use super::{
    macros::{impl_display, impl_from, impl_into, string_reference},
    visit::TravelType,
};

string_reference!(
    /// Handle returned by the document storage collaborator.
    DocumentRef
);

#[derive(Clone, Copy, Debug, Display, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum DocumentKind {
    Identity,
    Vehicle,
}

#[derive(Debug, Error, Eq, PartialEq)]
pub enum DocumentBundleError {
    #[error("Missing document: `{0}`")]
    MissingDocument(DocumentKind),
}

/// Documents as captured by the visitor, before presence rules are applied.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct DocumentSubmission {
    pub identity_document: Option<DocumentRef>,
    pub vehicle_document: Option<DocumentRef>,
}

/// Documents attached to a visit request.
///
/// The identity document is always present; the vehicle document is present
/// whenever the visitor travels as a driver.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentBundle {
    identity_document: DocumentRef,
    vehicle_document: Option<DocumentRef>,
}

impl DocumentBundle {
    pub fn from_submission(
        submission: DocumentSubmission,
        travel_type: TravelType,
    ) -> Result<Self, DocumentBundleError> {
        let identity_document = submission
            .identity_document
            .ok_or(DocumentBundleError::MissingDocument(DocumentKind::Identity))?;

        if travel_type == TravelType::Driver && submission.vehicle_document.is_none() {
            return Err(DocumentBundleError::MissingDocument(DocumentKind::Vehicle));
        }

        Ok(Self {
            identity_document,
            vehicle_document: submission.vehicle_document,
        })
    }

    pub fn identity_document(&self) -> &DocumentRef {
        &self.identity_document
    }

    pub fn vehicle_document(&self) -> Option<&DocumentRef> {
        self.vehicle_document.as_ref()
    }

    pub fn refs(&self) -> impl Iterator<Item = &DocumentRef> {
        std::iter::once(&self.identity_document).chain(self.vehicle_document.iter())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn submission(identity: Option<&str>, vehicle: Option<&str>) -> DocumentSubmission {
        DocumentSubmission {
            identity_document: identity.map(DocumentRef::from),
            vehicle_document: vehicle.map(DocumentRef::from),
        }
    }

    #[test]
    fn test_pedestrian_needs_identity_only() {
        let bundle =
            DocumentBundle::from_submission(submission(Some("id"), None), TravelType::Pedestrian)
                .unwrap();

        assert_eq!(bundle.identity_document().as_str(), "id");
        assert_eq!(bundle.refs().count(), 1);
    }

    #[test]
    fn test_driver_needs_vehicle_document() {
        let result =
            DocumentBundle::from_submission(submission(Some("id"), None), TravelType::Driver);

        assert_eq!(
            result,
            Err(DocumentBundleError::MissingDocument(DocumentKind::Vehicle))
        );
    }

    #[test]
    fn test_identity_always_required() {
        let result =
            DocumentBundle::from_submission(submission(None, Some("disc")), TravelType::Driver);

        assert_eq!(
            result,
            Err(DocumentBundleError::MissingDocument(DocumentKind::Identity))
        );
    }

    #[test]
    fn test_driver_bundle_releases_both_documents() {
        let bundle =
            DocumentBundle::from_submission(submission(Some("id"), Some("disc")), TravelType::Driver)
                .unwrap();

        let refs: Vec<_> = bundle.refs().map(DocumentRef::as_str).collect();
        assert_eq!(refs, vec!["id", "disc"]);
    }
}
