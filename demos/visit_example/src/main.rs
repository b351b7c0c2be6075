use std::sync::Arc;

use estate_core::{
    service::visit_service::{
        dto::{PresentationOutcome, SubmissionMode, SubmitVisitRequest},
        Collaborators, VisitStores,
    },
    EstateCore,
};
use estate_crypto::imp::utilities::generate_mac_key;
use estate_providers::{
    access_credential_storage::imp::in_memory::InMemoryAccessCredentialStorage,
    clock::imp::ManualClock,
    common_models::{
        document::DocumentSubmission,
        resident::ResidentRecord,
        visit::{Decision, GuestInfo, TravelType},
    },
    document_storage::imp::in_memory::InMemoryDocumentStorage,
    notification::imp::tracing_dispatcher::TracingNotificationDispatcher,
    pin_validation::{imp::static_pins::StaticPinValidator, model::ValidatedGuest},
    resident_directory::imp::static_directory::StaticResidentDirectory,
    visit_request_storage::imp::in_memory::InMemoryVisitRequestStorage,
};
use time::{Duration, OffsetDateTime};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let clock = ManualClock::new(OffsetDateTime::now_utc());

    let collaborators = Collaborators {
        pin_validator: Arc::new(StaticPinValidator::new().with_pin(
            "oak-estate".into(),
            "7391",
            Some(ValidatedGuest {
                name: "Courier".to_string(),
                purpose: Some("Parcel delivery".to_string()),
            }),
        )),
        resident_directory: Arc::new(StaticResidentDirectory::new().with_resident(
            "oak-estate".into(),
            "C3".into(),
            ResidentRecord {
                reference: "resident-c3".into(),
                display_name: Some("M. van Wyk".to_string()),
            },
        )),
        document_storage: Arc::new(InMemoryDocumentStorage::new()),
        notification_dispatcher: Arc::new(TracingNotificationDispatcher),
    };

    let core = EstateCore::with_stores(
        None,
        VisitStores {
            visit_requests: Arc::new(InMemoryVisitRequestStorage::new()),
            access_credentials: Arc::new(InMemoryAccessCredentialStorage::new()),
        },
        collaborators,
        generate_mac_key(),
        Arc::new(clock.clone()),
    )
    .expect("Core initialization failed");

    let identity_document = core
        .visit_service
        .upload_document(b"driver licence front".to_vec())
        .await
        .expect("Identity upload failed");
    let vehicle_document = core
        .visit_service
        .upload_document(b"licence disc".to_vec())
        .await
        .expect("Vehicle upload failed");

    let request = core
        .visit_service
        .submit_request(SubmitVisitRequest {
            estate: "oak-estate".into(),
            mode: SubmissionMode::Pin {
                pin: "7391".to_string(),
            },
            travel_type: TravelType::Driver,
            documents: DocumentSubmission {
                identity_document: Some(identity_document),
                vehicle_document: Some(vehicle_document),
            },
            unit: "C3".into(),
            guest: GuestInfo {
                name: "Unknown".to_string(),
                contact: "+27825550100".to_string(),
                purpose: None,
            },
        })
        .await
        .expect("Submission failed");

    let snapshot = core
        .status_service
        .describe(&request.id)
        .await
        .expect("Status lookup failed");
    info!(status = %snapshot.status, guest = %request.guest.name, "visitor is waiting");

    clock.advance(Duration::minutes(2));
    core.visit_service
        .decide(&request.id, Decision::Grant, &"resident-c3".into())
        .await
        .expect("Decision failed");

    let snapshot = core
        .status_service
        .describe(&request.id)
        .await
        .expect("Status lookup failed");
    let Some(token) = snapshot.credential.and_then(|credential| credential.token) else {
        println!("No gate pass issued");
        return;
    };

    clock.advance(Duration::minutes(10));
    for scanner in ["north gate", "south gate"] {
        match core
            .visit_service
            .present_credential(&token)
            .await
            .expect("Presentation failed")
        {
            PresentationOutcome::Admit(admitted) => {
                println!("{scanner}: admit {} to unit {}", admitted.guest_name, admitted.unit)
            }
            PresentationOutcome::Reject(reason) => {
                println!("{scanner}: {}", reason.operator_message())
            }
        }
    }
}
