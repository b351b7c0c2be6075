//! Periodic persistence of lazily computed expiry.
//!
//! Readers already treat a PENDING request past its window as EXPIRED, so a
//! slow or stopped sweep only delays document release.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, warn};

use crate::service::visit_service::VisitService;

const MIN_INTERVAL: Duration = Duration::from_millis(1);

/// Runs [`VisitService::sweep_expired`] every `interval` until the handle is
/// aborted. A failed pass is logged and retried on the next tick.
pub fn spawn_expiry_sweep(visit_service: Arc<VisitService>, interval: Duration) -> JoinHandle<()> {
    if interval < MIN_INTERVAL {
        warn!(?interval, "expiry sweep interval too short, using {MIN_INTERVAL:?}");
    }
    let interval = interval.max(MIN_INTERVAL);

    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            ticker.tick().await;

            match visit_service.sweep_expired().await {
                Ok(expired) => debug!(expired, "expiry sweep pass finished"),
                Err(error) => warn!(%error, "expiry sweep pass failed"),
            }
        }
    })
}

#[cfg(test)]
mod test {
    use std::sync::Arc;

    use estate_crypto::imp::mac::HmacSha256Mac;
    use estate_providers::{
        access_credential_storage::imp::in_memory::InMemoryAccessCredentialStorage,
        clock::imp::ManualClock,
        common_models::{
            document::DocumentSubmission,
            resident::ResidentRecord,
            visit::{GuestInfo, TravelType, VisitStatus},
        },
        credential_codec::imp::hmac::HmacCredentialCodec,
        document_storage::imp::in_memory::InMemoryDocumentStorage,
        notification::imp::tracing_dispatcher::TracingNotificationDispatcher,
        pin_validation::imp::static_pins::StaticPinValidator,
        resident_directory::imp::static_directory::StaticResidentDirectory,
        visit_request_storage::{imp::in_memory::InMemoryVisitRequestStorage, VisitRequestStorage},
    };
    use time::macros::datetime;
    use zeroize::Zeroizing;

    use super::*;
    use crate::config::VisitConfig;
    use crate::service::visit_service::{
        dto::{SubmissionMode, SubmitVisitRequest},
        Collaborators, VisitStores,
    };

    #[tokio::test]
    async fn test_background_sweep_persists_expiry_with_zero_interval() {
        let clock = ManualClock::new(datetime!(2026-01-10 06:00 UTC));
        let visit_requests = Arc::new(InMemoryVisitRequestStorage::new());
        let document_storage = Arc::new(InMemoryDocumentStorage::new());
        let mac = HmacSha256Mac::new(Zeroizing::new(vec![11; 32])).unwrap();

        let visit_service = Arc::new(VisitService::new(
            VisitStores {
                visit_requests: visit_requests.clone(),
                access_credentials: Arc::new(InMemoryAccessCredentialStorage::new()),
            },
            Collaborators {
                pin_validator: Arc::new(StaticPinValidator::new()),
                resident_directory: Arc::new(StaticResidentDirectory::new().with_resident(
                    "elm-estate".into(),
                    "7".into(),
                    ResidentRecord {
                        reference: "resident-7".into(),
                        display_name: None,
                    },
                )),
                document_storage: document_storage.clone(),
                notification_dispatcher: Arc::new(TracingNotificationDispatcher),
            },
            Arc::new(HmacCredentialCodec::new(Arc::new(mac))),
            Arc::new(clock.clone()),
            VisitConfig::default(),
        ));

        let identity_document = visit_service
            .upload_document(b"id".to_vec())
            .await
            .unwrap();
        let request = visit_service
            .submit_request(SubmitVisitRequest {
                estate: "elm-estate".into(),
                mode: SubmissionMode::Qr,
                travel_type: TravelType::Pedestrian,
                documents: DocumentSubmission {
                    identity_document: Some(identity_document.clone()),
                    vehicle_document: None,
                },
                unit: "7".into(),
                guest: GuestInfo {
                    name: "Naledi".to_string(),
                    contact: "+27830000000".to_string(),
                    purpose: None,
                },
            })
            .await
            .unwrap();

        clock.advance(time::Duration::days(2));
        let handle = spawn_expiry_sweep(visit_service, Duration::ZERO);

        let stored = tokio::time::timeout(Duration::from_secs(5), async {
            loop {
                let stored = visit_requests.get(&request.id).await.unwrap().unwrap();
                if stored.status == VisitStatus::Expired
                    && !document_storage.contains(&identity_document).await
                {
                    break stored;
                }
                tokio::time::sleep(Duration::from_millis(5)).await;
            }
        })
        .await
        .expect("sweep never ran");
        assert!(!handle.is_finished());
        handle.abort();

        assert_eq!(stored.documents, None);
    }
}
