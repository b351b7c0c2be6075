use std::sync::Arc;

use time::{macros::datetime, Duration, OffsetDateTime};

use super::InMemoryAccessCredentialStorage;
use crate::access_credential_storage::{
    error::AccessCredentialStorageError, model::ConsumeOutcome, AccessCredentialStorage,
};
use crate::common_models::{
    access_credential::{AccessCredential, AccessCredentialId},
    visit::VisitRequestId,
};

const ISSUED_AT: OffsetDateTime = datetime!(2026-02-02 14:00 UTC);

fn credential(visit_request_id: VisitRequestId) -> AccessCredential {
    AccessCredential {
        id: AccessCredentialId::new_random(),
        visit_request_id,
        token: "token".to_string(),
        issued_at: ISSUED_AT,
        valid_until: ISSUED_AT + Duration::hours(2),
        consumed: false,
        consumed_at: None,
    }
}

#[tokio::test]
async fn test_second_credential_for_same_visit_is_refused() {
    let storage = InMemoryAccessCredentialStorage::new();
    let visit_request_id = VisitRequestId::new_random();

    storage.create(credential(visit_request_id)).await.unwrap();
    let result = storage.create(credential(visit_request_id)).await;

    assert!(matches!(
        result,
        Err(AccessCredentialStorageError::AlreadyIssued(id)) if id == visit_request_id
    ));
    assert_eq!(
        storage
            .count_by_visit_request(&visit_request_id)
            .await
            .unwrap(),
        1
    );
}

#[tokio::test]
async fn test_get_by_visit_request() {
    let storage = InMemoryAccessCredentialStorage::new();
    let issued = credential(VisitRequestId::new_random());
    storage.create(issued.clone()).await.unwrap();

    assert_eq!(
        storage
            .get_by_visit_request(&issued.visit_request_id)
            .await
            .unwrap(),
        Some(issued)
    );
    assert_eq!(
        storage
            .get_by_visit_request(&VisitRequestId::new_random())
            .await
            .unwrap(),
        None
    );
}

#[tokio::test]
async fn test_consume_happens_once() {
    let storage = InMemoryAccessCredentialStorage::new();
    let issued = credential(VisitRequestId::new_random());
    storage.create(issued.clone()).await.unwrap();
    let now = ISSUED_AT + Duration::minutes(10);

    let first = storage.consume(&issued.id, now).await.unwrap();
    let second = storage
        .consume(&issued.id, now + Duration::minutes(1))
        .await
        .unwrap();

    let ConsumeOutcome::Consumed(consumed) = first else {
        panic!("expected consumption, got {first:?}");
    };
    assert!(consumed.consumed);
    assert_eq!(consumed.consumed_at, Some(now));

    let ConsumeOutcome::AlreadyConsumed(unchanged) = second else {
        panic!("expected already consumed, got {second:?}");
    };
    assert_eq!(unchanged.consumed_at, Some(now));
}

#[tokio::test]
async fn test_expired_credential_is_left_untouched() {
    let storage = InMemoryAccessCredentialStorage::new();
    let issued = credential(VisitRequestId::new_random());
    storage.create(issued.clone()).await.unwrap();

    let outcome = storage
        .consume(&issued.id, ISSUED_AT + Duration::hours(2) + Duration::seconds(1))
        .await
        .unwrap();

    assert_eq!(outcome, ConsumeOutcome::Expired(issued.clone()));
    assert_eq!(
        storage
            .get_by_visit_request(&issued.visit_request_id)
            .await
            .unwrap(),
        Some(issued)
    );
}

#[tokio::test]
async fn test_consume_unknown_credential() {
    let storage = InMemoryAccessCredentialStorage::new();

    let result = storage
        .consume(&AccessCredentialId::new_random(), ISSUED_AT)
        .await;

    assert!(matches!(
        result,
        Err(AccessCredentialStorageError::NotFound(_))
    ));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_consume_has_single_winner() {
    let storage = Arc::new(InMemoryAccessCredentialStorage::new());
    let issued = credential(VisitRequestId::new_random());
    storage.create(issued.clone()).await.unwrap();

    let attempts = (0..32).map(|_| {
        let storage = storage.clone();
        let id = issued.id;
        tokio::spawn(async move { storage.consume(&id, ISSUED_AT).await })
    });

    let outcomes: Vec<_> = futures::future::join_all(attempts)
        .await
        .into_iter()
        .map(|joined| joined.unwrap().unwrap())
        .collect();

    let consumed = outcomes
        .iter()
        .filter(|outcome| matches!(outcome, ConsumeOutcome::Consumed(_)))
        .count();
    let already = outcomes
        .iter()
        .filter(|outcome| matches!(outcome, ConsumeOutcome::AlreadyConsumed(_)))
        .count();

    assert_eq!(consumed, 1);
    assert_eq!(already, 31);
}
