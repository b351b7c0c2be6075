use std::sync::Arc;

use time::{macros::datetime, Duration, OffsetDateTime};

use super::InMemoryVisitRequestStorage;
use crate::common_models::visit::{
    GuestInfo, TravelType, VisitMode, VisitRequest, VisitRequestId, VisitStatus,
};
use crate::visit_request_storage::{
    error::VisitRequestStorageError,
    model::{CasOutcome, VisitRequestFilter},
    VisitRequestStorage,
};

fn visit_request(estate: &str, resident: &str, created_at: OffsetDateTime) -> VisitRequest {
    VisitRequest {
        id: VisitRequestId::new_random(),
        estate: estate.into(),
        mode: VisitMode::Qr,
        travel_type: TravelType::Pedestrian,
        documents: None,
        unit: "B12".into(),
        guest: GuestInfo {
            name: "Thandi".to_string(),
            contact: "+27821234567".to_string(),
            purpose: None,
        },
        resident: resident.into(),
        resident_name: None,
        status: VisitStatus::Pending,
        created_at,
        decided_at: None,
        decided_by: None,
        expires_at: created_at + Duration::hours(24),
        version: 0,
    }
}

#[tokio::test]
async fn test_create_and_get() {
    let storage = InMemoryVisitRequestStorage::new();
    let request = visit_request("estate", "r1", datetime!(2026-01-10 09:00 UTC));

    storage.create(request.clone()).await.unwrap();

    assert_eq!(storage.get(&request.id).await.unwrap(), Some(request));
    assert_eq!(
        storage.get(&VisitRequestId::new_random()).await.unwrap(),
        None
    );
}

#[tokio::test]
async fn test_create_refuses_duplicate_id() {
    let storage = InMemoryVisitRequestStorage::new();
    let request = visit_request("estate", "r1", datetime!(2026-01-10 09:00 UTC));

    storage.create(request.clone()).await.unwrap();
    let result = storage.create(request.clone()).await;

    assert!(matches!(
        result,
        Err(VisitRequestStorageError::AlreadyExists(id)) if id == request.id
    ));
}

#[tokio::test]
async fn test_compare_and_swap_bumps_version() {
    let storage = InMemoryVisitRequestStorage::new();
    let request = visit_request("estate", "r1", datetime!(2026-01-10 09:00 UTC));
    storage.create(request.clone()).await.unwrap();

    let mut updated = request.clone();
    updated.status = VisitStatus::Denied;
    let outcome = storage.compare_and_swap(0, updated).await.unwrap();

    let CasOutcome::Swapped(stored) = outcome else {
        panic!("expected swap, got {outcome:?}");
    };
    assert_eq!(stored.version, 1);
    assert_eq!(stored.status, VisitStatus::Denied);
    assert_eq!(storage.get(&request.id).await.unwrap(), Some(stored));
}

#[tokio::test]
async fn test_stale_compare_and_swap_reports_current_record() {
    let storage = InMemoryVisitRequestStorage::new();
    let request = visit_request("estate", "r1", datetime!(2026-01-10 09:00 UTC));
    storage.create(request.clone()).await.unwrap();

    let mut denied = request.clone();
    denied.status = VisitStatus::Denied;
    storage.compare_and_swap(0, denied).await.unwrap();

    let mut granted = request.clone();
    granted.status = VisitStatus::Granted;
    let outcome = storage.compare_and_swap(0, granted).await.unwrap();

    let CasOutcome::Conflict(current) = outcome else {
        panic!("expected conflict, got {outcome:?}");
    };
    assert_eq!(current.status, VisitStatus::Denied);
    assert_eq!(current.version, 1);
}

#[tokio::test]
async fn test_compare_and_swap_on_unknown_record() {
    let storage = InMemoryVisitRequestStorage::new();
    let request = visit_request("estate", "r1", datetime!(2026-01-10 09:00 UTC));

    let result = storage.compare_and_swap(0, request).await;

    assert!(matches!(result, Err(VisitRequestStorageError::NotFound(_))));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_compare_and_swap_has_single_winner() {
    let storage = Arc::new(InMemoryVisitRequestStorage::new());
    let request = visit_request("estate", "r1", datetime!(2026-01-10 09:00 UTC));
    storage.create(request.clone()).await.unwrap();

    let attempts = (0..16).map(|i| {
        let storage = storage.clone();
        let mut updated = request.clone();
        updated.status = if i % 2 == 0 {
            VisitStatus::Granted
        } else {
            VisitStatus::Denied
        };
        tokio::spawn(async move { storage.compare_and_swap(0, updated).await })
    });

    let outcomes = futures::future::join_all(attempts).await;
    let swapped = outcomes
        .into_iter()
        .map(|joined| joined.unwrap().unwrap())
        .filter(|outcome| matches!(outcome, CasOutcome::Swapped(_)))
        .count();

    assert_eq!(swapped, 1);
    assert_eq!(storage.get(&request.id).await.unwrap().unwrap().version, 1);
}

#[tokio::test]
async fn test_list_filters_and_orders_newest_first() {
    let storage = InMemoryVisitRequestStorage::new();
    let older = visit_request("estate", "r1", datetime!(2026-01-10 09:00 UTC));
    let newer = visit_request("estate", "r1", datetime!(2026-01-10 11:00 UTC));
    let other_resident = visit_request("estate", "r2", datetime!(2026-01-10 10:00 UTC));
    let other_estate = visit_request("elsewhere", "r1", datetime!(2026-01-10 12:00 UTC));
    for request in [&older, &newer, &other_resident, &other_estate] {
        storage.create(request.clone()).await.unwrap();
    }

    let for_resident = storage
        .list(VisitRequestFilter {
            estate: Some("estate".into()),
            resident: Some("r1".into()),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(
        for_resident.iter().map(|r| r.id).collect::<Vec<_>>(),
        vec![newer.id, older.id]
    );

    let limited = storage
        .list(VisitRequestFilter {
            estate: Some("estate".into()),
            limit: Some(2),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(
        limited.iter().map(|r| r.id).collect::<Vec<_>>(),
        vec![newer.id, other_resident.id]
    );

    let expiring = storage
        .list(VisitRequestFilter {
            stored_status: Some(VisitStatus::Pending),
            expires_before: Some(datetime!(2026-01-11 10:30 UTC)),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(
        expiring.iter().map(|r| r.id).collect::<Vec<_>>(),
        vec![other_resident.id, older.id]
    );
}
