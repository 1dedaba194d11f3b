//! The admin review workflow: listing candidates, promoting and discarding
//! them, and the queue's recovery when a backend call fails.

use std::sync::Arc;

use client::{PlateApi, ReviewQueue};
use pretty_assertions::assert_eq;
use shared_types::AppErrorKind;

use crate::common::{api_client, plate_json, seed_session, spawn_backend, MockBackend, MockState};

async fn authed_backend(state: Arc<MockState>) -> (MockBackend, PlateApi) {
    let backend = spawn_backend(state).await;
    let (client, session) = api_client(&backend.base_url);
    seed_session(&session, "tok-1", "refresh-1");
    (backend, PlateApi::new(client))
}

fn seed_candidates(state: &MockState) {
    let mut candidates = state.candidates.lock().unwrap();
    candidates.push(plate_json(41, "1กข111", "2024-03-10T08:00:00Z"));
    candidates.push(plate_json(42, "2ขค222", "2024-03-10T09:00:00Z"));
    candidates.push(plate_json(43, "3คง333", "2024-03-10T10:00:00Z"));
}

#[tokio::test]
async fn candidates_lists_pending_detections() {
    let state = MockState::with_token("tok-1");
    seed_candidates(&state);
    let (_backend, api) = authed_backend(state).await;

    let candidates = api.candidates().await.expect("candidates");

    let ids: Vec<i64> = candidates.iter().map(|c| c.id).collect();
    assert_eq!(ids, vec![41, 42, 43]);
}

#[tokio::test]
async fn verify_promotes_the_candidate_to_a_confirmed_record() {
    let state = MockState::with_token("tok-1");
    seed_candidates(&state);
    let (backend, api) = authed_backend(state).await;

    api.verify_candidate(42).await.expect("verify");

    let candidates = backend.state.candidates.lock().unwrap().clone();
    let candidate_ids: Vec<&serde_json::Value> =
        candidates.iter().map(|c| &c["id"]).collect();
    assert_eq!(candidate_ids, vec![41, 43]);

    let plates = backend.state.plates.lock().unwrap().clone();
    assert_eq!(plates.len(), 1);
    assert_eq!(plates[0]["id"], 42);
}

#[tokio::test]
async fn reject_discards_the_candidate() {
    let state = MockState::with_token("tok-1");
    seed_candidates(&state);
    let (backend, api) = authed_backend(state).await;

    api.reject_candidate(41).await.expect("reject");

    assert_eq!(backend.state.candidates.lock().unwrap().len(), 2);
    assert!(backend.state.plates.lock().unwrap().is_empty());
}

#[tokio::test]
async fn rejecting_an_unknown_candidate_is_not_found() {
    let state = MockState::with_token("tok-1");
    let (_backend, api) = authed_backend(state).await;

    let err = api.reject_candidate(999).await.unwrap_err();
    assert_eq!(err.kind, AppErrorKind::NotFound);
}

#[tokio::test]
async fn failed_verify_returns_the_row_to_pending() {
    let state = MockState::with_token("tok-1");
    seed_candidates(&state);
    // The row the queue is reviewing disappears server-side before the
    // verify lands.
    state.candidates.lock().unwrap().retain(|c| c["id"] != 42);
    let (_backend, api) = authed_backend(state).await;

    let mut queue = ReviewQueue::default();
    queue.replace(vec![
        plate_json_record(41),
        plate_json_record(42),
        plate_json_record(43),
    ]);

    assert!(queue.begin(42));
    let result = api.verify_candidate(42).await;
    assert!(result.is_err());
    queue.finish_failure(42);

    // The row is actionable again rather than stuck or dropped.
    assert_eq!(queue.len(), 3);
    assert!(!queue.is_processing(42));
    assert!(queue.begin(42));
}

fn plate_json_record(id: i64) -> shared_types::CandidateRecord {
    serde_json::from_value(plate_json(id, "1กข111", "2024-03-10T08:00:00Z"))
        .expect("candidate row deserializes")
}
