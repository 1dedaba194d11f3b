//! The 401-refresh-retry path: one refresh per burst, session cleared when
//! the refresh itself is rejected.

use std::sync::atomic::Ordering;
use std::sync::Arc;

use client::PlateApi;
use futures::future::join_all;
use pretty_assertions::assert_eq;

use crate::common::{api_client, plate_json, seed_session, spawn_backend, MockState};

#[tokio::test]
async fn stale_token_is_refreshed_and_the_request_replayed() {
    let state = Arc::new(MockState::default());
    state
        .plates
        .lock()
        .unwrap()
        .push(plate_json(1, "1กข234", "2024-03-10T08:00:00Z"));
    let backend = spawn_backend(state.clone()).await;
    let (client, session) = api_client(&backend.base_url);
    seed_session(&session, "stale", "refresh-1");

    let api = PlateApi::new(client);
    let records = api.latest(10).await.expect("replay after refresh");

    assert_eq!(records.len(), 1);
    assert_eq!(records[0].plate_number, "1กข234");
    assert_eq!(state.refresh_calls.load(Ordering::SeqCst), 1);
    assert_eq!(session.access_token().as_deref(), Some("tok-2"));
}

#[tokio::test]
async fn concurrent_unauthorized_requests_share_one_refresh() {
    let state = Arc::new(MockState::default());
    state
        .plates
        .lock()
        .unwrap()
        .push(plate_json(1, "1กข234", "2024-03-10T08:00:00Z"));
    // Widen the window so all three requests hit 401 while the refresh is
    // still in flight.
    state.refresh_delay_ms.store(150, Ordering::SeqCst);
    let backend = spawn_backend(state.clone()).await;
    let (client, session) = api_client(&backend.base_url);
    seed_session(&session, "stale", "refresh-1");

    let api = PlateApi::new(client);
    let results = join_all((0..3).map(|_| api.latest(10))).await;

    for result in results {
        assert_eq!(result.expect("all replays succeed").len(), 1);
    }
    assert_eq!(state.refresh_calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn rejected_refresh_clears_the_session() {
    let state = Arc::new(MockState::default());
    let backend = spawn_backend(state.clone()).await;
    let (client, session) = api_client(&backend.base_url);
    seed_session(&session, "stale", "bad-refresh");

    let api = PlateApi::new(client);
    let err = api.latest(10).await.unwrap_err();

    assert!(err.is_unauthorized());
    assert!(!session.is_authenticated());
    assert_eq!(state.refresh_calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn unauthenticated_request_is_not_retried() {
    let state = Arc::new(MockState::default());
    let backend = spawn_backend(state.clone()).await;
    let (client, _session) = api_client(&backend.base_url);

    let api = PlateApi::new(client);
    let err = api.latest(10).await.unwrap_err();

    assert!(err.is_unauthorized());
    assert_eq!(state.refresh_calls.load(Ordering::SeqCst), 0);
}
