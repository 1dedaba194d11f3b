//! User administration: roster listing, creation, role changes, deletion.

use std::sync::Arc;

use client::AuthApi;
use pretty_assertions::assert_eq;
use serde_json::json;
use shared_types::{AppErrorKind, CreateUserRequest, UpdateRoleRequest, UserRole};

use crate::common::{api_client, seed_session, spawn_backend, MockBackend, MockState};

async fn authed_backend(state: Arc<MockState>) -> (MockBackend, AuthApi) {
    let backend = spawn_backend(state).await;
    let (client, session) = api_client(&backend.base_url);
    seed_session(&session, "tok-1", "refresh-1");
    (backend, AuthApi::new(client))
}

fn seed_users(state: &MockState) {
    let mut users = state.users.lock().unwrap();
    users.push(json!({"id": 1, "username": "admin", "role": "admin"}));
    users.push(json!({"id": 5, "username": "somchai", "role": "member"}));
}

#[tokio::test]
async fn users_lists_the_roster_with_parsed_roles() {
    let state = MockState::with_token("tok-1");
    seed_users(&state);
    // Role strings the client has never heard of degrade to member.
    state
        .users
        .lock()
        .unwrap()
        .push(json!({"id": 9, "username": "pim", "role": "moderator"}));
    let (_backend, auth) = authed_backend(state).await;

    let users = auth.users().await.expect("roster");

    assert_eq!(users.len(), 3);
    assert!(users[0].role.is_admin());
    assert_eq!(users[1].role, UserRole::Member);
    assert_eq!(users[2].role, UserRole::Member);
}

#[tokio::test]
async fn create_user_appends_to_the_roster() {
    let state = MockState::with_token("tok-1");
    let (backend, auth) = authed_backend(state).await;

    let created = auth
        .create_user(&CreateUserRequest {
            username: "newcomer".to_string(),
            password: "longenough".to_string(),
            confirm_password: "longenough".to_string(),
            role: UserRole::Member,
            email: Some("newcomer@example.com".to_string()),
        })
        .await
        .expect("create");

    assert_eq!(created.id, 100);
    assert_eq!(created.username, "newcomer");
    assert_eq!(backend.state.users.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn create_user_validates_locally_first() {
    // Unreachable backend: failures below must come from local checks.
    let (client, _session) = api_client("http://127.0.0.1:1");
    let auth = AuthApi::new(client);

    let short = CreateUserRequest {
        username: "newcomer".to_string(),
        password: "short".to_string(),
        confirm_password: "short".to_string(),
        role: UserRole::Member,
        email: None,
    };
    let err = auth.create_user(&short).await.unwrap_err();
    assert_eq!(err.kind, AppErrorKind::Validation);
    assert!(err.field_errors.contains_key("password"));

    let mismatched = CreateUserRequest {
        username: "newcomer".to_string(),
        password: "longenough".to_string(),
        confirm_password: "different-one".to_string(),
        role: UserRole::Member,
        email: None,
    };
    let err = auth.create_user(&mismatched).await.unwrap_err();
    assert_eq!(err.kind, AppErrorKind::Validation);
    assert_eq!(err.message, "Passwords do not match");
}

#[tokio::test]
async fn update_role_rewrites_the_stored_role() {
    let state = MockState::with_token("tok-1");
    seed_users(&state);
    let (backend, auth) = authed_backend(state).await;

    auth.update_role(&UpdateRoleRequest {
        user_id: 5,
        role: UserRole::Admin,
    })
    .await
    .expect("role update");

    let users = backend.state.users.lock().unwrap().clone();
    assert_eq!(users[1]["role"], "admin");
}

#[tokio::test]
async fn updating_an_unknown_user_is_not_found() {
    let state = MockState::with_token("tok-1");
    let (_backend, auth) = authed_backend(state).await;

    let err = auth
        .update_role(&UpdateRoleRequest {
            user_id: 999,
            role: UserRole::Admin,
        })
        .await
        .unwrap_err();

    assert_eq!(err.kind, AppErrorKind::NotFound);
    assert_eq!(err.message, "User not found");
}

#[tokio::test]
async fn delete_user_removes_only_the_target() {
    let state = MockState::with_token("tok-1");
    seed_users(&state);
    let (backend, auth) = authed_backend(state).await;

    auth.delete_user(5).await.expect("delete");

    let users = backend.state.users.lock().unwrap().clone();
    assert_eq!(users.len(), 1);
    assert_eq!(users[0]["username"], "admin");
}
