//! Login, signup and logout against the mock backend, plus the local
//! validation that keeps bad input off the wire.

use std::sync::Arc;

use client::AuthApi;
use pretty_assertions::assert_eq;
use shared_types::{AppErrorKind, SignupRequest, UserRole};

use crate::common::{api_client, seed_session, spawn_backend, MockState};

#[tokio::test]
async fn login_installs_a_full_session() {
    let backend = spawn_backend(Arc::new(MockState::default())).await;
    let (client, session) = api_client(&backend.base_url);

    let auth = AuthApi::new(client);
    let user = auth.login("  admin  ", "password").await.expect("login");

    // The username is trimmed before dispatch; the backend echoes it back.
    assert_eq!(user.username, "admin");
    assert!(user.role.is_admin());
    assert_eq!(session.access_token().as_deref(), Some("tok-1"));
    assert_eq!(session.refresh_token().as_deref(), Some("refresh-1"));
    assert!(session.is_authenticated());
}

#[tokio::test]
async fn bad_credentials_surface_the_backend_detail() {
    let backend = spawn_backend(Arc::new(MockState::default())).await;
    let (client, session) = api_client(&backend.base_url);

    let auth = AuthApi::new(client);
    let err = auth.login("admin", "wrong").await.unwrap_err();

    assert!(err.is_unauthorized());
    assert_eq!(err.message, "Invalid username or password");
    assert!(!session.is_authenticated());
}

#[tokio::test]
async fn signup_establishes_a_member_session() {
    let backend = spawn_backend(Arc::new(MockState::default())).await;
    let (client, session) = api_client(&backend.base_url);

    let auth = AuthApi::new(client);
    let request = SignupRequest {
        username: "somchai".to_string(),
        password: "longenough".to_string(),
        confirm_password: "longenough".to_string(),
        email: None,
    };
    let user = auth.signup(&request).await.expect("signup");

    assert_eq!(user.role, UserRole::Member);
    assert_eq!(session.access_token().as_deref(), Some("tok-new"));
}

#[tokio::test]
async fn signup_rejects_bad_input_before_any_request() {
    // Nothing listens here; a dispatched request would fail as Network,
    // not Validation.
    let (client, session) = api_client("http://127.0.0.1:1");

    let auth = AuthApi::new(client);
    let request = SignupRequest {
        username: "somchai".to_string(),
        password: "longenough".to_string(),
        confirm_password: "different".to_string(),
        email: None,
    };
    let err = auth.signup(&request).await.unwrap_err();

    assert_eq!(err.kind, AppErrorKind::Validation);
    assert!(err.field_errors.contains_key("confirm_password"));
    assert!(!session.is_authenticated());
}

#[tokio::test]
async fn logout_clears_the_session_even_when_the_backend_is_down() {
    let (client, session) = api_client("http://127.0.0.1:1");
    seed_session(&session, "tok-1", "refresh-1");

    AuthApi::new(client).logout().await;

    assert!(!session.is_authenticated());
    assert!(session.access_token().is_none());
}

#[tokio::test]
async fn me_refreshes_the_cached_profile() {
    let state = MockState::with_token("tok-1");
    let backend = spawn_backend(state).await;
    let (client, session) = api_client(&backend.base_url);
    seed_session(&session, "tok-1", "refresh-1");

    let auth = AuthApi::new(client);
    let user = auth.me().await.expect("profile fetch");

    assert_eq!(user.username, "admin");
    assert_eq!(session.user(), Some(user));
}
