use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use axum::extract::{Path, Query, State};
use axum::http::{header, HeaderMap, StatusCode};
use axum::routing::{delete, get, post};
use axum::{Json, Router};
use client::{ApiClient, ApiConfig, SessionContext};
use serde_json::{json, Value};
use shared_types::{AuthResponse, UserRole};

/// Shared, mutable state behind the mock backend. Tests seed it directly and
/// inspect it after driving the client.
#[derive(Default)]
pub struct MockState {
    /// Tokens the backend currently accepts.
    pub valid_tokens: Mutex<HashSet<String>>,
    /// How many times the refresh endpoint was hit.
    pub refresh_calls: AtomicUsize,
    /// Artificial delay inside the refresh handler, to widen race windows.
    pub refresh_delay_ms: AtomicU64,
    pub plates: Mutex<Vec<Value>>,
    pub candidates: Mutex<Vec<Value>>,
    pub users: Mutex<Vec<Value>>,
    /// Query parameters of the most recent `/plates/search` call.
    pub last_search: Mutex<Option<HashMap<String, String>>>,
}

impl MockState {
    pub fn with_token(token: &str) -> Arc<Self> {
        let state = Self::default();
        state.valid_tokens.lock().unwrap().insert(token.to_string());
        Arc::new(state)
    }

    fn token_is_valid(&self, headers: &HeaderMap) -> bool {
        let Some(token) = bearer(headers) else {
            return false;
        };
        self.valid_tokens.lock().unwrap().contains(&token)
    }
}

pub struct MockBackend {
    pub base_url: String,
    pub state: Arc<MockState>,
}

/// Bind the mock backend to an ephemeral port and serve it in the
/// background for the remainder of the test.
pub async fn spawn_backend(state: Arc<MockState>) -> MockBackend {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("failed to bind mock backend");
    let addr = listener.local_addr().expect("mock backend has no address");
    let app = router(state.clone());
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("mock backend died");
    });
    MockBackend {
        base_url: format!("http://{addr}"),
        state,
    }
}

/// A client plus its session context, pointed at the mock backend.
pub fn api_client(base_url: &str) -> (ApiClient, SessionContext) {
    let session = SessionContext::in_memory();
    let client = ApiClient::new(ApiConfig::with_base_url(base_url), session.clone());
    (client, session)
}

/// Install an admin session holding the given tokens.
pub fn seed_session(session: &SessionContext, access: &str, refresh: &str) {
    session.establish(&AuthResponse {
        token: access.to_string(),
        refresh_token: Some(refresh.to_string()),
        id: 1,
        username: "admin".to_string(),
        email: None,
        role: UserRole::Admin,
    });
}

/// A backend plate row in the canonical field spelling.
pub fn plate_json(id: i64, plate_number: &str, timestamp: &str) -> Value {
    json!({
        "id": id,
        "plate_number": plate_number,
        "province": "กรุงเทพมหานคร",
        "camera_id": 1,
        "timestamp": timestamp,
    })
}

fn bearer(headers: &HeaderMap) -> Option<String> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::to_string)
}

fn unauthorized() -> (StatusCode, Json<Value>) {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({"detail": "Not authenticated"})),
    )
}

fn router(state: Arc<MockState>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/auth/login", post(login))
        .route("/auth/signup", post(signup))
        .route("/auth/logout", post(logout))
        .route("/auth/refresh_token", post(refresh_token))
        .route("/auth/me", get(me))
        .route("/auth/users", get(list_users))
        .route("/auth/update-role", post(update_role))
        .route("/auth/create-user", post(create_user))
        .route("/auth/delete-user", post(delete_user))
        .route("/plates", get(list_plates).post(add_plate))
        .route("/plates/search", get(search_plates))
        .route("/plates/candidates", get(list_candidates))
        .route("/plates/candidates/{id}/verify", post(verify_candidate))
        .route("/plates/candidates/{id}", delete(reject_candidate))
        .route("/plates/{id}", delete(delete_plate))
        .route("/cameras", get(list_cameras))
        .route("/provinces", get(list_provinces))
        .with_state(state)
}

async fn health() -> Json<Value> {
    Json(json!({"status": "ok"}))
}

async fn login(
    State(state): State<Arc<MockState>>,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    if body["password"] == "password" {
        state
            .valid_tokens
            .lock()
            .unwrap()
            .insert("tok-1".to_string());
        (
            StatusCode::OK,
            Json(json!({
                "token": "tok-1",
                "refresh_token": "refresh-1",
                "id": 1,
                "username": body["username"],
                "role": "admin",
            })),
        )
    } else {
        (
            StatusCode::UNAUTHORIZED,
            Json(json!({"detail": "Invalid username or password"})),
        )
    }
}

async fn signup(
    State(state): State<Arc<MockState>>,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    state
        .valid_tokens
        .lock()
        .unwrap()
        .insert("tok-new".to_string());
    (
        StatusCode::OK,
        Json(json!({
            "token": "tok-new",
            "refresh_token": "refresh-new",
            "id": 7,
            "username": body["username"],
            "role": "member",
        })),
    )
}

async fn logout() -> Json<Value> {
    Json(json!({"status": "ok"}))
}

async fn refresh_token(
    State(state): State<Arc<MockState>>,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    let delay = state.refresh_delay_ms.load(Ordering::SeqCst);
    if delay > 0 {
        tokio::time::sleep(std::time::Duration::from_millis(delay)).await;
    }
    state.refresh_calls.fetch_add(1, Ordering::SeqCst);
    if body["refresh_token"] == "refresh-1" {
        state
            .valid_tokens
            .lock()
            .unwrap()
            .insert("tok-2".to_string());
        (StatusCode::OK, Json(json!({"access_token": "tok-2"})))
    } else {
        (
            StatusCode::UNAUTHORIZED,
            Json(json!({"detail": "Refresh token rejected"})),
        )
    }
}

async fn me(
    State(state): State<Arc<MockState>>,
    headers: HeaderMap,
) -> (StatusCode, Json<Value>) {
    if !state.token_is_valid(&headers) {
        return unauthorized();
    }
    (
        StatusCode::OK,
        Json(json!({"id": 1, "username": "admin", "role": "admin"})),
    )
}

async fn list_users(
    State(state): State<Arc<MockState>>,
    headers: HeaderMap,
) -> (StatusCode, Json<Value>) {
    if !state.token_is_valid(&headers) {
        return unauthorized();
    }
    let users = state.users.lock().unwrap().clone();
    (StatusCode::OK, Json(Value::Array(users)))
}

async fn update_role(
    State(state): State<Arc<MockState>>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    if !state.token_is_valid(&headers) {
        return unauthorized();
    }
    let mut users = state.users.lock().unwrap();
    for user in users.iter_mut() {
        if user["id"] == body["user_id"] {
            user["role"] = body["role"].clone();
            return (StatusCode::OK, Json(json!({"status": "ok"})));
        }
    }
    (
        StatusCode::NOT_FOUND,
        Json(json!({"detail": "User not found"})),
    )
}

async fn create_user(
    State(state): State<Arc<MockState>>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    if !state.token_is_valid(&headers) {
        return unauthorized();
    }
    let mut users = state.users.lock().unwrap();
    let id = users.len() as i64 + 100;
    let user = json!({
        "id": id,
        "username": body["username"],
        "email": body["email"],
        "role": body["role"],
    });
    users.push(user.clone());
    (StatusCode::OK, Json(user))
}

async fn delete_user(
    State(state): State<Arc<MockState>>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    if !state.token_is_valid(&headers) {
        return unauthorized();
    }
    state
        .users
        .lock()
        .unwrap()
        .retain(|u| u["id"] != body["user_id"]);
    (StatusCode::OK, Json(json!({"status": "ok"})))
}

async fn list_plates(
    State(state): State<Arc<MockState>>,
    headers: HeaderMap,
) -> (StatusCode, Json<Value>) {
    if !state.token_is_valid(&headers) {
        return unauthorized();
    }
    let plates = state.plates.lock().unwrap().clone();
    (StatusCode::OK, Json(Value::Array(plates)))
}

async fn search_plates(
    State(state): State<Arc<MockState>>,
    headers: HeaderMap,
    Query(params): Query<HashMap<String, String>>,
) -> (StatusCode, Json<Value>) {
    if !state.token_is_valid(&headers) {
        return unauthorized();
    }
    let term = params.get("search_term").cloned();
    *state.last_search.lock().unwrap() = Some(params);
    let plates: Vec<Value> = state
        .plates
        .lock()
        .unwrap()
        .iter()
        .filter(|p| match &term {
            Some(t) => p["plate_number"]
                .as_str()
                .map(|s| s.contains(t.as_str()))
                .unwrap_or(false),
            None => true,
        })
        .cloned()
        .collect();
    (StatusCode::OK, Json(Value::Array(plates)))
}

async fn add_plate(
    State(state): State<Arc<MockState>>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    if !state.token_is_valid(&headers) {
        return unauthorized();
    }
    let mut plates = state.plates.lock().unwrap();
    let id = plates.len() as i64 + 1000;
    let mut plate = body;
    plate["id"] = json!(id);
    plate["timestamp"] = json!("2024-03-10T12:00:00Z");
    plates.push(plate.clone());
    (StatusCode::OK, Json(plate))
}

async fn delete_plate(
    State(state): State<Arc<MockState>>,
    headers: HeaderMap,
    Path(id): Path<i64>,
) -> (StatusCode, Json<Value>) {
    if !state.token_is_valid(&headers) {
        return unauthorized();
    }
    state.plates.lock().unwrap().retain(|p| p["id"] != id);
    (StatusCode::OK, Json(json!({"status": "ok"})))
}

async fn list_candidates(
    State(state): State<Arc<MockState>>,
    headers: HeaderMap,
) -> (StatusCode, Json<Value>) {
    if !state.token_is_valid(&headers) {
        return unauthorized();
    }
    let candidates = state.candidates.lock().unwrap().clone();
    (StatusCode::OK, Json(Value::Array(candidates)))
}

async fn verify_candidate(
    State(state): State<Arc<MockState>>,
    headers: HeaderMap,
    Path(id): Path<i64>,
) -> (StatusCode, Json<Value>) {
    if !state.token_is_valid(&headers) {
        return unauthorized();
    }
    let mut candidates = state.candidates.lock().unwrap();
    let Some(pos) = candidates.iter().position(|c| c["id"] == id) else {
        return (
            StatusCode::NOT_FOUND,
            Json(json!({"detail": "Candidate not found"})),
        );
    };
    let confirmed = candidates.remove(pos);
    state.plates.lock().unwrap().push(confirmed);
    (StatusCode::OK, Json(json!({"status": "verified"})))
}

async fn reject_candidate(
    State(state): State<Arc<MockState>>,
    headers: HeaderMap,
    Path(id): Path<i64>,
) -> (StatusCode, Json<Value>) {
    if !state.token_is_valid(&headers) {
        return unauthorized();
    }
    let mut candidates = state.candidates.lock().unwrap();
    let Some(pos) = candidates.iter().position(|c| c["id"] == id) else {
        return (
            StatusCode::NOT_FOUND,
            Json(json!({"detail": "Candidate not found"})),
        );
    };
    candidates.remove(pos);
    (StatusCode::OK, Json(json!({"status": "rejected"})))
}

async fn list_cameras(
    State(state): State<Arc<MockState>>,
    headers: HeaderMap,
) -> (StatusCode, Json<Value>) {
    if !state.token_is_valid(&headers) {
        return unauthorized();
    }
    (
        StatusCode::OK,
        Json(json!([
            {"id": 1, "name": "Gate A"},
            {"id": 2, "name": "Gate B", "location": "North entrance"},
        ])),
    )
}

async fn list_provinces(
    State(state): State<Arc<MockState>>,
    headers: HeaderMap,
) -> (StatusCode, Json<Value>) {
    if !state.token_is_valid(&headers) {
        return unauthorized();
    }
    (
        StatusCode::OK,
        Json(json!(["กรุงเทพมหานคร", "เชียงใหม่"])),
    )
}
