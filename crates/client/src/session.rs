use std::sync::{Arc, Mutex, RwLock};

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use shared_types::{AuthResponse, AuthUser};

/// Client-side session lifetime, mirrored from the backend's token policy.
const SESSION_TTL_DAYS: i64 = 30;

/// The full authenticated session: both tokens, the mirrored expiry, and the
/// cached user profile so the UI can restore itself without a round trip.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub access_token: String,
    pub refresh_token: Option<String>,
    pub expires_at: DateTime<Utc>,
    pub user: AuthUser,
}

impl Session {
    pub fn from_auth_response(resp: &AuthResponse) -> Self {
        Self {
            access_token: resp.token.clone(),
            refresh_token: resp.refresh_token.clone(),
            expires_at: Utc::now() + Duration::days(SESSION_TTL_DAYS),
            user: resp.user(),
        }
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now > self.expires_at
    }
}

/// Durable storage behind the session context. The app supplies browser
/// local storage on wasm; everything else (and every test) uses memory.
pub trait SessionStore: Send + Sync {
    fn load(&self) -> Option<Session>;
    fn save(&self, session: &Session);
    fn clear(&self);
}

#[derive(Default)]
pub struct MemorySessionStore {
    inner: Mutex<Option<Session>>,
}

impl SessionStore for MemorySessionStore {
    fn load(&self) -> Option<Session> {
        self.inner.lock().expect("session store poisoned").clone()
    }

    fn save(&self, session: &Session) {
        *self.inner.lock().expect("session store poisoned") = Some(session.clone());
    }

    fn clear(&self) {
        *self.inner.lock().expect("session store poisoned") = None;
    }
}

/// Explicit, injected session state — there is deliberately no ambient
/// global. Populated at login/signup, rewritten on refresh, cleared at
/// logout or when a refresh fails. Cheap to clone; clones share state.
#[derive(Clone)]
pub struct SessionContext {
    current: Arc<RwLock<Option<Session>>>,
    store: Arc<dyn SessionStore>,
}

impl SessionContext {
    /// Restore from the store at startup; an expired persisted session is
    /// discarded rather than restored.
    pub fn new(store: Arc<dyn SessionStore>) -> Self {
        let restored = store.load().filter(|s| !s.is_expired(Utc::now()));
        if restored.is_none() {
            store.clear();
        }
        Self {
            current: Arc::new(RwLock::new(restored)),
            store,
        }
    }

    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemorySessionStore::default()))
    }

    /// Install a fresh session after login/signup and persist it.
    pub fn establish(&self, resp: &AuthResponse) -> Session {
        let session = Session::from_auth_response(resp);
        self.store.save(&session);
        *self.current.write().expect("session lock poisoned") = Some(session.clone());
        session
    }

    /// Swap in a new access token after a successful refresh.
    pub fn update_access_token(&self, token: &str) {
        let mut guard = self.current.write().expect("session lock poisoned");
        if let Some(session) = guard.as_mut() {
            session.access_token = token.to_string();
            self.store.save(session);
        }
    }

    /// Replace the cached profile after `GET /auth/me`.
    pub fn update_user(&self, user: AuthUser) {
        let mut guard = self.current.write().expect("session lock poisoned");
        if let Some(session) = guard.as_mut() {
            session.user = user;
            self.store.save(session);
        }
    }

    pub fn clear(&self) {
        *self.current.write().expect("session lock poisoned") = None;
        self.store.clear();
    }

    pub fn access_token(&self) -> Option<String> {
        self.current
            .read()
            .expect("session lock poisoned")
            .as_ref()
            .map(|s| s.access_token.clone())
    }

    pub fn refresh_token(&self) -> Option<String> {
        self.current
            .read()
            .expect("session lock poisoned")
            .as_ref()
            .and_then(|s| s.refresh_token.clone())
    }

    pub fn user(&self) -> Option<AuthUser> {
        self.current
            .read()
            .expect("session lock poisoned")
            .as_ref()
            .map(|s| s.user.clone())
    }

    pub fn is_authenticated(&self) -> bool {
        self.current
            .read()
            .expect("session lock poisoned")
            .is_some()
    }
}
