use std::sync::Arc;

use client::SessionStore;

/// Storage key for the persisted session.
#[cfg(target_arch = "wasm32")]
const SESSION_KEY: &str = "plateview.session";

/// Browser local-storage backing for the session, so a reload keeps the
/// user signed in until the 30-day expiry lapses.
#[cfg(target_arch = "wasm32")]
pub struct LocalStorageStore;

#[cfg(target_arch = "wasm32")]
impl SessionStore for LocalStorageStore {
    fn load(&self) -> Option<client::Session> {
        use gloo_storage::Storage;
        gloo_storage::LocalStorage::get(SESSION_KEY).ok()
    }

    fn save(&self, session: &client::Session) {
        use gloo_storage::Storage;
        if let Err(err) = gloo_storage::LocalStorage::set(SESSION_KEY, session) {
            tracing::warn!(%err, "failed to persist session");
        }
    }

    fn clear(&self) {
        use gloo_storage::Storage;
        gloo_storage::LocalStorage::delete(SESSION_KEY);
    }
}

/// The platform-appropriate session store.
pub fn session_store() -> Arc<dyn SessionStore> {
    #[cfg(target_arch = "wasm32")]
    {
        Arc::new(LocalStorageStore)
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        Arc::new(client::MemorySessionStore::default())
    }
}
