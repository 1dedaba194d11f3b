//! HTTP client layer and client-side state machines for the plate dashboard.
//!
//! Everything stateful the UI needs lives here, UI-framework-free: the
//! session context and token-refresh coordination, the typed API surface,
//! the pagination engine, the fenced result store, the debounce trigger and
//! the admin review queue. The `app` crate wraps these in signals; the
//! `tests` crate drives them against a mock backend.

pub mod auth_api;
pub mod config;
pub mod debounce;
pub mod http;
pub mod pager;
pub mod plates;
pub mod queue;
pub mod refresh;
pub mod session;
pub mod store;

pub use auth_api::AuthApi;
pub use config::ApiConfig;
pub use debounce::{debounced, sleep_ms, DebounceTicket, Debouncer, SEARCH_DEBOUNCE_MS};
pub use http::ApiClient;
pub use pager::Pager;
pub use plates::PlateApi;
pub use queue::{ReviewEntry, ReviewQueue, ReviewState};
pub use refresh::{RefreshClaim, RefreshGate};
pub use session::{MemorySessionStore, Session, SessionContext, SessionStore};
pub use store::{fetch_plates, last_n_days_query, FetchTicket, PlateStore};
