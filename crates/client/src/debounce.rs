use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Quick-search debounce interval.
pub const SEARCH_DEBOUNCE_MS: u64 = 500;

/// Ticket identifying one keystroke's debounce window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DebounceTicket(u64);

/// Generation-counter debouncer. Each keystroke arms a new generation; after
/// the delay the task checks whether its generation is still the newest and
/// only then fires. Superseded generations simply fall through, so there is
/// no timer handle to cancel and the scheme works the same on wasm and
/// native executors.
#[derive(Debug, Clone, Default)]
pub struct Debouncer {
    generation: Arc<AtomicU64>,
}

impl Debouncer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start (or restart) the debounce window.
    pub fn arm(&self) -> DebounceTicket {
        DebounceTicket(self.generation.fetch_add(1, Ordering::SeqCst) + 1)
    }

    pub fn is_current(&self, ticket: DebounceTicket) -> bool {
        self.generation.load(Ordering::SeqCst) == ticket.0
    }

    /// Cancel any armed window without starting a new one (e.g. when the
    /// input is cleared).
    pub fn cancel(&self) {
        self.generation.fetch_add(1, Ordering::SeqCst);
    }
}

/// Executor-appropriate sleep.
pub async fn sleep_ms(ms: u64) {
    #[cfg(target_arch = "wasm32")]
    gloo_timers::future::TimeoutFuture::new(ms as u32).await;
    #[cfg(not(target_arch = "wasm32"))]
    tokio::time::sleep(std::time::Duration::from_millis(ms)).await;
}

/// Wait out one debounce window. Returns `true` when the ticket survived,
/// i.e. no newer keystroke arrived while sleeping.
pub async fn debounced(debouncer: &Debouncer, ticket: DebounceTicket, delay_ms: u64) -> bool {
    sleep_ms(delay_ms).await;
    debouncer.is_current(ticket)
}
