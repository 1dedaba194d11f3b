use client::{sleep_ms, PlateApi};
use dioxus::prelude::*;
use shared_types::ApiStatus;

/// How often the backend is probed.
const PROBE_INTERVAL_MS: u64 = 30_000;

/// Persistent backend-reachability dot in the top bar. Probes `/health` on
/// mount and every 30 seconds after.
#[component]
pub fn StatusBanner() -> Element {
    let api: PlateApi = use_context();
    let mut status = use_signal(ApiStatus::default);

    use_future(move || {
        let api = api.clone();
        async move {
            loop {
                let next = api.probe_status().await;
                if next != *status.peek() {
                    tracing::info!(status = next.label(), "backend status changed");
                }
                status.set(next);
                sleep_ms(PROBE_INTERVAL_MS).await;
            }
        }
    });

    let current = *status.read();
    rsx! {
        div { class: "status-banner",
            span { class: "status-dot {current.css_class()}" }
            span { class: "status-label", "{current.label()}" }
            if current == ApiStatus::Offline {
                span { class: "status-hint", "Backend unreachable, retrying" }
            }
        }
    }
}
