use client::{ApiClient, ApiConfig, AuthApi, PlateApi, SessionContext};
use dioxus::prelude::*;

mod auth;
mod components;
mod routes;
mod storage;

use auth::AuthState;
use routes::Route;

const MAIN_CSS: Asset = asset!("/assets/main.css");

fn main() {
    dioxus::launch(App);
}

#[component]
fn App() -> Element {
    // One session context and one HTTP client for the whole app; every page
    // reaches them through context.
    let session = use_hook(|| SessionContext::new(storage::session_store()));
    let client = use_hook(|| ApiClient::new(ApiConfig::from_env(), session.clone()));

    use_context_provider(|| session.clone());
    use_context_provider(|| PlateApi::new(client.clone()));
    use_context_provider(|| AuthApi::new(client.clone()));
    use_context_provider(|| client.clone());

    // Seed auth state from a restored session so a reload stays signed in.
    use_context_provider(|| AuthState::new(session.user()));

    rsx! {
        document::Link { rel: "stylesheet", href: MAIN_CSS }
        Router::<Route> {}
    }
}
