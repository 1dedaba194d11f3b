pub mod candidates;
pub mod login;
pub mod not_found;
pub mod plates;
pub mod signup;
pub mod users;

use client::AuthApi;
use dioxus::prelude::*;
use dioxus_free_icons::icons::fa_solid_icons::{FaCar, FaRightFromBracket, FaUsers};
use dioxus_free_icons::Icon;
use shared_ui::{Badge, BadgeVariant, Button, ButtonVariant};

use crate::auth::{use_auth, use_is_admin};
use crate::components::status_banner::StatusBanner;

use candidates::Candidates;
use login::Login;
use not_found::NotFound;
use plates::PlatesDashboard;
use signup::Signup;
use users::Users;

/// Application routes.
#[derive(Clone, Routable, Debug, PartialEq)]
pub enum Route {
    #[route("/login")]
    Login {},
    #[route("/signup")]
    Signup {},
    #[layout(AuthGuard)]
    #[layout(AppLayout)]
    #[route("/")]
    PlatesDashboard {},
    #[route("/candidates")]
    Candidates {},
    #[route("/users")]
    Users {},
    #[end_layout]
    #[end_layout]
    #[route("/:..route")]
    NotFound { route: Vec<String> },
}

/// Auth guard layout — redirects to /login if not authenticated.
#[component]
fn AuthGuard() -> Element {
    let auth = use_auth();

    if auth.is_authenticated() {
        rsx! { Outlet::<Route> {} }
    } else {
        navigator().push(Route::Login {});
        rsx! {
            div { class: "auth-guard-loading",
                p { "Redirecting to login..." }
            }
        }
    }
}

/// Main app layout: brand, navigation, backend status, and the signed-in
/// user with a logout button.
#[component]
fn AppLayout() -> Element {
    let route: Route = use_route();
    let mut auth = use_auth();
    let auth_api: AuthApi = use_context();
    let is_admin = use_is_admin();

    let username = auth
        .current_user
        .read()
        .as_ref()
        .map(|u| u.username.clone())
        .unwrap_or_default();

    let handle_logout = move |_| {
        let auth_api = auth_api.clone();
        spawn(async move {
            auth_api.logout().await;
            auth.clear_auth();
            navigator().push(Route::Login {});
        });
    };

    rsx! {
        header { class: "topbar",
            div { class: "topbar-brand",
                Icon::<FaCar> { icon: FaCar, width: 20, height: 20 }
                span { "PlateView" }
            }
            nav { class: "topbar-nav",
                Link {
                    to: Route::PlatesDashboard {},
                    class: if matches!(route, Route::PlatesDashboard {}) { "nav-link active" } else { "nav-link" },
                    "Plates"
                }
                if is_admin {
                    Link {
                        to: Route::Candidates {},
                        class: if matches!(route, Route::Candidates {}) { "nav-link active" } else { "nav-link" },
                        "Review"
                    }
                    Link {
                        to: Route::Users {},
                        class: if matches!(route, Route::Users {}) { "nav-link active" } else { "nav-link" },
                        Icon::<FaUsers> { icon: FaUsers, width: 14, height: 14 }
                        "Users"
                    }
                }
            }
            div { class: "topbar-right",
                StatusBanner {}
                span { class: "topbar-user",
                    "{username}"
                    if is_admin {
                        Badge { variant: BadgeVariant::Primary, "admin" }
                    }
                }
                Button {
                    variant: ButtonVariant::Ghost,
                    onclick: handle_logout,
                    Icon::<FaRightFromBracket> { icon: FaRightFromBracket, width: 14, height: 14 }
                    "Sign out"
                }
            }
        }
        main { class: "page",
            Outlet::<Route> {}
        }
    }
}

/// Notice shown on admin-only pages to non-admin users.
#[component]
pub fn AdminOnlyNotice() -> Element {
    rsx! {
        div { class: "admin-notice",
            p { "This page requires administrator access." }
            Link { to: Route::PlatesDashboard {}, "Back to plates" }
        }
    }
}
