use client::AuthApi;
use dioxus::prelude::*;
use shared_ui::{
    Alert, AlertVariant, Button, Card, CardContent, CardDescription, CardFooter, CardHeader,
    CardTitle, Form, Input,
};

use crate::auth::use_auth;
use crate::routes::Route;

/// Login page with username/password.
#[component]
pub fn Login() -> Element {
    let mut auth = use_auth();
    let auth_api: AuthApi = use_context();
    let mut username = use_signal(String::new);
    let mut password = use_signal(String::new);
    let mut error_msg = use_signal(|| Option::<String>::None);
    let mut loading = use_signal(|| false);

    // Already signed in; nothing to do here.
    if auth.is_authenticated() {
        navigator().push(Route::PlatesDashboard {});
    }

    let handle_login = move |_| {
        let auth_api = auth_api.clone();
        spawn(async move {
            loading.set(true);
            error_msg.set(None);
            match auth_api.login(&username(), &password()).await {
                Ok(user) => {
                    auth.set_user(user);
                    navigator().push(Route::PlatesDashboard {});
                }
                Err(err) => {
                    error_msg.set(Some(err.user_message()));
                }
            }
            loading.set(false);
        });
    };

    rsx! {
        div { class: "auth-page",
            Card {
                CardHeader {
                    CardTitle { "Sign In" }
                    CardDescription { "Enter your credentials to access the plate dashboard" }
                }
                CardContent {
                    if let Some(err) = error_msg() {
                        Alert { variant: AlertVariant::Error, "{err}" }
                    }
                    Form { onsubmit: handle_login,
                        Input {
                            label: "Username",
                            placeholder: "Username",
                            value: username(),
                            on_input: move |e: FormEvent| username.set(e.value()),
                        }
                        Input {
                            label: "Password",
                            input_type: "password",
                            placeholder: "Password",
                            value: password(),
                            on_input: move |e: FormEvent| password.set(e.value()),
                        }
                        Button {
                            disabled: loading(),
                            if loading() { "Signing in..." } else { "Sign In" }
                        }
                    }
                }
                CardFooter {
                    p { class: "auth-link",
                        "Don't have an account? "
                        Link { to: Route::Signup {}, "Create one" }
                    }
                }
            }
        }
    }
}
