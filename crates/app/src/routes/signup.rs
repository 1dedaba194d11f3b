use client::AuthApi;
use dioxus::prelude::*;
use shared_types::SignupRequest;
use shared_ui::{
    Alert, AlertVariant, Button, Card, CardContent, CardDescription, CardFooter, CardHeader,
    CardTitle, Form, Input,
};

use crate::auth::use_auth;
use crate::routes::Route;

#[component]
pub fn Signup() -> Element {
    let mut auth = use_auth();
    let auth_api: AuthApi = use_context();
    let mut username = use_signal(String::new);
    let mut email = use_signal(String::new);
    let mut password = use_signal(String::new);
    let mut confirm = use_signal(String::new);
    let mut error_msg = use_signal(|| Option::<String>::None);
    let mut field_errors = use_signal(Vec::<String>::new);
    let mut loading = use_signal(|| false);

    let handle_signup = move |_| {
        let auth_api = auth_api.clone();
        spawn(async move {
            loading.set(true);
            error_msg.set(None);
            field_errors.set(Vec::new());

            let request = SignupRequest {
                username: username().trim().to_string(),
                password: password(),
                confirm_password: confirm(),
                email: {
                    let e = email().trim().to_string();
                    (!e.is_empty()).then_some(e)
                },
            };

            match auth_api.signup(&request).await {
                Ok(user) => {
                    auth.set_user(user);
                    navigator().push(Route::PlatesDashboard {});
                }
                Err(err) => {
                    if err.field_errors.is_empty() {
                        error_msg.set(Some(err.user_message()));
                    } else {
                        field_errors.set(err.field_errors.values().cloned().collect());
                    }
                }
            }
            loading.set(false);
        });
    };

    rsx! {
        div { class: "auth-page",
            Card {
                CardHeader {
                    CardTitle { "Create Account" }
                    CardDescription { "Sign up to access the plate dashboard" }
                }
                CardContent {
                    if let Some(err) = error_msg() {
                        Alert { variant: AlertVariant::Error, "{err}" }
                    }
                    for err in field_errors() {
                        Alert { variant: AlertVariant::Error, "{err}" }
                    }
                    Form { onsubmit: handle_signup,
                        Input {
                            label: "Username",
                            placeholder: "3-64 characters",
                            value: username(),
                            on_input: move |e: FormEvent| username.set(e.value()),
                        }
                        Input {
                            label: "Email (optional)",
                            input_type: "email",
                            placeholder: "you@example.com",
                            value: email(),
                            on_input: move |e: FormEvent| email.set(e.value()),
                        }
                        Input {
                            label: "Password",
                            input_type: "password",
                            placeholder: "At least 8 characters",
                            value: password(),
                            on_input: move |e: FormEvent| password.set(e.value()),
                        }
                        Input {
                            label: "Confirm password",
                            input_type: "password",
                            placeholder: "Repeat the password",
                            value: confirm(),
                            on_input: move |e: FormEvent| confirm.set(e.value()),
                        }
                        Button {
                            disabled: loading(),
                            if loading() { "Creating account..." } else { "Create Account" }
                        }
                    }
                }
                CardFooter {
                    p { class: "auth-link",
                        "Already have an account? "
                        Link { to: Route::Login {}, "Sign in" }
                    }
                }
            }
        }
    }
}
