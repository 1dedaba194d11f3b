use client::AuthApi;
use dioxus::prelude::*;
use shared_types::{AuthUser, CreateUserRequest, UpdateRoleRequest, UserRole};
use shared_ui::{
    Alert, AlertVariant, Badge, BadgeVariant, Button, ButtonVariant, Card, CardContent,
    CardHeader, CardTitle, DataTable, DataTableBody, DataTableCell, DataTableColumn,
    DataTableHeader, DataTableRow, Dialog, DialogActions, Form, FormRow, FormSelect, Input,
    PageHeader, PageTitle, Skeleton,
};

use crate::auth::{use_auth, use_is_admin};
use crate::routes::AdminOnlyNotice;

/// Admin user management: list accounts, change roles, create and delete
/// users.
#[component]
pub fn Users() -> Element {
    let auth_api: AuthApi = use_context();
    let auth = use_auth();
    let is_admin = use_is_admin();

    let reload_tick = use_signal(|| 0u32);

    // Re-fetches whenever a mutation bumps the tick.
    let users_res = use_resource({
        let auth_api = auth_api.clone();
        move || {
            let _ = reload_tick();
            let auth_api = auth_api.clone();
            async move { auth_api.users().await }
        }
    });

    if !is_admin {
        return rsx! { AdminOnlyNotice {} };
    }

    let own_id = auth.current_user.read().as_ref().map(|u| u.id);
    let state = users_res();

    rsx! {
        PageHeader {
            PageTitle { "Users" }
        }

        if let Some(Err(err)) = &state {
            Alert { variant: AlertVariant::Error, "{err.user_message()}" }
        }

        if state.is_none() {
            Skeleton { rows: 4 }
        } else if let Some(Ok(list)) = state {
            DataTable {
                DataTableHeader {
                    DataTableColumn { "Username" }
                    DataTableColumn { "Email" }
                    DataTableColumn { "Role" }
                    DataTableColumn { "" }
                }
                DataTableBody {
                    for user in list {
                        UserRow {
                            key: "{user.id}",
                            user: user.clone(),
                            is_self: Some(user.id) == own_id,
                            reload_tick,
                        }
                    }
                }
            }
        }

        CreateUserForm { reload_tick }
    }
}

#[component]
fn UserRow(user: AuthUser, is_self: bool, reload_tick: Signal<u32>) -> Element {
    let auth_api: AuthApi = use_context();
    let mut busy = use_signal(|| false);
    let mut error_msg = use_signal(|| Option::<String>::None);
    let mut confirm_open = use_signal(|| false);

    let user_id = user.id;

    let change_role = {
        let auth_api = auth_api.clone();
        move |e: Event<FormData>| {
            let role = UserRole::from_str_or_default(&e.value());
            let auth_api = auth_api.clone();
            spawn(async move {
                busy.set(true);
                let request = UpdateRoleRequest { user_id, role };
                match auth_api.update_role(&request).await {
                    Ok(()) => {
                        let current = *reload_tick.peek();
                        reload_tick.set(current + 1);
                    }
                    Err(err) => error_msg.set(Some(err.user_message())),
                }
                busy.set(false);
            });
        }
    };

    let delete_user = move |_| {
        confirm_open.set(false);
        let auth_api = auth_api.clone();
        spawn(async move {
            busy.set(true);
            match auth_api.delete_user(user_id).await {
                Ok(()) => {
                    let current = *reload_tick.peek();
                    reload_tick.set(current + 1);
                }
                Err(err) => error_msg.set(Some(err.user_message())),
            }
            busy.set(false);
        });
    };

    rsx! {
        DataTableRow {
            DataTableCell { "{user.username}" }
            DataTableCell { {user.email.clone().unwrap_or_else(|| "–".to_string())} }
            DataTableCell {
                if is_self {
                    // Admins cannot demote themselves.
                    Badge { variant: BadgeVariant::Primary, "{user.role.as_str()}" }
                } else {
                    FormSelect {
                        value: "{user.role.as_str()}",
                        disabled: busy(),
                        onchange: change_role,
                        option { value: "member", "member" }
                        option { value: "admin", "admin" }
                    }
                }
            }
            DataTableCell {
                if let Some(err) = error_msg() {
                    span { class: "row-error", "{err}" }
                }
                if !is_self {
                    Button {
                        variant: ButtonVariant::Destructive,
                        disabled: busy(),
                        onclick: move |_| confirm_open.set(true),
                        "Delete"
                    }
                    Dialog {
                        open: confirm_open(),
                        on_close: move |_| confirm_open.set(false),
                        title: "Delete user",
                        p { "Delete the account \"{user.username}\"? This cannot be undone." }
                        DialogActions {
                            Button {
                                variant: ButtonVariant::Outline,
                                onclick: move |_| confirm_open.set(false),
                                "Cancel"
                            }
                            Button {
                                variant: ButtonVariant::Destructive,
                                onclick: delete_user,
                                "Delete"
                            }
                        }
                    }
                }
            }
        }
    }
}

#[component]
fn CreateUserForm(reload_tick: Signal<u32>) -> Element {
    let auth_api: AuthApi = use_context();
    let mut username = use_signal(String::new);
    let mut email = use_signal(String::new);
    let mut password = use_signal(String::new);
    let mut confirm = use_signal(String::new);
    let mut role = use_signal(|| UserRole::Member);
    let mut error_msg = use_signal(|| Option::<String>::None);
    let mut saving = use_signal(|| false);

    let handle_create = move |_| {
        let auth_api = auth_api.clone();
        spawn(async move {
            saving.set(true);
            error_msg.set(None);

            let request = CreateUserRequest {
                username: username().trim().to_string(),
                password: password(),
                confirm_password: confirm(),
                role: role(),
                email: {
                    let e = email().trim().to_string();
                    (!e.is_empty()).then_some(e)
                },
            };

            match auth_api.create_user(&request).await {
                Ok(_) => {
                    username.set(String::new());
                    email.set(String::new());
                    password.set(String::new());
                    confirm.set(String::new());
                    role.set(UserRole::Member);
                    let current = *reload_tick.peek();
                    reload_tick.set(current + 1);
                }
                Err(err) => error_msg.set(Some(err.user_message())),
            }
            saving.set(false);
        });
    };

    rsx! {
        Card {
            CardHeader {
                CardTitle { "Create user" }
            }
            CardContent {
                if let Some(err) = error_msg() {
                    Alert { variant: AlertVariant::Error, "{err}" }
                }
                Form { onsubmit: handle_create,
                    FormRow {
                        Input {
                            label: "Username",
                            placeholder: "3-64 characters",
                            value: username(),
                            on_input: move |e: FormEvent| username.set(e.value()),
                        }
                        Input {
                            label: "Email (optional)",
                            input_type: "email",
                            placeholder: "user@example.com",
                            value: email(),
                            on_input: move |e: FormEvent| email.set(e.value()),
                        }
                    }
                    FormRow {
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
                        FormSelect {
                            label: "Role",
                            value: "{role().as_str()}",
                            onchange: move |e: Event<FormData>| {
                                role.set(UserRole::from_str_or_default(&e.value()));
                            },
                            option { value: "member", "member" }
                            option { value: "admin", "admin" }
                        }
                    }
                    Button {
                        disabled: saving(),
                        if saving() { "Creating..." } else { "Create user" }
                    }
                }
            }
        }
    }
}
