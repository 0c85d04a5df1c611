use crate::routes::Route;
use crate::session::use_session;
use dioxus::prelude::*;
use shared_ui::{
    Button, ButtonVariant, Card, CardContent, CardDescription, CardFooter, CardHeader, CardTitle,
    Form, Input,
};
use std::collections::HashMap;

/// Sign-in page. Already signed-in visitors go straight to the dashboard.
#[component]
pub fn Login() -> Element {
    let mut session = use_session();
    let mut email = use_signal(String::new);
    let mut password = use_signal(String::new);
    let mut error_msg = use_signal(|| Option::<String>::None);
    let mut field_errors = use_signal(HashMap::<String, String>::new);
    let mut loading = use_signal(|| false);

    if session.session().is_some() {
        navigator().replace(Route::Dashboard {});
    }

    let handle_login = move |_: FormEvent| async move {
        if loading() {
            return;
        }
        loading.set(true);
        error_msg.set(None);
        field_errors.set(HashMap::new());

        match server::api::sign_in(email(), password()).await {
            Ok(user) => {
                tracing::info!(role = user.role.as_str(), "signed in");
                session.sign_in(user);
                navigator().push(Route::Dashboard {});
            }
            Err(e) => {
                let err_str = e.to_string();
                let fe = shared_types::AppError::parse_field_errors(&err_str);
                if fe.is_empty() {
                    error_msg.set(Some(shared_types::AppError::friendly_message(&err_str)));
                } else {
                    field_errors.set(fe);
                }
            }
        }
        loading.set(false);
    };

    let email_error = field_errors.read().get("email").cloned();
    let password_error = field_errors.read().get("password").cloned();

    rsx! {
        div { class: "page narrow auth-page",
            Card {
                CardHeader {
                    CardTitle { "Sign in" }
                    CardDescription { "Use your university email and union password." }
                }
                Form { onsubmit: handle_login,
                    CardContent {
                        if let Some(err) = error_msg() {
                            div { class: "auth-error", role: "alert", "{err}" }
                        }
                        Input {
                            label: "Email",
                            input_type: "email",
                            placeholder: "you@university.ac.uk",
                            value: email(),
                            on_input: move |e: FormEvent| email.set(e.value()),
                        }
                        if let Some(msg) = email_error {
                            p { class: "field-error", "{msg}" }
                        }
                        Input {
                            label: "Password",
                            input_type: "password",
                            value: password(),
                            on_input: move |e: FormEvent| password.set(e.value()),
                        }
                        if let Some(msg) = password_error {
                            p { class: "field-error", "{msg}" }
                        }
                    }
                    CardFooter {
                        Button {
                            submit: true,
                            variant: ButtonVariant::Primary,
                            disabled: loading(),
                            if loading() { "Signing in..." } else { "Sign in" }
                        }
                    }
                }
            }
        }
    }
}
