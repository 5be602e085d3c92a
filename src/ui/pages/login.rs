// src/ui/pages/login.rs - Authentication login page

use dioxus::prelude::*;
#[allow(unused_imports)]
use dioxus_router::prelude::*;

use crate::{
    auth::{LoginData, LoginField},
    catalog::FieldErrors,
    ui::{
        components::{button_class, ButtonVariant, FormField, Spinner, TextInput},
        router::Route,
        state::{auth, use_app_dispatch, use_app_state, use_cancel_token, use_services, AppAction},
    },
};

/// Login page component
#[component]
pub fn Login() -> Element {
    let app_state = use_app_state();
    let dispatch = use_app_dispatch();
    let services = use_services();
    let token = use_cancel_token();
    let navigator = use_navigator();

    let mut email = use_signal(String::new);
    let mut password = use_signal(String::new);
    let mut field_errors = use_signal(FieldErrors::<LoginField>::new);
    let mut login_error = use_signal(|| None::<String>);
    let mut submitting = use_signal(|| false);

    let authenticated = app_state.auth.is_authenticated();
    use_effect(use_reactive!(|authenticated| {
        if authenticated {
            let _ = navigator.replace(Route::Dashboard {});
        }
    }));

    let handle_submit = move |evt: FormEvent| {
        evt.prevent_default();
        if submitting() {
            return;
        }
        let data = LoginData {
            email: email().trim().to_string(),
            password: password(),
        };
        login_error.set(None);

        let errors = data.validate();
        let blocked = !errors.is_empty();
        field_errors.set(errors);
        if blocked {
            return;
        }

        submitting.set(true);
        let api = services.api.clone();
        let token = token.clone();
        spawn(async move {
            match auth::login(&api, &data, &token).await {
                Ok(user) => {
                    tracing::info!(user_id = %user.id, "signed in");
                    dispatch.call(AppAction::SessionChecked(Some(user)));
                    let _ = navigator.replace(Route::Dashboard {});
                }
                Err(e) if e.is_cancelled() => return,
                Err(e) => {
                    tracing::warn!(error = %e, "sign in failed");
                    login_error.set(Some(e.user_message()));
                }
            }
            submitting.set(false);
        });
    };

    let email_error = field_errors.read().get(LoginField::Email).map(str::to_string);
    let password_error = field_errors.read().get(LoginField::Password).map(str::to_string);

    rsx! {
        div {
            class: "max-w-md w-full space-y-8",
            div {
                class: "text-center",
                h2 { class: "text-3xl font-extrabold text-gray-900", "Sign in to the admin panel" }
                p { class: "mt-2 text-sm text-gray-600", "Welcome back! Please sign in to your account." }
            }

            form {
                class: "mt-8 space-y-6 bg-white shadow rounded-lg p-6",
                onsubmit: handle_submit,

                if let Some(error) = login_error() {
                    div {
                        class: "rounded-md bg-red-50 p-4",
                        h3 { class: "text-sm font-medium text-red-800", "Authentication Error" }
                        div { class: "mt-2 text-sm text-red-700", "{error}" }
                    }
                }

                FormField {
                    label: "Email".to_string(),
                    id: "email".to_string(),
                    required: true,
                    error: email_error,
                    TextInput {
                        id: "email".to_string(),
                        input_type: "email".to_string(),
                        placeholder: "admin@example.com".to_string(),
                        value: email(),
                        oninput: move |value: String| email.set(value),
                    }
                }

                FormField {
                    label: "Password".to_string(),
                    id: "password".to_string(),
                    required: true,
                    error: password_error,
                    TextInput {
                        id: "password".to_string(),
                        input_type: "password".to_string(),
                        value: password(),
                        oninput: move |value: String| password.set(value),
                    }
                }

                button {
                    r#type: "submit",
                    class: format!("{} w-full justify-center", button_class(ButtonVariant::Primary, submitting())),
                    disabled: submitting(),
                    if submitting() {
                        Spinner { class: "-ml-1 mr-3 h-5 w-5 text-white".to_string() }
                        "Signing in..."
                    } else {
                        "Sign in"
                    }
                }
            }
        }
    }
}
