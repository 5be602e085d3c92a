// src/ui/pages/profile.rs - Signed-in admin's own profile

use dioxus::prelude::*;

use crate::{
    auth::{CurrentUser, ProfileUpdate},
    ui::{
        components::{button_class, ButtonVariant, Card, FormField, ImagePicker, Spinner, TextInput},
        pages::{failure_text, PageWrapper},
        state::{
            auth::use_current_user, use_app_dispatch, use_cancel_token, use_notify, use_services,
            AppAction,
        },
        NotificationType,
    },
};

/// Only the fields that differ from the signed-in user; blank text is left out
pub(crate) fn profile_changes(
    user: &CurrentUser,
    full_name: &str,
    phone_number: &str,
    avatar: Option<&str>,
) -> ProfileUpdate {
    let full_name = full_name.trim();
    let phone_number = phone_number.trim();
    ProfileUpdate {
        full_name: (!full_name.is_empty() && full_name != user.full_name).then(|| full_name.to_string()),
        phone_number: (!phone_number.is_empty() && Some(phone_number) != user.phone_number.as_deref())
            .then(|| phone_number.to_string()),
        avatar: avatar
            .filter(|a| !a.is_empty() && Some(*a) != user.avatar.as_deref())
            .map(str::to_string),
    }
}

#[component]
pub fn Profile() -> Element {
    let Some(user) = use_current_user() else {
        return rsx! { Spinner {} };
    };

    rsx! {
        PageWrapper {
            title: "Profile".to_string(),
            subtitle: Some("Manage your account information".to_string()),
            ProfileForm { key: "{user.id}", user }
        }
    }
}

#[component]
fn ProfileForm(user: CurrentUser) -> Element {
    let services = use_services();
    let token = use_cancel_token();
    let notify = use_notify();
    let dispatch = use_app_dispatch();

    let mut full_name = use_signal(|| user.full_name.clone());
    let mut phone = use_signal(|| user.phone_number.clone().unwrap_or_default());
    let mut avatar = use_signal(|| user.avatar.clone());
    let mut saving = use_signal(|| false);

    let save = {
        let user = user.clone();
        move |evt: FormEvent| {
            evt.prevent_default();
            if saving() {
                return;
            }
            let update = profile_changes(&user, &full_name(), &phone(), avatar().as_deref());
            if update == ProfileUpdate::default() {
                notify.call((NotificationType::Info, "Nothing to update".to_string()));
                return;
            }
            saving.set(true);
            let api = services.api.clone();
            let token = token.clone();
            spawn(async move {
                match api.update_profile(&update, &token).await {
                    Ok(updated) => {
                        dispatch.call(AppAction::SessionChecked(Some(updated)));
                        notify.call((NotificationType::Success, "Profile updated".to_string()));
                    }
                    Err(e) => {
                        if let Some(message) = failure_text(&e) {
                            notify.call((NotificationType::Error, message));
                        }
                    }
                }
                saving.set(false);
            });
        }
    };

    rsx! {
        div {
            class: "grid grid-cols-1 gap-6 lg:grid-cols-3",
            Card {
                div {
                    class: "flex flex-col items-center text-center space-y-3",
                    if let Some(src) = avatar() {
                        img { class: "h-24 w-24 rounded-full object-cover", src: "{src}", alt: "avatar" }
                    } else {
                        div { class: "h-24 w-24 rounded-full bg-blue-600" }
                    }
                    h2 { class: "text-lg font-semibold text-gray-900", "{user.full_name}" }
                    p { class: "text-sm text-gray-500", "{user.email}" }
                    p { class: "text-xs uppercase tracking-wide text-gray-400", "{user.role:?}" }
                }
            }
            Card {
                title: "Account".to_string(),
                class: "lg:col-span-2".to_string(),
                form {
                    class: "space-y-4",
                    onsubmit: save,
                    FormField {
                        label: "Full name".to_string(),
                        id: "profile-name".to_string(),
                        TextInput {
                            id: "profile-name".to_string(),
                            value: full_name(),
                            oninput: move |value: String| full_name.set(value),
                        }
                    }
                    FormField {
                        label: "Email".to_string(),
                        id: "profile-email".to_string(),
                        TextInput {
                            id: "profile-email".to_string(),
                            value: user.email.clone(),
                            disabled: true,
                            oninput: move |_: String| {},
                        }
                    }
                    FormField {
                        label: "Phone number".to_string(),
                        id: "profile-phone".to_string(),
                        TextInput {
                            id: "profile-phone".to_string(),
                            input_type: "tel".to_string(),
                            value: phone(),
                            oninput: move |value: String| phone.set(value),
                        }
                    }
                    FormField {
                        label: "Avatar".to_string(),
                        ImagePicker {
                            id: "profile-avatar".to_string(),
                            current_url: avatar().unwrap_or_default(),
                            on_uploaded: move |url: Option<String>| {
                                if url.is_some() {
                                    avatar.set(url);
                                }
                            },
                            on_clear: Some(EventHandler::new(move |_: ()| avatar.set(None))),
                        }
                    }
                    div {
                        class: "flex justify-end",
                        button {
                            r#type: "submit",
                            class: button_class(ButtonVariant::Primary, saving()),
                            disabled: saving(),
                            "Save changes"
                        }
                    }
                }
            }
        }
    }
}
