// src/ui/components/toast.rs

use dioxus::prelude::*;

use crate::ui::state::{use_app_dispatch, use_app_state, AppAction};

/// Stack of notifications in the bottom-right corner
#[component]
pub fn Toasts() -> Element {
    let app_state = use_app_state();
    let dispatch = use_app_dispatch();

    rsx! {
        div {
            class: "fixed bottom-4 right-4 z-50 space-y-2 w-80",
            for notification in app_state.notifications {
                div {
                    key: "{notification.id}",
                    class: format!("border-l-4 rounded-md shadow p-3 flex justify-between {}", notification.notification_type.classes()),
                    p { class: "text-sm", "{notification.message}" }
                    button {
                        r#type: "button",
                        class: "ml-3 text-sm opacity-60 hover:opacity-100",
                        onclick: move |_| dispatch.call(AppAction::RemoveNotification(notification.id)),
                        "✕"
                    }
                }
            }
        }
    }
}
