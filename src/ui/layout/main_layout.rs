// src/ui/layout/main_layout.rs - Admin shell around every signed-in page

use dioxus::prelude::*;

use crate::ui::{
    components::Toasts,
    layout::{Header, Sidebar},
    state::{use_app_dispatch, use_app_state, AppAction},
};

#[component]
pub fn Layout(children: Element) -> Element {
    let app_state = use_app_state();
    let dispatch = use_app_dispatch();
    let collapsed = app_state.sidebar_collapsed;

    rsx! {
        div {
            class: "min-h-screen bg-gray-50",
            Sidebar { collapsed }
            div {
                class: format!(
                    "flex flex-col transition-all duration-200 {}",
                    if collapsed { "lg:pl-16" } else { "lg:pl-64" }
                ),
                Header {
                    on_sidebar_toggle: move |_| dispatch.call(AppAction::ToggleSidebar)
                }
                main {
                    class: "flex-1 p-6",
                    {children}
                }
            }
            Toasts {}
        }
    }
}
