// src/ui/pages/not_found.rs - 404 and 403 pages

use dioxus::prelude::*;
#[allow(unused_imports)]
use dioxus_router::prelude::*;

use crate::ui::{
    components::{button_class, ButtonVariant},
    router::Route,
    state::auth::use_logout,
};

#[component]
fn ErrorScreen(code: String, title: String, message: String, children: Element) -> Element {
    rsx! {
        div {
            class: "min-h-screen bg-white px-4 py-16 sm:px-6 sm:py-24 md:grid md:place-items-center lg:px-8",
            main {
                class: "sm:flex",
                p { class: "text-4xl font-extrabold text-blue-600 sm:text-5xl", "{code}" }
                div {
                    class: "sm:ml-6 sm:border-l sm:border-gray-200 sm:pl-6",
                    h1 { class: "text-4xl font-extrabold text-gray-900 tracking-tight sm:text-5xl", "{title}" }
                    p { class: "mt-1 text-base text-gray-500", "{message}" }
                    div { class: "mt-10 flex space-x-3", {children} }
                }
            }
        }
    }
}

/// 404 Not Found page component
#[component]
pub fn NotFound(#[props(default = "".to_string())] path: String) -> Element {
    rsx! {
        ErrorScreen {
            code: "404".to_string(),
            title: "Page not found".to_string(),
            message: if path.is_empty() {
                "Sorry, we couldn't find the page you're looking for.".to_string()
            } else {
                format!("Nothing lives at /{}.", path)
            },
            Link {
                to: Route::Dashboard {},
                class: button_class(ButtonVariant::Primary, false),
                "Go back home"
            }
        }
    }
}

/// Shown to a signed-in account without the admin role
#[component]
pub fn Forbidden() -> Element {
    let logout = use_logout();

    rsx! {
        ErrorScreen {
            code: "403".to_string(),
            title: "Access denied".to_string(),
            message: "This account is not allowed to use the admin panel.".to_string(),
            button {
                r#type: "button",
                class: button_class(ButtonVariant::Secondary, false),
                onclick: move |_| logout.call(()),
                "Sign in with another account"
            }
        }
    }
}
