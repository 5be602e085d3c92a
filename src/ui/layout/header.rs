// src/ui/layout/header.rs - Top bar with greeting and breadcrumb

use dioxus::prelude::*;
use dioxus_router::prelude::*;

use crate::ui::{
    router::{nav, Route},
    state::use_app_state,
};

/// Header component props
#[derive(Props, Clone, PartialEq)]
pub struct HeaderProps {
    /// Callback for sidebar toggle
    pub on_sidebar_toggle: Callback<()>,
}

#[component]
pub fn Header(props: HeaderProps) -> Element {
    let app_state = use_app_state();
    let route = use_route::<Route>();
    let crumbs = nav::breadcrumb(&route.to_string());
    let title = nav::route_title(&route);
    let greeting = app_state.auth.greeting();
    let avatar = app_state
        .auth
        .current_user()
        .and_then(|u| u.avatar.clone());

    rsx! {
        header {
            class: "sticky top-0 z-30 bg-white border-b border-gray-200",
            div {
                class: "flex items-center justify-between h-16 px-6",
                div {
                    class: "flex items-center",
                    button {
                        r#type: "button",
                        class: "p-2 mr-4 rounded-md text-gray-400 hover:text-gray-500 hover:bg-gray-100 focus:outline-none focus:ring-2 focus:ring-inset focus:ring-blue-500",
                        onclick: move |_| props.on_sidebar_toggle.call(()),
                        span { class: "sr-only", "Toggle sidebar" }
                        svg {
                            class: "h-5 w-5",
                            xmlns: "http://www.w3.org/2000/svg",
                            fill: "none",
                            view_box: "0 0 24 24",
                            stroke: "currentColor",
                            path {
                                stroke_linecap: "round",
                                stroke_linejoin: "round",
                                stroke_width: "2",
                                d: "M4 6h16M4 12h8m-8 6h16"
                            }
                        }
                    }
                    div {
                        nav {
                            class: "text-sm text-gray-500",
                            for (i, crumb) in crumbs.iter().enumerate() {
                                if i > 0 {
                                    span { class: "mx-1", "/" }
                                }
                                span {
                                    class: if i + 1 == crumbs.len() { "text-gray-900 font-medium" } else { "" },
                                    "{crumb}"
                                }
                            }
                        }
                        h1 { class: "text-lg font-semibold text-gray-900", "{title}" }
                    }
                }
                Link {
                    to: Route::Profile {},
                    class: "flex items-center space-x-3",
                    span { class: "text-sm font-medium text-gray-700", "{greeting}" }
                    if let Some(src) = avatar {
                        img { class: "h-8 w-8 rounded-full object-cover", src: "{src}", alt: "avatar" }
                    } else {
                        div { class: "h-8 w-8 rounded-full bg-blue-600" }
                    }
                }
            }
        }
    }
}
