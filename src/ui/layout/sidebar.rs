// src/ui/layout/sidebar.rs - Grouped admin navigation

use dioxus::prelude::*;
#[allow(unused_imports)]
use dioxus_router::prelude::*;

use crate::ui::{
    router::{nav, Route},
    state::auth::use_logout,
};

/// Navigation item definition
#[derive(Debug, Clone, PartialEq)]
pub struct NavItem {
    pub id: &'static str,
    pub label: &'static str,
    pub icon: &'static str,
    pub route: Route,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NavGroup {
    pub title: &'static str,
    pub items: Vec<NavItem>,
}

pub fn navigation_groups() -> Vec<NavGroup> {
    vec![
        NavGroup {
            title: "DASHBOARDS",
            items: vec![NavItem {
                id: "dashboard",
                label: "Overview",
                icon: "📊",
                route: Route::Dashboard {},
            }],
        },
        NavGroup {
            title: "Products",
            items: vec![
                NavItem {
                    id: "products",
                    label: "Products",
                    icon: "👕",
                    route: Route::Products {},
                },
                NavItem {
                    id: "categories",
                    label: "Manage category",
                    icon: "🗂",
                    route: Route::Categories {},
                },
                NavItem {
                    id: "discounts",
                    label: "Discount",
                    icon: "🏷",
                    route: Route::Discounts {},
                },
                NavItem {
                    id: "orders",
                    label: "Orders",
                    icon: "🧾",
                    route: Route::Orders { query: String::new() },
                },
            ],
        },
        NavGroup {
            title: "Blogs",
            items: vec![NavItem {
                id: "blogs",
                label: "Blog list",
                icon: "📝",
                route: Route::Blogs {},
            }],
        },
    ]
}

#[component]
pub fn Sidebar(collapsed: bool) -> Element {
    let current_route = use_route::<Route>();
    let logout = use_logout();
    let groups = navigation_groups();

    rsx! {
        aside {
            class: format!(
                "hidden lg:flex lg:flex-col lg:fixed lg:inset-y-0 lg:z-40 bg-white border-r border-gray-200 transition-all duration-200 {}",
                if collapsed { "lg:w-16" } else { "lg:w-64" }
            ),
            div {
                class: "h-16 flex items-center px-4 font-bold text-xl text-gray-900",
                if collapsed { "S" } else { "Storefront" }
            }
            nav {
                class: "flex-1 px-2 space-y-6 overflow-y-auto",
                for group in groups {
                    div {
                        key: "{group.title}",
                        if !collapsed {
                            div {
                                class: "px-2 mb-2 text-xs font-semibold text-gray-400 uppercase tracking-wide",
                                "{group.title}"
                            }
                        }
                        for item in group.items {
                            Link {
                                key: "{item.id}",
                                to: item.route.clone(),
                                class: if nav::is_active_route(&current_route, &item.route) {
                                    "flex items-center px-2 py-2 text-sm font-medium rounded-md bg-blue-100 text-blue-900"
                                } else {
                                    "flex items-center px-2 py-2 text-sm font-medium rounded-md text-gray-600 hover:bg-gray-50 hover:text-gray-900"
                                },
                                span { class: "mr-3", "{item.icon}" }
                                if !collapsed {
                                    "{item.label}"
                                }
                            }
                        }
                    }
                }
            }
            div {
                class: "p-2 border-t border-gray-200",
                button {
                    r#type: "button",
                    class: "w-full flex items-center px-2 py-2 text-sm font-medium rounded-md text-red-600 hover:bg-red-50",
                    onclick: move |_| logout.call(()),
                    span { class: "mr-3", "⎋" }
                    if !collapsed { "Logout" }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_navigation_groups() {
        let groups = navigation_groups();
        let titles: Vec<_> = groups.iter().map(|g| g.title).collect();
        assert_eq!(titles, vec!["DASHBOARDS", "Products", "Blogs"]);
        assert!(groups[1]
            .items
            .iter()
            .any(|item| item.route == Route::Categories {}));
    }
}
