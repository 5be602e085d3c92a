// src/ui/pages/mod.rs - Page components module

use dioxus::prelude::*;

use crate::error::Error;

mod blog_detail;
mod blogs;
mod categories;
mod dashboard;
mod discounts;
mod login;
mod not_found;
mod order_detail;
mod orders;
mod products;
mod profile;

pub use blog_detail::BlogDetail;
pub use blogs::Blogs;
pub use categories::Categories;
pub use dashboard::Dashboard;
pub use discounts::Discounts;
pub use login::Login;
pub use not_found::{Forbidden, NotFound};
pub use order_detail::OrderDetail;
pub use orders::Orders;
pub use products::Products;
pub use profile::Profile;

/// Common page wrapper component
#[component]
pub fn PageWrapper(
    #[props(default = "".to_string())] title: String,
    #[props(default = None)] subtitle: Option<String>,
    #[props(default = None)] actions: Option<Element>,
    #[props(default = "".to_string())] class: String,
    children: Element,
) -> Element {
    rsx! {
        div {
            class: format!("space-y-6 {}", class),
            if !title.is_empty() {
                div {
                    class: "md:flex md:items-center md:justify-between",
                    div {
                        class: "flex-1 min-w-0",
                        h1 {
                            class: "text-2xl font-bold leading-7 text-gray-900 sm:truncate",
                            "{title}"
                        }
                        if let Some(subtitle) = subtitle {
                            p { class: "mt-1 text-sm text-gray-500", "{subtitle}" }
                        }
                    }
                    if let Some(actions) = actions {
                        div { class: "mt-4 flex space-x-3 md:mt-0 md:ml-4", {actions} }
                    }
                }
            }
            {children}
        }
    }
}

/// Empty state component for tables
#[component]
pub fn EmptyState(
    #[props(default = "📭".to_string())] icon: String,
    #[props(default = "No data available".to_string())] title: String,
) -> Element {
    rsx! {
        div {
            class: "text-center py-12",
            div { class: "text-5xl mb-4", "{icon}" }
            h3 { class: "text-lg font-medium text-gray-900", "{title}" }
        }
    }
}

/// Stat card component for dashboards
#[component]
pub fn StatCard(title: String, value: String, #[props(default = None)] icon: Option<String>) -> Element {
    rsx! {
        div {
            class: "bg-white overflow-hidden shadow rounded-lg p-5 flex items-center",
            if let Some(icon) = icon {
                div { class: "text-3xl mr-4", "{icon}" }
            }
            div {
                dt { class: "text-sm font-medium text-gray-500 truncate", "{title}" }
                dd { class: "text-2xl font-semibold text-gray-900", "{value}" }
            }
        }
    }
}

/// Text for a failed request, empty when the page simply went away
pub(crate) fn failure_text(error: &Error) -> Option<String> {
    (!error.is_cancelled()).then(|| error.user_message())
}

/// Base classes shared by the admin tables
pub(crate) const TABLE_CLASS: &str = "min-w-full divide-y divide-gray-200";
pub(crate) const TH_CLASS: &str =
    "px-4 py-3 text-left text-xs font-medium text-gray-500 uppercase tracking-wider";
pub(crate) const TD_CLASS: &str = "px-4 py-3 whitespace-nowrap text-sm text-gray-700";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failure_text_skips_cancellation() {
        assert_eq!(failure_text(&Error::cancelled("load products")), None);
        let text = failure_text(&Error::network(
            "/product",
            Some(404),
            Some("PRODUCT_NOT_FOUND".to_string()),
            "not found",
        ));
        assert!(text.is_some());
    }
}
