// src/ui/app.rs - Main application component with routing

use dioxus::prelude::*;
#[allow(unused_imports)]
use dioxus_router::prelude::*;

use crate::ui::{
    router::Route,
    state::{AppStateProvider, Services},
};

/// Main application component that sets up routing and global state
#[component]
pub fn App() -> Element {
    let services = use_hook(|| match Services::new(crate::ui::launch_config()) {
        Ok(services) => Some(services),
        Err(e) => {
            tracing::error!(error = %e, "failed to create API client");
            None
        }
    });

    match services {
        Some(services) => rsx! {
            AppStateProvider {
                services: services,
                Router::<Route> {}
            }
        },
        None => rsx! {
            div {
                class: "min-h-screen flex items-center justify-center bg-gray-50",
                p {
                    class: "text-red-600",
                    "The API client could not be created. Check the api section of the configuration."
                }
            }
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn app_component_renders() {
        let mut vdom = VirtualDom::new(App);
        vdom.rebuild_in_place();
    }
}
