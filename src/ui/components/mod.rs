// src/ui/components/mod.rs - Reusable UI components

use dioxus::prelude::*;

mod image_picker;
mod pagination;
mod toast;
mod typed_input;

pub use image_picker::{mime_for, ImagePicker};
pub use pagination::{page_window, Pagination};
pub use toast::Toasts;
pub use typed_input::TypedInput;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ButtonVariant {
    #[default]
    Primary,
    Secondary,
    Danger,
    Ghost,
}

impl ButtonVariant {
    fn classes(self) -> &'static str {
        match self {
            Self::Primary => "border-transparent text-white bg-blue-600 hover:bg-blue-700 focus:ring-blue-500",
            Self::Secondary => "border-gray-300 text-gray-700 bg-white hover:bg-gray-50 focus:ring-blue-500",
            Self::Danger => "border-transparent text-white bg-red-600 hover:bg-red-700 focus:ring-red-500",
            Self::Ghost => "border-transparent text-gray-700 hover:bg-gray-100 focus:ring-blue-500",
        }
    }
}

/// Classes for a `button` element with consistent styling
pub fn button_class(variant: ButtonVariant, disabled: bool) -> String {
    format!(
        "inline-flex items-center px-4 py-2 text-sm border font-medium rounded-md focus:outline-none focus:ring-2 focus:ring-offset-2 transition-colors {} {}",
        variant.classes(),
        if disabled { "opacity-50 cursor-not-allowed" } else { "" }
    )
}

/// Plain text input
#[component]
pub fn TextInput(
    #[props(default = "text".to_string())] input_type: String,
    #[props(default = "".to_string())] id: String,
    #[props(default = "".to_string())] placeholder: String,
    value: String,
    #[props(default = false)] disabled: bool,
    oninput: Callback<String>,
) -> Element {
    rsx! {
        input {
            r#type: "{input_type}",
            id: "{id}",
            placeholder: "{placeholder}",
            value: "{value}",
            disabled: disabled,
            class: "block w-full border-gray-300 rounded-md shadow-sm focus:ring-blue-500 focus:border-blue-500 sm:text-sm",
            oninput: move |evt| oninput.call(evt.value()),
        }
    }
}

#[component]
pub fn TextArea(
    #[props(default = "".to_string())] id: String,
    #[props(default = 6)] rows: u32,
    value: String,
    oninput: Callback<String>,
) -> Element {
    rsx! {
        textarea {
            id: "{id}",
            rows: "{rows}",
            value: "{value}",
            class: "block w-full border-gray-300 rounded-md shadow-sm focus:ring-blue-500 focus:border-blue-500 sm:text-sm",
            oninput: move |evt| oninput.call(evt.value()),
        }
    }
}

/// Select over `(value, label)` pairs with an optional empty choice
#[component]
pub fn Select(
    #[props(default = "".to_string())] id: String,
    options: Vec<(String, String)>,
    value: String,
    #[props(default = None)] placeholder: Option<String>,
    onchange: Callback<String>,
) -> Element {
    rsx! {
        select {
            id: "{id}",
            class: "block w-full border-gray-300 rounded-md shadow-sm focus:ring-blue-500 focus:border-blue-500 sm:text-sm",
            onchange: move |evt| onchange.call(evt.value()),
            if let Some(text) = placeholder {
                option { value: "", selected: value.is_empty(), "{text}" }
            }
            for (option_value, label) in options {
                option {
                    key: "{option_value}",
                    value: "{option_value}",
                    selected: option_value == value,
                    "{label}"
                }
            }
        }
    }
}

/// Label, control and the field's first error
#[component]
pub fn FormField(
    #[props(default = "".to_string())] label: String,
    #[props(default = "".to_string())] id: String,
    #[props(default = false)] required: bool,
    #[props(default = None)] error: Option<String>,
    #[props(default = "".to_string())] class: String,
    children: Element,
) -> Element {
    rsx! {
        div {
            class: format!("space-y-1 {}", class),
            if !label.is_empty() {
                label {
                    r#for: "{id}",
                    class: "block text-sm font-medium text-gray-700",
                    "{label}"
                    if required {
                        span { class: "text-red-500 ml-1", "*" }
                    }
                }
            }
            {children}
            if let Some(message) = error {
                p { class: "text-sm text-red-600", "{message}" }
            }
        }
    }
}

/// Modal component
#[component]
pub fn Modal(
    #[props(default = false)] show: bool,
    #[props(default = "".to_string())] title: String,
    #[props(default = false)] wide: bool,
    on_close: Callback<()>,
    children: Element,
) -> Element {
    if !show {
        return rsx! {};
    }

    rsx! {
        div {
            class: "fixed inset-0 z-50 overflow-y-auto",
            div {
                class: "fixed inset-0 bg-gray-500 bg-opacity-75",
                onclick: move |_| on_close.call(()),
            }
            div {
                class: "flex min-h-full items-center justify-center p-4",
                div {
                    class: format!(
                        "relative w-full rounded-lg bg-white shadow-xl {}",
                        if wide { "max-w-4xl" } else { "max-w-lg" }
                    ),
                    onclick: |evt| evt.stop_propagation(),
                    if !title.is_empty() {
                        div {
                            class: "flex items-center justify-between px-6 pt-5",
                            h3 { class: "text-lg font-medium text-gray-900", "{title}" }
                            button {
                                r#type: "button",
                                class: "text-gray-400 hover:text-gray-600",
                                onclick: move |_| on_close.call(()),
                                "✕"
                            }
                        }
                    }
                    div { class: "px-6 py-5", {children} }
                }
            }
        }
    }
}

/// Yes / no dialog for destructive actions
#[component]
pub fn ConfirmDialog(
    show: bool,
    message: String,
    #[props(default = false)] busy: bool,
    on_confirm: Callback<()>,
    on_cancel: Callback<()>,
) -> Element {
    rsx! {
        Modal {
            show,
            title: "Are you sure?".to_string(),
            on_close: on_cancel,
            p { class: "text-sm text-gray-600", "{message}" }
            div {
                class: "mt-6 flex justify-end space-x-3",
                button {
                    r#type: "button",
                    class: button_class(ButtonVariant::Secondary, false),
                    onclick: move |_| on_cancel.call(()),
                    "Cancel"
                }
                button {
                    r#type: "button",
                    class: button_class(ButtonVariant::Danger, busy),
                    disabled: busy,
                    onclick: move |_| on_confirm.call(()),
                    if busy {
                        Spinner { class: "-ml-1 mr-2 h-4 w-4".to_string() }
                    }
                    "Delete"
                }
            }
        }
    }
}

/// Loading spinner component
#[component]
pub fn Spinner(#[props(default = "h-6 w-6".to_string())] class: String) -> Element {
    rsx! {
        svg {
            class: format!("animate-spin {}", class),
            xmlns: "http://www.w3.org/2000/svg",
            fill: "none",
            view_box: "0 0 24 24",
            circle {
                class: "opacity-25",
                cx: "12",
                cy: "12",
                r: "10",
                stroke: "currentColor",
                stroke_width: "4"
            }
            path {
                class: "opacity-75",
                fill: "currentColor",
                d: "M4 12a8 8 0 018-8V0C5.373 0 0 5.373 0 12h4z"
            }
        }
    }
}

/// Card component
#[component]
pub fn Card(
    #[props(default = "".to_string())] title: String,
    #[props(default = None)] actions: Option<Element>,
    #[props(default = "".to_string())] class: String,
    children: Element,
) -> Element {
    rsx! {
        div {
            class: format!("bg-white overflow-hidden shadow rounded-lg {}", class),
            if !title.is_empty() || actions.is_some() {
                div {
                    class: "px-4 py-4 sm:px-6 border-b border-gray-200 flex items-center justify-between",
                    h3 { class: "text-lg font-medium text-gray-900", "{title}" }
                    if let Some(actions_el) = actions {
                        div { class: "flex space-x-3", {actions_el} }
                    }
                }
            }
            div { class: "px-4 py-5 sm:p-6", {children} }
        }
    }
}

/// Pill showing a status label
#[component]
pub fn StatusBadge(label: String, #[props(default = "bg-gray-100 text-gray-800".to_string())] class: String) -> Element {
    rsx! {
        span {
            class: format!("inline-flex items-center px-2.5 py-0.5 rounded-full text-xs font-medium {}", class),
            "{label}"
        }
    }
}

/// Inline error with a retry link
#[component]
pub fn LoadError(message: String, on_retry: Callback<()>) -> Element {
    rsx! {
        div {
            class: "rounded-md bg-red-50 border border-red-200 p-4 text-sm text-red-700 flex justify-between",
            span { "{message}" }
            button {
                r#type: "button",
                class: "font-medium underline",
                onclick: move |_| on_retry.call(()),
                "Retry"
            }
        }
    }
}
