// src/ui/components/typed_input.rs - Input bound to a parsed field value

use dioxus::prelude::*;

use crate::catalog::validation::{FieldValue, Parsed};

/// Text input that reports every edit as a parsed `T`.
///
/// The raw text is kept locally so a half-typed value such as `12.` or an
/// unparsable one stays visible; it is replaced from `value` only when the
/// two no longer parse to the same thing, e.g. after the form resets.
#[component]
pub fn TypedInput<T: FieldValue>(
    value: String,
    on_parsed: EventHandler<Parsed<T>>,
    #[props(default = "text".to_string())] input_type: String,
    #[props(default = "".to_string())] id: String,
    #[props(default = "".to_string())] placeholder: String,
    #[props(default = false)] invalid: bool,
) -> Element {
    let mut raw = use_signal(|| value.clone());

    use_effect(use_reactive!(|value| {
        let current = raw.peek().clone();
        if T::parse_field(&current) != T::parse_field(&value) {
            raw.set(value);
        }
    }));

    rsx! {
        input {
            r#type: "{input_type}",
            id: "{id}",
            placeholder: "{placeholder}",
            value: "{raw}",
            class: format!(
                "block w-full rounded-md shadow-sm sm:text-sm {}",
                if invalid { "border-red-400 focus:ring-red-500 focus:border-red-500" } else { "border-gray-300 focus:ring-blue-500 focus:border-blue-500" }
            ),
            oninput: move |evt| {
                let text = evt.value();
                on_parsed.call(T::parse_field(&text));
                raw.set(text);
            },
        }
    }
}
