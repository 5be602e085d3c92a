// src/ui/components/pagination.rs

use dioxus::prelude::*;

/// Page numbers shown around `current` (1-based), at most `width` of them
pub fn page_window(current: u32, total: u32, width: u32) -> Vec<u32> {
    if total == 0 || width == 0 {
        return Vec::new();
    }
    let width = width.min(total);
    let current = current.clamp(1, total);
    let start = current
        .saturating_sub(width / 2)
        .max(1)
        .min(total - width + 1);
    (start..start + width).collect()
}

/// Previous / numbered / next controls over 1-based pages
#[component]
pub fn Pagination(current: u32, total_pages: u32, on_change: Callback<u32>) -> Element {
    if total_pages <= 1 {
        return rsx! {};
    }
    let pages = page_window(current, total_pages, 5);

    rsx! {
        nav {
            class: "flex items-center justify-end space-x-1 mt-4",
            button {
                r#type: "button",
                class: "px-3 py-1 rounded-md text-sm text-gray-600 hover:bg-gray-100 disabled:opacity-50",
                disabled: current <= 1,
                onclick: move |_| on_change.call(current.saturating_sub(1).max(1)),
                "‹"
            }
            for page in pages {
                button {
                    key: "{page}",
                    r#type: "button",
                    class: if page == current { "px-3 py-1 rounded-md text-sm bg-blue-600 text-white" } else { "px-3 py-1 rounded-md text-sm text-gray-700 hover:bg-gray-100" },
                    onclick: move |_| on_change.call(page),
                    "{page}"
                }
            }
            button {
                r#type: "button",
                class: "px-3 py-1 rounded-md text-sm text-gray-600 hover:bg-gray-100 disabled:opacity-50",
                disabled: current >= total_pages,
                onclick: move |_| on_change.call((current + 1).min(total_pages)),
                "›"
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_window() {
        assert_eq!(page_window(1, 3, 5), vec![1, 2, 3]);
        assert_eq!(page_window(5, 10, 5), vec![3, 4, 5, 6, 7]);
        assert_eq!(page_window(10, 10, 5), vec![6, 7, 8, 9, 10]);
        assert_eq!(page_window(1, 10, 5), vec![1, 2, 3, 4, 5]);
        assert!(page_window(1, 0, 5).is_empty());
    }
}
