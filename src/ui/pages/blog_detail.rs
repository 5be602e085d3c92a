// src/ui/pages/blog_detail.rs - Read-only view of one post

use dioxus::prelude::*;
#[allow(unused_imports)]
use dioxus_router::prelude::*;

use crate::{
    blog::Blog,
    ui::{
        components::{button_class, ButtonVariant, LoadError, Spinner},
        pages::{failure_text, PageWrapper},
        router::Route,
        state::{use_cancel_token, use_services},
    },
};

/// "By <author> · <date>", or just the date for an unnamed author
pub(crate) fn byline(blog: &Blog) -> String {
    let author = blog.author.full_name.trim();
    if author.is_empty() {
        blog.created_at.clone()
    } else {
        format!("By {} · {}", author, blog.created_at)
    }
}

#[component]
pub fn BlogDetail(slug: String) -> Element {
    let services = use_services();
    let token = use_cancel_token();

    let mut post = use_resource({
        let api = services.api.clone();
        let token = token.clone();
        let slug = slug.clone();
        move || {
            let api = api.clone();
            let token = token.clone();
            let slug = slug.clone();
            async move { api.get_blog(&slug, &token).await }
        }
    });

    rsx! {
        PageWrapper {
            title: "Blog detail".to_string(),
            actions: Some(rsx! {
                Link {
                    to: Route::Blogs {},
                    class: button_class(ButtonVariant::Secondary, false),
                    "← Back to blogs"
                }
            }),
            match &*post.read() {
                None => rsx! { div { class: "p-6 flex justify-center", Spinner {} } },
                Some(Err(e)) => rsx! {
                    if let Some(message) = failure_text(e) {
                        LoadError { message, on_retry: move |_| post.restart() }
                    }
                },
                Some(Ok(blog)) => rsx! {
                    article {
                        class: "bg-white shadow rounded-lg overflow-hidden",
                        if !blog.cover_image.is_empty() {
                            img { class: "h-64 w-full object-cover", src: "{blog.cover_image}", alt: "{blog.title}" }
                        }
                        div {
                            class: "p-6 space-y-4",
                            h2 { class: "text-2xl font-bold text-gray-900", "{blog.title}" }
                            p { class: "text-sm text-gray-500", {byline(blog)} }
                            p { class: "text-gray-700 italic", "{blog.description}" }
                            div {
                                class: "prose max-w-none",
                                dangerous_inner_html: "{blog.content}",
                            }
                        }
                    }
                },
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blog::Author;

    fn post(author: &str) -> Blog {
        Blog {
            id: "b1".to_string(),
            title: "Summer linen".to_string(),
            description: "What to wear".to_string(),
            content: "<p>Linen breathes.</p>".to_string(),
            slug: "summer-linen".to_string(),
            cover_image: String::new(),
            author: Author {
                id: "u1".to_string(),
                full_name: author.to_string(),
                avatar: None,
            },
            created_at: "2024-06-01".to_string(),
        }
    }

    #[test]
    fn test_byline() {
        assert_eq!(byline(&post("Mai Pham")), "By Mai Pham · 2024-06-01");
        assert_eq!(byline(&post("  ")), "2024-06-01");
    }
}
