// src/ui/pages/blogs.rs - Blog list with author and date filters

use std::collections::BTreeSet;

use chrono::NaiveDate;
use dioxus::prelude::*;
#[allow(unused_imports)]
use dioxus_router::prelude::*;

use crate::{
    blog::{Blog, BlogField, BlogForm, BlogListParams, BlogSort},
    catalog::FieldErrors,
    types::BlogSlug,
    ui::{
        components::{
            button_class, ButtonVariant, ConfirmDialog, FormField, ImagePicker, LoadError, Modal,
            Pagination, Select, Spinner, TextArea, TextInput,
        },
        pages::{failure_text, EmptyState, PageWrapper},
        router::Route,
        state::{use_cancel_token, use_notify, use_services},
        NotificationType,
    },
};

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Both ends or nothing; a reversed range is put in order
pub(crate) fn date_range(from: Option<NaiveDate>, to: Option<NaiveDate>) -> Vec<NaiveDate> {
    match (from, to) {
        (Some(a), Some(b)) if a <= b => vec![a, b],
        (Some(a), Some(b)) => vec![b, a],
        _ => Vec::new(),
    }
}

pub(crate) fn page_total(total: u32, limit: u32) -> u32 {
    total.div_ceil(limit.max(1))
}

#[component]
pub fn Blogs() -> Element {
    let services = use_services();
    let token = use_cancel_token();
    let notify = use_notify();

    let mut params = use_signal(BlogListParams::default);
    let mut search_text = use_signal(String::new);
    let mut date_from = use_signal(|| None::<NaiveDate>);
    let mut date_to = use_signal(|| None::<NaiveDate>);

    let mut blogs = use_resource({
        let api = services.api.clone();
        let token = token.clone();
        move || {
            let api = api.clone();
            let token = token.clone();
            let current = params();
            async move { api.list_blogs(&current, &token).await }
        }
    });

    let authors = use_resource({
        let api = services.api.clone();
        let token = token.clone();
        move || {
            let api = api.clone();
            let token = token.clone();
            async move { api.list_blog_authors(&token).await }
        }
    });

    let mut selected = use_signal(BTreeSet::<BlogSlug>::new);
    // None: closed, Some(None): create, Some(Some(b)): edit
    let mut editing = use_signal(|| None::<Option<Blog>>);
    let mut pending_delete = use_signal(|| None::<Vec<BlogSlug>>);
    let mut deleting = use_signal(|| false);

    let confirm_delete = {
        let api = services.api.clone();
        let token = token.clone();
        move |_: ()| {
            let Some(slugs) = pending_delete() else {
                return;
            };
            let api = api.clone();
            let token = token.clone();
            deleting.set(true);
            spawn(async move {
                let result = match slugs.as_slice() {
                    [slug] => api.delete_blog(slug, &token).await,
                    many => api.bulk_delete_blogs(many, &token).await,
                };
                match result {
                    Ok(()) => {
                        notify.call((NotificationType::Success, "Blog deleted".to_string()));
                        selected.write().clear();
                        blogs.restart();
                    }
                    Err(e) => {
                        if let Some(message) = failure_text(&e) {
                            notify.call((NotificationType::Error, message));
                        }
                    }
                }
                deleting.set(false);
                pending_delete.set(None);
            });
        }
    };

    let apply_dates = move || {
        let range = date_range(date_from(), date_to());
        if range != params.peek().create_date_range {
            let mut next = params();
            next.create_date_range = range;
            next.page = 1;
            params.set(next);
        }
    };
    let mut apply_from = apply_dates;
    let mut apply_to = apply_dates;

    let current = params();
    let sort_options: Vec<(String, String)> = BlogSort::ALL
        .iter()
        .map(|s| (s.code().to_string(), s.label().to_string()))
        .collect();
    let selected_count = selected.read().len();
    let delete_count = pending_delete.read().as_ref().map(Vec::len).unwrap_or_default();

    rsx! {
        PageWrapper {
            title: "Blog list".to_string(),
            actions: Some(rsx! {
                if selected_count > 0 {
                    button {
                        r#type: "button",
                        class: button_class(ButtonVariant::Danger, false),
                        onclick: move |_| {
                            let slugs: Vec<BlogSlug> = selected.read().iter().cloned().collect();
                            pending_delete.set(Some(slugs));
                        },
                        "Delete selected ({selected_count})"
                    }
                }
                button {
                    r#type: "button",
                    class: button_class(ButtonVariant::Primary, false),
                    onclick: move |_| editing.set(Some(None)),
                    "+ New blog"
                }
            }),

            div {
                class: "grid grid-cols-1 gap-6 lg:grid-cols-4",

                aside {
                    class: "space-y-4 bg-white shadow rounded-lg p-4",
                    form {
                        onsubmit: move |evt: FormEvent| {
                            evt.prevent_default();
                            let keyword = search_text().trim().to_string();
                            let mut next = params();
                            next.keyword = (!keyword.is_empty()).then_some(keyword);
                            next.page = 1;
                            params.set(next);
                        },
                        TextInput {
                            placeholder: "Search title".to_string(),
                            value: search_text(),
                            oninput: move |value: String| search_text.set(value),
                        }
                    }
                    FormField {
                        label: "Sort".to_string(),
                        Select {
                            options: sort_options,
                            value: current.sort.code().to_string(),
                            onchange: move |value: String| {
                                let mut next = params();
                                next.sort = BlogSort::from_code(&value);
                                next.page = 1;
                                params.set(next);
                            },
                        }
                    }
                    FormField {
                        label: "Created from".to_string(),
                        TextInput {
                            input_type: "date".to_string(),
                            value: date_from().map(|d| d.format(DATE_FORMAT).to_string()).unwrap_or_default(),
                            oninput: move |value: String| {
                                date_from.set(NaiveDate::parse_from_str(&value, DATE_FORMAT).ok());
                                apply_from();
                            },
                        }
                    }
                    FormField {
                        label: "Created to".to_string(),
                        TextInput {
                            input_type: "date".to_string(),
                            value: date_to().map(|d| d.format(DATE_FORMAT).to_string()).unwrap_or_default(),
                            oninput: move |value: String| {
                                date_to.set(NaiveDate::parse_from_str(&value, DATE_FORMAT).ok());
                                apply_to();
                            },
                        }
                    }
                    FormField {
                        label: "Authors".to_string(),
                        if let Some(Ok(list)) = &*authors.read() {
                            div {
                                class: "space-y-1",
                                for author in list.iter().cloned() {
                                    label {
                                        key: "{author.id}",
                                        class: "flex items-center space-x-2 text-sm text-gray-700",
                                        input {
                                            r#type: "checkbox",
                                            checked: current.authors.contains(&author.id),
                                            onchange: {
                                                let id = author.id.clone();
                                                move |_| params.write().toggle_author(&id)
                                            },
                                        }
                                        span { "{author.full_name}" }
                                    }
                                }
                            }
                        }
                    }
                }

                div {
                    class: "lg:col-span-3",
                    match &*blogs.read() {
                        None => rsx! { div { class: "p-6 flex justify-center", Spinner {} } },
                        Some(Err(e)) => rsx! {
                            if let Some(message) = failure_text(e) {
                                LoadError { message, on_retry: move |_| blogs.restart() }
                            }
                        },
                        Some(Ok(result)) if result.blogs.is_empty() => rsx! {
                            EmptyState { icon: "📝".to_string(), title: "No blogs found".to_string() }
                        },
                        Some(Ok(result)) => rsx! {
                            div {
                                class: "grid grid-cols-1 gap-4 md:grid-cols-2 xl:grid-cols-3",
                                for blog in result.blogs.iter().cloned() {
                                    BlogCard {
                                        key: "{blog.slug}",
                                        checked: selected.read().contains(&blog.slug),
                                        blog: blog.clone(),
                                        on_toggle: move |slug: BlogSlug| {
                                            let mut set = selected.write();
                                            if !set.remove(&slug) {
                                                set.insert(slug);
                                            }
                                        },
                                        on_edit: move |b: Blog| editing.set(Some(Some(b))),
                                        on_delete: move |slug: BlogSlug| pending_delete.set(Some(vec![slug])),
                                    }
                                }
                            }
                            Pagination {
                                current: current.page,
                                total_pages: page_total(result.total, current.limit),
                                on_change: move |page: u32| params.write().page = page,
                            }
                        },
                    }
                }
            }
        }

        if let Some(existing) = editing() {
            BlogDialog {
                existing,
                on_close: move |_| editing.set(None),
                on_saved: move |_| {
                    editing.set(None);
                    blogs.restart();
                },
            }
        }

        ConfirmDialog {
            show: pending_delete.read().is_some(),
            message: format!("Delete {} blog(s)?", delete_count),
            busy: deleting(),
            on_confirm: confirm_delete,
            on_cancel: move |_| pending_delete.set(None),
        }
    }
}

#[component]
fn BlogCard(
    blog: Blog,
    checked: bool,
    on_toggle: Callback<BlogSlug>,
    on_edit: Callback<Blog>,
    on_delete: Callback<BlogSlug>,
) -> Element {
    let slug = blog.slug.clone();
    let delete_slug = blog.slug.clone();
    let edit_target = blog.clone();

    rsx! {
        div {
            class: "bg-white shadow rounded-lg overflow-hidden flex flex-col",
            img { class: "h-40 w-full object-cover", src: "{blog.cover_image}", alt: "{blog.title}" }
            div {
                class: "p-4 flex-1 space-y-2",
                div {
                    class: "flex items-start justify-between",
                    Link {
                        to: Route::BlogDetail { slug: blog.slug.clone() },
                        class: "font-semibold text-gray-900 hover:text-blue-600",
                        "{blog.title}"
                    }
                    input {
                        r#type: "checkbox",
                        checked,
                        onchange: move |_| on_toggle.call(slug.clone()),
                    }
                }
                p { class: "text-sm text-gray-600 line-clamp-3", "{blog.description}" }
                p { class: "text-xs text-gray-400", "{blog.author.full_name} · {blog.created_at}" }
            }
            div {
                class: "px-4 pb-4 flex justify-end space-x-3 text-sm",
                button {
                    r#type: "button",
                    class: "text-blue-600 hover:underline",
                    onclick: move |_| on_edit.call(edit_target.clone()),
                    "Edit"
                }
                button {
                    r#type: "button",
                    class: "text-red-600 hover:underline",
                    onclick: move |_| on_delete.call(delete_slug.clone()),
                    "Delete"
                }
            }
        }
    }
}

#[component]
fn BlogDialog(existing: Option<Blog>, on_close: Callback<()>, on_saved: Callback<()>) -> Element {
    let services = use_services();
    let token = use_cancel_token();
    let notify = use_notify();

    let initial = existing.as_ref().map(BlogForm::from_blog).unwrap_or_default();
    let mut form = use_signal(move || initial);
    let mut errors = use_signal(FieldErrors::<BlogField>::new);
    let mut saving = use_signal(|| false);
    let editing_slug = existing.as_ref().map(|b| b.slug.clone());
    let title = if editing_slug.is_some() { "Edit blog" } else { "New blog" };

    let save = move |_: MouseEvent| {
        if saving() {
            return;
        }
        let input = form();
        let found = input.validate();
        let blocked = !found.is_empty();
        errors.set(found);
        if blocked {
            return;
        }
        saving.set(true);
        let api = services.api.clone();
        let token = token.clone();
        let editing_slug = editing_slug.clone();
        spawn(async move {
            let result = match &editing_slug {
                Some(slug) => api.update_blog(slug, &input, &token).await,
                None => api.create_blog(&input, &token).await,
            };
            saving.set(false);
            match result {
                Ok(blog) => {
                    tracing::info!(slug = %blog.slug, "blog saved");
                    notify.call((NotificationType::Success, "Blog saved".to_string()));
                    on_saved.call(());
                }
                Err(e) => {
                    if let Some(message) = failure_text(&e) {
                        notify.call((NotificationType::Error, message));
                    }
                }
            }
        });
    };

    let current = form.read().clone();
    let error = |field: BlogField| errors.read().get(field).map(str::to_string);

    rsx! {
        Modal {
            show: true,
            title: title.to_string(),
            wide: true,
            on_close,
            div {
                class: "space-y-4",
                FormField {
                    label: "Title".to_string(),
                    required: true,
                    error: error(BlogField::Title),
                    TextInput {
                        value: current.title.clone(),
                        oninput: move |value: String| form.write().title = value,
                    }
                }
                FormField {
                    label: "Description".to_string(),
                    required: true,
                    error: error(BlogField::Description),
                    TextArea {
                        rows: 3,
                        value: current.description.clone(),
                        oninput: move |value: String| form.write().description = value,
                    }
                }
                FormField {
                    label: "Cover image".to_string(),
                    required: true,
                    error: error(BlogField::CoverImage),
                    ImagePicker {
                        id: "blog-cover".to_string(),
                        current_url: current.cover_image.clone(),
                        on_uploaded: move |url: Option<String>| {
                            if let Some(url) = url {
                                form.write().cover_image = url;
                            }
                        },
                        on_clear: Some(EventHandler::new(move |_: ()| form.write().cover_image.clear())),
                    }
                }
                FormField {
                    label: "Content".to_string(),
                    required: true,
                    error: error(BlogField::Content),
                    TextArea {
                        rows: 12,
                        value: current.content.clone(),
                        oninput: move |value: String| form.write().content = value,
                    }
                }
            }
            div {
                class: "mt-6 flex justify-end space-x-3",
                button {
                    r#type: "button",
                    class: button_class(ButtonVariant::Secondary, false),
                    onclick: move |_| on_close.call(()),
                    "Cancel"
                }
                button {
                    r#type: "button",
                    class: button_class(ButtonVariant::Primary, saving()),
                    disabled: saving(),
                    onclick: save,
                    "Save"
                }
            }
        }
    }
}
