// src/ui/pages/categories.rs - Category management

use std::collections::BTreeSet;

use dioxus::prelude::*;

use crate::{
    catalog::{category::CategoryField, Category, CategoryInput, FieldErrors},
    types::CategoryId,
    ui::{
        components::{
            button_class, ButtonVariant, ConfirmDialog, FormField, LoadError, Modal, Spinner,
            TextInput,
        },
        pages::{failure_text, EmptyState, PageWrapper, TABLE_CLASS, TD_CLASS, TH_CLASS},
        state::{use_cancel_token, use_notify, use_services},
        NotificationType,
    },
};

/// What the confirm dialog will delete
#[derive(Debug, Clone, PartialEq)]
enum DeleteTarget {
    One(Category),
    Selected(Vec<CategoryId>),
}

#[component]
pub fn Categories() -> Element {
    let services = use_services();
    let token = use_cancel_token();
    let notify = use_notify();

    let mut categories = use_resource({
        let api = services.api.clone();
        let token = token.clone();
        move || {
            let api = api.clone();
            let token = token.clone();
            async move { api.list_categories(&token).await }
        }
    });

    let mut selected = use_signal(BTreeSet::<CategoryId>::new);
    // None: closed, Some(None): create, Some(Some(c)): edit
    let mut editing = use_signal(|| None::<Option<Category>>);
    let mut pending_delete = use_signal(|| None::<DeleteTarget>);
    let mut deleting = use_signal(|| false);

    let confirm_delete = {
        let api = services.api.clone();
        let token = token.clone();
        move |_: ()| {
            let Some(target) = pending_delete() else {
                return;
            };
            let api = api.clone();
            let token = token.clone();
            deleting.set(true);
            spawn(async move {
                let result = match &target {
                    DeleteTarget::One(category) => api.delete_category(&category.id, &token).await,
                    DeleteTarget::Selected(ids) => api.bulk_delete_categories(ids, &token).await,
                };
                match result {
                    Ok(()) => {
                        notify.call((NotificationType::Success, "Category deleted".to_string()));
                        selected.write().clear();
                        categories.restart();
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

    let selected_count = selected.read().len();
    let delete_message = match &*pending_delete.read() {
        Some(DeleteTarget::One(c)) => format!("Delete category \"{}\"?", c.display_label()),
        Some(DeleteTarget::Selected(ids)) => format!("Delete {} selected categories?", ids.len()),
        None => String::new(),
    };

    rsx! {
        PageWrapper {
            title: "Manage category".to_string(),
            actions: Some(rsx! {
                if selected_count > 0 {
                    button {
                        r#type: "button",
                        class: button_class(ButtonVariant::Danger, false),
                        onclick: move |_| {
                            let ids: Vec<CategoryId> = selected.read().iter().cloned().collect();
                            pending_delete.set(Some(DeleteTarget::Selected(ids)));
                        },
                        "Delete selected ({selected_count})"
                    }
                }
                button {
                    r#type: "button",
                    class: button_class(ButtonVariant::Primary, false),
                    onclick: move |_| editing.set(Some(None)),
                    "+ Add category"
                }
            }),

            div {
                class: "bg-white shadow rounded-lg overflow-x-auto",
                match &*categories.read() {
                    None => rsx! { div { class: "p-6 flex justify-center", Spinner {} } },
                    Some(Err(e)) => rsx! {
                        if let Some(message) = failure_text(e) {
                            div { class: "p-4", LoadError { message, on_retry: move |_| categories.restart() } }
                        }
                    },
                    Some(Ok(rows)) if rows.is_empty() => rsx! {
                        EmptyState { title: "No categories yet".to_string() }
                    },
                    Some(Ok(rows)) => rsx! {
                        table {
                            class: TABLE_CLASS,
                            thead {
                                class: "bg-gray-50",
                                tr {
                                    th { class: TH_CLASS, "" }
                                    th { class: TH_CLASS, "Gender" }
                                    th { class: TH_CLASS, "Type" }
                                    th { class: TH_CLASS, "" }
                                }
                            }
                            tbody {
                                class: "divide-y divide-gray-200",
                                for category in rows.iter().cloned() {
                                    tr {
                                        key: "{category.id}",
                                        td {
                                            class: TD_CLASS,
                                            input {
                                                r#type: "checkbox",
                                                checked: selected.read().contains(&category.id),
                                                onchange: {
                                                    let id = category.id.clone();
                                                    move |_| {
                                                        let mut set = selected.write();
                                                        if !set.remove(&id) {
                                                            set.insert(id.clone());
                                                        }
                                                    }
                                                },
                                            }
                                        }
                                        td { class: TD_CLASS, {crate::catalog::category::capitalize(&category.gender)} }
                                        td { class: TD_CLASS, {crate::catalog::category::capitalize(&category.kind)} }
                                        td {
                                            class: format!("{} text-right space-x-2", TD_CLASS),
                                            button {
                                                r#type: "button",
                                                class: "text-blue-600 hover:underline",
                                                onclick: {
                                                    let category = category.clone();
                                                    move |_| editing.set(Some(Some(category.clone())))
                                                },
                                                "Edit"
                                            }
                                            button {
                                                r#type: "button",
                                                class: "text-red-600 hover:underline",
                                                onclick: {
                                                    let category = category.clone();
                                                    move |_| pending_delete.set(Some(DeleteTarget::One(category.clone())))
                                                },
                                                "Delete"
                                            }
                                        }
                                    }
                                }
                            }
                        }
                    },
                }
            }
        }

        if let Some(existing) = editing() {
            CategoryDialog {
                existing,
                on_close: move |_| editing.set(None),
                on_saved: move |_| {
                    editing.set(None);
                    categories.restart();
                },
            }
        }

        ConfirmDialog {
            show: pending_delete.read().is_some(),
            message: delete_message,
            busy: deleting(),
            on_confirm: confirm_delete,
            on_cancel: move |_| pending_delete.set(None),
        }
    }
}

#[component]
fn CategoryDialog(existing: Option<Category>, on_close: Callback<()>, on_saved: Callback<()>) -> Element {
    let services = use_services();
    let token = use_cancel_token();
    let notify = use_notify();

    let initial = existing.as_ref().map(CategoryInput::from).unwrap_or_default();
    let mut form = use_signal(move || initial);
    let mut errors = use_signal(FieldErrors::<CategoryField>::new);
    let mut saving = use_signal(|| false);
    let editing_id = existing.as_ref().map(|c| c.id.clone());
    let title = if editing_id.is_some() { "Edit category" } else { "Add category" };

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
        let editing_id = editing_id.clone();
        spawn(async move {
            let result = match &editing_id {
                Some(id) => api.update_category(id, &input, &token).await,
                None => api.create_category(&input, &token).await,
            };
            saving.set(false);
            match result {
                Ok(category) => {
                    tracing::info!(category_id = %category.id, "category saved");
                    notify.call((NotificationType::Success, "Category saved".to_string()));
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

    rsx! {
        Modal {
            show: true,
            title: title.to_string(),
            on_close,
            div {
                class: "space-y-4",
                FormField {
                    label: "Gender".to_string(),
                    id: "category-gender".to_string(),
                    required: true,
                    error: errors.read().get(CategoryField::Gender).map(str::to_string),
                    TextInput {
                        id: "category-gender".to_string(),
                        placeholder: "men".to_string(),
                        value: form.read().gender.clone(),
                        oninput: move |value: String| form.write().gender = value,
                    }
                }
                FormField {
                    label: "Type".to_string(),
                    id: "category-type".to_string(),
                    required: true,
                    error: errors.read().get(CategoryField::Type).map(str::to_string),
                    TextInput {
                        id: "category-type".to_string(),
                        placeholder: "t-shirt".to_string(),
                        value: form.read().kind.clone(),
                        oninput: move |value: String| form.write().kind = value,
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
