// src/ui/pages/discounts.rs - Time-boxed product discounts

use std::collections::BTreeSet;

use chrono::NaiveDate;
use dioxus::prelude::*;

use crate::{
    api::ProductApi,
    catalog::{format_price, FieldErrors, Product},
    discount::{Discount, DiscountField, DiscountForm, TimeRange},
    types::DiscountId,
    ui::{
        components::{
            button_class, ButtonVariant, ConfirmDialog, FormField, LoadError, Modal, Select,
            Spinner, TextInput,
        },
        pages::{failure_text, EmptyState, PageWrapper, TABLE_CLASS, TD_CLASS, TH_CLASS},
        state::{use_cancel_token, use_notify, use_services},
        NotificationType,
    },
};

const DATE_FORMAT: &str = "%Y-%m-%d";

#[component]
pub fn Discounts() -> Element {
    let services = use_services();
    let token = use_cancel_token();
    let notify = use_notify();

    let mut discounts = use_resource({
        let api = services.api.clone();
        let token = token.clone();
        move || {
            let api = api.clone();
            let token = token.clone();
            async move { api.list_discounts(&token).await }
        }
    });

    let products = use_resource({
        let api = services.api.clone();
        let token = token.clone();
        move || {
            let api = api.clone();
            let token = token.clone();
            async move { api.find_all_products(&token).await }
        }
    });

    let mut selected = use_signal(BTreeSet::<DiscountId>::new);
    // None: closed, Some(None): create, Some(Some(d)): edit
    let mut editing = use_signal(|| None::<Option<Discount>>);
    let mut pending_delete = use_signal(|| None::<Vec<DiscountId>>);
    let mut deleting = use_signal(|| false);

    let product_list: Vec<Product> = products
        .read()
        .as_ref()
        .and_then(|r| r.as_ref().ok())
        .cloned()
        .unwrap_or_default();

    let confirm_delete = {
        let api = services.api.clone();
        let token = token.clone();
        move |_: ()| {
            let Some(ids) = pending_delete() else {
                return;
            };
            let api = api.clone();
            let token = token.clone();
            deleting.set(true);
            spawn(async move {
                let result = match ids.as_slice() {
                    [id] => api.delete_discount(id, &token).await,
                    many => api.bulk_delete_discounts(many, &token).await,
                };
                match result {
                    Ok(()) => {
                        notify.call((NotificationType::Success, "Discount deleted".to_string()));
                        selected.write().clear();
                        discounts.restart();
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
    let delete_count = pending_delete.read().as_ref().map(Vec::len).unwrap_or_default();

    rsx! {
        PageWrapper {
            title: "Discount".to_string(),
            actions: Some(rsx! {
                if selected_count > 0 {
                    button {
                        r#type: "button",
                        class: button_class(ButtonVariant::Danger, false),
                        onclick: move |_| {
                            let ids: Vec<DiscountId> = selected.read().iter().cloned().collect();
                            pending_delete.set(Some(ids));
                        },
                        "Delete selected ({selected_count})"
                    }
                }
                button {
                    r#type: "button",
                    class: button_class(ButtonVariant::Primary, false),
                    onclick: move |_| editing.set(Some(None)),
                    "+ Add discount"
                }
            }),

            div {
                class: "bg-white shadow rounded-lg overflow-x-auto",
                match &*discounts.read() {
                    None => rsx! { div { class: "p-6 flex justify-center", Spinner {} } },
                    Some(Err(e)) => rsx! {
                        if let Some(message) = failure_text(e) {
                            div { class: "p-4", LoadError { message, on_retry: move |_| discounts.restart() } }
                        }
                    },
                    Some(Ok(rows)) if rows.is_empty() => rsx! {
                        EmptyState { icon: "🏷".to_string(), title: "No discounts yet".to_string() }
                    },
                    Some(Ok(rows)) => rsx! {
                        table {
                            class: TABLE_CLASS,
                            thead {
                                class: "bg-gray-50",
                                tr {
                                    th { class: TH_CLASS, "" }
                                    th { class: TH_CLASS, "Product" }
                                    th { class: TH_CLASS, "Price" }
                                    th { class: TH_CLASS, "Discount" }
                                    th { class: TH_CLASS, "Time range" }
                                    th { class: TH_CLASS, "Date" }
                                    th { class: TH_CLASS, "" }
                                }
                            }
                            tbody {
                                class: "divide-y divide-gray-200",
                                for discount in rows.iter().cloned() {
                                    tr {
                                        key: "{discount.id}",
                                        td {
                                            class: TD_CLASS,
                                            input {
                                                r#type: "checkbox",
                                                checked: selected.read().contains(&discount.id),
                                                onchange: {
                                                    let id = discount.id.clone();
                                                    move |_| {
                                                        let mut set = selected.write();
                                                        if !set.remove(&id) {
                                                            set.insert(id.clone());
                                                        }
                                                    }
                                                },
                                            }
                                        }
                                        td { class: TD_CLASS, "{discount.product.name}" }
                                        td { class: TD_CLASS, {format_price(discount.product.price)} }
                                        td { class: TD_CLASS, "{discount.discount_value}%" }
                                        td { class: TD_CLASS, "{discount.time_range}" }
                                        td { class: TD_CLASS, {discount.date.format("%d/%m/%Y").to_string()} }
                                        td {
                                            class: format!("{} text-right space-x-2", TD_CLASS),
                                            button {
                                                r#type: "button",
                                                class: "text-blue-600 hover:underline",
                                                onclick: {
                                                    let discount = discount.clone();
                                                    move |_| editing.set(Some(Some(discount.clone())))
                                                },
                                                "Edit"
                                            }
                                            button {
                                                r#type: "button",
                                                class: "text-red-600 hover:underline",
                                                onclick: {
                                                    let id = discount.id.clone();
                                                    move |_| pending_delete.set(Some(vec![id.clone()]))
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
            DiscountDialog {
                existing,
                products: product_list,
                on_close: move |_| editing.set(None),
                on_saved: move |_| {
                    editing.set(None);
                    discounts.restart();
                },
            }
        }

        ConfirmDialog {
            show: pending_delete.read().is_some(),
            message: format!("Delete {} discount(s)?", delete_count),
            busy: deleting(),
            on_confirm: confirm_delete,
            on_cancel: move |_| pending_delete.set(None),
        }
    }
}

#[component]
fn DiscountDialog(
    existing: Option<Discount>,
    products: Vec<Product>,
    on_close: Callback<()>,
    on_saved: Callback<()>,
) -> Element {
    let services = use_services();
    let token = use_cancel_token();
    let notify = use_notify();

    let initial = existing.as_ref().map(DiscountForm::from_discount).unwrap_or_default();
    let mut form = use_signal(move || initial);
    let mut value_text = use_signal(|| {
        existing
            .as_ref()
            .map(|d| d.discount_value.to_string())
            .unwrap_or_default()
    });
    let mut errors = use_signal(FieldErrors::<DiscountField>::new);
    let mut saving = use_signal(|| false);
    let editing_id = existing.as_ref().map(|d| d.id.clone());
    let title = if editing_id.is_some() { "Edit discount" } else { "Add discount" };

    let product_options: Vec<(String, String)> = products
        .iter()
        .map(|p| (p.id.clone(), p.name.clone()))
        .collect();
    let time_options: Vec<(String, String)> = TimeRange::ALL
        .iter()
        .map(|r| (r.as_str().to_string(), r.as_str().to_string()))
        .collect();

    let save = move |_: MouseEvent| {
        if saving() {
            return;
        }
        let valid_ids: Vec<&str> = products.iter().map(|p| p.id.as_str()).collect();
        let payload = match form.read().to_payload(&valid_ids) {
            Ok(payload) => payload,
            Err(found) => {
                errors.set(found);
                return;
            }
        };
        errors.set(FieldErrors::new());
        saving.set(true);
        let api = services.api.clone();
        let token = token.clone();
        let editing_id = editing_id.clone();
        spawn(async move {
            let result = match &editing_id {
                Some(id) => api.update_discount(id, &payload, &token).await,
                None => api.create_discount(&payload, &token).await,
            };
            saving.set(false);
            match result {
                Ok(_) => {
                    notify.call((NotificationType::Success, "Discount saved".to_string()));
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
    let error = |field: DiscountField| errors.read().get(field).map(str::to_string);

    rsx! {
        Modal {
            show: true,
            title: title.to_string(),
            on_close,
            div {
                class: "space-y-4",
                FormField {
                    label: "Product".to_string(),
                    required: true,
                    error: error(DiscountField::Product),
                    Select {
                        options: product_options,
                        value: current.product_id.clone(),
                        placeholder: Some("Select a product".to_string()),
                        onchange: move |value: String| form.write().product_id = value,
                    }
                }
                FormField {
                    label: "Discount value (%)".to_string(),
                    required: true,
                    error: error(DiscountField::DiscountValue),
                    TextInput {
                        input_type: "number".to_string(),
                        value: value_text(),
                        oninput: move |value: String| {
                            form.write().discount_value = value.trim().parse::<i64>().ok();
                            value_text.set(value);
                        },
                    }
                }
                FormField {
                    label: "Time range".to_string(),
                    required: true,
                    error: error(DiscountField::TimeRange),
                    Select {
                        options: time_options,
                        value: current.time_range.map(|r| r.as_str().to_string()).unwrap_or_default(),
                        placeholder: Some("Select a time range".to_string()),
                        onchange: move |value: String| form.write().time_range = value.parse::<TimeRange>().ok(),
                    }
                }
                FormField {
                    label: "Date".to_string(),
                    required: true,
                    error: error(DiscountField::Date),
                    TextInput {
                        input_type: "date".to_string(),
                        value: current.date.map(|d| d.format(DATE_FORMAT).to_string()).unwrap_or_default(),
                        oninput: move |value: String| {
                            form.write().date = NaiveDate::parse_from_str(&value, DATE_FORMAT).ok();
                        },
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
