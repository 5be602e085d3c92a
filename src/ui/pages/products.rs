// src/ui/pages/products.rs - Product table and the variant editor dialog

use dioxus::prelude::*;

use crate::{
    api::ProductApi,
    catalog::{
        format_price, stock_index, validation::Parsed, Category, EditorMode, EditorStep, Product, ProductEditor,
        ProductField, ProductListing, ProductSort, StockStatus,
    },
    ui::{
        components::{
            button_class, ButtonVariant, ConfirmDialog, FormField, ImagePicker, LoadError, Modal,
            Pagination, Select, Spinner, StatusBadge, TextArea, TextInput, TypedInput,
        },
        pages::{failure_text, EmptyState, PageWrapper, TABLE_CLASS, TD_CLASS, TH_CLASS},
        state::{use_cancel_token, use_notify, use_services},
        NotificationType,
    },
};

/// Product list page
#[component]
pub fn Products() -> Element {
    let services = use_services();
    let token = use_cancel_token();
    let notify = use_notify();
    let catalog = services.config.catalog.clone();
    let page_size = catalog.page_size;

    let mut products = use_resource({
        let api = services.api.clone();
        let token = token.clone();
        move || {
            let api = api.clone();
            let token = token.clone();
            async move { api.find_all_products(&token).await }
        }
    });

    let categories = use_resource({
        let api = services.api.clone();
        let token = token.clone();
        move || {
            let api = api.clone();
            let token = token.clone();
            async move { api.list_categories(&token).await }
        }
    });

    let mut listing = use_signal(move || ProductListing::new(page_size));
    let mut editor = use_signal(ProductEditor::new);
    let mut dialog_open = use_signal(|| false);
    let mut pending_delete = use_signal(|| None::<Product>);
    let mut deleting = use_signal(|| false);

    let category_list: Vec<Category> = categories
        .read()
        .as_ref()
        .and_then(|r| r.as_ref().ok())
        .cloned()
        .unwrap_or_default();

    let confirm_delete = {
        let api = services.api.clone();
        let token = token.clone();
        move |_: ()| {
            let Some(product) = pending_delete() else {
                return;
            };
            let api = api.clone();
            let token = token.clone();
            deleting.set(true);
            spawn(async move {
                match api.delete_product(&product.id, &token).await {
                    Ok(()) => {
                        notify.call((NotificationType::Success, "Product deleted".to_string()));
                        products.restart();
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

    let sort_options: Vec<(String, String)> = ProductSort::ALL
        .iter()
        .map(|s| (s.as_str().to_string(), s.label().to_string()))
        .collect();
    let delete_message = pending_delete
        .read()
        .as_ref()
        .map(|p| format!("Delete \"{}\"? This cannot be undone.", p.name))
        .unwrap_or_default();

    rsx! {
        PageWrapper {
            title: "Products".to_string(),
            actions: Some(rsx! {
                button {
                    r#type: "button",
                    class: button_class(ButtonVariant::Primary, false),
                    onclick: move |_| {
                        editor.set(ProductEditor::new());
                        dialog_open.set(true);
                    },
                    "+ Add product"
                }
            }),

            div {
                class: "flex flex-col sm:flex-row sm:items-center sm:justify-between gap-3",
                div {
                    class: "sm:w-72",
                    TextInput {
                        placeholder: "Search by name".to_string(),
                        value: listing.read().search.clone(),
                        oninput: move |value: String| listing.write().set_search(value),
                    }
                }
                div {
                    class: "sm:w-56",
                    Select {
                        options: sort_options,
                        value: listing.read().sort.as_str().to_string(),
                        onchange: move |value: String| {
                            if let Ok(sort) = value.parse::<ProductSort>() {
                                listing.write().set_sort(sort);
                            }
                        },
                    }
                }
            }

            div {
                class: "bg-white shadow rounded-lg overflow-x-auto",
                match &*products.read() {
                    None => rsx! { div { class: "p-6 flex justify-center", Spinner {} } },
                    Some(Err(e)) => rsx! {
                        if let Some(message) = failure_text(e) {
                            div { class: "p-4", LoadError { message, on_retry: move |_| products.restart() } }
                        }
                    },
                    Some(Ok(all)) => {
                        let state = listing.read().clone();
                        let total_rows = state.visible(all).len();
                        let total_pages = state.page_count(total_rows) as u32;
                        let rows: Vec<Product> = state.page_rows(all).into_iter().cloned().collect();
                        rsx! {
                            if rows.is_empty() {
                                EmptyState { title: "No products found".to_string() }
                            } else {
                                table {
                                    class: TABLE_CLASS,
                                    thead {
                                        class: "bg-gray-50",
                                        tr {
                                            th { class: TH_CLASS, "Product" }
                                            th { class: TH_CLASS, "Category" }
                                            th { class: TH_CLASS, "Price" }
                                            th { class: TH_CLASS, "Discount" }
                                            th { class: TH_CLASS, "Stock" }
                                            th { class: TH_CLASS, "" }
                                        }
                                    }
                                    tbody {
                                        class: "divide-y divide-gray-200",
                                        for product in rows {
                                            ProductRow {
                                                key: "{product.id}",
                                                product: product.clone(),
                                                low_stock_threshold: catalog.low_stock_threshold,
                                                on_edit: move |p: Product| {
                                                    editor.set(ProductEditor::for_product(&p));
                                                    dialog_open.set(true);
                                                },
                                                on_delete: move |p: Product| pending_delete.set(Some(p)),
                                            }
                                        }
                                    }
                                }
                            }
                            div {
                                class: "px-4 pb-4",
                                Pagination {
                                    current: state.page as u32 + 1,
                                    total_pages,
                                    on_change: move |page: u32| listing.write().page = page.saturating_sub(1) as usize,
                                }
                            }
                        }
                    }
                }
            }
        }

        if dialog_open() {
            ProductDialog {
                editor,
                categories: category_list,
                sizes: catalog.sizes.clone(),
                on_close: move |_| dialog_open.set(false),
                on_saved: move |_| {
                    dialog_open.set(false);
                    products.restart();
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
fn ProductRow(
    product: Product,
    low_stock_threshold: u64,
    on_edit: Callback<Product>,
    on_delete: Callback<Product>,
) -> Element {
    let status = StockStatus::from_total(product.total_stock(), low_stock_threshold);
    let thumbnail = product
        .product_details
        .first()
        .map(|d| d.img_url.clone())
        .unwrap_or_default();
    let edit_target = product.clone();
    let delete_target = product.clone();

    rsx! {
        tr {
            td {
                class: TD_CLASS,
                div {
                    class: "flex items-center space-x-3",
                    if !thumbnail.is_empty() {
                        img { class: "h-10 w-10 rounded object-cover", src: "{thumbnail}", alt: "{product.name}" }
                    }
                    span { class: "font-medium text-gray-900", "{product.name}" }
                }
            }
            td { class: TD_CLASS, {product.category.display_label()} }
            td { class: TD_CLASS, {format_price(product.price)} }
            td { class: TD_CLASS, "{product.discount}%" }
            td {
                class: TD_CLASS,
                span { class: "mr-2", "{product.total_stock()}" }
                StatusBadge { label: status.label().to_string(), class: status.css_class().to_string() }
            }
            td {
                class: format!("{} text-right space-x-2", TD_CLASS),
                button {
                    r#type: "button",
                    class: "text-blue-600 hover:underline",
                    onclick: move |_| on_edit.call(edit_target.clone()),
                    "Edit"
                }
                button {
                    r#type: "button",
                    class: "text-red-600 hover:underline",
                    onclick: move |_| on_delete.call(delete_target.clone()),
                    "Delete"
                }
            }
        }
    }
}

/// Two-step product dialog: variant configuration, then per-variant stock
#[component]
fn ProductDialog(
    mut editor: Signal<ProductEditor>,
    categories: Vec<Category>,
    sizes: Vec<String>,
    on_close: Callback<()>,
    on_saved: Callback<Product>,
) -> Element {
    let services = use_services();
    let token = use_cancel_token();
    let notify = use_notify();
    let state = editor.read().clone();

    let title = match state.mode() {
        EditorMode::Create => "Add product",
        EditorMode::Edit(_) => "Edit product",
    };

    let submit = {
        let categories = categories.clone();
        move |_: MouseEvent| {
            let Some(submission) = editor.write().prepare_submission(&categories) else {
                return;
            };
            let created = submission.mode == EditorMode::Create;
            let api = services.api.clone();
            let token = token.clone();
            spawn(async move {
                let outcome = submission.send(&api, &token).await;
                editor.write().finish_submission(&outcome);
                match outcome {
                    Ok(product) => {
                        let message = if created { "Product created" } else { "Product updated" };
                        notify.call((NotificationType::Success, message.to_string()));
                        on_saved.call(product);
                    }
                    Err(e) => {
                        if let Some(message) = failure_text(&e) {
                            notify.call((NotificationType::Error, message));
                        }
                    }
                }
            });
        }
    };

    rsx! {
        Modal {
            show: true,
            title: title.to_string(),
            wide: true,
            on_close,
            match state.step() {
                EditorStep::Configure => rsx! {
                    ConfigureStep { editor, categories: categories.clone(), sizes: sizes.clone() }
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
                            class: button_class(ButtonVariant::Primary, !state.can_enter_stock()),
                            disabled: !state.can_enter_stock(),
                            onclick: move |_| {
                                editor.write().enter_stock_step();
                            },
                            "Next: stock"
                        }
                    }
                },
                EditorStep::Stock => rsx! {
                    StockStep { editor }
                    div {
                        class: "mt-6 flex justify-between",
                        button {
                            r#type: "button",
                            class: button_class(ButtonVariant::Secondary, false),
                            onclick: move |_| editor.write().back_to_configure(),
                            "Back"
                        }
                        button {
                            r#type: "button",
                            class: button_class(ButtonVariant::Primary, state.is_submitting()),
                            disabled: state.is_submitting(),
                            onclick: submit,
                            if state.is_submitting() {
                                Spinner { class: "-ml-1 mr-2 h-4 w-4".to_string() }
                            }
                            "Save"
                        }
                    }
                },
            }
        }
    }
}

#[component]
fn ConfigureStep(mut editor: Signal<ProductEditor>, categories: Vec<Category>, sizes: Vec<String>) -> Element {
    let state = editor.read().clone();
    let error = |field: ProductField| state.error(field).map(str::to_string);
    let category_options: Vec<(String, String)> = categories
        .iter()
        .map(|c| (c.label(), c.display_label()))
        .collect();
    let price_text = state.price().map(|p| p.to_string()).unwrap_or_default();
    let discount_text = state.discount().to_string();

    rsx! {
        div {
            class: "grid grid-cols-1 gap-4 md:grid-cols-2",
            FormField {
                label: "Name".to_string(),
                id: "product-name".to_string(),
                required: true,
                error: error(ProductField::Name),
                TextInput {
                    id: "product-name".to_string(),
                    value: state.name().to_string(),
                    oninput: move |value: String| editor.write().set_name(value),
                }
            }
            FormField {
                label: "Category".to_string(),
                id: "product-category".to_string(),
                required: true,
                error: error(ProductField::Category),
                Select {
                    id: "product-category".to_string(),
                    options: category_options,
                    value: state.category_label().to_string(),
                    placeholder: Some("Select a category".to_string()),
                    onchange: move |value: String| editor.write().set_category(value),
                }
            }
            FormField {
                label: "Price".to_string(),
                id: "product-price".to_string(),
                required: true,
                error: error(ProductField::Price),
                TypedInput::<f64> {
                    id: "product-price".to_string(),
                    value: price_text,
                    invalid: state.error(ProductField::Price).is_some(),
                    on_parsed: move |parsed: Parsed<f64>| editor.write().set_price(parsed),
                }
            }
            FormField {
                label: "Discount (%)".to_string(),
                id: "product-discount".to_string(),
                error: error(ProductField::Discount),
                TypedInput::<Option<f64>> {
                    id: "product-discount".to_string(),
                    value: discount_text,
                    invalid: state.error(ProductField::Discount).is_some(),
                    on_parsed: move |parsed: Parsed<Option<f64>>| editor.write().set_discount(parsed),
                }
            }
        }

        FormField {
            class: "mt-4".to_string(),
            label: "Sizes".to_string(),
            required: true,
            error: error(ProductField::Sizes),
            div {
                class: "flex flex-wrap gap-2",
                for size in sizes {
                    button {
                        key: "{size}",
                        r#type: "button",
                        class: if state.sizes().contains(&size) {
                            "px-3 py-1 rounded-md border text-sm bg-blue-600 text-white border-blue-600"
                        } else {
                            "px-3 py-1 rounded-md border text-sm bg-white text-gray-700 border-gray-300 hover:bg-gray-50"
                        },
                        onclick: {
                            let size = size.clone();
                            move |_| editor.write().toggle_size(&size)
                        },
                        "{size}"
                    }
                }
            }
        }

        FormField {
            class: "mt-4 md:w-1/3".to_string(),
            label: "Number of colors".to_string(),
            id: "product-colors".to_string(),
            required: true,
            error: error(ProductField::NumberOfColors),
            TextInput {
                id: "product-colors".to_string(),
                input_type: "number".to_string(),
                value: state.color_count_input().to_string(),
                oninput: move |value: String| editor.write().set_color_count(value),
            }
        }

        if let Some(message) = state.uniqueness_message().or(state.error(ProductField::Colors)) {
            p { class: "mt-2 text-sm text-red-600", "{message}" }
        }

        div {
            class: "mt-4 space-y-3",
            for (i, slot) in state.slots().iter().cloned().enumerate() {
                div {
                    key: "{i}",
                    class: "grid grid-cols-1 gap-3 md:grid-cols-3 items-start border rounded-md p-3",
                    FormField {
                        label: format!("Color {}", i + 1),
                        error: error(ProductField::Color(i)),
                        input {
                            r#type: "color",
                            class: "h-9 w-16 rounded border border-gray-300",
                            value: "{slot.color_hex}",
                            oninput: move |evt| editor.write().set_color_hex(i, evt.value()),
                        }
                    }
                    FormField {
                        label: "Color name".to_string(),
                        error: error(ProductField::ColorName(i)),
                        TextInput {
                            value: slot.color_name.clone(),
                            oninput: move |value: String| editor.write().set_color_name(i, value),
                        }
                    }
                    FormField {
                        label: "Image".to_string(),
                        error: error(ProductField::Image(i)),
                        ImagePicker {
                            id: format!("product-image-{}", i),
                            current_url: slot.image_url.clone(),
                            on_uploaded: move |url: Option<String>| editor.write().set_image(i, url),
                            on_clear: Some(EventHandler::new(move |_: ()| editor.write().clear_image(i))),
                        }
                    }
                }
            }
        }

        FormField {
            class: "mt-4".to_string(),
            label: "Description".to_string(),
            id: "product-description".to_string(),
            required: true,
            error: error(ProductField::Description),
            TextArea {
                id: "product-description".to_string(),
                value: state.description().to_string(),
                oninput: move |value: String| editor.write().set_description(value),
            }
        }
    }
}

/// Size × color grid of stock inputs
#[component]
fn StockStep(mut editor: Signal<ProductEditor>) -> Element {
    let state = editor.read().clone();
    let color_count = state.slots().len();
    let stock_all_text = state.stock_for_all().map(|v| v.to_string()).unwrap_or_default();

    rsx! {
        FormField {
            class: "md:w-1/3".to_string(),
            label: "Stock for all variants".to_string(),
            id: "stock-all".to_string(),
            error: state.error(ProductField::StockForAll).map(str::to_string),
            TypedInput::<Option<u32>> {
                id: "stock-all".to_string(),
                value: stock_all_text,
                on_parsed: move |parsed: Parsed<Option<u32>>| editor.write().set_stock_for_all(parsed),
            }
        }

        div {
            class: "mt-4 overflow-x-auto",
            table {
                class: TABLE_CLASS,
                thead {
                    tr {
                        th { class: TH_CLASS, "Size" }
                        for (j, slot) in state.slots().iter().enumerate() {
                            th {
                                key: "{j}",
                                class: TH_CLASS,
                                span {
                                    class: "inline-block h-3 w-3 rounded-full mr-1 align-middle",
                                    style: "background-color: {slot.color_hex}",
                                }
                                "{slot.color_name}"
                            }
                        }
                    }
                }
                tbody {
                    for (i, size) in state.sizes().iter().enumerate() {
                        tr {
                            key: "{size}",
                            td { class: TD_CLASS, "{size}" }
                            for j in 0..color_count {
                                {
                                    let k = stock_index(i, j, color_count);
                                    let value = state.stock().get(i, j).map(|v| v.to_string()).unwrap_or_default();
                                    let error = state.error(ProductField::Stock(k)).map(str::to_string);
                                    rsx! {
                                        td {
                                            key: "{k}",
                                            class: "px-2 py-2 align-top",
                                            TypedInput::<u32> {
                                                value,
                                                invalid: error.is_some(),
                                                on_parsed: move |parsed: Parsed<u32>| editor.write().set_stock(k, parsed),
                                            }
                                            if let Some(message) = error {
                                                p { class: "mt-1 text-xs text-red-600", "{message}" }
                                            }
                                        }
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}
