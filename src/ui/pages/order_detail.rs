// src/ui/pages/order_detail.rs - One order with status and payment controls

use dioxus::prelude::*;
#[allow(unused_imports)]
use dioxus_router::prelude::*;

use crate::{
    catalog::format_price,
    orders::{OrderDetail as Detail, OrderStatus, OrderUpdate, PaymentMethod, PaymentStatus},
    ui::{
        components::{button_class, ButtonVariant, Card, LoadError, Select, Spinner, StatusBadge},
        pages::{
            failure_text,
            orders::{order_status_class, payment_status_class},
            PageWrapper, TABLE_CLASS, TD_CLASS, TH_CLASS,
        },
        router::Route,
        state::{use_cancel_token, use_notify, use_services},
        NotificationType,
    },
};

fn payment_method_label(method: PaymentMethod) -> &'static str {
    match method {
        PaymentMethod::Stripe => "Stripe",
        PaymentMethod::CashOnDelivery => "Cash on delivery",
        PaymentMethod::Other => "Other",
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum OrderAction {
    Cancel,
    Delete,
    Restore,
}

impl OrderAction {
    fn done_message(self) -> &'static str {
        match self {
            Self::Cancel => "Order cancelled",
            Self::Delete => "Order deleted",
            Self::Restore => "Order restored",
        }
    }
}

#[component]
pub fn OrderDetail(order_id: String) -> Element {
    let services = use_services();
    let token = use_cancel_token();

    let mut detail = use_resource({
        let api = services.api.clone();
        let token = token.clone();
        let order_id = order_id.clone();
        move || {
            let api = api.clone();
            let token = token.clone();
            let order_id = order_id.clone();
            async move { api.get_order(&order_id, &token).await }
        }
    });

    rsx! {
        PageWrapper {
            title: format!("Order #{}", order_id),
            actions: Some(rsx! {
                Link {
                    to: Route::Orders { query: String::new() },
                    class: button_class(ButtonVariant::Secondary, false),
                    "← Back to orders"
                }
            }),
            match &*detail.read() {
                None => rsx! { div { class: "p-6 flex justify-center", Spinner {} } },
                Some(Err(e)) => rsx! {
                    if let Some(message) = failure_text(e) {
                        LoadError { message, on_retry: move |_| detail.restart() }
                    }
                },
                Some(Ok(loaded)) => rsx! {
                    OrderPanel {
                        key: "{loaded.order.order_status}-{loaded.order.payment_status.as_str()}-{loaded.order.is_deleted()}",
                        detail: loaded.clone(),
                        on_changed: move |_| detail.restart(),
                    }
                },
            }
        }
    }
}

#[component]
fn OrderPanel(detail: Detail, on_changed: Callback<()>) -> Element {
    let services = use_services();
    let token = use_cancel_token();
    let notify = use_notify();
    let order = detail.order.clone();

    let mut payment = use_signal(|| Some(order.payment_status));
    let mut status = use_signal(|| Some(order.order_status));
    let mut busy = use_signal(|| false);

    let save = {
        let api = services.api.clone();
        let token = token.clone();
        let order = order.clone();
        move |_: MouseEvent| {
            let update = OrderUpdate::diff(&order, payment(), status());
            if update.is_empty() {
                notify.call((NotificationType::Info, "Nothing to update".to_string()));
                return;
            }
            let api = api.clone();
            let token = token.clone();
            let id = order.id.clone();
            busy.set(true);
            spawn(async move {
                match api.update_order(&id, &update, &token).await {
                    Ok(()) => {
                        notify.call((NotificationType::Success, "Order updated".to_string()));
                        on_changed.call(());
                    }
                    Err(e) => {
                        if let Some(message) = failure_text(&e) {
                            notify.call((NotificationType::Error, message));
                        }
                    }
                }
                busy.set(false);
            });
        }
    };

    let run = {
        let api = services.api.clone();
        let token = token.clone();
        let id = order.id.clone();
        move |action: OrderAction| {
            let api = api.clone();
            let token = token.clone();
            let id = id.clone();
            busy.set(true);
            spawn(async move {
                let result = match action {
                    OrderAction::Cancel => api.cancel_order(&id, &token).await,
                    OrderAction::Delete => api.delete_order(&id, &token).await,
                    OrderAction::Restore => api.restore_order(&id, &token).await,
                };
                match result {
                    Ok(()) => {
                        tracing::info!(order_id = %id, ?action, "order action applied");
                        notify.call((NotificationType::Success, action.done_message().to_string()));
                        on_changed.call(());
                    }
                    Err(e) => {
                        if let Some(message) = failure_text(&e) {
                            notify.call((NotificationType::Error, message));
                        }
                    }
                }
                busy.set(false);
            });
        }
    };
    let mut cancel_action = run.clone();
    let mut delete_action = run.clone();
    let mut restore_action = run;

    let payment_options: Vec<(String, String)> = PaymentStatus::ALL
        .iter()
        .map(|p| (p.as_str().to_string(), p.as_str().to_string()))
        .collect();
    let status_options: Vec<(String, String)> = OrderStatus::ALL
        .iter()
        .map(|s| (s.as_str().to_string(), s.as_str().to_string()))
        .collect();
    let deleted = order.is_deleted();
    let cancellable = !deleted && order.order_status != OrderStatus::Cancelled;
    let subtotal: f64 = order.products.iter().map(|p| p.line_total()).sum();
    let recipient = order.address.full_name.clone().unwrap_or_else(|| order.user.full_name.clone());
    let phone = order.address.phone_number.clone().unwrap_or_default();

    rsx! {
        div {
            class: "grid grid-cols-1 gap-6 lg:grid-cols-3",
            Card {
                title: "Items".to_string(),
                class: "lg:col-span-2".to_string(),
                table {
                    class: TABLE_CLASS,
                    thead {
                        tr {
                            th { class: TH_CLASS, "Product" }
                            th { class: TH_CLASS, "Variant" }
                            th { class: TH_CLASS, "Price" }
                            th { class: TH_CLASS, "Qty" }
                            th { class: TH_CLASS, "Total" }
                        }
                    }
                    tbody {
                        for (i, item) in order.products.iter().enumerate() {
                            tr {
                                key: "{i}",
                                td {
                                    class: TD_CLASS,
                                    div {
                                        class: "flex items-center space-x-2",
                                        img { class: "h-10 w-10 rounded object-cover", src: "{item.img_url}" }
                                        span { "{item.name}" }
                                    }
                                }
                                td {
                                    class: TD_CLASS,
                                    span {
                                        class: "inline-block h-3 w-3 rounded-full mr-1 align-middle",
                                        style: "background-color: {item.color}",
                                    }
                                    "{item.color_name} / {item.size}"
                                }
                                td { class: TD_CLASS, {format_price(item.price)} }
                                td { class: TD_CLASS, "{item.quantity}" }
                                td { class: TD_CLASS, {format_price(item.line_total())} }
                            }
                        }
                    }
                }
                div {
                    class: "mt-4 text-right text-sm space-y-1",
                    p { "Subtotal: " {format_price(subtotal)} }
                    p { class: "text-lg font-semibold", "Total: " {format_price(order.total_price)} }
                }
            }

            div {
                class: "space-y-6",
                Card {
                    title: "Customer".to_string(),
                    dl {
                        class: "text-sm space-y-2",
                        div { dt { class: "text-gray-500", "Name" } dd { "{recipient}" } }
                        div { dt { class: "text-gray-500", "Email" } dd { "{order.user.email}" } }
                        div { dt { class: "text-gray-500", "Phone" } dd { "{phone}" } }
                        div { dt { class: "text-gray-500", "Address" } dd { {order.address.one_line()} } }
                        if !order.message.is_empty() {
                            div { dt { class: "text-gray-500", "Note" } dd { "{order.message}" } }
                        }
                    }
                }

                Card {
                    title: "Status".to_string(),
                    div {
                        class: "space-y-3 text-sm",
                        div {
                            class: "flex justify-between",
                            span { class: "text-gray-500", "Payment method" }
                            span { {payment_method_label(order.payment_method)} }
                        }
                        div {
                            class: "flex justify-between",
                            span { class: "text-gray-500", "Current" }
                            span {
                                class: "space-x-1",
                                StatusBadge {
                                    label: order.payment_status.as_str().to_string(),
                                    class: payment_status_class(order.payment_status).to_string(),
                                }
                                StatusBadge {
                                    label: order.order_status.as_str().to_string(),
                                    class: order_status_class(order.order_status).to_string(),
                                }
                            }
                        }
                        if let Some(paid_at) = order.paid_at.clone() {
                            div {
                                class: "flex justify-between",
                                span { class: "text-gray-500", "Paid at" }
                                span { "{paid_at}" }
                            }
                        }
                        if let Some(invoice) = detail.payment_invoice_id.clone() {
                            div {
                                class: "flex justify-between",
                                span { class: "text-gray-500", "Invoice" }
                                span { class: "font-mono", "{invoice}" }
                            }
                        }

                        if !deleted {
                            Select {
                                options: payment_options,
                                value: payment().map(|p| p.as_str().to_string()).unwrap_or_default(),
                                onchange: move |value: String| payment.set(PaymentStatus::parse(&value)),
                            }
                            Select {
                                options: status_options,
                                value: status().map(|s| s.as_str().to_string()).unwrap_or_default(),
                                onchange: move |value: String| status.set(OrderStatus::parse(&value)),
                            }
                            button {
                                r#type: "button",
                                class: format!("{} w-full justify-center", button_class(ButtonVariant::Primary, busy())),
                                disabled: busy(),
                                onclick: save,
                                "Update order"
                            }
                        }
                    }
                }

                div {
                    class: "flex flex-wrap gap-3",
                    if cancellable {
                        button {
                            r#type: "button",
                            class: button_class(ButtonVariant::Secondary, busy()),
                            disabled: busy(),
                            onclick: move |_| cancel_action(OrderAction::Cancel),
                            "Cancel order"
                        }
                    }
                    if deleted {
                        button {
                            r#type: "button",
                            class: button_class(ButtonVariant::Primary, busy()),
                            disabled: busy(),
                            onclick: move |_| restore_action(OrderAction::Restore),
                            "Restore order"
                        }
                    } else {
                        button {
                            r#type: "button",
                            class: button_class(ButtonVariant::Danger, busy()),
                            disabled: busy(),
                            onclick: move |_| delete_action(OrderAction::Delete),
                            "Delete order"
                        }
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_messages() {
        assert_eq!(OrderAction::Cancel.done_message(), "Order cancelled");
        assert_eq!(OrderAction::Restore.done_message(), "Order restored");
        assert_eq!(payment_method_label(PaymentMethod::CashOnDelivery), "Cash on delivery");
    }
}
