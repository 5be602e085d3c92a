// src/ui/pages/orders.rs - Paged order table driven by the URL query

use dioxus::prelude::*;
#[allow(unused_imports)]
use dioxus_router::prelude::*;

use crate::{
    catalog::format_price,
    orders::{limit_options, OrderQuery, OrderSort, OrderStatus, PaymentStatus, DEFAULT_PAGE},
    ui::{
        components::{button_class, ButtonVariant, LoadError, Pagination, Select, Spinner, StatusBadge, TextInput},
        pages::{failure_text, EmptyState, PageWrapper, TABLE_CLASS, TD_CLASS, TH_CLASS},
        router::Route,
        state::{use_cancel_token, use_services},
    },
};

/// Query from the URL; a missing `limit` falls back to the configured one
pub(crate) fn parse_query(query: &str, default_limit: u32) -> OrderQuery {
    let mut parsed = OrderQuery::from_query_string(query);
    let has_limit = query
        .trim_start_matches('?')
        .split('&')
        .any(|pair| pair.starts_with("limit="));
    if !has_limit {
        parsed.limit = default_limit.max(1);
    }
    parsed
}

pub(crate) fn order_status_class(status: OrderStatus) -> &'static str {
    match status {
        OrderStatus::Delivered => "bg-green-100 text-green-800",
        OrderStatus::Delivering => "bg-blue-100 text-blue-800",
        OrderStatus::Confirmed => "bg-indigo-100 text-indigo-800",
        OrderStatus::Pending => "bg-yellow-100 text-yellow-800",
        OrderStatus::Cancelled => "bg-red-100 text-red-800",
    }
}

pub(crate) fn payment_status_class(status: PaymentStatus) -> &'static str {
    match status {
        PaymentStatus::Paid => "bg-green-100 text-green-800",
        PaymentStatus::Unpaid => "bg-gray-100 text-gray-800",
    }
}

#[component]
pub fn Orders(query: String) -> Element {
    let services = use_services();
    let token = use_cancel_token();
    let navigator = use_navigator();
    let orders_config = services.config.orders.clone();

    let current = parse_query(&query, orders_config.default_limit);
    let mut search_text = use_signal(|| current.keyword.clone().unwrap_or_default());

    let api = services.api.clone();
    let default_limit = orders_config.default_limit;
    let mut page = use_resource(use_reactive!(|query| {
        let api = api.clone();
        let token = token.clone();
        async move {
            let parsed = parse_query(&query, default_limit);
            api.list_orders(&parsed, &token).await
        }
    }));

    let go = move |next: OrderQuery| {
        let _ = navigator.push(Route::Orders {
            query: next.to_query_string(),
        });
    };

    let filter_options: Vec<(String, String)> = OrderStatus::ALL
        .iter()
        .map(|s| (s.as_str().to_string(), s.as_str().to_string()))
        .collect();
    let sort_options: Vec<(String, String)> = OrderSort::ALL
        .iter()
        .map(|s| (s.as_str().to_string(), s.label().to_string()))
        .collect();
    let limits: Vec<(String, String)> = limit_options(current.limit, &orders_config.limit_options)
        .into_iter()
        .map(|l| (l.to_string(), format!("{} / page", l)))
        .collect();

    let run_search = {
        let current = current.clone();
        move || {
            let mut next = current.clone();
            if next.search(&search_text()) {
                go(next);
            }
        }
    };

    rsx! {
        PageWrapper {
            title: "Orders".to_string(),

            div {
                class: "grid grid-cols-1 gap-3 md:grid-cols-4",
                form {
                    class: "flex space-x-2 md:col-span-2",
                    onsubmit: move |evt: FormEvent| {
                        evt.prevent_default();
                        run_search();
                    },
                    TextInput {
                        placeholder: "Search orders".to_string(),
                        value: search_text(),
                        oninput: move |value: String| search_text.set(value),
                    }
                    button {
                        r#type: "submit",
                        class: button_class(ButtonVariant::Secondary, false),
                        "Search"
                    }
                }
                Select {
                    options: filter_options,
                    value: current.filter.map(|f| f.as_str().to_string()).unwrap_or_default(),
                    placeholder: Some("All statuses".to_string()),
                    onchange: {
                        let current = current.clone();
                        move |value: String| {
                            let mut next = current.clone();
                            next.set_filter(OrderStatus::parse(&value));
                            next.page = DEFAULT_PAGE;
                            go(next);
                        }
                    },
                }
                Select {
                    options: sort_options,
                    value: current.sort_by.as_str().to_string(),
                    onchange: {
                        let current = current.clone();
                        move |value: String| {
                            if let Some(sort) = OrderSort::parse(&value) {
                                let mut next = current.clone();
                                next.set_sort(sort);
                                go(next);
                            }
                        }
                    },
                }
            }

            div {
                class: "bg-white shadow rounded-lg overflow-x-auto",
                match &*page.read() {
                    None => rsx! { div { class: "p-6 flex justify-center", Spinner {} } },
                    Some(Err(e)) => rsx! {
                        if let Some(message) = failure_text(e) {
                            div { class: "p-4", LoadError { message, on_retry: move |_| page.restart() } }
                        }
                    },
                    Some(Ok(result)) if result.orders.is_empty() => rsx! {
                        EmptyState { icon: "🧾".to_string(), title: "No orders found".to_string() }
                    },
                    Some(Ok(result)) => rsx! {
                        table {
                            class: TABLE_CLASS,
                            thead {
                                class: "bg-gray-50",
                                tr {
                                    th { class: TH_CLASS, "Order" }
                                    th { class: TH_CLASS, "Customer" }
                                    th { class: TH_CLASS, "Created" }
                                    th { class: TH_CLASS, "Total" }
                                    th { class: TH_CLASS, "Payment" }
                                    th { class: TH_CLASS, "Status" }
                                }
                            }
                            tbody {
                                class: "divide-y divide-gray-200",
                                for order in result.orders.iter() {
                                    tr {
                                        key: "{order.id}",
                                        class: if order.is_deleted() { "opacity-50" } else { "" },
                                        td {
                                            class: TD_CLASS,
                                            Link {
                                                to: Route::OrderDetail { order_id: order.id.clone() },
                                                class: "text-blue-600 hover:underline font-mono",
                                                "#{order.id}"
                                            }
                                        }
                                        td { class: TD_CLASS, "{order.user.full_name}" }
                                        td { class: TD_CLASS, "{order.created_at}" }
                                        td { class: TD_CLASS, {format_price(order.total_price)} }
                                        td {
                                            class: TD_CLASS,
                                            StatusBadge {
                                                label: order.payment_status.as_str().to_string(),
                                                class: payment_status_class(order.payment_status).to_string(),
                                            }
                                        }
                                        td {
                                            class: TD_CLASS,
                                            if order.is_deleted() {
                                                StatusBadge { label: "Deleted".to_string() }
                                            } else {
                                                StatusBadge {
                                                    label: order.order_status.as_str().to_string(),
                                                    class: order_status_class(order.order_status).to_string(),
                                                }
                                            }
                                        }
                                    }
                                }
                            }
                        }
                        div {
                            class: "flex items-center justify-between px-4 pb-4",
                            span { class: "text-sm text-gray-500", "{result.pagination.total_orders} orders" }
                            div {
                                class: "flex items-center space-x-3",
                                div {
                                    class: "w-36 mt-4",
                                    Select {
                                        options: limits.clone(),
                                        value: current.limit.to_string(),
                                        onchange: {
                                            let current = current.clone();
                                            move |value: String| {
                                                let mut next = current.clone();
                                                if let Ok(limit) = value.parse::<u32>() {
                                                    if next.change_page(DEFAULT_PAGE, limit) {
                                                        go(next);
                                                    }
                                                }
                                            }
                                        },
                                    }
                                }
                                Pagination {
                                    current: current.page,
                                    total_pages: result.pagination.total_pages,
                                    on_change: {
                                        let current = current.clone();
                                        move |page_number: u32| {
                                            let mut next = current.clone();
                                            if next.change_page(page_number, current.limit) {
                                                go(next);
                                            }
                                        }
                                    },
                                }
                            }
                        }
                    },
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_query_uses_configured_limit() {
        assert_eq!(parse_query("", 10).limit, 10);
        assert_eq!(parse_query("page=2", 25).limit, 25);
        assert_eq!(parse_query("?page=2&limit=5", 25).limit, 5);
        assert_eq!(parse_query("page=3&limit=50", 10).page, 3);
    }

    #[test]
    fn test_status_classes() {
        assert!(order_status_class(OrderStatus::Cancelled).contains("red"));
        assert!(payment_status_class(PaymentStatus::Paid).contains("green"));
    }
}
