// src/ui/pages/dashboard.rs - Store overview

use dioxus::prelude::*;

use crate::{
    catalog::format_price,
    dashboard::{BarChart, ChartFilter},
    ui::{
        components::{Card, LoadError, Select, Spinner},
        pages::{failure_text, EmptyState, PageWrapper, StatCard, TABLE_CLASS, TD_CLASS, TH_CLASS},
        state::{auth::use_current_user, use_cancel_token, use_services},
    },
};

/// Dashboard page component
#[component]
pub fn Dashboard() -> Element {
    let services = use_services();
    let token = use_cancel_token();
    let user = use_current_user();
    let mut filter = use_signal(|| ChartFilter::Week);

    let mut stats = use_resource({
        let api = services.api.clone();
        let token = token.clone();
        move || {
            let api = api.clone();
            let token = token.clone();
            async move { api.quantity_stats(&token).await }
        }
    });

    // Re-runs whenever the filter signal changes
    let chart = use_resource({
        let api = services.api.clone();
        let token = token.clone();
        move || {
            let api = api.clone();
            let token = token.clone();
            let filter = filter();
            async move { api.chart_order(filter, &token).await.map(|c| BarChart::from(&c)) }
        }
    });

    let categories = use_resource({
        let api = services.api.clone();
        let token = token.clone();
        move || {
            let api = api.clone();
            let token = token.clone();
            async move { api.chart_category(&token).await }
        }
    });

    let customers = use_resource({
        let api = services.api.clone();
        let token = token.clone();
        move || {
            let api = api.clone();
            let token = token.clone();
            async move { api.customer_stats(&token).await }
        }
    });

    let top_products = use_resource({
        let api = services.api.clone();
        let token = token.clone();
        move || {
            let api = api.clone();
            let token = token.clone();
            async move { api.product_stats(&token).await }
        }
    });

    let subtitle = user.map(|u| format!("Welcome back, {}", u.first_name()));
    let filter_options: Vec<(String, String)> = ChartFilter::ALL
        .iter()
        .map(|f| (f.as_str().to_string(), f.label().to_string()))
        .collect();

    rsx! {
        PageWrapper {
            title: "Dashboard".to_string(),
            subtitle,

            match &*stats.read() {
                None => rsx! { Spinner {} },
                Some(Ok(items)) => rsx! {
                    div {
                        class: "grid grid-cols-1 gap-5 sm:grid-cols-2 lg:grid-cols-4",
                        for stat in items.iter() {
                            StatCard {
                                key: "{stat.kind}",
                                title: stat.title.clone(),
                                value: format!("{}", stat.quantity),
                            }
                        }
                    }
                },
                Some(Err(e)) => rsx! {
                    if let Some(message) = failure_text(e) {
                        LoadError { message, on_retry: move |_| stats.restart() }
                    }
                },
            }

            div {
                class: "grid grid-cols-1 gap-6 lg:grid-cols-3",
                Card {
                    title: "Revenue".to_string(),
                    class: "lg:col-span-2".to_string(),
                    actions: Some(rsx! {
                        Select {
                            options: filter_options,
                            value: filter().as_str().to_string(),
                            onchange: move |value: String| {
                                if let Some(next) = ChartFilter::ALL.into_iter().find(|f| f.as_str() == value) {
                                    filter.set(next);
                                }
                            },
                        }
                    }),
                    match &*chart.read() {
                        None => rsx! { Spinner {} },
                        Some(Ok(bars)) => rsx! { BarChartView { chart: bars.clone() } },
                        Some(Err(e)) => rsx! {
                            if let Some(message) = failure_text(e) {
                                p { class: "text-sm text-red-600", "{message}" }
                            }
                        },
                    }
                }

                Card {
                    title: "Sales by category".to_string(),
                    match &*categories.read() {
                        Some(Ok(data)) if !data.labels.is_empty() => rsx! {
                            ul {
                                class: "space-y-2",
                                for (label, value) in data.labels.iter().zip(data.data.iter()) {
                                    li {
                                        key: "{label}",
                                        class: "flex justify-between text-sm",
                                        span { class: "text-gray-600", "{label}" }
                                        span { class: "font-medium text-gray-900", "{value}" }
                                    }
                                }
                            }
                        },
                        Some(Ok(_)) => rsx! { EmptyState { title: "No sales yet".to_string() } },
                        Some(Err(_)) => rsx! {},
                        None => rsx! { Spinner {} },
                    }
                }
            }

            div {
                class: "grid grid-cols-1 gap-6 lg:grid-cols-2",
                Card {
                    title: "Top customers".to_string(),
                    if let Some(Ok(rows)) = &*customers.read() {
                        table {
                            class: TABLE_CLASS,
                            thead {
                                tr {
                                    th { class: TH_CLASS, "Customer" }
                                    th { class: TH_CLASS, "Email" }
                                    th { class: TH_CLASS, "Spent" }
                                }
                            }
                            tbody {
                                for customer in rows.iter() {
                                    tr {
                                        key: "{customer.id}",
                                        td { class: TD_CLASS, "{customer.full_name}" }
                                        td { class: TD_CLASS, "{customer.email}" }
                                        td { class: TD_CLASS, {format_price(customer.total_spent)} }
                                    }
                                }
                            }
                        }
                    }
                }
                Card {
                    title: "Best sellers".to_string(),
                    if let Some(Ok(rows)) = &*top_products.read() {
                        table {
                            class: TABLE_CLASS,
                            thead {
                                tr {
                                    th { class: TH_CLASS, "Product" }
                                    th { class: TH_CLASS, "Category" }
                                    th { class: TH_CLASS, "Price" }
                                    th { class: TH_CLASS, "Sold" }
                                }
                            }
                            tbody {
                                for product in rows.iter() {
                                    tr {
                                        key: "{product.slug}",
                                        td {
                                            class: TD_CLASS,
                                            div {
                                                class: "flex items-center space-x-2",
                                                img { class: "h-8 w-8 rounded object-cover", src: "{product.img_url}" }
                                                span { "{product.name}" }
                                            }
                                        }
                                        td { class: TD_CLASS, "{product.category}" }
                                        td { class: TD_CLASS, {format_price(product.price)} }
                                        td { class: TD_CLASS, "{product.sold_count()}" }
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

/// Grouped vertical bars, one group per label
#[component]
fn BarChartView(chart: BarChart) -> Element {
    if chart.labels.is_empty() {
        return rsx! { EmptyState { icon: "📈".to_string(), title: "No orders in this period".to_string() } };
    }

    rsx! {
        div {
            class: "flex space-x-4 mb-3 text-xs text-gray-600",
            for series in chart.series.iter() {
                span {
                    key: "{series.label}",
                    class: "flex items-center",
                    span { class: "inline-block h-3 w-3 mr-1 rounded", style: "background-color: {series.color}" }
                    "{series.label}"
                }
            }
        }
        div {
            class: "flex items-end h-56 space-x-3",
            for (i, label) in chart.labels.iter().enumerate() {
                div {
                    key: "{label}",
                    class: "flex-1 flex flex-col items-center h-full",
                    div {
                        class: "flex items-end flex-1 w-full space-x-1",
                        for series in chart.series.iter() {
                            div {
                                key: "{series.label}",
                                class: "flex-1 rounded-t",
                                title: format!("{}: {}", series.label, series.data.get(i).copied().unwrap_or_default()),
                                style: format!(
                                    "background-color: {}; height: {:.1}%",
                                    series.color,
                                    chart.height_percent(series.data.get(i).copied().unwrap_or_default())
                                ),
                            }
                        }
                    }
                    span { class: "mt-1 text-xs text-gray-500 truncate", "{label}" }
                }
            }
        }
    }
}
