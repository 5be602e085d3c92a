// src/dashboard.rs

//! Dashboard statistics and the chart series built from them

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuantityStat {
    pub title: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub quantity: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChartOrder {
    pub labels: Vec<String>,
    pub revenue: Vec<f64>,
    pub profit: Vec<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChartCategory {
    #[serde(default)]
    pub labels: Vec<String>,
    #[serde(default)]
    pub data: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerStat {
    pub id: String,
    pub full_name: String,
    pub email: String,
    #[serde(default)]
    pub avatar: Option<String>,
    #[serde(rename = "totalspent")]
    pub total_spent: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductStat {
    pub slug: String,
    pub name: String,
    pub img_url: String,
    pub price: f64,
    pub category: String,
    /// Sent as a string by the backend
    pub sold: String,
}

impl ProductStat {
    pub fn sold_count(&self) -> u64 {
        self.sold.trim().parse().unwrap_or(0)
    }
}

/// Grouping of the revenue chart
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChartFilter {
    Week,
    #[default]
    Month,
    Year,
}

impl ChartFilter {
    pub const ALL: [ChartFilter; 3] = [Self::Week, Self::Month, Self::Year];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Week => "week",
            Self::Month => "month",
            Self::Year => "year",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Week => "This week",
            Self::Month => "This month",
            Self::Year => "This year",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BarSeries {
    pub label: &'static str,
    pub color: &'static str,
    pub data: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BarChart {
    pub labels: Vec<String>,
    pub series: Vec<BarSeries>,
}

impl BarChart {
    pub fn max_value(&self) -> f64 {
        self.series
            .iter()
            .flat_map(|s| s.data.iter().copied())
            .fold(0.0, f64::max)
    }

    /// Bar height as a percentage of the tallest bar
    pub fn height_percent(&self, value: f64) -> f64 {
        let max = self.max_value();
        if max <= 0.0 {
            0.0
        } else {
            (value / max * 100.0).clamp(0.0, 100.0)
        }
    }
}

impl From<&ChartOrder> for BarChart {
    fn from(chart: &ChartOrder) -> Self {
        Self {
            labels: chart.labels.clone(),
            series: vec![
                BarSeries {
                    label: "Revenue",
                    color: "#4f46e5",
                    data: chart.revenue.clone(),
                },
                BarSeries {
                    label: "Profit",
                    color: "#22c55e",
                    data: chart.profit.clone(),
                },
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chart_order_to_bars() {
        let order = ChartOrder {
            labels: vec!["Jan".to_string(), "Feb".to_string()],
            revenue: vec![100.0, 250.0],
            profit: vec![20.0, 50.0],
        };
        let chart = BarChart::from(&order);
        assert_eq!(chart.series.len(), 2);
        assert_eq!(chart.series[0].label, "Revenue");
        assert_eq!(chart.max_value(), 250.0);
        assert_eq!(chart.height_percent(125.0), 50.0);
    }

    #[test]
    fn test_empty_chart_heights() {
        let chart = BarChart::from(&ChartOrder::default());
        assert_eq!(chart.height_percent(10.0), 0.0);
    }

    #[test]
    fn test_stats_deserialize() {
        let json = r#"[{"title":"Orders","type":"order","quantity":12}]"#;
        let stats: Vec<QuantityStat> = serde_json::from_str(json).unwrap();
        assert_eq!(stats[0].kind, "order");

        let json = r#"{"id":"u1","fullName":"An","email":"a@x","avatar":null,"totalspent":1500}"#;
        let customer: CustomerStat = serde_json::from_str(json).unwrap();
        assert_eq!(customer.total_spent, 1500.0);

        let json = r#"{"slug":"tee","name":"Tee","imgUrl":"","price":10,"category":"men - shirt","sold":"42"}"#;
        let product: ProductStat = serde_json::from_str(json).unwrap();
        assert_eq!(product.sold_count(), 42);
    }
}
