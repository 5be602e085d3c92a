// src/discount.rs

//! Time-boxed product discounts

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

use crate::catalog::validation::{FieldErrors, FormField};
use crate::error::Error;
use crate::types::{DiscountId, ProductId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TimeRange {
    #[serde(rename = "0h-6h")]
    Night,
    #[serde(rename = "6h-12h")]
    Morning,
    #[serde(rename = "12h-18h")]
    Afternoon,
    #[serde(rename = "18h-24h")]
    Evening,
}

impl TimeRange {
    pub const ALL: [TimeRange; 4] = [Self::Night, Self::Morning, Self::Afternoon, Self::Evening];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Night => "0h-6h",
            Self::Morning => "6h-12h",
            Self::Afternoon => "12h-18h",
            Self::Evening => "18h-24h",
        }
    }
}

impl fmt::Display for TimeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TimeRange {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|r| r.as_str() == s)
            .ok_or_else(|| Error::validation("timeRange", "Time range is a required field"))
    }
}

/// Product summary embedded in a discount
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiscountProduct {
    pub id: ProductId,
    pub name: String,
    #[serde(default)]
    pub price: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Discount {
    pub id: DiscountId,
    pub discount_value: u8,
    pub time_range: TimeRange,
    pub date: DateTime<Utc>,
    pub product: DiscountProduct,
}

/// Body of the discount create / update calls
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiscountPayload {
    pub product_id: ProductId,
    pub discount_value: u8,
    pub time_range: TimeRange,
    pub date: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum DiscountField {
    Product,
    DiscountValue,
    TimeRange,
    Date,
}

impl FormField for DiscountField {
    fn name(&self) -> &'static str {
        match self {
            Self::Product => "productId",
            Self::DiscountValue => "discountValue",
            Self::TimeRange => "timeRange",
            Self::Date => "date",
        }
    }
}

/// The discount dialog's inputs
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DiscountForm {
    pub product_id: String,
    pub discount_value: Option<i64>,
    pub time_range: Option<TimeRange>,
    pub date: Option<NaiveDate>,
}

impl DiscountForm {
    pub fn from_discount(discount: &Discount) -> Self {
        Self {
            product_id: discount.product.id.clone(),
            discount_value: Some(i64::from(discount.discount_value)),
            time_range: Some(discount.time_range),
            date: Some(discount.date.date_naive()),
        }
    }

    /// `valid_products` are the ids of the loaded product list
    pub fn validate(&self, valid_products: &[&str]) -> FieldErrors<DiscountField> {
        let mut errors = FieldErrors::new();

        if self.product_id.is_empty() {
            errors.insert(DiscountField::Product, "Product is a required field");
        } else if !valid_products.contains(&self.product_id.as_str()) {
            errors.insert(DiscountField::Product, "Product must be one of the listed products");
        }
        match self.discount_value {
            None => errors.insert(DiscountField::DiscountValue, "Discount value is a required field"),
            Some(v) if v < 1 => {
                errors.insert(DiscountField::DiscountValue, "Discount value cannot be less than 1")
            }
            Some(v) if v > 99 => errors.insert(
                DiscountField::DiscountValue,
                "Discount value cannot be greater than 99",
            ),
            Some(_) => {}
        }
        if self.time_range.is_none() {
            errors.insert(DiscountField::TimeRange, "Time range is a required field");
        }
        if self.date.is_none() {
            errors.insert(DiscountField::Date, "Date is a required field");
        }

        errors
    }

    /// Payload with the date pinned to midnight UTC
    pub fn to_payload(
        &self,
        valid_products: &[&str],
    ) -> std::result::Result<DiscountPayload, FieldErrors<DiscountField>> {
        let errors = self.validate(valid_products);
        match (self.discount_value, self.time_range, self.date) {
            (Some(value), Some(time_range), Some(date)) if errors.is_empty() => Ok(DiscountPayload {
                product_id: self.product_id.clone(),
                discount_value: u8::try_from(value).unwrap_or(99),
                time_range,
                date: midnight_utc(date),
            }),
            _ => Err(errors),
        }
    }
}

pub fn midnight_utc(date: NaiveDate) -> DateTime<Utc> {
    date.and_time(NaiveTime::MIN).and_utc()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    fn form() -> DiscountForm {
        DiscountForm {
            product_id: "p1".to_string(),
            discount_value: Some(15),
            time_range: Some(TimeRange::Afternoon),
            date: NaiveDate::from_ymd_opt(2024, 6, 15),
        }
    }

    #[test]
    fn test_valid_form_builds_midnight_payload() {
        let payload = form().to_payload(&["p1", "p2"]).unwrap();
        assert_eq!(payload.discount_value, 15);
        assert_eq!(payload.date.hour(), 0);
        assert_eq!(payload.date.day(), 15);

        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["timeRange"], "12h-18h");
        assert_eq!(json["productId"], "p1");
    }

    #[test]
    fn test_discount_bounds() {
        let mut f = form();
        f.discount_value = Some(0);
        assert_eq!(
            f.validate(&["p1"]).get(DiscountField::DiscountValue),
            Some("Discount value cannot be less than 1")
        );
        f.discount_value = Some(100);
        assert_eq!(
            f.validate(&["p1"]).get(DiscountField::DiscountValue),
            Some("Discount value cannot be greater than 99")
        );
        f.discount_value = Some(99);
        assert!(f.validate(&["p1"]).is_empty());
    }

    #[test]
    fn test_required_fields() {
        let errors = DiscountForm::default().validate(&[]);
        assert_eq!(errors.get(DiscountField::Product), Some("Product is a required field"));
        assert_eq!(errors.get(DiscountField::TimeRange), Some("Time range is a required field"));
        assert_eq!(errors.get(DiscountField::Date), Some("Date is a required field"));
        assert_eq!(errors.len(), 4);
    }

    #[test]
    fn test_unknown_product_rejected() {
        assert!(form().to_payload(&["p9"]).is_err());
    }

    #[test]
    fn test_time_range_parsing() {
        assert_eq!("18h-24h".parse::<TimeRange>().unwrap(), TimeRange::Evening);
        assert!("noon".parse::<TimeRange>().is_err());
    }

    #[test]
    fn test_edit_form_round_trip() {
        let discount = Discount {
            id: "d1".to_string(),
            discount_value: 20,
            time_range: TimeRange::Night,
            date: midnight_utc(NaiveDate::from_ymd_opt(2024, 1, 2).unwrap()),
            product: DiscountProduct {
                id: "p1".to_string(),
                name: "Tee".to_string(),
                price: 1.0,
            },
        };
        let form = DiscountForm::from_discount(&discount);
        let payload = form.to_payload(&["p1"]).unwrap();
        assert_eq!(payload.date, discount.date);
        assert_eq!(payload.time_range, TimeRange::Night);
    }
}
