//! Domain types representing recorded expenses.

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

use crate::domain::common::*;

/// A dated amount tagged with a category name.
///
/// `category` is matched against [`crate::domain::Category::name`] by value; it
/// is not a reference and survives deletion of the category it names.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Expense {
    #[serde(default = "Uuid::new_v4")]
    pub id: Uuid,
    pub date: NaiveDate,
    pub category: String,
    #[serde(default, deserialize_with = "lenient_notes")]
    pub notes: String,
    #[serde(default, deserialize_with = "lenient_amount")]
    pub amount: f64,
}

impl Expense {
    pub fn new(
        date: NaiveDate,
        category: impl Into<String>,
        notes: impl Into<String>,
        amount: f64,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            date,
            category: category.into(),
            notes: notes.into(),
            amount,
        }
    }

    /// The amount as counted by totals: negative or non-finite values count
    /// as zero.
    pub fn counted_amount(&self) -> f64 {
        sanitize_amount(self.amount)
    }
}

impl Identifiable for Expense {
    fn id(&self) -> Uuid {
        self.id
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawAmount {
    Number(f64),
    Text(String),
    Other(serde_json::Value),
}

/// Amounts are non-negative; anything else reads as zero.
pub fn sanitize_amount(amount: f64) -> f64 {
    if amount.is_finite() && amount >= 0.0 {
        amount
    } else {
        0.0
    }
}

/// Accepts numbers and numeric strings; anything else, including negative
/// values, reads as zero.
pub(crate) fn lenient_amount<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let amount = match RawAmount::deserialize(deserializer)? {
        RawAmount::Number(value) => value,
        RawAmount::Text(text) => text.trim().parse::<f64>().unwrap_or(0.0),
        RawAmount::Other(_) => 0.0,
    };
    Ok(sanitize_amount(amount))
}

fn lenient_notes<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}
