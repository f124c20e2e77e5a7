//! Listing category and status semantics.
//!
//! Categories and statuses are stored as lowercase TEXT in the database
//! (with CHECK constraints); these enums are the validated in-memory form.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// How a book is offered. Determines whether a price is meaningful.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Sell,
    Lend,
    Free,
}

impl Category {
    /// Stable lowercase form used for storage and the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Sell => "sell",
            Category::Lend => "lend",
            Category::Free => "free",
        }
    }

    /// Human-readable badge label, price-aware.
    ///
    /// A sell listing without a price is a valid "price not specified"
    /// state and labels as `For Sale`, never as a number.
    pub fn display_label(&self, price: Option<f64>) -> String {
        match self {
            Category::Sell => match price {
                Some(p) => format_price(p),
                None => "For Sale".to_string(),
            },
            Category::Lend => "For Lending".to_string(),
            Category::Free => "Free".to_string(),
        }
    }
}

impl FromStr for Category {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "sell" => Ok(Category::Sell),
            "lend" => Ok(Category::Lend),
            "free" => Ok(Category::Free),
            other => Err(CoreError::Validation(format!(
                "category must be one of sell, lend, free (got '{other}')"
            ))),
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Availability state of a listing.
///
/// Created as `Available`; the owner may move it to any value at any time.
/// There is deliberately no transition guard and no automatic expiry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ListingStatus {
    Available,
    Reserved,
    Taken,
}

impl ListingStatus {
    /// Stable lowercase form used for storage and the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            ListingStatus::Available => "available",
            ListingStatus::Reserved => "reserved",
            ListingStatus::Taken => "taken",
        }
    }
}

impl FromStr for ListingStatus {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "available" => Ok(ListingStatus::Available),
            "reserved" => Ok(ListingStatus::Reserved),
            "taken" => Ok(ListingStatus::Taken),
            other => Err(CoreError::Validation(format!(
                "status must be one of available, reserved, taken (got '{other}')"
            ))),
        }
    }
}

impl fmt::Display for ListingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Keep a submitted price only when the category is `sell`.
///
/// Any price entered under `lend` or `free` is dropped rather than
/// rejected; the field is simply not meaningful there.
pub fn normalize_price(category: Category, price: Option<f64>) -> Option<f64> {
    match category {
        Category::Sell => price,
        Category::Lend | Category::Free => None,
    }
}

/// Format a price for display, dropping a trailing `.00` for whole amounts.
fn format_price(price: f64) -> String {
    if price.fract() == 0.0 {
        format!("₹{price:.0}")
    } else {
        format!("₹{price:.2}")
    }
}
