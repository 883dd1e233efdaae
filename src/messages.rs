//! Display strings for the comparison screen and the `calc` command

use crate::comparator::{ComparisonResult, Outcome, UnitPrice};
use crate::config::DisplayConfig;

pub const TITLE: &str = "Unit Price Comparison";
pub const SUBTITLE: &str = "Find the product that gives you the best value";
pub const PRICE_LABEL: &str = "Price";
pub const AMOUNT_LABEL: &str = "Amount";
pub const UNIT_PRICE_LABEL: &str = "Unit price";
pub const BEST_PRICE_BADGE: &str = "Best price!";
pub const NOT_AVAILABLE: &str = "-";
pub const INVALID_INPUT: &str = "Please fill in every price and amount with a positive number";
pub const SAVINGS_NOTE: &str = "You save the most by choosing this product!";

/// Heading for the entry at zero-based `index`
pub fn product_heading(index: usize) -> String {
    format!("Product {}", index + 1)
}

/// Format a unit price, e.g. "25.00 per unit"
pub fn format_unit_price(value: f64, display: &DisplayConfig) -> String {
    format!("{:.*} {}", display.decimals, value, display.unit_label)
}

/// Per-row unit price text; `-` for invalid or not yet calculated rows
pub fn unit_price_text(unit: Option<UnitPrice>, display: &DisplayConfig) -> String {
    match unit {
        Some(UnitPrice::Computed(value)) => format_unit_price(value, display),
        Some(UnitPrice::Invalid) | None => NOT_AVAILABLE.to_string(),
    }
}

/// Result banner shown after a calculation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    pub headline: String,
    pub detail: Option<String>,
    pub is_error: bool,
}

impl StatusMessage {
    pub fn from_result(result: &ComparisonResult, display: &DisplayConfig) -> Self {
        match result.outcome {
            Outcome::Cheapest { index, unit_price } => Self {
                headline: format!(
                    "{} is the cheapest ({})",
                    product_heading(index),
                    format_unit_price(unit_price, display)
                ),
                detail: Some(SAVINGS_NOTE.to_string()),
                is_error: false,
            },
            Outcome::IncompleteOrInvalidInput => Self {
                headline: INVALID_INPUT.to_string(),
                detail: None,
                is_error: true,
            },
        }
    }
}

impl std::fmt::Display for StatusMessage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.headline)
    }
}
