//! Calc command implementation
//!
//! Compares `PRICE/AMOUNT` pairs given on the command line and prints a
//! table, or JSON with `--json`.

use anyhow::Result;
use colored::Colorize;
use comfy_table::{presets::UTF8_FULL, Table};
use serde::Serialize;
use tracing::info;

use unit_price_compare::{
    config::Config,
    messages::{self, StatusMessage},
    ComparisonResult, PriceComparator, ProductEntry,
};

#[derive(Debug, Serialize)]
struct CalcReport<'a> {
    entries: &'a [ProductEntry],
    #[serde(flatten)]
    result: &'a ComparisonResult,
    message: String,
}

/// Execute the calc command
///
/// Invalid input is reported in the output, not as a failure.
pub fn execute(pairs: &[String], json: bool, cfg: &Config) -> Result<()> {
    let comparator = PriceComparator::from_pairs(pairs.iter().map(|pair| split_pair(pair)));
    let result = comparator.calculate();
    let status = StatusMessage::from_result(&result, &cfg.display);
    info!(entries = comparator.len(), error = status.is_error, "Comparison finished");

    if json {
        let report = CalcReport {
            entries: comparator.entries(),
            result: &result,
            message: status.headline.clone(),
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("{}", build_table(comparator.entries(), &result, cfg));
    println!();
    if status.is_error {
        println!("{}", status.headline.red().bold());
    } else {
        println!("{}", status.headline.green().bold());
        if let Some(detail) = &status.detail {
            println!("{}", detail.dimmed());
        }
    }

    Ok(())
}

/// Split `PRICE/AMOUNT` on the first `/`
///
/// Without a `/` the whole argument is the price and the amount is empty.
fn split_pair(pair: &str) -> (String, String) {
    match pair.split_once('/') {
        Some((price, amount)) => (price.to_string(), amount.to_string()),
        None => (pair.to_string(), String::new()),
    }
}

fn build_table(entries: &[ProductEntry], result: &ComparisonResult, cfg: &Config) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL).set_header(vec![
        "#",
        messages::PRICE_LABEL,
        messages::AMOUNT_LABEL,
        messages::UNIT_PRICE_LABEL,
        "",
    ]);

    for (index, entry) in entries.iter().enumerate() {
        let marker = if result.cheapest_index() == Some(index) {
            messages::BEST_PRICE_BADGE
        } else {
            ""
        };
        table.add_row(vec![
            (index + 1).to_string(),
            entry.price.clone(),
            entry.amount.clone(),
            messages::unit_price_text(result.unit_price(index), &cfg.display),
            marker.to_string(),
        ]);
    }

    table
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_pair() {
        assert_eq!(split_pair("100/4"), ("100".to_string(), "4".to_string()));
        assert_eq!(split_pair("1/2/3"), ("1".to_string(), "2/3".to_string()));
        assert_eq!(split_pair("/3"), (String::new(), "3".to_string()));
        assert_eq!(split_pair("9"), ("9".to_string(), String::new()));
    }

    #[test]
    fn test_table_marks_cheapest_row() {
        let comparator = PriceComparator::from_pairs([("100", "4"), ("150", "5")]);
        let result = comparator.calculate();
        let rendered = build_table(comparator.entries(), &result, &Config::default()).to_string();

        assert!(rendered.contains("25.00 per unit"));
        assert!(rendered.contains("30.00 per unit"));
        assert_eq!(rendered.matches(messages::BEST_PRICE_BADGE).count(), 1);
    }

    #[test]
    fn test_table_shows_dash_for_invalid_rows() {
        let comparator = PriceComparator::from_pairs([("", "3"), ("9", "3")]);
        let result = comparator.calculate();
        let rendered = build_table(comparator.entries(), &result, &Config::default()).to_string();

        assert!(rendered.contains(" - "));
        assert!(rendered.contains("3.00 per unit"));
        assert!(!rendered.contains(messages::BEST_PRICE_BADGE));
    }

    #[test]
    fn test_report_serializes_flat() {
        let comparator = PriceComparator::from_pairs([("10", "2"), ("10", "2")]);
        let result = comparator.calculate();
        let report = CalcReport {
            entries: comparator.entries(),
            result: &result,
            message: "ok".to_string(),
        };
        let json = serde_json::to_value(&report).unwrap();

        assert_eq!(json["outcome"]["index"], 0);
        assert_eq!(json["entries"][1]["price"], "10");
        assert_eq!(json["message"], "ok");
    }
}
