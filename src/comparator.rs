//! Unit price comparison core
//!
//! This module owns the list of product entries the user is editing and
//! derives, on demand, the unit price of every entry and the cheapest one.
//! It knows nothing about terminals or rendering; the screen in `ui` and the
//! `calc` command are thin adapters over it.

use serde::Serialize;
use tracing::debug;

/// The entry list never shrinks below this many products
pub const MIN_ENTRIES: usize = 2;

/// Selects one of the two editable fields of an entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Price,
    Amount,
}

impl Field {
    /// The other field of the same entry
    pub fn toggle(self) -> Self {
        match self {
            Field::Price => Field::Amount,
            Field::Amount => Field::Price,
        }
    }
}

/// One product as typed by the user
///
/// Both fields hold raw text so that half-typed input such as `"12."` or
/// `"-"` survives until the next calculation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ProductEntry {
    pub price: String,
    pub amount: String,
}

impl ProductEntry {
    pub fn new(price: impl Into<String>, amount: impl Into<String>) -> Self {
        Self {
            price: price.into(),
            amount: amount.into(),
        }
    }

    /// Raw text of the selected field
    pub fn field(&self, field: Field) -> &str {
        match field {
            Field::Price => &self.price,
            Field::Amount => &self.amount,
        }
    }

    fn field_mut(&mut self, field: Field) -> &mut String {
        match field {
            Field::Price => &mut self.price,
            Field::Amount => &mut self.amount,
        }
    }

    /// Unit price of this entry, or `Invalid` when either field is not a
    /// positive number or the quotient overflows
    pub fn unit_price(&self) -> UnitPrice {
        match (parse_quantity(&self.price), parse_quantity(&self.amount)) {
            (Some(price), Some(amount)) if (price / amount).is_finite() => {
                UnitPrice::Computed(price / amount)
            }
            _ => UnitPrice::Invalid,
        }
    }

    pub fn is_valid(&self) -> bool {
        self.unit_price().is_valid()
    }
}

/// Parse a user supplied quantity
///
/// Surrounding whitespace is ignored. Returns `None` for empty or
/// unparsable text, for non-finite values and for anything not strictly
/// greater than zero.
pub fn parse_quantity(text: &str) -> Option<f64> {
    text.trim()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite() && *value > 0.0)
}

/// Per-entry result of a calculation
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum UnitPrice {
    Computed(f64),
    Invalid,
}

impl UnitPrice {
    pub fn value(self) -> Option<f64> {
        match self {
            UnitPrice::Computed(value) => Some(value),
            UnitPrice::Invalid => None,
        }
    }

    pub fn is_valid(self) -> bool {
        matches!(self, UnitPrice::Computed(_))
    }
}

/// Overall outcome of a calculation
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Outcome {
    /// Every entry is valid; `index` holds the lowest unit price
    Cheapest { index: usize, unit_price: f64 },
    /// At least one entry is missing or not a positive number
    IncompleteOrInvalidInput,
}

/// Snapshot produced by [`PriceComparator::calculate`]
///
/// It is not updated when entries are edited afterwards; callers ask for a
/// fresh one instead.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonResult {
    pub unit_prices: Vec<UnitPrice>,
    pub outcome: Outcome,
}

impl ComparisonResult {
    pub fn cheapest_index(&self) -> Option<usize> {
        match self.outcome {
            Outcome::Cheapest { index, .. } => Some(index),
            Outcome::IncompleteOrInvalidInput => None,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self.outcome, Outcome::IncompleteOrInvalidInput)
    }

    /// Unit price recorded for `index`, if that row was part of the calculation
    pub fn unit_price(&self, index: usize) -> Option<UnitPrice> {
        self.unit_prices.get(index).copied()
    }

    /// Lowest unit price among the valid rows, even when the outcome is an
    /// error
    pub fn best_unit_price(&self) -> Option<f64> {
        lowest(&self.unit_prices).map(|(_, value)| value)
    }

    /// Whether row `index` holds the lowest valid unit price
    ///
    /// Several rows can qualify when they tie.
    pub fn is_lowest(&self, index: usize) -> bool {
        match (self.unit_price(index), self.best_unit_price()) {
            (Some(UnitPrice::Computed(value)), Some(best)) => value == best,
            _ => false,
        }
    }
}

/// Compare a list of entries
///
/// Pure: the same entries always yield the same result.
pub fn compare(entries: &[ProductEntry]) -> ComparisonResult {
    let unit_prices: Vec<UnitPrice> = entries.iter().map(ProductEntry::unit_price).collect();

    let all_valid = unit_prices.iter().all(|unit| unit.is_valid());
    let outcome = match lowest(&unit_prices) {
        Some((index, unit_price)) if all_valid => Outcome::Cheapest { index, unit_price },
        _ => Outcome::IncompleteOrInvalidInput,
    };

    ComparisonResult {
        unit_prices,
        outcome,
    }
}

/// Left-to-right minimum scan over the valid rows; the first of equal
/// minima wins
fn lowest(unit_prices: &[UnitPrice]) -> Option<(usize, f64)> {
    let mut best: Option<(usize, f64)> = None;

    for (index, unit) in unit_prices.iter().enumerate() {
        let Some(value) = unit.value() else {
            continue;
        };
        match best {
            Some((_, current)) if value >= current => {}
            _ => best = Some((index, value)),
        }
    }

    best
}

/// Session state for one comparison screen
#[derive(Debug, Clone, PartialEq)]
pub struct PriceComparator {
    entries: Vec<ProductEntry>,
}

impl Default for PriceComparator {
    fn default() -> Self {
        Self::new()
    }
}

impl PriceComparator {
    /// Start with two empty entries
    pub fn new() -> Self {
        Self {
            entries: vec![ProductEntry::default(); MIN_ENTRIES],
        }
    }

    /// Build a comparator from `(price, amount)` text pairs
    ///
    /// Padded with empty entries when fewer than two pairs are given.
    pub fn from_pairs<P, A>(pairs: impl IntoIterator<Item = (P, A)>) -> Self
    where
        P: Into<String>,
        A: Into<String>,
    {
        let mut entries: Vec<ProductEntry> = pairs
            .into_iter()
            .map(|(price, amount)| ProductEntry::new(price, amount))
            .collect();
        if entries.len() < MIN_ENTRIES {
            entries.resize(MIN_ENTRIES, ProductEntry::default());
        }
        Self { entries }
    }

    pub fn entries(&self) -> &[ProductEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Whether `remove_entry` would currently do anything
    pub fn can_remove(&self) -> bool {
        self.entries.len() > MIN_ENTRIES
    }

    /// Append an empty entry
    pub fn add_entry(&mut self) {
        self.entries.push(ProductEntry::default());
        debug!(entries = self.entries.len(), "Entry added");
    }

    /// Remove the entry at `index`
    ///
    /// Returns `false` and leaves the list untouched when only two entries
    /// remain or `index` is out of range.
    pub fn remove_entry(&mut self, index: usize) -> bool {
        if !self.can_remove() || index >= self.entries.len() {
            debug!(
                index,
                entries = self.entries.len(),
                "Entry removal refused"
            );
            return false;
        }

        self.entries.remove(index);
        debug!(index, entries = self.entries.len(), "Entry removed");
        true
    }

    /// Replace one field's raw text verbatim
    ///
    /// Returns `false` when `index` is out of range.
    pub fn update_entry(&mut self, index: usize, field: Field, text: impl Into<String>) -> bool {
        match self.entries.get_mut(index) {
            Some(entry) => {
                *entry.field_mut(field) = text.into();
                true
            }
            None => false,
        }
    }

    /// Back to two empty entries
    pub fn reset(&mut self) {
        *self = Self::new();
        debug!("Comparator reset");
    }

    /// Compute unit prices and the cheapest entry for the current list
    pub fn calculate(&self) -> ComparisonResult {
        let result = compare(&self.entries);
        match result.outcome {
            Outcome::Cheapest { index, unit_price } => {
                debug!(index, unit_price, "Calculation found cheapest entry")
            }
            Outcome::IncompleteOrInvalidInput => {
                let invalid = result.unit_prices.iter().filter(|u| !u.is_valid()).count();
                debug!(invalid, "Calculation rejected incomplete input")
            }
        }
        result
    }
}
