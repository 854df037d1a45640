//! Order ledger

use std::fmt;

use rust_decimal::Decimal;
use thiserror::Error;

use crate::{
    menu::MenuEntry,
    prices::{Price, format_amount, from_cents, to_decimal},
    pricing::BillError,
};

/// Errors raised while adding to an order.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum OrderError {
    /// Quantity text was not a whole number greater than zero.
    #[error("invalid quantity {0:?}; enter a whole number greater than zero")]
    InvalidQuantity(String),

    /// No menu entry has this exact name.
    #[error("{0:?} is not on the menu")]
    UnknownItem(String),
}

/// A single line of an order: one menu item at a fixed quantity.
#[derive(Clone, Debug, PartialEq)]
pub struct LineItem {
    name: String,
    unit_price: Price,
    quantity: u32,
}

impl LineItem {
    /// Creates a line for `entry`, copying its current price.
    pub(crate) fn for_entry(entry: &MenuEntry, quantity: u32) -> Self {
        Self {
            name: entry.name().to_string(),
            unit_price: *entry.price(),
            quantity,
        }
    }

    /// Name of the ordered item
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Price of one unit, as it was when the line was added
    pub fn unit_price(&self) -> &Price {
        &self.unit_price
    }

    /// Number of units ordered (always at least 1)
    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    /// Unit price multiplied by quantity.
    ///
    /// # Errors
    ///
    /// Returns [`BillError::Overflow`] if the amount does not fit in minor units.
    pub fn line_total(&self) -> Result<Price, BillError> {
        self.unit_price
            .to_minor_units()
            .checked_mul(i64::from(self.quantity))
            .map(from_cents)
            .ok_or(BillError::Overflow)
    }
}

impl fmt::Display for LineItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let amount = to_decimal(&self.unit_price) * Decimal::from(self.quantity);

        write!(
            f,
            "{} x{}: {}",
            self.name,
            self.quantity,
            format_amount(amount)
        )
    }
}

/// Ordered lines of the in-progress order.
///
/// Insertion order is preserved; adding the same item twice produces two lines.
#[derive(Clone, Debug, Default)]
pub struct Ledger {
    lines: Vec<LineItem>,
}

impl Ledger {
    /// Create an empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(&mut self, line: LineItem) {
        self.lines.push(line);
    }

    pub(crate) fn clear(&mut self) {
        self.lines.clear();
    }

    /// All lines in the order they were added.
    pub fn lines(&self) -> &[LineItem] {
        &self.lines
    }

    /// Iterate over the lines in the order they were added.
    pub fn iter(&self) -> impl Iterator<Item = &LineItem> {
        self.lines.iter()
    }

    /// Number of lines.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Check if the ledger has no lines.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

/// Parse quantity text typed by the user.
///
/// # Errors
///
/// Returns [`OrderError::InvalidQuantity`] unless the trimmed text is an integer in `1..=u32::MAX`.
pub fn parse_quantity(text: &str) -> Result<u32, OrderError> {
    text.trim()
        .parse::<i64>()
        .ok()
        .filter(|quantity| *quantity > 0)
        .and_then(|quantity| u32::try_from(quantity).ok())
        .ok_or_else(|| OrderError::InvalidQuantity(text.to_string()))
}
