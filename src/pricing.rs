//! Pricing
//!
//! Bill arithmetic. Subtotal and tax are rounded to the cent; the discount amount is
//! kept unrounded and only the final total is rounded again.

use rust_decimal::Decimal;
use thiserror::Error;

use crate::{
    discounts::DiscountRate,
    order::Ledger,
    prices::{Price, from_cents, from_decimal, round_to_cents, to_decimal},
};

/// Sales tax applied to every subtotal (10%).
pub const TAX_RATE: Decimal = Decimal::from_parts(1, 0, 0, false, 1);

/// Errors that can occur while calculating a bill.
#[derive(Debug, Error, PartialEq)]
pub enum BillError {
    /// An amount did not fit in minor units.
    #[error("bill amount overflowed")]
    Overflow,
}

/// Sum of unit price × quantity over every line. Zero for an empty ledger.
///
/// # Errors
///
/// Returns [`BillError::Overflow`] if a line total or the sum does not fit in cents.
pub fn subtotal(ledger: &Ledger) -> Result<Price, BillError> {
    ledger
        .iter()
        .try_fold(0_i64, |cents, line| {
            cents
                .checked_add(line.line_total()?.to_minor_units())
                .ok_or(BillError::Overflow)
        })
        .map(from_cents)
}

/// Tax on the subtotal, rounded to the cent.
///
/// # Errors
///
/// Returns a [`BillError`] if the subtotal cannot be calculated.
pub fn tax(ledger: &Ledger) -> Result<Price, BillError> {
    tax_on(&subtotal(ledger)?)
}

/// Subtotal multiplied by the discount rate, in major units and not rounded.
///
/// # Errors
///
/// Returns a [`BillError`] if the subtotal cannot be calculated.
pub fn discount_amount(ledger: &Ledger, rate: DiscountRate) -> Result<Decimal, BillError> {
    discount_on(&subtotal(ledger)?, rate)
}

/// Subtotal plus tax minus discount, rounded to the cent.
///
/// # Errors
///
/// Returns a [`BillError`] if any amount overflows.
pub fn total(ledger: &Ledger, rate: DiscountRate) -> Result<Price, BillError> {
    Ok(Bill::calculate(ledger, rate)?.total)
}

fn tax_on(subtotal: &Price) -> Result<Price, BillError> {
    to_decimal(subtotal)
        .checked_mul(TAX_RATE)
        .and_then(from_decimal)
        .ok_or(BillError::Overflow)
}

fn discount_on(subtotal: &Price, rate: DiscountRate) -> Result<Decimal, BillError> {
    to_decimal(subtotal)
        .checked_mul(rate.fraction())
        .ok_or(BillError::Overflow)
}

/// All amounts derived from a ledger and a discount rate.
#[derive(Clone, Debug, PartialEq)]
pub struct Bill {
    subtotal: Price,
    tax: Price,
    discount: Decimal,
    rate: DiscountRate,
    total: Price,
}

impl Bill {
    /// Calculate the bill for `ledger` with `rate` taken off the subtotal.
    ///
    /// # Errors
    ///
    /// Returns a [`BillError`] if any amount overflows.
    pub fn calculate(ledger: &Ledger, rate: DiscountRate) -> Result<Self, BillError> {
        let subtotal = subtotal(ledger)?;
        let tax = tax_on(&subtotal)?;
        let discount = discount_on(&subtotal, rate)?;

        let total = to_decimal(&subtotal)
            .checked_add(to_decimal(&tax))
            .and_then(|gross| gross.checked_sub(discount))
            .and_then(from_decimal)
            .ok_or(BillError::Overflow)?;

        Ok(Self {
            subtotal,
            tax,
            discount,
            rate,
            total,
        })
    }

    /// Sum of all lines, rounded to the cent
    pub fn subtotal(&self) -> &Price {
        &self.subtotal
    }

    /// Tax on the subtotal, rounded to the cent
    pub fn tax(&self) -> &Price {
        &self.tax
    }

    /// Unrounded discount amount in major units
    pub fn discount(&self) -> Decimal {
        self.discount
    }

    /// Discount amount rounded to the cent, as shown on a receipt
    pub fn rounded_discount(&self) -> Decimal {
        round_to_cents(self.discount)
    }

    /// Discount rate the bill was calculated with
    pub fn rate(&self) -> DiscountRate {
        self.rate
    }

    /// Amount due, rounded to the cent
    pub fn total(&self) -> &Price {
        &self.total
    }
}
