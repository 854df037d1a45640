//! Prices

use rust_decimal::{Decimal, RoundingStrategy, prelude::ToPrimitive};
use rusty_money::{
    Money,
    iso::{Currency, USD},
};

/// Money in the till's single currency.
pub type Price = Money<'static, Currency>;

/// Rounding applied whenever an amount is brought back to whole cents.
pub const CENT_ROUNDING: RoundingStrategy = RoundingStrategy::MidpointAwayFromZero;

/// Creates a price from minor units (cents).
pub fn from_cents(cents: i64) -> Price {
    Money::from_minor(cents, USD)
}

/// Converts a price to a decimal amount in major units (e.g. `8.99`).
pub fn to_decimal(price: &Price) -> Decimal {
    Decimal::new(price.to_minor_units(), 2)
}

/// Rounds a major-unit amount to two decimal places.
pub fn round_to_cents(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(2, CENT_ROUNDING)
}

/// Converts a major-unit amount into a price, rounding to whole cents.
///
/// Returns `None` if the amount does not fit in minor units.
pub fn from_decimal(amount: Decimal) -> Option<Price> {
    round_to_cents(amount)
        .checked_mul(Decimal::new(100, 0))
        .and_then(|cents| cents.to_i64())
        .map(from_cents)
}

/// Parse a plain decimal literal (e.g. `"8.99"`) into a price.
///
/// Surrounding whitespace is ignored. Amounts with more than two decimal places are
/// rounded to the nearest cent.
pub fn parse_price(s: &str) -> Option<Price> {
    s.trim().parse::<Decimal>().ok().and_then(from_decimal)
}

/// Formats a major-unit amount as dollars with exactly two decimals, e.g. `$17.98`.
pub fn format_amount(amount: Decimal) -> String {
    let mut rounded = round_to_cents(amount);
    rounded.rescale(2);

    format!("${rounded}")
}

/// Formats a price as dollars with exactly two decimals.
pub fn format_price(price: &Price) -> String {
    format_amount(to_decimal(price))
}
