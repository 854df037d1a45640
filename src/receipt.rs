//! Receipt

use std::{
    fmt,
    fs::OpenOptions,
    io::{self, Write},
    path::{Path, PathBuf},
};

use jiff::civil::DateTime;
use rust_decimal::Decimal;
use thiserror::Error;
use tracing::info;

use crate::{
    discounts::DiscountRate,
    order::Ledger,
    prices::{format_amount, format_price},
    pricing::{Bill, BillError, TAX_RATE},
};

/// Restaurant name printed in the receipt title when none is configured.
pub const DEFAULT_RESTAURANT: &str = "Tasty Bites";

const BANNER_WIDTH: usize = 30;

/// Errors that can occur when building or saving a receipt.
#[derive(Debug, Error)]
pub enum ReceiptError {
    /// Error calculating the bill.
    #[error(transparent)]
    Bill(#[from] BillError),

    /// The receipt file could not be created or written.
    #[error("failed to write receipt {}: {source}", path.display())]
    Io {
        /// Receipt file path
        path: PathBuf,
        /// Underlying IO error
        #[source]
        source: io::Error,
    },
}

/// Final receipt for an order.
#[derive(Debug, Clone)]
pub struct Receipt<'a> {
    ledger: &'a Ledger,
    bill: Bill,
    issued_at: DateTime,
    restaurant: &'a str,
}

impl<'a> Receipt<'a> {
    /// Build a receipt for `ledger` with `rate` off, issued at `issued_at`.
    ///
    /// # Errors
    ///
    /// Returns a [`ReceiptError::Bill`] if the bill cannot be calculated.
    pub fn new(
        ledger: &'a Ledger,
        rate: DiscountRate,
        issued_at: DateTime,
    ) -> Result<Self, ReceiptError> {
        Ok(Self {
            ledger,
            bill: Bill::calculate(ledger, rate)?,
            issued_at,
            restaurant: DEFAULT_RESTAURANT,
        })
    }

    /// Print `restaurant` in the title instead of the default name.
    #[must_use]
    pub fn with_restaurant(mut self, restaurant: &'a str) -> Self {
        self.restaurant = restaurant;
        self
    }

    /// The bill this receipt shows.
    pub fn bill(&self) -> &Bill {
        &self.bill
    }

    /// When the receipt was issued.
    pub fn issued_at(&self) -> DateTime {
        self.issued_at
    }

    /// Render the receipt text.
    pub fn render(&self) -> String {
        self.to_string()
    }

    /// Write the rendered receipt to a new file in `dir`.
    ///
    /// # Errors
    ///
    /// Returns a [`ReceiptError::Io`] if the file already exists or cannot be written.
    pub fn persist(&self, dir: &Path) -> Result<PathBuf, ReceiptError> {
        persist(dir, &self.render(), self.issued_at)
    }
}

impl fmt::Display for Receipt<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let banner = "=".repeat(BANNER_WIDTH);
        let bill = &self.bill;

        writeln!(f, "{banner}")?;
        writeln!(f, "{} Restaurant Bill", self.restaurant)?;
        writeln!(f, "{banner}")?;
        writeln!(f, "Date: {}", self.issued_at.strftime("%Y-%m-%d %H:%M:%S"))?;
        writeln!(f)?;
        writeln!(f, "Items Ordered:")?;

        for line in self.ledger.iter() {
            writeln!(f, "{line}")?;
        }

        writeln!(f)?;
        writeln!(f, "Subtotal: {}", format_price(bill.subtotal()))?;
        writeln!(
            f,
            "Tax ({}%): {}",
            percent_points(TAX_RATE),
            format_price(bill.tax())
        )?;

        if !bill.rate().is_zero() {
            writeln!(
                f,
                "Discount ({}%): -{}",
                bill.rate().points().round(),
                format_amount(bill.discount())
            )?;
        }

        writeln!(f, "Total: {}", format_price(bill.total()))?;
        writeln!(f, "{banner}")
    }
}

/// Converts a fraction to whole percent points for display.
fn percent_points(fraction: Decimal) -> Decimal {
    (fraction * Decimal::new(100, 0)).normalize()
}

/// Receipt file name for an instant, e.g. `bill_20240309_184500.txt`.
pub fn file_name(issued_at: DateTime) -> String {
    format!("bill_{}.txt", issued_at.strftime("%Y%m%d_%H%M%S"))
}

/// Render the receipt for `ledger` with `rate` off at `now`.
///
/// # Errors
///
/// Returns a [`ReceiptError::Bill`] if the bill cannot be calculated.
pub fn render(ledger: &Ledger, rate: DiscountRate, now: DateTime) -> Result<String, ReceiptError> {
    Ok(Receipt::new(ledger, rate, now)?.render())
}

/// Write `text` to `dir/bill_YYYYMMDD_HHMMSS.txt` and return the file path.
///
/// An existing file with the same name is never overwritten.
///
/// # Errors
///
/// Returns a [`ReceiptError::Io`] if the file already exists or cannot be written.
pub fn persist(dir: &Path, text: &str, now: DateTime) -> Result<PathBuf, ReceiptError> {
    let path = dir.join(file_name(now));

    OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(&path)
        .and_then(|mut file| file.write_all(text.as_bytes()))
        .map_err(|source| ReceiptError::Io {
            path: path.clone(),
            source,
        })?;

    info!(path = %path.display(), "receipt saved");

    Ok(path)
}

#[cfg(test)]
mod tests {
    use std::fs;

    use jiff::civil::date;
    use testresult::TestResult;

    use crate::{menu::Menu, session::OrderSession};

    use super::*;

    fn issued_at() -> DateTime {
        date(2024, 3, 9).at(18, 45, 7, 0)
    }

    #[test]
    fn empty_order_renders_zero_amounts_without_discount() -> TestResult {
        let ledger = Ledger::new();

        let text = render(&ledger, DiscountRate::zero(), issued_at())?;

        assert_eq!(
            text,
            "==============================\n\
             Tasty Bites Restaurant Bill\n\
             ==============================\n\
             Date: 2024-03-09 18:45:07\n\
             \n\
             Items Ordered:\n\
             \n\
             Subtotal: $0.00\n\
             Tax (10%): $0.00\n\
             Total: $0.00\n\
             ==============================\n"
        );

        Ok(())
    }

    #[test]
    fn discounted_order_renders_every_line() -> TestResult {
        let menu = Menu::defaults();
        let mut session = OrderSession::new();

        session.add_item(&menu, "Burger", "2")?;
        session.add_item(&menu, "Soda", "1")?;
        session.set_discount("10")?;

        let text = render(session.ledger(), session.discount(), issued_at())?;

        assert_eq!(
            text,
            "==============================\n\
             Tasty Bites Restaurant Bill\n\
             ==============================\n\
             Date: 2024-03-09 18:45:07\n\
             \n\
             Items Ordered:\n\
             Burger x2: $17.98\n\
             Soda x1: $2.99\n\
             \n\
             Subtotal: $20.97\n\
             Tax (10%): $2.10\n\
             Discount (10%): -$2.10\n\
             Total: $20.97\n\
             ==============================\n"
        );

        Ok(())
    }

    #[test]
    fn discount_label_shows_whole_percent() -> TestResult {
        let menu = Menu::defaults();
        let mut session = OrderSession::new();

        session.add_item(&menu, "Salad", "1")?;
        session.set_discount("33.3")?;

        let text = render(session.ledger(), session.discount(), issued_at())?;

        assert!(text.contains("Discount (33%): -$2.33\n"), "got {text}");

        Ok(())
    }

    #[test]
    fn restaurant_name_is_configurable() -> TestResult {
        let ledger = Ledger::new();

        let receipt =
            Receipt::new(&ledger, DiscountRate::zero(), issued_at())?.with_restaurant("Night Owl");

        assert!(
            receipt
                .render()
                .starts_with("==============================\nNight Owl Restaurant Bill\n")
        );

        Ok(())
    }

    #[test]
    fn file_name_uses_compact_timestamp() {
        assert_eq!(file_name(issued_at()), "bill_20240309_184507.txt");
    }

    #[test]
    fn persist_writes_the_text() -> TestResult {
        let dir = tempfile::tempdir()?;

        let path = persist(dir.path(), "hello", issued_at())?;

        assert_eq!(path, dir.path().join("bill_20240309_184507.txt"));
        assert_eq!(fs::read_to_string(&path)?, "hello");

        Ok(())
    }

    #[test]
    fn persist_never_overwrites() -> TestResult {
        let dir = tempfile::tempdir()?;

        persist(dir.path(), "first", issued_at())?;
        let second = persist(dir.path(), "second", issued_at());

        assert!(matches!(second, Err(ReceiptError::Io { .. })));
        assert_eq!(
            fs::read_to_string(dir.path().join(file_name(issued_at())))?,
            "first"
        );

        Ok(())
    }

    #[test]
    fn persist_into_missing_directory_fails() -> TestResult {
        let dir = tempfile::tempdir()?;
        let missing = dir.path().join("nope");

        assert!(matches!(
            persist(&missing, "text", issued_at()),
            Err(ReceiptError::Io { .. })
        ));

        Ok(())
    }

    #[test]
    fn receipt_persist_uses_issue_time() -> TestResult {
        let dir = tempfile::tempdir()?;
        let ledger = Ledger::new();
        let receipt = Receipt::new(&ledger, DiscountRate::zero(), issued_at())?;

        let path = receipt.persist(dir.path())?;

        assert_eq!(fs::read_to_string(path)?, receipt.render());

        Ok(())
    }
}
