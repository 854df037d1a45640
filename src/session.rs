//! Order session

use tracing::{debug, info};

use crate::{
    discounts::{DiscountError, DiscountRate},
    menu::Menu,
    order::{Ledger, LineItem, OrderError, parse_quantity},
    pricing::{Bill, BillError},
};

/// State of one in-progress order: its lines and the discount applied to them.
///
/// Every mutation either succeeds completely or leaves the session untouched.
#[derive(Debug, Default)]
pub struct OrderSession {
    ledger: Ledger,
    discount: DiscountRate,
}

impl OrderSession {
    /// Create a session with an empty order and no discount.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `quantity` units of the menu item called `name` to the order.
    ///
    /// The quantity is validated before the name is looked up. Adding an item that is
    /// already on the order appends a separate line.
    ///
    /// # Errors
    ///
    /// - [`OrderError::InvalidQuantity`]: quantity is not a whole number above zero.
    /// - [`OrderError::UnknownItem`]: no menu entry is named exactly `name`.
    pub fn add_item(
        &mut self,
        menu: &Menu,
        name: &str,
        quantity: &str,
    ) -> Result<LineItem, OrderError> {
        let quantity = parse_quantity(quantity)?;

        let entry = menu
            .find(name)
            .ok_or_else(|| OrderError::UnknownItem(name.to_string()))?;

        let line = LineItem::for_entry(entry, quantity);

        self.ledger.push(line.clone());

        info!(item = name, quantity, lines = self.ledger.len(), "added to order");

        Ok(line)
    }

    /// Parse `percentage` and use it as the discount for this order.
    ///
    /// # Errors
    ///
    /// Returns [`DiscountError::InvalidDiscount`] if `percentage` is not a number in `0..=100`.
    pub fn set_discount(&mut self, percentage: &str) -> Result<DiscountRate, DiscountError> {
        let rate = percentage.parse::<DiscountRate>()?;

        self.apply_discount(rate);

        Ok(rate)
    }

    /// Use an already validated rate as the discount for this order.
    pub fn apply_discount(&mut self, rate: DiscountRate) {
        self.discount = rate;

        info!(percent = %rate.points(), "discount applied");
    }

    /// Empty the order and remove any discount.
    pub fn clear(&mut self) {
        self.ledger.clear();
        self.discount = DiscountRate::zero();

        debug!("order cleared");
    }

    /// Lines ordered so far.
    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    /// Current discount rate.
    pub fn discount(&self) -> DiscountRate {
        self.discount
    }

    /// Calculate the bill for the current order.
    ///
    /// # Errors
    ///
    /// Returns a [`BillError`] if any amount overflows.
    pub fn bill(&self) -> Result<Bill, BillError> {
        Bill::calculate(&self.ledger, self.discount)
    }
}
