//! Till
//!
//! Till is a small point-of-sale billing library: load a menu, take an order, apply a
//! discount, and produce a receipt with subtotal, tax and total.

pub mod clock;
pub mod discounts;
pub mod menu;
pub mod order;
pub mod prelude;
pub mod prices;
pub mod pricing;
pub mod receipt;
pub mod session;
pub mod shell;

/// Any error the billing core can report to a caller.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Menu file could not be loaded or saved.
    #[error(transparent)]
    Menu(#[from] menu::MenuError),

    /// An item could not be added to the order.
    #[error(transparent)]
    Order(#[from] order::OrderError),

    /// A discount was rejected.
    #[error(transparent)]
    Discount(#[from] discounts::DiscountError),

    /// Bill amounts could not be calculated.
    #[error(transparent)]
    Bill(#[from] pricing::BillError),

    /// A receipt could not be built or saved.
    #[error(transparent)]
    Receipt(#[from] receipt::ReceiptError),

    /// The order shell stopped on a terminal error.
    #[error(transparent)]
    Shell(#[from] shell::ShellError),
}
