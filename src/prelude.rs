//! Till prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    Error,
    clock::{Clock, FixedClock, SystemClock},
    discounts::{DiscountError, DiscountRate},
    menu::{Menu, MenuEntry, MenuError, MenuStore},
    order::{Ledger, LineItem, OrderError},
    prices::Price,
    pricing::{Bill, BillError, TAX_RATE},
    receipt::{Receipt, ReceiptError},
    session::OrderSession,
    shell::{Reply, Shell, ShellError},
};
