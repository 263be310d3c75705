//! Checkout module.

mod flow;

pub use flow::{CheckoutOutcome, ORDER_PLACED_MESSAGE};
