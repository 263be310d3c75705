//! Checkout: empty the cart line by line.

use serde::Serialize;
use tracing::{info, warn};

use crate::cart::{CartLine, CartReconciler, CartStore};
use crate::error::CommerceError;

/// Message shown once every line has been removed.
pub const ORDER_PLACED_MESSAGE: &str = "Order placed successfully!";

/// Result of a completed checkout.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CheckoutOutcome {
    /// Cart as re-read after the deletions. Expected to be empty.
    pub cart: Vec<CartLine>,
    /// Number of lines deleted.
    pub removed: usize,
    /// Human-readable confirmation.
    pub message: &'static str,
}

impl<S: CartStore> CartReconciler<S> {
    /// Place the order by deleting every line in `cart`, then re-read it.
    ///
    /// Not transactional. Deletions run one at a time in cart order; the
    /// first failure stops the run and is returned as
    /// [`CommerceError::CheckoutInterrupted`]. Lines deleted before it stay
    /// deleted and nothing is retried.
    pub async fn checkout(&self, cart: &[CartLine]) -> Result<CheckoutOutcome, CommerceError> {
        let total = cart.len();
        for (deleted, line) in cart.iter().enumerate() {
            if let Err(source) = self.delete_line(line).await {
                warn!(deleted, total, "checkout interrupted");
                return Err(CommerceError::CheckoutInterrupted {
                    deleted,
                    total,
                    source,
                });
            }
        }

        let cart = self.load().await?;
        info!(removed = total, remaining = cart.len(), "checkout complete");
        Ok(CheckoutOutcome {
            cart,
            removed: total,
            message: ORDER_PLACED_MESSAGE,
        })
    }
}
