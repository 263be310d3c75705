//! Cart quantity reconciliation against an external store.

use tracing::{debug, warn};

use crate::cart::{find_line, CartLine, CartStore, NewCartLine};
use crate::catalog::Product;
use crate::error::{CommerceError, StoreError};

/// Derives and mutates per-product cart quantities.
///
/// Keeps no state of its own. Every mutation is a single store call
/// followed by a full re-read, and the re-read list is what callers should
/// render. If the re-read fails after a successful mutation, the error is
/// returned and the caller's previous snapshot is stale until the next
/// successful refresh.
///
/// Mutations are read-modify-write against the snapshot the caller passes
/// in. Two overlapping calls for the same product can lose an update unless
/// the store enforces line versions; callers should serialize user actions.
pub struct CartReconciler<S> {
    store: S,
}

impl<S: CartStore> CartReconciler<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// The underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Fetch the authoritative cart.
    pub async fn load(&self) -> Result<Vec<CartLine>, CommerceError> {
        self.store.list().await.map_err(|e| {
            warn!(error = %e, "failed to load cart");
            CommerceError::from(e)
        })
    }

    /// Add one unit of `product`.
    ///
    /// Bumps the existing line, or creates a line with quantity 1 that
    /// snapshots the product's name, price and image.
    pub async fn increment(
        &self,
        product: &Product,
        cart: &[CartLine],
    ) -> Result<Vec<CartLine>, CommerceError> {
        match find_line(cart, &product.id) {
            Some(line) => {
                let quantity = line
                    .quantity
                    .checked_add(1)
                    .ok_or(CommerceError::Overflow)?;
                debug!(line_id = %line.id, product_id = %product.id, quantity, "updating cart line");
                self.store
                    .update(&line.id, line.with_quantity(quantity))
                    .await
                    .map_err(|e| failed("update", e))?;
            }
            None => {
                debug!(product_id = %product.id, "creating cart line");
                self.store
                    .create(NewCartLine::from_product(product, 1))
                    .await
                    .map_err(|e| failed("create", e))?;
            }
        }
        self.load().await
    }

    /// Remove one unit of `product`.
    ///
    /// A product with no line is left alone and the given cart is returned
    /// without touching the store. A line at quantity 1 is deleted.
    pub async fn decrement(
        &self,
        product: &Product,
        cart: &[CartLine],
    ) -> Result<Vec<CartLine>, CommerceError> {
        let Some(line) = find_line(cart, &product.id) else {
            debug!(product_id = %product.id, "decrement of product not in cart");
            return Ok(cart.to_vec());
        };
        if line.quantity <= 1 {
            self.delete_line(line).await?;
        } else {
            debug!(line_id = %line.id, quantity = line.quantity - 1, "updating cart line");
            self.store
                .update(&line.id, line.with_quantity(line.quantity - 1))
                .await
                .map_err(|e| failed("update", e))?;
        }
        self.load().await
    }

    /// Set a line to exactly `quantity`; zero or below deletes it.
    pub async fn set_quantity(
        &self,
        line: &CartLine,
        quantity: i64,
    ) -> Result<Vec<CartLine>, CommerceError> {
        if quantity <= 0 {
            return self.remove(line).await;
        }
        debug!(line_id = %line.id, quantity, "setting cart line quantity");
        self.store
            .update(&line.id, line.with_quantity(quantity))
            .await
            .map_err(|e| failed("update", e))?;
        self.load().await
    }

    /// Delete a line regardless of its quantity.
    pub async fn remove(&self, line: &CartLine) -> Result<Vec<CartLine>, CommerceError> {
        self.delete_line(line).await?;
        self.load().await
    }

    pub(crate) async fn delete_line(&self, line: &CartLine) -> Result<(), StoreError> {
        debug!(line_id = %line.id, "deleting cart line");
        self.store.delete(&line.id).await.map_err(|e| {
            warn!(line_id = %line.id, error = %e, "cart store delete failed");
            e
        })
    }
}

fn failed(op: &str, e: StoreError) -> CommerceError {
    warn!(op, error = %e, "cart store call failed");
    CommerceError::from(e)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cart::{quantity_of, InMemoryCartStore, StoreOp};
    use crate::ids::ProductId;
    use crate::money::{Currency, Money};
    use std::sync::Arc;

    fn milk() -> Product {
        Product::new("p1", "Organic Milk", Money::from_major(60, Currency::INR))
            .with_image("milk.jpg")
    }

    fn bread() -> Product {
        Product::new("p2", "Brown Bread", Money::from_major(45, Currency::INR))
    }

    fn reconciler() -> CartReconciler<Arc<InMemoryCartStore>> {
        CartReconciler::new(Arc::new(InMemoryCartStore::new()))
    }

    #[tokio::test]
    async fn test_increment_on_empty_cart_creates_line() {
        let cart = reconciler();
        let lines = cart.increment(&milk(), &[]).await.unwrap();

        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].product_id, ProductId::new("p1"));
        assert_eq!(lines[0].quantity, 1);
        assert_eq!(lines[0].name, "Organic Milk");
        assert_eq!(lines[0].price, Money::from_major(60, Currency::INR));
        assert_eq!(lines[0].image.as_deref(), Some("milk.jpg"));
    }

    #[tokio::test]
    async fn test_increment_twice_keeps_single_line() {
        let cart = reconciler();
        let lines = cart.increment(&milk(), &[]).await.unwrap();
        let lines = cart.increment(&milk(), &lines).await.unwrap();

        assert_eq!(lines.len(), 1);
        assert_eq!(quantity_of(&lines, &milk().id), 2);
    }

    #[tokio::test]
    async fn test_increment_preserves_snapshot_fields() {
        let cart = reconciler();
        let lines = cart.increment(&milk(), &[]).await.unwrap();

        // A later price change in the catalog does not touch the line.
        let repriced = Product::new("p1", "Organic Milk", Money::from_major(75, Currency::INR));
        let lines = cart.increment(&repriced, &lines).await.unwrap();

        assert_eq!(lines[0].quantity, 2);
        assert_eq!(lines[0].price, Money::from_major(60, Currency::INR));
        assert_eq!(lines[0].image.as_deref(), Some("milk.jpg"));
    }

    #[tokio::test]
    async fn test_decrement_at_one_removes_line() {
        let cart = reconciler();
        let lines = cart.increment(&milk(), &[]).await.unwrap();
        let lines = cart.decrement(&milk(), &lines).await.unwrap();

        assert!(lines.is_empty());
        assert_eq!(quantity_of(&lines, &milk().id), 0);
        assert!(cart.store().snapshot().is_empty());
    }

    #[tokio::test]
    async fn test_decrement_above_one_lowers_quantity() {
        let cart = reconciler();
        let lines = cart.increment(&milk(), &[]).await.unwrap();
        let lines = cart.increment(&milk(), &lines).await.unwrap();
        let lines = cart.increment(&milk(), &lines).await.unwrap();
        let lines = cart.decrement(&milk(), &lines).await.unwrap();

        assert_eq!(quantity_of(&lines, &milk().id), 2);
    }

    #[tokio::test]
    async fn test_decrement_of_absent_product_is_noop() {
        let cart = reconciler();
        let lines = cart.increment(&milk(), &[]).await.unwrap();

        // Any store call would fail, so a no-op must not make one.
        cart.store().fail_on(StoreOp::List, 0);
        cart.store().fail_on(StoreOp::Delete, 0);
        let after = cart.decrement(&bread(), &lines).await.unwrap();

        assert_eq!(after, lines);
    }

    #[tokio::test]
    async fn test_set_quantity() {
        let cart = reconciler();
        let lines = cart.increment(&milk(), &[]).await.unwrap();

        let lines = cart.set_quantity(&lines[0], 5).await.unwrap();
        assert_eq!(lines[0].quantity, 5);

        let lines = cart.set_quantity(&lines[0], 0).await.unwrap();
        assert!(lines.is_empty());
    }

    #[tokio::test]
    async fn test_set_negative_quantity_deletes() {
        let cart = reconciler();
        let lines = cart.increment(&milk(), &[]).await.unwrap();
        let lines = cart.set_quantity(&lines[0], -3).await.unwrap();
        assert!(lines.is_empty());
    }

    #[tokio::test]
    async fn test_remove_ignores_quantity() {
        let cart = reconciler();
        let lines = cart.increment(&milk(), &[]).await.unwrap();
        let lines = cart.set_quantity(&lines[0], 4).await.unwrap();
        let lines = cart.increment(&bread(), &lines).await.unwrap();

        let lines = cart.remove(&lines[0]).await.unwrap();
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].product_id, bread().id);
    }

    #[tokio::test]
    async fn test_store_failure_is_surfaced() {
        let cart = reconciler();
        cart.store().fail_on(StoreOp::Create, 0);

        let err = cart.increment(&milk(), &[]).await.unwrap_err();
        assert!(matches!(err, CommerceError::Store(StoreError::Transport(_))));
        assert!(cart.store().snapshot().is_empty());
    }

    #[tokio::test]
    async fn test_refresh_failure_after_mutation() {
        let cart = reconciler();
        cart.store().fail_on(StoreOp::List, 0);

        // The create lands, but the caller only sees the failed re-read.
        assert!(cart.increment(&milk(), &[]).await.is_err());
        assert_eq!(cart.store().snapshot().len(), 1);

        let lines = cart.load().await.unwrap();
        assert_eq!(quantity_of(&lines, &milk().id), 1);
    }

    #[tokio::test]
    async fn test_stale_snapshot_conflicts_instead_of_losing_update() {
        let cart = reconciler();
        let stale = cart.increment(&milk(), &[]).await.unwrap();

        // Another client bumps the line first.
        cart.increment(&milk(), &stale).await.unwrap();

        let err = cart.increment(&milk(), &stale).await.unwrap_err();
        assert!(matches!(
            err,
            CommerceError::Store(StoreError::Conflict { .. })
        ));
        assert_eq!(cart.store().snapshot()[0].quantity, 2);
    }
}
