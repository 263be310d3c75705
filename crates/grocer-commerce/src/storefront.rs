//! Coordination between the catalog, the filter and the cart.
//!
//! A presentation layer holds a [`StorefrontView`] for the lifetime of one
//! render, picks products with [`StorefrontView::browse`], and replaces the view's
//! cart with whatever the reconciler returns after each action.

use futures::try_join;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::cart::{quantity_of, CartLine, CartReconciler, CartStore};
use crate::catalog::{CategoryFilter, Product, ProductCatalog};
use crate::error::CommerceError;
use crate::search::{CatalogFilter, FEATURED_SAMPLE_SIZE};

/// How products are being browsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BrowseMode {
    /// Full shop listing in catalog order.
    #[default]
    Shop,
    /// Home page: a random featured sample.
    Home,
}

/// Navigation state supplied by the presentation layer.
#[derive(Debug, Clone, Default)]
pub struct BrowseState {
    pub category: CategoryFilter,
    pub search: String,
    pub mode: BrowseMode,
}

impl BrowseState {
    pub fn new(category: impl Into<CategoryFilter>, search: impl Into<String>) -> Self {
        Self {
            category: category.into(),
            search: search.into(),
            mode: BrowseMode::Shop,
        }
    }

    pub fn home(mut self) -> Self {
        self.mode = BrowseMode::Home;
        self
    }

    /// The catalog filter for this state.
    pub fn filter(&self) -> CatalogFilter {
        let filter = CatalogFilter::new()
            .with_category(self.category.clone())
            .with_query(&self.search);
        match self.mode {
            BrowseMode::Shop => filter,
            BrowseMode::Home => filter.with_sample(FEATURED_SAMPLE_SIZE),
        }
    }
}

/// Products and cart as loaded for one page.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StorefrontView {
    pub products: Vec<Product>,
    pub cart: Vec<CartLine>,
}

impl StorefrontView {
    pub fn product(&self, id: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.id.as_str() == id)
    }

    /// Visible products for `state`, each with its cart quantity.
    pub fn browse<R>(&self, state: &BrowseState, rng: &mut R) -> Vec<BrowseItem<'_>>
    where
        R: Rng + ?Sized,
    {
        state
            .filter()
            .apply(&self.products, rng)
            .into_iter()
            .map(|product| BrowseItem {
                product,
                quantity: quantity_of(&self.cart, &product.id),
            })
            .collect()
    }
}

/// A visible product paired with its current cart quantity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BrowseItem<'a> {
    pub product: &'a Product,
    pub quantity: i64,
}

/// Wires a product catalog and a cart store together.
pub struct Storefront<C, S> {
    catalog: C,
    cart: CartReconciler<S>,
}

impl<C: ProductCatalog, S: CartStore> Storefront<C, S> {
    pub fn new(catalog: C, store: S) -> Self {
        Self {
            catalog,
            cart: CartReconciler::new(store),
        }
    }

    /// The cart reconciler, for increment/decrement/checkout.
    pub fn cart(&self) -> &CartReconciler<S> {
        &self.cart
    }

    /// Fetch products and cart together.
    pub async fn load(&self) -> Result<StorefrontView, CommerceError> {
        let products = async {
            self.catalog
                .list_products()
                .await
                .map_err(CommerceError::from)
        };
        let (products, cart) = try_join!(products, self.cart.load())?;
        Ok(StorefrontView { products, cart })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cart::{InMemoryCartStore, StoreOp};
    use crate::catalog::InMemoryCatalog;
    use crate::money::{Currency, Money};
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::sync::Arc;

    fn catalog() -> InMemoryCatalog {
        let mut products = vec![
            Product::new("milk", "Organic Milk", Money::from_major(60, Currency::INR))
                .with_category("Dairy"),
            Product::new("apple", "Shimla Apple", Money::from_major(120, Currency::INR))
                .with_category("Fruits"),
        ];
        for i in 0..12 {
            products.push(
                Product::new(
                    format!("snack-{}", i),
                    format!("Snack {}", i),
                    Money::from_major(20, Currency::INR),
                )
                .with_category("Snacks"),
            );
        }
        InMemoryCatalog::new(products)
    }

    fn storefront() -> Storefront<InMemoryCatalog, Arc<InMemoryCartStore>> {
        Storefront::new(catalog(), Arc::new(InMemoryCartStore::new()))
    }

    #[tokio::test]
    async fn test_browse_pairs_products_with_quantities() {
        let shop = storefront();
        let mut view = shop.load().await.unwrap();
        let milk = view.product("milk").unwrap().clone();

        view.cart = shop.cart().increment(&milk, &view.cart).await.unwrap();
        view.cart = shop.cart().increment(&milk, &view.cart).await.unwrap();

        let state = BrowseState::new("Dairy & Bakery", "");
        let items = view.browse(&state, &mut StdRng::seed_from_u64(1));
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].product.id.as_str(), "milk");
        assert_eq!(items[0].quantity, 2);
    }

    #[tokio::test]
    async fn test_home_mode_samples_featured() {
        let shop = storefront();
        let view = shop.load().await.unwrap();

        let state = BrowseState::new("All", "").home();
        let items = view.browse(&state, &mut StdRng::seed_from_u64(9));
        assert_eq!(items.len(), FEATURED_SAMPLE_SIZE);
        assert!(items.iter().all(|item| item.quantity == 0));
    }

    #[tokio::test]
    async fn test_load_surfaces_cart_failure() {
        let shop = storefront();
        shop.cart().store().fail_on(StoreOp::List, 0);
        assert!(shop.load().await.is_err());
    }
}
