//! Storefront domain types and logic for GrocerEase.
//!
//! This crate holds the two pieces of storefront behaviour that are not
//! presentation:
//!
//! - **Catalog / Search**: products, category navigation, tolerant text
//!   search and featured-product sampling
//! - **Cart**: quantity reconciliation against an external CRUD cart store,
//!   derived totals and checkout
//!
//! plus a small shopper session value and a [`storefront::Storefront`] that
//! wires a catalog and a cart store together.
//!
//! # Example
//!
//! ```rust,ignore
//! use grocer_commerce::prelude::*;
//!
//! let shop = Storefront::new(catalog, store);
//! let mut view = shop.load().await?;
//!
//! // Fruits matching "apple"
//! let state = BrowseState::new("Fruits & Vegetables", "apple");
//! let visible = view.browse(&state, &mut rand::thread_rng());
//!
//! // Add one, then render the refreshed cart
//! view.cart = shop.cart().increment(visible[0].product, &view.cart).await?;
//! println!("Total: {}", cart_total(&view.cart)?.display());
//! ```

pub mod error;
pub mod ids;
pub mod money;
mod wire;

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod search;
pub mod session;
pub mod storefront;

pub use error::{CommerceError, StoreError};
pub use ids::*;
pub use money::{Currency, Money};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::{CommerceError, StoreError};
    pub use crate::ids::*;
    pub use crate::money::{Currency, Money};

    // Catalog
    pub use crate::catalog::{CategoryFilter, InMemoryCatalog, Product, ProductCatalog};

    // Cart
    pub use crate::cart::{
        cart_total, quantity_of, CartLine, CartPricing, CartReconciler, CartStore,
        InMemoryCartStore, LineItemPricing, NewCartLine,
    };

    // Checkout
    pub use crate::checkout::{CheckoutOutcome, ORDER_PLACED_MESSAGE};

    // Search
    pub use crate::search::{visible, CatalogFilter, SearchQuery, FEATURED_SAMPLE_SIZE};

    // Session / storefront
    pub use crate::session::{LoginPolicy, Session};
    pub use crate::storefront::{BrowseItem, BrowseMode, BrowseState, Storefront, StorefrontView};
}
