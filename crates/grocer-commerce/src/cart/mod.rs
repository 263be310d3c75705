//! Shopping cart module.
//!
//! Contains cart lines, the external store contract, the reconciler that
//! keeps quantities in step with the store, and derived pricing.

mod line;
mod pricing;
mod reconciler;
mod store;

pub use line::{find_line, quantity_of, CartLine, NewCartLine};
pub use pricing::{cart_total, CartPricing, LineItemPricing};
pub use reconciler::CartReconciler;
pub use store::{CartStore, InMemoryCartStore, StoreOp};
