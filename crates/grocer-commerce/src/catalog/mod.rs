//! Product catalog module.
//!
//! Contains the product record, category filters and catalog sources.

mod category;
mod product;
mod source;

pub use category::CategoryFilter;
pub use product::Product;
pub use source::{InMemoryCatalog, ProductCatalog};
