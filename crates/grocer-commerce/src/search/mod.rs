//! Search module.
//!
//! Contains the tolerant text query and the catalog filter that combines it
//! with category selection and featured-product sampling.

mod filter;
mod query;

pub use filter::{visible, CatalogFilter, FEATURED_SAMPLE_SIZE};
pub use query::{SearchQuery, MIN_WORD_LEN};
