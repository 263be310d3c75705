//! Catalog filtering: category plus text search, with optional sampling.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::catalog::{CategoryFilter, Product};
use crate::search::SearchQuery;

/// Number of products shown in the home page "featured" strip.
pub const FEATURED_SAMPLE_SIZE: usize = 8;

/// Decides which catalog products are visible.
///
/// A product is visible when it passes both the category filter and the
/// search query. Without a sample size the surviving products keep their
/// catalog order. With one, every call draws a fresh uniformly shuffled
/// sample from the random source it is given.
///
/// ```rust
/// use grocer_commerce::catalog::CategoryFilter;
/// use grocer_commerce::search::CatalogFilter;
///
/// let filter = CatalogFilter::new()
///     .with_category(CategoryFilter::Beverages)
///     .with_query("green tea");
/// assert!(filter.sample_size().is_none());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogFilter {
    category: CategoryFilter,
    query: SearchQuery,
    sample_size: Option<usize>,
}

impl CatalogFilter {
    /// A filter that shows everything.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_category(mut self, category: impl Into<CategoryFilter>) -> Self {
        self.category = category.into();
        self
    }

    pub fn with_query(mut self, query: &str) -> Self {
        self.query = SearchQuery::new(query);
        self
    }

    /// Cap the result at `size` randomly chosen products.
    pub fn with_sample(mut self, size: usize) -> Self {
        self.sample_size = Some(size);
        self
    }

    pub fn category(&self) -> &CategoryFilter {
        &self.category
    }

    pub fn query(&self) -> &SearchQuery {
        &self.query
    }

    pub fn sample_size(&self) -> Option<usize> {
        self.sample_size
    }

    /// Check a single product against the category and the query.
    pub fn matches(&self, product: &Product) -> bool {
        self.category.matches(product) && self.query.matches(product)
    }

    /// Matching products in catalog order, ignoring any sample size.
    pub fn matching<'a>(&self, products: &'a [Product]) -> Vec<&'a Product> {
        products.iter().filter(|p| self.matches(p)).collect()
    }

    /// Visible products, sampled with `rng` when a sample size is set.
    pub fn apply<'a, R>(&self, products: &'a [Product], rng: &mut R) -> Vec<&'a Product>
    where
        R: Rng + ?Sized,
    {
        let mut matches = self.matching(products);
        let Some(size) = self.sample_size else {
            return matches;
        };
        let amount = size.min(matches.len());
        let (sample, _) = matches.partial_shuffle(rng, amount);
        sample.to_vec()
    }
}

/// Compute the visible products for a category label, raw query and
/// optional sample size.
pub fn visible<'a, R>(
    products: &'a [Product],
    category: &str,
    query: &str,
    sample_size: Option<usize>,
    rng: &mut R,
) -> Vec<&'a Product>
where
    R: Rng + ?Sized,
{
    let mut filter = CatalogFilter::new()
        .with_category(category)
        .with_query(query);
    if let Some(size) = sample_size {
        filter = filter.with_sample(size);
    }
    filter.apply(products, rng)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::{Currency, Money};
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashSet;

    fn product(id: &str, name: &str, category: &str, description: &str) -> Product {
        Product::new(id, name, Money::from_major(10, Currency::INR))
            .with_category(category)
            .with_description(description)
    }

    fn catalog() -> Vec<Product> {
        vec![
            product("1", "Organic Milk", "Dairy", "Full cream"),
            product("2", "Banana", "Fresh Fruits", "Robusta bananas"),
            product("3", "Potato Chips", "Snacks", "Salted"),
            product("4", "Orange Juice", "Beverages", "No added sugar"),
            product("5", "Brown Bread", "Bakery", "Whole wheat"),
            product("6", "Tomato", "Vegetables", "Farm fresh"),
            product("7", "Mystery Box", "", ""),
        ]
    }

    fn ids(products: &[&Product]) -> Vec<String> {
        products.iter().map(|p| p.id.to_string()).collect()
    }

    fn rng() -> StdRng {
        StdRng::seed_from_u64(42)
    }

    #[test]
    fn test_all_with_blank_query_keeps_everything_in_order() {
        let products = catalog();
        let result = visible(&products, "All", "", None, &mut rng());
        assert_eq!(ids(&result), vec!["1", "2", "3", "4", "5", "6", "7"]);
    }

    #[test]
    fn test_category_filter() {
        let products = catalog();
        let result = visible(&products, "Fruits & Vegetables", "", None, &mut rng());
        assert_eq!(ids(&result), vec!["2", "6"]);

        let result = visible(&products, "Dairy & Bakery", "", None, &mut rng());
        assert_eq!(ids(&result), vec!["1", "5"]);
    }

    #[test]
    fn test_unrecognized_category_shows_everything() {
        let products = catalog();
        let result = visible(&products, "Frozen", "", None, &mut rng());
        assert_eq!(result.len(), products.len());
    }

    #[test]
    fn test_whitespace_query_equals_category_set() {
        let products = catalog();
        let blank = visible(&products, "Snacks", "", None, &mut rng());
        let spaces = visible(&products, "Snacks", "   ", None, &mut rng());
        assert_eq!(ids(&blank), ids(&spaces));
        assert_eq!(ids(&blank), vec!["3"]);
    }

    #[test]
    fn test_category_and_search_combine() {
        let products = catalog();
        // "fresh" appears in the banana's category and the tomato's description.
        let result = visible(&products, "Fruits & Vegetables", "fresh", None, &mut rng());
        assert_eq!(ids(&result), vec!["2", "6"]);

        let result = visible(&products, "Beverages", "milk", None, &mut rng());
        assert!(result.is_empty());
    }

    #[test]
    fn test_search_matches_category_text() {
        let products = catalog();
        let result = visible(&products, "All", "bakery", None, &mut rng());
        assert_eq!(ids(&result), vec!["5"]);
    }

    #[test]
    fn test_single_letter_query_behaves_as_blank() {
        let products = catalog();
        let a = visible(&products, "All", "a", None, &mut rng());
        let blank = visible(&products, "All", "", None, &mut rng());
        assert_eq!(ids(&a), ids(&blank));
    }

    #[test]
    fn test_empty_catalog() {
        let result = visible(&[], "All", "milk", Some(8), &mut rng());
        assert!(result.is_empty());
    }

    #[test]
    fn test_sample_draws_distinct_members() {
        let products: Vec<Product> = (0..20)
            .map(|i| product(&i.to_string(), &format!("Item {}", i), "Snacks", ""))
            .collect();
        let all: HashSet<String> = products.iter().map(|p| p.id.to_string()).collect();

        let sample = visible(&products, "All", "", Some(FEATURED_SAMPLE_SIZE), &mut rng());
        assert_eq!(sample.len(), FEATURED_SAMPLE_SIZE);

        let drawn: HashSet<String> = sample.iter().map(|p| p.id.to_string()).collect();
        assert_eq!(drawn.len(), FEATURED_SAMPLE_SIZE);
        assert!(drawn.is_subset(&all));
    }

    #[test]
    fn test_sample_larger_than_matches() {
        let products = catalog();
        let sample = visible(&products, "Snacks", "", Some(8), &mut rng());
        assert_eq!(ids(&sample), vec!["3"]);
    }

    #[test]
    fn test_sample_is_deterministic_for_a_seed() {
        let products = catalog();
        let filter = CatalogFilter::new().with_sample(3);
        let first = filter.apply(&products, &mut StdRng::seed_from_u64(7));
        let second = filter.apply(&products, &mut StdRng::seed_from_u64(7));
        assert_eq!(ids(&first), ids(&second));
    }

    #[test]
    fn test_sample_of_zero() {
        let products = catalog();
        let sample = CatalogFilter::new().with_sample(0).apply(&products, &mut rng());
        assert!(sample.is_empty());
    }
}
