//! Category filters for the storefront navigation.

use crate::catalog::Product;
use std::fmt;

/// A category selector from the navigation bar.
///
/// Each named filter maps to a fixed set of lowercase substring tokens that
/// are matched against a product's free-text `category` field. `All` skips
/// the mapping entirely, and so does any label the storefront does not know.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    FruitsAndVegetables,
    DairyAndBakery,
    Beverages,
    Snacks,
    Household,
    PersonalCare,
    /// A label outside the known set. Matches every product.
    Unrecognized(String),
}

impl CategoryFilter {
    /// Every selectable filter, in navigation order.
    pub const NAVIGATION: [CategoryFilter; 7] = [
        CategoryFilter::All,
        CategoryFilter::FruitsAndVegetables,
        CategoryFilter::DairyAndBakery,
        CategoryFilter::Beverages,
        CategoryFilter::Snacks,
        CategoryFilter::Household,
        CategoryFilter::PersonalCare,
    ];

    /// Resolve a navigation label. Matching is exact.
    pub fn from_label(label: &str) -> Self {
        match label {
            "All" => CategoryFilter::All,
            "Fruits & Vegetables" => CategoryFilter::FruitsAndVegetables,
            "Dairy & Bakery" => CategoryFilter::DairyAndBakery,
            "Beverages" => CategoryFilter::Beverages,
            "Snacks" => CategoryFilter::Snacks,
            "Household" => CategoryFilter::Household,
            "Personal Care" => CategoryFilter::PersonalCare,
            other => CategoryFilter::Unrecognized(other.to_string()),
        }
    }

    /// The label shown in navigation.
    pub fn label(&self) -> &str {
        match self {
            CategoryFilter::All => "All",
            CategoryFilter::FruitsAndVegetables => "Fruits & Vegetables",
            CategoryFilter::DairyAndBakery => "Dairy & Bakery",
            CategoryFilter::Beverages => "Beverages",
            CategoryFilter::Snacks => "Snacks",
            CategoryFilter::Household => "Household",
            CategoryFilter::PersonalCare => "Personal Care",
            CategoryFilter::Unrecognized(label) => label,
        }
    }

    /// Section heading for a product listing under this filter.
    pub fn heading(&self) -> &str {
        match self {
            CategoryFilter::All => "All Products",
            other => other.label(),
        }
    }

    /// Substring tokens for this filter, or `None` when the filter matches
    /// everything.
    pub fn tokens(&self) -> Option<&'static [&'static str]> {
        match self {
            CategoryFilter::All | CategoryFilter::Unrecognized(_) => None,
            CategoryFilter::FruitsAndVegetables => Some(&["fruit", "vegetable"]),
            CategoryFilter::DairyAndBakery => Some(&["dairy", "bakery"]),
            CategoryFilter::Beverages => Some(&["beverage", "drink"]),
            CategoryFilter::Snacks => Some(&["snack"]),
            CategoryFilter::Household => Some(&["household"]),
            CategoryFilter::PersonalCare => Some(&["personal", "care"]),
        }
    }

    /// Check whether a product belongs under this filter.
    pub fn matches(&self, product: &Product) -> bool {
        let Some(tokens) = self.tokens() else {
            return true;
        };
        let category = product.category.to_lowercase();
        tokens.iter().any(|token| category.contains(token))
    }
}

impl fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl From<&str> for CategoryFilter {
    fn from(label: &str) -> Self {
        CategoryFilter::from_label(label)
    }
}
