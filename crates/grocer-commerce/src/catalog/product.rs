//! Product records as served by the catalog.

use crate::ids::ProductId;
use crate::money::{self, Money};
use crate::wire;
use serde::{Deserialize, Serialize};

/// A sellable catalog entry.
///
/// Products are owned by the external catalog and treated as read-only
/// input. Text fields that the catalog omits or sends in the wrong shape
/// decode as empty strings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Unique product identifier.
    pub id: ProductId,
    /// Product name.
    #[serde(default, deserialize_with = "wire::text")]
    pub name: String,
    /// Free-form description.
    #[serde(default, deserialize_with = "wire::text")]
    pub description: String,
    /// Free-text category label (e.g., "Fresh Fruits").
    #[serde(default, deserialize_with = "wire::text")]
    pub category: String,
    /// Selling unit (e.g., "kg", "pack").
    #[serde(default, deserialize_with = "wire::text")]
    pub unit: String,
    /// Unit price.
    #[serde(default, with = "money::decimal")]
    pub price: Money,
    /// Units on hand. Display only, never checked against cart quantities.
    #[serde(default, deserialize_with = "wire::count")]
    pub stock: u64,
    /// Display image reference.
    #[serde(
        default,
        deserialize_with = "wire::optional_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub image: Option<String>,
}

impl Product {
    /// Create a product with the given id, name and price.
    pub fn new(id: impl Into<ProductId>, name: impl Into<String>, price: Money) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: String::new(),
            category: String::new(),
            unit: String::new(),
            price,
            stock: 0,
            image: None,
        }
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_unit(mut self, unit: impl Into<String>) -> Self {
        self.unit = unit.into();
        self
    }

    pub fn with_stock(mut self, stock: u64) -> Self {
        self.stock = stock;
        self
    }

    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = Some(image.into());
        self
    }

    /// Lowercased text the search engine looks through: name, category and
    /// description joined by single spaces.
    pub fn search_text(&self) -> String {
        format!("{} {} {}", self.name, self.category, self.description).to_lowercase()
    }

    /// Price per unit for display (e.g., "₹40 per kg").
    pub fn price_per_unit(&self) -> String {
        if self.unit.is_empty() {
            self.price.display()
        } else {
            format!("{} per {}", self.price.display(), self.unit)
        }
    }
}
