//! Cart line records.

use crate::catalog::Product;
use crate::ids::{LineId, ProductId};
use crate::money::{self, Money};
use crate::wire;
use serde::{Deserialize, Serialize};

/// One product's row in the cart.
///
/// `name`, `price` and `image` are copied from the product when the line is
/// created and are not refreshed afterwards. A stored line always has a
/// positive quantity; dropping to zero deletes the line instead.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
    /// Store-assigned line identifier.
    pub id: LineId,
    /// Product this line refers to.
    pub product_id: ProductId,
    /// Product name at the time the line was created.
    #[serde(default, deserialize_with = "wire::text")]
    pub name: String,
    /// Unit price at the time the line was created.
    #[serde(default, with = "money::decimal")]
    pub price: Money,
    /// Quantity in the cart.
    pub quantity: i64,
    /// Product image at the time the line was created.
    #[serde(
        default,
        deserialize_with = "wire::optional_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub image: Option<String>,
    /// Optimistic concurrency token, for stores that track one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<u64>,
}

impl CartLine {
    /// Line total (`price * quantity`), or `None` on overflow.
    pub fn total(&self) -> Option<Money> {
        self.price.try_multiply(self.quantity)
    }

    /// Copy of this line with a different quantity; everything else,
    /// including the version token, is carried over unchanged.
    pub fn with_quantity(&self, quantity: i64) -> Self {
        Self {
            quantity,
            ..self.clone()
        }
    }
}

/// Fields sent to the store when creating a line.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NewCartLine {
    pub product_id: ProductId,
    pub name: String,
    #[serde(with = "money::decimal")]
    pub price: Money,
    pub quantity: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl NewCartLine {
    /// Snapshot a product into a new line with the given quantity.
    pub fn from_product(product: &Product, quantity: i64) -> Self {
        Self {
            product_id: product.id.clone(),
            name: product.name.clone(),
            price: product.price,
            quantity,
            image: product.image.clone(),
        }
    }

    /// Attach a store-assigned id.
    pub fn into_line(self, id: LineId) -> CartLine {
        CartLine {
            id,
            product_id: self.product_id,
            name: self.name,
            price: self.price,
            quantity: self.quantity,
            image: self.image,
            version: None,
        }
    }
}

/// The first line for `product_id`, in encounter order.
pub fn find_line<'a>(cart: &'a [CartLine], product_id: &ProductId) -> Option<&'a CartLine> {
    cart.iter().find(|line| &line.product_id == product_id)
}

/// Quantity of `product_id` in the cart, or `0` when it has no line.
pub fn quantity_of(cart: &[CartLine], product_id: &ProductId) -> i64 {
    find_line(cart, product_id).map_or(0, |line| line.quantity)
}
