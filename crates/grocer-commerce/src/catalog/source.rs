//! Product catalog sources.

use std::sync::Arc;

use async_trait::async_trait;

use crate::catalog::Product;
use crate::error::StoreError;

/// Read-only source of catalog products.
///
/// Fetched once per page load; the storefront never writes back.
#[async_trait]
pub trait ProductCatalog: Send + Sync {
    /// List every product in catalog order.
    async fn list_products(&self) -> Result<Vec<Product>, StoreError>;
}

#[async_trait]
impl<T: ProductCatalog + ?Sized> ProductCatalog for Arc<T> {
    async fn list_products(&self) -> Result<Vec<Product>, StoreError> {
        (**self).list_products().await
    }
}

#[async_trait]
impl<T: ProductCatalog + ?Sized> ProductCatalog for Box<T> {
    async fn list_products(&self) -> Result<Vec<Product>, StoreError> {
        (**self).list_products().await
    }
}

/// Fixed in-process catalog (for development/testing).
#[derive(Debug, Clone, Default)]
pub struct InMemoryCatalog {
    products: Vec<Product>,
}

impl InMemoryCatalog {
    pub fn new(products: Vec<Product>) -> Self {
        Self { products }
    }
}

#[async_trait]
impl ProductCatalog for InMemoryCatalog {
    async fn list_products(&self) -> Result<Vec<Product>, StoreError> {
        Ok(self.products.clone())
    }
}
