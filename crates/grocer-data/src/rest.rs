//! Cart store and product catalog over json-server style REST endpoints.
//!
//! | Operation | Request |
//! |-----------|---------|
//! | list cart | `GET /cart` |
//! | create line | `POST /cart` |
//! | update line | `PUT /cart/{id}` |
//! | delete line | `DELETE /cart/{id}` |
//! | list products | `GET /products` |

use async_trait::async_trait;
use grocer_commerce::cart::{CartLine, CartStore, NewCartLine};
use grocer_commerce::catalog::{Product, ProductCatalog};
use grocer_commerce::{LineId, StoreError};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::{FetchClient, FetchError, Response};

const CART_PATH: &str = "/cart";
const PRODUCTS_PATH: &str = "/products";

fn line_path(id: &LineId) -> String {
    format!("{}/{}", CART_PATH, id)
}

/// Check the status and decode a JSON body.
fn decode<T: DeserializeOwned>(response: Response) -> Result<T, FetchError> {
    response.error_for_status()?.json()
}

/// Map a failure on a single line, turning 404 into [`StoreError::NotFound`].
fn line_error(id: &LineId, e: FetchError) -> StoreError {
    if e.status() == Some(404) {
        StoreError::NotFound(id.to_string())
    } else {
        e.into()
    }
}

/// [`CartStore`] backed by `/cart`.
///
/// json-server keeps no version counter, so a line's `version` is sent back
/// unchanged and concurrent writes are last-writer-wins.
#[derive(Debug, Clone)]
pub struct RestCartStore {
    client: FetchClient,
}

impl RestCartStore {
    pub fn new(client: FetchClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl CartStore for RestCartStore {
    async fn list(&self) -> Result<Vec<CartLine>, StoreError> {
        let response = self.client.get(CART_PATH).send().await?;
        let lines: Vec<CartLine> = decode(response)?;
        debug!(lines = lines.len(), "fetched cart");
        Ok(lines)
    }

    async fn create(&self, line: NewCartLine) -> Result<CartLine, StoreError> {
        let response = self.client.post(CART_PATH).json(&line)?.send().await?;
        let created: CartLine = decode(response)?;
        debug!(line_id = %created.id, product_id = %created.product_id, "created cart line");
        Ok(created)
    }

    async fn update(&self, id: &LineId, line: CartLine) -> Result<CartLine, StoreError> {
        let response = self
            .client
            .put(line_path(id))
            .json(&line)?
            .send()
            .await?;
        decode(response).map_err(|e| line_error(id, e))
    }

    async fn delete(&self, id: &LineId) -> Result<(), StoreError> {
        let response = self.client.delete(line_path(id)).send().await?;
        response
            .error_for_status()
            .map(|_| ())
            .map_err(|e| line_error(id, e))
    }
}

/// [`ProductCatalog`] backed by `/products`.
#[derive(Debug, Clone)]
pub struct RestCatalog {
    client: FetchClient,
}

impl RestCatalog {
    pub fn new(client: FetchClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ProductCatalog for RestCatalog {
    async fn list_products(&self) -> Result<Vec<Product>, StoreError> {
        let response = self.client.get(PRODUCTS_PATH).send().await?;
        let products: Vec<Product> = decode(response)?;
        debug!(products = products.len(), "fetched products");
        Ok(products)
    }
}
