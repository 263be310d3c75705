//! HTTP access to the GrocerEase storefront backend.
//!
//! [`FetchClient`] is a small builder-style wrapper over `reqwest` that
//! resolves paths against a base URL and buffers responses. The [`rest`]
//! module implements the storefront's [`CartStore`] and [`ProductCatalog`]
//! contracts against json-server style endpoints on top of it.
//!
//! # Example
//!
//! ```rust,ignore
//! use grocer_data::{RestCartStore, RestCatalog, FetchClient};
//! use grocer_commerce::storefront::Storefront;
//!
//! let client = FetchClient::new("http://localhost:5000")
//!     .with_timeout(Duration::from_secs(10));
//!
//! let shop = Storefront::new(RestCatalog::new(client.clone()), RestCartStore::new(client));
//! let view = shop.load().await?;
//! ```
//!
//! [`CartStore`]: grocer_commerce::cart::CartStore
//! [`ProductCatalog`]: grocer_commerce::catalog::ProductCatalog

mod error;
mod request;
mod response;
pub mod rest;

use std::time::Duration;

use tracing::debug;

pub use error::FetchError;
pub use request::{Method, RequestBuilder};
pub use response::Response;
pub use rest::{RestCartStore, RestCatalog};

/// Default per-request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// HTTP client bound to one backend.
///
/// Cloning is cheap; clones share the underlying connection pool.
#[derive(Debug, Clone)]
pub struct FetchClient {
    http: reqwest::Client,
    base_url: String,
    default_headers: Vec<(String, String)>,
    timeout: Duration,
}

impl FetchClient {
    /// Create a client for `base_url` (e.g. `http://localhost:5000`).
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            default_headers: vec![("Accept".to_string(), "application/json".to_string())],
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Set the per-request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Add a header that will be included in all requests.
    pub fn with_default_header(
        mut self,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        self.default_headers.push((key.into(), value.into()));
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn get(&self, path: impl AsRef<str>) -> ClientRequestBuilder<'_> {
        self.request(Method::Get, path)
    }

    pub fn post(&self, path: impl AsRef<str>) -> ClientRequestBuilder<'_> {
        self.request(Method::Post, path)
    }

    pub fn put(&self, path: impl AsRef<str>) -> ClientRequestBuilder<'_> {
        self.request(Method::Put, path)
    }

    pub fn delete(&self, path: impl AsRef<str>) -> ClientRequestBuilder<'_> {
        self.request(Method::Delete, path)
    }

    /// Create a request. Absolute URLs are used as-is; anything else is
    /// appended to the base URL.
    pub fn request(&self, method: Method, path: impl AsRef<str>) -> ClientRequestBuilder<'_> {
        let path = path.as_ref();
        let url = if path.starts_with("http://") || path.starts_with("https://") {
            path.to_string()
        } else if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        };

        let mut builder = RequestBuilder::new(method, url);
        for (key, value) in &self.default_headers {
            builder = builder.header(key.clone(), value.clone());
        }

        ClientRequestBuilder {
            client: self,
            builder,
        }
    }
}

/// A request builder bound to a client.
pub struct ClientRequestBuilder<'a> {
    client: &'a FetchClient,
    builder: RequestBuilder,
}

impl ClientRequestBuilder<'_> {
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.builder = self.builder.header(key, value);
        self
    }

    /// Set the request body as JSON.
    pub fn json<T: serde::Serialize + ?Sized>(mut self, value: &T) -> Result<Self, FetchError> {
        self.builder = self.builder.json(value)?;
        Ok(self)
    }

    /// Send the request and buffer the response. Non-2xx statuses are
    /// returned as a normal [`Response`]; see [`Response::error_for_status`].
    pub async fn send(self) -> Result<Response, FetchError> {
        let RequestBuilder {
            method,
            url,
            headers,
            body,
        } = self.builder;

        debug!(method = method.as_str(), %url, "sending request");
        let mut request = self
            .client
            .http
            .request(method.into(), &url)
            .timeout(self.client.timeout);
        for (key, value) in &headers {
            request = request.header(key.as_str(), value.as_str());
        }
        if let Some(body) = body {
            request = request.body(body);
        }

        let response = Response::read(request.send().await?).await?;
        debug!(method = method.as_str(), %url, status = response.status, "received response");
        Ok(response)
    }
}

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{FetchClient, FetchError, Method, Response, RestCartStore, RestCatalog};
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_relative_paths_join_base_url() {
        let client = FetchClient::new("http://localhost:5000/");
        assert_eq!(client.base_url(), "http://localhost:5000");
        assert_eq!(client.get("/cart").builder.url(), "http://localhost:5000/cart");
        assert_eq!(client.get("products").builder.url(), "http://localhost:5000/products");
    }

    #[test]
    fn test_absolute_url_is_kept() {
        let client = FetchClient::new("http://localhost:5000");
        let req = client.delete("https://other.example/cart/3");
        assert_eq!(req.builder.url(), "https://other.example/cart/3");
        assert_eq!(req.builder.method(), Method::Delete);
    }

    #[test]
    fn test_default_headers_are_applied() {
        let client = FetchClient::new("http://localhost:5000")
            .with_default_header("X-Client", "grocer")
            .with_timeout(Duration::from_secs(2));
        let req = client.put("/cart/1");
        assert!(req.builder.headers.iter().any(|(k, v)| k == "X-Client" && v == "grocer"));
        assert!(req.builder.headers.iter().any(|(k, _)| k == "Accept"));
        assert_eq!(client.timeout(), Duration::from_secs(2));
    }
}
