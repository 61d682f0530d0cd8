//! HTTP implementation of the inventory client.
//!
//! Talks to the inventory service's REST API:
//!
//! - `GET {base_url}/stock/{id}` - current stock level
//! - `GET {base_url}/products/{id}` - product details

use async_trait::async_trait;
use guava_core::{Product, ProductId, StockLevel};
use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use secrecy::ExposeSecret;
use serde::de::DeserializeOwned;
use tracing::instrument;

use crate::config::InventoryConfig;
use crate::inventory::{InventoryClient, InventoryError};

/// Inventory service client over HTTP.
#[derive(Clone)]
pub struct HttpInventoryClient {
    client: reqwest::Client,
    base_url: String,
}

impl HttpInventoryClient {
    /// Create a new inventory client.
    ///
    /// # Errors
    ///
    /// Returns error if the API token is not a valid header value or the
    /// HTTP client fails to build.
    pub fn new(config: &InventoryConfig) -> Result<Self, InventoryError> {
        let mut headers = HeaderMap::new();

        if let Some(token) = &config.api_token {
            let auth_value = format!("Bearer {}", token.expose_secret());
            let mut value = HeaderValue::from_str(&auth_value)
                .map_err(|e| InventoryError::Parse(format!("Invalid API token format: {e}")))?;
            value.set_sensitive(true);
            headers.insert(AUTHORIZATION, value);
        }

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{path}", self.base_url)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, InventoryError> {
        let response = self.client.get(self.endpoint(path)).send().await?;
        let status = response.status();

        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(InventoryError::Api {
                status: status.as_u16(),
                message,
            });
        }

        response
            .json()
            .await
            .map_err(|e| InventoryError::Parse(e.to_string()))
    }
}

#[async_trait]
impl InventoryClient for HttpInventoryClient {
    #[instrument(skip(self), fields(product_id = %product_id))]
    async fn stock_level(&self, product_id: ProductId) -> Result<StockLevel, InventoryError> {
        match self.get_json(&format!("stock/{product_id}")).await {
            Err(InventoryError::Api { status: 404, .. }) => {
                Err(InventoryError::NotFound(product_id))
            }
            other => other,
        }
    }

    #[instrument(skip(self), fields(product_id = %product_id))]
    async fn product(&self, product_id: ProductId) -> Result<Product, InventoryError> {
        match self.get_json(&format!("products/{product_id}")).await {
            Err(InventoryError::Api { status: 404, .. }) => {
                Err(InventoryError::NotFound(product_id))
            }
            other => other,
        }
    }
}
