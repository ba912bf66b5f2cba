//! Catalog source trait and its HTTP implementation.

use async_trait::async_trait;

use super::model::Product;
use crate::error::CatalogError;

/// Source of the product list shown on Home.
#[async_trait]
pub trait Catalog: Send + Sync {
    async fn fetch_products(&self) -> Result<Vec<Product>, CatalogError>;
}

/// Fetches `GET <base>/products` as JSON.
pub struct HttpCatalog {
    base_url: String,
    client: reqwest::Client,
}

impl HttpCatalog {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            client: reqwest::Client::new(),
        }
    }

    fn products_url(&self) -> String {
        format!("{}/products", self.base_url.trim_end_matches('/'))
    }
}

#[async_trait]
impl Catalog for HttpCatalog {
    async fn fetch_products(&self) -> Result<Vec<Product>, CatalogError> {
        let url = self.products_url();
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| CatalogError::RequestFailed(format!("GET {url}: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(CatalogError::RequestFailed(format!("GET {url}: HTTP {status}")));
        }

        response
            .json::<Vec<Product>>()
            .await
            .map_err(|e| CatalogError::InvalidResponse(e.to_string()))
    }
}
