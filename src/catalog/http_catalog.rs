use std::time::Duration;

use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;
use tracing::{info, warn};

use crate::catalog::ProductCatalog;
use crate::models::Product;

/// Products stay raw so one malformed entry cannot fail the whole page.
#[derive(Debug, Deserialize)]
struct CatalogPage {
    #[serde(default)]
    products: Vec<Value>
}

impl CatalogPage {
    fn into_products(self) -> Vec<Product> {
        self.products.into_iter()
            .enumerate()
            .filter_map(|(index, raw)| match serde_json::from_value::<Product>(raw) {
                Ok(product) => Some(product),
                Err(error) => {
                    warn!("Skipping catalog product at index [{index}]: {error}");
                    None
                }
            })
            .collect()
    }
}

/// Product catalog served over HTTP as `{ "products": [...] }`.
pub struct HttpCatalog {
    client: Client,
    url: String
}

impl HttpCatalog {
    pub const DEFAULT_URL: &'static str = "https://dummyjson.com/products?limit=100";

    pub fn new(url: impl Into<String>, timeout: Duration) -> reqwest::Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()?;

        Ok(Self {
            client,
            url: url.into()
        })
    }

    async fn request_products(&self) -> reqwest::Result<Vec<Product>> {
        let page: CatalogPage = self.client.get(&self.url)
            .send().await?
            .error_for_status()?
            .json().await?;

        Ok(page.into_products())
    }
}

impl ProductCatalog for HttpCatalog {
    async fn fetch_products(&self) -> Vec<Product> {
        match self.request_products().await {
            Ok(products) => {
                info!("Fetched {} products from [{}]", products.len(), self.url);
                products
            }
            Err(error) => {
                warn!("Error fetching products from [{}]: {error}", self.url);
                Vec::new()
            }
        }
    }
}
