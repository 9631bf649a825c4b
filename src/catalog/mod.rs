mod http_catalog;
mod mapping;

use std::future::Future;

use crate::models::Product;

pub use http_catalog::HttpCatalog;
pub use mapping::ProductMapping;

/// A source of product metadata.
///
/// Fetching never fails: an unavailable catalog yields no products and every
/// transaction is then enriched as unmatched.
pub trait ProductCatalog: Send + Sync + 'static {
    fn fetch_products(&self) -> impl Future<Output = Vec<Product>> + Send;
}

/// Serves a fixed product list. Empty when running offline.
#[derive(Debug, Clone, Default)]
pub struct StaticCatalog {
    products: Vec<Product>
}

#[cfg(test)]
impl StaticCatalog {
    pub fn new(products: Vec<Product>) -> Self {
        Self { products }
    }
}

impl ProductCatalog for StaticCatalog {
    async fn fetch_products(&self) -> Vec<Product> {
        self.products.clone()
    }
}
