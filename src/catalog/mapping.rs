use std::collections::HashMap;

use tracing::{debug, info};

use crate::models::{EnrichedTransaction, Product, Transaction};
use crate::types::ProductKey;

/// Catalog products indexed by their numeric key.
#[derive(Debug, Clone, Default)]
pub struct ProductMapping {
    products: HashMap<ProductKey, Product>
}

impl ProductMapping {
    /// Later products replace earlier ones with the same id.
    pub fn from_products(products: Vec<Product>) -> Self {
        let products = products.into_iter()
            .map(|product| (product.id, product))
            .collect();

        Self { products }
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    pub fn get(&self, key: ProductKey) -> Option<&Product> {
        self.products.get(&key)
    }

    /// Joins each transaction with its catalog product. A product id without a numeric
    /// key is treated as a miss.
    pub fn enrich(&self, transactions: &[Transaction]) -> Vec<EnrichedTransaction> {
        let enriched: Vec<EnrichedTransaction> = transactions.iter()
            .map(|tx| match tx.product_key().and_then(|key| self.get(key)) {
                Some(product) => {
                    debug!(
                        "Matched [{}] to catalog product [{}]",
                        tx.product_id, product.title.as_deref().unwrap_or("untitled")
                    );
                    EnrichedTransaction::matched(tx.clone(), product)
                }
                None => {
                    debug!("No catalog product for [{}] in transaction [{}]", tx.product_id, tx.transaction_id);
                    EnrichedTransaction::unmatched(tx.clone())
                }
            })
            .collect();

        info!(
            "Matched {} of {} transactions against {} catalog products",
            enriched.iter().filter(|record| record.api_match).count(), enriched.len(), self.len()
        );

        enriched
    }
}
