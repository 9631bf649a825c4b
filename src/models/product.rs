use serde::Deserialize;

use crate::types::ProductKey;

/// Product metadata served by the remote catalog.
///
/// Only `id` is required; the catalog omits fields for some products.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Product {
    pub id: ProductKey,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub brand: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub rating: Option<f64>
}
