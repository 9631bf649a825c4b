use crate::models::{Product, Transaction};

/// Written in place of any catalog value that is absent.
pub const MISSING_VALUE: &str = "None";

/// Column order of the enriched table.
pub const ENRICHED_HEADERS: [&str; 12] = [
    "TransactionID",
    "Date",
    "ProductID",
    "ProductName",
    "Quantity",
    "UnitPrice",
    "CustomerID",
    "Region",
    "API_Category",
    "API_Brand",
    "API_Rating",
    "API_Match"
];

/// A valid transaction joined with whatever the catalog knows about its product.
#[derive(Debug, Clone, PartialEq)]
pub struct EnrichedTransaction {
    pub transaction: Transaction,
    pub api_category: Option<String>,
    pub api_brand: Option<String>,
    pub api_rating: Option<f64>,
    pub api_match: bool
}

impl EnrichedTransaction {
    pub fn matched(transaction: Transaction, product: &Product) -> Self {
        Self {
            transaction,
            api_category: product.category.clone(),
            api_brand: product.brand.clone(),
            api_rating: product.rating,
            api_match: true
        }
    }

    pub fn unmatched(transaction: Transaction) -> Self {
        Self {
            transaction,
            api_category: None,
            api_brand: None,
            api_rating: None,
            api_match: false
        }
    }

    /// Renders the row in [`ENRICHED_HEADERS`] order.
    pub fn to_record(&self) -> [String; 12] {
        let tx = &self.transaction;

        [
            tx.transaction_id.clone(),
            tx.date.clone(),
            tx.product_id.clone(),
            tx.product_name.clone(),
            tx.quantity.to_string(),
            tx.unit_price.to_string(),
            tx.customer_id.clone(),
            tx.region.clone(),
            text_or_missing(self.api_category.as_deref()),
            text_or_missing(self.api_brand.as_deref()),
            // Debug keeps the fraction on whole ratings (`4.0`, not `4`)
            self.api_rating.map_or_else(|| MISSING_VALUE.to_string(), |rating| format!("{rating:?}")),
            self.api_match.to_string()
        ]
    }
}

fn text_or_missing(value: Option<&str>) -> String {
    value.unwrap_or(MISSING_VALUE).to_string()
}
