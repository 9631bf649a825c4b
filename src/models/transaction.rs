use rust_decimal::Decimal;

use crate::types::{Monetary, ProductKey};

/// Represents a single structurally sound row from the sales file.
///
/// A `Transaction` only exists when all eight fields were present and both numeric
/// fields parsed. It carries no business guarantees: prefixes, positivity and
/// non-empty identifiers are checked separately by the validator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transaction {
    /// Transaction identifier, expected to start with `T`.
    pub transaction_id: String,
    /// Calendar day token, kept as written.
    pub date: String,
    /// Product identifier, expected to start with `P` followed by the catalog key.
    pub product_id: String,
    /// Product display name with commas removed.
    pub product_name: String,
    pub quantity: i64,
    pub unit_price: Decimal,
    pub customer_id: String,
    pub region: String
}

impl Transaction {
    /// Revenue for this row (`quantity * unit_price`).
    ///
    /// Rows built by the parser are guaranteed not to overflow here.
    pub fn amount(&self) -> Monetary {
        Monetary::from(Decimal::from(self.quantity) * self.unit_price)
    }

    /// Catalog key encoded after the single-character prefix of `product_id`.
    pub fn product_key(&self) -> Option<ProductKey> {
        self.product_id.get(1..)?.parse().ok()
    }
}
