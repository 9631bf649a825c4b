use rust_decimal::Decimal;
use thiserror::Error;

use crate::models::Transaction;

/// Why a raw line never became a [`Transaction`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseRejection {
    #[error("Expected {expected} fields but found {found}")]
    FieldCount {
        expected: usize,
        found: usize
    },
    #[error("Quantity [{0}] is not an integer")]
    InvalidQuantity(String),
    #[error("Unit price [{0}] is not a decimal")]
    InvalidUnitPrice(String),
    #[error("Amount for quantity [{quantity}] at unit price [{unit_price}] overflows")]
    AmountOverflow {
        quantity: i64,
        unit_price: Decimal
    }
}

/// Why a parsed [`Transaction`] failed business validation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidReason {
    #[error("Transaction [{transaction_id}] does not start with 'T'")]
    TransactionIdPrefix {
        transaction_id: String
    },
    #[error("Product [{product_id}] of transaction [{transaction_id}] does not start with 'P'")]
    ProductIdPrefix {
        transaction_id: String,
        product_id: String
    },
    #[error("Quantity [{quantity}] must be positive for transaction [{transaction_id}]")]
    NonPositiveQuantity {
        transaction_id: String,
        quantity: i64
    },
    #[error("Unit price [{unit_price}] must be positive for transaction [{transaction_id}]")]
    NonPositiveUnitPrice {
        transaction_id: String,
        unit_price: Decimal
    },
    #[error("Customer is missing for transaction [{transaction_id}]")]
    MissingCustomer {
        transaction_id: String
    },
    #[error("Region is missing for transaction [{transaction_id}]")]
    MissingRegion {
        transaction_id: String
    }
}

impl InvalidReason {
    pub fn transaction_id_prefix(tx: &Transaction) -> Self {
        Self::TransactionIdPrefix { transaction_id: tx.transaction_id.clone() }
    }

    pub fn product_id_prefix(tx: &Transaction) -> Self {
        Self::ProductIdPrefix {
            transaction_id: tx.transaction_id.clone(),
            product_id: tx.product_id.clone()
        }
    }

    pub fn non_positive_quantity(tx: &Transaction) -> Self {
        Self::NonPositiveQuantity {
            transaction_id: tx.transaction_id.clone(),
            quantity: tx.quantity
        }
    }

    pub fn non_positive_unit_price(tx: &Transaction) -> Self {
        Self::NonPositiveUnitPrice {
            transaction_id: tx.transaction_id.clone(),
            unit_price: tx.unit_price
        }
    }

    pub fn missing_customer(tx: &Transaction) -> Self {
        Self::MissingCustomer { transaction_id: tx.transaction_id.clone() }
    }

    pub fn missing_region(tx: &Transaction) -> Self {
        Self::MissingRegion { transaction_id: tx.transaction_id.clone() }
    }
}
