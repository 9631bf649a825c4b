use std::fmt;
use std::fmt::{Display, Formatter};

use rust_decimal::Decimal;

use crate::models::{InvalidReason, Transaction};

/// Optional business filters applied after validation.
///
/// An absent bound is `None`; `Some(0)` is a real bound.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Filters {
    pub region: Option<String>,
    pub min_amount: Option<Decimal>,
    pub max_amount: Option<Decimal>
}

impl Filters {
    pub fn matches(&self, transaction: &Transaction) -> bool {
        if let Some(region) = &self.region {
            if transaction.region != *region {
                return false;
            }
        }

        let amount = transaction.amount().value();

        if self.min_amount.is_some_and(|min_amount| amount < min_amount) {
            return false;
        }

        if self.max_amount.is_some_and(|max_amount| amount > max_amount) {
            return false;
        }

        true
    }
}

/// The filters that were applied together with the resulting counts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterSummary {
    pub region: Option<String>,
    pub min_amount: Option<Decimal>,
    pub max_amount: Option<Decimal>,
    pub total_valid: usize,
    pub total_invalid: usize,
    pub total_filtered: usize
}

impl Display for FilterSummary {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        let region = self.region.as_deref().unwrap_or("any");
        let min_amount = self.min_amount.map_or_else(|| "none".to_string(), |amount| amount.to_string());
        let max_amount = self.max_amount.map_or_else(|| "none".to_string(), |amount| amount.to_string());

        write!(
            formatter,
            "region={region} min_amount={min_amount} max_amount={max_amount}: {} valid, {} invalid, {} filtered",
            self.total_valid, self.total_invalid, self.total_filtered
        )
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ValidationOutcome {
    pub valid_transactions: Vec<Transaction>,
    /// Records that failed business validation. Filtered records are never counted here.
    pub invalid_count: usize,
    pub invalid: Vec<InvalidReason>,
    pub filtered_count: usize,
    pub filter_summary: FilterSummary
}

/// Checks a transaction against the business rules, reporting the first one it breaks.
///
/// # Errors
/// Returns `InvalidReason` if:
/// - The transaction id does not start with `T`.
/// - The product id does not start with `P`.
/// - The quantity or unit price is not positive.
/// - The customer or region is empty.
pub fn validate(transaction: &Transaction) -> Result<(), InvalidReason> {
    if !transaction.transaction_id.starts_with('T') {
        return Err(InvalidReason::transaction_id_prefix(transaction))
    }

    if !transaction.product_id.starts_with('P') {
        return Err(InvalidReason::product_id_prefix(transaction))
    }

    if transaction.quantity <= 0 {
        return Err(InvalidReason::non_positive_quantity(transaction))
    }

    if transaction.unit_price <= Decimal::ZERO {
        return Err(InvalidReason::non_positive_unit_price(transaction))
    }

    if transaction.customer_id.is_empty() {
        return Err(InvalidReason::missing_customer(transaction))
    }

    if transaction.region.is_empty() {
        return Err(InvalidReason::missing_region(transaction))
    }

    Ok(())
}

/// Splits parsed transactions into the valid set, the invalid reasons and a filtered count.
pub fn validate_and_filter(transactions: Vec<Transaction>, filters: &Filters) -> ValidationOutcome {
    let mut valid_transactions = Vec::with_capacity(transactions.len());
    let mut invalid = Vec::new();
    let mut filtered_count = 0;

    for transaction in transactions {
        if let Err(reason) = validate(&transaction) {
            invalid.push(reason);
            continue;
        }

        if !filters.matches(&transaction) {
            filtered_count += 1;
            continue;
        }

        valid_transactions.push(transaction);
    }

    let filter_summary = FilterSummary {
        region: filters.region.clone(),
        min_amount: filters.min_amount,
        max_amount: filters.max_amount,
        total_valid: valid_transactions.len(),
        total_invalid: invalid.len(),
        total_filtered: filtered_count
    };

    ValidationOutcome {
        valid_transactions,
        invalid_count: invalid.len(),
        invalid,
        filtered_count,
        filter_summary
    }
}
