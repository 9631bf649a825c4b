use std::cmp::Ordering;
use std::collections::HashSet;

use tracing::debug;

use crate::models::Transaction;
use crate::processing::errors::AggregationError;
use crate::processing::rollup::Rollup;
use crate::types::Monetary;

/// Per-customer purchase statistics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomerSummary {
    pub total_spent: Monetary,
    pub purchase_count: usize,
    pub avg_order_value: Monetary,
    pub unique_products: usize
}

/// The date with the highest revenue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PeakDay {
    pub date: String,
    pub revenue: Monetary
}

/// Every rollup computed over one valid transaction set.
#[derive(Debug, Clone, PartialEq)]
pub struct SalesSummary {
    pub total_sales: Monetary,
    pub by_region: Rollup<Monetary>,
    pub top_products: Vec<(String, Monetary)>,
    pub customers: Rollup<CustomerSummary>,
    pub daily: Rollup<Monetary>,
    pub peak_day: PeakDay,
    pub low_products: Vec<(String, Monetary)>
}

impl SalesSummary {
    /// Computes all rollups, ranking `product_count` products at each end.
    ///
    /// # Errors
    /// Returns `AggregationError` if:
    /// - `transactions` is empty.
    /// - Any revenue sum overflows.
    pub fn compute(transactions: &[Transaction], product_count: usize) -> Result<Self, AggregationError> {
        let peak_day = peak_sales_day(transactions)?;

        let summary = Self {
            total_sales: calculate_total_sales(transactions)?,
            by_region: sales_by_region(transactions)?,
            top_products: top_products_by_revenue(transactions, product_count)?,
            customers: customer_analysis(transactions)?,
            daily: daily_sales_trend(transactions)?,
            peak_day,
            low_products: low_performance_products(transactions, product_count)?
        };

        debug!(
            "Aggregated {} transactions across {} regions, {} customers and {} days",
            transactions.len(), summary.by_region.len(), summary.customers.len(), summary.daily.len()
        );

        Ok(summary)
    }
}

#[derive(Default)]
struct CustomerAccumulator {
    total_spent: Monetary,
    purchase_count: usize,
    products: HashSet<String>
}

const TOTAL_SALES: &str = "total sales";

pub fn calculate_total_sales(transactions: &[Transaction]) -> Result<Monetary, AggregationError> {
    Monetary::checked_sum(transactions.iter().map(Transaction::amount))
        .ok_or_else(|| AggregationError::overflow(TOTAL_SALES))
}

pub fn sales_by_region(transactions: &[Transaction]) -> Result<Rollup<Monetary>, AggregationError> {
    group_revenue(transactions, |tx| &tx.region)
}

/// Highest-revenue products first. Equal revenues keep first-seen order.
pub fn top_products_by_revenue(transactions: &[Transaction], count: usize) -> Result<Vec<(String, Monetary)>, AggregationError> {
    rank_products(transactions, count, |left, right| right.cmp(left))
}

/// Lowest-revenue products first. Equal revenues keep first-seen order.
pub fn low_performance_products(transactions: &[Transaction], count: usize) -> Result<Vec<(String, Monetary)>, AggregationError> {
    rank_products(transactions, count, |left, right| left.cmp(right))
}

pub fn customer_analysis(transactions: &[Transaction]) -> Result<Rollup<CustomerSummary>, AggregationError> {
    let mut customers: Rollup<CustomerAccumulator> = Rollup::new();

    for tx in transactions {
        let customer = customers.entry(&tx.customer_id);
        customer.total_spent = customer.total_spent.checked_add(tx.amount())
            .ok_or_else(|| AggregationError::overflow(&tx.customer_id))?;
        customer.purchase_count += 1;
        customer.products.insert(tx.product_name.clone());
    }

    Ok(customers.map_values(|customer| CustomerSummary {
        total_spent: customer.total_spent,
        purchase_count: customer.purchase_count,
        avg_order_value: customer.total_spent.average(customer.purchase_count).unwrap_or_default(),
        unique_products: customer.products.len()
    }))
}

pub fn daily_sales_trend(transactions: &[Transaction]) -> Result<Rollup<Monetary>, AggregationError> {
    group_revenue(transactions, |tx| &tx.date)
}

/// Finds the date with the highest revenue. On a tie the earliest-seen date wins.
///
/// # Errors
/// Returns `AggregationError` if `transactions` is empty or a daily sum overflows.
pub fn peak_sales_day(transactions: &[Transaction]) -> Result<PeakDay, AggregationError> {
    let daily = daily_sales_trend(transactions)?;
    let mut peak: Option<(&str, Monetary)> = None;

    for (date, revenue) in daily.iter() {
        match peak {
            Some((_, best)) if *revenue <= best => {}
            _ => peak = Some((date, *revenue))
        }
    }

    let (date, revenue) = peak.ok_or(AggregationError::NoData)?;

    Ok(PeakDay { date: date.to_string(), revenue })
}

fn group_revenue<'a>(
    transactions: &'a [Transaction],
    key: impl Fn(&'a Transaction) -> &'a str
) -> Result<Rollup<Monetary>, AggregationError> {
    let mut rollup = Rollup::new();

    for tx in transactions {
        let group = key(tx);
        let revenue: &mut Monetary = rollup.entry(group);

        *revenue = revenue.checked_add(tx.amount()).ok_or_else(|| AggregationError::overflow(group))?;
    }

    Ok(rollup)
}

fn rank_products(
    transactions: &[Transaction],
    count: usize,
    order: impl Fn(&Monetary, &Monetary) -> Ordering
) -> Result<Vec<(String, Monetary)>, AggregationError> {
    let mut products = group_revenue(transactions, |tx| &tx.product_name)?.into_entries();

    // sort_by is stable, so ties stay in first-seen order
    products.sort_by(|(_, left), (_, right)| order(left, right));
    products.truncate(count);

    Ok(products)
}
