use super::*;
use super::aggregator::{
    calculate_total_sales, customer_analysis, daily_sales_trend, low_performance_products, peak_sales_day,
    sales_by_region, top_products_by_revenue, PeakDay
};
use super::errors::AggregationError;
use super::parser::{parse_line, FIELD_COUNT};
use super::rollup::Rollup;
use super::validator::validate;

use std::str::FromStr;

use anyhow::Result;
use rust_decimal::Decimal;

use crate::models::{InvalidReason, ParseRejection, Transaction};
use crate::types::Monetary;

fn create_transaction(transaction_id: &str, date: &str, product: &str, quantity: i64, unit_price: &str, customer_id: &str, region: &str) -> Result<Transaction> {
    Ok(Transaction {
        transaction_id: transaction_id.to_string(),
        date: date.to_string(),
        product_id: "P1".to_string(),
        product_name: product.to_string(),
        quantity,
        unit_price: Decimal::from_str(unit_price)?,
        customer_id: customer_id.to_string(),
        region: region.to_string()
    })
}

fn monetary(value: &str) -> Result<Monetary> {
    Ok(Monetary::from(Decimal::from_str(value)?))
}

fn sample_transactions() -> Result<Vec<Transaction>> {
    Ok(vec![
        create_transaction("T1", "2024-12-01", "Laptop", 2, "45000", "C1", "North")?,
        create_transaction("T2", "2024-12-01", "Mouse", 5, "500", "C2", "South")?,
        create_transaction("T3", "2024-12-02", "Keyboard", 3, "1500", "C1", "North")?,
        create_transaction("T4", "2024-12-02", "Laptop", 1, "45000", "C3", "East")?,
        create_transaction("T5", "2024-12-03", "Monitor", 2, "12000", "C4", "West")?,
        create_transaction("T6", "2024-12-04", "Cable", 10, "150.50", "C1", "South")?,
    ])
}

#[test]
fn test_parse_line_strips_commas_and_converts_numbers() -> Result<()> {
    let transaction = parse_line("T1|2024-01-01|P5|Widget,Pro|2|10.50|C1|North")?;

    assert_eq!(transaction.transaction_id, "T1");
    assert_eq!(transaction.product_name, "WidgetPro");
    assert_eq!(transaction.quantity, 2);
    assert_eq!(transaction.unit_price, Decimal::from_str("10.5")?);
    assert_eq!(transaction.amount(), monetary("21.0")?);

    Ok(())
}

#[test]
fn test_parse_line_strips_thousands_separators_from_numbers() -> Result<()> {
    let transaction = parse_line("T1|2024-01-01|P5|Laptop|1,200|45,000.75|C1|North")?;

    assert_eq!(transaction.quantity, 1200);
    assert_eq!(transaction.unit_price, Decimal::from_str("45000.75")?);

    Ok(())
}

#[test]
fn test_parse_line_rejects_wrong_field_count() {
    assert_eq!(
        parse_line("T1|2024-01-01|P5|Widget|2|10.50|C1"),
        Err(ParseRejection::FieldCount { expected: FIELD_COUNT, found: 7 })
    );
    assert_eq!(
        parse_line("T1|2024-01-01|P5|Widget|2|10.50|C1|North|extra"),
        Err(ParseRejection::FieldCount { expected: FIELD_COUNT, found: 9 })
    );
}

#[test]
fn test_parse_line_rejects_unparseable_numbers() {
    assert_eq!(
        parse_line("T1|2024-01-01|P5|Widget|two|10.50|C1|North"),
        Err(ParseRejection::InvalidQuantity("two".to_string()))
    );
    assert_eq!(
        parse_line("T1|2024-01-01|P5|Widget|2.5|10.50|C1|North"),
        Err(ParseRejection::InvalidQuantity("2.5".to_string()))
    );
    assert_eq!(
        parse_line("T1|2024-01-01|P5|Widget|2|ten|C1|North"),
        Err(ParseRejection::InvalidUnitPrice("ten".to_string()))
    );
}

#[test]
fn test_parse_line_rejects_overflowing_amount() {
    let line = format!("T1|2024-01-01|P5|Widget|{}|{}|C1|North", i64::MAX, Decimal::MAX);

    assert!(matches!(parse_line(&line), Err(ParseRejection::AmountOverflow { .. })));
}

#[test]
fn test_parse_transactions_tags_every_rejected_line() {
    let lines = vec![
        "T1|2024-01-01|P5|Widget|2|10.50|C1|North",
        "garbage",
        "T2|2024-01-01|P5|Widget|x|10.50|C1|North",
        "T3|2024-01-02|P6|Gadget|1|3|C2|South",
    ];

    let outcome = parse_transactions(&lines);

    assert_eq!(outcome.transactions.len(), 2);
    assert_eq!(outcome.transactions[1].transaction_id, "T3");
    assert_eq!(outcome.rejected_count(), 2);
    assert_eq!(outcome.rejections[0].line_number, 2);
    assert_eq!(outcome.rejections[1].line_number, 3);
}

#[test]
fn test_rejections_and_filter_summary_render_for_logs() -> Result<()> {
    let lines = vec!["T1|2024-01-01|P5|Widget|x|10|C1|North"];
    let outcome = parse_transactions(&lines);

    assert_eq!(outcome.rejections[0].to_string(), "Rejected line [1]: Quantity [x] is not an integer");

    let filters = Filters { region: Some("North".to_string()), min_amount: Some(Decimal::ZERO), max_amount: None };
    let validation = validate_and_filter(sample_transactions()?, &filters);

    assert_eq!(
        validation.filter_summary.to_string(),
        "region=North min_amount=0 max_amount=none: 2 valid, 0 invalid, 4 filtered"
    );

    Ok(())
}

#[test]
fn test_validation_rejects_zero_quantity_and_counts_it() -> Result<()> {
    let transactions = vec![
        create_transaction("T1", "2024-01-01", "Widget", 0, "10", "C1", "North")?,
        create_transaction("T2", "2024-01-01", "Widget", 1, "10", "C1", "North")?,
    ];

    let outcome = validate_and_filter(transactions, &Filters::default());

    assert_eq!(outcome.invalid_count, 1);
    assert_eq!(outcome.valid_transactions.len(), 1);
    assert!(matches!(outcome.invalid[0], InvalidReason::NonPositiveQuantity { quantity: 0, .. }));

    Ok(())
}

#[test]
fn test_validation_reports_first_broken_rule() -> Result<()> {
    let mut transaction = create_transaction("X1", "2024-01-01", "Widget", 0, "0", "", "")?;
    transaction.product_id = "Z1".to_string();

    assert!(matches!(validate(&transaction), Err(InvalidReason::TransactionIdPrefix { .. })));

    transaction.transaction_id = "T1".to_string();
    assert!(matches!(validate(&transaction), Err(InvalidReason::ProductIdPrefix { .. })));

    transaction.product_id = "P1".to_string();
    assert!(matches!(validate(&transaction), Err(InvalidReason::NonPositiveQuantity { .. })));

    transaction.quantity = 1;
    assert!(matches!(validate(&transaction), Err(InvalidReason::NonPositiveUnitPrice { .. })));

    transaction.unit_price = Decimal::ONE;
    assert!(matches!(validate(&transaction), Err(InvalidReason::MissingCustomer { .. })));

    transaction.customer_id = "C1".to_string();
    assert!(matches!(validate(&transaction), Err(InvalidReason::MissingRegion { .. })));

    transaction.region = "North".to_string();
    assert!(validate(&transaction).is_ok());

    Ok(())
}

#[test]
fn test_region_filter_without_matches_does_not_count_as_invalid() -> Result<()> {
    let transactions = vec![
        create_transaction("T1", "2024-01-01", "Widget", 1, "10", "C1", "South")?,
        create_transaction("T2", "2024-01-01", "Widget", -1, "10", "C1", "South")?,
    ];
    let filters = Filters { region: Some("North".to_string()), ..Filters::default() };

    let outcome = validate_and_filter(transactions, &filters);

    assert!(outcome.valid_transactions.is_empty());
    assert_eq!(outcome.invalid_count, 1);
    assert_eq!(outcome.filtered_count, 1);
    assert_eq!(outcome.filter_summary.region.as_deref(), Some("North"));
    assert_eq!(outcome.filter_summary.total_invalid, 1);
    assert_eq!(outcome.filter_summary.total_filtered, 1);

    Ok(())
}

#[test]
fn test_amount_bounds_are_inclusive_and_zero_is_a_real_bound() -> Result<()> {
    let transactions = sample_transactions()?;

    let bounded = Filters { min_amount: Some(Decimal::from(4500)), max_amount: Some(Decimal::from(24000)), ..Filters::default() };
    let outcome = validate_and_filter(transactions.clone(), &bounded);
    let ids: Vec<&str> = outcome.valid_transactions.iter().map(|tx| tx.transaction_id.as_str()).collect();

    assert_eq!(ids, vec!["T3", "T5"]);
    assert_eq!(outcome.filtered_count, 4);

    let zero_max = Filters { max_amount: Some(Decimal::ZERO), ..Filters::default() };
    let outcome = validate_and_filter(transactions, &zero_max);

    assert!(outcome.valid_transactions.is_empty());
    assert_eq!(outcome.filter_summary.max_amount, Some(Decimal::ZERO));

    Ok(())
}

#[test]
fn test_total_sales_of_empty_set_is_zero() {
    assert_eq!(calculate_total_sales(&[]), Ok(Monetary::new()));
}

#[test]
fn test_region_totals_partition_total_sales() -> Result<()> {
    let transactions = sample_transactions()?;
    let regions = sales_by_region(&transactions)?;
    let region_total = Monetary::checked_sum(regions.values().copied());

    assert_eq!(region_total, Some(calculate_total_sales(&transactions)?));

    let order: Vec<&str> = regions.iter().map(|(region, _)| region).collect();
    assert_eq!(order, vec!["North", "South", "East", "West"]);
    assert_eq!(regions.get("South"), Some(&monetary("4005")?));

    Ok(())
}

#[test]
fn test_top_products_cover_total_when_n_exceeds_distinct_products() -> Result<()> {
    let transactions = sample_transactions()?;
    let products = top_products_by_revenue(&transactions, 100)?;
    let product_total = Monetary::checked_sum(products.iter().map(|(_, revenue)| *revenue));

    assert_eq!(products.len(), 5);
    assert_eq!(product_total, Some(calculate_total_sales(&transactions)?));

    Ok(())
}

#[test]
fn test_top_and_bottom_rankings_mirror_each_other_without_ties() -> Result<()> {
    let transactions = sample_transactions()?;
    let mut top = top_products_by_revenue(&transactions, 5)?;
    let bottom = low_performance_products(&transactions, 5)?;

    assert_eq!(top[0], ("Laptop".to_string(), monetary("135000")?));
    assert_eq!(bottom[0], ("Cable".to_string(), monetary("1505")?));

    top.reverse();
    assert_eq!(top, bottom);

    Ok(())
}

#[test]
fn test_product_ties_keep_first_seen_order() -> Result<()> {
    let transactions = vec![
        create_transaction("T1", "2024-01-01", "Beta", 1, "10", "C1", "North")?,
        create_transaction("T2", "2024-01-01", "Alpha", 1, "10", "C1", "North")?,
        create_transaction("T3", "2024-01-01", "Gamma", 1, "20", "C1", "North")?,
    ];

    let top: Vec<String> = top_products_by_revenue(&transactions, 3)?.into_iter().map(|(name, _)| name).collect();
    let bottom: Vec<String> = low_performance_products(&transactions, 2)?.into_iter().map(|(name, _)| name).collect();

    assert_eq!(top, vec!["Gamma", "Beta", "Alpha"]);
    assert_eq!(bottom, vec!["Beta", "Alpha"]);

    Ok(())
}

#[test]
fn test_customer_analysis_tracks_orders_and_unique_products() -> Result<()> {
    let transactions = sample_transactions()?;
    let customers = customer_analysis(&transactions)?;

    let first = customers.get("C1").ok_or_else(|| anyhow::anyhow!("Customer C1 missing"))?;

    assert_eq!(first.total_spent, monetary("96005")?);
    assert_eq!(first.purchase_count, 3);
    assert_eq!(first.unique_products, 3);
    assert_eq!(first.avg_order_value.to_string(), "32,001.67");

    for (_, customer) in customers.iter() {
        let reconstructed = customer.avg_order_value.value() * Decimal::from(customer.purchase_count);
        let difference = (reconstructed - customer.total_spent.value()).abs();

        assert!(difference < Decimal::from_str("0.0001")?);
    }

    Ok(())
}

#[test]
fn test_customer_repeat_product_counts_once() -> Result<()> {
    let transactions = vec![
        create_transaction("T1", "2024-01-01", "Widget", 1, "10", "C1", "North")?,
        create_transaction("T2", "2024-01-02", "Widget", 3, "10", "C1", "North")?,
    ];

    let customers = customer_analysis(&transactions)?;
    let customer = customers.get("C1").ok_or_else(|| anyhow::anyhow!("Customer C1 missing"))?;

    assert_eq!(customer.purchase_count, 2);
    assert_eq!(customer.unique_products, 1);
    assert_eq!(customer.avg_order_value, monetary("20")?);

    Ok(())
}

#[test]
fn test_daily_trend_and_peak_day() -> Result<()> {
    let transactions = sample_transactions()?;
    let daily = daily_sales_trend(&transactions)?;

    assert_eq!(daily.len(), 4);
    assert_eq!(daily.head(2)[1], ("2024-12-02".to_string(), monetary("49500")?));

    let peak = peak_sales_day(&transactions)?;

    assert_eq!(peak, PeakDay { date: "2024-12-01".to_string(), revenue: monetary("92500")? });

    Ok(())
}

#[test]
fn test_peak_day_tie_selects_first_seen_date() -> Result<()> {
    let transactions = vec![
        create_transaction("T1", "2024-01-02", "Widget", 1, "10", "C1", "North")?,
        create_transaction("T2", "2024-01-01", "Widget", 1, "10", "C1", "North")?,
    ];

    assert_eq!(peak_sales_day(&transactions)?.date, "2024-01-02");

    Ok(())
}

#[test]
fn test_peak_day_of_empty_set_is_an_error() {
    assert_eq!(peak_sales_day(&[]), Err(AggregationError::NoData));
    assert_eq!(SalesSummary::compute(&[], 5), Err(AggregationError::NoData));
}

#[test]
fn test_sales_summary_collects_every_rollup() -> Result<()> {
    let transactions = sample_transactions()?;
    let summary = SalesSummary::compute(&transactions, 2)?;

    assert_eq!(summary.total_sales, monetary("167505")?);
    assert_eq!(summary.by_region.len(), 4);
    assert_eq!(summary.top_products.len(), 2);
    assert_eq!(summary.low_products.len(), 2);
    assert_eq!(summary.customers.len(), 4);
    assert_eq!(summary.peak_day.date, "2024-12-01");

    Ok(())
}

#[test]
fn test_overflowing_revenue_is_an_error_not_a_wrong_total() -> Result<()> {
    let max_price = Decimal::MAX.to_string();
    let transactions = vec![
        create_transaction("T1", "2024-01-01", "Widget", 1, &max_price, "C1", "North")?,
        create_transaction("T2", "2024-01-02", "Gadget", 1, &max_price, "C2", "North")?,
    ];

    assert_eq!(calculate_total_sales(&transactions), Err(AggregationError::overflow("total sales")));
    assert_eq!(sales_by_region(&transactions).map(|regions| regions.len()), Err(AggregationError::overflow("North")));
    assert!(daily_sales_trend(&transactions).is_ok());
    assert!(customer_analysis(&transactions).is_ok());
    assert!(matches!(SalesSummary::compute(&transactions, 5), Err(AggregationError::Overflow(_))));

    Ok(())
}

#[test]
fn test_rollup_head_never_exceeds_length() {
    let mut rollup: Rollup<u32> = Rollup::new();
    *rollup.entry("b") += 1;
    *rollup.entry("a") += 2;
    *rollup.entry("b") += 3;

    assert_eq!(rollup.head(5), &[("b".to_string(), 4), ("a".to_string(), 2)]);
    assert_eq!(rollup.head(1).len(), 1);
    assert!(rollup.head(0).is_empty());
}
