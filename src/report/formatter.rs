use std::io::{self, Write};

use chrono::{DateTime, Local};

use crate::processing::SalesSummary;
use crate::types::Monetary;

const TITLE_RULE: &str = "============================================================";
const SECTION_RULE: &str = "------------------------------------------------------------";

/// Presentation settings for the text report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportOptions {
    /// Prefixed to every amount.
    pub currency_symbol: String,
    /// Rows shown in the customer and daily samples.
    pub sample_size: usize
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            currency_symbol: "₹".to_string(),
            sample_size: 5
        }
    }
}

/// Everything the report shows about one run.
#[derive(Debug, Clone)]
pub struct SalesReport {
    pub generated_at: DateTime<Local>,
    pub valid_count: usize,
    pub invalid_count: usize,
    pub rejected_count: usize,
    pub summary: SalesSummary
}

/// Renders `report` as fixed sections of plain text.
pub fn write_report<W: Write>(output: &mut W, report: &SalesReport, options: &ReportOptions) -> io::Result<()> {
    let summary = &report.summary;
    let money = |amount: &Monetary| format!("{}{}", options.currency_symbol, amount);

    writeln!(output, "SALES ANALYTICS REPORT")?;
    writeln!(output, "{TITLE_RULE}")?;
    writeln!(output, "Generated on: {}", report.generated_at.format("%Y-%m-%d %H:%M:%S"))?;
    writeln!(output, "Valid Transactions: {}", report.valid_count)?;
    writeln!(output, "Invalid Transactions: {}", report.invalid_count)?;
    writeln!(output, "Rejected Lines: {}", report.rejected_count)?;
    writeln!(output)?;

    write_section_header(output, "OVERALL SALES SUMMARY")?;
    writeln!(output, "Total Sales Revenue: {}", money(&summary.total_sales))?;
    writeln!(output)?;

    write_section_header(output, "SALES BY REGION")?;
    for (region, amount) in summary.by_region.iter() {
        writeln!(output, "{region:<10} : {}", money(amount))?;
    }
    writeln!(output)?;

    write_section_header(output, "TOP PRODUCTS BY REVENUE")?;
    for (product, revenue) in &summary.top_products {
        writeln!(output, "{product:<30} {}", money(revenue))?;
    }
    writeln!(output)?;

    write_section_header(output, "CUSTOMER SUMMARY (Sample)")?;
    for (customer_id, customer) in summary.customers.head(options.sample_size) {
        writeln!(
            output,
            "{customer_id} | Total: {} | Orders: {} | Avg Order: {} | Unique Products: {}",
            money(&customer.total_spent),
            customer.purchase_count,
            money(&customer.avg_order_value),
            customer.unique_products
        )?;
    }
    writeln!(output)?;

    write_section_header(output, "DAILY SALES TREND (Sample)")?;
    for (date, amount) in summary.daily.head(options.sample_size) {
        writeln!(output, "{date} : {}", money(amount))?;
    }
    writeln!(output)?;

    writeln!(output, "PEAK SALES DAY: {} ({})", summary.peak_day.date, money(&summary.peak_day.revenue))?;
    writeln!(output)?;

    write_section_header(output, "LOW PERFORMANCE PRODUCTS")?;
    for (product, revenue) in &summary.low_products {
        writeln!(output, "{product:<30} {}", money(revenue))?;
    }

    Ok(())
}

fn write_section_header<W: Write>(output: &mut W, title: &str) -> io::Result<()> {
    writeln!(output, "{title}")?;
    writeln!(output, "{SECTION_RULE}")
}
