use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use chrono::Local;
use tokio::task::spawn_blocking;
use tracing::{debug, info, warn};

use crate::catalog::{ProductCatalog, ProductMapping};
use crate::files::{read_sales_data, write_enriched, write_text};
use crate::processing::{parse_transactions, validate_and_filter, Filters, SalesSummary};
use crate::report::{write_report, ReportOptions, SalesReport};
use crate::types::Monetary;

const DEFAULT_PRODUCT_COUNT: usize = 5;

/// Where a run reads its input and writes its outputs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunPaths {
    pub input: PathBuf,
    pub enriched_output: PathBuf,
    pub report_output: PathBuf
}

/// Counts and totals describing one completed run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub valid_count: usize,
    pub invalid_count: usize,
    pub rejected_count: usize,
    pub filtered_count: usize,
    pub matched_count: usize,
    pub total_sales: Monetary
}

/// Runs the sales pipeline end to end: read, parse, validate, aggregate, enrich, report.
pub struct SalesEngine<C: ProductCatalog> {
    catalog: C,
    filters: Filters,
    product_count: usize,
    report_options: ReportOptions
}

impl<C: ProductCatalog> SalesEngine<C> {
    pub fn new(catalog: C) -> Self {
        Self {
            catalog,
            filters: Filters::default(),
            product_count: DEFAULT_PRODUCT_COUNT,
            report_options: ReportOptions::default()
        }
    }

    pub fn with_filters(mut self, filters: Filters) -> Self {
        self.filters = filters;
        self
    }

    /// Number of products listed at each end of the revenue ranking.
    pub fn with_top_n(mut self, product_count: usize) -> Self {
        self.product_count = product_count;
        self
    }

    pub fn with_report_options(mut self, report_options: ReportOptions) -> Self {
        self.report_options = report_options;
        self
    }

    /// Orchestrates one run over the file at `paths.input`.
    ///
    /// Aggregation runs on a blocking task while the catalog is fetched. Nothing is
    /// written when the source is unreadable or no transaction survives validation.
    pub async fn run(&self, paths: &RunPaths) -> anyhow::Result<RunSummary> {
        let input = paths.input.clone();
        let lines = spawn_blocking(move || read_sales_data(&input)).await??;

        let parsed = parse_transactions(&lines);
        let rejected_count = parsed.rejected_count();

        let outcome = validate_and_filter(parsed.transactions, &self.filters);

        for reason in &outcome.invalid {
            debug!("Skipping invalid record: {reason}");
        }

        info!("Validation with {}", outcome.filter_summary);

        let valid = Arc::new(outcome.valid_transactions);

        let aggregation_input = Arc::clone(&valid);
        let product_count = self.product_count;

        let (aggregation, products) = tokio::join!(
            spawn_blocking(move || SalesSummary::compute(&aggregation_input, product_count)),
            self.catalog.fetch_products()
        );

        let summary = aggregation?
            .with_context(|| format!("Cannot build a report from [{}]", paths.input.display()))?;

        let mapping = ProductMapping::from_products(products);

        if mapping.is_empty() {
            warn!("Product catalog is empty, no transaction will be matched");
        }

        let enriched = mapping.enrich(&valid);
        let matched_count = enriched.iter().filter(|record| record.api_match).count();

        let enriched_output = paths.enriched_output.clone();
        spawn_blocking(move || write_enriched(&enriched_output, &enriched)).await??;

        let run_summary = RunSummary {
            valid_count: valid.len(),
            invalid_count: outcome.invalid_count,
            rejected_count,
            filtered_count: outcome.filtered_count,
            matched_count,
            total_sales: summary.total_sales
        };

        let report = SalesReport {
            generated_at: Local::now(),
            valid_count: run_summary.valid_count,
            invalid_count: run_summary.invalid_count,
            rejected_count,
            summary
        };

        let mut buffer = Vec::new();
        write_report(&mut buffer, &report, &self.report_options)?;

        let report_output = paths.report_output.clone();
        spawn_blocking(move || write_text(&report_output, &buffer)).await??;

        info!("Sales report generated: [{}]", paths.report_output.display());

        Ok(run_summary)
    }
}
