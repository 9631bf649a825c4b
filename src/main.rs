mod catalog;
mod engine;
mod files;
mod models;
mod processing;
mod report;
mod types;

use std::io::{stderr, stdout, BufWriter, Write};
use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::Result;
use clap::Parser;
use rust_decimal::Decimal;
use tracing::info;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, Layer};

use crate::catalog::{HttpCatalog, ProductCatalog, StaticCatalog};
use crate::engine::{RunPaths, RunSummary, SalesEngine};
use crate::processing::Filters;
use crate::report::ReportOptions;

#[derive(Parser)]
#[command(name = "sales-analytics")]
#[command(about = "Validate, aggregate and enrich pipe-delimited sales records into a text report")]
struct Cli {
    /// Pipe-delimited sales file whose first line is a header
    input: PathBuf,

    #[arg(long, default_value = "data/enriched_sales_data.txt")]
    enriched_output: PathBuf,

    #[arg(long, default_value = "output/sales_report.txt")]
    report_output: PathBuf,

    /// Keep only transactions from this region
    #[arg(long)]
    region: Option<String>,

    /// Keep only transactions whose amount is at least this value
    #[arg(long)]
    min_amount: Option<Decimal>,

    /// Keep only transactions whose amount is at most this value
    #[arg(long)]
    max_amount: Option<Decimal>,

    /// Products listed in the top and low performance sections
    #[arg(long, default_value_t = 5)]
    top_n: usize,

    /// Rows shown in the customer and daily samples
    #[arg(long, default_value_t = 5)]
    sample_size: usize,

    #[arg(long, default_value = "₹")]
    currency_symbol: String,

    #[arg(long, default_value = HttpCatalog::DEFAULT_URL)]
    catalog_url: String,

    /// Catalog request timeout in seconds
    #[arg(long, default_value_t = 10)]
    catalog_timeout: u64,

    /// Skip the product catalog; every transaction is written unmatched
    #[arg(long)]
    offline: bool,

    /// error, warn, info, debug or trace
    #[arg(long, default_value = "warn")]
    log_level: String
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    setup_logging(parse_log_level(&cli.log_level));

    let timer = Instant::now();

    let summary = if cli.offline {
        run_with_catalog(StaticCatalog::default(), &cli).await?
    } else {
        let catalog = HttpCatalog::new(cli.catalog_url.clone(), Duration::from_secs(cli.catalog_timeout))?;
        run_with_catalog(catalog, &cli).await?
    };

    let duration = timer.elapsed();

    info!("Processed sales data in: {duration:?}");

    write_summary_to_stdout(&summary, &cli)?;

    Ok(())
}

async fn run_with_catalog<C: ProductCatalog>(catalog: C, cli: &Cli) -> Result<RunSummary> {
    let filters = Filters {
        region: cli.region.clone(),
        min_amount: cli.min_amount,
        max_amount: cli.max_amount
    };

    let report_options = ReportOptions {
        currency_symbol: cli.currency_symbol.clone(),
        sample_size: cli.sample_size
    };

    let paths = RunPaths {
        input: cli.input.clone(),
        enriched_output: cli.enriched_output.clone(),
        report_output: cli.report_output.clone()
    };

    SalesEngine::new(catalog)
        .with_filters(filters)
        .with_top_n(cli.top_n)
        .with_report_options(report_options)
        .run(&paths)
        .await
}

fn parse_log_level(level: &str) -> LevelFilter {
    match level.to_lowercase().as_str() {
        "trace" => LevelFilter::TRACE,
        "debug" => LevelFilter::DEBUG,
        "info" => LevelFilter::INFO,
        "warn" => LevelFilter::WARN,
        "error" => LevelFilter::ERROR,
        _ => {
            eprintln!("Invalid log level '{}', defaulting to 'warn'", level);
            LevelFilter::WARN
        }
    }
}

fn setup_logging(level: LevelFilter) {
    //NOTE: stdout only carries the run summary, logging goes to stderr
    let terminal_log = fmt::layer()
        .with_target(false)
        .with_writer(stderr)
        .with_filter(level);

    tracing_subscriber::registry()
        .with(terminal_log)
        .init();
}

fn write_summary_to_stdout(summary: &RunSummary, cli: &Cli) -> Result<()> {
    let mut output = BufWriter::new(stdout().lock());

    writeln!(output, "valid,invalid,rejected,filtered,matched,total_sales")?;
    writeln!(
        output,
        "{},{},{},{},{},{:.2}",
        summary.valid_count,
        summary.invalid_count,
        summary.rejected_count,
        summary.filtered_count,
        summary.matched_count,
        summary.total_sales.value()
    )?;
    writeln!(output, "enriched: {}", cli.enriched_output.display())?;
    writeln!(output, "report: {}", cli.report_output.display())?;

    output.flush()?;

    Ok(())
}
