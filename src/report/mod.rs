mod formatter;

pub use formatter::{write_report, ReportOptions, SalesReport};
