mod aggregator;
mod errors;
mod parser;
mod rollup;
#[cfg(test)]
mod tests;
mod validator;

pub use aggregator::SalesSummary;
pub use parser::parse_transactions;
pub use validator::{validate_and_filter, Filters};
