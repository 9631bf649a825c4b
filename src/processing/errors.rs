use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AggregationError {
    #[error("No valid transactions to aggregate")]
    NoData,

    #[error("Revenue for [{0}] exceeds the representable range")]
    Overflow(String)
}

impl AggregationError {
    pub fn overflow(group: &str) -> Self {
        AggregationError::Overflow(group.to_string())
    }
}
