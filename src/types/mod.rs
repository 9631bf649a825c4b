mod monetary;

pub use monetary::Monetary;

/// Numeric catalog key encoded in a product id (`P101` -> `101`).
pub type ProductKey = u64;
