mod enriched;
mod errors;
mod product;
mod transaction;

pub use enriched::{ENRICHED_HEADERS, EnrichedTransaction};
pub use errors::{InvalidReason, ParseRejection};
pub use product::Product;
pub use transaction::Transaction;
