mod errors;
mod reader;
mod writer;

pub use reader::read_sales_data;
pub use writer::{write_enriched, write_text};
