mod sales_engine;

pub use sales_engine::{RunPaths, RunSummary, SalesEngine};
