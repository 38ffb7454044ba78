//! Report definitions (noun module)
//!
//! A report fixes the table, SELECT list and allow-lists a query may use.

mod config;
mod registry;

pub use config::{SimpleQueryConfig, DEFAULT_BUCKET_ALIAS, DEFAULT_PROJECT_FIELD, DEFAULT_TIME_FIELD};
pub use registry::ReportRegistry;
