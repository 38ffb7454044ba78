//! reportsql - Compile analytics report requests into parameterized SQL
//!
//! This library provides:
//! - Report definition types (SimpleQueryConfig, ReportRegistry)
//! - Report parsing from YAML
//! - Query request types with filters, time window and granularity
//! - Filter compilation with bound parameters
//! - Query assembly against a ClickHouse-style columnar store
//! - Execution through the ClickHouse client
//!
//! # Architecture
//!
//! **Noun modules** (data structures):
//! - `report/` - trusted per-report configuration (SimpleQueryConfig, ReportRegistry)
//! - `query/` - untrusted request types (QueryRequest, Filter, QueryTime)
//! - `compiled/` - compiler output (CompiledQuery, ParamValue)
//!
//! **Verb modules** (transformations):
//! - `parser/` - YAML → ReportRegistry
//! - `binder/` - parameter name → placeholder (`{name:Type}` for ClickHouse)
//! - `compiler/` - Filter → predicate + bound parameter
//! - `assembler/` - SimpleQueryConfig + QueryRequest → CompiledQuery
//! - `executor/` - CompiledQuery → rows
//!
//! Request values never appear in the SQL string. Filters are checked against
//! the report's allow-list before they are compiled, and every query is
//! restricted to the request's project and time window.
//!
//! # Example
//!
//! ```ignore
//! use reportsql::{parser, assemble, QueryRequest};
//!
//! let registry = parser::parse_file("reports.yaml")?;
//! let config = registry.get("page_views").unwrap();
//! let request: QueryRequest = serde_json::from_str(body)?;
//! let compiled = assemble(config, &request);
//! let rows = executor.execute(&compiled).await?;
//! ```

pub mod report;
pub mod query;
pub mod compiled;
pub mod binder;
pub mod compiler;
pub mod assembler;
pub mod executor;
pub mod parser;
pub mod error;

// Re-export commonly used types
pub use report::{ReportRegistry, SimpleQueryConfig};
pub use query::{Filter, FilterOperator, FilterValue, Granularity, QueryRequest, QueryTime};
pub use compiled::{CompiledQuery, ParamValue, Params, Row};
pub use binder::{ClickHouseBinder, ParamBinder};
pub use compiler::{compile_filter, FilterFragment};
pub use assembler::{assemble, assemble_with, QueryAssembler};
pub use executor::{run_report, ClickHouseConfig, ClickHouseExecutor, ExecuteError, Executor};
pub use error::ParseError;
