//! Query execution (verb module)
//!
//! Submits a [`CompiledQuery`] to the columnar store and returns raw rows.

mod client;
mod error;

use async_trait::async_trait;

use crate::assembler::assemble;
use crate::compiled::{CompiledQuery, Row};
use crate::query::QueryRequest;
use crate::report::SimpleQueryConfig;

pub use client::{ClickHouseConfig, ClickHouseExecutor};
pub use error::ExecuteError;

/// Something that can run a compiled query
#[async_trait]
pub trait Executor: Send + Sync {
    async fn execute(&self, query: &CompiledQuery) -> Result<Vec<Row>, ExecuteError>;
}

/// Compile a request against a report and execute it
pub async fn run_report<E: Executor + ?Sized>(
    executor: &E,
    config: &SimpleQueryConfig,
    request: &QueryRequest,
) -> Result<Vec<Row>, ExecuteError> {
    let query = assemble(config, request);
    executor.execute(&query).await
}
