//! Compiled query types (noun module)
//!
//! The output of the assembler: a SQL string containing only trusted
//! identifiers and placeholders, plus the values bound to those placeholders.

mod value;

use std::collections::BTreeMap;

use serde::Serialize;

pub use value::ParamValue;

/// Bound parameters, keyed by placeholder name
///
/// Ordered so that compiling the same input twice yields identical output.
pub type Params = BTreeMap<String, ParamValue>;

/// A row returned by the columnar store
pub type Row = serde_json::Map<String, serde_json::Value>;

/// SQL plus its bound parameters
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompiledQuery {
    pub sql: String,
    pub params: Params,
}

impl CompiledQuery {
    pub fn new(sql: String, params: Params) -> Self {
        Self { sql, params }
    }

    pub fn param(&self, name: &str) -> Option<&ParamValue> {
        self.params.get(name)
    }
}
