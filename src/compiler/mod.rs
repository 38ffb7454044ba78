//! Filter compiler (verb module)
//!
//! Turns a single [`Filter`](crate::query::Filter) into a parameterized
//! predicate. Authorization against a report's allow-list happens in the
//! assembler, before this is called.

mod filter;

pub use filter::{compile_filter, param_name, FilterFragment};
