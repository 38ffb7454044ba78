//! Query request types (noun module)

mod request;
mod time;

pub use request::{Filter, FilterOperator, FilterValue, Granularity, QueryRequest};
pub use time::{InvalidTime, QueryTime};
