//! Executor errors

use std::fmt;

/// Errors raised while running a compiled query
///
/// Failures from the store are passed through as-is; nothing is retried.
#[derive(Debug)]
pub enum ExecuteError {
    /// The ClickHouse client rejected or failed the query
    Client(clickhouse::error::Error),
    /// Reading the response stream failed
    Io(std::io::Error),
    /// A response line was not a JSON object
    Decode {
        line: String,
        source: serde_json::Error,
    },
}

impl fmt::Display for ExecuteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExecuteError::Client(err) => write!(f, "Query failed: {}", err),
            ExecuteError::Io(err) => write!(f, "Failed to read query response: {}", err),
            ExecuteError::Decode { line, source } => {
                write!(f, "Invalid row '{}': {}", line, source)
            }
        }
    }
}

impl std::error::Error for ExecuteError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ExecuteError::Client(err) => Some(err),
            ExecuteError::Io(err) => Some(err),
            ExecuteError::Decode { source, .. } => Some(source),
        }
    }
}

impl From<clickhouse::error::Error> for ExecuteError {
    fn from(err: clickhouse::error::Error) -> Self {
        ExecuteError::Client(err)
    }
}

impl From<std::io::Error> for ExecuteError {
    fn from(err: std::io::Error) -> Self {
        ExecuteError::Io(err)
    }
}
