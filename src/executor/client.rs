use async_trait::async_trait;
use clickhouse::Client;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};

use crate::compiled::{CompiledQuery, Row};
use super::error::ExecuteError;
use super::Executor;

const DEFAULT_URL: &str = "http://localhost:8123";

/// Connection settings for the ClickHouse HTTP interface
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClickHouseConfig {
    pub url: String,
    pub database: Option<String>,
    pub user: Option<String>,
    pub password: Option<String>,
}

impl Default for ClickHouseConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_URL.to_string(),
            database: None,
            user: None,
            password: None,
        }
    }
}

impl ClickHouseConfig {
    /// Read `CLICKHOUSE_URL`, `CLICKHOUSE_DATABASE`, `CLICKHOUSE_USER` and
    /// `CLICKHOUSE_PASSWORD`; unset variables keep their defaults
    pub fn from_env() -> Self {
        let var = |name: &str| std::env::var(name).ok().filter(|v| !v.is_empty());
        Self {
            url: var("CLICKHOUSE_URL").unwrap_or_else(|| DEFAULT_URL.to_string()),
            database: var("CLICKHOUSE_DATABASE"),
            user: var("CLICKHOUSE_USER"),
            password: var("CLICKHOUSE_PASSWORD"),
        }
    }

    pub fn client(&self) -> Client {
        let mut client = Client::default().with_url(&self.url);
        if let Some(database) = &self.database {
            client = client.with_database(database);
        }
        if let Some(user) = &self.user {
            client = client.with_user(user);
        }
        if let Some(password) = &self.password {
            client = client.with_password(password);
        }
        client
    }
}

/// Runs compiled queries through the ClickHouse HTTP client
///
/// Pooling and request lifecycle belong to the client; this adds nothing on
/// top (no retries, no caching).
#[derive(Clone)]
pub struct ClickHouseExecutor {
    client: Client,
}

impl ClickHouseExecutor {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    pub fn from_config(config: &ClickHouseConfig) -> Self {
        Self::new(config.client())
    }
}

#[async_trait]
impl Executor for ClickHouseExecutor {
    async fn execute(&self, query: &CompiledQuery) -> Result<Vec<Row>, ExecuteError> {
        let mut request = self.client.query(&query.sql);
        for (name, value) in &query.params {
            request = request.param(name, value);
        }

        let response = request.fetch_bytes("JSONEachRow").map_err(|e| {
            tracing::error!(error = %e, "failed to start report query");
            ExecuteError::Client(e)
        })?;

        let rows = decode_rows(response).await?;
        tracing::debug!(rows = rows.len(), "report query finished");
        Ok(rows)
    }
}

/// Decode a `JSONEachRow` response, one object per line
async fn decode_rows<R: AsyncBufRead + Unpin>(reader: R) -> Result<Vec<Row>, ExecuteError> {
    let mut lines = reader.lines();
    let mut rows = Vec::new();
    while let Some(line) = lines.next_line().await.map_err(|e| {
        tracing::error!(error = %e, "failed to read report query response");
        ExecuteError::Io(e)
    })? {
        if line.trim().is_empty() {
            continue;
        }
        let row: Row = serde_json::from_str(&line)
            .map_err(|source| ExecuteError::Decode { line: line.clone(), source })?;
        rows.push(row);
    }
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ClickHouseConfig::default();
        assert_eq!(config.url, "http://localhost:8123");
        assert!(config.database.is_none());
        assert!(config.user.is_none());
    }

    #[tokio::test]
    async fn test_decode_rows_skips_blank_lines() {
        let body = b"{\"browser_name\":\"Chrome\",\"views\":42}\n\n  \n{\"browser_name\":\"Safari\",\"views\":7}\n";

        let rows = decode_rows(&body[..]).await.unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0]["browser_name"], serde_json::json!("Chrome"));
        assert_eq!(rows[1]["views"], serde_json::json!(7));
    }

    #[tokio::test]
    async fn test_decode_rows_empty_response() {
        let rows = decode_rows(&b""[..]).await.unwrap();
        assert!(rows.is_empty());
    }

    #[tokio::test]
    async fn test_decode_rows_reports_bad_line() {
        let body = b"{\"views\":1}\nCode: 60. DB::Exception: Table default.events doesn't exist\n";

        let err = decode_rows(&body[..]).await.unwrap_err();

        match err {
            ExecuteError::Decode { line, .. } => assert!(line.starts_with("Code: 60.")),
            other => panic!("expected decode error, got {}", other),
        }
    }

    #[tokio::test]
    async fn test_decode_rows_rejects_non_object_row() {
        let err = decode_rows(&b"[1, 2, 3]\n"[..]).await.unwrap_err();
        assert!(matches!(err, ExecuteError::Decode { ref line, .. } if line == "[1, 2, 3]"));
    }
}
