//! Per-report query configuration

use serde::Deserialize;

/// Column compared against the request window when none is configured
pub const DEFAULT_TIME_FIELD: &str = "timestamp";
/// Tenant column when none is configured
pub const DEFAULT_PROJECT_FIELD: &str = "project_id";
/// Alias of the time-bucket column when none is configured
pub const DEFAULT_BUCKET_ALIAS: &str = "bucket";

/// Trusted, hand-authored definition of one report
///
/// Identifiers in here are written into SQL verbatim, so a config must never
/// be built from request data. Construct it in code with the builder methods
/// or load it from YAML at startup (see [`crate::parser`]).
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimpleQueryConfig {
    /// Source table
    pub table: String,
    /// SELECT list
    #[serde(default)]
    pub fields: Vec<String>,
    /// Static predicates always applied
    #[serde(default, rename = "where")]
    pub where_clauses: Vec<String>,
    /// Fields a request filter may reference
    #[serde(default)]
    pub allowed_filters: Vec<String>,
    /// Columns a request may group by; defaults to `allowed_filters` plus `group_by`
    #[serde(default)]
    pub allowed_group_by: Option<Vec<String>>,
    /// Columns a request may order by; defaults to the selected and grouped columns
    #[serde(default)]
    pub allowed_order_by: Option<Vec<String>>,
    #[serde(default)]
    pub time_field: Option<String>,
    #[serde(default)]
    pub project_field: Option<String>,
    #[serde(default)]
    pub bucket_alias: Option<String>,
    #[serde(default)]
    pub group_by: Vec<String>,
    #[serde(default)]
    pub order_by: Option<String>,
    #[serde(default)]
    pub limit: Option<u64>,
}

impl SimpleQueryConfig {
    pub fn new(table: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            fields: Vec::new(),
            where_clauses: Vec::new(),
            allowed_filters: Vec::new(),
            allowed_group_by: None,
            allowed_order_by: None,
            time_field: None,
            project_field: None,
            bucket_alias: None,
            group_by: Vec::new(),
            order_by: None,
            limit: None,
        }
    }

    pub fn fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.fields = fields.into_iter().map(Into::into).collect();
        self
    }

    pub fn where_clause(mut self, predicate: impl Into<String>) -> Self {
        self.where_clauses.push(predicate.into());
        self
    }

    pub fn allowed_filters<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.allowed_filters = fields.into_iter().map(Into::into).collect();
        self
    }

    pub fn allowed_group_by<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.allowed_group_by = Some(columns.into_iter().map(Into::into).collect());
        self
    }

    pub fn allowed_order_by<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.allowed_order_by = Some(columns.into_iter().map(Into::into).collect());
        self
    }

    pub fn time_field(mut self, column: impl Into<String>) -> Self {
        self.time_field = Some(column.into());
        self
    }

    pub fn project_field(mut self, column: impl Into<String>) -> Self {
        self.project_field = Some(column.into());
        self
    }

    pub fn bucket_alias(mut self, alias: impl Into<String>) -> Self {
        self.bucket_alias = Some(alias.into());
        self
    }

    pub fn group_by<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.group_by = columns.into_iter().map(Into::into).collect();
        self
    }

    pub fn order_by(mut self, order_by: impl Into<String>) -> Self {
        self.order_by = Some(order_by.into());
        self
    }

    pub fn limit(mut self, limit: u64) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn effective_time_field(&self) -> &str {
        self.time_field.as_deref().unwrap_or(DEFAULT_TIME_FIELD)
    }

    pub fn effective_project_field(&self) -> &str {
        self.project_field.as_deref().unwrap_or(DEFAULT_PROJECT_FIELD)
    }

    pub fn effective_bucket_alias(&self) -> &str {
        self.bucket_alias.as_deref().unwrap_or(DEFAULT_BUCKET_ALIAS)
    }

    /// Check a column against the group-by allow-list
    pub fn allows_group_by(&self, column: &str) -> bool {
        match &self.allowed_group_by {
            Some(allowed) => allowed.iter().any(|c| c == column),
            None => {
                self.allowed_filters.iter().any(|c| c == column)
                    || self.group_by.iter().any(|c| c == column)
            }
        }
    }
}
