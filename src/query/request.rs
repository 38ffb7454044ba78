use serde::{Deserialize, Serialize};

use super::time::QueryTime;

/// Comparison applied by a [`Filter`]
///
/// The SQL spelling of each operator is fixed; see [`FilterOperator::as_sql`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FilterOperator {
    Equals,
    NotEquals,
    Like,
    NotLike,
    In,
    NotIn,
    Gt,
    Gte,
    Lt,
    Lte,
}

impl FilterOperator {
    pub fn as_sql(&self) -> &'static str {
        match self {
            FilterOperator::Equals => "=",
            FilterOperator::NotEquals => "!=",
            FilterOperator::Like => "LIKE",
            FilterOperator::NotLike => "NOT LIKE",
            FilterOperator::In => "IN",
            FilterOperator::NotIn => "NOT IN",
            FilterOperator::Gt => ">",
            FilterOperator::Gte => ">=",
            FilterOperator::Lt => "<",
            FilterOperator::Lte => "<=",
        }
    }

    /// Operators whose right-hand side is a set of values
    pub fn is_set(&self) -> bool {
        matches!(self, FilterOperator::In | FilterOperator::NotIn)
    }

    /// Operators that match by substring
    pub fn is_pattern(&self) -> bool {
        matches!(self, FilterOperator::Like | FilterOperator::NotLike)
    }
}

/// Right-hand side of a filter: a single string or a list of strings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FilterValue {
    Single(String),
    Many(Vec<String>),
}

impl FilterValue {
    /// Coerce to a list, wrapping a single value
    pub fn to_vec(&self) -> Vec<String> {
        match self {
            FilterValue::Single(v) => vec![v.clone()],
            FilterValue::Many(vs) => vs.clone(),
        }
    }

    /// The scalar form; a list contributes its first element
    pub fn first(&self) -> &str {
        match self {
            FilterValue::Single(v) => v,
            FilterValue::Many(vs) => vs.first().map(String::as_str).unwrap_or(""),
        }
    }
}

impl From<&str> for FilterValue {
    fn from(v: &str) -> Self {
        FilterValue::Single(v.to_string())
    }
}

impl From<String> for FilterValue {
    fn from(v: String) -> Self {
        FilterValue::Single(v)
    }
}

impl From<Vec<String>> for FilterValue {
    fn from(vs: Vec<String>) -> Self {
        FilterValue::Many(vs)
    }
}

impl From<Vec<&str>> for FilterValue {
    fn from(vs: Vec<&str>) -> Self {
        FilterValue::Many(vs.into_iter().map(str::to_string).collect())
    }
}

/// A user-supplied predicate on one field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Filter {
    pub field: String,
    #[serde(alias = "operator")]
    pub op: FilterOperator,
    pub value: FilterValue,
}

impl Filter {
    pub fn new(field: impl Into<String>, op: FilterOperator, value: impl Into<FilterValue>) -> Self {
        Self {
            field: field.into(),
            op,
            value: value.into(),
        }
    }
}

/// Width of the time buckets a report is grouped into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Granularity {
    Minute,
    Hour,
    Day,
    Week,
    Month,
}

impl Granularity {
    /// ClickHouse function truncating a timestamp to the bucket start
    pub fn clickhouse_fn(&self) -> &'static str {
        match self {
            Granularity::Minute => "toStartOfMinute",
            Granularity::Hour => "toStartOfHour",
            Granularity::Day => "toStartOfDay",
            Granularity::Week => "toMonday",
            Granularity::Month => "toStartOfMonth",
        }
    }
}

/// Request body for a report query
///
/// Everything here is untrusted. Filters are checked against the report's
/// allow-list before any of them reach SQL, and grouping/ordering overrides
/// are only honoured when the report permits them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryRequest {
    /// Tenant scope; every compiled query is restricted to it
    pub project_id: String,
    pub from: QueryTime,
    pub to: QueryTime,
    #[serde(default)]
    pub filters: Vec<Filter>,
    #[serde(default)]
    pub granularity: Option<Granularity>,
    #[serde(default)]
    pub group_by: Option<Vec<String>>,
    #[serde(default)]
    pub order_by: Option<String>,
    #[serde(default)]
    pub limit: Option<u64>,
    #[serde(default)]
    pub offset: Option<u64>,
}

impl QueryRequest {
    pub fn new(project_id: impl Into<String>, from: QueryTime, to: QueryTime) -> Self {
        Self {
            project_id: project_id.into(),
            from,
            to,
            filters: Vec::new(),
            granularity: None,
            group_by: None,
            order_by: None,
            limit: None,
            offset: None,
        }
    }

    pub fn with_filter(mut self, filter: Filter) -> Self {
        self.filters.push(filter);
        self
    }

    pub fn with_granularity(mut self, granularity: Granularity) -> Self {
        self.granularity = Some(granularity);
        self
    }

    pub fn with_group_by(mut self, columns: Vec<String>) -> Self {
        self.group_by = Some(columns);
        self
    }

    pub fn with_order_by(mut self, order_by: impl Into<String>) -> Self {
        self.order_by = Some(order_by.into());
        self
    }

    pub fn with_limit(mut self, limit: u64) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn with_offset(mut self, offset: u64) -> Self {
        self.offset = Some(offset);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_request() {
        let json = r#"{
            "projectId": "p1",
            "from": "2024-01-01",
            "to": "2024-01-31T12:00:00Z",
            "filters": [
                {"field": "browser_name", "op": "equals", "value": "Chrome"},
                {"field": "country", "operator": "in", "value": ["DE", "FR"]}
            ],
            "granularity": "day",
            "groupBy": ["country"],
            "orderBy": "country DESC",
            "limit": 10
        }"#;

        let request: QueryRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.project_id, "p1");
        assert_eq!(request.filters.len(), 2);
        assert_eq!(request.filters[0].op, FilterOperator::Equals);
        assert_eq!(request.filters[1].op, FilterOperator::In);
        assert_eq!(request.filters[1].value, FilterValue::from(vec!["DE", "FR"]));
        assert_eq!(request.granularity, Some(Granularity::Day));
        assert_eq!(request.group_by, Some(vec!["country".to_string()]));
        assert_eq!(request.limit, Some(10));
        assert_eq!(request.offset, None);
    }

    #[test]
    fn test_missing_project_is_rejected() {
        let json = r#"{"from": "2024-01-01", "to": "2024-01-31"}"#;
        assert!(serde_json::from_str::<QueryRequest>(json).is_err());
    }

    #[test]
    fn test_unknown_operator_is_rejected() {
        let json = r#"{"field": "x", "op": "regex", "value": "a"}"#;
        assert!(serde_json::from_str::<Filter>(json).is_err());
    }

    #[test]
    fn test_filter_value_coercion() {
        assert_eq!(FilterValue::from("a").to_vec(), vec!["a".to_string()]);
        assert_eq!(FilterValue::from(vec!["a", "b"]).first(), "a");
        assert_eq!(FilterValue::Many(vec![]).first(), "");
    }

    #[test]
    fn test_operator_table() {
        assert_eq!(FilterOperator::Equals.as_sql(), "=");
        assert_eq!(FilterOperator::Like.as_sql(), "LIKE");
        assert_eq!(FilterOperator::In.as_sql(), "IN");
        assert_eq!(FilterOperator::NotIn.as_sql(), "NOT IN");
        assert!(FilterOperator::NotIn.is_set());
        assert!(!FilterOperator::Equals.is_set());
    }
}
