//! Report parser (verb module)
//!
//! Transforms YAML files into a [`ReportRegistry`].

use std::path::Path;
use crate::error::ParseError;
use crate::report::ReportRegistry;

/// Parse report definitions from a YAML file
pub fn parse_file<P: AsRef<Path>>(path: P) -> Result<ReportRegistry, ParseError> {
    let path = path.as_ref();
    let contents = std::fs::read_to_string(path).map_err(|source| ParseError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_str(&contents)
}

/// Parse report definitions from a YAML string
pub fn parse_str(yaml: &str) -> Result<ReportRegistry, ParseError> {
    let registry: ReportRegistry = serde_yaml::from_str(yaml)?;
    for (name, config) in &registry.reports {
        if config.table.trim().is_empty() {
            return Err(ParseError::Invalid {
                report: name.clone(),
                reason: "table must not be empty".to_string(),
            });
        }
    }
    tracing::debug!(reports = registry.len(), "loaded report definitions");
    Ok(registry)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_fixture() {
        let registry = parse_file("tests/test_data/reports.yaml").unwrap();

        assert_eq!(registry.names(), vec!["browser_breakdown", "page_views", "top_pages"]);

        let views = registry.get("page_views").unwrap();
        assert_eq!(views.table, "events");
        assert_eq!(views.fields, vec!["count() AS views", "uniq(session_id) AS sessions"]);
        assert_eq!(views.where_clauses, vec!["event_name = 'page_view'"]);
        assert_eq!(views.effective_time_field(), "timestamp");
        assert!(views.allowed_filters.contains(&"country".to_string()));

        let top = registry.get("top_pages").unwrap();
        assert_eq!(top.group_by, vec!["path"]);
        assert_eq!(top.order_by.as_deref(), Some("views DESC"));
        assert_eq!(top.limit, Some(10));
        assert_eq!(top.effective_time_field(), "created_at");
    }

    #[test]
    fn test_parse_inline() {
        let yaml = r#"
reports:
  errors:
    table: error_events
    fields: [message, "count() AS n"]
    allowedFilters: [release]
    groupBy: [message]
"#;
        let registry = parse_str(yaml).unwrap();
        let errors = registry.get("errors").unwrap();
        assert_eq!(errors.table, "error_events");
        assert_eq!(errors.allowed_filters, vec!["release"]);
        assert!(errors.order_by.is_none());
    }

    #[test]
    fn test_parse_invalid_yaml() {
        let result = parse_str("not: [valid: yaml");
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_empty_table() {
        let yaml = "reports:\n  broken:\n    table: \"\"\n";
        let err = parse_str(yaml).unwrap_err();
        assert!(matches!(err, ParseError::Invalid { ref report, .. } if report == "broken"));
    }

    #[test]
    fn test_parse_missing_file() {
        let err = parse_file("tests/test_data/does_not_exist.yaml").unwrap_err();
        match err {
            ParseError::Io { path, .. } => assert!(path.ends_with("does_not_exist.yaml")),
            other => panic!("expected io error, got {}", other),
        }
    }
}
