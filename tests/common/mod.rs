//! Shared test utilities for integration tests

#![allow(dead_code)]

use reportsql::{parser, QueryRequest, ReportRegistry, SimpleQueryConfig};

/// Load a report registry from the tests/test_data directory
pub fn load_fixture(name: &str) -> ReportRegistry {
    let path = format!("tests/test_data/{}", name);
    parser::parse_file(&path)
        .unwrap_or_else(|e| panic!("Failed to load test data {}: {}", name, e))
}

/// Get a single report from the shared fixture
pub fn report(name: &str) -> SimpleQueryConfig {
    load_fixture("reports.yaml")
        .get(name)
        .cloned()
        .unwrap_or_else(|| panic!("Report '{}' not in fixture", name))
}

/// Parse a request from JSON, panicking with context on failure
pub fn request_json(json: &str) -> QueryRequest {
    serde_json::from_str(json).unwrap_or_else(|e| panic!("Invalid request {}: {}", json, e))
}

/// A January 2024 request for project p1 with no filters
pub fn january_request() -> QueryRequest {
    request_json(r#"{"projectId": "p1", "from": "2024-01-01", "to": "2024-01-31"}"#)
}
