use std::collections::BTreeMap;

use serde::Deserialize;

use super::config::SimpleQueryConfig;

/// Named report definitions, built once at startup
#[derive(Debug, Default, Deserialize)]
pub struct ReportRegistry {
    #[serde(default)]
    pub reports: BTreeMap<String, SimpleQueryConfig>,
}

impl ReportRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a report, replacing any existing one with the same name
    pub fn with_report(mut self, name: impl Into<String>, config: SimpleQueryConfig) -> Self {
        self.reports.insert(name.into(), config);
        self
    }

    /// Get a report by name
    pub fn get(&self, name: &str) -> Option<&SimpleQueryConfig> {
        self.reports.get(name)
    }

    /// Report names in sorted order
    pub fn names(&self) -> Vec<&str> {
        self.reports.keys().map(String::as_str).collect()
    }

    pub fn len(&self) -> usize {
        self.reports.len()
    }

    pub fn is_empty(&self) -> bool {
        self.reports.is_empty()
    }
}
