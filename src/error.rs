//! Report loading errors

use std::fmt;
use std::path::PathBuf;

/// Why a set of report definitions could not be loaded
#[derive(Debug)]
pub enum ParseError {
    /// The report file could not be read
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    /// Not YAML, or not shaped like a report registry
    Yaml(serde_yaml::Error),
    /// A report that can never produce a query
    Invalid {
        report: String,
        reason: String,
    },
}

impl ParseError {
    /// Name of the offending report, when one can be singled out
    pub fn report(&self) -> Option<&str> {
        match self {
            ParseError::Invalid { report, .. } => Some(report),
            _ => None,
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::Io { path, source } => {
                write!(f, "cannot read report file {}: {}", path.display(), source)
            }
            ParseError::Yaml(err) => write!(f, "malformed report definitions: {}", err),
            ParseError::Invalid { report, reason } => {
                write!(f, "report '{}' is unusable: {}", report, reason)
            }
        }
    }
}

impl std::error::Error for ParseError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ParseError::Io { source, .. } => Some(source),
            ParseError::Yaml(err) => Some(err),
            ParseError::Invalid { .. } => None,
        }
    }
}

impl From<serde_yaml::Error> for ParseError {
    fn from(err: serde_yaml::Error) -> Self {
        ParseError::Yaml(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn test_io_error_names_the_file() {
        let err = ParseError::Io {
            path: PathBuf::from("config/reports.yaml"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "no such file"),
        };
        assert_eq!(err.to_string(), "cannot read report file config/reports.yaml: no such file");
        assert!(err.source().is_some());
        assert!(err.report().is_none());
    }

    #[test]
    fn test_invalid_report() {
        let err = ParseError::Invalid {
            report: "page_views".to_string(),
            reason: "table must not be empty".to_string(),
        };
        assert_eq!(err.to_string(), "report 'page_views' is unusable: table must not be empty");
        assert_eq!(err.report(), Some("page_views"));
        assert!(err.source().is_none());
    }

    #[test]
    fn test_yaml_error_keeps_source() {
        let yaml_err = serde_yaml::from_str::<serde_yaml::Value>("reports: [").unwrap_err();
        let err = ParseError::from(yaml_err);
        assert!(err.to_string().starts_with("malformed report definitions: "));
        assert!(err.source().is_some());
    }
}
