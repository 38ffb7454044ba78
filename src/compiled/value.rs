use chrono::{DateTime, Utc};
use serde::{Serialize, Serializer};

/// ClickHouse text form of a `DateTime64(3)` value
pub(crate) const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.3f";

/// A value bound to a placeholder
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParamValue {
    String(String),
    Array(Vec<String>),
    DateTime(DateTime<Utc>),
}

impl ParamValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            ParamValue::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[String]> {
        match self {
            ParamValue::Array(vs) => Some(vs),
            _ => None,
        }
    }
}

impl From<&str> for ParamValue {
    fn from(v: &str) -> Self {
        ParamValue::String(v.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(v: String) -> Self {
        ParamValue::String(v)
    }
}

impl From<Vec<String>> for ParamValue {
    fn from(vs: Vec<String>) -> Self {
        ParamValue::Array(vs)
    }
}

impl From<DateTime<Utc>> for ParamValue {
    fn from(t: DateTime<Utc>) -> Self {
        ParamValue::DateTime(t)
    }
}

// Serialized in the shape the ClickHouse client expects for query parameters.
impl Serialize for ParamValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            ParamValue::String(s) => serializer.serialize_str(s),
            ParamValue::Array(vs) => vs.serialize(serializer),
            ParamValue::DateTime(t) => {
                serializer.serialize_str(&t.format(DATETIME_FORMAT).to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_serialize_values() {
        let t = Utc.with_ymd_and_hms(2024, 1, 31, 23, 59, 59).unwrap();
        assert_eq!(serde_json::to_string(&ParamValue::DateTime(t)).unwrap(), "\"2024-01-31 23:59:59.000\"");
        assert_eq!(
            serde_json::to_string(&ParamValue::from(vec!["a".to_string(), "b".to_string()])).unwrap(),
            "[\"a\",\"b\"]"
        );
        assert_eq!(serde_json::to_string(&ParamValue::from("x")).unwrap(), "\"x\"");
    }
}
