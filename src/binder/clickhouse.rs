use super::ParamBinder;

/// ClickHouse server-side parameters: `{name:Type}`
#[derive(Debug, Clone, Copy, Default)]
pub struct ClickHouseBinder;

impl ParamBinder for ClickHouseBinder {
    fn bind_string(&self, name: &str) -> String {
        format!("{{{}:String}}", name)
    }

    fn bind_array(&self, name: &str) -> String {
        format!("{{{}:Array(String)}}", name)
    }

    fn bind_datetime(&self, name: &str) -> String {
        format!("{{{}:DateTime64(3)}}", name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compiled::ParamValue;

    #[test]
    fn test_placeholders() {
        let b = ClickHouseBinder;
        assert_eq!(b.bind_string("projectId"), "{projectId:String}");
        assert_eq!(b.bind_array("f0"), "{f0:Array(String)}");
        assert_eq!(b.bind_datetime("from"), "{from:DateTime64(3)}");
        assert_eq!(
            b.placeholder("f1", &ParamValue::Array(vec!["a".into()])),
            "{f1:Array(String)}"
        );
    }
}
