use crate::binder::ParamBinder;
use crate::compiled::{ParamValue, Params};
use crate::query::Filter;

/// One compiled predicate and the parameter it binds
#[derive(Debug, Clone, PartialEq)]
pub struct FilterFragment {
    pub clause: String,
    pub params: Params,
}

/// Placeholder name for the filter at `index`
pub fn param_name(index: usize) -> String {
    format!("f{}", index)
}

/// Compile one filter into a predicate bound to `f{index}`
///
/// The value is never written into the clause. This does not consult any
/// allow-list: the field is emitted as given, so callers must authorize the
/// filter before compiling it.
pub fn compile_filter<B: ParamBinder + ?Sized>(filter: &Filter, index: usize, binder: &B) -> FilterFragment {
    let name = param_name(index);
    let op = filter.op;

    let value = if op.is_set() {
        ParamValue::Array(filter.value.to_vec())
    } else if op.is_pattern() {
        ParamValue::String(format!("%{}%", filter.value.first()))
    } else {
        ParamValue::String(filter.value.first().to_string())
    };

    let clause = format!("{} {} {}", filter.field, op.as_sql(), binder.placeholder(&name, &value));

    let mut params = Params::new();
    params.insert(name, value);
    FilterFragment { clause, params }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::binder::ClickHouseBinder;
    use crate::query::FilterOperator;

    fn compile(filter: Filter, index: usize) -> FilterFragment {
        compile_filter(&filter, index, &ClickHouseBinder)
    }

    #[test]
    fn test_equals() {
        let frag = compile(Filter::new("browser_name", FilterOperator::Equals, "Chrome"), 0);
        assert_eq!(frag.clause, "browser_name = {f0:String}");
        assert_eq!(frag.params["f0"], ParamValue::from("Chrome"));
    }

    #[test]
    fn test_like_wraps_wildcards() {
        let frag = compile(Filter::new("path", FilterOperator::Like, "abc"), 2);
        assert_eq!(frag.clause, "path LIKE {f2:String}");
        assert_eq!(frag.params["f2"], ParamValue::from("%abc%"));
    }

    #[test]
    fn test_not_like() {
        let frag = compile(Filter::new("path", FilterOperator::NotLike, "admin"), 0);
        assert_eq!(frag.clause, "path NOT LIKE {f0:String}");
        assert_eq!(frag.params["f0"], ParamValue::from("%admin%"));
    }

    #[test]
    fn test_in_coerces_scalar() {
        let frag = compile(Filter::new("x", FilterOperator::In, "a"), 0);
        assert_eq!(frag.clause, "x IN {f0:Array(String)}");
        assert_eq!(frag.params["f0"], ParamValue::Array(vec!["a".to_string()]));
    }

    #[test]
    fn test_in_keeps_array() {
        let frag = compile(Filter::new("x", FilterOperator::In, vec!["a", "b"]), 0);
        assert_eq!(
            frag.params["f0"],
            ParamValue::Array(vec!["a".to_string(), "b".to_string()])
        );
    }

    #[test]
    fn test_not_in() {
        let frag = compile(Filter::new("country", FilterOperator::NotIn, vec!["US"]), 1);
        assert_eq!(frag.clause, "country NOT IN {f1:Array(String)}");
    }

    #[test]
    fn test_comparison_uses_first_of_array() {
        let frag = compile(Filter::new("version", FilterOperator::Gte, vec!["2", "3"]), 0);
        assert_eq!(frag.clause, "version >= {f0:String}");
        assert_eq!(frag.params["f0"], ParamValue::from("2"));
    }

    #[test]
    fn test_value_never_in_clause() {
        let evil = "' OR 1=1 --";
        let frag = compile(Filter::new("browser_name", FilterOperator::Equals, evil), 0);
        assert!(!frag.clause.contains(evil));
        assert_eq!(frag.params["f0"], ParamValue::from(evil));
    }
}
