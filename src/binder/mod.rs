//! Placeholder binding (verb module)
//!
//! The assembler never writes values into SQL; it asks a binder for the
//! placeholder that stands in for a named parameter. Porting to another
//! engine means providing another [`ParamBinder`].

mod clickhouse;

use crate::compiled::ParamValue;

pub use self::clickhouse::ClickHouseBinder;

/// Renders the SQL placeholder for a named, typed parameter
pub trait ParamBinder {
    fn bind_string(&self, name: &str) -> String;

    fn bind_array(&self, name: &str) -> String;

    fn bind_datetime(&self, name: &str) -> String;

    /// Placeholder matching the type of `value`
    fn placeholder(&self, name: &str, value: &ParamValue) -> String {
        match value {
            ParamValue::String(_) => self.bind_string(name),
            ParamValue::Array(_) => self.bind_array(name),
            ParamValue::DateTime(_) => self.bind_datetime(name),
        }
    }
}

impl<B: ParamBinder + ?Sized> ParamBinder for &B {
    fn bind_string(&self, name: &str) -> String {
        (**self).bind_string(name)
    }

    fn bind_array(&self, name: &str) -> String {
        (**self).bind_array(name)
    }

    fn bind_datetime(&self, name: &str) -> String {
        (**self).bind_datetime(name)
    }
}
