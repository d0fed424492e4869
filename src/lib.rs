//! Value Resolver - typed, name-keyed access to property values
//!
//! This library resolves named properties into strongly-typed values. Values
//! are stored dynamically as [`Value`]s and converted on lookup through a
//! [`TypeConverter`]; a lookup that finds nothing or cannot convert yields
//! `None`, never an error.
//!
//! # Example
//!
//! ```rust
//! use std::time::Duration;
//! use value_resolver::{of, ValueResolver};
//!
//! let resolver = of([("port", "8080"), ("timeout", "30s")]);
//!
//! assert_eq!(resolver.get::<u16>("port"), Some(8080));
//! assert_eq!(resolver.get::<Duration>("timeout"), Some(Duration::from_secs(30)));
//! assert_eq!(resolver.get_or("retries", 3u32), 3);
//! ```

pub mod argument;
pub mod config;
pub mod convert;
pub mod error;
pub mod resolver;
pub mod source;
pub mod value;

pub use argument::{Argument, TypeInfo};
pub use config::ConversionConfig;
pub use convert::{ConversionContext, ConversionService, FromValue, TypeConverter};
pub use error::{ConversionError, SourceError};
pub use resolver::{
    of, ChainedValueResolver, EnvironmentValueResolver, MapValueResolver, ResolverSource,
    ValueResolver,
};
pub use source::PropertySource;
pub use value::Value;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_of_resolves_typed_values() {
        let resolver = of([("a", "1")]);
        assert_eq!(resolver.get::<i32>("a"), Some(1));
        assert_eq!(resolver.get_or::<i32>("missing", 42), 42);
    }

    #[test]
    fn test_of_accepts_mixed_values() {
        let resolver = of([
            ("name", Value::from("svc")),
            ("replicas", Value::from(3)),
            ("ratio", Value::from(0.25)),
        ]);
        assert_eq!(resolver.get::<String>("name"), Some("svc".to_string()));
        assert_eq!(resolver.get::<u8>("replicas"), Some(3));
        assert_eq!(resolver.get::<f64>("ratio"), Some(0.25));
    }

    #[test]
    fn test_get_or_else_is_lazy() {
        let resolver = of([("a", 1)]);
        let value = resolver.get_or_else::<i32, _>("a", || panic!("default must not run"));
        assert_eq!(value, 1);
        assert_eq!(resolver.get_or_else::<i32, _>("b", || 9), 9);
    }
}
