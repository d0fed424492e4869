//! Name-keyed, typed read access to values
//!
//! [`ValueResolver`] is the capability every backing store implements. A
//! lookup yields `Some` only when the name exists *and* its value converts
//! to the requested type; a missing name and a failed conversion are both
//! reported as `None`.

mod chained;
mod env;
mod map;

pub use chained::{ChainedValueResolver, ResolverSource};
pub use env::EnvironmentValueResolver;
pub use map::MapValueResolver;

use crate::argument::Argument;
use crate::convert::FromValue;
use crate::value::Value;

/// A source that resolves named properties into typed values
pub trait ValueResolver {
    /// Resolve `name` as a `T`
    ///
    /// Returns `None` if the name is not present or its value cannot be
    /// converted.
    fn get<T: FromValue>(&self, name: &str) -> Option<T>;

    /// Resolve `name` using a type token
    ///
    /// The default implementation looks up the raw type only and ignores
    /// everything else the token carries. Resolvers that can make use of
    /// the token's format hint or generic parameters override this.
    fn get_argument<T: FromValue>(&self, name: &str, _argument: &Argument<T>) -> Option<T> {
        self.get::<T>(name)
    }

    /// Resolve `name`, returning `default` when it is absent or unconvertible
    fn get_or<T: FromValue>(&self, name: &str, default: T) -> T {
        self.get(name).unwrap_or(default)
    }

    /// Like [`get_or`](Self::get_or) with a lazily computed default
    fn get_or_else<T: FromValue, F: FnOnce() -> T>(&self, name: &str, default: F) -> T {
        self.get(name).unwrap_or_else(default)
    }

    /// Whether `name` is present, regardless of what it converts to
    fn contains(&self, name: &str) -> bool {
        self.get::<Value>(name).is_some()
    }
}

/// Create a [`MapValueResolver`] owning the given entries
///
/// # Example
///
/// ```rust
/// use value_resolver::{of, ValueResolver};
///
/// let resolver = of([("a", "1")]);
/// assert_eq!(resolver.get::<i32>("a"), Some(1));
/// assert_eq!(resolver.get_or::<i32>("missing", 42), 42);
/// ```
pub fn of<K, V, I>(entries: I) -> MapValueResolver
where
    K: Into<String>,
    V: Into<Value>,
    I: IntoIterator<Item = (K, V)>,
{
    MapValueResolver::new(entries)
}
