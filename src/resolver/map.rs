//! Resolver over an owned map of values

use std::collections::HashMap;

use tracing::{debug, trace};

use super::ValueResolver;
use crate::argument::Argument;
use crate::config::ConversionConfig;
use crate::convert::{ConversionContext, ConversionService, FromValue, TypeConverter};
use crate::value::Value;

/// A [`ValueResolver`] backed by a `HashMap<String, Value>` it owns
#[derive(Debug, Clone)]
pub struct MapValueResolver<C = ConversionService> {
    values: HashMap<String, Value>,
    converter: C,
    config: ConversionConfig,
}

impl MapValueResolver {
    /// Create a resolver using the default [`ConversionService`]
    pub fn new<K, V, I>(entries: I) -> Self
    where
        K: Into<String>,
        V: Into<Value>,
        I: IntoIterator<Item = (K, V)>,
    {
        Self::with_converter(entries, ConversionService::default())
    }
}

impl<C: TypeConverter> MapValueResolver<C> {
    /// Create a resolver that converts through `converter`
    pub fn with_converter<K, V, I>(entries: I, converter: C) -> Self
    where
        K: Into<String>,
        V: Into<Value>,
        I: IntoIterator<Item = (K, V)>,
    {
        Self {
            values: entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
            converter,
            config: ConversionConfig::default(),
        }
    }

    /// Set the conversion configuration
    pub fn with_config(mut self, config: ConversionConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &ConversionConfig {
        &self.config
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Names of every stored entry, in no particular order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    /// The stored value for `name`, before any conversion
    pub fn get_raw(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    fn resolve<T: FromValue>(&self, name: &str, context: &ConversionContext) -> Option<T> {
        let value = self.values.get(name)?;
        match self.converter.convert::<T>(value, context) {
            Ok(converted) => {
                trace!(property = name, "resolved value");
                Some(converted)
            }
            Err(e) => {
                debug!(property = name, error = %e, "value not convertible");
                None
            }
        }
    }
}

impl<C: TypeConverter> ValueResolver for MapValueResolver<C> {
    fn get<T: FromValue>(&self, name: &str) -> Option<T> {
        self.resolve(name, &ConversionContext::new(self.config.clone()))
    }

    fn get_argument<T: FromValue>(&self, name: &str, argument: &Argument<T>) -> Option<T> {
        self.resolve(name, &argument.context(&self.config))
    }

    fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }
}
