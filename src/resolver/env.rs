//! Resolver over process environment variables

use tracing::{debug, trace};

use super::ValueResolver;
use crate::argument::Argument;
use crate::config::ConversionConfig;
use crate::convert::{ConversionContext, ConversionService, FromValue, TypeConverter};
use crate::value::Value;

/// Resolves property names against environment variables
///
/// `server.port` is looked up as `SERVER_PORT`, or `APP_SERVER_PORT` with
/// the prefix `app`. Every variable is read as a string and converted like
/// any other stored value.
#[derive(Debug, Clone, Default)]
pub struct EnvironmentValueResolver {
    prefix: Option<String>,
    converter: ConversionService,
    config: ConversionConfig,
}

impl EnvironmentValueResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Only consider variables starting with `PREFIX_`
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = Some(prefix.into());
        self
    }

    pub fn with_converter(mut self, converter: ConversionService) -> Self {
        self.converter = converter;
        self
    }

    pub fn with_config(mut self, config: ConversionConfig) -> Self {
        self.config = config;
        self
    }

    /// The environment variable a property name maps to
    ///
    /// The prefix is normalised the same way as the name, so `my-app`
    /// becomes `MY_APP`.
    pub fn variable_name(&self, name: &str) -> String {
        match &self.prefix {
            Some(prefix) => format!("{}_{}", normalize(prefix), normalize(name)),
            None => normalize(name),
        }
    }

    fn resolve<T: FromValue>(&self, name: &str, context: &ConversionContext) -> Option<T> {
        let variable = self.variable_name(name);
        let raw = std::env::var(&variable).ok()?;
        match self.converter.convert::<T>(&Value::String(raw), context) {
            Ok(converted) => {
                trace!(property = name, variable = %variable, "resolved from environment");
                Some(converted)
            }
            Err(e) => {
                debug!(
                    property = name,
                    variable = %variable,
                    error = %e,
                    "environment value not convertible"
                );
                None
            }
        }
    }
}

fn normalize(name: &str) -> String {
    name.chars()
        .map(|c| match c {
            '.' | '-' => '_',
            c => c.to_ascii_uppercase(),
        })
        .collect()
}

impl ValueResolver for EnvironmentValueResolver {
    fn get<T: FromValue>(&self, name: &str) -> Option<T> {
        self.resolve(name, &ConversionContext::new(self.config.clone()))
    }

    fn get_argument<T: FromValue>(&self, name: &str, argument: &Argument<T>) -> Option<T> {
        self.resolve(name, &argument.context(&self.config))
    }

    fn contains(&self, name: &str) -> bool {
        std::env::var_os(self.variable_name(name)).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_variable_name() {
        let resolver = EnvironmentValueResolver::new();
        assert_eq!(resolver.variable_name("server.port"), "SERVER_PORT");
        assert_eq!(resolver.variable_name("max-body-size"), "MAX_BODY_SIZE");

        let prefixed = EnvironmentValueResolver::new().with_prefix("app");
        assert_eq!(prefixed.variable_name("server.port"), "APP_SERVER_PORT");
    }

    #[test]
    fn test_prefix_is_normalised() {
        let resolver = EnvironmentValueResolver::new().with_prefix("my-app");
        assert_eq!(resolver.variable_name("server.port"), "MY_APP_SERVER_PORT");

        let dotted = EnvironmentValueResolver::new().with_prefix("my.app");
        assert_eq!(dotted.variable_name("debug"), "MY_APP_DEBUG");

        temp_env::with_var("MY_APP_SERVER_PORT", Some("7070"), || {
            assert_eq!(resolver.get::<u16>("server.port"), Some(7070));
        });
    }

    #[test]
    fn test_reads_environment() {
        temp_env::with_vars(
            [("VR_TEST_SERVER_PORT", Some("9090")), ("VR_TEST_DEBUG", Some("on"))],
            || {
                let resolver = EnvironmentValueResolver::new().with_prefix("vr_test");
                assert_eq!(resolver.get::<u16>("server.port"), Some(9090));
                assert_eq!(resolver.get::<bool>("debug"), Some(true));
                assert!(resolver.contains("debug"));
            },
        );
    }

    #[test]
    fn test_missing_and_unconvertible() {
        temp_env::with_vars(
            [("VR_TEST2_PORT", Some("not-a-port")), ("VR_TEST2_MISSING", None)],
            || {
                let resolver = EnvironmentValueResolver::new().with_prefix("VR_TEST2");
                assert_eq!(resolver.get::<u16>("port"), None);
                assert_eq!(resolver.get::<String>("missing"), None);
                assert_eq!(resolver.get_or::<u16>("port", 80), 80);
            },
        );
    }

    #[test]
    fn test_argument_format() {
        temp_env::with_var("VR_TEST3_LIMIT", Some("2MB"), || {
            let resolver = EnvironmentValueResolver::new().with_prefix("vr_test3");
            let arg = Argument::<u64>::of("limit").with_format("bytes");
            assert_eq!(resolver.get_argument("limit", &arg), Some(2 * 1024 * 1024));
        });
    }
}
