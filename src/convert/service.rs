//! Default [`TypeConverter`] with support for user-registered converters

use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use tracing::trace;

use super::{ConversionContext, FromValue, TypeConverter};
use crate::argument::TypeInfo;
use crate::error::ConversionError;
use crate::value::Value;

/// Type-erased converter producing a boxed instance of its target type
pub type CustomConverter = Arc<
    dyn Fn(&Value, &ConversionContext) -> Result<Box<dyn Any + Send>, ConversionError>
        + Send
        + Sync,
>;

#[derive(Clone)]
struct Registered {
    target: TypeInfo,
    convert: CustomConverter,
}

/// Converts values through registered converters, falling back to [`FromValue`]
///
/// A converter registered for a type takes precedence over the built-in
/// conversion for that type. Registering a second converter for the same
/// type replaces the first. Registered converters also apply to the
/// elements of collections and to optional values.
#[derive(Clone, Default)]
pub struct ConversionService {
    converters: Arc<HashMap<TypeId, Registered>>,
}

impl ConversionService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a converter for `T`
    pub fn add_converter<T, F>(&mut self, convert: F)
    where
        T: Send + 'static,
        F: Fn(&Value, &ConversionContext) -> Result<T, ConversionError> + Send + Sync + 'static,
    {
        let erased: CustomConverter = Arc::new(move |value, context| {
            convert(value, context).map(|t| Box::new(t) as Box<dyn Any + Send>)
        });
        Arc::make_mut(&mut self.converters).insert(
            TypeId::of::<T>(),
            Registered {
                target: TypeInfo::of::<T>(),
                convert: erased,
            },
        );
    }

    /// Builder form of [`add_converter`](Self::add_converter)
    pub fn with_converter<T, F>(mut self, convert: F) -> Self
    where
        T: Send + 'static,
        F: Fn(&Value, &ConversionContext) -> Result<T, ConversionError> + Send + Sync + 'static,
    {
        self.add_converter(convert);
        self
    }

    pub fn has_converter<T: 'static>(&self) -> bool {
        self.converters.contains_key(&TypeId::of::<T>())
    }
}

impl TypeConverter for ConversionService {
    fn convert<T: FromValue>(
        &self,
        value: &Value,
        context: &ConversionContext,
    ) -> Result<T, ConversionError> {
        if context.service().is_none() && !self.converters.is_empty() {
            let attached = context.clone().with_service(self.clone());
            return self.convert(value, &attached);
        }

        let Some(registered) = self.converters.get(&TypeId::of::<T>()) else {
            return T::from_value(value, context);
        };

        trace!(target_type = registered.target.name, "using registered converter");
        let boxed = (registered.convert)(value, context)?;
        boxed.downcast::<T>().map(|t| *t).map_err(|_| {
            ConversionError::incompatible(value.kind(), registered.target.simple_name())
        })
    }
}

impl fmt::Debug for ConversionService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut targets: Vec<&str> = self.converters.values().map(|r| r.target.name).collect();
        targets.sort_unstable();
        f.debug_struct("ConversionService")
            .field("converters", &targets)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq)]
    struct Port(u16);

    impl FromValue for Port {
        fn from_value(value: &Value, context: &ConversionContext) -> Result<Self, ConversionError> {
            u16::from_value(value, context).map(Port)
        }
    }

    #[test]
    fn test_falls_back_to_from_value() {
        let service = ConversionService::new();
        let port: Port = service
            .convert(&Value::from("8080"), &ConversionContext::default())
            .unwrap();
        assert_eq!(port, Port(8080));
    }

    #[test]
    fn test_registered_converter_wins() {
        let service = ConversionService::new()
            .with_converter::<Port, _>(|_, _| Ok(Port(1)));
        assert!(service.has_converter::<Port>());

        let port: Port = service
            .convert(&Value::from("8080"), &ConversionContext::default())
            .unwrap();
        assert_eq!(port, Port(1));
    }

    #[test]
    fn test_registered_converter_replaces_builtin() {
        let service = ConversionService::new().with_converter::<bool, _>(|value, _| {
            Ok(value.as_str() == Some("enabled"))
        });
        let ctx = ConversionContext::default();
        assert_eq!(service.convert::<bool>(&Value::from("enabled"), &ctx), Ok(true));
        assert_eq!(service.convert::<bool>(&Value::from("true"), &ctx), Ok(false));
    }

    #[test]
    fn test_converter_error_propagates() {
        let service = ConversionService::new().with_converter::<Port, _>(|value, _| {
            Err(ConversionError::incompatible(value.kind(), "Port"))
        });
        let result = service.convert::<Port>(&Value::Null, &ConversionContext::default());
        assert_eq!(result, Err(ConversionError::incompatible("null", "Port")));
    }

    #[test]
    fn test_registered_converter_reaches_nested_values() {
        let service = ConversionService::new().with_converter::<Port, _>(|value, context| {
            u16::from_value(value, context).map(|p| Port(p + 1))
        });
        let ctx = ConversionContext::default();

        let ports: Vec<Port> = service.convert(&Value::from("80, 443"), &ctx).unwrap();
        assert_eq!(ports, vec![Port(81), Port(444)]);

        let port: Option<Port> = service.convert(&Value::from("8080"), &ctx).unwrap();
        assert_eq!(port, Some(Port(8081)));
        assert!(ctx.service().is_none());
    }

    #[test]
    fn test_debug_lists_targets() {
        let service = ConversionService::new().with_converter::<Port, _>(|_, _| Ok(Port(0)));
        assert!(format!("{:?}", service).contains("Port"));
    }
}
