//! Conversion of stored values into requested types
//!
//! [`FromValue`] describes how a target type is built from a [`Value`];
//! [`TypeConverter`] is the seam resolvers call through, with
//! [`ConversionService`] as the default implementation.

mod format;
mod from_value;
mod service;

pub use format::{parse_bool, parse_bytes, parse_duration};
pub use from_value::FromValue;
pub use service::{ConversionService, CustomConverter};

use crate::argument::TypeInfo;
use crate::config::ConversionConfig;
use crate::error::ConversionError;
use crate::value::Value;

/// Format hint that makes integer targets accept readable sizes like `10MB`
pub const BYTES_FORMAT: &str = "bytes";

/// Per-conversion settings
///
/// When a conversion runs through a [`ConversionService`], the context
/// carries that service so collection elements and optional values are
/// converted with the same registered converters as the top-level value.
#[derive(Debug, Clone, Default)]
pub struct ConversionContext {
    config: ConversionConfig,
    format: Option<String>,
    type_parameters: Vec<TypeInfo>,
    service: Option<ConversionService>,
}

impl ConversionContext {
    pub fn new(config: ConversionConfig) -> Self {
        Self {
            config,
            format: None,
            type_parameters: Vec::new(),
            service: None,
        }
    }

    pub fn with_format(mut self, format: Option<String>) -> Self {
        self.format = format;
        self
    }

    pub fn with_type_parameters(mut self, type_parameters: Vec<TypeInfo>) -> Self {
        self.type_parameters = type_parameters;
        self
    }

    /// Route nested conversions through `service`
    pub fn with_service(mut self, service: ConversionService) -> Self {
        self.service = Some(service);
        self
    }

    pub fn service(&self) -> Option<&ConversionService> {
        self.service.as_ref()
    }

    pub fn config(&self) -> &ConversionConfig {
        &self.config
    }

    pub fn format(&self) -> Option<&str> {
        self.format.as_deref()
    }

    pub fn type_parameters(&self) -> &[TypeInfo] {
        &self.type_parameters
    }

    /// Context for converting the elements of a collection
    ///
    /// The format hint applies to elements too, so `Vec<u64>` with the
    /// bytes format parses every entry as a size. Generic parameters are
    /// consumed by the collection itself.
    pub fn element(&self) -> Self {
        Self {
            config: self.config.clone(),
            format: self.format.clone(),
            type_parameters: Vec::new(),
            service: self.service.clone(),
        }
    }

    /// Convert a nested value, honouring the attached service if any
    pub fn convert<T: FromValue>(&self, value: &Value) -> Result<T, ConversionError> {
        match &self.service {
            Some(service) => service.convert(value, self),
            None => T::from_value(value, self),
        }
    }

    /// Apply the trimming rule from the configuration
    pub fn prepare<'a>(&self, input: &'a str) -> &'a str {
        if self.config.trim_strings {
            input.trim()
        } else {
            input
        }
    }
}

/// Converts stored values into concrete types
pub trait TypeConverter {
    fn convert<T: FromValue>(
        &self,
        value: &Value,
        context: &ConversionContext,
    ) -> Result<T, ConversionError>;
}
