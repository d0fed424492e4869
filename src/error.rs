//! Error types for conversion and property loading
//!
//! None of these escape the [`ValueResolver`](crate::ValueResolver) methods;
//! resolvers collapse them into absence. They are public so that a
//! [`TypeConverter`](crate::TypeConverter) can be used on its own.

use thiserror::Error;

/// Errors that can occur when converting a [`Value`](crate::Value)
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConversionError {
    /// The stored value has a shape the target type cannot be built from
    #[error("cannot convert {from} to {to}")]
    Incompatible { from: &'static str, to: String },

    /// A string value could not be parsed into the target type
    #[error("cannot parse '{input}' as {to}: {reason}")]
    Parse {
        input: String,
        to: String,
        reason: String,
    },

    /// A numeric value does not fit the target type
    #[error("value {value} is out of range for {to}")]
    OutOfRange { value: String, to: String },
}

impl ConversionError {
    /// Create an incompatible-shape error
    pub fn incompatible(from: &'static str, to: impl Into<String>) -> Self {
        Self::Incompatible {
            from,
            to: to.into(),
        }
    }

    /// Create a parse error
    pub fn parse(input: impl Into<String>, to: impl Into<String>, reason: impl ToString) -> Self {
        Self::Parse {
            input: input.into(),
            to: to.into(),
            reason: reason.to_string(),
        }
    }

    /// Create an out-of-range error
    pub fn out_of_range(value: impl ToString, to: impl Into<String>) -> Self {
        Self::OutOfRange {
            value: value.to_string(),
            to: to.into(),
        }
    }
}

/// Errors that can occur when loading a property source
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("Failed to read property file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse property TOML: {0}")]
    Parse(#[from] toml::de::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_incompatible_message() {
        let err = ConversionError::incompatible("list", "i32");
        insta::assert_snapshot!(err.to_string(), @"cannot convert list to i32");
    }

    #[test]
    fn test_parse_message() {
        let err = ConversionError::parse("abc", "u16", "invalid digit found in string");
        insta::assert_snapshot!(
            err.to_string(),
            @"cannot parse 'abc' as u16: invalid digit found in string"
        );
    }

    #[test]
    fn test_out_of_range_message() {
        let err = ConversionError::out_of_range(300, "u8");
        insta::assert_snapshot!(err.to_string(), @"value 300 is out of range for u8");
    }

    #[test]
    fn test_generic_target_message() {
        let target = crate::TypeInfo::of::<Vec<String>>();
        let err = ConversionError::incompatible("map", target.simple_name());
        insta::assert_snapshot!(err.to_string(), @"cannot convert map to Vec<String>");
    }
}
