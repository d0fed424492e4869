//! Built-in conversions for common target types

use std::collections::{BTreeMap, HashMap};
use std::path::PathBuf;
use std::time::Duration;

use super::format::{parse_bool, parse_bytes, parse_duration};
use super::{ConversionContext, BYTES_FORMAT};
use crate::argument::TypeInfo;
use crate::error::ConversionError;
use crate::value::Value;

/// A type that can be built from a stored [`Value`]
pub trait FromValue: Sized + 'static {
    fn from_value(value: &Value, context: &ConversionContext) -> Result<Self, ConversionError>;
}

impl FromValue for Value {
    fn from_value(value: &Value, _context: &ConversionContext) -> Result<Self, ConversionError> {
        Ok(value.clone())
    }
}

macro_rules! int_from_value {
    ($($t:ty),*) => {
        $(
            impl FromValue for $t {
                fn from_value(
                    value: &Value,
                    context: &ConversionContext,
                ) -> Result<Self, ConversionError> {
                    let to = stringify!($t);
                    match value {
                        Value::Int(i) => {
                            <$t>::try_from(*i).map_err(|_| ConversionError::out_of_range(i, to))
                        }
                        Value::Float(x) => {
                            if !x.is_finite() || x.fract() != 0.0 {
                                return Err(ConversionError::incompatible("fractional float", to));
                            }
                            whole_float_to_int(*x)
                                .and_then(|i| <$t>::try_from(i).ok())
                                .ok_or_else(|| ConversionError::out_of_range(x, to))
                        }
                        Value::String(s) => {
                            let input = context.prepare(s);
                            if context.format() == Some(BYTES_FORMAT) {
                                let bytes = parse_bytes(input)?;
                                return <$t>::try_from(bytes)
                                    .map_err(|_| ConversionError::out_of_range(bytes, to));
                            }
                            input
                                .parse::<$t>()
                                .map_err(|e| ConversionError::parse(s.as_str(), to, e))
                        }
                        other => Err(ConversionError::incompatible(other.kind(), to)),
                    }
                }
            }
        )*
    };
}

/// Widen a whole, finite float to `i128` when it lies in `[-2^63, 2^64)`
///
/// Both bounds are powers of two and exactly representable as `f64`.
fn whole_float_to_int(x: f64) -> Option<i128> {
    const TWO_POW_63: f64 = 9_223_372_036_854_775_808.0;
    const TWO_POW_64: f64 = 18_446_744_073_709_551_616.0;
    if (0.0..TWO_POW_64).contains(&x) {
        Some(i128::from(x as u64))
    } else if (-TWO_POW_63..0.0).contains(&x) {
        Some(i128::from(x as i64))
    } else {
        None
    }
}

int_from_value!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

macro_rules! float_from_value {
    ($($t:ty),*) => {
        $(
            impl FromValue for $t {
                fn from_value(
                    value: &Value,
                    context: &ConversionContext,
                ) -> Result<Self, ConversionError> {
                    let to = stringify!($t);
                    match value {
                        Value::Int(i) => Ok(*i as $t),
                        Value::Float(x) => Ok(*x as $t),
                        Value::String(s) => context
                            .prepare(s)
                            .parse::<$t>()
                            .map_err(|e| ConversionError::parse(s.as_str(), to, e)),
                        other => Err(ConversionError::incompatible(other.kind(), to)),
                    }
                }
            }
        )*
    };
}

float_from_value!(f32, f64);

impl FromValue for bool {
    fn from_value(value: &Value, context: &ConversionContext) -> Result<Self, ConversionError> {
        match value {
            Value::Bool(b) => Ok(*b),
            Value::Int(0) => Ok(false),
            Value::Int(1) => Ok(true),
            Value::Int(i) => Err(ConversionError::out_of_range(i, "bool")),
            Value::String(s) => parse_bool(context.prepare(s)),
            other => Err(ConversionError::incompatible(other.kind(), "bool")),
        }
    }
}

impl FromValue for String {
    fn from_value(value: &Value, _context: &ConversionContext) -> Result<Self, ConversionError> {
        if value.is_scalar() {
            Ok(value.to_string())
        } else {
            Err(ConversionError::incompatible(value.kind(), "String"))
        }
    }
}

impl FromValue for char {
    fn from_value(value: &Value, context: &ConversionContext) -> Result<Self, ConversionError> {
        let Value::String(s) = value else {
            return Err(ConversionError::incompatible(value.kind(), "char"));
        };
        let mut chars = context.prepare(s).chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Ok(c),
            _ => Err(ConversionError::parse(s.as_str(), "char", "expected exactly one character")),
        }
    }
}

impl FromValue for PathBuf {
    fn from_value(value: &Value, context: &ConversionContext) -> Result<Self, ConversionError> {
        match value {
            Value::String(s) => Ok(PathBuf::from(context.prepare(s))),
            other => Err(ConversionError::incompatible(other.kind(), "PathBuf")),
        }
    }
}

impl FromValue for Duration {
    fn from_value(value: &Value, context: &ConversionContext) -> Result<Self, ConversionError> {
        match value {
            Value::Int(ms) => u64::try_from(*ms)
                .map(Duration::from_millis)
                .map_err(|_| ConversionError::out_of_range(ms, "Duration")),
            Value::String(s) => parse_duration(context.prepare(s)),
            other => Err(ConversionError::incompatible(other.kind(), "Duration")),
        }
    }
}

impl<T: FromValue> FromValue for Option<T> {
    fn from_value(value: &Value, context: &ConversionContext) -> Result<Self, ConversionError> {
        match value {
            Value::Null => Ok(None),
            other => context.convert::<T>(other).map(Some),
        }
    }
}

impl<T: FromValue> FromValue for Vec<T> {
    fn from_value(value: &Value, context: &ConversionContext) -> Result<Self, ConversionError> {
        let element = context.element();
        match value {
            Value::List(items) => items.iter().map(|item| element.convert::<T>(item)).collect(),
            Value::String(s) => {
                let input = context.prepare(s);
                if input.is_empty() {
                    return Ok(Vec::new());
                }
                input
                    .split(context.config().list_separator)
                    .map(|piece| element.convert::<T>(&Value::String(piece.to_string())))
                    .collect()
            }
            Value::Map(_) => Err(ConversionError::incompatible(
                "map",
                TypeInfo::of::<Self>().simple_name(),
            )),
            // Any other single value becomes a one-element list
            other => Ok(vec![element.convert::<T>(other)?]),
        }
    }
}

impl<T: FromValue> FromValue for HashMap<String, T> {
    fn from_value(value: &Value, context: &ConversionContext) -> Result<Self, ConversionError> {
        let Value::Map(entries) = value else {
            return Err(ConversionError::incompatible(value.kind(), "HashMap"));
        };
        let element = context.element();
        entries
            .iter()
            .map(|(k, v)| Ok::<_, ConversionError>((k.clone(), element.convert::<T>(v)?)))
            .collect()
    }
}

impl<T: FromValue> FromValue for BTreeMap<String, T> {
    fn from_value(value: &Value, context: &ConversionContext) -> Result<Self, ConversionError> {
        let Value::Map(entries) = value else {
            return Err(ConversionError::incompatible(value.kind(), "BTreeMap"));
        };
        let element = context.element();
        entries
            .iter()
            .map(|(k, v)| Ok::<_, ConversionError>((k.clone(), element.convert::<T>(v)?)))
            .collect()
    }
}
