//! Type tokens describing a requested value type
//!
//! An [`Argument`] carries more than the Rust type parameter alone: an
//! optional argument name, descriptors for generic parameters and a format
//! hint. Resolvers that only need the raw type call [`Argument::raw`].

use std::any::{type_name, TypeId};
use std::fmt;
use std::marker::PhantomData;

use crate::config::ConversionConfig;
use crate::convert::ConversionContext;

/// Descriptor of a raw (non-generic-aware) type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TypeInfo {
    pub name: &'static str,
    pub id: TypeId,
}

impl TypeInfo {
    pub fn of<T: 'static>() -> Self {
        Self {
            name: type_name::<T>(),
            id: TypeId::of::<T>(),
        }
    }

    /// The type name with module paths removed, including those of generic
    /// arguments (`alloc::vec::Vec<alloc::string::String>` -> `Vec<String>`)
    pub fn simple_name(&self) -> String {
        let mut out = String::with_capacity(self.name.len());
        let mut segment = String::new();
        for c in self.name.chars() {
            if c.is_alphanumeric() || c == '_' || c == ':' {
                segment.push(c);
            } else {
                out.push_str(strip_path(&segment));
                segment.clear();
                out.push(c);
            }
        }
        out.push_str(strip_path(&segment));
        out
    }
}

fn strip_path(segment: &str) -> &str {
    match segment.rfind("::") {
        Some(idx) => &segment[idx + 2..],
        None => segment,
    }
}

impl fmt::Display for TypeInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.simple_name())
    }
}

/// A type token for `T`
pub struct Argument<T> {
    name: Option<String>,
    type_parameters: Vec<TypeInfo>,
    format: Option<String>,
    _marker: PhantomData<fn() -> T>,
}

impl<T: 'static> Argument<T> {
    /// A named argument of type `T`
    pub fn of(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            type_parameters: Vec::new(),
            format: None,
            _marker: PhantomData,
        }
    }

    pub fn unnamed() -> Self {
        Self {
            name: None,
            type_parameters: Vec::new(),
            format: None,
            _marker: PhantomData,
        }
    }

    /// Record a generic type parameter of `T`
    pub fn with_type_parameter<P: 'static>(mut self) -> Self {
        self.type_parameters.push(TypeInfo::of::<P>());
        self
    }

    /// Set a format hint for the conversion (e.g. `"bytes"`)
    pub fn with_format(mut self, format: impl Into<String>) -> Self {
        self.format = Some(format.into());
        self
    }

    /// The raw type, discarding every other piece of information
    pub fn raw(&self) -> TypeInfo {
        TypeInfo::of::<T>()
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn type_parameters(&self) -> &[TypeInfo] {
        &self.type_parameters
    }

    pub fn format(&self) -> Option<&str> {
        self.format.as_deref()
    }

    /// Build the conversion context this argument asks for
    pub fn context(&self, config: &ConversionConfig) -> ConversionContext {
        ConversionContext::new(config.clone())
            .with_format(self.format.clone())
            .with_type_parameters(self.type_parameters.clone())
    }
}

// Manual impls so that `T` itself needs neither `Clone` nor `Debug`
impl<T> Clone for Argument<T> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            type_parameters: self.type_parameters.clone(),
            format: self.format.clone(),
            _marker: PhantomData,
        }
    }
}

impl<T: 'static> fmt::Debug for Argument<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Argument")
            .field("name", &self.name)
            .field("type", &self.raw())
            .field("type_parameters", &self.type_parameters)
            .field("format", &self.format)
            .finish()
    }
}

impl<T: 'static> fmt::Display for Argument<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(name) = &self.name {
            write!(f, "{}: ", name)?;
        }
        let simple = self.raw().simple_name();
        let base = simple.split('<').next().unwrap_or_default();
        write!(f, "{}", base)?;
        if !self.type_parameters.is_empty() {
            let params: Vec<String> =
                self.type_parameters.iter().map(TypeInfo::simple_name).collect();
            write!(f, "<{}>", params.join(", "))?;
        }
        Ok(())
    }
}
