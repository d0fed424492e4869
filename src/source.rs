//! Loading property values from TOML documents
//!
//! Nested tables are flattened into dotted names so that
//!
//! ```toml
//! [server]
//! port = 8080
//! ```
//!
//! is addressable as `server.port`. The table itself stays addressable as
//! `server`, converting to a map.
//!
//! A quoted dotted key such as `"server.port" = 1` can collide with a
//! flattened one. The definition written at the shallower nesting level
//! wins, so the literal top-level key takes precedence over `[server]`.

use std::collections::BTreeMap;
use std::path::Path;

use tracing::debug;

use crate::error::SourceError;
use crate::resolver::MapValueResolver;
use crate::value::Value;

/// A flat set of named values loaded from a document
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PropertySource {
    /// Optional name, usually the file it came from
    pub name: Option<String>,
    /// Flattened entries: dotted name -> value
    pub values: BTreeMap<String, Value>,
}

impl PropertySource {
    /// Load a property source from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, SourceError> {
        let content = std::fs::read_to_string(path)?;
        let mut source = Self::from_toml_str(&content)?;
        source.name = Some(path.display().to_string());
        Ok(source)
    }

    /// Load a property source from a TOML string
    pub fn from_toml_str(content: &str) -> Result<Self, SourceError> {
        let table: toml::Table = toml::from_str(content)?;
        let mut flattened = BTreeMap::new();
        for (key, value) in table {
            flatten(&key, 0, Value::from(value), &mut flattened);
        }
        let values: BTreeMap<String, Value> = flattened
            .into_iter()
            .map(|(key, (_, value))| (key, value))
            .collect();
        debug!(entries = values.len(), "loaded property source");

        Ok(PropertySource { name: None, values })
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    /// Consume the source into a resolver over its entries
    pub fn into_resolver(self) -> MapValueResolver {
        MapValueResolver::new(self.values)
    }
}

/// Flatten `value` under `prefix`, remembering the depth each key came from
fn flatten(prefix: &str, depth: usize, value: Value, out: &mut BTreeMap<String, (usize, Value)>) {
    if let Value::Map(entries) = &value {
        for (key, nested) in entries {
            flatten(&format!("{}.{}", prefix, key), depth + 1, nested.clone(), out);
        }
    }
    match out.get(prefix) {
        Some((existing, _)) if *existing <= depth => {
            debug!(property = prefix, "duplicate key ignored, shallower definition kept");
        }
        Some(_) => {
            debug!(property = prefix, "duplicate key replaces deeper definition");
            out.insert(prefix.to_string(), (depth, value));
        }
        None => {
            out.insert(prefix.to_string(), (depth, value));
        }
    }
}
