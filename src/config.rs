//! Configuration for value conversion

use std::path::Path;

use serde::Deserialize;

use crate::error::SourceError;

/// Configuration options shared by every conversion a resolver performs
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct ConversionConfig {
    /// Separator used when a string is converted into a list
    pub list_separator: char,

    /// Trim surrounding whitespace from strings before parsing them
    pub trim_strings: bool,
}

impl Default for ConversionConfig {
    fn default() -> Self {
        Self {
            list_separator: ',',
            trim_strings: true,
        }
    }
}

impl ConversionConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the list separator
    pub fn with_list_separator(mut self, separator: char) -> Self {
        self.list_separator = separator;
        self
    }

    /// Set whether strings are trimmed before parsing
    pub fn with_trim_strings(mut self, trim: bool) -> Self {
        self.trim_strings = trim;
        self
    }

    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, SourceError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Load configuration from a TOML string; missing keys keep their defaults
    pub fn from_toml_str(content: &str) -> Result<Self, SourceError> {
        Ok(toml::from_str(content)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ConversionConfig::default();
        assert_eq!(config.list_separator, ',');
        assert!(config.trim_strings);
    }

    #[test]
    fn test_builder_pattern() {
        let config = ConversionConfig::new()
            .with_list_separator(';')
            .with_trim_strings(false);

        assert_eq!(config.list_separator, ';');
        assert!(!config.trim_strings);
    }

    #[test]
    fn test_partial_toml() {
        let config =
            ConversionConfig::from_toml_str("list-separator = \"|\"").expect("Should parse");
        assert_eq!(config.list_separator, '|');
        assert!(config.trim_strings);
    }

    #[test]
    fn test_invalid_toml_error() {
        assert!(ConversionConfig::from_toml_str("list-separator = 12").is_err());
    }
}
