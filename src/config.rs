//! Configuration for a tree conversion run

use crate::core::{Direction, Format, KeyMap};
use crate::error::{H2hError, Result};

/// Suffix matched when no other is configured
pub const DEFAULT_FILE_EXTENSION: &str = ".md";

/// Conversion configuration options
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConvertConfig {
    /// Format the front matter is read in
    pub source_format: Format,
    /// Format the front matter is written in
    pub target_format: Format,
    /// Which key table applies
    pub direction: Direction,
    /// Only files whose name ends with this suffix are converted
    pub file_extension: String,
    /// Upper bound on files converted at the same time
    pub max_concurrency: usize,
    /// Extra renames applied on top of the direction's table
    pub key_overrides: Vec<(String, String)>,
}

impl Default for ConvertConfig {
    fn default() -> Self {
        Self {
            source_format: Format::Yaml,
            target_format: Format::Yaml,
            direction: Direction::HexoToHugo,
            file_extension: DEFAULT_FILE_EXTENSION.to_string(),
            max_concurrency: default_concurrency(),
            key_overrides: Vec::new(),
        }
    }
}

/// Number of available processing units, falling back to one
pub fn default_concurrency() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
}

impl ConvertConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_source_format(mut self, format: Format) -> Self {
        self.source_format = format;
        self
    }

    pub fn with_target_format(mut self, format: Format) -> Self {
        self.target_format = format;
        self
    }

    pub fn with_direction(mut self, direction: Direction) -> Self {
        self.direction = direction;
        self
    }

    pub fn with_file_extension(mut self, extension: impl Into<String>) -> Self {
        self.file_extension = extension.into();
        self
    }

    pub fn with_max_concurrency(mut self, max_concurrency: usize) -> Self {
        self.max_concurrency = max_concurrency;
        self
    }

    /// Rename `from` to `to`, overriding the direction's table for that key
    pub fn with_key_override(mut self, from: impl Into<String>, to: impl Into<String>) -> Self {
        self.key_overrides.push((from.into(), to.into()));
        self
    }

    /// The direction's table with overrides applied in order
    pub fn key_map(&self) -> KeyMap {
        self.key_overrides
            .iter()
            .fold(self.direction.key_map(), |map, (from, to)| {
                map.with_override(from.clone(), to.clone())
            })
    }

    /// Validate configuration consistency
    pub fn validate(&self) -> Result<()> {
        if self.max_concurrency == 0 {
            return Err(H2hError::configuration(
                "max concurrency must be at least 1",
            ));
        }

        if self.file_extension.is_empty() {
            return Err(H2hError::configuration("file extension must not be empty"));
        }

        for (from, to) in &self.key_overrides {
            if from.is_empty() || to.is_empty() {
                return Err(H2hError::configuration(format!(
                    "key override '{}={}' must name both keys",
                    from, to
                )));
            }
        }

        Ok(())
    }
}

/// Parse a `from=to` key override
pub fn parse_key_override(s: &str) -> Result<(String, String)> {
    match s.split_once('=') {
        Some((from, to)) if !from.trim().is_empty() && !to.trim().is_empty() => {
            Ok((from.trim().to_string(), to.trim().to_string()))
        }
        _ => Err(H2hError::configuration(format!(
            "invalid key mapping '{}'. Use 'from=to'",
            s
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ConvertConfig::default();
        assert_eq!(config.source_format, Format::Yaml);
        assert_eq!(config.target_format, Format::Yaml);
        assert_eq!(config.direction, Direction::HexoToHugo);
        assert_eq!(config.file_extension, ".md");
        assert!(config.max_concurrency >= 1);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation() {
        let config = ConvertConfig::default().with_max_concurrency(0);
        assert!(matches!(
            config.validate(),
            Err(H2hError::Configuration { .. })
        ));

        let config = ConvertConfig::default().with_file_extension("");
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_key_overrides_apply_on_top_of_direction() {
        let config = ConvertConfig::default()
            .with_key_override("categories", "series")
            .with_key_override("permalink", "url");
        let map = config.key_map();

        assert_eq!(map.target("categories"), "series");
        assert_eq!(map.target("permalink"), "url");
        assert_eq!(map.target("updated"), "lastmod");
    }

    #[test]
    fn test_parse_key_override() {
        assert_eq!(
            parse_key_override("categories=series").unwrap(),
            ("categories".to_string(), "series".to_string())
        );
        assert!(parse_key_override("categories").is_err());
        assert!(parse_key_override("=series").is_err());
    }
}
