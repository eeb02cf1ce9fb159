use crate::config::ConvertConfig;
use crate::core::format::Format;
use crate::core::key_map::KeyMap;
use crate::error::Result;

/// Marker line bounding a front matter block
pub const FRONT_MATTER_DELIMITER: &str = "---";

/// Converts one front matter block between formats, renaming keys on the way
#[derive(Debug, Clone)]
pub struct FrontMatterConverter {
    key_map: KeyMap,
    source: Format,
    target: Format,
}

impl FrontMatterConverter {
    pub fn new(source: Format, target: Format, key_map: KeyMap) -> Self {
        Self {
            key_map,
            source,
            target,
        }
    }

    /// Build from a run configuration: the direction's table plus any overrides
    pub fn from_config(config: &ConvertConfig) -> Self {
        Self::new(config.source_format, config.target_format, config.key_map())
    }

    pub fn source_format(&self) -> Format {
        self.source
    }

    pub fn target_format(&self) -> Format {
        self.target
    }

    pub fn key_map(&self) -> &KeyMap {
        &self.key_map
    }

    /// Transcode the text between the delimiters and wrap the result in a
    /// fresh pair of delimiter lines.
    pub fn convert(&self, front_matter: &str) -> Result<String> {
        let metadata = self.source.decode(front_matter)?;
        let remapped = self.key_map.remap(metadata);
        let mut encoded = self.target.encode(&remapped)?;

        if !encoded.is_empty() && !encoded.ends_with('\n') {
            encoded.push('\n');
        }

        Ok(format!(
            "{delim}\n{encoded}{delim}",
            delim = FRONT_MATTER_DELIMITER
        ))
    }
}
