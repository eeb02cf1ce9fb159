//! Key renaming between Hexo and Hugo front matter conventions

use crate::core::format::Metadata;
use crate::error::{H2hError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Which platform's conventions the source documents follow
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    #[serde(rename = "hexo2hugo")]
    HexoToHugo,
    #[serde(rename = "hugo2hexo")]
    HugoToHexo,
}

const HEXO_TO_HUGO: &[(&str, &str)] = &[
    ("permalink", "slug"),
    ("updated", "lastmod"),
    ("sticky", "weight"),
];

const HUGO_TO_HEXO: &[(&str, &str)] = &[
    ("slug", "permalink"),
    ("lastmod", "updated"),
    ("weight", "sticky"),
];

impl Direction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::HexoToHugo => "hexo2hugo",
            Direction::HugoToHexo => "hugo2hexo",
        }
    }

    /// The renames declared for this direction
    pub fn key_map(&self) -> KeyMap {
        let pairs = match self {
            Direction::HexoToHugo => HEXO_TO_HUGO,
            Direction::HugoToHexo => HUGO_TO_HEXO,
        };
        KeyMap::from_pairs(pairs.iter().copied())
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Direction {
    type Err = H2hError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "hexo2hugo" => Ok(Direction::HexoToHugo),
            "hugo2hexo" => Ok(Direction::HugoToHexo),
            other => Err(H2hError::configuration(format!(
                "unsupported direction '{}'. Use 'hexo2hugo' or 'hugo2hexo'",
                other
            ))),
        }
    }
}

/// Source key name to target key name; absent keys keep their name
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeyMap {
    pairs: BTreeMap<String, String>,
}

impl KeyMap {
    /// A table that renames nothing
    pub fn identity() -> Self {
        Self::default()
    }

    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            pairs: pairs
                .into_iter()
                .map(|(from, to)| (from.into(), to.into()))
                .collect(),
        }
    }

    /// Add or replace a single rename
    pub fn with_override(mut self, from: impl Into<String>, to: impl Into<String>) -> Self {
        self.pairs.insert(from.into(), to.into());
        self
    }

    /// Name a source key takes in the target
    pub fn target<'a>(&'a self, key: &'a str) -> &'a str {
        self.pairs.get(key).map(String::as_str).unwrap_or(key)
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    /// Rename the top-level keys of a mapping.
    ///
    /// Keys are visited in sorted order, so when two source keys land on the
    /// same target name the later one wins.
    pub fn remap(&self, metadata: Metadata) -> Metadata {
        let mut remapped = Metadata::new();
        for (key, value) in metadata {
            let target = match self.pairs.get(&key) {
                Some(mapped) => mapped.clone(),
                None => key,
            };
            remapped.insert(target, value);
        }
        remapped
    }
}
