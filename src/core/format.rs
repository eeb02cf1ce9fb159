//! Structured formats a front matter block can be written in
//!
//! Both formats decode into the same [`Metadata`] model so a block read as
//! one can be written as the other. The model is `serde_json::Value` keyed by
//! a `BTreeMap`, which keeps encoding deterministic.

use crate::error::{H2hError, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Decoded front matter: top-level keys to format-neutral values
pub type Metadata = BTreeMap<String, Value>;

/// Supported front matter serialization formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    Yaml,
    Toml,
}

impl Format {
    pub fn as_str(&self) -> &'static str {
        match self {
            Format::Yaml => "yaml",
            Format::Toml => "toml",
        }
    }

    /// Decode a front matter block into a key/value mapping
    pub fn decode(&self, text: &str) -> Result<Metadata> {
        match self {
            Format::Yaml => decode_yaml(text),
            Format::Toml => decode_toml(text),
        }
    }

    /// Encode a key/value mapping; the output always ends with a newline
    /// unless the mapping encodes to nothing at all.
    ///
    /// TOML has no null, so null-valued keys are left out of every table.
    /// A null inside an array still fails to encode.
    pub fn encode(&self, metadata: &Metadata) -> Result<String> {
        let encoded = match self {
            Format::Yaml => serde_yaml::to_string(metadata).map_err(|e| H2hError::encode(*self, e))?,
            Format::Toml => toml::to_string(&without_nulls(metadata))
                .map_err(|e| H2hError::encode(*self, e))?,
        };
        Ok(encoded)
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Format {
    type Err = H2hError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "yaml" | "yml" => Ok(Format::Yaml),
            "toml" => Ok(Format::Toml),
            other => Err(H2hError::configuration(format!(
                "unsupported format '{}'. Use 'yaml' or 'toml'",
                other
            ))),
        }
    }
}

fn without_nulls(metadata: &Metadata) -> Metadata {
    metadata
        .iter()
        .filter(|(_, value)| !value.is_null())
        .map(|(key, value)| (key.clone(), drop_table_nulls(value)))
        .collect()
}

fn drop_table_nulls(value: &Value) -> Value {
    match value {
        Value::Object(map) => Value::Object(
            map.iter()
                .filter(|(_, v)| !v.is_null())
                .map(|(k, v)| (k.clone(), drop_table_nulls(v)))
                .collect(),
        ),
        Value::Array(items) => Value::Array(items.iter().map(drop_table_nulls).collect()),
        other => other.clone(),
    }
}

fn decode_yaml(text: &str) -> Result<Metadata> {
    if text.trim().is_empty() {
        return Ok(Metadata::new());
    }

    let value: serde_yaml::Value =
        serde_yaml::from_str(text).map_err(|e| H2hError::decode(Format::Yaml, e))?;

    match value {
        serde_yaml::Value::Null => Ok(Metadata::new()),
        serde_yaml::Value::Mapping(map) => yaml_mapping_to_metadata(map),
        other => Err(H2hError::decode(
            Format::Yaml,
            format!("expected a mapping, found {}", yaml_kind(&other)),
        )),
    }
}

fn yaml_mapping_to_metadata(map: serde_yaml::Mapping) -> Result<Metadata> {
    let mut metadata = Metadata::new();
    for (key, value) in map {
        metadata.insert(yaml_key(key)?, yaml_to_json(value)?);
    }
    Ok(metadata)
}

fn yaml_key(key: serde_yaml::Value) -> Result<String> {
    match key {
        serde_yaml::Value::String(s) => Ok(s),
        serde_yaml::Value::Number(n) => Ok(n.to_string()),
        serde_yaml::Value::Bool(b) => Ok(b.to_string()),
        other => Err(H2hError::decode(
            Format::Yaml,
            format!("non-string key found: {}", yaml_kind(&other)),
        )),
    }
}

fn yaml_to_json(value: serde_yaml::Value) -> Result<Value> {
    Ok(match value {
        serde_yaml::Value::Null => Value::Null,
        serde_yaml::Value::Bool(b) => Value::Bool(b),
        serde_yaml::Value::String(s) => Value::String(s),
        serde_yaml::Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Value::from(i)
            } else if let Some(u) = n.as_u64() {
                Value::from(u)
            } else {
                let f = n.as_f64().unwrap_or(f64::NAN);
                Value::Number(Number::from_f64(f).ok_or_else(|| {
                    H2hError::decode(Format::Yaml, format!("non-finite number {}", n))
                })?)
            }
        }
        serde_yaml::Value::Sequence(seq) => Value::Array(
            seq.into_iter()
                .map(yaml_to_json)
                .collect::<Result<Vec<_>>>()?,
        ),
        serde_yaml::Value::Mapping(map) => {
            Value::Object(yaml_mapping_to_metadata(map)?.into_iter().collect())
        }
        serde_yaml::Value::Tagged(tagged) => yaml_to_json(tagged.value)?,
    })
}

fn yaml_kind(value: &serde_yaml::Value) -> &'static str {
    match value {
        serde_yaml::Value::Null => "null",
        serde_yaml::Value::Bool(_) => "boolean",
        serde_yaml::Value::Number(_) => "number",
        serde_yaml::Value::String(_) => "string",
        serde_yaml::Value::Sequence(_) => "sequence",
        serde_yaml::Value::Mapping(_) => "mapping",
        serde_yaml::Value::Tagged(_) => "tagged value",
    }
}

fn decode_toml(text: &str) -> Result<Metadata> {
    let table: toml::Table = toml::from_str(text).map_err(|e| H2hError::decode(Format::Toml, e))?;

    table
        .into_iter()
        .map(|(key, value)| Ok((key, toml_to_json(value)?)))
        .collect()
}

// TOML datetimes have no counterpart in the neutral model and are kept as
// their RFC 3339 text.
fn toml_to_json(value: toml::Value) -> Result<Value> {
    Ok(match value {
        toml::Value::String(s) => Value::String(s),
        toml::Value::Integer(i) => Value::from(i),
        toml::Value::Float(f) => Value::Number(Number::from_f64(f).ok_or_else(|| {
            H2hError::decode(Format::Toml, format!("non-finite number {}", f))
        })?),
        toml::Value::Boolean(b) => Value::Bool(b),
        toml::Value::Datetime(dt) => Value::String(dt.to_string()),
        toml::Value::Array(items) => Value::Array(
            items
                .into_iter()
                .map(toml_to_json)
                .collect::<Result<Vec<_>>>()?,
        ),
        toml::Value::Table(table) => Value::Object(
            table
                .into_iter()
                .map(|(k, v)| Ok((k, toml_to_json(v)?)))
                .collect::<Result<serde_json::Map<_, _>>>()?,
        ),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_format_from_str() {
        assert_eq!("yaml".parse::<Format>().unwrap(), Format::Yaml);
        assert_eq!("YML".parse::<Format>().unwrap(), Format::Yaml);
        assert_eq!("toml".parse::<Format>().unwrap(), Format::Toml);

        let err = "json".parse::<Format>().unwrap_err();
        assert!(matches!(err, H2hError::Configuration { .. }));
    }

    #[test]
    fn test_decode_yaml() {
        let metadata = Format::Yaml
            .decode("title: Hello\ntags: [a, b]\ndraft: false\nweight: 3\n")
            .unwrap();

        assert_eq!(metadata["title"], json!("Hello"));
        assert_eq!(metadata["tags"], json!(["a", "b"]));
        assert_eq!(metadata["draft"], json!(false));
        assert_eq!(metadata["weight"], json!(3));
    }

    #[test]
    fn test_decode_yaml_empty_block() {
        assert!(Format::Yaml.decode("").unwrap().is_empty());
        assert!(Format::Yaml.decode("  \n").unwrap().is_empty());
        assert!(Format::Yaml.decode("~").unwrap().is_empty());
    }

    #[test]
    fn test_decode_yaml_rejects_non_mapping() {
        let err = Format::Yaml.decode("- a\n- b\n").unwrap_err();
        assert!(matches!(
            err,
            H2hError::Decode {
                format: Format::Yaml,
                ..
            }
        ));
    }

    #[test]
    fn test_decode_yaml_malformed() {
        let err = Format::Yaml.decode("title: [unclosed\n").unwrap_err();
        assert!(err.to_string().contains("yaml"));
    }

    #[test]
    fn test_decode_toml() {
        let metadata = Format::Toml
            .decode("title = \"Hello\"\ndate = 2023-05-01\n[params]\nauthor = \"me\"\n")
            .unwrap();

        assert_eq!(metadata["title"], json!("Hello"));
        assert_eq!(metadata["date"], json!("2023-05-01"));
        assert_eq!(metadata["params"], json!({"author": "me"}));
    }

    #[test]
    fn test_decode_toml_malformed() {
        let err = Format::Toml.decode("title: Hello").unwrap_err();
        assert!(matches!(
            err,
            H2hError::Decode {
                format: Format::Toml,
                ..
            }
        ));
    }

    #[test]
    fn test_encode_yaml_is_sorted() {
        let metadata = Format::Yaml.decode("b: 2\na: 1\n").unwrap();
        assert_eq!(Format::Yaml.encode(&metadata).unwrap(), "a: 1\nb: 2\n");
    }

    #[test]
    fn test_encode_toml() {
        let metadata = Format::Yaml
            .decode("title: Hello\ntags: [a, b]\n")
            .unwrap();
        let encoded = Format::Toml.encode(&metadata).unwrap();

        assert!(encoded.contains("title = \"Hello\""));
        assert_eq!(Format::Toml.decode(&encoded).unwrap(), metadata);
    }

    #[test]
    fn test_encode_toml_drops_null_keys() {
        let metadata = Format::Yaml
            .decode("title: Hello\ntags:\nauthor:\n  name: Jane\n  site: ~\n")
            .unwrap();
        let encoded = Format::Toml.encode(&metadata).unwrap();

        assert_eq!(
            Format::Toml.decode(&encoded).unwrap(),
            Format::Yaml
                .decode("title: Hello\nauthor:\n  name: Jane\n")
                .unwrap()
        );
        assert_eq!(Format::Yaml.encode(&metadata).unwrap().matches("null").count(), 2);
    }

    #[test]
    fn test_encode_toml_rejects_null_in_array() {
        let metadata = Format::Yaml.decode("tags: [a, ~]\n").unwrap();
        let err = Format::Toml.encode(&metadata).unwrap_err();
        assert!(matches!(
            err,
            H2hError::Encode {
                format: Format::Toml,
                ..
            }
        ));
    }

    #[test]
    fn test_nested_values_cross_formats() {
        let yaml = "author:\n  name: Jane\n  links: [a, b]\ncount: 2\n";
        let metadata = Format::Yaml.decode(yaml).unwrap();
        let toml_text = Format::Toml.encode(&metadata).unwrap();
        let back = Format::Toml.decode(&toml_text).unwrap();
        assert_eq!(back, metadata);
        assert_eq!(Format::Yaml.encode(&back).unwrap(), Format::Yaml.encode(&metadata).unwrap());
    }
}
