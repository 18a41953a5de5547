use std::collections::BTreeMap;
use std::iter::FromIterator;
use std::path::Path;

use serde::{de::DeserializeOwned, Serialize};
use serde_json::{Map, Value};
use ssg_core::{ErrorInfo, SsgError};

fn serde_error(code: &str, err: impl ToString) -> SsgError {
    SsgError::Serde(ErrorInfo::new(code, err.to_string()))
}

fn canonicalize(value: Value) -> Value {
    match value {
        Value::Object(map) => {
            let ordered = map
                .into_iter()
                .map(|(key, value)| (key, canonicalize(value)))
                .collect::<BTreeMap<_, _>>();
            Value::Object(Map::from_iter(ordered))
        }
        Value::Array(values) => Value::Array(values.into_iter().map(canonicalize).collect()),
        other => other,
    }
}

/// Serializes a value into canonical JSON bytes with sorted keys.
pub fn to_canonical_json_bytes<T: Serialize>(value: &T) -> Result<Vec<u8>, SsgError> {
    let value = serde_json::to_value(value).map_err(|err| serde_error("json_serialize", err))?;
    let mut bytes = Vec::new();
    serde_json::to_writer(&mut bytes, &canonicalize(value))
        .map_err(|err| serde_error("json_write", err))?;
    Ok(bytes)
}

/// Pretty-printed canonical JSON, for files meant to be read by people.
pub fn to_canonical_json_pretty<T: Serialize>(value: &T) -> Result<String, SsgError> {
    let value = serde_json::to_value(value).map_err(|err| serde_error("json_serialize", err))?;
    serde_json::to_string_pretty(&canonicalize(value)).map_err(|err| serde_error("json_write", err))
}

/// Deserializes a value from JSON bytes.
pub fn from_json_slice<T: DeserializeOwned>(data: &[u8]) -> Result<T, SsgError> {
    serde_json::from_slice(data).map_err(|err| serde_error("json_deserialize", err))
}

/// Serializes a value into YAML.
pub fn to_yaml_string<T: Serialize>(value: &T) -> Result<String, SsgError> {
    serde_yaml::to_string(value).map_err(|err| serde_error("yaml_serialize", err))
}

/// Deserializes a YAML payload into the requested type.
pub fn from_yaml_slice<T: DeserializeOwned>(data: &[u8]) -> Result<T, SsgError> {
    serde_yaml::from_slice(data).map_err(|err| serde_error("yaml_deserialize", err))
}

/// On-disk encodings accepted for batch and config files.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// `.json`
    Json,
    /// `.yaml` or `.yml`
    Yaml,
}

impl Format {
    /// Picks the encoding from a file extension, case-insensitively.
    pub fn from_path(path: &Path) -> Result<Self, SsgError> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);
        match extension.as_deref() {
            Some("json") => Ok(Format::Json),
            Some("yaml") | Some("yml") => Ok(Format::Yaml),
            _ => {
                let info = ErrorInfo::new("batch_format", "file must end in .json, .yaml or .yml")
                    .with_context("path", path.display().to_string());
                Err(SsgError::Serde(info))
            }
        }
    }

    /// Decodes `data` in this encoding.
    pub fn decode<T: DeserializeOwned>(self, data: &[u8]) -> Result<T, SsgError> {
        match self {
            Format::Json => from_json_slice(data),
            Format::Yaml => from_yaml_slice(data),
        }
    }
}
