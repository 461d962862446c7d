//! File-based Configuration Provider
//!
//! Loads a JSON object once; nested objects are addressed with dotted keys.

use std::path::{Path, PathBuf};

use serde_json::{Map, Value};

use super::provider::ConfigProvider;
use super::{ConfigError, ConfigResult};

pub struct FileConfigProvider {
    path: PathBuf,
    data: Map<String, Value>,
}

impl FileConfigProvider {
    /// Reads `path`. A missing file yields an empty provider.
    pub fn load(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref().to_path_buf();
        if !path.exists() {
            tracing::debug!(path = %path.display(), "config file not found, using empty config");
            return Ok(Self {
                path,
                data: Map::new(),
            });
        }

        let content = std::fs::read_to_string(&path)?;
        let data = match serde_json::from_str::<Value>(&content)? {
            Value::Object(map) => map,
            other => {
                return Err(ConfigError::InvalidValue {
                    key: path.display().to_string(),
                    message: format!("expected a JSON object, found {}", json_kind(&other)),
                });
            }
        };

        Ok(Self { path, data })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn lookup(&self, key: &str) -> Option<&Value> {
        let mut parts = key.split('.');
        let first = parts.next()?;
        parts.try_fold(self.data.get(first)?, |current, part| current.get(part))
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn collect_keys(prefix: &str, value: &Value, out: &mut Vec<String>) {
    match value {
        Value::Object(map) => {
            for (k, v) in map {
                collect_keys(&format!("{}.{}", prefix, k), v, out);
            }
        }
        _ => out.push(prefix.to_string()),
    }
}

impl ConfigProvider for FileConfigProvider {
    fn name(&self) -> &str {
        "file"
    }

    fn get_raw(&self, key: &str) -> ConfigResult<Option<String>> {
        match self.lookup(key) {
            Some(Value::String(s)) => Ok(Some(s.clone())),
            Some(v) => Ok(Some(v.to_string())),
            None => Ok(None),
        }
    }

    fn list_keys(&self, prefix: &str) -> ConfigResult<Vec<String>> {
        let mut keys = Vec::new();
        for (k, v) in &self.data {
            collect_keys(k, v, &mut keys);
        }
        keys.retain(|k| k.starts_with(prefix));
        keys.sort();
        Ok(keys)
    }
}

impl std::fmt::Debug for FileConfigProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileConfigProvider")
            .field("path", &self.path)
            .field("keys", &self.data.len())
            .finish()
    }
}
