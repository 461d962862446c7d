//! Configuration Provider Trait

use serde::de::DeserializeOwned;

use super::ConfigResult;

/// Read-only source of configuration values keyed by dotted paths.
pub trait ConfigProvider: Send + Sync {
    /// Provider name for logging
    fn name(&self) -> &str;

    /// Get a raw configuration value
    fn get_raw(&self, key: &str) -> ConfigResult<Option<String>>;

    /// List keys matching a prefix
    fn list_keys(&self, prefix: &str) -> ConfigResult<Vec<String>>;
}

/// Extension methods for typed configuration access
pub trait ConfigProviderExt: ConfigProvider {
    /// Get a value parsed as JSON (`"0.27"`, `"true"`, `"[1,2]"`).
    fn get<T: DeserializeOwned>(&self, key: &str) -> ConfigResult<Option<T>> {
        match self.get_raw(key)? {
            Some(raw) => {
                let value: T = serde_json::from_str(raw.trim()).map_err(|e| {
                    super::ConfigError::InvalidValue {
                        key: key.to_string(),
                        message: e.to_string(),
                    }
                })?;
                Ok(Some(value))
            }
            None => Ok(None),
        }
    }

    /// Get a value as an unparsed string.
    fn get_string(&self, key: &str) -> ConfigResult<Option<String>> {
        self.get_raw(key)
    }
}

impl<P: ConfigProvider + ?Sized> ConfigProviderExt for P {}
