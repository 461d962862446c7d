//! In-Memory Configuration Provider
//!
//! Useful for testing and code-defined configuration.

use std::collections::HashMap;

use super::ConfigResult;
use super::provider::ConfigProvider;

#[derive(Debug, Clone)]
pub struct MemoryConfigProvider {
    data: HashMap<String, String>,
    name: String,
}

impl MemoryConfigProvider {
    pub fn new() -> Self {
        Self::named("memory")
    }

    pub fn named(name: impl Into<String>) -> Self {
        Self {
            data: HashMap::new(),
            name: name.into(),
        }
    }

    pub fn from_data(data: HashMap<String, String>) -> Self {
        Self {
            data,
            name: "memory".to_string(),
        }
    }

    /// Builder-style insert.
    pub fn value(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.data.insert(key.into(), value.into());
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.data.insert(key.into(), value.into());
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

impl Default for MemoryConfigProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigProvider for MemoryConfigProvider {
    fn name(&self) -> &str {
        &self.name
    }

    fn get_raw(&self, key: &str) -> ConfigResult<Option<String>> {
        Ok(self.data.get(key).cloned())
    }

    fn list_keys(&self, prefix: &str) -> ConfigResult<Vec<String>> {
        let mut keys: Vec<String> = self
            .data
            .keys()
            .filter(|k| k.starts_with(prefix))
            .cloned()
            .collect();
        keys.sort();
        Ok(keys)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigProviderExt;

    #[test]
    fn test_memory_provider_typed_get() {
        let provider = MemoryConfigProvider::new()
            .value("projection.daily_users", "1000")
            .value("settings.caching", "true");

        assert_eq!(provider.get::<u64>("projection.daily_users").unwrap(), Some(1000));
        assert_eq!(provider.get::<bool>("settings.caching").unwrap(), Some(true));
        assert_eq!(provider.get::<u64>("missing").unwrap(), None);
    }

    #[test]
    fn test_memory_provider_invalid_value() {
        let provider = MemoryConfigProvider::new().value("projection.daily_users", "lots");
        assert!(provider.get::<u64>("projection.daily_users").is_err());
    }

    #[test]
    fn test_memory_provider_list_keys() {
        let mut provider = MemoryConfigProvider::named("test");
        provider.insert("pricing.a.input", "1");
        provider.insert("pricing.b.input", "2");
        provider.insert("settings.model", "x");

        assert_eq!(provider.name(), "test");
        assert_eq!(provider.len(), 3);
        assert_eq!(
            provider.list_keys("pricing.").unwrap(),
            vec!["pricing.a.input".to_string(), "pricing.b.input".to_string()]
        );
    }
}
