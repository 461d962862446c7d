//! Pluggable configuration provider system.
//!
//! ```rust,no_run
//! use prompt_cost::config::{ConfigBuilder, Settings};
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ConfigBuilder::new()
//!     .env_with_prefix("PROMPT_COST_")
//!     .file("prompt-cost.json")?
//!     .build();
//! let settings = Settings::load(&config)?;
//! # Ok(())
//! # }
//! ```

pub mod composite;
pub mod env;
pub mod file;
pub mod memory;
pub mod provider;
pub mod settings;

pub use composite::CompositeConfigProvider;
pub use env::EnvConfigProvider;
pub use file::FileConfigProvider;
pub use memory::MemoryConfigProvider;
pub use provider::{ConfigProvider, ConfigProviderExt};
pub use settings::{ProjectionDefaults, QUESTIONS_RANGE, Settings};

use thiserror::Error;

/// Failure to read or interpret a configuration source.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("{key}: {message}")]
    InvalidValue { key: String, message: String },

    #[error("malformed configuration: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("cannot read configuration: {0}")]
    Io(#[from] std::io::Error),

    /// The variable exists but is not valid unicode.
    #[error("environment variable {var} is not unicode")]
    NotUnicode { var: String },

    #[error("{0}")]
    Rejected(ValidationErrors),
}

/// Every problem found while validating settings, reported together.
#[derive(Debug)]
pub struct ValidationErrors(pub Vec<ConfigError>);

impl ValidationErrors {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl std::fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("invalid settings: ")?;
        for (i, err) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{err}")?;
        }
        Ok(())
    }
}

pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Collects providers in priority order, highest first.
pub struct ConfigBuilder {
    providers: Vec<Box<dyn ConfigProvider>>,
}

impl ConfigBuilder {
    pub fn new() -> Self {
        Self {
            providers: Vec::new(),
        }
    }

    pub fn env(mut self) -> Self {
        self.providers.push(Box::new(EnvConfigProvider::new()));
        self
    }

    pub fn env_with_prefix(mut self, prefix: &str) -> Self {
        self.providers
            .push(Box::new(EnvConfigProvider::prefixed(prefix)));
        self
    }

    /// Adds a JSON settings file. A missing file contributes nothing.
    pub fn file(mut self, path: impl AsRef<std::path::Path>) -> ConfigResult<Self> {
        self.providers.push(Box::new(FileConfigProvider::load(path)?));
        Ok(self)
    }

    pub fn memory(mut self, provider: MemoryConfigProvider) -> Self {
        self.providers.push(Box::new(provider));
        self
    }

    pub fn provider(mut self, provider: Box<dyn ConfigProvider>) -> Self {
        self.providers.push(provider);
        self
    }

    pub fn build(self) -> CompositeConfigProvider {
        self.providers
            .into_iter()
            .fold(CompositeConfigProvider::new(), CompositeConfigProvider::provider)
    }
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
