//! Demo settings resolved from any [`ConfigProvider`].
//!
//! | key                                | default                    |
//! |------------------------------------|----------------------------|
//! | `settings.provider`                | `groq`                     |
//! | `settings.model`                   | `llama-3.1-70b-versatile`  |
//! | `settings.caching`                 | `true`                     |
//! | `settings.questions`               | `3` (1..=10)               |
//! | `projection.daily_users`           | `1000`                     |
//! | `projection.avg_document_tokens`   | `30000`                    |
//! | `projection.avg_questions_per_user`| `10`                       |
//! | `projection.days_per_month`        | `30`                       |

use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};

use super::provider::{ConfigProvider, ConfigProviderExt};
use super::{ConfigError, ConfigResult, ValidationErrors};
use crate::pricing::{DEFAULT_MODEL, DEFAULT_PROVIDER};
use crate::projection::ProjectionScenario;

pub const QUESTIONS_RANGE: RangeInclusive<u32> = 1..=10;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectionDefaults {
    pub daily_users: u64,
    pub avg_document_tokens: u64,
    pub avg_questions_per_user: u64,
    pub days_per_month: u64,
}

impl Default for ProjectionDefaults {
    fn default() -> Self {
        Self {
            daily_users: 1_000,
            avg_document_tokens: 30_000,
            avg_questions_per_user: 10,
            days_per_month: 30,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    pub provider: String,
    pub model: String,
    pub caching: bool,
    /// Questions asked per caching run.
    pub questions: u32,
    pub projection: ProjectionDefaults,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            provider: DEFAULT_PROVIDER.to_string(),
            model: DEFAULT_MODEL.to_string(),
            caching: true,
            questions: 3,
            projection: ProjectionDefaults::default(),
        }
    }
}

impl Settings {
    /// Reads every known key from `config`, keeping defaults for absent keys,
    /// and reports all invalid values at once.
    pub fn load(config: &dyn ConfigProvider) -> ConfigResult<Self> {
        let mut settings = Self::default();
        let mut errors = Vec::new();

        if let Some(provider) = collect(&mut errors, config.get_string("settings.provider")) {
            settings.provider = provider;
        }
        if let Some(model) = collect(&mut errors, config.get_string("settings.model")) {
            settings.model = model;
        }
        if let Some(caching) = collect(&mut errors, config.get::<bool>("settings.caching")) {
            settings.caching = caching;
        }
        if let Some(questions) = collect(&mut errors, config.get::<u32>("settings.questions")) {
            settings.questions = questions;
        }

        let projection = &mut settings.projection;
        for (key, slot) in [
            ("projection.daily_users", &mut projection.daily_users),
            ("projection.avg_document_tokens", &mut projection.avg_document_tokens),
            ("projection.avg_questions_per_user", &mut projection.avg_questions_per_user),
            ("projection.days_per_month", &mut projection.days_per_month),
        ] {
            if let Some(value) = collect(&mut errors, config.get::<u64>(key)) {
                *slot = value;
            }
        }

        errors.extend(settings.validation_errors());
        if !errors.is_empty() {
            return Err(ConfigError::Rejected(ValidationErrors(errors)));
        }

        tracing::debug!(
            source = config.name(),
            provider = %settings.provider,
            model = %settings.model,
            caching = settings.caching,
            "settings loaded"
        );
        Ok(settings)
    }

    pub fn validate(&self) -> ConfigResult<()> {
        let errors = self.validation_errors();
        if errors.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Rejected(ValidationErrors(errors)))
        }
    }

    fn validation_errors(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();

        if self.provider.trim().is_empty() {
            errors.push(invalid("settings.provider", "must not be empty"));
        }
        if self.model.trim().is_empty() {
            errors.push(invalid("settings.model", "must not be empty"));
        }
        if !QUESTIONS_RANGE.contains(&self.questions) {
            errors.push(invalid(
                "settings.questions",
                format!(
                    "{} is outside {}..={}",
                    self.questions,
                    QUESTIONS_RANGE.start(),
                    QUESTIONS_RANGE.end()
                ),
            ));
        }

        let p = &self.projection;
        for (key, value) in [
            ("projection.daily_users", p.daily_users),
            ("projection.avg_document_tokens", p.avg_document_tokens),
            ("projection.avg_questions_per_user", p.avg_questions_per_user),
            ("projection.days_per_month", p.days_per_month),
        ] {
            if value == 0 {
                errors.push(invalid(key, "must be greater than zero"));
            }
        }

        errors
    }

    pub fn scenario(&self) -> crate::Result<ProjectionScenario> {
        let p = &self.projection;
        ProjectionScenario::new(
            p.daily_users,
            p.avg_document_tokens,
            p.avg_questions_per_user,
            p.days_per_month,
            self.caching,
        )
    }
}

fn collect<T>(errors: &mut Vec<ConfigError>, result: ConfigResult<Option<T>>) -> Option<T> {
    match result {
        Ok(value) => value,
        Err(e) => {
            errors.push(e);
            None
        }
    }
}

fn invalid(key: &str, message: impl Into<String>) -> ConfigError {
    ConfigError::InvalidValue {
        key: key.to_string(),
        message: message.into(),
    }
}
