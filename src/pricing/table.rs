//! Provider/model pricing table with explicit fallback resolution.
//!
//! Lookups never fail: an unknown model resolves to its provider's default
//! model, and an unknown provider resolves to the default provider. The
//! [`PriceResolution`] returned alongside the rates says which path was taken.

use std::collections::HashMap;
use std::sync::LazyLock;

use serde::{Deserialize, Serialize};

use super::builtin;
use super::model::ModelPricing;
use super::{CACHE_READ_DISCOUNT, DEFAULT_MODEL, DEFAULT_PROVIDER, ENV_PREFIX};
use crate::config::{ConfigProvider, ConfigProviderExt, EnvConfigProvider};
use crate::{Error, Result};

/// How a `(provider, model)` pair was matched to a pricing entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PriceResolution {
    Exact,
    /// Provider known, model not: priced as the provider's default model.
    ModelFallback,
    /// Provider not known: priced as the default provider's default model.
    ProviderFallback,
}

impl PriceResolution {
    pub fn is_fallback(&self) -> bool {
        !matches!(self, Self::Exact)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct ResolvedPrice<'a> {
    pub provider: &'a str,
    pub model: &'a str,
    pub pricing: &'a ModelPricing,
    pub resolution: PriceResolution,
}

#[derive(Debug, Clone)]
struct ProviderPricing {
    models: HashMap<String, ModelPricing>,
    default_model: String,
    default_pricing: ModelPricing,
}

#[derive(Debug, Clone)]
struct DefaultEntry {
    provider: String,
    model: String,
    pricing: ModelPricing,
}

#[derive(Debug, Clone)]
pub struct PricingTable {
    providers: HashMap<String, ProviderPricing>,
    default: DefaultEntry,
}

impl PricingTable {
    pub fn builder() -> PricingTableBuilder {
        PricingTableBuilder::new()
    }

    /// The built-in demo price list, without configuration overrides.
    pub fn builtin() -> Self {
        let models: HashMap<String, ModelPricing> = builtin::GROQ_MODELS
            .iter()
            .map(|(name, pricing)| (name.to_string(), *pricing))
            .collect();
        let default_pricing = builtin::default_pricing();

        let mut providers = HashMap::new();
        providers.insert(
            DEFAULT_PROVIDER.to_string(),
            ProviderPricing {
                models,
                default_model: DEFAULT_MODEL.to_string(),
                default_pricing,
            },
        );

        Self {
            providers,
            default: DefaultEntry {
                provider: DEFAULT_PROVIDER.to_string(),
                model: DEFAULT_MODEL.to_string(),
                pricing: default_pricing,
            },
        }
    }

    /// Exact lookup, no fallback.
    pub fn get(&self, provider: &str, model: &str) -> Option<&ModelPricing> {
        self.providers
            .get(provider.to_ascii_lowercase().as_str())?
            .models
            .get(model)
    }

    pub fn resolve(&self, provider: &str, model: &str) -> ResolvedPrice<'_> {
        let provider_key = provider.to_ascii_lowercase();

        let Some((provider_name, entry)) = self.providers.get_key_value(provider_key.as_str())
        else {
            tracing::debug!(
                provider,
                model,
                fallback_provider = %self.default.provider,
                fallback_model = %self.default.model,
                "unknown provider, using default pricing"
            );
            return ResolvedPrice {
                provider: &self.default.provider,
                model: &self.default.model,
                pricing: &self.default.pricing,
                resolution: PriceResolution::ProviderFallback,
            };
        };

        if let Some((model_name, pricing)) = entry.models.get_key_value(model) {
            return ResolvedPrice {
                provider: provider_name,
                model: model_name,
                pricing,
                resolution: PriceResolution::Exact,
            };
        }

        tracing::debug!(
            provider,
            model,
            fallback_model = %entry.default_model,
            "unknown model, using provider default pricing"
        );
        ResolvedPrice {
            provider: provider_name,
            model: &entry.default_model,
            pricing: &entry.default_pricing,
            resolution: PriceResolution::ModelFallback,
        }
    }

    pub fn default_provider(&self) -> &str {
        &self.default.provider
    }

    pub fn default_model(&self, provider: &str) -> Option<&str> {
        self.providers
            .get(provider.to_ascii_lowercase().as_str())
            .map(|entry| entry.default_model.as_str())
    }

    pub fn providers(&self) -> impl Iterator<Item = &str> {
        self.providers.keys().map(String::as_str)
    }

    pub fn models(&self, provider: &str) -> Vec<(&str, &ModelPricing)> {
        let mut models: Vec<_> = self
            .providers
            .get(provider.to_ascii_lowercase().as_str())
            .map(|entry| {
                entry
                    .models
                    .iter()
                    .map(|(name, pricing)| (name.as_str(), pricing))
                    .collect()
            })
            .unwrap_or_default();
        models.sort_by(|a, b| a.0.cmp(b.0));
        models
    }

    pub fn len(&self) -> usize {
        self.providers.values().map(|entry| entry.models.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for PricingTable {
    fn default() -> Self {
        global_pricing_table().clone()
    }
}

#[derive(Debug, Clone)]
struct Entry {
    provider: String,
    model: String,
    pricing: ModelPricing,
}

#[derive(Debug, Default)]
pub struct PricingTableBuilder {
    entries: Vec<Entry>,
    default_models: HashMap<String, String>,
    default_provider: Option<String>,
}

impl PricingTableBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_defaults(self) -> Self {
        builtin::register_all(self)
    }

    /// Adds or replaces a pricing entry. The first model registered for a
    /// provider becomes its default unless [`Self::default_model`] says otherwise.
    pub fn model(
        mut self,
        provider: impl Into<String>,
        name: impl Into<String>,
        pricing: ModelPricing,
    ) -> Self {
        let provider = provider.into().to_ascii_lowercase();
        let model = name.into();

        match self
            .entries
            .iter_mut()
            .find(|e| e.provider == provider && e.model == model)
        {
            Some(existing) => existing.pricing = pricing,
            None => self.entries.push(Entry {
                provider,
                model,
                pricing,
            }),
        }
        self
    }

    pub fn model_base(
        self,
        provider: impl Into<String>,
        name: impl Into<String>,
        input: f64,
        output: f64,
    ) -> Self {
        self.model(provider, name, ModelPricing::from_base(input, output))
    }

    pub fn default_model(mut self, provider: impl Into<String>, model: impl Into<String>) -> Self {
        self.default_models
            .insert(provider.into().to_ascii_lowercase(), model.into());
        self
    }

    pub fn default_provider(mut self, provider: impl Into<String>) -> Self {
        self.default_provider = Some(provider.into().to_ascii_lowercase());
        self
    }

    /// Built-in prices with overrides from `PROMPT_COST_PRICING_<MODEL>_<CLASS>`
    /// environment variables.
    pub fn from_env(self) -> Self {
        self.with_defaults()
            .overrides(&EnvConfigProvider::prefixed(ENV_PREFIX))
    }

    /// Applies `pricing.<model>.{input,output,cached}` overrides to every
    /// registered entry. Input and output must both be present for an override
    /// to apply; the cached rate defaults to 10% of input. Overrides that break
    /// the pricing invariants are skipped with a warning.
    pub fn overrides(mut self, config: &dyn ConfigProvider) -> Self {
        for entry in &mut self.entries {
            let Some(pricing) = read_override(config, &entry.model) else {
                continue;
            };
            match pricing.validate() {
                Ok(()) => {
                    tracing::debug!(
                        source = config.name(),
                        provider = %entry.provider,
                        model = %entry.model,
                        "applied pricing override"
                    );
                    entry.pricing = pricing;
                }
                Err(reason) => {
                    tracing::warn!(
                        source = config.name(),
                        provider = %entry.provider,
                        model = %entry.model,
                        %reason,
                        "rejected pricing override"
                    );
                }
            }
        }
        self
    }

    pub fn build(self) -> Result<PricingTable> {
        let mut providers: HashMap<String, ProviderPricing> = HashMap::new();
        let mut first_models: Vec<(String, String)> = Vec::new();

        for Entry {
            provider,
            model,
            pricing,
        } in self.entries
        {
            pricing.validate().map_err(|message| Error::InvalidPricing {
                provider: provider.clone(),
                model: model.clone(),
                message,
            })?;

            if !first_models.iter().any(|(p, _)| *p == provider) {
                first_models.push((provider.clone(), model.clone()));
            }

            providers
                .entry(provider)
                .or_insert_with(|| ProviderPricing {
                    models: HashMap::new(),
                    default_model: String::new(),
                    default_pricing: pricing,
                })
                .models
                .insert(model, pricing);
        }

        for (provider, first_model) in &first_models {
            let default_model = self
                .default_models
                .get(provider)
                .unwrap_or(first_model)
                .clone();
            let Some(entry) = providers.get_mut(provider) else {
                continue;
            };
            let Some(pricing) = entry.models.get(&default_model).copied() else {
                return Err(Error::InvalidPricing {
                    provider: provider.clone(),
                    model: default_model,
                    message: "default model has no pricing entry".into(),
                });
            };
            entry.default_model = default_model;
            entry.default_pricing = pricing;
        }

        let Some((first_provider, _)) = first_models.first() else {
            return Err(Error::InvalidPricing {
                provider: String::new(),
                model: String::new(),
                message: "pricing table has no entries".into(),
            });
        };
        let default_provider = self
            .default_provider
            .unwrap_or_else(|| first_provider.clone());
        let Some(entry) = providers.get(&default_provider) else {
            return Err(Error::InvalidPricing {
                provider: default_provider,
                model: String::new(),
                message: "default provider has no pricing entries".into(),
            });
        };

        let default = DefaultEntry {
            model: entry.default_model.clone(),
            pricing: entry.default_pricing,
            provider: default_provider,
        };

        Ok(PricingTable { providers, default })
    }
}

/// `llama-3.1-70b` becomes `llama_3_1_70b` so it survives dotted config keys
/// and environment variable names.
pub fn config_segment(model: &str) -> String {
    model
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c.to_ascii_lowercase() } else { '_' })
        .collect()
}

fn read_override(config: &dyn ConfigProvider, model: &str) -> Option<ModelPricing> {
    let segment = config_segment(model);
    let rate = |class: &str| -> Option<f64> {
        let key = format!("pricing.{}.{}", segment, class);
        match config.get::<f64>(&key) {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!(key = %key, error = %e, "ignoring unreadable pricing override");
                None
            }
        }
    };

    let input = rate("input")?;
    let output = rate("output")?;
    let cached = rate("cached").unwrap_or(input * CACHE_READ_DISCOUNT);
    Some(ModelPricing::new(input, output, cached))
}

static GLOBAL_PRICING: LazyLock<PricingTable> = LazyLock::new(|| {
    PricingTableBuilder::new()
        .from_env()
        .build()
        .unwrap_or_else(|e| {
            tracing::warn!(error = %e, "pricing configuration invalid, using built-in prices");
            PricingTable::builtin()
        })
});

pub fn global_pricing_table() -> &'static PricingTable {
    &GLOBAL_PRICING
}
