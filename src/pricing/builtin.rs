//! Demo price list. Cached-input rates are simulated at 10% of input.

use super::model::ModelPricing;
use super::table::PricingTableBuilder;
use super::{DEFAULT_MODEL, DEFAULT_PROVIDER};

pub(super) const GROQ_MODELS: [(&str, ModelPricing); 5] = [
    ("llama-3.1-70b-versatile", ModelPricing::new(0.27, 0.27, 0.027)),
    ("llama-3.1-8b-instant", ModelPricing::new(0.05, 0.05, 0.005)),
    ("mixtral-8x7b-32768", ModelPricing::new(0.24, 0.24, 0.024)),
    ("gemma-7b-it", ModelPricing::new(0.07, 0.07, 0.007)),
    ("llama-3.3-70b-versatile", ModelPricing::new(0.27, 0.27, 0.027)),
];

pub(super) fn register_all(builder: PricingTableBuilder) -> PricingTableBuilder {
    let builder = GROQ_MODELS
        .iter()
        .fold(builder, |builder, (name, pricing)| {
            builder.model(DEFAULT_PROVIDER, *name, *pricing)
        });

    builder
        .default_model(DEFAULT_PROVIDER, DEFAULT_MODEL)
        .default_provider(DEFAULT_PROVIDER)
}

pub(super) fn default_pricing() -> ModelPricing {
    GROQ_MODELS[0].1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_entries_are_valid() {
        for (name, pricing) in GROQ_MODELS {
            assert!(pricing.validate().is_ok(), "{} has invalid pricing", name);
        }
    }

    #[test]
    fn test_default_pricing_is_default_model() {
        assert_eq!(GROQ_MODELS[0].0, DEFAULT_MODEL);
        assert_eq!(default_pricing().input_per_mtok, 0.27);
    }
}
