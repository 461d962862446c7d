//! Accounting and Projection Tests
//!
//! End-to-end checks of pricing resolution, per-request cost, savings helpers,
//! monthly projections and configuration-driven pricing.
//!
//! Run: cargo nextest run --test accounting_tests

use prompt_cost::{PricingTable, TokenUsage};

const DEFAULT_MODEL: &str = "llama-3.1-70b-versatile";

fn table() -> PricingTable {
    PricingTable::builtin()
}

// =============================================================================
// Pricing table
// =============================================================================

mod pricing_tests {
    use super::*;
    use prompt_cost::{ModelPricing, PriceResolution};

    #[test]
    fn test_builtin_models_keep_cached_below_input() {
        let table = table();
        let models = table.models("groq");
        assert_eq!(models.len(), 5);
        for (name, pricing) in models {
            assert!(
                pricing.cached_input_per_mtok <= pricing.input_per_mtok,
                "{name} has a cached rate above its input rate"
            );
        }
    }

    #[test]
    fn test_provider_lookup_is_case_insensitive() {
        let table = table();
        let resolved = table.resolve("GROQ", "llama-3.1-8b-instant");
        assert_eq!(resolved.resolution, PriceResolution::Exact);
        assert_eq!(resolved.pricing, &ModelPricing::new(0.05, 0.05, 0.005));
    }

    #[test]
    fn test_unknown_provider_falls_back_to_default() {
        let table = table();
        let resolved = table.resolve("nowhere", "anything");
        assert_eq!(resolved.resolution, PriceResolution::ProviderFallback);
        assert_eq!(resolved.provider, "groq");
        assert_eq!(resolved.model, DEFAULT_MODEL);
    }

    #[test]
    fn test_custom_table() {
        let table = PricingTable::builder()
            .model("acme", "small", ModelPricing::new(1.0, 2.0, 0.25))
            .model_base("acme", "large", 4.0, 8.0)
            .default_provider("acme")
            .build()
            .unwrap();

        assert_eq!(table.default_provider(), "acme");
        assert_eq!(table.default_model("acme"), Some("small"));
        let large = table.get("acme", "large").unwrap();
        assert!((large.cached_input_per_mtok - 0.4).abs() < 1e-12);
    }

    #[test]
    fn test_invalid_entry_rejected() {
        let err = PricingTable::builder()
            .model("acme", "broken", ModelPricing::new(1.0, 1.0, 2.0))
            .build()
            .unwrap_err();
        assert!(err.is_configuration_error());
    }
}

// =============================================================================
// Per-request cost
// =============================================================================

mod cost_tests {
    use super::*;
    use prompt_cost::Accountant;

    #[test]
    fn test_total_is_sum_of_parts() {
        let table = table();
        let accountant = Accountant::new(&table);
        for (input, output, cached) in [(0, 0, 0), (1, 1, 1), (5_000, 200, 4_498), (123_456, 789, 100_000)] {
            let cost = accountant.calculate_cost(&TokenUsage::new(input, output, cached), "groq", DEFAULT_MODEL);
            assert_eq!(cost.total_cost, cost.input_cost + cost.cached_cost + cost.output_cost);
            assert!(cost.total_cost >= 0.0);
        }
    }

    #[test]
    fn test_cached_tokens_never_cost_more_than_fresh() {
        let table = table();
        let accountant = Accountant::new(&table);
        for (name, _) in table.models("groq") {
            let fresh = accountant.calculate_cost(&TokenUsage::uncached(10_000, 0), "groq", name);
            let cached = accountant.calculate_cost(&TokenUsage::new(10_000, 0, 10_000), "groq", name);
            assert!(cached.total_cost <= fresh.total_cost, "{name}");
        }
    }

    #[test]
    fn test_unknown_model_priced_as_default() {
        let usage = TokenUsage::new(8_000, 300, 6_000);
        let fallback = prompt_cost::calculate_cost(&usage, "groq", "nonexistent-model");
        let default = prompt_cost::calculate_cost(&usage, "groq", DEFAULT_MODEL);
        assert_eq!(fallback.total_cost, default.total_cost);
        assert!(fallback.is_fallback());
    }

    #[test]
    fn test_cached_above_input_is_clamped() {
        let table = table();
        let usage = TokenUsage::new(100, 10, 500);
        assert_eq!(usage.cached_tokens(), 100);
        let cost = Accountant::new(&table).calculate_cost(&usage, "groq", DEFAULT_MODEL);
        assert_eq!(cost.input_cost, 0.0);
    }

    #[test]
    fn test_cost_breakdown_serializes() {
        let usage = TokenUsage::new(5_000, 200, 4_498);
        let cost = prompt_cost::calculate_cost(&usage, "groq", DEFAULT_MODEL);
        let json = serde_json::to_value(&cost).unwrap();
        assert_eq!(json["priced_model"], DEFAULT_MODEL);
        assert_eq!(json["resolution"], "exact");
    }
}

// =============================================================================
// Savings helpers
// =============================================================================

mod savings_tests {
    use prompt_cost::{calculate_cache_savings, calculate_savings};

    #[test]
    fn test_zero_original_savings() {
        assert_eq!(calculate_savings(0.0, 0.0).percentage, 0.0);
        assert_eq!(calculate_savings(0.0, 5.0).percentage, 0.0);
    }

    #[test]
    fn test_cache_savings_grow_with_requests() {
        let few = calculate_cache_savings(0.001, 0.0002, 2);
        let many = calculate_cache_savings(0.001, 0.0002, 20);
        assert!(many.savings_percentage > few.savings_percentage);
        assert!(many.savings_percentage < 100.0);
    }
}

// =============================================================================
// Projection
// =============================================================================

mod projection_tests {
    use super::*;
    use prompt_cost::{ModelPricing, ProjectionScenario, Projector, project_monthly_cost};

    #[test]
    fn test_reference_scenario_baseline() {
        let scenario = ProjectionScenario::new(1_000, 30_000, 10, 30, true).unwrap();
        let result = project_monthly_cost(&scenario, &table(), "groq", DEFAULT_MODEL);

        assert!((result.monthly_cost_baseline - 2_430.0).abs() < 1e-9);
        assert!(result.monthly_cost_optimized < result.monthly_cost_baseline);
        assert!(result.savings_percentage > 0.0);
        assert!(result.savings_percentage <= 100.0);
        assert!((result.annual_cost_baseline - 29_160.0).abs() < 1e-6);
    }

    #[test]
    fn test_hand_entered_rates_match_table() {
        let scenario = ProjectionScenario::new(250, 12_000, 4, 22, true).unwrap();
        let from_table = Projector::new(&table(), "groq", DEFAULT_MODEL).project(&scenario);
        let by_hand = Projector::with_pricing(ModelPricing::new(0.27, 0.27, 0.027)).project(&scenario);
        assert_eq!(from_table, by_hand);
    }

    #[test]
    fn test_toggling_caching() {
        let scenario = ProjectionScenario::new(100, 5_000, 5, 30, true).unwrap();
        let projector = Projector::new(&table(), "groq", DEFAULT_MODEL);
        let with_cache = projector.project(&scenario);
        let without_cache = projector.project(&scenario.with_caching(false));

        assert_eq!(without_cache.monthly_cost_optimized, without_cache.monthly_cost_baseline);
        assert_eq!(with_cache.monthly_cost_baseline, without_cache.monthly_cost_baseline);
        assert!(with_cache.monthly_savings > without_cache.monthly_savings);
    }

    #[test]
    fn test_zero_users_rejected() {
        let err = ProjectionScenario::new(0, 30_000, 10, 30, true).unwrap_err();
        assert!(err.is_input_error());
    }

    #[test]
    fn test_result_serializes() {
        let scenario = ProjectionScenario::new(1, 1_000, 2, 1, true).unwrap();
        let result = Projector::global("groq", DEFAULT_MODEL).project(&scenario);
        let json = serde_json::to_string(&result).unwrap();
        assert!(json.contains("monthly_cost_baseline"));
        assert!(json.contains("total_tokens_optimized"));
    }
}

// =============================================================================
// Configuration
// =============================================================================

mod config_tests {
    use super::*;
    use prompt_cost::config::{FileConfigProvider, MemoryConfigProvider};
    use prompt_cost::{Accountant, ConfigBuilder, PricingTableBuilder, Settings};
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_pricing_override_from_memory() {
        let overrides = MemoryConfigProvider::new()
            .value("pricing.llama_3_1_70b_versatile.input", "0.5")
            .value("pricing.llama_3_1_70b_versatile.output", "0.6");
        let table = PricingTableBuilder::new()
            .with_defaults()
            .overrides(&overrides)
            .build()
            .unwrap();

        let pricing = table.get("groq", DEFAULT_MODEL).unwrap();
        assert_eq!(pricing.input_per_mtok, 0.5);
        assert_eq!(pricing.output_per_mtok, 0.6);
        assert!((pricing.cached_input_per_mtok - 0.05).abs() < 1e-12);

        let cost = Accountant::new(&table)
            .calculate_cost(&TokenUsage::uncached(1_000_000, 0), "groq", DEFAULT_MODEL);
        assert_eq!(cost.total_cost, 0.5);
    }

    #[test]
    fn test_settings_from_file_and_memory() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"settings": {{"model": "llama-3.1-8b-instant", "questions": 5}},
                "projection": {{"daily_users": 200}}}}"#
        )
        .unwrap();

        let config = ConfigBuilder::new()
            .memory(MemoryConfigProvider::new().value("settings.caching", "false"))
            .provider(Box::new(FileConfigProvider::load(file.path()).unwrap()))
            .build();
        let settings = Settings::load(&config).unwrap();

        assert_eq!(settings.model, "llama-3.1-8b-instant");
        assert_eq!(settings.questions, 5);
        assert!(!settings.caching);

        let scenario = settings.scenario().unwrap();
        assert_eq!(scenario.daily_users(), 200);
        assert!(!scenario.caching());
    }

    #[test]
    fn test_invalid_settings_reported_together() {
        let config = MemoryConfigProvider::new()
            .value("settings.questions", "0")
            .value("projection.days_per_month", "0");
        let err = Settings::load(&config).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("settings.questions"));
        assert!(message.contains("projection.days_per_month"));
    }
}
