use serde::{Deserialize, Serialize};

use super::usage::TokenUsage;
use crate::pricing::{ModelPricing, PriceResolution, PricingTable, ResolvedPrice, global_pricing_table};

/// Cost of one request split by token class. Amounts are unrounded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostBreakdown {
    pub input_cost: f64,
    pub cached_cost: f64,
    pub output_cost: f64,
    pub total_cost: f64,
    /// Model whose rates were applied; differs from the requested model on fallback.
    pub priced_model: String,
    pub resolution: PriceResolution,
}

impl CostBreakdown {
    fn compute(pricing: &ModelPricing, usage: &TokenUsage) -> (f64, f64, f64, f64) {
        let input_cost = pricing.input_cost(usage.non_cached_input() as f64);
        let cached_cost = pricing.cached_cost(usage.cached_tokens() as f64);
        let output_cost = pricing.output_cost(usage.output_tokens() as f64);
        (
            input_cost,
            cached_cost,
            output_cost,
            input_cost + cached_cost + output_cost,
        )
    }

    fn from_resolved(resolved: ResolvedPrice<'_>, usage: &TokenUsage) -> Self {
        let (input_cost, cached_cost, output_cost, total_cost) =
            Self::compute(resolved.pricing, usage);
        Self {
            input_cost,
            cached_cost,
            output_cost,
            total_cost,
            priced_model: resolved.model.to_string(),
            resolution: resolved.resolution,
        }
    }

    pub fn is_fallback(&self) -> bool {
        self.resolution.is_fallback()
    }
}

/// Prices token usage against a pricing table.
#[derive(Debug, Clone, Copy)]
pub struct Accountant<'a> {
    pricing: &'a PricingTable,
}

impl Accountant<'static> {
    /// Accountant over the process-wide table.
    pub fn global() -> Self {
        Self::new(global_pricing_table())
    }
}

impl<'a> Accountant<'a> {
    pub fn new(pricing: &'a PricingTable) -> Self {
        Self { pricing }
    }

    pub fn pricing(&self) -> &'a PricingTable {
        self.pricing
    }

    /// Unknown models and providers are priced through the table's fallback;
    /// this never fails.
    pub fn calculate_cost(&self, usage: &TokenUsage, provider: &str, model: &str) -> CostBreakdown {
        let resolved = self.pricing.resolve(provider, model);
        let breakdown = CostBreakdown::from_resolved(resolved, usage);
        tracing::trace!(
            provider,
            model,
            priced_model = %breakdown.priced_model,
            input_tokens = usage.input_tokens(),
            cached_tokens = usage.cached_tokens(),
            output_tokens = usage.output_tokens(),
            total_cost = breakdown.total_cost,
            "request priced"
        );
        breakdown
    }
}

/// [`Accountant::calculate_cost`] against the global table.
pub fn calculate_cost(usage: &TokenUsage, provider: &str, model: &str) -> CostBreakdown {
    Accountant::global().calculate_cost(usage, provider, model)
}
