//! Monthly and annual cost projection for a usage scenario.
//!
//! A session is one user uploading a document of `avg_document_tokens` and
//! asking `avg_questions_per_user` questions about it. Without caching every
//! question resends the whole document. With caching the first question pays
//! for the document and each later one sends a tenth of it. The optimized
//! figure prices *all* optimized tokens at the cached rate, including the
//! first request; this is an intentional approximation and understates the
//! optimized cost.

mod scenario;

use serde::{Deserialize, Serialize};

pub use scenario::ProjectionScenario;

use crate::accounting::percentage_of;
use crate::pricing::{CACHE_READ_DISCOUNT, ModelPricing, PriceResolution, PricingTable, global_pricing_table};

pub const MONTHS_PER_YEAR: f64 = 12.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProjectionResult {
    pub monthly_cost_baseline: f64,
    pub monthly_cost_optimized: f64,
    pub monthly_savings: f64,
    pub savings_percentage: f64,
    pub annual_savings: f64,
    pub annual_cost_baseline: f64,
    pub annual_cost_optimized: f64,
    pub total_tokens_baseline: f64,
    pub total_tokens_optimized: f64,
}

/// Projects a scenario with rates already in hand.
#[derive(Debug, Clone, PartialEq)]
pub struct Projector {
    pricing: ModelPricing,
    priced_model: Option<String>,
    resolution: PriceResolution,
}

impl Projector {
    /// Resolves `(provider, model)` once against `table`, with the same
    /// fallback rules as [`crate::Accountant::calculate_cost`].
    pub fn new(table: &PricingTable, provider: &str, model: &str) -> Self {
        let resolved = table.resolve(provider, model);
        Self {
            pricing: *resolved.pricing,
            priced_model: Some(resolved.model.to_string()),
            resolution: resolved.resolution,
        }
    }

    pub fn global(provider: &str, model: &str) -> Self {
        Self::new(global_pricing_table(), provider, model)
    }

    /// Rates entered by hand rather than looked up.
    pub fn with_pricing(pricing: ModelPricing) -> Self {
        Self {
            pricing,
            priced_model: None,
            resolution: PriceResolution::Exact,
        }
    }

    pub fn pricing(&self) -> &ModelPricing {
        &self.pricing
    }

    /// Table model whose rates are used; `None` for hand-entered rates.
    pub fn priced_model(&self) -> Option<&str> {
        self.priced_model.as_deref()
    }

    pub fn resolution(&self) -> PriceResolution {
        self.resolution
    }

    pub fn project(&self, scenario: &ProjectionScenario) -> ProjectionResult {
        let pricing = &self.pricing;
        let total_sessions = scenario.total_sessions();
        let doc = scenario.avg_document_tokens();
        let questions = scenario.avg_questions_per_user();

        let total_tokens_baseline = baseline_tokens(total_sessions, doc, questions);
        let monthly_cost_baseline = pricing.input_cost(total_tokens_baseline);

        let (total_tokens_optimized, monthly_cost_optimized) = if scenario.caching() {
            let first_request_tokens = doc as f64;
            let cached_request_tokens = doc as f64 * CACHE_READ_DISCOUNT;
            let tokens_per_session_optimized =
                first_request_tokens + (cached_request_tokens * (questions - 1) as f64);
            let total = total_sessions as f64 * tokens_per_session_optimized;
            (total, pricing.cached_cost(total))
        } else {
            (total_tokens_baseline, monthly_cost_baseline)
        };

        let monthly_savings = monthly_cost_baseline - monthly_cost_optimized;
        let result = ProjectionResult {
            monthly_cost_baseline,
            monthly_cost_optimized,
            monthly_savings,
            savings_percentage: percentage_of(monthly_savings, monthly_cost_baseline),
            annual_savings: monthly_savings * MONTHS_PER_YEAR,
            annual_cost_baseline: monthly_cost_baseline * MONTHS_PER_YEAR,
            annual_cost_optimized: monthly_cost_optimized * MONTHS_PER_YEAR,
            total_tokens_baseline,
            total_tokens_optimized,
        };

        tracing::debug!(
            %total_sessions,
            caching = scenario.caching(),
            monthly_cost_baseline = result.monthly_cost_baseline,
            monthly_cost_optimized = result.monthly_cost_optimized,
            savings_percentage = result.savings_percentage,
            "projection computed"
        );
        result
    }
}

/// Exact integer product while it fits in `u128`, then float arithmetic.
fn baseline_tokens(total_sessions: u128, doc: u64, questions: u64) -> f64 {
    (u128::from(doc) * u128::from(questions))
        .checked_mul(total_sessions)
        .map(|tokens| tokens as f64)
        .unwrap_or_else(|| total_sessions as f64 * (doc as f64 * questions as f64))
}

/// [`Projector::new`] followed by [`Projector::project`].
pub fn project_monthly_cost(
    scenario: &ProjectionScenario,
    pricing: &PricingTable,
    provider: &str,
    model: &str,
) -> ProjectionResult {
    Projector::new(pricing, provider, model).project(scenario)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scenario(questions: u64, caching: bool) -> ProjectionScenario {
        ProjectionScenario::new(1_000, 30_000, questions, 30, caching).unwrap()
    }

    #[test]
    fn test_reference_scenario() {
        let table = PricingTable::builtin();
        let result =
            project_monthly_cost(&scenario(10, true), &table, "groq", "llama-3.1-70b-versatile");

        assert_eq!(result.total_tokens_baseline, 9_000_000_000.0);
        assert_eq!(result.monthly_cost_baseline, (9_000_000_000.0 / 1_000_000.0) * 0.27);
        assert!((result.monthly_cost_baseline - 2_430.0).abs() < 1e-9);
        assert!(result.monthly_cost_optimized < result.monthly_cost_baseline);
        assert!(result.savings_percentage > 0.0 && result.savings_percentage <= 100.0);
        assert_eq!(result.annual_savings, result.monthly_savings * 12.0);
    }

    #[test]
    fn test_optimized_tokens() {
        let projector = Projector::with_pricing(ModelPricing::new(0.27, 0.27, 0.027));
        let result = projector.project(&scenario(10, true));
        // 30_000 sessions * (30_000 + 3_000 * 9)
        assert!((result.total_tokens_optimized - 1_710_000_000.0).abs() < 1e-3);
        assert!((result.monthly_cost_optimized - 46.17).abs() < 1e-9);
    }

    #[test]
    fn test_caching_disabled_equals_baseline() {
        let projector = Projector::global("groq", "llama-3.1-70b-versatile");
        let result = projector.project(&scenario(10, false));
        assert_eq!(result.monthly_cost_optimized, result.monthly_cost_baseline);
        assert_eq!(result.total_tokens_optimized, result.total_tokens_baseline);
        assert_eq!(result.monthly_savings, 0.0);
        assert_eq!(result.savings_percentage, 0.0);
    }

    #[test]
    fn test_marginal_question_cost_bounded() {
        let pricing = ModelPricing::new(0.27, 0.27, 0.027);
        let projector = Projector::with_pricing(pricing);
        let sessions = 30_000.0;
        let bound = 0.1 * pricing.cached_input_per_mtok * sessions * 30_000.0 / 1_000_000.0;

        for questions in 1..20 {
            let current = projector.project(&scenario(questions, true));
            let next = projector.project(&scenario(questions + 1, true));
            let marginal = next.monthly_cost_optimized - current.monthly_cost_optimized;
            assert!(marginal >= 0.0);
            assert!(marginal <= bound + 1e-9, "marginal {marginal} exceeds {bound}");
        }
    }

    #[test]
    fn test_single_question_session() {
        let projector = Projector::with_pricing(ModelPricing::new(1.0, 1.0, 0.1));
        let result = projector.project(&scenario(1, true));
        assert_eq!(result.total_tokens_optimized, result.total_tokens_baseline);
        assert!((result.savings_percentage - 90.0).abs() < 1e-9);
    }

    #[test]
    fn test_projector_resolution() {
        let table = PricingTable::builtin();
        let projector = Projector::new(&table, "groq", "unknown");
        assert_eq!(projector.priced_model(), Some("llama-3.1-70b-versatile"));
        assert_eq!(projector.resolution(), PriceResolution::ModelFallback);

        let manual = Projector::with_pricing(ModelPricing::from_base(1.0, 2.0));
        assert_eq!(manual.priced_model(), None);
    }

    #[test]
    fn test_large_scenario_not_capped() {
        let pricing = ModelPricing::new(0.27, 0.27, 0.027);
        let scenario = ProjectionScenario::new(1_000_000_000, 1_000_000, 1_000, 30, true).unwrap();
        let result = Projector::with_pricing(pricing).project(&scenario);

        assert_eq!(scenario.total_sessions(), 30_000_000_000);
        assert_eq!(result.total_tokens_baseline, 3e19);
        assert_eq!(result.monthly_cost_baseline, (3e19 / 1_000_000.0) * 0.27);
        assert!(result.monthly_cost_optimized < result.monthly_cost_baseline);
        assert!(result.savings_percentage > 0.0 && result.savings_percentage <= 100.0);
    }

    #[test]
    fn test_baseline_tokens_beyond_u128() {
        let max = u64::MAX;
        let exact = baseline_tokens(u128::from(max) * u128::from(max), max, max);
        let expected = (max as f64 * max as f64) * (max as f64 * max as f64);
        assert!(exact.is_finite());
        assert!((exact / expected - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_free_pricing_zero_guard() {
        let projector = Projector::with_pricing(ModelPricing::new(0.0, 0.0, 0.0));
        let result = projector.project(&scenario(10, true));
        assert_eq!(result.monthly_cost_baseline, 0.0);
        assert_eq!(result.savings_percentage, 0.0);
    }
}
