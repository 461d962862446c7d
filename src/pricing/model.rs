use serde::{Deserialize, Serialize};

use super::{CACHE_READ_DISCOUNT, TOKENS_PER_MILLION};

/// Rates for one model, in currency per million tokens.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ModelPricing {
    pub input_per_mtok: f64,
    pub output_per_mtok: f64,
    pub cached_input_per_mtok: f64,
}

impl ModelPricing {
    pub const fn new(input_per_mtok: f64, output_per_mtok: f64, cached_input_per_mtok: f64) -> Self {
        Self {
            input_per_mtok,
            output_per_mtok,
            cached_input_per_mtok,
        }
    }

    /// Derives the cached-input rate from the input rate.
    pub fn from_base(input_per_mtok: f64, output_per_mtok: f64) -> Self {
        Self {
            input_per_mtok,
            output_per_mtok,
            cached_input_per_mtok: input_per_mtok * CACHE_READ_DISCOUNT,
        }
    }

    /// Checks that every rate is a finite, non-negative number and that cached
    /// input never costs more than fresh input.
    pub fn validate(&self) -> Result<(), String> {
        let rates = [
            ("input", self.input_per_mtok),
            ("output", self.output_per_mtok),
            ("cached input", self.cached_input_per_mtok),
        ];
        for (class, rate) in rates {
            if !rate.is_finite() || rate < 0.0 {
                return Err(format!("{} rate must be a non-negative number, got {}", class, rate));
            }
        }
        if self.cached_input_per_mtok > self.input_per_mtok {
            return Err(format!(
                "cached input rate {} exceeds input rate {}",
                self.cached_input_per_mtok, self.input_per_mtok
            ));
        }
        Ok(())
    }

    #[inline]
    pub fn input_cost(&self, tokens: f64) -> f64 {
        (tokens / TOKENS_PER_MILLION) * self.input_per_mtok
    }

    #[inline]
    pub fn cached_cost(&self, tokens: f64) -> f64 {
        (tokens / TOKENS_PER_MILLION) * self.cached_input_per_mtok
    }

    #[inline]
    pub fn output_cost(&self, tokens: f64) -> f64 {
        (tokens / TOKENS_PER_MILLION) * self.output_per_mtok
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_base_pricing() {
        let pricing = ModelPricing::from_base(10.0, 50.0);
        assert!((pricing.cached_input_per_mtok - 1.0).abs() < 1e-12);
        assert!(pricing.validate().is_ok());
    }

    #[test]
    fn test_cost_per_class() {
        let pricing = ModelPricing::new(0.27, 0.27, 0.027);
        assert_eq!(pricing.input_cost(1_000_000.0), 0.27);
        assert_eq!(pricing.cached_cost(1_000_000.0), 0.027);
        assert_eq!(pricing.output_cost(0.0), 0.0);
    }

    #[test]
    fn test_validate_rejects_expensive_cache() {
        let pricing = ModelPricing::new(0.10, 0.10, 0.50);
        let err = pricing.validate().unwrap_err();
        assert!(err.contains("exceeds"));
    }

    #[test]
    fn test_validate_rejects_negative_and_nan() {
        assert!(ModelPricing::new(-1.0, 0.0, 0.0).validate().is_err());
        assert!(ModelPricing::new(1.0, f64::NAN, 0.1).validate().is_err());
    }
}
