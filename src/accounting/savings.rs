use serde::{Deserialize, Serialize};

/// `part / whole * 100`, or `0` when `whole` is not positive.
#[inline]
pub fn percentage_of(part: f64, whole: f64) -> f64 {
    if whole > 0.0 { part / whole * 100.0 } else { 0.0 }
}

/// Share of input tokens served from cache, in percent.
pub fn cached_share(cached_tokens: u64, input_tokens: u64) -> f64 {
    percentage_of(cached_tokens as f64, input_tokens as f64)
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Savings {
    pub absolute: f64,
    pub percentage: f64,
}

pub fn calculate_savings(original_cost: f64, optimized_cost: f64) -> Savings {
    let absolute = original_cost - optimized_cost;
    Savings {
        absolute,
        percentage: percentage_of(absolute, original_cost),
    }
}

/// Savings over a run of one cache-creating request followed by cached ones.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CacheSavings {
    pub total_savings: f64,
    pub savings_percentage: f64,
    pub cost_without_cache: f64,
    pub cost_with_cache: f64,
}

/// Compares paying `first_request_cost` for every request against paying it
/// once and `cached_request_cost` for each of the `cached_requests` after it.
pub fn calculate_cache_savings(
    first_request_cost: f64,
    cached_request_cost: f64,
    cached_requests: u64,
) -> CacheSavings {
    let n = cached_requests as f64;
    let cost_without_cache = first_request_cost * (1.0 + n);
    let cost_with_cache = first_request_cost + (cached_request_cost * n);
    let total_savings = cost_without_cache - cost_with_cache;

    CacheSavings {
        total_savings,
        savings_percentage: percentage_of(total_savings, cost_without_cache),
        cost_without_cache,
        cost_with_cache,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_savings() {
        let savings = calculate_savings(10.0, 2.5);
        assert_eq!(savings.absolute, 7.5);
        assert_eq!(savings.percentage, 75.0);
    }

    #[test]
    fn test_savings_zero_original() {
        let savings = calculate_savings(0.0, 3.0);
        assert_eq!(savings.absolute, -3.0);
        assert_eq!(savings.percentage, 0.0);

        assert_eq!(calculate_savings(0.0, 0.0).percentage, 0.0);
    }

    #[test]
    fn test_savings_can_be_negative() {
        let savings = calculate_savings(1.0, 1.5);
        assert_eq!(savings.percentage, -50.0);
    }

    #[test]
    fn test_cache_savings() {
        let savings = calculate_cache_savings(1.0, 0.1, 9);
        assert_eq!(savings.cost_without_cache, 10.0);
        assert!((savings.cost_with_cache - 1.9).abs() < 1e-12);
        assert!((savings.savings_percentage - 81.0).abs() < 1e-9);
    }

    #[test]
    fn test_cache_savings_degenerate() {
        let savings = calculate_cache_savings(0.0, 0.0, 5);
        assert_eq!(savings.savings_percentage, 0.0);

        let savings = calculate_cache_savings(2.0, 0.5, 0);
        assert_eq!(savings.total_savings, 0.0);
    }

    #[test]
    fn test_cached_share() {
        assert_eq!(cached_share(4_500, 5_000), 90.0);
        assert_eq!(cached_share(10, 0), 0.0);
    }
}
