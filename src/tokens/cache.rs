//! Cache-hit estimation.
//!
//! This approximates provider-side prompt caching; it does not measure one.
//! After the first request of a session, the static prefix (everything except
//! the question) is assumed to be [`CACHE_HIT_RATIO`] cached.

use serde::{Deserialize, Serialize};

use super::{CACHE_HIT_RATIO, RequestTokens, estimate_tokens};
use crate::accounting::TokenUsage;

/// Position of a request within a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionTurn {
    /// Creates the cache; always billed in full.
    First,
    Followup,
}

impl SessionTurn {
    pub fn from_index(index: usize) -> Self {
        if index == 0 { Self::First } else { Self::Followup }
    }

    pub fn is_first(&self) -> bool {
        matches!(self, Self::First)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheEstimate {
    pub hit: bool,
    pub cached_tokens: u64,
}

impl CacheEstimate {
    pub fn miss() -> Self {
        Self::default()
    }

    pub fn apply(&self, tokens: RequestTokens) -> TokenUsage {
        TokenUsage::new(tokens.input_tokens, tokens.output_tokens, self.cached_tokens)
    }
}

/// `trunc(0.9 * (input_tokens - question_tokens))` on follow-up turns with
/// caching enabled, otherwise a miss. The subtraction saturates at zero, so a
/// question longer than the whole prompt yields zero cached tokens.
pub fn estimate_cached_tokens(
    input_tokens: u64,
    question: &str,
    turn: SessionTurn,
    caching: bool,
) -> CacheEstimate {
    if turn.is_first() || !caching {
        return CacheEstimate::miss();
    }

    let static_tokens = input_tokens.saturating_sub(estimate_tokens(question));
    CacheEstimate {
        hit: true,
        cached_tokens: (static_tokens as f64 * CACHE_HIT_RATIO) as u64,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_turn_never_cached() {
        let estimate = estimate_cached_tokens(5_000, "What is X?", SessionTurn::First, true);
        assert_eq!(estimate, CacheEstimate::miss());
    }

    #[test]
    fn test_followup_turn_estimate() {
        let estimate = estimate_cached_tokens(5_000, "What is X?", SessionTurn::Followup, true);
        assert!(estimate.hit);
        assert_eq!(estimate.cached_tokens, 4_498);
    }

    #[test]
    fn test_caching_disabled() {
        let estimate = estimate_cached_tokens(5_000, "What is X?", SessionTurn::Followup, false);
        assert!(!estimate.hit);
        assert_eq!(estimate.cached_tokens, 0);
    }

    #[test]
    fn test_question_longer_than_prompt() {
        let question = "q".repeat(400);
        let estimate = estimate_cached_tokens(20, &question, SessionTurn::Followup, true);
        assert!(estimate.hit);
        assert_eq!(estimate.cached_tokens, 0);
    }

    #[test]
    fn test_apply_builds_usage() {
        let estimate = estimate_cached_tokens(1_000, "", SessionTurn::Followup, true);
        let usage = estimate.apply(RequestTokens {
            input_tokens: 1_000,
            output_tokens: 50,
        });
        assert_eq!(usage.cached_tokens(), 900);
        assert_eq!(usage.non_cached_input(), 100);
    }

    #[test]
    fn test_turn_from_index() {
        assert_eq!(SessionTurn::from_index(0), SessionTurn::First);
        assert_eq!(SessionTurn::from_index(3), SessionTurn::Followup);
    }
}
