//! Token counts for requests, reported or estimated, and the cache-hit
//! heuristic that feeds the accountant.

mod cache;
mod estimator;

pub use cache::{CacheEstimate, SessionTurn, estimate_cached_tokens};
pub use estimator::{CharHeuristic, ReportedUsage, RequestTokens, TokenEstimator};

/// Characters per token when no tokenizer is available.
pub const CHARS_PER_TOKEN: u64 = 4;

/// Share of a request's static prefix assumed to be served from cache.
pub const CACHE_HIT_RATIO: f64 = 0.9;

/// Rough token count: character count divided by [`CHARS_PER_TOKEN`], rounded down.
pub fn estimate_tokens(text: &str) -> u64 {
    text.chars().count() as u64 / CHARS_PER_TOKEN
}
