use serde::{Deserialize, Serialize};

/// Token counts for one request.
///
/// Cached tokens are a subset of input tokens. Construction clamps
/// `cached_tokens` to `input_tokens`, so the invariant holds for every value
/// of this type, including deserialized ones.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawTokenUsage")]
pub struct TokenUsage {
    input_tokens: u64,
    output_tokens: u64,
    cached_tokens: u64,
}

#[derive(Deserialize)]
struct RawTokenUsage {
    input_tokens: u64,
    output_tokens: u64,
    #[serde(default)]
    cached_tokens: u64,
}

impl From<RawTokenUsage> for TokenUsage {
    fn from(raw: RawTokenUsage) -> Self {
        Self::new(raw.input_tokens, raw.output_tokens, raw.cached_tokens)
    }
}

impl TokenUsage {
    pub fn new(input_tokens: u64, output_tokens: u64, cached_tokens: u64) -> Self {
        if cached_tokens > input_tokens {
            tracing::debug!(
                input_tokens,
                cached_tokens,
                "cached tokens exceed input tokens, clamping"
            );
        }
        Self {
            input_tokens,
            output_tokens,
            cached_tokens: cached_tokens.min(input_tokens),
        }
    }

    /// Usage with nothing served from cache.
    pub fn uncached(input_tokens: u64, output_tokens: u64) -> Self {
        Self::new(input_tokens, output_tokens, 0)
    }

    #[inline]
    pub fn input_tokens(&self) -> u64 {
        self.input_tokens
    }

    #[inline]
    pub fn output_tokens(&self) -> u64 {
        self.output_tokens
    }

    #[inline]
    pub fn cached_tokens(&self) -> u64 {
        self.cached_tokens
    }

    /// Input tokens billed at the full input rate.
    #[inline]
    pub fn non_cached_input(&self) -> u64 {
        self.input_tokens.saturating_sub(self.cached_tokens)
    }

    #[inline]
    pub fn total(&self) -> u64 {
        self.input_tokens.saturating_add(self.output_tokens)
    }

    pub fn is_cache_hit(&self) -> bool {
        self.cached_tokens > 0
    }

    pub fn add(&mut self, other: &TokenUsage) {
        self.input_tokens = self.input_tokens.saturating_add(other.input_tokens);
        self.output_tokens = self.output_tokens.saturating_add(other.output_tokens);
        self.cached_tokens = self.cached_tokens.saturating_add(other.cached_tokens);
    }
}
