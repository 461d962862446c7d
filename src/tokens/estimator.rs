use serde::{Deserialize, Serialize};

use super::estimate_tokens;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestTokens {
    pub input_tokens: u64,
    pub output_tokens: u64,
}

/// Source of raw token counts for a request.
///
/// Implementations either report what a provider actually counted or
/// approximate it from text; a real tokenizer can be slotted in here without
/// touching the accountant.
pub trait TokenEstimator {
    fn name(&self) -> &str;

    /// Token counts for a prompt made of `segments`, static content first.
    fn estimate(&self, segments: &[&str]) -> RequestTokens;
}

/// Approximates tokens from character length, segment by segment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CharHeuristic {
    overhead_tokens: u64,
    output_tokens: u64,
}

impl CharHeuristic {
    /// Simulated document analysis: a 500-token system prompt and a
    /// 200-token answer.
    pub const DOCUMENT_ANALYSIS: Self = Self::new().with_overhead(500).with_output(200);

    /// Simulated plain completion: no overhead and a 200-token answer.
    pub const BASIC: Self = Self::new().with_output(200);

    pub const fn new() -> Self {
        Self {
            overhead_tokens: 0,
            output_tokens: 0,
        }
    }

    /// Tokens added to every prompt for content not passed as a segment.
    pub const fn with_overhead(mut self, tokens: u64) -> Self {
        self.overhead_tokens = tokens;
        self
    }

    /// Fixed answer length.
    pub const fn with_output(mut self, tokens: u64) -> Self {
        self.output_tokens = tokens;
        self
    }
}

impl TokenEstimator for CharHeuristic {
    fn name(&self) -> &str {
        "char-heuristic"
    }

    fn estimate(&self, segments: &[&str]) -> RequestTokens {
        let input_tokens = segments
            .iter()
            .map(|segment| estimate_tokens(segment))
            .fold(self.overhead_tokens, u64::saturating_add);
        RequestTokens {
            input_tokens,
            output_tokens: self.output_tokens,
        }
    }
}

/// Usage block of an OpenAI-compatible chat completion response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportedUsage {
    pub prompt_tokens: u64,
    pub completion_tokens: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_tokens: Option<u64>,
}

#[derive(Deserialize)]
struct ResponseEnvelope {
    usage: Option<ReportedUsage>,
}

impl ReportedUsage {
    pub fn new(prompt_tokens: u64, completion_tokens: u64) -> Self {
        Self {
            prompt_tokens,
            completion_tokens,
            total_tokens: None,
        }
    }

    /// Extracts the `usage` object from a full response body.
    pub fn from_response_json(body: &str) -> crate::Result<Self> {
        let envelope: ResponseEnvelope = serde_json::from_str(body)?;
        envelope
            .usage
            .ok_or_else(|| crate::Error::Parse("response has no usage report".into()))
    }
}

impl TokenEstimator for ReportedUsage {
    fn name(&self) -> &str {
        "provider-report"
    }

    /// The provider already counted this request; segments are ignored.
    fn estimate(&self, _segments: &[&str]) -> RequestTokens {
        RequestTokens {
            input_tokens: self.prompt_tokens,
            output_tokens: self.completion_tokens,
        }
    }
}
