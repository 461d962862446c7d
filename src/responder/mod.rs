//! Source of model responses and their token usage.
//!
//! A live provider client reports usage in its response envelope; when no
//! client is configured, [`SimulatedResponder`] stands in and derives usage
//! from text length so the accounting path behaves identically.

mod simulated;

use std::time::Duration;

use serde::{Deserialize, Serialize};

pub use simulated::SimulatedResponder;

use crate::accounting::{CostBreakdown, TokenUsage};
use crate::prompts::QuestionPlacement;
use crate::tokens::{CacheEstimate, ReportedUsage, SessionTurn, TokenEstimator, estimate_cached_tokens};

/// A question about a document, asked as part of a session.
#[derive(Debug, Clone, Copy)]
pub struct DocumentRequest<'a> {
    pub document: &'a str,
    pub question: &'a str,
    pub turn: SessionTurn,
    pub caching: bool,
}

impl<'a> DocumentRequest<'a> {
    pub fn new(document: &'a str, question: &'a str) -> Self {
        Self {
            document,
            question,
            turn: SessionTurn::First,
            caching: true,
        }
    }

    pub fn turn(mut self, turn: SessionTurn) -> Self {
        self.turn = turn;
        self
    }

    pub fn caching(mut self, enabled: bool) -> Self {
        self.caching = enabled;
        self
    }
}

/// A code review question with a chosen question placement.
#[derive(Debug, Clone, Copy)]
pub struct ReviewRequest<'a> {
    pub context: &'a str,
    pub code: &'a str,
    pub question: &'a str,
    pub placement: QuestionPlacement,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelResponse {
    pub text: String,
    pub usage: TokenUsage,
    pub cost: CostBreakdown,
    /// Present only for requests that went through cache estimation.
    pub cache: Option<CacheEstimate>,
    pub latency: Duration,
    pub simulated: bool,
}

impl ModelResponse {
    pub fn cache_hit(&self) -> bool {
        self.cache.is_some_and(|cache| cache.hit)
    }
}

pub trait Responder {
    fn name(&self) -> &str;

    fn analyze_document(&self, request: &DocumentRequest<'_>) -> crate::Result<ModelResponse>;

    fn review_code(&self, request: &ReviewRequest<'_>) -> crate::Result<ModelResponse>;

    fn complete(&self, prompt: &str) -> crate::Result<ModelResponse>;
}

/// Turns a provider's usage report into [`TokenUsage`], estimating the cached
/// share with the same heuristic the simulator uses.
pub fn account_reported(
    report: &ReportedUsage,
    question: &str,
    turn: SessionTurn,
    caching: bool,
) -> (TokenUsage, CacheEstimate) {
    let tokens = report.estimate(&[]);
    let cache = estimate_cached_tokens(tokens.input_tokens, question, turn, caching);
    (cache.apply(tokens), cache)
}
