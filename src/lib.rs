//! # prompt-cost
//!
//! Token accounting and savings projection for prompt-caching demos.
//!
//! The crate turns raw token counts, reported by a provider or estimated from
//! text length, into per-request costs, estimates how much of a request a
//! provider-side cache would have served, and scales a representative session
//! into monthly and annual projections.
//!
//! Cache hits are *estimated*; nothing here measures or stores a real cache.
//!
//! ## Per-request cost
//!
//! ```rust
//! use prompt_cost::{Accountant, TokenUsage};
//!
//! let usage = TokenUsage::new(5_000, 200, 4_498);
//! let cost = Accountant::global().calculate_cost(&usage, "groq", "llama-3.1-70b-versatile");
//! assert!(cost.total_cost > 0.0);
//! ```
//!
//! ## Monthly projection
//!
//! ```rust
//! use prompt_cost::{ProjectionScenario, Projector};
//!
//! # fn main() -> prompt_cost::Result<()> {
//! let scenario = ProjectionScenario::new(1_000, 30_000, 10, 30, true)?;
//! let result = Projector::global("groq", "llama-3.1-70b-versatile").project(&scenario);
//! assert!(result.monthly_cost_optimized < result.monthly_cost_baseline);
//! # Ok(())
//! # }
//! ```

#![cfg_attr(docsrs, feature(doc_cfg))]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod accounting;
pub mod config;
pub mod display;
pub mod observability;
pub mod prelude;
pub mod pricing;
pub mod projection;
pub mod prompts;
pub mod responder;
pub mod session;
pub mod tokens;

pub use accounting::{
    Accountant, CacheSavings, CostBreakdown, Savings, TokenUsage, cached_share,
    calculate_cache_savings, calculate_cost, calculate_savings, percentage_of,
};
pub use config::{ConfigBuilder, ConfigError, ConfigProvider, Settings};
pub use display::{format_cost, format_duration, format_tokens};
pub use observability::{RequestSpan, SpanContext, TracingConfig, TracingLevel};
pub use pricing::{
    ModelPricing, PriceResolution, PricingTable, PricingTableBuilder, global_pricing_table,
};
pub use projection::{ProjectionResult, ProjectionScenario, Projector, project_monthly_cost};
pub use prompts::{QuestionPlacement, document_prompt, review_prompt, system_prompt};
pub use responder::{
    DocumentRequest, ModelResponse, Responder, ReviewRequest, SimulatedResponder,
    account_reported,
};
pub use session::{
    LedgerRecord, PositionComparison, ProjectionRecord, RequestRecord, ResultsLedger, SessionId,
    SessionSummary, compare_positions, run_document_session, run_position_comparison,
};
pub use tokens::{
    CacheEstimate, CharHeuristic, ReportedUsage, RequestTokens, SessionTurn, TokenEstimator,
    estimate_cached_tokens, estimate_tokens,
};

/// Error type for prompt-cost operations.
///
/// Only construction can fail: cost and projection arithmetic always returns
/// a number.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// A pricing entry violates the table invariants.
    #[error("Invalid pricing for {provider}/{model}: {message}")]
    InvalidPricing {
        provider: String,
        model: String,
        message: String,
    },

    /// A projection parameter is out of range.
    #[error("Invalid projection scenario: {field} {message}")]
    InvalidScenario {
        field: &'static str,
        message: String,
    },

    /// Invalid or missing configuration.
    #[error("Configuration error: {0}")]
    Config(String),

    /// JSON serialization or deserialization failed.
    #[error("JSON parsing failed: {0}")]
    Json(#[from] serde_json::Error),

    /// File system operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Failed to parse a provider response.
    #[error("Parse error: {0}")]
    Parse(String),
}

/// Error category for unified error handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Configuration, pricing, or setup errors
    Configuration,
    /// Caller-supplied values out of range
    Input,
    /// Internal errors (IO, JSON, unexpected states)
    Internal,
}

impl Error {
    pub fn invalid_scenario(field: &'static str, message: impl Into<String>) -> Self {
        Error::InvalidScenario {
            field,
            message: message.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Error::InvalidPricing { .. } | Error::Config(_) => ErrorCategory::Configuration,
            Error::InvalidScenario { .. } | Error::Parse(_) => ErrorCategory::Input,
            Error::Json(_) | Error::Io(_) => ErrorCategory::Internal,
        }
    }

    pub fn is_configuration_error(&self) -> bool {
        self.category() == ErrorCategory::Configuration
    }

    pub fn is_input_error(&self) -> bool {
        self.category() == ErrorCategory::Input
    }
}

impl From<config::ConfigError> for Error {
    fn from(err: config::ConfigError) -> Self {
        match err {
            config::ConfigError::Parse(e) => Error::Json(e),
            config::ConfigError::Io(e) => Error::Io(e),
            other => Error::Config(other.to_string()),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
