//! Spans around priced requests, tagged with the session that made them.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};
use tracing::{Level, Span, field, span};

use crate::accounting::{CostBreakdown, TokenUsage};

/// Subscriber settings for `init_subscriber`.
#[derive(Debug, Clone, Default)]
pub struct TracingConfig {
    pub enabled: bool,
    pub level: TracingLevel,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TracingLevel {
    #[default]
    Info,
    Debug,
    Trace,
}

impl TracingLevel {
    /// Directive understood by `EnvFilter`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Debug => "debug",
            Self::Trace => "trace",
        }
    }
}

impl TracingConfig {
    pub fn new() -> Self {
        Self {
            enabled: true,
            ..Default::default()
        }
    }

    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Default::default()
        }
    }

    pub fn level(mut self, level: TracingLevel) -> Self {
        self.level = level;
        self
    }
}

/// Hands out request ids for one session's spans.
#[derive(Debug)]
pub struct SpanContext {
    session_id: String,
    request_id: AtomicU64,
}

impl SpanContext {
    pub fn new(session_id: impl Into<String>) -> Self {
        Self {
            session_id: session_id.into(),
            request_id: AtomicU64::new(0),
        }
    }

    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    pub fn next_request_id(&self) -> u64 {
        self.request_id.fetch_add(1, Ordering::Relaxed)
    }

    pub fn requests_started(&self) -> u64 {
        self.request_id.load(Ordering::Relaxed)
    }

    pub fn request_span(&self, provider: &str, model: &str) -> RequestSpan {
        let request_id = self.next_request_id();
        RequestSpan::from_span(span!(
            Level::INFO,
            "request.account",
            session_id = %self.session_id,
            request_id = request_id,
            provider = provider,
            model = model,
            input_tokens = field::Empty,
            cached_tokens = field::Empty,
            output_tokens = field::Empty,
            total_cost = field::Empty,
            latency_ms = field::Empty,
        ))
    }
}

/// Tracks the token counts, cost and latency of one request.
#[derive(Debug)]
pub struct RequestSpan {
    span: Span,
    start: Instant,
}

impl RequestSpan {
    /// Span outside of any session.
    pub fn new(provider: &str, model: &str) -> Self {
        Self::from_span(span!(
            Level::INFO,
            "request.account",
            provider = provider,
            model = model,
            input_tokens = field::Empty,
            cached_tokens = field::Empty,
            output_tokens = field::Empty,
            total_cost = field::Empty,
            latency_ms = field::Empty,
        ))
    }

    fn from_span(span: Span) -> Self {
        Self {
            span,
            start: Instant::now(),
        }
    }

    pub fn record_usage(&self, usage: &TokenUsage) {
        self.span.record("input_tokens", usage.input_tokens());
        self.span.record("cached_tokens", usage.cached_tokens());
        self.span.record("output_tokens", usage.output_tokens());
    }

    pub fn record_cost(&self, cost: &CostBreakdown) {
        self.span.record("total_cost", cost.total_cost);
    }

    /// Records and returns the time since the span was opened.
    pub fn finish(self) -> Duration {
        let elapsed = self.start.elapsed();
        self.span.record("latency_ms", elapsed.as_millis() as u64);
        elapsed
    }

    pub fn span(&self) -> &Span {
        &self.span
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Accountant;

    #[test]
    fn test_span_context() {
        let span_context = SpanContext::new("test-session");
        assert_eq!(span_context.next_request_id(), 0);
        assert_eq!(span_context.next_request_id(), 1);
        assert_eq!(span_context.requests_started(), 2);
        assert_eq!(span_context.session_id(), "test-session");
    }

    #[test]
    fn test_request_span() {
        let context = SpanContext::new("test-session");
        let span = context.request_span("groq", "llama-3.1-8b-instant");
        let usage = TokenUsage::new(100, 50, 20);
        let cost = Accountant::global().calculate_cost(&usage, "groq", "llama-3.1-8b-instant");
        span.record_usage(&usage);
        span.record_cost(&cost);
        let _elapsed = span.finish();
        assert_eq!(context.requests_started(), 1);
    }

    #[test]
    fn test_tracing_level_directive() {
        let config = TracingConfig::new().level(TracingLevel::Debug);
        assert!(config.enabled);
        assert_eq!(config.level.as_str(), "debug");
        assert!(!TracingConfig::disabled().enabled);
    }
}
