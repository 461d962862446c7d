use std::sync::Arc;

use super::{DocumentRequest, ModelResponse, Responder, ReviewRequest};
use crate::accounting::{Accountant, TokenUsage};
use crate::observability::{RequestSpan, SpanContext};
use crate::pricing::{DEFAULT_MODEL, DEFAULT_PROVIDER};
use crate::prompts::{QuestionPlacement, review_prompt};
use crate::tokens::{CacheEstimate, CharHeuristic, TokenEstimator, estimate_cached_tokens};

const SIMULATED_NOTICE: &str = "(Simulated response: no provider client is configured.)";

const BASIC_TEXT: &str =
    "Simulated response. Configure a provider client to get real completions.";

const REVIEW_TEXT_QUESTION_FIRST: &str = r#"**Security issues**

1. SQL injection: the query is assembled with string formatting.
2. Inputs are used without any validation.
3. Passwords look like they are compared in plain text."#;

const REVIEW_TEXT_QUESTION_LAST: &str = r#"**Security issues**

1. **SQL injection**: the query is assembled with an f-string, so a username
   such as `admin'--` skips the password check. Use a parameterized query:
   `db.execute("SELECT * FROM users WHERE username=? AND password=?", (username, password))`
2. **No input validation**: any string reaches the database unchanged.
3. **Plain-text passwords**: store a salted hash (bcrypt or Argon2) instead.

**Next steps**
- Switch to parameterized queries
- Validate and bound all inputs
- Hash stored passwords
- Rate-limit login attempts"#;

/// Offline [`Responder`] that estimates usage from text length.
///
/// Document analysis assumes a 500-token system prompt and a 200-token answer.
/// Code review renders the prompt for the requested placement and prices it
/// like a plain completion, which answers in 200 tokens. Costs go through the same
/// [`Accountant`] as real responses.
#[derive(Debug, Clone)]
pub struct SimulatedResponder<'a> {
    accountant: Accountant<'a>,
    provider: String,
    model: String,
    spans: Option<Arc<SpanContext>>,
}

impl SimulatedResponder<'static> {
    pub fn global() -> Self {
        Self::new(Accountant::global(), DEFAULT_PROVIDER, DEFAULT_MODEL)
    }
}

impl<'a> SimulatedResponder<'a> {
    pub fn new(
        accountant: Accountant<'a>,
        provider: impl Into<String>,
        model: impl Into<String>,
    ) -> Self {
        Self {
            accountant,
            provider: provider.into(),
            model: model.into(),
            spans: None,
        }
    }

    /// Opens request spans under `context` instead of standalone ones.
    pub fn with_span_context(mut self, context: Arc<SpanContext>) -> Self {
        self.spans = Some(context);
        self
    }

    pub fn provider(&self) -> &str {
        &self.provider
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn open_span(&self) -> RequestSpan {
        match &self.spans {
            Some(context) => context.request_span(&self.provider, &self.model),
            None => RequestSpan::new(&self.provider, &self.model),
        }
    }

    fn respond(&self, text: String, usage: TokenUsage, cache: Option<CacheEstimate>) -> ModelResponse {
        let span = self.open_span();
        let cost = self.accountant.calculate_cost(&usage, &self.provider, &self.model);
        span.record_usage(&usage);
        span.record_cost(&cost);
        let latency = span.finish();

        ModelResponse {
            text,
            usage,
            cost,
            cache,
            latency,
            simulated: true,
        }
    }
}

impl Responder for SimulatedResponder<'_> {
    fn name(&self) -> &str {
        "simulated"
    }

    fn analyze_document(&self, request: &DocumentRequest<'_>) -> crate::Result<ModelResponse> {
        let tokens = CharHeuristic::DOCUMENT_ANALYSIS.estimate(&[request.document, request.question]);
        let cache = estimate_cached_tokens(
            tokens.input_tokens,
            request.question,
            request.turn,
            request.caching,
        );

        let text = format!(
            "**Question:** {}\n\n\
             **Answer:** The document argues that ordering prompts with static \
             content first lets providers reuse cached prefixes, cutting cost and \
             latency for repeated questions.\n\n\
             **Key points:**\n\
             - Cached input is billed at a fraction of the normal rate\n\
             - The question belongs at the end of the prompt\n\
             - Repeated questions about one document benefit most\n\n\
             {SIMULATED_NOTICE}",
            request.question
        );

        Ok(self.respond(text, cache.apply(tokens), Some(cache)))
    }

    fn review_code(&self, request: &ReviewRequest<'_>) -> crate::Result<ModelResponse> {
        let prompt = review_prompt(
            request.context,
            request.code,
            request.question,
            request.placement,
        );
        let tokens = CharHeuristic::BASIC.estimate(&[&prompt]);

        let body = match request.placement {
            QuestionPlacement::First => REVIEW_TEXT_QUESTION_FIRST,
            QuestionPlacement::Last => REVIEW_TEXT_QUESTION_LAST,
        };
        let text = format!("{body}\n\n{SIMULATED_NOTICE}");

        let usage = TokenUsage::uncached(tokens.input_tokens, tokens.output_tokens);
        Ok(self.respond(text, usage, None))
    }

    fn complete(&self, prompt: &str) -> crate::Result<ModelResponse> {
        let tokens = CharHeuristic::BASIC.estimate(&[prompt]);
        let usage = TokenUsage::uncached(tokens.input_tokens, tokens.output_tokens);
        Ok(self.respond(BASIC_TEXT.to_string(), usage, None))
    }
}
