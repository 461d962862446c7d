//! Caller-owned record of the requests, projections and comparisons made
//! during one session.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::comparison::PositionComparison;
use super::ids::SessionId;
use crate::accounting::{CostBreakdown, TokenUsage, cached_share, percentage_of};
use crate::observability::SpanContext;
use crate::projection::{ProjectionResult, ProjectionScenario};
use crate::responder::ModelResponse;
use crate::tokens::SessionTurn;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequestRecord {
    pub question: String,
    pub turn: SessionTurn,
    pub usage: TokenUsage,
    pub cost: CostBreakdown,
    pub cache_hit: bool,
    pub latency: Duration,
    pub recorded_at: DateTime<Utc>,
}

impl RequestRecord {
    /// Percent of this request's input served from cache.
    pub fn cached_share(&self) -> f64 {
        cached_share(self.usage.cached_tokens(), self.usage.input_tokens())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectionRecord {
    pub scenario: ProjectionScenario,
    pub result: ProjectionResult,
    pub recorded_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LedgerRecord {
    Request(RequestRecord),
    Projection(ProjectionRecord),
    Comparison(PositionComparison),
}

/// Aggregates over the request records of a ledger.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionSummary {
    pub session_id: SessionId,
    pub requests: usize,
    pub total_cost: f64,
    pub total_latency: Duration,
    pub total_input_tokens: u64,
    pub total_cached_tokens: u64,
    pub total_output_tokens: u64,
    /// Percent of all input tokens served from cache.
    pub cached_share: f64,
    /// How much cheaper the average follow-up was than the first request, in
    /// percent. `0` with fewer than two requests or a free first request.
    pub avg_followup_savings: f64,
}

#[derive(Debug)]
pub struct ResultsLedger {
    id: SessionId,
    spans: Arc<SpanContext>,
    records: Vec<LedgerRecord>,
    started_at: DateTime<Utc>,
}

impl Default for ResultsLedger {
    fn default() -> Self {
        Self::new()
    }
}

impl ResultsLedger {
    pub fn new() -> Self {
        Self::with_id(SessionId::new())
    }

    pub fn with_id(id: SessionId) -> Self {
        Self {
            id,
            spans: Arc::new(SpanContext::new(id.to_string())),
            records: Vec::new(),
            started_at: Utc::now(),
        }
    }

    pub fn id(&self) -> SessionId {
        self.id
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    /// Span context for responders working on behalf of this session.
    pub fn span_context(&self) -> Arc<SpanContext> {
        Arc::clone(&self.spans)
    }

    /// Turn of the next document request: first until one has been recorded.
    pub fn next_turn(&self) -> SessionTurn {
        SessionTurn::from_index(self.requests().count())
    }

    pub fn record_request(
        &mut self,
        question: impl Into<String>,
        turn: SessionTurn,
        response: &ModelResponse,
    ) {
        let record = RequestRecord {
            question: question.into(),
            turn,
            usage: response.usage,
            cost: response.cost.clone(),
            cache_hit: response.cache_hit(),
            latency: response.latency,
            recorded_at: Utc::now(),
        };
        tracing::debug!(
            session_id = %self.id,
            turn = ?record.turn,
            cached_tokens = record.usage.cached_tokens(),
            total_cost = record.cost.total_cost,
            "request recorded"
        );
        self.records.push(LedgerRecord::Request(record));
    }

    pub fn record_projection(&mut self, scenario: ProjectionScenario, result: ProjectionResult) {
        self.records.push(LedgerRecord::Projection(ProjectionRecord {
            scenario,
            result,
            recorded_at: Utc::now(),
        }));
    }

    pub fn record_comparison(&mut self, comparison: PositionComparison) {
        self.records.push(LedgerRecord::Comparison(comparison));
    }

    pub fn records(&self) -> &[LedgerRecord] {
        &self.records
    }

    pub fn requests(&self) -> impl Iterator<Item = &RequestRecord> {
        self.records.iter().filter_map(|record| match record {
            LedgerRecord::Request(request) => Some(request),
            _ => None,
        })
    }

    pub fn projections(&self) -> impl Iterator<Item = &ProjectionRecord> {
        self.records.iter().filter_map(|record| match record {
            LedgerRecord::Projection(projection) => Some(projection),
            _ => None,
        })
    }

    pub fn last_comparison(&self) -> Option<&PositionComparison> {
        self.records.iter().rev().find_map(|record| match record {
            LedgerRecord::Comparison(comparison) => Some(comparison),
            _ => None,
        })
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Drops every record; the next document request is a first turn again.
    pub fn clear(&mut self) {
        self.records.clear();
    }

    pub fn summary(&self) -> SessionSummary {
        let mut usage = TokenUsage::default();
        let mut total_cost = 0.0;
        let mut total_latency = Duration::ZERO;
        let mut costs = Vec::new();

        for request in self.requests() {
            usage.add(&request.usage);
            total_cost += request.cost.total_cost;
            total_latency += request.latency;
            costs.push(request.cost.total_cost);
        }

        SessionSummary {
            session_id: self.id,
            requests: costs.len(),
            total_cost,
            total_latency,
            total_input_tokens: usage.input_tokens(),
            total_cached_tokens: usage.cached_tokens(),
            total_output_tokens: usage.output_tokens(),
            cached_share: cached_share(usage.cached_tokens(), usage.input_tokens()),
            avg_followup_savings: followup_savings(&costs),
        }
    }

    pub fn to_json(&self) -> crate::Result<String> {
        Ok(serde_json::to_string_pretty(&self.records)?)
    }
}

fn followup_savings(costs: &[f64]) -> f64 {
    match costs.split_first() {
        Some((first, rest)) if !rest.is_empty() => {
            let avg_rest = rest.iter().sum::<f64>() / rest.len() as f64;
            percentage_of(first - avg_rest, *first)
        }
        _ => 0.0,
    }
}
