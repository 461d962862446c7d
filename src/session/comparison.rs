//! Question-first versus question-last comparison.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::accounting::percentage_of;
use crate::responder::ModelResponse;

/// Relative time and cost of the two question placements. Positive
/// improvements mean the question-last layout was cheaper or faster.
///
/// Latency figures only mean something for live responders. A simulated
/// response's latency is the time spent pricing it, so `time_improvement`
/// is noise there; compare the cost fields instead.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PositionComparison {
    pub question_first_latency: Duration,
    pub question_last_latency: Duration,
    pub question_first_cost: f64,
    pub question_last_cost: f64,
    /// Percent of the question-first latency saved; `0` when that latency is zero.
    pub time_improvement: f64,
    pub cost_difference: f64,
    pub cost_improvement: f64,
}

impl PositionComparison {
    pub fn time_saved(&self) -> Duration {
        self.question_first_latency
            .saturating_sub(self.question_last_latency)
    }
}

pub fn compare_positions(
    question_first: &ModelResponse,
    question_last: &ModelResponse,
) -> PositionComparison {
    let first_secs = question_first.latency.as_secs_f64();
    let last_secs = question_last.latency.as_secs_f64();
    let first_cost = question_first.cost.total_cost;
    let last_cost = question_last.cost.total_cost;
    let cost_difference = first_cost - last_cost;

    PositionComparison {
        question_first_latency: question_first.latency,
        question_last_latency: question_last.latency,
        question_first_cost: first_cost,
        question_last_cost: last_cost,
        time_improvement: percentage_of(first_secs - last_secs, first_secs),
        cost_difference,
        cost_improvement: percentage_of(cost_difference, first_cost),
    }
}
