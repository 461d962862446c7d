//! Drives a responder through the two demo flows and records the results.

use super::comparison::{PositionComparison, compare_positions};
use super::ledger::{ResultsLedger, SessionSummary};
use crate::prompts::QuestionPlacement;
use crate::responder::{DocumentRequest, ModelResponse, Responder, ReviewRequest};

/// Asks every question about `document` in order, recording each response.
/// The first question creates the cache unless the ledger already holds
/// requests.
pub fn run_document_session<R, Q>(
    ledger: &mut ResultsLedger,
    responder: &R,
    document: &str,
    questions: &[Q],
    caching: bool,
) -> crate::Result<SessionSummary>
where
    R: Responder + ?Sized,
    Q: AsRef<str>,
{
    let _span = tracing::info_span!(
        "session.document",
        session_id = %ledger.id(),
        responder = responder.name(),
        questions = questions.len(),
        caching,
    )
    .entered();

    for question in questions {
        let question = question.as_ref();
        let turn = ledger.next_turn();
        let request = DocumentRequest::new(document, question)
            .turn(turn)
            .caching(caching);
        let response = responder.analyze_document(&request)?;
        ledger.record_request(question, turn, &response);
    }

    Ok(ledger.summary())
}

/// Asks the same review question with both placements and records the
/// comparison.
pub fn run_position_comparison<R>(
    ledger: &mut ResultsLedger,
    responder: &R,
    context: &str,
    code: &str,
    question: &str,
) -> crate::Result<(ModelResponse, ModelResponse, PositionComparison)>
where
    R: Responder + ?Sized,
{
    let ask = |placement| {
        responder.review_code(&ReviewRequest {
            context,
            code,
            question,
            placement,
        })
    };

    let question_first = ask(QuestionPlacement::First)?;
    let question_last = ask(QuestionPlacement::Last)?;
    let comparison = compare_positions(&question_first, &question_last);
    ledger.record_comparison(comparison);

    Ok((question_first, question_last, comparison))
}
