//! Session results: what was asked, what it cost, and how the layouts compare.
//!
//! The ledger is owned by the caller; nothing here is global or persisted.

mod comparison;
mod ids;
mod ledger;
mod runner;

pub use comparison::{PositionComparison, compare_positions};
pub use ids::SessionId;
pub use ledger::{LedgerRecord, ProjectionRecord, RequestRecord, ResultsLedger, SessionSummary};
pub use runner::{run_document_session, run_position_comparison};
