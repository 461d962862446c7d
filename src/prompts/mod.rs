//! Prompt layouts used by the caching and question-placement demos.
//!
//! Structure:
//! - `document`: system prompt and document question prompt (static content first)
//! - `review`: code review prompt with the question at the start or the end

pub mod document;
pub mod review;

pub use document::{ANALYST_GUIDELINES, GUIDELINE_REPETITIONS, document_prompt, system_prompt};
pub use review::{QuestionPlacement, REVIEWER_ROLE, review_prompt};
