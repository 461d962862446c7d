//! Code review prompts with the customer question at either end.

use serde::{Deserialize, Serialize};

pub const REVIEWER_ROLE: &str = "You are a senior code reviewer focused on Python security.";

/// Where the customer question sits in a review prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionPlacement {
    /// Question before the role and material. Nothing before the material is
    /// stable across requests, so no prefix can be cached.
    First,
    /// Question after the material; role, context and code form a stable prefix.
    Last,
}

impl QuestionPlacement {
    pub const ALL: [QuestionPlacement; 2] = [QuestionPlacement::First, QuestionPlacement::Last];

    pub fn label(&self) -> &'static str {
        match self {
            Self::First => "question first",
            Self::Last => "question last",
        }
    }
}

pub fn review_prompt(
    context: &str,
    code: &str,
    question: &str,
    placement: QuestionPlacement,
) -> String {
    match placement {
        QuestionPlacement::First => format!(
            "The customer wants to know: {question}\n\n\
             {REVIEWER_ROLE}\n\n\
             Context:\n{context}\n\n\
             Code under review:\n{code}\n\n\
             Review the code and answer the question."
        ),
        QuestionPlacement::Last => format!(
            "{REVIEWER_ROLE}\n\n\
             Context:\n{context}\n\n\
             Code under review:\n{code}\n\n\
             CUSTOMER QUESTION:\n{question}"
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CONTEXT: &str = "Login handler for an internal dashboard.";
    const CODE: &str = "query = f\"SELECT * FROM users WHERE name='{name}'\"";
    const QUESTION: &str = "Is this safe?";

    #[test]
    fn test_question_first_layout() {
        let prompt = review_prompt(CONTEXT, CODE, QUESTION, QuestionPlacement::First);
        assert!(prompt.starts_with("The customer wants to know: Is this safe?"));
        assert!(prompt.ends_with("Review the code and answer the question."));
        assert!(prompt.contains(CODE));
    }

    #[test]
    fn test_question_last_layout() {
        let prompt = review_prompt(CONTEXT, CODE, QUESTION, QuestionPlacement::Last);
        assert!(prompt.starts_with(REVIEWER_ROLE));
        assert!(prompt.ends_with("CUSTOMER QUESTION:\nIs this safe?"));
    }

    #[test]
    fn test_question_last_prefix_is_stable() {
        let a = review_prompt(CONTEXT, CODE, "Is this safe?", QuestionPlacement::Last);
        let b = review_prompt(CONTEXT, CODE, "What should change?", QuestionPlacement::Last);
        let stable = a.len() - "Is this safe?".len();
        assert_eq!(a[..stable], b[..stable]);
    }

    #[test]
    fn test_labels() {
        let labels: Vec<_> = QuestionPlacement::ALL.iter().map(|p| p.label()).collect();
        assert_eq!(labels, vec!["question first", "question last"]);
    }
}
