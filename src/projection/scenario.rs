use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Aggregate usage parameters for a monthly projection.
///
/// Every count is strictly positive; the only way to build one is
/// [`ProjectionScenario::new`], which rejects zeros.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawScenario", into = "RawScenario")]
pub struct ProjectionScenario {
    daily_users: u64,
    avg_document_tokens: u64,
    avg_questions_per_user: u64,
    days_per_month: u64,
    caching: bool,
}

#[derive(Serialize, Deserialize)]
struct RawScenario {
    daily_users: u64,
    avg_document_tokens: u64,
    avg_questions_per_user: u64,
    days_per_month: u64,
    #[serde(default = "default_caching")]
    caching: bool,
}

fn default_caching() -> bool {
    true
}

impl TryFrom<RawScenario> for ProjectionScenario {
    type Error = Error;

    fn try_from(raw: RawScenario) -> Result<Self> {
        Self::new(
            raw.daily_users,
            raw.avg_document_tokens,
            raw.avg_questions_per_user,
            raw.days_per_month,
            raw.caching,
        )
    }
}

impl From<ProjectionScenario> for RawScenario {
    fn from(s: ProjectionScenario) -> Self {
        Self {
            daily_users: s.daily_users,
            avg_document_tokens: s.avg_document_tokens,
            avg_questions_per_user: s.avg_questions_per_user,
            days_per_month: s.days_per_month,
            caching: s.caching,
        }
    }
}

impl ProjectionScenario {
    pub fn new(
        daily_users: u64,
        avg_document_tokens: u64,
        avg_questions_per_user: u64,
        days_per_month: u64,
        caching: bool,
    ) -> Result<Self> {
        let fields = [
            ("daily_users", daily_users),
            ("avg_document_tokens", avg_document_tokens),
            ("avg_questions_per_user", avg_questions_per_user),
            ("days_per_month", days_per_month),
        ];
        for (field, value) in fields {
            if value == 0 {
                return Err(Error::invalid_scenario(field, "must be greater than zero"));
            }
        }

        Ok(Self {
            daily_users,
            avg_document_tokens,
            avg_questions_per_user,
            days_per_month,
            caching,
        })
    }

    /// Same scenario with caching switched on or off.
    pub fn with_caching(mut self, caching: bool) -> Self {
        self.caching = caching;
        self
    }

    pub fn daily_users(&self) -> u64 {
        self.daily_users
    }

    pub fn avg_document_tokens(&self) -> u64 {
        self.avg_document_tokens
    }

    pub fn avg_questions_per_user(&self) -> u64 {
        self.avg_questions_per_user
    }

    pub fn days_per_month(&self) -> u64 {
        self.days_per_month
    }

    pub fn caching(&self) -> bool {
        self.caching
    }

    pub fn total_sessions(&self) -> u128 {
        u128::from(self.daily_users) * u128::from(self.days_per_month)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_scenario() {
        let scenario = ProjectionScenario::new(1_000, 30_000, 10, 30, true).unwrap();
        assert_eq!(scenario.total_sessions(), 30_000);
        assert!(scenario.caching());
        assert!(!scenario.with_caching(false).caching());
    }

    #[test]
    fn test_zero_fields_rejected() {
        let cases = [
            ((0, 1, 1, 1), "daily_users"),
            ((1, 0, 1, 1), "avg_document_tokens"),
            ((1, 1, 0, 1), "avg_questions_per_user"),
            ((1, 1, 1, 0), "days_per_month"),
        ];
        for ((users, doc, questions, days), expected) in cases {
            let err = ProjectionScenario::new(users, doc, questions, days, true).unwrap_err();
            match err {
                Error::InvalidScenario { field, .. } => assert_eq!(field, expected),
                other => panic!("unexpected error: {other}"),
            }
        }
    }

    #[test]
    fn test_deserialize_validates() {
        let scenario: ProjectionScenario = serde_json::from_str(
            r#"{"daily_users": 5, "avg_document_tokens": 100, "avg_questions_per_user": 2, "days_per_month": 30}"#,
        )
        .unwrap();
        assert!(scenario.caching());
        assert_eq!(scenario.avg_document_tokens(), 100);

        let result: std::result::Result<ProjectionScenario, _> = serde_json::from_str(
            r#"{"daily_users": 0, "avg_document_tokens": 100, "avg_questions_per_user": 2, "days_per_month": 30}"#,
        );
        assert!(result.is_err());
    }
}
