use serde::{Deserialize, Serialize};
use std::fmt;

use super::case::{CaseOutcome, CaseQuery};

/// Terminal outcome of one lookup attempt, as stored in the query log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QueryStatus {
    Success,
    Error,
    Failed,
}

impl QueryStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Error => "error",
            Self::Failed => "failed",
        }
    }

    /// Inverse of [`QueryStatus::as_str`]; matching is exact.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        [Self::Success, Self::Error, Self::Failed]
            .into_iter()
            .find(|candidate| candidate.as_str() == value)
    }
}

impl fmt::Display for QueryStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<CaseOutcome> for QueryStatus {
    fn from(outcome: CaseOutcome) -> Self {
        match outcome {
            CaseOutcome::Success => Self::Success,
            CaseOutcome::Error => Self::Error,
        }
    }
}

/// A query log row before the store assigns its id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewQueryRecord {
    pub query: CaseQuery,
    pub query_time: String,
    pub raw_response: String,
    pub status: QueryStatus,
}
