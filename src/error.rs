//! Contract violations raised at the ingestion boundary of the core.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ContractViolation {
    #[error("{model} score for company {id} is {value}, expected a value in [0, 1]")]
    ScoreOutOfRange {
        id: u32,
        model: &'static str,
        value: f64,
    },

    #[error("change for company {id} is not a finite number")]
    NonFiniteChange { id: u32 },

    #[error("duplicate company id {0}")]
    DuplicateId(u32),

    #[error("unknown sort field '{0}' (expected composite, baseline, gbm, logistic or change)")]
    UnknownSortField(String),

    #[error("unknown sort direction '{0}' (expected asc or desc)")]
    UnknownSortDirection(String),

    #[error("signal '{name}' has contribution {value}, expected a non-negative number")]
    InvalidContribution { name: String, value: f64 },
}
