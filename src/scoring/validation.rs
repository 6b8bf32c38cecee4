use std::collections::HashSet;

use crate::entity::{CompanyRecord, Model};
use crate::error::ContractViolation;

/// Reject a model score that is non-finite or outside [0, 1]. Never clamps.
pub fn check_unit_interval(id: u32, model: Model, value: f64) -> Result<(), ContractViolation> {
    if value.is_finite() && (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ContractViolation::ScoreOutOfRange {
            id,
            model: model.label(),
            value,
        })
    }
}

/// Validate a batch of records at the ingestion boundary.
/// Returns all violations at once (not just the first).
pub fn validate_records(records: &[CompanyRecord]) -> Result<(), Vec<ContractViolation>> {
    let mut errors = Vec::new();
    let mut seen = HashSet::new();

    for record in records {
        if !seen.insert(record.id) {
            errors.push(ContractViolation::DuplicateId(record.id));
        }

        let scores = [
            (Model::Baseline, record.baseline),
            (Model::Gbm, record.gbm),
            (Model::Logistic, record.logistic),
        ];
        for (model, value) in scores {
            if let Err(e) = check_unit_interval(record.id, model, value) {
                errors.push(e);
            }
        }

        if !record.change.is_finite() {
            errors.push(ContractViolation::NonFiniteChange { id: record.id });
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
