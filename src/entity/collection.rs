use chrono::{DateTime, Utc};
use std::collections::HashSet;

use super::types::{Company, CompanyRecord};
use crate::error::ContractViolation;

/// An ordered, read-only batch of companies with unique ids.
///
/// Collections are never patched in place; a refresh builds a new one.
#[derive(Debug, Clone)]
pub struct Collection {
    companies: Vec<Company>,
    loaded_at: DateTime<Utc>,
}

impl Collection {
    pub fn new(companies: Vec<Company>) -> Result<Self, ContractViolation> {
        let mut seen = HashSet::new();
        for company in &companies {
            if !seen.insert(company.id) {
                return Err(ContractViolation::DuplicateId(company.id));
            }
        }
        Ok(Self {
            companies,
            loaded_at: Utc::now(),
        })
    }

    /// Build a collection from raw records, failing on the first violation.
    pub fn from_records(records: Vec<CompanyRecord>) -> Result<Self, ContractViolation> {
        let companies = records
            .into_iter()
            .map(Company::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(companies)
    }

    pub fn companies(&self) -> &[Company] {
        &self.companies
    }

    pub fn len(&self) -> usize {
        self.companies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.companies.is_empty()
    }

    pub fn loaded_at(&self) -> DateTime<Utc> {
        self.loaded_at
    }

    pub fn get(&self, id: u32) -> Option<&Company> {
        self.companies.iter().find(|c| c.id == id)
    }

    /// Case-insensitive ticker lookup
    pub fn find_ticker(&self, ticker: &str) -> Option<&Company> {
        self.companies
            .iter()
            .find(|c| c.ticker.eq_ignore_ascii_case(ticker))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: u32, ticker: &str) -> CompanyRecord {
        CompanyRecord {
            id,
            ticker: ticker.to_string(),
            name: format!("Company {}", id),
            sector: "Financials".to_string(),
            baseline: 0.7,
            gbm: 0.6,
            logistic: 0.65,
            change: 0.0,
        }
    }

    #[test]
    fn test_from_records_keeps_order() {
        let collection =
            Collection::from_records(vec![record(3, "C"), record(1, "A"), record(2, "B")]).unwrap();
        let ids: Vec<u32> = collection.companies().iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![3, 1, 2]);
    }

    #[test]
    fn test_rejects_duplicate_id() {
        let err = Collection::from_records(vec![record(1, "A"), record(1, "B")]).unwrap_err();
        assert_eq!(err, ContractViolation::DuplicateId(1));
    }

    #[test]
    fn test_empty_collection() {
        let collection = Collection::new(vec![]).unwrap();
        assert!(collection.is_empty());
        assert_eq!(collection.len(), 0);
    }

    #[test]
    fn test_lookup() {
        let collection = Collection::from_records(vec![record(1, "ZF108"), record(2, "PH109")]).unwrap();
        assert_eq!(collection.get(2).map(|c| c.ticker.as_str()), Some("PH109"));
        assert_eq!(collection.find_ticker("zf108").map(|c| c.id), Some(1));
        assert!(collection.get(9).is_none());
    }
}
