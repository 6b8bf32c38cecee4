use std::collections::HashSet;

use super::filter::matches;
use super::params::{QueryParams, SortDirection, ALL_SECTORS};
use crate::entity::Company;

/// Filter and sort a collection into a new view.
///
/// The sort is stable in both directions: companies with equal keys keep their
/// order from `companies`. The source slice is never modified.
pub fn query<'a>(companies: &'a [Company], params: &QueryParams) -> Vec<&'a Company> {
    let mut view: Vec<&Company> = companies
        .iter()
        .filter(|c| matches(c, &params.search, &params.sector))
        .collect();

    let field = params.sort.field;
    let direction = params.sort.direction;
    view.sort_by(|a, b| {
        let ordering = field.value(a).total_cmp(&field.value(b));
        match direction {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    });
    view
}

/// "All" followed by each distinct sector in first-seen order.
pub fn sectors(companies: &[Company]) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut result = vec![ALL_SECTORS.to_string()];
    for company in companies {
        if seen.insert(company.sector.as_str()) {
            result.push(company.sector.clone());
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::ModelScores;
    use crate::query::params::{SectorFilter, SortField, SortSpec};

    fn company(id: u32, ticker: &str, sector: &str, composite: f64, change: f64) -> Company {
        let scores = ModelScores::new(id, composite, composite, composite).unwrap();
        Company::new(id, ticker, format!("Company {}", ticker), sector, scores, change).unwrap()
    }

    fn params(field: SortField, direction: SortDirection) -> QueryParams {
        QueryParams {
            search: String::new(),
            sector: SectorFilter::All,
            sort: SortSpec { field, direction },
        }
    }

    fn ids(view: &[&Company]) -> Vec<u32> {
        view.iter().map(|c| c.id).collect()
    }

    fn three() -> Vec<Company> {
        vec![
            company(1, "AAA100", "Technology", 0.80, 0.05),
            company(2, "BBB101", "Healthcare", 0.65, -0.02),
            company(3, "CCC102", "Technology", 0.40, 0.01),
        ]
    }

    #[test]
    fn test_end_to_end_descending() {
        let companies = three();
        let view = query(&companies, &params(SortField::Composite, SortDirection::Descending));
        assert_eq!(ids(&view), vec![1, 2, 3]);
    }

    #[test]
    fn test_end_to_end_ascending() {
        let companies = three();
        let view = query(&companies, &params(SortField::Composite, SortDirection::Ascending));
        assert_eq!(ids(&view), vec![3, 2, 1]);
    }

    #[test]
    fn test_end_to_end_ticker_search() {
        let companies = three();
        let mut p = params(SortField::Composite, SortDirection::Descending);
        p.search = "aaa1".to_string();
        let view = query(&companies, &p);
        assert_eq!(ids(&view), vec![1]);
    }

    #[test]
    fn test_no_filter_returns_everything() {
        let companies = three();
        let view = query(&companies, &params(SortField::Composite, SortDirection::Descending));
        assert_eq!(view.len(), companies.len());
    }

    #[test]
    fn test_stable_for_equal_keys_both_directions() {
        let companies = vec![
            company(1, "A", "X", 0.70, 0.0),
            company(2, "B", "X", 0.50, 0.0),
            company(3, "C", "X", 0.70, 0.0),
            company(4, "D", "X", 0.50, 0.0),
            company(5, "E", "X", 0.70, 0.0),
        ];
        let desc = query(&companies, &params(SortField::Composite, SortDirection::Descending));
        assert_eq!(ids(&desc), vec![1, 3, 5, 2, 4]);
        let asc = query(&companies, &params(SortField::Composite, SortDirection::Ascending));
        assert_eq!(ids(&asc), vec![2, 4, 1, 3, 5]);
    }

    #[test]
    fn test_sort_by_change() {
        let companies = three();
        let view = query(&companies, &params(SortField::Change, SortDirection::Ascending));
        assert_eq!(ids(&view), vec![2, 3, 1]);
    }

    #[test]
    fn test_idempotent() {
        let companies = three();
        let mut p = params(SortField::Gbm, SortDirection::Ascending);
        p.sector = SectorFilter::parse("Technology");
        let first = ids(&query(&companies, &p));
        let second = ids(&query(&companies, &p));
        assert_eq!(first, second);
        assert_eq!(first, vec![3, 1]);
    }

    #[test]
    fn test_does_not_mutate_source() {
        let companies = three();
        let before = companies.clone();
        let _ = query(&companies, &params(SortField::Composite, SortDirection::Ascending));
        assert_eq!(companies, before);
    }

    #[test]
    fn test_empty_result() {
        let companies = three();
        let mut p = params(SortField::Composite, SortDirection::Descending);
        p.sector = SectorFilter::parse("Services");
        assert!(query(&companies, &p).is_empty());
    }

    #[test]
    fn test_sectors_first_seen_order() {
        let companies = three();
        assert_eq!(sectors(&companies), vec!["All", "Technology", "Healthcare"]);
        assert_eq!(sectors(&companies), sectors(&companies));
        assert_eq!(sectors(&[]), vec!["All"]);
    }
}
