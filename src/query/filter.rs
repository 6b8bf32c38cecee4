use super::params::SectorFilter;
use crate::entity::Company;

/// Empty search matches everything; otherwise a case-insensitive substring of name or ticker.
pub fn matches_search(company: &Company, search: &str) -> bool {
    if search.is_empty() {
        return true;
    }
    let needle = search.to_lowercase();
    company.name.to_lowercase().contains(&needle) || company.ticker.to_lowercase().contains(&needle)
}

pub fn matches_sector(company: &Company, sector: &SectorFilter) -> bool {
    sector.matches(&company.sector)
}

/// Both predicates must hold.
pub fn matches(company: &Company, search: &str, sector: &SectorFilter) -> bool {
    matches_search(company, search) && matches_sector(company, sector)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::ModelScores;

    fn company(ticker: &str, name: &str, sector: &str) -> Company {
        let scores = ModelScores::new(1, 0.5, 0.5, 0.5).unwrap();
        Company::new(1, ticker, name, sector, scores, 0.0).unwrap()
    }

    #[test]
    fn test_empty_search_matches() {
        assert!(matches_search(&company("SP104", "Stellar Pharma", "Healthcare"), ""));
    }

    #[test]
    fn test_search_name_case_insensitive() {
        let c = company("SP104", "Stellar Pharma", "Healthcare");
        assert!(matches_search(&c, "stellar"));
        assert!(matches_search(&c, "PHAR"));
        assert!(!matches_search(&c, "biotech"));
    }

    #[test]
    fn test_search_ticker() {
        let c = company("SP104", "Stellar Pharma", "Healthcare");
        assert!(matches_search(&c, "sp10"));
    }

    #[test]
    fn test_conjunction() {
        let c = company("SP104", "Stellar Pharma", "Healthcare");
        assert!(matches(&c, "stellar", &SectorFilter::All));
        assert!(matches(&c, "stellar", &SectorFilter::parse("Healthcare")));
        assert!(!matches(&c, "stellar", &SectorFilter::parse("Financials")));
        assert!(!matches(&c, "zenith", &SectorFilter::parse("Healthcare")));
    }
}
