use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::entity::{Company, Model};
use crate::error::ContractViolation;

/// Sentinel sector value that matches every company.
pub const ALL_SECTORS: &str = "All";

/// Numeric field a view can be ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum SortField {
    Composite,
    Baseline,
    Gbm,
    Logistic,
    Change,
}

impl SortField {
    pub const ALL: [SortField; 5] = [
        SortField::Composite,
        SortField::Baseline,
        SortField::Gbm,
        SortField::Logistic,
        SortField::Change,
    ];

    pub fn token(&self) -> &'static str {
        match self {
            SortField::Composite => "composite",
            SortField::Baseline => "baseline",
            SortField::Gbm => "gbm",
            SortField::Logistic => "logistic",
            SortField::Change => "change",
        }
    }

    pub fn header(&self) -> &'static str {
        match self {
            SortField::Composite => "Composite",
            SortField::Baseline => Model::Baseline.short_label(),
            SortField::Gbm => Model::Gbm.short_label(),
            SortField::Logistic => Model::Logistic.short_label(),
            SortField::Change => "Change",
        }
    }

    pub fn value(&self, company: &Company) -> f64 {
        match self {
            SortField::Composite => company.composite(),
            SortField::Baseline => company.scores().baseline(),
            SortField::Gbm => company.scores().gbm(),
            SortField::Logistic => company.scores().logistic(),
            SortField::Change => company.change,
        }
    }
}

impl fmt::Display for SortField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

impl FromStr for SortField {
    type Err = ContractViolation;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SortField::ALL
            .into_iter()
            .find(|field| field.token().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ContractViolation::UnknownSortField(s.to_string()))
    }
}

impl TryFrom<String> for SortField {
    type Error = ContractViolation;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<SortField> for String {
    fn from(field: SortField) -> Self {
        field.token().to_string()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn toggled(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }

    pub fn token(&self) -> &'static str {
        match self {
            SortDirection::Ascending => "asc",
            SortDirection::Descending => "desc",
        }
    }

    /// Header arrow for the active sort column
    pub fn arrow(&self) -> &'static str {
        match self {
            SortDirection::Ascending => "↑",
            SortDirection::Descending => "↓",
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

impl FromStr for SortDirection {
    type Err = ContractViolation;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "asc" | "ascending" => Ok(SortDirection::Ascending),
            "desc" | "descending" => Ok(SortDirection::Descending),
            _ => Err(ContractViolation::UnknownSortDirection(s.to_string())),
        }
    }
}

impl TryFrom<String> for SortDirection {
    type Error = ContractViolation;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<SortDirection> for String {
    fn from(direction: SortDirection) -> Self {
        direction.token().to_string()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortSpec {
    pub field: SortField,
    pub direction: SortDirection,
}

impl Default for SortSpec {
    fn default() -> Self {
        Self {
            field: SortField::Composite,
            direction: SortDirection::Descending,
        }
    }
}

/// Either every sector or exactly one.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SectorFilter {
    #[default]
    All,
    Only(String),
}

impl SectorFilter {
    pub fn parse(s: &str) -> Self {
        if s == ALL_SECTORS {
            SectorFilter::All
        } else {
            SectorFilter::Only(s.to_string())
        }
    }

    pub fn matches(&self, sector: &str) -> bool {
        match self {
            SectorFilter::All => true,
            SectorFilter::Only(wanted) => wanted == sector,
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            SectorFilter::All => ALL_SECTORS,
            SectorFilter::Only(sector) => sector,
        }
    }
}

impl fmt::Display for SectorFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Arguments for one `query` call.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct QueryParams {
    pub search: String,
    pub sector: SectorFilter,
    pub sort: SortSpec,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_sort_field() {
        assert_eq!("gbm".parse::<SortField>().unwrap(), SortField::Gbm);
        assert_eq!("Composite".parse::<SortField>().unwrap(), SortField::Composite);
        assert_eq!(
            "volume".parse::<SortField>().unwrap_err(),
            ContractViolation::UnknownSortField("volume".to_string())
        );
    }

    #[test]
    fn test_parse_sort_direction() {
        assert_eq!("asc".parse::<SortDirection>().unwrap(), SortDirection::Ascending);
        assert_eq!("DESC".parse::<SortDirection>().unwrap(), SortDirection::Descending);
        assert!("sideways".parse::<SortDirection>().is_err());
    }

    #[test]
    fn test_toggle_alternates() {
        let d = SortDirection::Descending;
        assert_eq!(d.toggled(), SortDirection::Ascending);
        assert_eq!(d.toggled().toggled(), SortDirection::Descending);
    }

    #[test]
    fn test_sector_filter_sentinel() {
        assert_eq!(SectorFilter::parse("All"), SectorFilter::All);
        assert_eq!(
            SectorFilter::parse("Healthcare"),
            SectorFilter::Only("Healthcare".to_string())
        );
        assert!(SectorFilter::All.matches("Anything"));
        // Exact match, not case-insensitive
        assert!(!SectorFilter::parse("healthcare").matches("Healthcare"));
    }

    #[test]
    fn test_serde_tokens() {
        let field: SortField = serde_saphyr::from_str("logistic").unwrap();
        assert_eq!(field, SortField::Logistic);
        let direction: SortDirection = serde_saphyr::from_str("asc").unwrap();
        assert_eq!(direction, SortDirection::Ascending);
        assert!(serde_saphyr::from_str::<SortField>("bogus").is_err());
    }
}
