use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::query::{SectorFilter, SortDirection, SortField, SortSpec};

/// Top-level configuration.
///
/// Example YAML:
/// ```yaml
/// source:
///   kind: json
///   path: ~/data/watchlist.json
/// view:
///   sort_field: gbm
///   sort_direction: asc
///   sector: Technology
/// auto_refresh: 5m
/// theme: dark
/// ```
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub source: SourceConfig,

    #[serde(default)]
    pub view: ViewConfig,

    /// TUI reload interval as a humantime duration ("30s", "5m"). Disabled when absent.
    #[serde(default)]
    pub auto_refresh: Option<String>,

    #[serde(default)]
    pub theme: ThemeMode,
}

#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    #[default]
    Synthetic,
    Json,
    Csv,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct SourceConfig {
    #[serde(default)]
    pub kind: SourceKind,

    /// File to read for `json` and `csv` sources
    #[serde(default)]
    pub path: Option<PathBuf>,

    /// Seed for the synthetic source; a random seed is used when absent
    #[serde(default)]
    pub seed: Option<u64>,
}

/// Initial watchlist view. Tokens are kept as strings so validation can
/// report every bad value at once.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ViewConfig {
    #[serde(default)]
    pub sort_field: Option<String>,

    #[serde(default)]
    pub sort_direction: Option<String>,

    #[serde(default)]
    pub sector: Option<String>,
}

impl ViewConfig {
    /// Sort spec with defaults (composite, descending) for missing or invalid tokens.
    /// Run `validate_config` first to surface invalid tokens.
    pub fn sort_spec(&self) -> SortSpec {
        let defaults = SortSpec::default();
        SortSpec {
            field: self
                .sort_field
                .as_deref()
                .and_then(|s| s.parse::<SortField>().ok())
                .unwrap_or(defaults.field),
            direction: self
                .sort_direction
                .as_deref()
                .and_then(|s| s.parse::<SortDirection>().ok())
                .unwrap_or(defaults.direction),
        }
    }

    pub fn sector_filter(&self) -> SectorFilter {
        self.sector
            .as_deref()
            .map(SectorFilter::parse)
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    #[default]
    Auto,
    Dark,
    Light,
}
