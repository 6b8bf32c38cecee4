//! Pluggable providers of company records.

pub mod file;
pub mod synthetic;

pub use file::{source_for_path, CsvSource, JsonSource};
pub use synthetic::SyntheticSource;

use anyhow::{Context, Result};
use std::path::PathBuf;

use crate::config::{SourceConfig, SourceKind};
use crate::entity::CompanyRecord;

/// Produces a batch of raw company records.
///
/// Records are validated by the ingestion step, not by the source.
pub trait DataSource {
    fn describe(&self) -> String;
    fn fetch(&self) -> Result<Vec<CompanyRecord>>;
}

/// Build the configured source. A `path_override` (from the command line)
/// replaces the configured source with a file source.
pub fn from_config(
    config: &SourceConfig,
    path_override: Option<PathBuf>,
    seed_override: Option<u64>,
) -> Result<Box<dyn DataSource>> {
    if let Some(path) = path_override {
        return Ok(source_for_path(&path));
    }

    let source: Box<dyn DataSource> = match config.kind {
        SourceKind::Synthetic => Box::new(SyntheticSource::new(seed_override.or(config.seed))),
        SourceKind::Json => {
            let path = config.path.clone().context("source.path is required for json sources")?;
            Box::new(JsonSource::new(path))
        }
        SourceKind::Csv => {
            let path = config.path.clone().context("source.path is required for csv sources")?;
            Box::new(CsvSource::new(path))
        }
    };
    Ok(source)
}
