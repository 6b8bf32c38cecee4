use anyhow::{Context, Result};
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use super::DataSource;
use crate::entity::CompanyRecord;

/// JSON array of company records.
#[derive(Debug, Clone)]
pub struct JsonSource {
    path: PathBuf,
}

impl JsonSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl DataSource for JsonSource {
    fn describe(&self) -> String {
        format!("json file {}", self.path.display())
    }

    fn fetch(&self) -> Result<Vec<CompanyRecord>> {
        let file = File::open(&self.path)
            .with_context(|| format!("Failed to open data file at {}", self.path.display()))?;
        let records: Vec<CompanyRecord> = serde_json::from_reader(BufReader::new(file))
            .with_context(|| format!("Failed to parse company records in {}", self.path.display()))?;
        Ok(records)
    }
}

/// CSV with a header row: id,ticker,name,sector,baseline,gbm,logistic,change
#[derive(Debug, Clone)]
pub struct CsvSource {
    path: PathBuf,
}

impl CsvSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl DataSource for CsvSource {
    fn describe(&self) -> String {
        format!("csv file {}", self.path.display())
    }

    fn fetch(&self) -> Result<Vec<CompanyRecord>> {
        let mut reader = csv::Reader::from_path(&self.path)
            .with_context(|| format!("Failed to open data file at {}", self.path.display()))?;
        reader
            .deserialize::<CompanyRecord>()
            .enumerate()
            .map(|(i, row)| {
                row.with_context(|| {
                    format!("Invalid row {} in {}", i + 1, self.path.display())
                })
            })
            .collect()
    }
}

/// Pick a file source from the extension: `.csv` is CSV, anything else JSON.
pub fn source_for_path(path: &Path) -> Box<dyn DataSource> {
    let is_csv = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("csv"));
    if is_csv {
        Box::new(CsvSource::new(path))
    } else {
        Box::new(JsonSource::new(path))
    }
}
