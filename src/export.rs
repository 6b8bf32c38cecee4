use anyhow::{Context, Result};
use atomic_write_file::AtomicWriteFile;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fs;
use std::path::Path;

use crate::entity::Company;
use crate::query::QueryParams;
use crate::scoring::{classify_band, Band, Tone};

/// One ranked row of an exported view.
#[derive(Debug, Clone, Serialize)]
pub struct ExportRow<'a> {
    pub rank: usize,
    #[serde(flatten)]
    pub company: &'a Company,
    pub band: Band,
    pub tone: Tone,
}

/// A query view frozen to disk.
#[derive(Debug, Clone, Serialize)]
pub struct Snapshot<'a> {
    pub generated_at: DateTime<Utc>,
    pub search: &'a str,
    pub sector: &'a str,
    pub sort_field: &'static str,
    pub sort_direction: &'static str,
    pub total: usize,
    pub companies: Vec<ExportRow<'a>>,
}

pub fn snapshot<'a>(view: &[&'a Company], params: &'a QueryParams, total: usize) -> Snapshot<'a> {
    Snapshot {
        generated_at: Utc::now(),
        search: &params.search,
        sector: params.sector.as_str(),
        sort_field: params.sort.field.token(),
        sort_direction: params.sort.direction.token(),
        total,
        companies: view
            .iter()
            .enumerate()
            .map(|(i, &company)| {
                let band = classify_band(company.composite());
                ExportRow {
                    rank: i + 1,
                    company,
                    band,
                    tone: band.tone(),
                }
            })
            .collect(),
    }
}

/// Write a snapshot as pretty JSON, atomically.
///
/// The file is never left half-written. Missing parent directories are created.
pub fn write_snapshot(path: &Path, snapshot: &Snapshot) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {}", parent.display()))?;
    }

    let mut file = AtomicWriteFile::open(path)
        .with_context(|| format!("Failed to open atomic write file at {}", path.display()))?;

    serde_json::to_writer_pretty(&mut file, snapshot).context("Failed to serialize snapshot")?;

    file.commit()
        .with_context(|| format!("Failed to save snapshot to {}", path.display()))?;

    tracing::info!(path = %path.display(), rows = snapshot.companies.len(), "wrote snapshot");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::ModelScores;
    use crate::query::{query, SectorFilter, SortDirection, SortField, SortSpec};
    use std::env;

    fn company(id: u32, ticker: &str, composite: f64) -> Company {
        let scores = ModelScores::new(id, composite, composite, composite).unwrap();
        Company::new(id, ticker, format!("Company {}", id), "Technology", scores, 0.01).unwrap()
    }

    #[test]
    fn test_snapshot_ranks_and_bands() {
        let companies = vec![company(1, "AAA100", 0.5), company(2, "BBB101", 0.8)];
        let params = QueryParams::default();
        let view = query(&companies, &params);
        let snap = snapshot(&view, &params, companies.len());

        assert_eq!(snap.companies[0].rank, 1);
        assert_eq!(snap.companies[0].company.id, 2);
        assert_eq!(snap.companies[0].band, Band::High);
        assert_eq!(snap.companies[1].tone, Tone::Safe);
        assert_eq!(snap.sort_field, "composite");
        assert_eq!(snap.sector, "All");
    }

    #[test]
    fn test_write_snapshot_json() {
        let path = env::temp_dir()
            .join("watchlist_test_export")
            .join("snapshot.json");
        let _ = fs::remove_file(&path);

        let companies = vec![company(1, "AAA100", 0.7)];
        let params = QueryParams {
            search: "aaa".to_string(),
            sector: SectorFilter::parse("Technology"),
            sort: SortSpec {
                field: SortField::Change,
                direction: SortDirection::Ascending,
            },
        };
        let view = query(&companies, &params);
        write_snapshot(&path, &snapshot(&view, &params, 1)).unwrap();

        let written: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(written["sort_direction"], "asc");
        assert_eq!(written["companies"][0]["ticker"], "AAA100");
        assert_eq!(written["companies"][0]["band"], "Medium");
        assert_eq!(written["companies"][0]["tone"], "warning");
        assert!(written["companies"][0]["composite"].is_number());

        let _ = fs::remove_file(&path);
    }
}
