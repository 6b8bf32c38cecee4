use anyhow::Result;
use std::time::Instant;
use tracing::{debug, info, warn};

use crate::entity::Collection;
use crate::scoring::validate_records;
use crate::source::DataSource;

/// Fetch a batch from the source, reject contract violations, and build a
/// fresh collection.
///
/// Called from main.rs for the initial load and from the TUI on reload.
/// Every violation in the batch is reported, not just the first.
pub fn fetch_collection(source: &dyn DataSource) -> Result<Collection> {
    let start = Instant::now();
    debug!(source = %source.describe(), "fetching companies");

    let records = source.fetch()?;
    debug!(count = records.len(), "fetched records");

    if let Err(violations) = validate_records(&records) {
        for violation in &violations {
            warn!(%violation, "rejected record");
        }
        let details = violations
            .iter()
            .map(|v| format!("  - {}", v))
            .collect::<Vec<_>>()
            .join("\n");
        anyhow::bail!(
            "{} contract violation(s) in data from {}:\n{}",
            violations.len(),
            source.describe(),
            details
        );
    }

    let collection = Collection::from_records(records)?;
    info!(
        companies = collection.len(),
        elapsed = ?start.elapsed(),
        "loaded collection"
    );
    Ok(collection)
}
