use super::schema::{Config, SourceKind};
use crate::query::{SortDirection, SortField};

/// Validate configuration at startup.
/// Returns all validation errors at once (not just the first).
pub fn validate_config(config: &Config) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();

    match config.source.kind {
        SourceKind::Json | SourceKind::Csv => {
            if config.source.path.is_none() {
                errors.push(format!(
                    "source.path: required for '{}' sources",
                    source_kind_name(config.source.kind)
                ));
            }
            if config.source.seed.is_some() {
                errors.push("source.seed: only applies to synthetic sources".to_string());
            }
        }
        SourceKind::Synthetic => {
            if config.source.path.is_some() {
                errors.push("source.path: not used by synthetic sources".to_string());
            }
        }
    }

    if let Some(ref field) = config.view.sort_field {
        if let Err(e) = field.parse::<SortField>() {
            errors.push(format!("view.sort_field: {}", e));
        }
    }

    if let Some(ref direction) = config.view.sort_direction {
        if let Err(e) = direction.parse::<SortDirection>() {
            errors.push(format!("view.sort_direction: {}", e));
        }
    }

    if let Some(ref sector) = config.view.sector {
        if sector.trim().is_empty() {
            errors.push("view.sector: must not be empty (use 'All' for every sector)".to_string());
        }
    }

    if let Some(ref interval) = config.auto_refresh {
        match humantime::parse_duration(interval) {
            Ok(d) if d.as_secs() == 0 => {
                errors.push("auto_refresh: must be at least one second".to_string());
            }
            Ok(_) => {}
            Err(e) => errors.push(format!("auto_refresh: invalid duration '{}' - {}", interval, e)),
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn source_kind_name(kind: SourceKind) -> &'static str {
    match kind {
        SourceKind::Synthetic => "synthetic",
        SourceKind::Json => "json",
        SourceKind::Csv => "csv",
    }
}
