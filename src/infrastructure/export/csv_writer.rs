use crate::domain::market::ExportRecord;
use anyhow::{Context, Result};
use std::path::Path;

/// Writes records with a header row; an undefined log return is an empty field.
pub fn write_csv(records: &[ExportRecord], path: &Path) -> Result<()> {
    let mut wtr = csv::WriterBuilder::new()
        .has_headers(true)
        .from_path(path)
        .with_context(|| format!("Failed to create {}", path.display()))?;

    for record in records {
        wtr.serialize(record)
            .with_context(|| format!("Failed to write row {} to {}", record.date, path.display()))?;
    }
    wtr.flush()
        .with_context(|| format!("Failed to flush {}", path.display()))?;
    Ok(())
}
