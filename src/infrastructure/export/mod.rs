//! Table export to delimited text and spreadsheet files.

mod csv_writer;
mod xlsx_writer;

pub use csv_writer::write_csv;
pub use xlsx_writer::write_xlsx;

use crate::domain::market::MarketTable;
use anyhow::{Context, Result};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::info;

/// Target file format(s) for an export
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Xlsx,
    Both,
}

impl ExportFormat {
    fn extensions(&self) -> &'static [&'static str] {
        match self {
            Self::Csv => &["csv"],
            Self::Xlsx => &["xlsx"],
            Self::Both => &["csv", "xlsx"],
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Csv => write!(f, "csv"),
            Self::Xlsx => write!(f, "xlsx"),
            Self::Both => write!(f, "both"),
        }
    }
}

impl FromStr for ExportFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "csv" => Ok(Self::Csv),
            "xlsx" | "excel" => Ok(Self::Xlsx),
            "both" => Ok(Self::Both),
            _ => anyhow::bail!("Invalid format: {}. Must be 'csv', 'xlsx' or 'both'", s),
        }
    }
}

/// Writes tables into a fixed output directory.
#[derive(Debug, Clone)]
pub struct FileExporter {
    output_dir: PathBuf,
}

impl FileExporter {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Exports `table` as `<output_dir>/<stem>.<ext>` for each requested format.
    pub fn export(&self, table: &MarketTable, stem: &str, format: ExportFormat) -> Result<Vec<PathBuf>> {
        if table.is_empty() {
            anyhow::bail!("Nothing to export: table is empty");
        }

        std::fs::create_dir_all(&self.output_dir).with_context(|| {
            format!(
                "Failed to create export directory {}",
                self.output_dir.display()
            )
        })?;

        let stem = sanitize_stem(stem);
        let records = table.to_records();
        let mut written = Vec::new();

        for ext in format.extensions() {
            let path = self.output_dir.join(format!("{}.{}", stem, ext));
            match *ext {
                "csv" => write_csv(&records, &path)?,
                _ => write_xlsx(&records, &stem, &path)?,
            }
            info!("Exported {} rows to {}", records.len(), path.display());
            written.push(path);
        }

        Ok(written)
    }
}

/// Keeps file stems to `[A-Za-z0-9_-]`.
fn sanitize_stem(stem: &str) -> String {
    let cleaned: String = stem
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect();
    if cleaned.is_empty() {
        "market_data".to_string()
    } else {
        cleaned
    }
}
