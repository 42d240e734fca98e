use crate::domain::market::ExportRecord;
use anyhow::{Context, Result};
use rust_xlsxwriter::{Format, Workbook};
use std::path::Path;

const HEADERS: [&str; 5] = ["date", "price", "log_return", "market_cap", "total_volume"];

// Excel caps sheet names at 31 characters
const MAX_SHEET_NAME: usize = 31;

/// Writes records to a single-sheet workbook; undefined log returns stay blank.
pub fn write_xlsx(records: &[ExportRecord], sheet_name: &str, path: &Path) -> Result<()> {
    let mut workbook = Workbook::new();
    let header_format = Format::new().set_bold();
    let price_format = Format::new().set_num_format("0.000");

    let sheet = workbook.add_worksheet();
    let name: String = sheet_name.chars().take(MAX_SHEET_NAME).collect();
    sheet
        .set_name(&name)
        .with_context(|| format!("Invalid sheet name: {}", name))?;

    for (col, header) in HEADERS.iter().enumerate() {
        sheet.write_string_with_format(0, col as u16, *header, &header_format)?;
    }

    for (i, record) in records.iter().enumerate() {
        let row = i as u32 + 1;
        sheet.write_string(row, 0, &record.date)?;
        sheet.write_number_with_format(row, 1, record.price, &price_format)?;
        if let Some(r) = record.log_return {
            sheet.write_number(row, 2, r)?;
        }
        sheet.write_number(row, 3, record.market_cap)?;
        sheet.write_number(row, 4, record.total_volume)?;
    }
    sheet.set_column_width(0, 12)?;

    workbook
        .save(path)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(())
}
