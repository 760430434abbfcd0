//! Numeric column loading for the `period` command.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use anyhow::{anyhow, bail, Context, Result};

/// Resolve `column` against the header row, by name first and then as an index.
fn column_index(headers: &csv::StringRecord, column: &str) -> Result<usize> {
    if let Some(idx) = headers.iter().position(|h| h.trim() == column) {
        return Ok(idx);
    }
    match column.parse::<usize>() {
        Ok(idx) if idx < headers.len() => Ok(idx),
        Ok(idx) => bail!("column index {} out of range ({} columns)", idx, headers.len()),
        Err(_) => Err(anyhow!("column '{}' not found", column)),
    }
}

/// Read one numeric column from CSV with a header row. Blank cells are skipped.
pub fn read_column<R: Read>(reader: R, column: &str) -> Result<Vec<f64>> {
    let mut reader = csv::Reader::from_reader(reader);
    let headers = reader.headers().context("failed to read headers")?.clone();
    let idx = column_index(&headers, column)?;

    let mut data = Vec::new();
    for (row, result) in reader.records().enumerate() {
        let record = result.context("failed to read record")?;
        let Some(cell) = record.get(idx).map(str::trim) else {
            continue;
        };
        if cell.is_empty() {
            continue;
        }
        let value = cell
            .parse::<f64>()
            .with_context(|| format!("row {}: '{}' is not a number", row + 1, cell))?;
        data.push(value);
    }

    if data.is_empty() {
        bail!("no numeric data in column '{}'", column);
    }
    Ok(data)
}

/// Load a numeric column from a CSV file.
pub fn load_csv_column(path: &Path, column: &str) -> Result<Vec<f64>> {
    let file = File::open(path).with_context(|| format!("failed to open {}", path.display()))?;
    read_column(BufReader::new(file), column)
        .with_context(|| format!("failed to load {}", path.display()))
}
