//! Header-less delimited tables: UCI class-labelled files and KDD Cup 99.

use std::io::Read;

use csv::{ReaderBuilder, StringRecord};
use dataset_spi::{Dataset, DatasetError, LabelRule, Result};
use tracing::debug;

/// Stream every non-blank record of a header-less table.
///
/// With a space delimiter empty fields are dropped, so runs of spaces act as
/// one separator. Any other delimiter keeps empty fields in place.
pub fn for_each_record<R, F>(reader: R, delimiter: u8, mut f: F) -> Result<()>
where
    R: Read,
    F: FnMut(u64, Vec<&str>) -> Result<()>,
{
    let mut rdr = ReaderBuilder::new()
        .has_headers(false)
        .delimiter(delimiter)
        .flexible(true)
        .from_reader(reader);

    let mut record = StringRecord::new();
    loop {
        let more = rdr
            .read_record(&mut record)
            .map_err(|e| DatasetError::ParseError(e.to_string()))?;
        if !more {
            break;
        }
        let line = record.position().map_or(0, |p| p.line());
        let fields: Vec<&str> = record
            .iter()
            .map(str::trim)
            .filter(|s| delimiter != b' ' || !s.is_empty())
            .collect();
        if fields.iter().all(|s| s.is_empty()) {
            continue;
        }
        f(line, fields)?;
    }
    Ok(())
}

/// Read all records into owned rows.
pub fn read_rows<R: Read>(reader: R, delimiter: u8) -> Result<Vec<Vec<String>>> {
    let mut rows = Vec::new();
    for_each_record(reader, delimiter, |_, fields| {
        rows.push(fields.into_iter().map(String::from).collect());
        Ok(())
    })?;
    Ok(rows)
}

fn parse_feature(field: &str, line: u64) -> Result<f32> {
    field
        .parse::<f32>()
        .map_err(|_| DatasetError::ParseError(format!("line {}: not a number: {:?}", line, field)))
}

fn parse_class(field: &str, line: u64) -> Result<i64> {
    if let Ok(v) = field.parse::<i64>() {
        return Ok(v);
    }
    match field.parse::<f64>() {
        Ok(v) if v.fract() == 0.0 => Ok(v as i64),
        _ => Err(DatasetError::ParseError(format!(
            "line {}: not a class label: {:?}",
            line, field
        ))),
    }
}

/// Parse a UCI-style table whose last column is an integer class.
///
/// Rows are kept when `rule` knows their class; the remaining columns become
/// features.
pub fn parse_uci<R: Read>(
    name: &str,
    reader: R,
    delimiter: u8,
    rule: &LabelRule,
) -> Result<Dataset> {
    let mut rows = Vec::new();
    let mut labels = Vec::new();
    let mut dropped = 0usize;

    for_each_record(reader, delimiter, |line, fields| {
        let (class_field, feature_fields) = fields
            .split_last()
            .ok_or_else(|| DatasetError::ParseError(format!("line {}: empty record", line)))?;
        let class = parse_class(class_field, line)?;
        let Some(label) = rule.classify(class) else {
            dropped += 1;
            return Ok(());
        };
        let row = feature_fields
            .iter()
            .map(|f| parse_feature(f, line))
            .collect::<Result<Vec<f32>>>()?;
        rows.push(row);
        labels.push(label);
        Ok(())
    })?;

    debug!(name, kept = rows.len(), dropped, "parsed uci table");
    if rows.is_empty() {
        return Err(DatasetError::NoData);
    }
    Dataset::from_rows(name, rows, labels)
}

/// Columns dropped from KDD Cup 99 records: protocol, service and flag.
const KDD_SYMBOLIC: [usize; 3] = [1, 2, 3];
const KDD_SERVICE: usize = 2;
const KDD_NORMAL: &str = "normal.";

/// Parse KDD Cup 99 in a single pass, one dataset per requested service.
///
/// Symbolic columns and the label column are dropped; anything other than
/// `normal.` is anomalous.
pub fn parse_kdd<R: Read>(reader: R, services: &[&str]) -> Result<Vec<Dataset>> {
    let mut rows: Vec<Vec<Vec<f32>>> = vec![Vec::new(); services.len()];
    let mut labels: Vec<Vec<bool>> = vec![Vec::new(); services.len()];

    for_each_record(reader, b',', |line, fields| {
        let Some(service) = fields.get(KDD_SERVICE) else {
            return Err(DatasetError::ParseError(format!("line {}: too few columns", line)));
        };
        let Some(slot) = services.iter().position(|s| s == service) else {
            return Ok(());
        };
        let (label, features) = fields
            .split_last()
            .ok_or_else(|| DatasetError::ParseError(format!("line {}: empty record", line)))?;
        let row = features
            .iter()
            .enumerate()
            .filter(|(i, _)| !KDD_SYMBOLIC.contains(i))
            .map(|(_, f)| parse_feature(f, line))
            .collect::<Result<Vec<f32>>>()?;
        rows[slot].push(row);
        labels[slot].push(*label != KDD_NORMAL);
        Ok(())
    })?;

    services
        .iter()
        .zip(rows.into_iter().zip(labels))
        .map(|(service, (r, l))| {
            if r.is_empty() {
                return Err(DatasetError::NoData);
            }
            Dataset::from_rows(service, r, l)
        })
        .collect()
}
