//! Row validation
//!
//! Checks a parsed table against the required-column schema and folds each
//! data row into a typed [`EquipmentRecord`], collecting every row-level
//! violation before deciding success or failure. Side-effect-free.

use epd_common::types::EquipmentRecord;

use super::parser::RawTable;
use super::IngestError;

/// Columns every upload must carry
pub const REQUIRED_COLUMNS: [&str; 5] = [
    "Equipment Name",
    "Type",
    "Flowrate",
    "Pressure",
    "Temperature",
];

/// Violation messages carried on a `Content` error; the total count is
/// reported separately
pub const MAX_REPORTED_VIOLATIONS: usize = 10;

/// Validate a parsed table and produce the typed records.
///
/// Violation messages are identified by 1-based row number counting the
/// header as row 1, so the first data row is row 2.
pub fn validate(table: &RawTable) -> Result<Vec<EquipmentRecord>, IngestError> {
    if table.rows.is_empty() {
        return Err(IngestError::EmptyInput);
    }

    let columns = resolve_columns(table)?;

    let mut records = Vec::with_capacity(table.rows.len());
    let mut violations = Vec::new();

    for (idx, row) in table.rows.iter().enumerate() {
        let row_num = idx + 2;
        match validate_row(row, row_num, &columns) {
            Ok(record) => records.push(record),
            Err(mut row_violations) => violations.append(&mut row_violations),
        }
    }

    if !violations.is_empty() {
        let total = violations.len();
        violations.truncate(MAX_REPORTED_VIOLATIONS);
        return Err(IngestError::Content { violations, total });
    }

    Ok(records)
}

/// Positions of the required columns within the table header
struct ColumnIndices {
    name: usize,
    kind: usize,
    flowrate: usize,
    pressure: usize,
    temperature: usize,
}

fn resolve_columns(table: &RawTable) -> Result<ColumnIndices, IngestError> {
    let position = |name: &str| table.columns.iter().position(|c| c == name);

    let missing: Vec<String> = REQUIRED_COLUMNS
        .iter()
        .filter(|name| position(name).is_none())
        .map(|name| name.to_string())
        .collect();

    if !missing.is_empty() {
        return Err(IngestError::Schema {
            missing,
            found: table.columns.clone(),
        });
    }

    // All positions exist once the missing check passed.
    let resolve = |name: &str| position(name).unwrap_or_default();
    Ok(ColumnIndices {
        name: resolve("Equipment Name"),
        kind: resolve("Type"),
        flowrate: resolve("Flowrate"),
        pressure: resolve("Pressure"),
        temperature: resolve("Temperature"),
    })
}

/// Validate one row, collecting every field violation it carries.
fn validate_row(
    row: &[String],
    row_num: usize,
    columns: &ColumnIndices,
) -> Result<EquipmentRecord, Vec<String>> {
    let cell = |idx: usize| row.get(idx).map(String::as_str).unwrap_or("");

    let mut violations = Vec::new();

    let name = cell(columns.name).trim();
    if name.is_empty() {
        violations.push(format!("Row {row_num}: Equipment Name is required"));
    }

    let kind = cell(columns.kind).trim();
    if kind.is_empty() {
        violations.push(format!("Row {row_num}: Type is required"));
    }

    let flowrate = parse_measure(cell(columns.flowrate), "Flowrate", row_num, &mut violations);
    let pressure = parse_measure(cell(columns.pressure), "Pressure", row_num, &mut violations);
    let temperature = parse_measure(
        cell(columns.temperature),
        "Temperature",
        row_num,
        &mut violations,
    );

    if !violations.is_empty() {
        return Err(violations);
    }

    Ok(EquipmentRecord {
        equipment_name: name.to_string(),
        equipment_type: kind.to_string(),
        flowrate,
        pressure,
        temperature,
    })
}

/// Parse one numeric cell; NaN and infinities are rejected.
fn parse_measure(raw: &str, column: &str, row_num: usize, violations: &mut Vec<String>) -> f64 {
    match raw.trim().parse::<f64>() {
        Ok(value) if value.is_finite() => value,
        _ => {
            violations.push(format!("Row {row_num}: {column} must be a finite number"));
            0.0
        },
    }
}
