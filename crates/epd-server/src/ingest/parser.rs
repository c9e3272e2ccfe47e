//! CSV parsing
//!
//! Turns raw upload bytes into a [`RawTable`]: the header row plus every
//! data row as strings, whitespace-trimmed. Purely syntactic; column and
//! value checks happen in the validator.

use super::IngestError;

/// A parsed but not yet validated table
#[derive(Debug, Clone)]
pub struct RawTable {
    /// Header row, in file order
    pub columns: Vec<String>,
    /// Data rows, each aligned with `columns`
    pub rows: Vec<Vec<String>>,
}

/// Parse CSV bytes into a [`RawTable`].
///
/// Fails with [`IngestError::Parse`] on malformed input (invalid UTF-8,
/// ragged rows) and with [`IngestError::EmptyInput`] when there are no data
/// rows, header-only files included.
pub fn parse_csv(bytes: &[u8]) -> Result<RawTable, IngestError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(bytes);

    let columns: Vec<String> = reader
        .headers()
        .map_err(|e| IngestError::Parse(e.to_string()))?
        .iter()
        .map(str::to_string)
        .collect();

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|e| IngestError::Parse(e.to_string()))?;
        rows.push(record.iter().map(str::to_string).collect());
    }

    if rows.is_empty() {
        return Err(IngestError::EmptyInput);
    }

    Ok(RawTable { columns, rows })
}
