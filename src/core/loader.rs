use crate::domain::model::Row;
use crate::utils::error::{ReportError, Result};
use std::collections::HashSet;

/// Parse delimited text into rows keyed by the header record.
///
/// Every row carries every header column: fields missing from a short record
/// are present and empty, fields past the end of the header are dropped. A
/// repeated header name keeps the value of its last column.
pub fn parse_rows(data: &[u8], delimiter: u8, source: &str) -> Result<Vec<Row>> {
    let load_error = |message: String| ReportError::LoadError {
        path: source.to_string(),
        message,
    };

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(true)
        .flexible(true)
        .from_reader(data);

    let headers = reader
        .headers()
        .map_err(|e| load_error(e.to_string()))?
        .clone();

    let mut seen = HashSet::new();
    for name in headers.iter() {
        if !seen.insert(name) {
            tracing::warn!("Column '{}' appears more than once in {}; using the last one", name, source);
        }
    }
    tracing::debug!("Header columns: {:?}", headers);

    let mut rows = Vec::new();
    for (index, record) in reader.records().enumerate() {
        let record = record.map_err(|e| load_error(e.to_string()))?;
        if record.len() < headers.len() {
            tracing::debug!(
                "Record {} has {} of {} fields",
                index + 1,
                record.len(),
                headers.len()
            );
        }

        // later duplicates overwrite earlier ones on insert
        let row: Row = headers
            .iter()
            .enumerate()
            .map(|(i, name)| (name, record.get(i).unwrap_or_default()))
            .collect();
        rows.push(row);
    }

    Ok(rows)
}
