use crate::domain::model::{AnalysisResult, ColumnStats, Row};
use crate::domain::ports::Clock;
use crate::utils::error::{AnalysisFailure, Result};

pub const GENERATED_ON_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

pub const DEFAULT_VALUE_COLUMNS: [&str; 2] = ["value1", "value2"];

/// Summarizes two numeric columns of a row set.
pub struct Analyzer<K: Clock> {
    columns: [String; 2],
    clock: K,
}

impl<K: Clock> Analyzer<K> {
    pub fn new(value1: impl Into<String>, value2: impl Into<String>, clock: K) -> Self {
        Self {
            columns: [value1.into(), value2.into()],
            clock,
        }
    }

    pub fn columns(&self) -> [&str; 2] {
        [self.columns[0].as_str(), self.columns[1].as_str()]
    }

    pub fn analyze(&self, rows: &[Row]) -> Result<AnalysisResult> {
        if rows.is_empty() {
            return Err(AnalysisFailure::EmptyData.into());
        }

        let value1 = ColumnStats::from_values(&column_values(rows, &self.columns[0])?);
        let value2 = ColumnStats::from_values(&column_values(rows, &self.columns[1])?);

        let result = AnalysisResult {
            count: rows.len(),
            value1,
            value2,
            generated_on: self.clock.now().format(GENERATED_ON_FORMAT).to_string(),
        };

        tracing::debug!(
            "Analyzed {} rows: {}={:?}, {}={:?}",
            result.count,
            self.columns[0],
            result.value1,
            self.columns[1],
            result.value2
        );

        Ok(result)
    }
}

/// Values of `column` from every row that has the key.
///
/// A key missing from every row is a missing column; a present value that is
/// not a finite number fails the whole run.
fn column_values(rows: &[Row], column: &str) -> Result<Vec<f64>> {
    let mut present = false;
    let mut values = Vec::with_capacity(rows.len());

    for (index, row) in rows.iter().enumerate() {
        let Some(raw) = row.get(column) else {
            continue;
        };
        present = true;

        match raw.trim().parse::<f64>() {
            Ok(value) if value.is_finite() => values.push(value),
            _ => {
                return Err(AnalysisFailure::InvalidValue {
                    column: column.to_string(),
                    record: index + 1,
                    value: raw.to_string(),
                }
                .into())
            }
        }
    }

    if !present {
        return Err(AnalysisFailure::MissingColumn {
            column: column.to_string(),
        }
        .into());
    }

    Ok(values)
}
