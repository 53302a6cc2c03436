use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One input record, keyed by header name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Row {
    pub fields: HashMap<String, String>,
}

impl Row {
    pub fn get(&self, column: &str) -> Option<&str> {
        self.fields.get(column).map(String::as_str)
    }
}

impl<K, V> FromIterator<(K, V)> for Row
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            fields: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ColumnStats {
    pub avg: f64,
    pub min: f64,
    pub max: f64,
}

impl ColumnStats {
    /// All zeros for an empty slice.
    pub fn from_values(values: &[f64]) -> Self {
        if values.is_empty() {
            return Self::default();
        }

        let min = values.iter().copied().fold(f64::INFINITY, f64::min);
        let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let mean = values.iter().sum::<f64>() / values.len() as f64;

        Self {
            // rounding in the sum can push the mean just outside [min, max]
            avg: mean.clamp(min, max),
            min,
            max,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub count: usize,
    pub value1: ColumnStats,
    pub value2: ColumnStats,
    pub generated_on: String,
}

impl AnalysisResult {
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }
}
