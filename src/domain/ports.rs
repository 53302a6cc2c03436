use crate::domain::model::{AnalysisResult, Row};
use crate::utils::error::Result;
use chrono::NaiveDateTime;

pub trait Storage {
    /// Missing files surface as `NotFoundError`, other failures as `LoadError`.
    fn read_file(&self, path: &str) -> Result<Vec<u8>>;
    /// Failures surface as `WriteError`.
    fn write_file(&self, path: &str, data: &[u8]) -> Result<()>;
}

pub trait Clock {
    fn now(&self) -> NaiveDateTime;
}

pub trait ConfigProvider {
    fn input_path(&self) -> &str;
    fn output_path(&self) -> &str;
    fn delimiter(&self) -> u8;
    fn value_columns(&self) -> [&str; 2];
    fn summary_json_path(&self) -> Option<&str>;
}

pub trait Pipeline {
    fn load(&self) -> Result<Vec<Row>>;
    fn analyze(&self, rows: &[Row]) -> Result<AnalysisResult>;
    /// Returns the path the document was written to.
    fn render(&self, result: &AnalysisResult) -> Result<String>;
}
