use crate::adapters::clock::SystemClock;
use crate::core::analyzer::Analyzer;
use crate::core::loader::parse_rows;
use crate::domain::model::{AnalysisResult, Row};
use crate::domain::ports::{Clock, ConfigProvider, Pipeline, Storage};
use crate::render::ReportRenderer;
use crate::utils::error::Result;

/// Delimited file in, PDF report out.
pub struct ReportPipeline<S: Storage, C: ConfigProvider, K: Clock = SystemClock> {
    storage: S,
    config: C,
    clock: K,
}

impl<S: Storage, C: ConfigProvider> ReportPipeline<S, C, SystemClock> {
    pub fn new(storage: S, config: C) -> Self {
        Self::with_clock(storage, config, SystemClock)
    }
}

impl<S: Storage, C: ConfigProvider, K: Clock> ReportPipeline<S, C, K> {
    pub fn with_clock(storage: S, config: C, clock: K) -> Self {
        Self {
            storage,
            config,
            clock,
        }
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }
}

impl<S: Storage, C: ConfigProvider, K: Clock> Pipeline for ReportPipeline<S, C, K> {
    fn load(&self) -> Result<Vec<Row>> {
        let path = self.config.input_path();
        let data = self.storage.read_file(path)?;
        tracing::debug!("Read {} bytes from {}", data.len(), path);

        parse_rows(&data, self.config.delimiter(), path)
    }

    fn analyze(&self, rows: &[Row]) -> Result<AnalysisResult> {
        let [value1, value2] = self.config.value_columns();
        Analyzer::new(value1, value2, &self.clock).analyze(rows)
    }

    fn render(&self, result: &AnalysisResult) -> Result<String> {
        let output_path = self.config.output_path();
        let document = ReportRenderer::render(result, self.config.input_path())?;

        tracing::debug!("Writing PDF ({} bytes) to storage", document.len());
        self.storage.write_file(output_path, &document)?;

        if let Some(summary_path) = self.config.summary_json_path() {
            let json = serde_json::to_vec_pretty(result)?;
            self.storage.write_file(summary_path, &json)?;
            tracing::info!("Statistics written to {}", summary_path);
        }

        Ok(output_path.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::clock::FixedClock;
    use crate::utils::error::{AnalysisFailure, ReportError};
    use chrono::NaiveDate;
    use std::cell::RefCell;
    use std::collections::HashMap;
    use std::io::{Error, ErrorKind};

    #[derive(Default)]
    struct MockStorage {
        files: RefCell<HashMap<String, Vec<u8>>>,
        read_only: bool,
    }

    impl MockStorage {
        fn with_file(path: &str, data: &str) -> Self {
            let storage = Self::default();
            storage
                .files
                .borrow_mut()
                .insert(path.to_string(), data.as_bytes().to_vec());
            storage
        }

        fn get_file(&self, path: &str) -> Option<Vec<u8>> {
            self.files.borrow().get(path).cloned()
        }
    }

    impl Storage for MockStorage {
        fn read_file(&self, path: &str) -> Result<Vec<u8>> {
            self.files
                .borrow()
                .get(path)
                .cloned()
                .ok_or_else(|| ReportError::NotFoundError {
                    path: path.to_string(),
                })
        }

        fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
            if self.read_only {
                return Err(ReportError::WriteError {
                    path: path.to_string(),
                    source: Error::new(ErrorKind::PermissionDenied, "read-only"),
                });
            }
            self.files.borrow_mut().insert(path.to_string(), data.to_vec());
            Ok(())
        }
    }

    struct TestConfig {
        summary: Option<String>,
        columns: [String; 2],
    }

    impl Default for TestConfig {
        fn default() -> Self {
            Self {
                summary: None,
                columns: ["value1".to_string(), "value2".to_string()],
            }
        }
    }

    impl ConfigProvider for TestConfig {
        fn input_path(&self) -> &str {
            "data.csv"
        }

        fn output_path(&self) -> &str {
            "out/report.pdf"
        }

        fn delimiter(&self) -> u8 {
            b','
        }

        fn value_columns(&self) -> [&str; 2] {
            [self.columns[0].as_str(), self.columns[1].as_str()]
        }

        fn summary_json_path(&self) -> Option<&str> {
            self.summary.as_deref()
        }
    }

    fn clock() -> FixedClock {
        FixedClock(
            NaiveDate::from_ymd_opt(2025, 1, 2)
                .unwrap()
                .and_hms_opt(3, 4, 5)
                .unwrap(),
        )
    }

    const CSV: &str = "id,value1,value2\n1,1,10\n2,3,20\n";

    #[test]
    fn load_analyze_render() {
        let pipeline = ReportPipeline::with_clock(
            MockStorage::with_file("data.csv", CSV),
            TestConfig::default(),
            clock(),
        );

        let rows = pipeline.load().unwrap();
        assert_eq!(rows.len(), 2);

        let result = pipeline.analyze(&rows).unwrap();
        assert_eq!(result.generated_on, "2025-01-02 03:04:05");
        assert_eq!(result.value2.avg, 15.0);

        let output = pipeline.render(&result).unwrap();
        assert_eq!(output, "out/report.pdf");

        let pdf = pipeline.storage().get_file("out/report.pdf").unwrap();
        assert!(pdf.starts_with(b"%PDF-1.4"));
        assert!(String::from_utf8_lossy(&pdf).contains("(Data source: data.csv) Tj"));
    }

    #[test]
    fn missing_input_is_not_found() {
        let pipeline = ReportPipeline::with_clock(MockStorage::default(), TestConfig::default(), clock());
        assert!(matches!(pipeline.load(), Err(ReportError::NotFoundError { .. })));
    }

    #[test]
    fn configured_columns_drive_the_analysis() {
        let config = TestConfig {
            columns: ["value2".to_string(), "id".to_string()],
            ..TestConfig::default()
        };
        let pipeline = ReportPipeline::with_clock(MockStorage::with_file("data.csv", CSV), config, clock());

        let rows = pipeline.load().unwrap();
        let result = pipeline.analyze(&rows).unwrap();
        assert_eq!(result.value1.max, 20.0);
        assert_eq!(result.value2.avg, 1.5);
    }

    #[test]
    fn missing_column_is_reported() {
        let pipeline = ReportPipeline::with_clock(
            MockStorage::with_file("data.csv", "id,value2\n1,2\n"),
            TestConfig::default(),
            clock(),
        );

        let rows = pipeline.load().unwrap();
        let err = pipeline.analyze(&rows).unwrap_err();
        assert!(matches!(
            err,
            ReportError::AnalysisError(AnalysisFailure::MissingColumn { .. })
        ));
    }

    #[test]
    fn truncated_record_is_an_invalid_value() {
        let pipeline = ReportPipeline::with_clock(
            MockStorage::with_file("data.csv", "value1,value2\n1,10\n5\n"),
            TestConfig::default(),
            clock(),
        );

        let rows = pipeline.load().unwrap();
        let err = pipeline.analyze(&rows).unwrap_err();
        assert!(matches!(
            err,
            ReportError::AnalysisError(AnalysisFailure::InvalidValue { ref column, record: 2, ref value })
                if column == "value2" && value.is_empty()
        ));
    }

    #[test]
    fn every_record_short_still_names_a_bad_value() {
        let pipeline = ReportPipeline::with_clock(
            MockStorage::with_file("data.csv", "value1,value2\n1\n5\n"),
            TestConfig::default(),
            clock(),
        );

        let rows = pipeline.load().unwrap();
        let err = pipeline.analyze(&rows).unwrap_err();
        assert!(matches!(
            err,
            ReportError::AnalysisError(AnalysisFailure::InvalidValue { ref column, record: 1, .. })
                if column == "value2"
        ));
    }

    #[test]
    fn summary_json_is_written_when_configured() {
        let config = TestConfig {
            summary: Some("out/summary.json".to_string()),
            ..TestConfig::default()
        };
        let pipeline = ReportPipeline::with_clock(MockStorage::with_file("data.csv", CSV), config, clock());

        let rows = pipeline.load().unwrap();
        let result = pipeline.analyze(&rows).unwrap();
        pipeline.render(&result).unwrap();

        let json = pipeline.storage().get_file("out/summary.json").unwrap();
        let decoded: AnalysisResult = serde_json::from_slice(&json).unwrap();
        assert_eq!(decoded, result);
    }

    #[test]
    fn unwritable_sink_is_a_write_error() {
        let storage = MockStorage {
            read_only: true,
            ..MockStorage::with_file("data.csv", CSV)
        };
        let pipeline = ReportPipeline::with_clock(storage, TestConfig::default(), clock());

        let rows = pipeline.load().unwrap();
        let result = pipeline.analyze(&rows).unwrap();
        assert!(matches!(
            pipeline.render(&result),
            Err(ReportError::WriteError { .. })
        ));
    }
}
