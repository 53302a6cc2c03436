use thiserror::Error;

/// Why the analyzer refused a row set.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AnalysisFailure {
    #[error("no data rows to analyze")]
    EmptyData,

    #[error("required column '{column}' not found in data")]
    MissingColumn { column: String },

    #[error("non-numeric value '{value}' in column '{column}' (record {record})")]
    InvalidValue {
        column: String,
        record: usize,
        value: String,
    },
}

#[derive(Error, Debug)]
pub enum ReportError {
    #[error("File '{path}' not found")]
    NotFoundError { path: String },

    #[error("Error loading data from '{path}': {message}")]
    LoadError { path: String, message: String },

    #[error("Error analyzing data: {0}")]
    AnalysisError(#[from] AnalysisFailure),

    #[error("Render error: {message}")]
    RenderError { message: String },

    #[error("Failed to write '{path}': {source}")]
    WriteError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error in '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration '{field}'")]
    MissingConfigError { field: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Input,
    Analysis,
    Render,
    Output,
    Configuration,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl ReportError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            ReportError::NotFoundError { .. } | ReportError::LoadError { .. } => {
                ErrorCategory::Input
            }
            ReportError::AnalysisError(_) => ErrorCategory::Analysis,
            ReportError::RenderError { .. } => ErrorCategory::Render,
            ReportError::WriteError { .. }
            | ReportError::IoError(_)
            | ReportError::SerializationError(_) => ErrorCategory::Output,
            ReportError::ConfigValidationError { .. }
            | ReportError::InvalidConfigValueError { .. }
            | ReportError::MissingConfigError { .. } => ErrorCategory::Configuration,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Input | ErrorCategory::Analysis => ErrorSeverity::High,
            ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::Render => ErrorSeverity::Critical,
            ErrorCategory::Output => ErrorSeverity::Critical,
        }
    }

    /// Short message for the terminal, without the source chain.
    pub fn user_friendly_message(&self) -> String {
        match self {
            ReportError::NotFoundError { path } => format!("Input file '{}' does not exist", path),
            ReportError::LoadError { path, .. } => format!("Could not read data from '{}'", path),
            ReportError::AnalysisError(AnalysisFailure::EmptyData) => {
                "The input file contains no data rows".to_string()
            }
            ReportError::AnalysisError(AnalysisFailure::MissingColumn { column }) => {
                format!("Required column '{}' not found in data", column)
            }
            ReportError::AnalysisError(AnalysisFailure::InvalidValue {
                column,
                record,
                value,
            }) => format!(
                "Record {} has a non-numeric '{}' value: '{}'",
                record, column, value
            ),
            ReportError::RenderError { .. } => "No analysis results to report".to_string(),
            ReportError::WriteError { path, .. } => format!("Could not write report to '{}'", path),
            ReportError::IoError(e) => format!("File system error: {}", e),
            ReportError::SerializationError(e) => format!("Could not encode statistics: {}", e),
            ReportError::ConfigValidationError { field, message } => {
                format!("Invalid configuration ({}): {}", field, message)
            }
            ReportError::InvalidConfigValueError { field, reason, .. } => {
                format!("Invalid configuration ({}): {}", field, reason)
            }
            ReportError::MissingConfigError { field } => {
                format!("Missing configuration value '{}'", field)
            }
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            ReportError::NotFoundError { .. } => "Check the input path and try again",
            ReportError::LoadError { .. } => {
                "Make sure the file is valid delimited text with a header row"
            }
            ReportError::AnalysisError(AnalysisFailure::EmptyData) => {
                "Add at least one data row below the header"
            }
            ReportError::AnalysisError(AnalysisFailure::MissingColumn { .. }) => {
                "Add the column to the header or choose another column name"
            }
            ReportError::AnalysisError(AnalysisFailure::InvalidValue { .. }) => {
                "Fix or remove the non-numeric value"
            }
            ReportError::RenderError { .. } => "Run the analysis step before rendering",
            ReportError::WriteError { .. } | ReportError::IoError(_) => {
                "Check that the output directory exists and is writable"
            }
            ReportError::SerializationError(_) => "Check the statistics output path",
            ReportError::ConfigValidationError { .. }
            | ReportError::InvalidConfigValueError { .. }
            | ReportError::MissingConfigError { .. } => "Review the configuration values",
        }
    }
}

pub type Result<T> = std::result::Result<T, ReportError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn analysis_failures_share_a_category() {
        let failures = [
            AnalysisFailure::EmptyData,
            AnalysisFailure::MissingColumn {
                column: "value1".to_string(),
            },
            AnalysisFailure::InvalidValue {
                column: "value1".to_string(),
                record: 3,
                value: "abc".to_string(),
            },
        ];

        for failure in failures {
            let err = ReportError::from(failure);
            assert_eq!(err.category(), ErrorCategory::Analysis);
            assert_eq!(err.severity(), ErrorSeverity::High);
        }
    }

    #[test]
    fn messages_name_the_cause() {
        let err = ReportError::NotFoundError {
            path: "missing.csv".to_string(),
        };
        assert_eq!(err.to_string(), "File 'missing.csv' not found");
        assert!(err.user_friendly_message().contains("missing.csv"));

        let err = ReportError::from(AnalysisFailure::InvalidValue {
            column: "value2".to_string(),
            record: 2,
            value: "abc".to_string(),
        });
        assert!(err.to_string().contains("'abc'"));
        assert!(err.user_friendly_message().contains("Record 2"));
    }

    #[test]
    fn write_errors_are_critical() {
        let err = ReportError::WriteError {
            path: "/nope/report.pdf".to_string(),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        assert_eq!(err.category(), ErrorCategory::Output);
        assert_eq!(err.severity(), ErrorSeverity::Critical);
    }
}
