use crate::core::analyzer::DEFAULT_VALUE_COLUMNS;
use crate::core::ConfigProvider;
use crate::utils::error::{ReportError, Result};
use crate::utils::validation::{self, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::OnceLock;

pub const DEFAULT_OUTPUT_PATH: &str = "report.pdf";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    pub source: SourceConfig,
    #[serde(default)]
    pub analysis: AnalysisConfig,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    pub path: Option<String>,
    /// A single character; TOML has no char type.
    pub delimiter: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisConfig {
    pub value1_column: String,
    pub value2_column: String,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            value1_column: DEFAULT_VALUE_COLUMNS[0].to_string(),
            value2_column: DEFAULT_VALUE_COLUMNS[1].to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OutputConfig {
    pub path: Option<String>,
    pub summary_json: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default)]
    pub verbose: bool,
    #[serde(default)]
    pub format: LogFormat,
}

fn env_var_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\$\{([^}]+)\}").expect("valid env var pattern"))
}

impl TomlConfig {
    /// Load configuration from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(ReportError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// Parse configuration text, substituting `${VAR}` from the environment.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| ReportError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Unset variables are left as written.
    fn substitute_env_vars(content: &str) -> String {
        env_var_pattern()
            .replace_all(content, |caps: &regex::Captures| {
                let var_name = &caps[1];
                std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
            })
            .into_owned()
    }

    pub fn verbose(&self) -> bool {
        self.logging.verbose
    }

    pub fn json_logs(&self) -> bool {
        self.logging.format == LogFormat::Json
    }

    fn delimiter_char(&self) -> Result<char> {
        let Some(text) = &self.source.delimiter else {
            return Ok(',');
        };

        let mut chars = text.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Ok(c),
            _ => Err(ReportError::InvalidConfigValueError {
                field: "source.delimiter".to_string(),
                value: text.clone(),
                reason: "Delimiter must be exactly one character".to_string(),
            }),
        }
    }

    pub fn validate_config(&self) -> Result<()> {
        let input = validation::validate_required_field("source.path", &self.source.path)?;
        validation::validate_path("source.path", input)?;

        let delimiter = self.delimiter_char()?;
        validation::validate_delimiter("source.delimiter", delimiter)?;

        validation::validate_path("output.path", self.output_path())?;
        validation::validate_file_extension("output.path", self.output_path(), &["pdf"])?;
        if let Some(summary) = &self.output.summary_json {
            validation::validate_path("output.summary_json", summary)?;
            validation::validate_file_extension("output.summary_json", summary, &["json"])?;
        }

        validation::validate_non_empty_string("analysis.value1_column", &self.analysis.value1_column)?;
        validation::validate_non_empty_string("analysis.value2_column", &self.analysis.value2_column)?;
        validation::validate_distinct(
            "analysis",
            &self.analysis.value1_column,
            &self.analysis.value2_column,
        )?;

        Ok(())
    }
}

impl ConfigProvider for TomlConfig {
    fn input_path(&self) -> &str {
        self.source.path.as_deref().unwrap_or_default()
    }

    fn output_path(&self) -> &str {
        self.output.path.as_deref().unwrap_or(DEFAULT_OUTPUT_PATH)
    }

    fn delimiter(&self) -> u8 {
        match self.delimiter_char().map(u8::try_from) {
            Ok(Ok(byte)) => byte,
            _ => {
                tracing::warn!(
                    "source.delimiter {:?} is not a single-byte character; falling back to ','",
                    self.source.delimiter.as_deref().unwrap_or_default()
                );
                b','
            }
        }
    }

    fn value_columns(&self) -> [&str; 2] {
        [
            self.analysis.value1_column.as_str(),
            self.analysis.value2_column.as_str(),
        ]
    }

    fn summary_json_path(&self) -> Option<&str> {
        self.output.summary_json.as_deref()
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
