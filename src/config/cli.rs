use crate::core::analyzer::DEFAULT_VALUE_COLUMNS;
use crate::core::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{
    validate_delimiter, validate_distinct, validate_file_extension, validate_non_empty_string,
    validate_path, Validate,
};
use clap::Parser;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "data-report")]
#[command(about = "Summarize two numeric columns of a CSV file as a PDF report")]
pub struct CliConfig {
    /// Delimited input file with a header row
    #[arg(short, long, default_value = "sample_data.csv")]
    pub input: String,

    /// Where to write the PDF report
    #[arg(short, long, default_value = "report.pdf")]
    pub output: String,

    #[arg(long, default_value_t = ',')]
    pub delimiter: char,

    #[arg(long, default_value = "value1")]
    pub value1_column: String,

    #[arg(long, default_value = "value2")]
    pub value2_column: String,

    /// Also write the statistics as JSON to this path
    #[arg(long)]
    pub summary_json: Option<String>,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON lines")]
    pub log_json: bool,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            input: "sample_data.csv".to_string(),
            output: "report.pdf".to_string(),
            delimiter: ',',
            value1_column: DEFAULT_VALUE_COLUMNS[0].to_string(),
            value2_column: DEFAULT_VALUE_COLUMNS[1].to_string(),
            summary_json: None,
            verbose: false,
            log_json: false,
        }
    }
}

impl ConfigProvider for CliConfig {
    fn input_path(&self) -> &str {
        &self.input
    }

    fn output_path(&self) -> &str {
        &self.output
    }

    fn delimiter(&self) -> u8 {
        u8::try_from(self.delimiter).unwrap_or_else(|_| {
            tracing::warn!(
                "Delimiter '{}' is not a single-byte character; falling back to ','",
                self.delimiter
            );
            b','
        })
    }

    fn value_columns(&self) -> [&str; 2] {
        [self.value1_column.as_str(), self.value2_column.as_str()]
    }

    fn summary_json_path(&self) -> Option<&str> {
        self.summary_json.as_deref()
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validate_path("input", &self.input)?;
        validate_path("output", &self.output)?;
        validate_file_extension("output", &self.output, &["pdf"])?;
        validate_delimiter("delimiter", self.delimiter)?;
        validate_non_empty_string("value1_column", &self.value1_column)?;
        validate_non_empty_string("value2_column", &self.value2_column)?;
        validate_distinct("value_columns", &self.value1_column, &self.value2_column)?;

        if let Some(summary) = &self.summary_json {
            validate_path("summary_json", summary)?;
            validate_file_extension("summary_json", summary, &["json"])?;
        }

        Ok(())
    }
}
