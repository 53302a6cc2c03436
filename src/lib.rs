pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod render;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;
pub use config::TomlConfig;

pub use adapters::{FixedClock, LocalStorage, SystemClock};
pub use crate::core::analyzer::Analyzer;
pub use crate::core::engine::{ReportEngine, ReportOutcome};
pub use crate::core::pipeline::ReportPipeline;
pub use domain::model::{AnalysisResult, ColumnStats, Row};
pub use render::ReportRenderer;
pub use utils::error::{AnalysisFailure, ReportError, Result};
