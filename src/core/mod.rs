pub mod analyzer;
pub mod engine;
pub mod loader;
pub mod pipeline;

pub use crate::domain::model::{AnalysisResult, ColumnStats, Row};
pub use crate::domain::ports::{Clock, ConfigProvider, Pipeline, Storage};
pub use crate::utils::error::Result;
