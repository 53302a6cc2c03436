use crate::domain::model::AnalysisResult;
use crate::domain::ports::Pipeline;
use crate::utils::error::Result;
use std::time::Instant;

#[derive(Debug, Clone, PartialEq)]
pub struct ReportOutcome {
    pub output_path: String,
    pub result: AnalysisResult,
}

/// Runs the pipeline stages in order, stopping at the first failure.
pub struct ReportEngine<P: Pipeline> {
    pipeline: P,
}

impl<P: Pipeline> ReportEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    pub fn pipeline(&self) -> &P {
        &self.pipeline
    }

    /// Load and analyze without writing anything.
    pub fn analyze(&self) -> Result<AnalysisResult> {
        let started = Instant::now();

        // Load
        tracing::info!("Loading data...");
        let rows = self.pipeline.load()?;
        tracing::info!("Loaded {} records", rows.len());

        // Analyze
        tracing::info!("Analyzing data...");
        let result = self.pipeline.analyze(&rows)?;
        tracing::debug!("Analysis finished in {:?}", started.elapsed());

        Ok(result)
    }

    pub fn run(&self) -> Result<ReportOutcome> {
        tracing::info!("Starting report generation...");
        let started = Instant::now();

        // Load and analyze; nothing is written on failure
        let result = self.analyze()?;

        // Render and write
        tracing::info!("Rendering report...");
        let output_path = self.pipeline.render(&result)?;
        tracing::info!("Report generated successfully: {}", output_path);
        tracing::debug!("Report generation took {:?}", started.elapsed());

        Ok(ReportOutcome {
            output_path,
            result,
        })
    }
}
