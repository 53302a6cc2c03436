use clap::Parser;
use data_report::utils::error::{ErrorSeverity, ReportError};
use data_report::utils::{logger, validation::Validate};
use data_report::{CliConfig, LocalStorage, ReportEngine, ReportPipeline};

fn exit_code(e: &ReportError) -> i32 {
    match e.severity() {
        ErrorSeverity::Low => 0,
        ErrorSeverity::Medium => 2,
        ErrorSeverity::High => 1,
        ErrorSeverity::Critical => 3,
    }
}

fn main() {
    // Parse command line arguments
    let config = CliConfig::parse();

    // Initialize logging
    logger::init_logger(config.verbose, config.log_json);

    tracing::info!("Starting data-report");
    tracing::debug!("CLI config: {:?}", config);

    // Validate configuration
    if let Err(e) = config.validate() {
        tracing::error!("Configuration validation failed: {}", e);
        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());
        std::process::exit(exit_code(&e));
    }

    // Create storage, pipeline and engine
    let pipeline = ReportPipeline::new(LocalStorage::default(), config);
    let engine = ReportEngine::new(pipeline);

    // Run the report
    match engine.run() {
        Ok(outcome) => {
            println!("✅ Report generated successfully: {}", outcome.output_path);
        }
        Err(e) => {
            // Log the detailed error
            tracing::error!(
                "Report generation failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );

            // User-facing message and suggestion
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());

            // Exit code follows error severity
            let code = exit_code(&e);
            if code > 0 {
                std::process::exit(code);
            }
        }
    }
}
