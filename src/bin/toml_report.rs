use anyhow::Context;
use clap::Parser;
use data_report::config::toml_config::TomlConfig;
use data_report::core::ConfigProvider;
use data_report::utils::{logger, validation::Validate};
use data_report::{LocalStorage, ReportEngine, ReportPipeline};

#[derive(Parser)]
#[command(name = "toml-report")]
#[command(about = "Generate a data report from a TOML configuration file")]
struct Args {
    /// Path to TOML configuration file
    #[arg(short, long, default_value = "report-config.toml")]
    config: String,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Override the input file from the config
    #[arg(long)]
    input: Option<String>,

    /// Override the output file from the config
    #[arg(long)]
    output: Option<String>,

    /// Load and analyze only; write nothing
    #[arg(long)]
    dry_run: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Load configuration
    let mut config = TomlConfig::from_file(&args.config)
        .with_context(|| format!("Failed to load config file '{}'", args.config))?;

    // Initialize logging
    logger::init_logger(args.verbose || config.verbose(), config.json_logs());
    tracing::info!("Loaded configuration from: {}", args.config);

    // Command line overrides
    if let Some(input) = args.input {
        tracing::info!("Input overridden to: {}", input);
        config.source.path = Some(input);
    }
    if let Some(output) = args.output {
        tracing::info!("Output overridden to: {}", output);
        config.output.path = Some(output);
    }

    // Validate configuration
    if let Err(e) = config.validate() {
        tracing::error!("Configuration validation failed: {}", e);
        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());
        std::process::exit(1);
    }

    display_config_summary(&config);

    // Create storage, pipeline and engine
    let pipeline = ReportPipeline::new(LocalStorage::default(), config);
    let engine = ReportEngine::new(pipeline);

    if args.dry_run {
        tracing::info!("DRY RUN MODE - no files will be written");
        let result = engine.analyze()?;
        println!("Records analyzed: {}", result.count);
        println!(
            "Value 1: avg {:.2}, min {:.2}, max {:.2}",
            result.value1.avg, result.value1.min, result.value1.max
        );
        println!(
            "Value 2: avg {:.2}, min {:.2}, max {:.2}",
            result.value2.avg, result.value2.min, result.value2.max
        );
        return Ok(());
    }

    // Run the report
    let outcome = engine.run().context("Report generation failed")?;
    println!("✅ Report generated successfully: {}", outcome.output_path);

    Ok(())
}

fn display_config_summary(config: &TomlConfig) {
    let [value1, value2] = config.value_columns();
    tracing::info!("Input: {}", config.input_path());
    tracing::info!("Output: {}", config.output_path());
    tracing::info!("Columns: {} / {}", value1, value2);
    if let Some(summary) = config.summary_json_path() {
        tracing::info!("Statistics JSON: {}", summary);
    }
}
