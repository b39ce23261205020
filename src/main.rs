use anyhow::{Context, Result};
use clap::Parser;
use seqlat::cli::{Cli, OutputFormat};
use seqlat::config::AnalysisConfig;
use seqlat::csv_output::CsvOutput;
use seqlat::json_output::JsonOutput;
use seqlat::{analysis, ingest, text_output};
use tracing_subscriber::EnvFilter;

/// Initialize tracing subscriber for debug output
///
/// Without `--debug`, `RUST_LOG` still applies and skipped records are
/// reported at WARN.
fn init_tracing(debug: bool) {
    let filter = if debug {
        EnvFilter::from_default_env().add_directive(tracing::Level::TRACE.into())
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Load the config file if given, then apply CLI overrides
fn load_config(args: &Cli) -> Result<AnalysisConfig> {
    let base = match &args.config {
        Some(path) => AnalysisConfig::from_file(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => AnalysisConfig::default(),
    };
    let config = args.apply_overrides(base);
    config.validate()?;
    Ok(config)
}

fn main() -> Result<()> {
    let args = Cli::parse();

    if args.summary && matches!(args.output, OutputFormat::Csv) {
        anyhow::bail!("--summary is not available with --output csv");
    }

    init_tracing(args.debug);

    let config = load_config(&args)?;
    tracing::debug!(?config, "analysis configuration");

    let records = ingest::read_log(&args.log, config.log_format)?;
    let report = analysis::analyze(&records, &config)
        .with_context(|| format!("Failed to parse {}", args.log.display()))?;

    match (args.output, args.summary) {
        (OutputFormat::Text, true) => print!("{}", text_output::render_summary(&report.summary)),
        (OutputFormat::Text, false) => print!("{}", text_output::render_report(&report)),
        (OutputFormat::Json, true) => {
            println!("{}", serde_json::to_string_pretty(&report.summary)?)
        }
        (OutputFormat::Json, false) => println!("{}", JsonOutput::from_report(&report).to_json()?),
        (OutputFormat::Csv, _) => {
            let mut csv = CsvOutput::new();
            for record in &report.correlation.durations {
                csv.add_duration(record.clone());
            }
            for record in &report.correlation.jitter {
                csv.add_jitter(record.clone());
            }
            print!("{}", csv.to_csv());
        }
    }

    Ok(())
}
