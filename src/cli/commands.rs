//! Command implementations for the METAR decoder CLI.

use super::args::{Args, Commands, OutputFormat};
use crate::config::MetarConfig;
use crate::models::{Field, ParsedReport};
use crate::parser::ReportParser;
use crate::source::NoaaSource;
use anyhow::{Context, Result};
use chrono::NaiveDate;
use colored::*;
use std::io::Read;
use tracing::{debug, info};

/// Station label used in errors for reports read from stdin
const STDIN_SOURCE: &str = "stdin";

/// Run the selected command
pub async fn run(args: Args) -> Result<()> {
    setup_logging(&args);
    let config = load_configuration(&args)?;

    match &args.command {
        Commands::Fields => {
            for field in Field::ALL {
                println!("{}", field);
            }
            Ok(())
        }
        Commands::Decode { report } => {
            let date = config.effective_reference_date();
            let parser = match Commands::report_text(report) {
                Some(text) => ReportParser::with_reference_date(text, date),
                None => parser_from_stdin(&read_stdin()?, date)?,
            };
            render(parser, &args)
        }
        Commands::Fetch { station } => {
            let station = station.to_ascii_uppercase();
            let source = NoaaSource::new(&config.source)?;
            info!("Using report source {}", source.base_url());
            let parser =
                ReportParser::from_station(&source, &station, config.effective_reference_date())
                    .await
                    .with_context(|| format!("could not load report for {}", station))?;
            render(parser, &args)
        }
    }
}

/// Set up structured logging based on CLI arguments
fn setup_logging(args: &Args) {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let log_level = args.get_log_level();

    // RUST_LOG wins over the verbosity flags
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("metar_decoder={}", log_level)));

    // Logs go to stderr so decoded output on stdout stays pipeable
    if args.quiet {
        // Errors only, no timestamps
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_writer(std::io::stderr)
                    .compact(),
            )
            .init();
    } else {
        // Uptime timer makes slow fetches visible
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_timer(fmt::time::uptime())
                    .with_writer(std::io::stderr),
            )
            .init();
    }

    debug!("Logging initialized at level: {}", log_level);
}

/// Load configuration using layered approach (file -> env -> args)
fn load_configuration(args: &Args) -> Result<MetarConfig> {
    let default_config_path = if args.config.is_none() {
        MetarConfig::default_config_path()
            .ok()
            .filter(|path| path.exists())
    } else {
        None
    };

    let config_file = args.config.as_deref().or(default_config_path.as_deref());
    match config_file {
        Some(path) => info!("Using config file: {}", path.display()),
        None => debug!("No config file found, using defaults and environment variables"),
    }

    let mut config = MetarConfig::load_layered(config_file)?;
    if let Some(date) = args.reference_date {
        config = config.with_reference_date(date);
    }
    Ok(config)
}

fn read_stdin() -> Result<String> {
    let mut input = String::new();
    std::io::stdin()
        .read_to_string(&mut input)
        .context("failed to read report from stdin")?;
    Ok(input)
}

/// Stdin holds either a bare report line or a station file
/// (timestamp header followed by the report)
fn parser_from_stdin(input: &str, reference_date: NaiveDate) -> Result<ReportParser> {
    let lines: Vec<String> = input
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(str::to_string)
        .collect();

    match lines.as_slice() {
        [] => anyhow::bail!("no report text on stdin"),
        [report] => Ok(ReportParser::with_reference_date(report.clone(), reference_date)),
        _ => Ok(ReportParser::from_source_lines(
            STDIN_SOURCE,
            &lines,
            reference_date,
        )?),
    }
}

fn render(mut parser: ReportParser, args: &Args) -> Result<()> {
    if let Some(name) = &args.field {
        let value = parser.get_by_name(name)?;
        match args.format {
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(value)?),
            OutputFormat::Text => println!("{}", value),
        }
        return Ok(());
    }

    let record = parser.to_record();
    match args.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&record)?),
        OutputFormat::Text => print_record(parser.raw(), &record),
    }
    Ok(())
}

fn print_record(raw: &str, record: &ParsedReport) {
    println!("{}", raw.dimmed());
    for field in Field::ALL {
        let value = record.value(field);
        let rendered = if value.is_absent() {
            value.to_string().as_str().dimmed()
        } else {
            value.to_string().as_str().normal()
        };
        println!("{:>14}: {}", field.as_str().bold(), rendered);
    }
}
