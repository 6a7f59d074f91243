//! Command-line argument definitions for the METAR decoder
//!
//! This module defines the CLI interface using the clap derive API.

use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// CLI arguments for the METAR decoder
#[derive(Debug, Clone, Parser)]
#[command(
    name = "metar-decoder",
    version,
    about = "Decode METAR aviation weather reports",
    long_about = "Decodes METAR reports into altimeter (mb), cloud layers and ceiling (ft), \
                  temperature and dewpoint (C), observation time (UTC), visibility and wind (kt). \
                  Reports can be given directly or fetched for a station."
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Commands,

    /// Print a single field instead of the whole record
    #[arg(long, global = true, value_name = "NAME")]
    pub field: Option<String>,

    /// Output format
    #[arg(long, global = true, value_enum, default_value = "text")]
    pub format: OutputFormat,

    /// Date supplying year and month for the observation time (defaults to today, UTC)
    #[arg(long = "reference-date", global = true, value_name = "YYYY-MM-DD")]
    pub reference_date: Option<NaiveDate>,

    /// Configuration file (TOML)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Only log errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,
}

/// Available subcommands
#[derive(Debug, Clone, Subcommand)]
pub enum Commands {
    /// Decode a raw report given on the command line ("-" reads stdin)
    ///
    /// Report words may start with a hyphen (`-RA`), so options must come
    /// before the report. Stdin holds either the bare report or a station
    /// file whose first line is a timestamp header.
    Decode {
        #[arg(
            value_name = "REPORT",
            required = true,
            num_args = 1..,
            allow_hyphen_values = true
        )]
        report: Vec<String>,
    },
    /// Fetch and decode the latest report for a station
    Fetch {
        #[arg(value_name = "STATION")]
        station: String,
    },
    /// List the decodable field names
    Fields,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

impl Args {
    /// Log level implied by the verbosity flags
    pub fn get_log_level(&self) -> &'static str {
        if self.quiet {
            "error"
        } else if self.verbose {
            "debug"
        } else {
            "warn"
        }
    }
}

impl Commands {
    /// Joined report text for `decode`; `None` means read from stdin
    pub fn report_text(report: &[String]) -> Option<String> {
        match report {
            [single] if single == "-" => None,
            parts => Some(parts.join(" ")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_joins_tokens() {
        let args = Args::try_parse_from([
            "metar-decoder",
            "decode",
            "EGLL",
            "161020Z",
            "18010KT",
        ])
        .unwrap();
        let Commands::Decode { report } = args.command else {
            panic!("expected decode");
        };
        assert_eq!(
            Commands::report_text(&report).as_deref(),
            Some("EGLL 161020Z 18010KT")
        );
    }

    #[test]
    fn test_decode_accepts_hyphenated_weather_groups() {
        let args = Args::try_parse_from([
            "metar-decoder",
            "decode",
            "EGLL",
            "161020Z",
            "4000",
            "-RA",
            "BKN010",
        ])
        .unwrap();
        let Commands::Decode { report } = args.command else {
            panic!("expected decode");
        };
        assert_eq!(
            Commands::report_text(&report).as_deref(),
            Some("EGLL 161020Z 4000 -RA BKN010")
        );
    }

    #[test]
    fn test_stdin_marker_with_hyphen_values() {
        let args = Args::try_parse_from(["metar-decoder", "--quiet", "decode", "-"]).unwrap();
        let Commands::Decode { report } = args.command else {
            panic!("expected decode");
        };
        assert_eq!(Commands::report_text(&report), None);
        assert!(args.quiet);
    }

    #[test]
    fn test_stdin_marker() {
        assert_eq!(Commands::report_text(&["-".to_string()]), None);
    }

    #[test]
    fn test_global_options() {
        let args = Args::try_parse_from([
            "metar-decoder",
            "fetch",
            "KJFK",
            "--format",
            "json",
            "--field",
            "wind",
            "--reference-date",
            "2024-10-16",
            "-v",
        ])
        .unwrap();
        assert_eq!(args.format, OutputFormat::Json);
        assert_eq!(args.field.as_deref(), Some("wind"));
        assert_eq!(args.reference_date, NaiveDate::from_ymd_opt(2024, 10, 16));
        assert_eq!(args.get_log_level(), "debug");
    }

    #[test]
    fn test_verbose_conflicts_with_quiet() {
        assert!(Args::try_parse_from(["metar-decoder", "fields", "-v", "-q"]).is_err());
    }

    #[test]
    fn test_decode_requires_report() {
        assert!(Args::try_parse_from(["metar-decoder", "decode"]).is_err());
    }
}
