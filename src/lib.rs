//! METAR Decoder Library
//!
//! Decodes METAR aviation weather reports into structured records with
//! normalized units.
//!
//! This library provides tools for:
//! - Lazily decoding individual report fields with per-field caching
//! - Converting altimeter settings to millibars and wind speeds to knots
//! - Deriving the cloud ceiling from reported layers
//! - Fetching the latest report for a station from a NOAA-style source
//!
//! A report group that is missing or malformed decodes to an absent value
//! rather than an error.

pub mod cli;
pub mod config;
pub mod constants;
pub mod error;
pub mod models;
pub mod parser;
pub mod source;

// Re-export commonly used types
pub use config::MetarConfig;
pub use error::{MetarError, Result};
pub use models::{Cloud, CloudCoverage, CloudLayer, CloudType, Field, FieldValue, ParsedReport, Wind};
pub use parser::ReportParser;
pub use source::{NoaaSource, ReportSource};
