//! Error handling for METAR decoding operations.
//!
//! Per-field absence is not represented here: a report that lacks a group
//! decodes to an absent value. These variants cover construction, field
//! lookup, fetching and configuration failures.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum MetarError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed source data for station {station}: {reason}")]
    MalformedSourceData { station: String, reason: String },

    #[error("Unknown field: {name}")]
    UnknownField { name: String },

    #[error("Invalid station code '{code}': expected 4 uppercase letters or digits")]
    InvalidStationCode { code: String },

    #[error("Failed to fetch report for station {station}: {source}")]
    Fetch {
        station: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Report source returned HTTP {status} for station {station}")]
    FetchStatus { station: String, status: u16 },

    #[error("Invalid configuration file: {path} - {reason}")]
    ConfigFile { path: PathBuf, reason: String },

    #[error("Configuration error: {message}")]
    Configuration { message: String },
}

impl MetarError {
    pub fn malformed_source(station: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::MalformedSourceData {
            station: station.into(),
            reason: reason.into(),
        }
    }

    pub fn unknown_field(name: impl Into<String>) -> Self {
        Self::UnknownField { name: name.into() }
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, MetarError>;
