//! Application constants for the METAR decoder
//!
//! This module contains conversion factors, report markers, field names
//! and default values used throughout the decoder.

// =============================================================================
// Unit Conversion Factors
// =============================================================================

/// Millibars per hundredth of an inch of mercury (`A2992` -> 1013 mb)
pub const INHG_HUNDREDTHS_TO_MILLIBARS: f64 = 0.3386;

/// Factor applied to `MPS` wind groups to obtain knots
pub const MPS_TO_KNOTS: f64 = 0.868976242;

/// Cloud layer heights are reported in hundreds of feet
pub const CLOUD_HEIGHT_MULTIPLIER: i32 = 100;

// =============================================================================
// Report Markers
// =============================================================================

/// Ceiling and visibility OK
pub const CAVOK_MARKER: &str = "CAVOK";

/// No significant cloud, matched with its leading separator
pub const NSC_MARKER: &str = " NSC";

/// No cloud detected by an automatic station, matched with its leading separator
pub const NCD_MARKER: &str = " NCD";

/// Wind speed unit for knots
pub const UNIT_KNOTS: &str = "KT";

/// Wind speed unit for metres per second
pub const UNIT_MPS: &str = "MPS";

/// Length of an ICAO station identifier
pub const ICAO_CODE_LEN: usize = 4;

// =============================================================================
// Field Names
// =============================================================================

/// Names of all decodable fields, in record order
pub mod fields {
    pub const ALTIMETER: &str = "altimeter";
    pub const CAVOK: &str = "cavok";
    pub const CLOUD: &str = "cloud";
    pub const CLOUD_CEILING: &str = "cloud_ceiling";
    pub const DEWPOINT: &str = "dewpoint";
    pub const ICAO_CODE: &str = "icao_code";
    pub const TEMPERATURE: &str = "temperature";
    pub const TIME: &str = "time";
    pub const VISIBILITY: &str = "visibility";
    pub const WIND: &str = "wind";

    pub const ALL: &[&str] = &[
        ALTIMETER,
        CAVOK,
        CLOUD,
        CLOUD_CEILING,
        DEWPOINT,
        ICAO_CODE,
        TEMPERATURE,
        TIME,
        VISIBILITY,
        WIND,
    ];
}

/// Display text for the cloud sentinels
pub const NO_SIGNIFICANT_CLOUD_TEXT: &str = "no significant cloud";
pub const NO_CLOUD_DETECTED_TEXT: &str = "no cloud detected";

// =============================================================================
// Report Source Defaults
// =============================================================================

/// NOAA station directory serving `<ICAO>.TXT` files (timestamp line + report line)
pub const DEFAULT_SOURCE_URL: &str = "https://tgftp.nws.noaa.gov/data/observations/metar/stations";

/// Suffix appended to the station code when building the fetch URL
pub const SOURCE_FILE_SUFFIX: &str = ".TXT";

/// Request timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// User agent sent with fetch requests
pub const DEFAULT_USER_AGENT: &str = concat!("metar-decoder/", env!("CARGO_PKG_VERSION"));

/// Config directory name under the platform config dir
pub const CONFIG_DIR_NAME: &str = "metar-decoder";

/// Config file name
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Environment overrides
pub const ENV_SOURCE_URL: &str = "METAR_SOURCE_URL";
pub const ENV_TIMEOUT_SECS: &str = "METAR_TIMEOUT_SECS";

/// Check whether a station identifier is well formed (4 uppercase letters or digits)
pub fn is_valid_station_code(code: &str) -> bool {
    code.len() == ICAO_CODE_LEN
        && code
            .bytes()
            .all(|b| b.is_ascii_uppercase() || b.is_ascii_digit())
}

/// Build the fetch URL for a station
pub fn station_url(base_url: &str, station: &str) -> String {
    format!(
        "{}/{}{}",
        base_url.trim_end_matches('/'),
        station,
        SOURCE_FILE_SUFFIX
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_station_code_validation() {
        assert!(is_valid_station_code("EGLL"));
        assert!(is_valid_station_code("K1G4"));
        assert!(!is_valid_station_code("egll"));
        assert!(!is_valid_station_code("EGL"));
        assert!(!is_valid_station_code("EGLLX"));
        assert!(!is_valid_station_code("EG-L"));
    }

    #[test]
    fn test_station_url() {
        assert_eq!(
            station_url("https://example.com/stations/", "KJFK"),
            "https://example.com/stations/KJFK.TXT"
        );
        assert_eq!(
            station_url(DEFAULT_SOURCE_URL, "EGLL"),
            "https://tgftp.nws.noaa.gov/data/observations/metar/stations/EGLL.TXT"
        );
    }

    #[test]
    fn test_field_names_unique() {
        let mut names = fields::ALL.to_vec();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), 10);
    }
}
