//! Token patterns for METAR report groups.
//!
//! Every pattern starts with a literal space so a group is only matched at
//! the start of a token, never inside a word. Digit classes are written as
//! `[0-9]` to stay ASCII-only.

use regex::Regex;
use std::sync::LazyLock;

fn compile(pattern: &str) -> Regex {
    Regex::new(pattern).unwrap_or_else(|e| panic!("invalid report pattern {pattern}: {e}"))
}

/// `A2992` (hundredths of inHg) or `Q1013` (millibars)
pub static ALTIMETER: LazyLock<Regex> = LazyLock::new(|| compile(r" (A|Q)([0-9]{4})"));

/// `BKN025CB`: coverage, height in hundreds of feet, optional type
pub static CLOUD_LAYER: LazyLock<Regex> =
    LazyLock::new(|| compile(r" (FEW|SCT|BKN|OVC)([0-9]{3})(TCU|CU|CB|CI)?"));

/// `M05/M10`: temperature and dewpoint, `M` for minus
pub static TEMPERATURE_DEWPOINT: LazyLock<Regex> =
    LazyLock::new(|| compile(r" (M?[0-9]{2})/(M?[0-9]{2})"));

/// `161020Z`: day, hour and minute of observation
pub static OBSERVATION_TIME: LazyLock<Regex> =
    LazyLock::new(|| compile(r" ([0-3][0-9])([0-2][0-9])([0-5][0-9])Z"));

/// `9999`: prevailing visibility, bounded by spaces on both sides
pub static VISIBILITY: LazyLock<Regex> = LazyLock::new(|| compile(r" ([0-9]{4}) "));

/// `18010G25KT` or `27005MPS`
pub static WIND: LazyLock<Regex> =
    LazyLock::new(|| compile(r" ([0-9]{3})([0-9]{2,3})(?:G([0-9]{2,3}))?(KT|MPS)"));

/// `150V210`: directional variation
pub static WIND_VARIATION: LazyLock<Regex> =
    LazyLock::new(|| compile(r" ([0-9]{3})V([0-9]{3})"));
