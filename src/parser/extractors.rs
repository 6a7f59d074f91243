//! Field extractors for raw METAR text.
//!
//! Each extractor scans the raw report once and returns `None` when its
//! group is missing. The [`ExtractorTable`] maps every [`Field`] to the
//! extractor that produces it; temperature/dewpoint and cloud/cloud_ceiling
//! share an extractor because they come from the same group.

use super::patterns;
use crate::constants::{
    CAVOK_MARKER, CLOUD_HEIGHT_MULTIPLIER, ICAO_CODE_LEN, INHG_HUNDREDTHS_TO_MILLIBARS,
    MPS_TO_KNOTS, NCD_MARKER, NSC_MARKER, UNIT_KNOTS, UNIT_MPS,
};
use crate::models::{Cloud, CloudCoverage, CloudLayer, CloudType, Field, FieldValue, Wind};
use chrono::{DateTime, Datelike, NaiveDate, Utc};
use std::collections::HashMap;
use std::fmt;

/// Input handed to every extractor
#[derive(Debug, Clone, Copy)]
pub struct ExtractContext<'a> {
    pub raw: &'a str,
    /// Supplies year and month for the observation time
    pub reference_date: NaiveDate,
}

/// An extractor yields one or more (field, value) pairs
pub type Extractor = fn(&ExtractContext<'_>) -> Vec<(Field, FieldValue)>;

/// Dispatch table from field to extractor
#[derive(Clone)]
pub struct ExtractorTable {
    entries: HashMap<Field, Extractor>,
}

impl ExtractorTable {
    pub fn get(&self, field: Field) -> Option<Extractor> {
        self.entries.get(&field).copied()
    }

    /// Replace the extractor used for a field
    pub fn with_override(mut self, field: Field, extractor: Extractor) -> Self {
        self.entries.insert(field, extractor);
        self
    }
}

impl Default for ExtractorTable {
    fn default() -> Self {
        let defaults: [(Field, Extractor); 10] = [
            (Field::Altimeter, extract_altimeter),
            (Field::Cavok, extract_cavok),
            (Field::Cloud, extract_cloud),
            (Field::CloudCeiling, extract_cloud),
            (Field::Dewpoint, extract_temperature_dewpoint),
            (Field::IcaoCode, extract_icao_code),
            (Field::Temperature, extract_temperature_dewpoint),
            (Field::Time, extract_time),
            (Field::Visibility, extract_visibility),
            (Field::Wind, extract_wind),
        ];
        Self {
            entries: defaults.into_iter().collect(),
        }
    }
}

impl fmt::Debug for ExtractorTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut fields: Vec<&Field> = self.entries.keys().collect();
        fields.sort();
        f.debug_struct("ExtractorTable")
            .field("fields", &fields)
            .finish()
    }
}

pub fn extract_altimeter(ctx: &ExtractContext<'_>) -> Vec<(Field, FieldValue)> {
    vec![(Field::Altimeter, altimeter(ctx.raw).into())]
}

pub fn extract_cavok(ctx: &ExtractContext<'_>) -> Vec<(Field, FieldValue)> {
    vec![(Field::Cavok, FieldValue::Flag(cavok(ctx.raw)))]
}

pub fn extract_cloud(ctx: &ExtractContext<'_>) -> Vec<(Field, FieldValue)> {
    let cloud = cloud(ctx.raw);
    let ceiling = cloud.as_ref().and_then(Cloud::ceiling);
    vec![
        (
            Field::Cloud,
            cloud.map_or(FieldValue::Absent, FieldValue::Cloud),
        ),
        (Field::CloudCeiling, ceiling.into()),
    ]
}

pub fn extract_temperature_dewpoint(ctx: &ExtractContext<'_>) -> Vec<(Field, FieldValue)> {
    let pair = temperature_dewpoint(ctx.raw);
    vec![
        (Field::Temperature, pair.map(|(t, _)| t).into()),
        (Field::Dewpoint, pair.map(|(_, d)| d).into()),
    ]
}

pub fn extract_icao_code(ctx: &ExtractContext<'_>) -> Vec<(Field, FieldValue)> {
    vec![(Field::IcaoCode, FieldValue::Text(icao_code(ctx.raw)))]
}

pub fn extract_time(ctx: &ExtractContext<'_>) -> Vec<(Field, FieldValue)> {
    let time = observation_time(ctx.raw, ctx.reference_date);
    vec![(Field::Time, time.map_or(FieldValue::Absent, FieldValue::Time))]
}

pub fn extract_visibility(ctx: &ExtractContext<'_>) -> Vec<(Field, FieldValue)> {
    vec![(Field::Visibility, visibility(ctx.raw).into())]
}

pub fn extract_wind(ctx: &ExtractContext<'_>) -> Vec<(Field, FieldValue)> {
    vec![(
        Field::Wind,
        wind(ctx.raw).map_or(FieldValue::Absent, FieldValue::Wind),
    )]
}

/// Altimeter setting in millibars
pub fn altimeter(raw: &str) -> Option<i32> {
    let caps = patterns::ALTIMETER.captures(raw)?;
    let value = parse_number(&caps[2])?;
    match &caps[1] {
        "A" => Some(round_to_int(f64::from(value) * INHG_HUNDREDTHS_TO_MILLIBARS)),
        _ => Some(value),
    }
}

/// Substring test, independent of token boundaries
pub fn cavok(raw: &str) -> bool {
    raw.contains(CAVOK_MARKER)
}

/// Cloud layers in report order, or one of the no-cloud sentinels
pub fn cloud(raw: &str) -> Option<Cloud> {
    let layers: Vec<CloudLayer> = patterns::CLOUD_LAYER
        .captures_iter(raw)
        .filter_map(|caps| {
            Some(CloudLayer {
                coverage: CloudCoverage::from_code(&caps[1])?,
                height: parse_number(&caps[2])? * CLOUD_HEIGHT_MULTIPLIER,
                cloud_type: caps.get(3).and_then(|m| CloudType::from_code(m.as_str())),
            })
        })
        .collect();

    if !layers.is_empty() {
        Some(Cloud::Layers(layers))
    } else if raw.contains(NSC_MARKER) {
        Some(Cloud::NoSignificantCloud)
    } else if raw.contains(NCD_MARKER) {
        Some(Cloud::NoCloudDetected)
    } else {
        None
    }
}

/// Temperature and dewpoint in degrees Celsius
pub fn temperature_dewpoint(raw: &str) -> Option<(i32, i32)> {
    let caps = patterns::TEMPERATURE_DEWPOINT.captures(raw)?;
    Some((parse_signed(&caps[1])?, parse_signed(&caps[2])?))
}

/// First four characters of the report
pub fn icao_code(raw: &str) -> String {
    raw.chars().take(ICAO_CODE_LEN).collect()
}

/// Observation time; year and month are taken from `reference_date`
pub fn observation_time(raw: &str, reference_date: NaiveDate) -> Option<DateTime<Utc>> {
    let caps = patterns::OBSERVATION_TIME.captures(raw)?;
    let day = parse_number(&caps[1])?;
    let hour = parse_number(&caps[2])?;
    let minute = parse_number(&caps[3])?;

    let date = NaiveDate::from_ymd_opt(
        reference_date.year(),
        reference_date.month(),
        u32::try_from(day).ok()?,
    )?;
    let time = date.and_hms_opt(u32::try_from(hour).ok()?, u32::try_from(minute).ok()?, 0)?;
    Some(time.and_utc())
}

/// Prevailing visibility, unconverted
pub fn visibility(raw: &str) -> Option<i32> {
    let caps = patterns::VISIBILITY.captures(raw)?;
    parse_number(&caps[1])
}

/// Surface wind with speeds in knots
pub fn wind(raw: &str) -> Option<Wind> {
    let caps = patterns::WIND.captures(raw)?;
    let direction = parse_number(&caps[1])?;
    let speed = parse_number(&caps[2])?;
    let gusting = match caps.get(3) {
        Some(m) => Some(parse_number(m.as_str())?),
        None => None,
    };

    let (speed, gusting) = match &caps[4] {
        UNIT_KNOTS => (speed, gusting),
        UNIT_MPS => (mps_to_knots(speed), gusting.map(mps_to_knots)),
        _ => return None,
    };

    Some(Wind {
        direction,
        speed,
        gusting,
        variation: wind_variation(raw),
    })
}

/// Directional variation as (from, to)
pub fn wind_variation(raw: &str) -> Option<(i32, i32)> {
    let caps = patterns::WIND_VARIATION.captures(raw)?;
    Some((parse_number(&caps[1])?, parse_number(&caps[2])?))
}

fn mps_to_knots(value: i32) -> i32 {
    round_to_int(f64::from(value) * MPS_TO_KNOTS)
}

// Half away from zero
fn round_to_int(value: f64) -> i32 {
    value.round() as i32
}

// Captures are digit-only, so a failure here means the pattern and the
// capture indices have drifted apart.
fn parse_number(digits: &str) -> Option<i32> {
    let parsed = digits.parse::<i32>();
    debug_assert!(parsed.is_ok(), "non-numeric capture: {digits}");
    parsed.ok()
}

/// `M05` -> -5, `12` -> 12
fn parse_signed(text: &str) -> Option<i32> {
    match text.strip_prefix('M') {
        Some(digits) => parse_number(digits).map(|v| -v),
        None => parse_number(text),
    }
}
