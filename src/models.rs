//! Core data structures for decoded METAR reports.
//!
//! Defines the field names a report can be queried by, the typed value of
//! each field, and the complete decoded record.

use crate::constants::{NO_CLOUD_DETECTED_TEXT, NO_SIGNIFICANT_CLOUD_TEXT, fields};
use crate::error::{MetarError, Result};
use chrono::{DateTime, Utc};
use serde::{Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// The ten decodable report fields
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Field {
    Altimeter,
    Cavok,
    Cloud,
    CloudCeiling,
    Dewpoint,
    IcaoCode,
    Temperature,
    Time,
    Visibility,
    Wind,
}

impl Field {
    pub const ALL: [Field; 10] = [
        Field::Altimeter,
        Field::Cavok,
        Field::Cloud,
        Field::CloudCeiling,
        Field::Dewpoint,
        Field::IcaoCode,
        Field::Temperature,
        Field::Time,
        Field::Visibility,
        Field::Wind,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Field::Altimeter => fields::ALTIMETER,
            Field::Cavok => fields::CAVOK,
            Field::Cloud => fields::CLOUD,
            Field::CloudCeiling => fields::CLOUD_CEILING,
            Field::Dewpoint => fields::DEWPOINT,
            Field::IcaoCode => fields::ICAO_CODE,
            Field::Temperature => fields::TEMPERATURE,
            Field::Time => fields::TIME,
            Field::Visibility => fields::VISIBILITY,
            Field::Wind => fields::WIND,
        }
    }
}

impl FromStr for Field {
    type Err = MetarError;

    fn from_str(name: &str) -> Result<Self> {
        Field::ALL
            .into_iter()
            .find(|field| field.as_str() == name)
            .ok_or_else(|| MetarError::unknown_field(name))
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Cloud amount of a reported layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CloudCoverage {
    Few,
    Scattered,
    Broken,
    Overcast,
}

impl CloudCoverage {
    /// Map a report code (`FEW`, `SCT`, `BKN`, `OVC`) to a coverage
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "FEW" => Some(CloudCoverage::Few),
            "SCT" => Some(CloudCoverage::Scattered),
            "BKN" => Some(CloudCoverage::Broken),
            "OVC" => Some(CloudCoverage::Overcast),
            _ => None,
        }
    }

    /// Broken and overcast layers are the ones that form a ceiling
    pub fn forms_ceiling(&self) -> bool {
        matches!(self, CloudCoverage::Broken | CloudCoverage::Overcast)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CloudCoverage::Few => "few",
            CloudCoverage::Scattered => "scattered",
            CloudCoverage::Broken => "broken",
            CloudCoverage::Overcast => "overcast",
        }
    }
}

/// Significant convective or cirrus cloud type suffix
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum CloudType {
    #[serde(rename = "CU")]
    Cumulus,
    #[serde(rename = "CB")]
    Cumulonimbus,
    #[serde(rename = "TCU")]
    ToweringCumulus,
    #[serde(rename = "CI")]
    Cirrus,
}

impl CloudType {
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "CU" => Some(CloudType::Cumulus),
            "CB" => Some(CloudType::Cumulonimbus),
            "TCU" => Some(CloudType::ToweringCumulus),
            "CI" => Some(CloudType::Cirrus),
            _ => None,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            CloudType::Cumulus => "CU",
            CloudType::Cumulonimbus => "CB",
            CloudType::ToweringCumulus => "TCU",
            CloudType::Cirrus => "CI",
        }
    }
}

/// A single reported cloud layer
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CloudLayer {
    pub coverage: CloudCoverage,
    /// Height of the layer base in feet
    pub height: i32,
    #[serde(rename = "type")]
    pub cloud_type: Option<CloudType>,
}

/// Decoded cloud group
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Cloud {
    /// One or more layers, in report order
    Layers(Vec<CloudLayer>),
    NoSignificantCloud,
    NoCloudDetected,
}

impl Cloud {
    /// Lowest broken or overcast layer height, if any
    pub fn ceiling(&self) -> Option<i32> {
        match self {
            Cloud::Layers(layers) => layers
                .iter()
                .filter(|layer| layer.coverage.forms_ceiling())
                .map(|layer| layer.height)
                .min(),
            Cloud::NoSignificantCloud | Cloud::NoCloudDetected => None,
        }
    }
}

impl Serialize for Cloud {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            Cloud::Layers(layers) => layers.serialize(serializer),
            Cloud::NoSignificantCloud => serializer.serialize_str(NO_SIGNIFICANT_CLOUD_TEXT),
            Cloud::NoCloudDetected => serializer.serialize_str(NO_CLOUD_DETECTED_TEXT),
        }
    }
}

/// Decoded surface wind, speeds in knots
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Wind {
    /// Direction in degrees; `000` conventionally means calm
    pub direction: i32,
    pub speed: i32,
    pub gusting: Option<i32>,
    /// Directional variation as (from, to) degrees
    pub variation: Option<(i32, i32)>,
}

/// Value of a single decoded field
///
/// `Absent` marks a field whose group is missing from the report. It is a
/// regular value and is cached like any other.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Absent,
    Flag(bool),
    Integer(i32),
    Text(String),
    Time(DateTime<Utc>),
    Wind(Wind),
    Cloud(Cloud),
}

impl FieldValue {
    pub fn is_absent(&self) -> bool {
        matches!(self, FieldValue::Absent)
    }

    pub fn as_integer(&self) -> Option<i32> {
        match self {
            FieldValue::Integer(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_flag(&self) -> Option<bool> {
        match self {
            FieldValue::Flag(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_time(&self) -> Option<DateTime<Utc>> {
        match self {
            FieldValue::Time(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_wind(&self) -> Option<&Wind> {
        match self {
            FieldValue::Wind(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_cloud(&self) -> Option<&Cloud> {
        match self {
            FieldValue::Cloud(value) => Some(value),
            _ => None,
        }
    }
}

impl From<Option<i32>> for FieldValue {
    fn from(value: Option<i32>) -> Self {
        value.map_or(FieldValue::Absent, FieldValue::Integer)
    }
}

impl Serialize for FieldValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            FieldValue::Absent => serializer.serialize_none(),
            FieldValue::Flag(value) => serializer.serialize_bool(*value),
            FieldValue::Integer(value) => serializer.serialize_i32(*value),
            FieldValue::Text(value) => serializer.serialize_str(value),
            FieldValue::Time(value) => value.serialize(serializer),
            FieldValue::Wind(value) => value.serialize(serializer),
            FieldValue::Cloud(value) => value.serialize(serializer),
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Absent => f.write_str("-"),
            FieldValue::Flag(value) => write!(f, "{}", value),
            FieldValue::Integer(value) => write!(f, "{}", value),
            FieldValue::Text(value) => f.write_str(value),
            FieldValue::Time(value) => write!(f, "{}", value.format("%Y-%m-%d %H:%M UTC")),
            FieldValue::Wind(wind) => {
                write!(f, "{:03} deg at {} kt", wind.direction, wind.speed)?;
                if let Some(gust) = wind.gusting {
                    write!(f, ", gusting {} kt", gust)?;
                }
                if let Some((from, to)) = wind.variation {
                    write!(f, ", varying {:03}-{:03} deg", from, to)?;
                }
                Ok(())
            }
            FieldValue::Cloud(Cloud::Layers(layers)) => {
                let rendered: Vec<String> = layers
                    .iter()
                    .map(|layer| match layer.cloud_type {
                        Some(kind) => {
                            format!("{} {} ft {}", layer.coverage.as_str(), layer.height, kind.code())
                        }
                        None => format!("{} {} ft", layer.coverage.as_str(), layer.height),
                    })
                    .collect();
                f.write_str(&rendered.join(", "))
            }
            FieldValue::Cloud(Cloud::NoSignificantCloud) => f.write_str(NO_SIGNIFICANT_CLOUD_TEXT),
            FieldValue::Cloud(Cloud::NoCloudDetected) => f.write_str(NO_CLOUD_DETECTED_TEXT),
        }
    }
}

/// Fully decoded report
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParsedReport {
    /// Millibars
    pub altimeter: Option<i32>,
    pub cavok: bool,
    pub cloud: Option<Cloud>,
    /// Feet
    pub cloud_ceiling: Option<i32>,
    pub dewpoint: Option<i32>,
    pub icao_code: String,
    pub temperature: Option<i32>,
    pub time: Option<DateTime<Utc>>,
    pub visibility: Option<i32>,
    pub wind: Option<Wind>,
}

impl ParsedReport {
    /// Assemble a record from per-field values, in `Field::ALL` order
    pub fn from_values(mut lookup: impl FnMut(Field) -> FieldValue) -> Self {
        Self {
            altimeter: lookup(Field::Altimeter).as_integer(),
            cavok: lookup(Field::Cavok).as_flag().unwrap_or(false),
            cloud: lookup(Field::Cloud).as_cloud().cloned(),
            cloud_ceiling: lookup(Field::CloudCeiling).as_integer(),
            dewpoint: lookup(Field::Dewpoint).as_integer(),
            icao_code: lookup(Field::IcaoCode)
                .as_text()
                .map(str::to_string)
                .unwrap_or_default(),
            temperature: lookup(Field::Temperature).as_integer(),
            time: lookup(Field::Time).as_time(),
            visibility: lookup(Field::Visibility).as_integer(),
            wind: lookup(Field::Wind).as_wind().cloned(),
        }
    }

    /// Value of one field of the record
    pub fn value(&self, field: Field) -> FieldValue {
        match field {
            Field::Altimeter => self.altimeter.into(),
            Field::Cavok => FieldValue::Flag(self.cavok),
            Field::Cloud => self
                .cloud
                .clone()
                .map_or(FieldValue::Absent, FieldValue::Cloud),
            Field::CloudCeiling => self.cloud_ceiling.into(),
            Field::Dewpoint => self.dewpoint.into(),
            Field::IcaoCode => FieldValue::Text(self.icao_code.clone()),
            Field::Temperature => self.temperature.into(),
            Field::Time => self.time.map_or(FieldValue::Absent, FieldValue::Time),
            Field::Visibility => self.visibility.into(),
            Field::Wind => self.wind.clone().map_or(FieldValue::Absent, FieldValue::Wind),
        }
    }
}
