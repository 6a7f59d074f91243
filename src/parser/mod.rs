//! METAR report parser with lazily decoded, memoized fields.
//!
//! A [`ReportParser`] owns one raw report. Fields are decoded on first
//! access through the [`ExtractorTable`] and cached; a cached field is never
//! recomputed or overwritten. Absent groups decode to
//! [`FieldValue::Absent`] and are cached like any other value.
//!
//! ## Usage
//!
//! ```rust
//! use chrono::NaiveDate;
//! use metar_decoder::{Field, ReportParser};
//!
//! let date = NaiveDate::from_ymd_opt(2024, 10, 16).unwrap();
//! let mut parser = ReportParser::with_reference_date(
//!     "EGLL 161020Z 18010KT 150V210 9999 FEW010 BKN025 12/08 Q1013",
//!     date,
//! );
//!
//! assert_eq!(parser.get(Field::CloudCeiling).as_integer(), Some(2500));
//! let record = parser.to_record();
//! assert_eq!(record.altimeter, Some(1013));
//! ```

pub mod extractors;
pub mod patterns;

#[cfg(test)]
pub mod tests;

pub use extractors::{ExtractContext, Extractor, ExtractorTable};

use crate::constants::is_valid_station_code;
use crate::error::{MetarError, Result};
use crate::models::{Field, FieldValue, ParsedReport};
use crate::source::ReportSource;
use chrono::{NaiveDate, Utc};
use std::collections::HashMap;
use tracing::{debug, warn};

static ABSENT: FieldValue = FieldValue::Absent;

/// Decoder for a single raw METAR report
#[derive(Debug, Clone)]
pub struct ReportParser {
    raw: String,
    reference_date: NaiveDate,
    cache: HashMap<Field, FieldValue>,
    extractors: ExtractorTable,
}

impl ReportParser {
    /// Create a parser whose observation time uses the current UTC month
    pub fn new(raw: impl Into<String>) -> Self {
        Self::with_reference_date(raw, Utc::now().date_naive())
    }

    /// Create a parser with an explicit date supplying year and month
    pub fn with_reference_date(raw: impl Into<String>, reference_date: NaiveDate) -> Self {
        Self {
            raw: raw.into(),
            reference_date,
            cache: HashMap::new(),
            extractors: ExtractorTable::default(),
        }
    }

    /// Replace the extractor table; already cached fields are kept
    pub fn with_extractors(mut self, extractors: ExtractorTable) -> Self {
        self.extractors = extractors;
        self
    }

    /// Build a parser from source payload lines.
    ///
    /// Line 0 is the provider's timestamp header and is discarded; line 1 is
    /// the report.
    pub fn from_source_lines(
        station: &str,
        lines: &[String],
        reference_date: NaiveDate,
    ) -> Result<Self> {
        let (header, report) = match lines {
            [header, report, ..] => (header, report),
            _ => {
                warn!("Source data for {} has {} line(s)", station, lines.len());
                return Err(MetarError::malformed_source(
                    station,
                    format!("expected at least 2 lines, got {}", lines.len()),
                ));
            }
        };

        if header.trim().is_empty() {
            warn!("Source data for {} has an empty header line", station);
            return Err(MetarError::malformed_source(station, "header line is empty"));
        }
        if report.trim().is_empty() {
            warn!("Source data for {} has an empty report line", station);
            return Err(MetarError::malformed_source(station, "report line is empty"));
        }

        debug!("Source header for {}: {}", station, header);
        Ok(Self::with_reference_date(report.clone(), reference_date))
    }

    /// Fetch the latest report for `station` and build a parser over it
    pub async fn from_station<S: ReportSource>(
        source: &S,
        station: &str,
        reference_date: NaiveDate,
    ) -> Result<Self> {
        if !is_valid_station_code(station) {
            return Err(MetarError::InvalidStationCode {
                code: station.to_string(),
            });
        }

        let lines = source.fetch(station).await?;
        Self::from_source_lines(station, &lines, reference_date)
    }

    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn reference_date(&self) -> NaiveDate {
        self.reference_date
    }

    /// Whether a field has already been decoded
    pub fn is_cached(&self, field: Field) -> bool {
        self.cache.contains_key(&field)
    }

    /// Decoded value of a field, computing it on first access
    pub fn get(&mut self, field: Field) -> &FieldValue {
        if !self.cache.contains_key(&field) {
            self.compute(field);
        }
        self.cache.get(&field).unwrap_or(&ABSENT)
    }

    /// Look up a field by its name, e.g. `"cloud_ceiling"`
    pub fn get_by_name(&mut self, name: &str) -> Result<&FieldValue> {
        let field: Field = name.parse()?;
        Ok(self.get(field))
    }

    /// Decode every field and return the complete record
    pub fn to_record(&mut self) -> ParsedReport {
        ParsedReport::from_values(|field| self.get(field).clone())
    }

    fn compute(&mut self, field: Field) {
        let ctx = ExtractContext {
            raw: &self.raw,
            reference_date: self.reference_date,
        };
        let produced = match self.extractors.get(field) {
            Some(extract) => extract(&ctx),
            None => Vec::new(),
        };

        for (produced_field, value) in produced {
            debug!("Decoded {} = {:?}", produced_field, value);
            self.cache.entry(produced_field).or_insert(value);
        }

        // An extractor that does not cover the requested field still settles it
        self.cache.entry(field).or_insert(FieldValue::Absent);
    }
}
