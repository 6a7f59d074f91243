//! Integration tests for the report parser public API
//!
//! These tests decode complete real-world style reports through the crate's
//! re-exported types and check the serialized record shape.

use chrono::{NaiveDate, TimeZone, Utc};
use metar_decoder::{Cloud, Field, FieldValue, ReportParser};
use serde_json::json;

fn reference_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 10, 16).unwrap()
}

/// Every field of a typical European report
///
/// Purpose: Validate the full record for a report carrying every decodable group
/// Benefit: Catches regressions in any single extractor at once
#[test]
fn test_decode_full_european_report() {
    let mut parser = ReportParser::with_reference_date(
        "EGLL 161020Z 22015G25KT 190V250 6000 FEW008 BKN012CB OVC020 M02/M04 Q0987",
        reference_date(),
    );
    let record = parser.to_record();

    assert_eq!(record.icao_code, "EGLL");
    assert_eq!(
        record.time,
        Some(Utc.with_ymd_and_hms(2024, 10, 16, 10, 20, 0).unwrap())
    );
    let wind = record.wind.as_ref().unwrap();
    assert_eq!(
        (wind.direction, wind.speed, wind.gusting, wind.variation),
        (220, 15, Some(25), Some((190, 250)))
    );
    assert_eq!(record.visibility, Some(6000));
    assert_eq!(record.temperature, Some(-2));
    assert_eq!(record.dewpoint, Some(-4));
    assert_eq!(record.altimeter, Some(987));
    assert_eq!(record.cloud_ceiling, Some(1200));
    assert!(matches!(record.cloud, Some(Cloud::Layers(ref layers)) if layers.len() == 3));
    assert!(!record.cavok);
}

/// Serialized record uses field names as keys and null for absent values
#[test]
fn test_json_record_shape() {
    let mut parser = ReportParser::with_reference_date(
        "LEMD 161030Z 00000KT CAVOK 18/04 Q1024",
        reference_date(),
    );
    let value = serde_json::to_value(parser.to_record()).unwrap();

    assert_eq!(
        value,
        json!({
            "altimeter": 1024,
            "cavok": true,
            "cloud": null,
            "cloud_ceiling": null,
            "dewpoint": 4,
            "icao_code": "LEMD",
            "temperature": 18,
            "time": "2024-10-16T10:30:00Z",
            "visibility": null,
            "wind": {
                "direction": 0,
                "speed": 0,
                "gusting": null,
                "variation": null
            }
        })
    );
}

/// Sentinel cloud values serialize as text
#[test]
fn test_json_cloud_sentinel() {
    let mut parser = ReportParser::with_reference_date(
        "EDDF 161020Z 22008KT 9999 NSC 15/09 Q1018",
        reference_date(),
    );
    let cloud = parser.get(Field::Cloud).clone();
    assert_eq!(
        serde_json::to_value(&cloud).unwrap(),
        json!("no significant cloud")
    );
}

/// Field-by-field access agrees with the bulk record
#[test]
fn test_field_access_matches_record() {
    let raw = "KJFK 161051Z 18010KT 150V210 10SM FEW010 BKN025 OVC040 12/08 A2992 RMK AO2";
    let mut by_field = ReportParser::with_reference_date(raw, reference_date());
    let mut by_record = ReportParser::with_reference_date(raw, reference_date());
    let record = by_record.to_record();

    for field in Field::ALL {
        let value = by_field.get_by_name(field.as_str()).unwrap().clone();
        assert_eq!(value, record.value(field), "mismatch for {field}");
    }
}

/// Reports without optional groups never fail
#[test]
fn test_sparse_report_has_absent_fields() {
    let mut parser = ReportParser::with_reference_date("KXYZ NIL", reference_date());
    for field in Field::ALL {
        let value = parser.get(field).clone();
        match field {
            Field::IcaoCode => assert_eq!(value, FieldValue::Text("KXYZ".to_string())),
            Field::Cavok => assert_eq!(value, FieldValue::Flag(false)),
            _ => assert!(value.is_absent(), "{field} should be absent"),
        }
    }
}
