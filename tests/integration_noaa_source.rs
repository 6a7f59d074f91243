//! Integration tests for the HTTP report source against a mock server

use chrono::NaiveDate;
use metar_decoder::config::MetarConfig;
use metar_decoder::{MetarError, NoaaSource, ReportParser, ReportSource};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const PAYLOAD: &str = "2024/10/16 10:50\nKJFK 161051Z 18010KT 10SM FEW010 BKN025 12/08 A2992\n";

fn reference_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 10, 16).unwrap()
}

fn source_for(server: &MockServer) -> NoaaSource {
    let config = MetarConfig::default()
        .with_base_url(server.uri())
        .with_timeout_secs(5);
    NoaaSource::new(&config.source).unwrap()
}

#[tokio::test]
async fn test_fetch_station_file() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/KJFK.TXT"))
        .respond_with(ResponseTemplate::new(200).set_body_string(PAYLOAD))
        .expect(1)
        .mount(&server)
        .await;

    let source = source_for(&server);
    let lines = source.fetch("KJFK").await.unwrap();
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0], "2024/10/16 10:50");
}

#[tokio::test]
async fn test_decode_fetched_report() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/KJFK.TXT"))
        .respond_with(ResponseTemplate::new(200).set_body_string(PAYLOAD))
        .mount(&server)
        .await;

    let source = source_for(&server);
    let mut parser = ReportParser::from_station(&source, "KJFK", reference_date())
        .await
        .unwrap();
    let record = parser.to_record();

    assert_eq!(record.icao_code, "KJFK");
    assert_eq!(record.altimeter, Some(1013));
    assert_eq!(record.cloud_ceiling, Some(2500));
}

#[tokio::test]
async fn test_missing_station_is_status_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let source = source_for(&server);
    let err = ReportParser::from_station(&source, "ZZZZ", reference_date())
        .await
        .unwrap_err();
    assert!(matches!(err, MetarError::FetchStatus { status: 404, .. }));
}

#[tokio::test]
async fn test_single_line_payload_is_malformed() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/EGLL.TXT"))
        .respond_with(ResponseTemplate::new(200).set_body_string("2024/10/16 10:50\n"))
        .mount(&server)
        .await;

    let source = source_for(&server);
    let err = ReportParser::from_station(&source, "EGLL", reference_date())
        .await
        .unwrap_err();
    assert!(matches!(err, MetarError::MalformedSourceData { .. }));
}
