//! Report retrieval from a weather data provider.
//!
//! A source returns the raw payload for a station split into lines. The
//! NOAA station files carry a timestamp header on the first line and the
//! report itself on the second; interpreting those lines is left to
//! [`crate::parser::ReportParser::from_source_lines`].

use crate::config::SourceConfig;
use crate::constants::station_url;
use crate::error::{MetarError, Result};
use reqwest::Client;
use std::future::Future;
use std::time::Duration;
use tracing::{debug, info};

/// Anything that can produce the raw payload lines for a station
pub trait ReportSource {
    fn fetch(&self, station: &str) -> impl Future<Output = Result<Vec<String>>> + Send;
}

/// HTTP source for the NOAA station directory layout (`<base>/<ICAO>.TXT`)
#[derive(Debug, Clone)]
pub struct NoaaSource {
    client: Client,
    base_url: String,
}

impl NoaaSource {
    pub fn new(config: &SourceConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| MetarError::configuration(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: config.base_url.clone(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

impl ReportSource for NoaaSource {
    async fn fetch(&self, station: &str) -> Result<Vec<String>> {
        let url = station_url(&self.base_url, station);
        info!("Fetching report for {} from {}", station, url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|source| MetarError::Fetch {
                station: station.to_string(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(MetarError::FetchStatus {
                station: station.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response.text().await.map_err(|source| MetarError::Fetch {
            station: station.to_string(),
            source,
        })?;

        let lines: Vec<String> = body.lines().map(str::to_string).collect();
        debug!("Received {} lines for {}", lines.len(), station);
        Ok(lines)
    }
}
