//! NASA POWER API client for daily point data
//!
//! The relay does not interpret the payload; it forwards the body as-is on
//! success and normalizes every failure into an [`AppError::Upstream`].

use reqwest::Client;
use shared::{Coordinate, DateRange, ParamFamily};
use std::time::Duration;

use crate::config::UpstreamConfig;
use crate::error::{AppError, AppResult};

/// NASA POWER API client
#[derive(Clone)]
pub struct PowerClient {
    client: Client,
    base_url: String,
    community: String,
}

impl PowerClient {
    /// Create a new PowerClient with the configured timeout
    pub fn new(config: &UpstreamConfig) -> AppResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| AppError::Configuration(format!("HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: config.base_url.clone(),
            community: config.community.clone(),
        })
    }

    /// Fetch the raw daily payload for every parameter of `family`
    pub async fn fetch_daily(
        &self,
        family: ParamFamily,
        coordinate: Coordinate,
        range: DateRange,
    ) -> AppResult<String> {
        let parameters = family.query_value();
        let latitude = coordinate.latitude().to_string();
        let longitude = coordinate.longitude().to_string();
        let start = range.start_wire();
        let end = range.end_wire();

        tracing::debug!(
            "POWER request: parameters={} lat={} lon={} {}..{}",
            parameters,
            latitude,
            longitude,
            start,
            end
        );

        let response = self
            .client
            .get(&self.base_url)
            .query(&[
                ("parameters", parameters.as_str()),
                ("community", self.community.as_str()),
                ("latitude", latitude.as_str()),
                ("longitude", longitude.as_str()),
                ("start", start.as_str()),
                ("end", end.as_str()),
                ("format", "JSON"),
            ])
            .send()
            .await
            .map_err(|e| AppError::Upstream {
                status: e.status().map(|s| s.as_u16()),
                message: format!("POWER request failed: {}", e),
            })?;

        let status = response.status();
        if status != reqwest::StatusCode::OK {
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::Upstream {
                status: Some(status.as_u16()),
                message: format!("POWER API error: {} - {}", status, body),
            });
        }

        response.text().await.map_err(|e| AppError::Upstream {
            status: None,
            message: format!("Failed to read POWER response: {}", e),
        })
    }
}
