//! Daily series retrieval through the relay
//!
//! The relay exposes one endpoint per parameter family, so a request may not
//! mix the vegetation index with climate parameters.

use reqwest::Client;
use serde::Deserialize;
use shared::{Coordinate, DailyValue, DateRange, ParamFamily, ParamId};
use std::collections::{BTreeMap, BTreeSet};

use crate::error::{ClientError, ClientResult};

/// Daily values per parameter, in chronological order
pub type DailySeries = BTreeMap<ParamId, Vec<DailyValue>>;

#[derive(Debug, Deserialize)]
struct PowerResponse {
    properties: PowerProperties,
}

#[derive(Debug, Deserialize)]
struct PowerProperties {
    /// Parameter code -> (YYYYMMDD -> value)
    parameter: BTreeMap<String, BTreeMap<String, DailyValue>>,
}

#[derive(Debug, Deserialize)]
struct RelayError {
    error: String,
}

/// Relay client for daily point series
#[derive(Clone)]
pub struct SeriesFetcher {
    client: Client,
    relay_url: String,
}

impl SeriesFetcher {
    pub fn new(relay_url: &str) -> ClientResult<Self> {
        let client = Client::builder()
            .build()
            .map_err(|e| ClientError::Network(format!("HTTP client: {}", e)))?;

        Ok(Self {
            client,
            relay_url: relay_url.trim_end_matches('/').to_string(),
        })
    }

    /// Fetch the daily series of every requested parameter
    pub async fn fetch_daily(
        &self,
        coordinate: Coordinate,
        params: &[ParamId],
        range: DateRange,
    ) -> ClientResult<DailySeries> {
        let family = ParamFamily::of(params).ok_or_else(|| {
            ClientError::InvalidInput(
                "Parameters must be non-empty and from a single family".to_string(),
            )
        })?;
        if range.start > range.end {
            return Err(ClientError::InvalidInput(format!(
                "Date range start {} is after end {}",
                range.start, range.end
            )));
        }

        let url = format!("{}{}", self.relay_url, family.endpoint());
        let latitude = coordinate.latitude().to_string();
        let longitude = coordinate.longitude().to_string();
        let start = range.start_wire();
        let end = range.end_wire();

        tracing::debug!("Fetching {} for ({}, {})", url, latitude, longitude);

        let response = self
            .client
            .get(&url)
            .query(&[
                ("lat", latitude.as_str()),
                ("lon", longitude.as_str()),
                ("start", start.as_str()),
                ("end", end.as_str()),
            ])
            .send()
            .await
            .map_err(|e| ClientError::Network(format!("Relay request failed: {}", e)))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ClientError::Network(format!("Failed to read relay response: {}", e)))?;

        if !status.is_success() {
            let message = serde_json::from_str::<RelayError>(&body)
                .map(|e| e.error)
                .unwrap_or(body);
            return Err(ClientError::Upstream(format!("{} ({})", message, status)));
        }

        let mut payload: PowerResponse = serde_json::from_str(&body)
            .map_err(|e| ClientError::Upstream(format!("Malformed relay payload: {}", e)))?;

        let wanted: BTreeSet<ParamId> = params.iter().copied().collect();
        wanted
            .into_iter()
            .map(|param| {
                let days = payload
                    .properties
                    .parameter
                    .remove(param.code())
                    .ok_or_else(|| {
                        ClientError::Upstream(format!("{} missing from relay payload", param))
                    })?;
                Ok((param, days.into_values().collect()))
            })
            .collect()
    }
}
