//! Place-name geocoding against a Nominatim-compatible search service

use reqwest::{header, Client};
use serde::Deserialize;
use shared::{validate_required, Coordinate};

use crate::config::GeocoderConfig;
use crate::error::{ClientError, ClientResult};

/// Nominatim serves degrees as strings; other deployments use numbers
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Degrees {
    Text(String),
    Number(f64),
}

impl Degrees {
    fn value(&self) -> Option<f64> {
        match self {
            Degrees::Text(s) => s.trim().parse().ok(),
            Degrees::Number(n) => Some(*n),
        }
    }
}

#[derive(Debug, Deserialize)]
struct SearchResult {
    lat: Degrees,
    lon: Degrees,
}

/// Geocoding client
#[derive(Clone)]
pub struct Geocoder {
    client: Client,
    base_url: String,
    user_agent: String,
}

impl Geocoder {
    pub fn new(config: &GeocoderConfig) -> ClientResult<Self> {
        let client = Client::builder()
            .build()
            .map_err(|e| ClientError::Network(format!("HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            user_agent: config.user_agent.clone(),
        })
    }

    /// Resolve a place name to the coordinate of the best match
    pub async fn geocode(&self, name: &str) -> ClientResult<Coordinate> {
        let query = validate_required(name, "Location name")?;
        let url = format!("{}/search", self.base_url);

        tracing::debug!("Geocoding {:?}", query);

        let response = self
            .client
            .get(&url)
            .header(header::USER_AGENT, &self.user_agent)
            .query(&[("q", query), ("format", "json"), ("limit", "1")])
            .send()
            .await
            .map_err(|e| ClientError::Network(format!("Geocoder request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::Network(format!("Geocoder returned {}", status)));
        }

        let results: Vec<SearchResult> = response
            .json()
            .await
            .map_err(|e| ClientError::Network(format!("Malformed geocoder response: {}", e)))?;

        let best = results
            .into_iter()
            .next()
            .ok_or_else(|| ClientError::NotFound(query.to_string()))?;

        match (best.lat.value(), best.lon.value()) {
            (Some(lat), Some(lon)) => Coordinate::new(lat, lon).map_err(|e| {
                ClientError::Network(format!("Malformed geocoder response: {}", e))
            }),
            _ => Err(ClientError::Network(
                "Malformed geocoder response: unparsable coordinates".to_string(),
            )),
        }
    }
}
