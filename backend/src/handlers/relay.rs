//! HTTP handlers for the same-origin data relay
//!
//! Coordinates are checked before anything is sent upstream. Missing
//! parameters fall back to lat/lon 0 and the reference date range.

use axum::{
    extract::{Query, State},
    http::header,
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use shared::{parse_wire_date, Coordinate, DateRange, ParamFamily};

use crate::error::{AppError, AppResult};
use crate::AppState;

/// Query parameters accepted by both relay endpoints
#[derive(Debug, Default, Deserialize)]
pub struct RelayQuery {
    pub lat: Option<String>,
    pub lon: Option<String>,
    pub start: Option<String>,
    pub end: Option<String>,
}

impl RelayQuery {
    /// Parse and bounds-check the coordinate pair
    pub fn coordinate(&self) -> AppResult<Coordinate> {
        let lat = parse_degrees(self.lat.as_deref())?;
        let lon = parse_degrees(self.lon.as_deref())?;
        Coordinate::new(lat, lon).map_err(|_| AppError::InvalidCoordinates)
    }

    /// Parse the inclusive date range, defaulting to the reference year window
    pub fn date_range(&self) -> AppResult<DateRange> {
        let defaults = DateRange::default();
        let start = match self.start.as_deref() {
            Some(s) => parse_wire_date(s).map_err(|e| AppError::InvalidDateRange(e.to_string()))?,
            None => defaults.start,
        };
        let end = match self.end.as_deref() {
            Some(s) => parse_wire_date(s).map_err(|e| AppError::InvalidDateRange(e.to_string()))?,
            None => defaults.end,
        };
        DateRange::new(start, end).map_err(|e| AppError::InvalidDateRange(e.to_string()))
    }
}

fn parse_degrees(raw: Option<&str>) -> AppResult<f64> {
    match raw.map(str::trim) {
        None | Some("") => Ok(0.0),
        Some(s) => s.parse::<f64>().map_err(|_| AppError::InvalidCoordinates),
    }
}

/// Relay daily climate parameters (temperature, humidity, precipitation, wind)
pub async fn fetch_climate(
    State(state): State<AppState>,
    Query(query): Query<RelayQuery>,
) -> AppResult<Response> {
    relay(&state, ParamFamily::Climate, &query).await
}

/// Relay the daily vegetation index
pub async fn fetch_ndvi(
    State(state): State<AppState>,
    Query(query): Query<RelayQuery>,
) -> AppResult<Response> {
    relay(&state, ParamFamily::Vegetation, &query).await
}

async fn relay(state: &AppState, family: ParamFamily, query: &RelayQuery) -> AppResult<Response> {
    let coordinate = query.coordinate()?;
    let range = query.date_range()?;

    tracing::info!(
        "Relaying {} for ({}, {})",
        family.endpoint(),
        coordinate.latitude(),
        coordinate.longitude()
    );

    let body = state.power.fetch_daily(family, coordinate, range).await?;
    Ok(([(header::CONTENT_TYPE, "application/json")], body).into_response())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(lat: Option<&str>, lon: Option<&str>) -> RelayQuery {
        RelayQuery {
            lat: lat.map(str::to_string),
            lon: lon.map(str::to_string),
            ..Default::default()
        }
    }

    #[test]
    fn test_missing_coordinates_default_to_zero() {
        let coordinate = query(None, None).coordinate().unwrap();
        assert_eq!(coordinate.latitude(), 0.0);
        assert_eq!(coordinate.longitude(), 0.0);
    }

    #[test]
    fn test_out_of_range_rejected() {
        assert!(matches!(
            query(Some("95"), Some("0")).coordinate(),
            Err(AppError::InvalidCoordinates)
        ));
        assert!(matches!(
            query(Some("0"), Some("-200")).coordinate(),
            Err(AppError::InvalidCoordinates)
        ));
        assert!(matches!(
            query(Some("north"), Some("0")).coordinate(),
            Err(AppError::InvalidCoordinates)
        ));
        assert!(matches!(
            query(Some("NaN"), Some("0")).coordinate(),
            Err(AppError::InvalidCoordinates)
        ));
    }

    #[test]
    fn test_default_date_range() {
        let range = RelayQuery::default().date_range().unwrap();
        assert_eq!(range, DateRange::default());
    }

    #[test]
    fn test_reversed_date_range_rejected() {
        let q = RelayQuery {
            start: Some("20241004".to_string()),
            end: Some("20240101".to_string()),
            ..Default::default()
        };
        assert!(matches!(q.date_range(), Err(AppError::InvalidDateRange(_))));
    }
}
