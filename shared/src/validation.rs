//! Validation utilities for Bloom Climate
//!
//! Everything here runs before any network call is made. A failure is a
//! hard input error and never triggers demo-data substitution.

use chrono::NaiveDate;
use thiserror::Error;

use crate::types::WIRE_DATE_FORMAT;

/// Latitude bounds in degrees
pub const LATITUDE_RANGE: (f64, f64) = (-90.0, 90.0);

/// Longitude bounds in degrees
pub const LONGITUDE_RANGE: (f64, f64) = (-180.0, 180.0);

/// Input validation failures
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ValidationError {
    #[error("Invalid coordinates: lat {latitude}, lon {longitude}")]
    InvalidCoordinates { latitude: f64, longitude: f64 },

    #[error("Invalid date: {0}")]
    InvalidDate(String),

    #[error("Invalid date range: {0}")]
    InvalidDateRange(String),

    #[error("{0} must not be empty")]
    EmptyField(&'static str),

    #[error("Unknown parameter: {0}")]
    UnknownParameter(String),

    #[error("Unknown season: {0}")]
    UnknownSeason(String),
}

// ============================================================================
// Coordinate Validations
// ============================================================================

/// Validate latitude/longitude ranges (lat: -90..90, lon: -180..180)
pub fn validate_coordinates(latitude: f64, longitude: f64) -> Result<(), ValidationError> {
    let lat_ok = latitude.is_finite() && latitude >= LATITUDE_RANGE.0 && latitude <= LATITUDE_RANGE.1;
    let lon_ok =
        longitude.is_finite() && longitude >= LONGITUDE_RANGE.0 && longitude <= LONGITUDE_RANGE.1;

    if lat_ok && lon_ok {
        Ok(())
    } else {
        Err(ValidationError::InvalidCoordinates {
            latitude,
            longitude,
        })
    }
}

/// Parse a coordinate pair from raw text input
pub fn parse_coordinates(latitude: &str, longitude: &str) -> Result<(f64, f64), ValidationError> {
    let lat = latitude.trim().parse::<f64>().unwrap_or(f64::NAN);
    let lon = longitude.trim().parse::<f64>().unwrap_or(f64::NAN);
    validate_coordinates(lat, lon)?;
    Ok((lat, lon))
}

// ============================================================================
// General Validations
// ============================================================================

/// Validate a required free-text field, returning it trimmed
pub fn validate_required<'a>(value: &'a str, field: &'static str) -> Result<&'a str, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::EmptyField(field));
    }
    Ok(trimmed)
}

/// Parse a `YYYYMMDD` date
pub fn parse_wire_date(value: &str) -> Result<NaiveDate, ValidationError> {
    if value.len() != 8 || !value.chars().all(|c| c.is_ascii_digit()) {
        return Err(ValidationError::InvalidDate(value.to_string()));
    }
    NaiveDate::parse_from_str(value, WIRE_DATE_FORMAT)
        .map_err(|_| ValidationError::InvalidDate(value.to_string()))
}
