//! Common types used across the platform

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::validation::{parse_wire_date, validate_coordinates, ValidationError};

/// Wire format for dates exchanged with the relay and the upstream provider
pub const WIRE_DATE_FORMAT: &str = "%Y%m%d";

/// Validated GPS coordinates
#[derive(Debug, Clone, Copy, Serialize, PartialEq)]
pub struct Coordinate {
    latitude: f64,
    longitude: f64,
}

impl Coordinate {
    /// Build a coordinate, rejecting out-of-range or non-finite values
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, ValidationError> {
        validate_coordinates(latitude, longitude)?;
        Ok(Self {
            latitude,
            longitude,
        })
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }
}

/// Inclusive date range for daily series requests
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, ValidationError> {
        if start > end {
            return Err(ValidationError::InvalidDateRange(format!(
                "start {} is after end {}",
                start, end
            )));
        }
        Ok(Self { start, end })
    }

    /// Parse a range from two `YYYYMMDD` strings
    pub fn from_wire(start: &str, end: &str) -> Result<Self, ValidationError> {
        Self::new(parse_wire_date(start)?, parse_wire_date(end)?)
    }

    pub fn start_wire(&self) -> String {
        self.start.format(WIRE_DATE_FORMAT).to_string()
    }

    pub fn end_wire(&self) -> String {
        self.end.format(WIRE_DATE_FORMAT).to_string()
    }
}

impl Default for DateRange {
    /// Jan 1 through Oct 4 of the reference year
    fn default() -> Self {
        Self {
            start: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap_or_default(),
            end: NaiveDate::from_ymd_opt(2024, 10, 4).unwrap_or_default(),
        }
    }
}
