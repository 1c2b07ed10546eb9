//! Saved location models

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::models::MonthlySeries;
use crate::types::Coordinate;

/// Name used when the user leaves the name field blank
pub const DEFAULT_LOCATION_NAME: &str = "New location";

/// A user-saved location with its NDVI series
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SavedLocation {
    pub name: String,
    pub lat: f64,
    pub lon: f64,
    pub ndvi: MonthlySeries,
}

impl SavedLocation {
    pub fn new(name: impl Into<String>, coordinate: Coordinate, ndvi: MonthlySeries) -> Self {
        let name = name.into();
        let name = if name.trim().is_empty() {
            DEFAULT_LOCATION_NAME.to_string()
        } else {
            name.trim().to_string()
        };
        Self {
            name,
            lat: coordinate.latitude(),
            lon: coordinate.longitude(),
            ndvi,
        }
    }

    /// Last NDVI bucket
    pub fn latest_ndvi(&self) -> f64 {
        self.ndvi.latest()
    }

    pub fn tier(&self) -> MarkerTier {
        MarkerTier::from_ndvi(self.latest_ndvi())
    }

    /// Same name and coordinates, regardless of series
    pub fn same_place(&self, other: &SavedLocation) -> bool {
        self.name == other.name && self.lat == other.lat && self.lon == other.lon
    }
}

/// Map marker tier from the latest NDVI bucket
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum MarkerTier {
    /// NDVI < 0.3
    Low,
    /// 0.3 <= NDVI < 0.6
    Medium,
    /// NDVI >= 0.6
    High,
}

impl MarkerTier {
    pub fn from_ndvi(ndvi: f64) -> Self {
        if ndvi < 0.3 {
            MarkerTier::Low
        } else if ndvi < 0.6 {
            MarkerTier::Medium
        } else {
            MarkerTier::High
        }
    }

    /// Marker fill colour
    pub fn color(&self) -> &'static str {
        match self {
            MarkerTier::Low => "red",
            MarkerTier::Medium => "yellow",
            MarkerTier::High => "green",
        }
    }
}

impl fmt::Display for MarkerTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MarkerTier::Low => write!(f, "low"),
            MarkerTier::Medium => write!(f, "medium"),
            MarkerTier::High => write!(f, "high"),
        }
    }
}
