//! Daily and monthly series models

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::validation::ValidationError;

/// Number of buckets in a monthly series
pub const BUCKET_COUNT: usize = 10;

/// Chart/CSV labels for the buckets of a monthly series
pub const BUCKET_LABELS: [&str; BUCKET_COUNT] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct",
];

/// One daily observation as delivered by the provider.
///
/// `null`, NaN and the `-9999` fill value all mean "missing".
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct DailyValue(Option<f64>);

impl DailyValue {
    /// Provider fill value for a missing observation
    pub const SENTINEL: f64 = -9999.0;

    pub fn reading(value: f64) -> Self {
        Self(Some(value))
    }

    pub fn missing() -> Self {
        Self(None)
    }

    /// The reading, or `None` for any flavour of missing
    pub fn valid(&self) -> Option<f64> {
        match self.0 {
            Some(v) if v.is_nan() || v == Self::SENTINEL => None,
            other => other,
        }
    }
}

impl From<f64> for DailyValue {
    fn from(value: f64) -> Self {
        Self::reading(value)
    }
}

impl From<Option<f64>> for DailyValue {
    fn from(value: Option<f64>) -> Self {
        Self(value)
    }
}

/// Climate / vegetation parameters served by the provider
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ParamId {
    /// Air temperature at 2 m (°C)
    #[serde(rename = "T2M")]
    T2m,
    /// Relative humidity at 2 m (%)
    #[serde(rename = "RH2M")]
    Rh2m,
    /// Corrected precipitation (mm/day)
    #[serde(rename = "PRECTOTCORR")]
    PrecTotCorr,
    /// Wind speed at 10 m (m/s)
    #[serde(rename = "WS10M")]
    Ws10m,
    /// Normalized difference vegetation index
    #[serde(rename = "NDVI")]
    Ndvi,
}

impl ParamId {
    pub const ALL: [ParamId; 5] = [
        ParamId::T2m,
        ParamId::Rh2m,
        ParamId::PrecTotCorr,
        ParamId::Ws10m,
        ParamId::Ndvi,
    ];

    /// Provider code, as used in query strings and payload keys
    pub fn code(&self) -> &'static str {
        match self {
            ParamId::T2m => "T2M",
            ParamId::Rh2m => "RH2M",
            ParamId::PrecTotCorr => "PRECTOTCORR",
            ParamId::Ws10m => "WS10M",
            ParamId::Ndvi => "NDVI",
        }
    }

    /// Human-readable label for summary tables
    pub fn label(&self) -> &'static str {
        match self {
            ParamId::T2m => "Average Temperature (°C)",
            ParamId::Rh2m => "Average Humidity (%)",
            ParamId::PrecTotCorr => "Average Precipitation (mm/day)",
            ParamId::Ws10m => "Average Wind Speed (m/s)",
            ParamId::Ndvi => "NDVI",
        }
    }

    /// Normalized [0,1] index rather than a physical unit
    pub fn is_vegetation_index(&self) -> bool {
        matches!(self, ParamId::Ndvi)
    }

    pub fn family(&self) -> ParamFamily {
        if self.is_vegetation_index() {
            ParamFamily::Vegetation
        } else {
            ParamFamily::Climate
        }
    }
}

impl fmt::Display for ParamId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for ParamId {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ParamId::ALL
            .into_iter()
            .find(|p| p.code().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ValidationError::UnknownParameter(s.to_string()))
    }
}

/// Parameter groups, one relay endpoint each
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParamFamily {
    Climate,
    Vegetation,
}

impl ParamFamily {
    /// Parameters requested upstream for this family
    pub fn params(&self) -> &'static [ParamId] {
        match self {
            ParamFamily::Climate => &[
                ParamId::T2m,
                ParamId::Rh2m,
                ParamId::PrecTotCorr,
                ParamId::Ws10m,
            ],
            ParamFamily::Vegetation => &[ParamId::Ndvi],
        }
    }

    /// Relay path serving this family
    pub fn endpoint(&self) -> &'static str {
        match self {
            ParamFamily::Climate => "/fetch_climate",
            ParamFamily::Vegetation => "/fetch_ndvi",
        }
    }

    /// Comma-joined provider codes
    pub fn query_value(&self) -> String {
        self.params()
            .iter()
            .map(ParamId::code)
            .collect::<Vec<_>>()
            .join(",")
    }

    /// Family shared by every parameter in the set, if any
    pub fn of(params: &[ParamId]) -> Option<ParamFamily> {
        let first = params.first()?.family();
        params
            .iter()
            .all(|p| p.family() == first)
            .then_some(first)
    }
}

/// Fixed 10-bucket series derived from a daily series.
///
/// Buckets are equal slices of the valid daily readings, not calendar months.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct MonthlySeries([f64; BUCKET_COUNT]);

impl MonthlySeries {
    pub fn new(values: [f64; BUCKET_COUNT]) -> Self {
        Self(values)
    }

    pub fn values(&self) -> &[f64; BUCKET_COUNT] {
        &self.0
    }

    pub fn get(&self, index: usize) -> Option<f64> {
        self.0.get(index).copied()
    }

    /// Last bucket, used for marker tiers
    pub fn latest(&self) -> f64 {
        self.0[BUCKET_COUNT - 1]
    }

    pub fn iter(&self) -> impl Iterator<Item = f64> + '_ {
        self.0.iter().copied()
    }

    /// Bucket values paired with their labels
    pub fn labelled(&self) -> impl Iterator<Item = (&'static str, f64)> + '_ {
        BUCKET_LABELS.iter().copied().zip(self.iter())
    }
}

impl std::ops::Index<usize> for MonthlySeries {
    type Output = f64;

    fn index(&self, index: usize) -> &f64 {
        &self.0[index]
    }
}

/// Named seasons over monthly bucket indices
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Season {
    Winter,
    Spring,
    #[default]
    Summer,
    Autumn,
}

impl Season {
    pub const ALL: [Season; 4] = [Season::Winter, Season::Spring, Season::Summer, Season::Autumn];

    /// Bucket indices belonging to the season
    pub fn indices(&self) -> &'static [usize] {
        match self {
            Season::Winter => &[0, 1],
            Season::Spring => &[2, 3, 4],
            Season::Summer => &[5, 6, 7],
            Season::Autumn => &[8, 9],
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Season::Winter => "winter",
            Season::Spring => "spring",
            Season::Summer => "summer",
            Season::Autumn => "autumn",
        }
    }
}

impl fmt::Display for Season {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Season::Winter => write!(f, "Winter"),
            Season::Spring => write!(f, "Spring"),
            Season::Summer => write!(f, "Summer"),
            Season::Autumn => write!(f, "Autumn"),
        }
    }
}

impl FromStr for Season {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Season::ALL
            .into_iter()
            .find(|season| season.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ValidationError::UnknownSeason(s.to_string()))
    }
}
