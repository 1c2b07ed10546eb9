//! Command dispatcher for the presentation layer
//!
//! Each user action is a [`Command`]. The dispatcher runs it against the
//! [`LocationBook`] and answers with an [`Outcome`]: one status line plus
//! whatever the front-end should redraw.

use serde::Serialize;
use shared::{
    export_locations_csv, seasonal_averages, Coordinate, ParamFamily, Provenance, SavedLocation,
    Season, CSV_FILE_NAME,
};

use crate::config::ClientConfig;
use crate::error::{ClientError, ClientResult};
use crate::fetcher::SeriesFetcher;
use crate::geocode::Geocoder;
use crate::render::{climate_table, ChartSpec, MapView, Render};
use crate::services::SeriesService;
use crate::state::LocationBook;

pub const MSG_LOCATION_ADDED: &str = "Location added!";
pub const MSG_LOCATION_EXISTS: &str = "Location already saved";
pub const MSG_LOCATION_REMOVED: &str = "Location removed!";
pub const MSG_DEMO_NDVI: &str = "API error: Using demo NDVI data";
pub const MSG_DEMO_CLIMATE: &str = "API Error: Using demo data";
pub const MSG_DATA_LOADED: &str = "Data loaded!";
pub const MSG_INVALID_COORDINATES: &str =
    "Error: Enter valid coordinates (lat: -90..90, lon: -180..180)";
pub const MSG_PLACE_NOT_FOUND: &str = "Error: Could not find the location.";
pub const MSG_SELECT_PLACE: &str = "Select a location from the list";
pub const MSG_EMPTY_EXPORT: &str = "Add locations";

/// Where a new location comes from
#[derive(Debug, Clone, PartialEq)]
pub enum Target {
    Coordinates { latitude: f64, longitude: f64 },
    Place(String),
}

/// User actions
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    AddLocation { name: String, target: Target },
    RemoveLocation { index: usize },
    ShowChart { index: usize },
    ListLocations,
    ExportCsv,
    ClimateSummary { place: String, season: Season },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusLevel {
    Info,
    Success,
    Warning,
    Error,
}

/// Whether the data behind a status came from the provider
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DataSource {
    Live,
    Demo,
}

impl<T> From<&Provenance<T>> for DataSource {
    fn from(provenance: &Provenance<T>) -> Self {
        if provenance.is_demo() {
            DataSource::Demo
        } else {
            DataSource::Live
        }
    }
}

/// Status line shown to the user
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Status {
    pub message: String,
    pub level: StatusLevel,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<DataSource>,
    /// Why demo data was used
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl Status {
    pub fn new(level: StatusLevel, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            level,
            source: None,
            detail: None,
        }
    }

    /// Tag the status with the data's origin and, for demo data, the reason
    pub fn with_provenance<T>(mut self, provenance: &Provenance<T>) -> Self {
        self.source = Some(DataSource::from(provenance));
        self.detail = provenance.reason().map(ToString::to_string);
        self
    }
}

/// Result of one command
#[derive(Debug, Clone, Serialize)]
pub struct Outcome {
    pub status: Status,
    pub renders: Vec<Render>,
}

impl Outcome {
    fn new(status: Status, renders: Vec<Render>) -> Self {
        Self { status, renders }
    }

    /// Status-only outcome for a failed command
    pub fn failure(err: &ClientError) -> Self {
        let message = match err {
            ClientError::InvalidInput(msg) => msg.clone(),
            ClientError::NotFound(_) | ClientError::Network(_) => MSG_PLACE_NOT_FOUND.to_string(),
            other => format!("Error: {}", other),
        };
        Self::new(Status::new(StatusLevel::Error, message), Vec::new())
    }

    pub fn is_failure(&self) -> bool {
        self.status.level == StatusLevel::Error
    }
}

/// Runs commands against the saved-location book
pub struct Dispatcher {
    geocoder: Geocoder,
    series: SeriesService,
}

impl Dispatcher {
    pub fn new(geocoder: Geocoder, series: SeriesService) -> Self {
        Self { geocoder, series }
    }

    pub fn from_config(config: &ClientConfig) -> ClientResult<Self> {
        let geocoder = Geocoder::new(&config.geocoder)?;
        let fetcher = SeriesFetcher::new(&config.relay_url)?;
        let series = SeriesService::new(fetcher, config.date_range()?);
        Ok(Self::new(geocoder, series))
    }

    /// Run a command, turning any error into a failure outcome
    pub async fn handle(&self, book: &mut LocationBook, command: Command) -> Outcome {
        match self.dispatch(book, command).await {
            Ok(outcome) => outcome,
            Err(err) => {
                tracing::warn!("Command failed: {}", err);
                Outcome::failure(&err)
            }
        }
    }

    /// Run a command
    pub async fn dispatch(&self, book: &mut LocationBook, command: Command) -> ClientResult<Outcome> {
        tracing::info!("Dispatching {:?}", command);

        match command {
            Command::AddLocation { name, target } => self.add_location(book, name, target).await,
            Command::RemoveLocation { index } => {
                let removed = book.remove(index)?;
                tracing::info!("Removed {}", removed.name);
                Ok(Outcome::new(
                    Status::new(StatusLevel::Success, MSG_LOCATION_REMOVED),
                    refresh(book),
                ))
            }
            Command::ShowChart { index } => {
                let location = book.get(index).ok_or_else(|| {
                    ClientError::InvalidInput(format!("No saved location at index {}", index))
                })?;
                Ok(Outcome::new(
                    Status::new(StatusLevel::Info, format!("NDVI for {}", location.name)),
                    vec![Render::Chart(ChartSpec::ndvi(location))],
                ))
            }
            Command::ListLocations => Ok(Outcome::new(
                Status::new(
                    StatusLevel::Info,
                    format!("{} saved locations", book.len()),
                ),
                refresh(book),
            )),
            Command::ExportCsv => {
                if book.is_empty() {
                    return Err(ClientError::InvalidInput(MSG_EMPTY_EXPORT.to_string()));
                }
                let content = export_locations_csv(book.locations())?;
                Ok(Outcome::new(
                    Status::new(
                        StatusLevel::Success,
                        format!("Exported {} locations", book.len()),
                    ),
                    vec![Render::Csv {
                        file_name: CSV_FILE_NAME.to_string(),
                        content,
                    }],
                ))
            }
            Command::ClimateSummary { place, season } => self.climate_summary(&place, season).await,
        }
    }

    async fn add_location(
        &self,
        book: &mut LocationBook,
        name: String,
        target: Target,
    ) -> ClientResult<Outcome> {
        let (coordinate, name) = match target {
            Target::Coordinates {
                latitude,
                longitude,
            } => {
                let coordinate = Coordinate::new(latitude, longitude)
                    .map_err(|_| ClientError::InvalidInput(MSG_INVALID_COORDINATES.to_string()))?;
                (coordinate, name)
            }
            Target::Place(place) => {
                let coordinate = self.geocoder.geocode(&place).await?;
                let name = if name.trim().is_empty() { place } else { name };
                (coordinate, name)
            }
        };

        let ndvi = self.series.ndvi_series(coordinate).await?;
        let source = DataSource::from(&ndvi);
        let location = SavedLocation::new(name, coordinate, *ndvi.data());

        let status = if !book.add(location)? {
            Status::new(StatusLevel::Info, MSG_LOCATION_EXISTS)
        } else if source == DataSource::Demo {
            Status::new(StatusLevel::Warning, MSG_DEMO_NDVI)
        } else {
            Status::new(StatusLevel::Success, MSG_LOCATION_ADDED)
        };

        Ok(Outcome::new(status.with_provenance(&ndvi), refresh(book)))
    }

    async fn climate_summary(&self, place: &str, season: Season) -> ClientResult<Outcome> {
        let place = place.trim();
        if place.is_empty() {
            return Err(ClientError::InvalidInput(MSG_SELECT_PLACE.to_string()));
        }

        let coordinate = self.geocoder.geocode(place).await?;
        let monthly = self
            .series
            .monthly_series(coordinate, ParamFamily::Climate.params())
            .await?;
        let source = DataSource::from(&monthly);

        let averages = seasonal_averages(monthly.data(), season);
        let html = climate_table(place, season, &averages);

        let status = match source {
            DataSource::Live => Status::new(StatusLevel::Success, MSG_DATA_LOADED),
            DataSource::Demo => Status::new(StatusLevel::Warning, MSG_DEMO_CLIMATE),
        };

        Ok(Outcome::new(
            status.with_provenance(&monthly),
            vec![Render::Table { html }],
        ))
    }
}

/// Map markers plus the chart of the first saved location
fn refresh(book: &LocationBook) -> Vec<Render> {
    let mut renders = vec![Render::Map(MapView::for_locations(book.locations()))];
    if let Some(first) = book.get(0) {
        renders.push(Render::Chart(ChartSpec::ndvi(first)));
    }
    renders
}
