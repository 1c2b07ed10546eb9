//! Bloom Climate client
//!
//! Geocodes places, fetches daily series through the relay and aggregates
//! them into monthly and seasonal views. Saved locations live in a local
//! JSON store. Front-ends drive everything through [`Dispatcher`].

pub mod commands;
pub mod config;
pub mod error;
pub mod fetcher;
pub mod geocode;
pub mod render;
pub mod services;
pub mod state;
pub mod store;

pub use commands::{Command, DataSource, Dispatcher, Outcome, Status, StatusLevel, Target};
pub use config::ClientConfig;
pub use error::{ClientError, ClientResult};
pub use fetcher::SeriesFetcher;
pub use geocode::Geocoder;
pub use render::Render;
pub use services::SeriesService;
pub use state::LocationBook;
pub use store::{JsonFileStore, LocationStore, MemoryStore};
