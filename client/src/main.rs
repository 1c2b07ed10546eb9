//! `bloom` command-line front-end

use clap::{Parser, Subcommand};
use shared::Season;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use bloom_client::{
    ClientConfig, Command, Dispatcher, JsonFileStore, LocationBook, Outcome, Render, Target,
};

#[derive(Parser, Debug)]
#[command(
    name = "bloom",
    version,
    about = "Vegetation index and seasonal climate explorer"
)]
struct Cli {
    /// Configuration file (defaults to config/client-{environment}.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Relay base URL
    #[arg(long, global = true, env = "BLOOM_RELAY_URL")]
    relay_url: Option<String>,

    /// Directory holding the saved-location list
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Print the outcome as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Action,
}

#[derive(Subcommand, Debug)]
enum Action {
    /// Save a location with its NDVI series
    Add {
        /// Display name (defaults to the place, or "New location")
        #[arg(long, default_value = "")]
        name: String,

        #[arg(long, requires = "lon", allow_hyphen_values = true)]
        lat: Option<f64>,

        #[arg(long, requires = "lat", allow_hyphen_values = true)]
        lon: Option<f64>,

        /// Place name to geocode instead of coordinates
        #[arg(long, conflicts_with_all = ["lat", "lon"])]
        place: Option<String>,
    },
    /// Delete the saved location at INDEX
    Remove { index: usize },
    /// NDVI chart of the saved location at INDEX
    Chart { index: usize },
    /// Show map markers for all saved locations
    List,
    /// Export all saved locations as CSV
    Export {
        #[arg(long, short)]
        output: Option<PathBuf>,
    },
    /// Seasonal climate table for a place
    Climate {
        place: String,

        #[arg(long, default_value = "summer")]
        season: Season,
    },
}

impl Action {
    fn into_command(self) -> anyhow::Result<(Command, Option<PathBuf>)> {
        let command = match self {
            Action::Add {
                name,
                lat,
                lon,
                place,
            } => {
                let target = match (lat, lon, place) {
                    (Some(latitude), Some(longitude), _) => Target::Coordinates {
                        latitude,
                        longitude,
                    },
                    (_, _, Some(place)) => Target::Place(place),
                    _ => anyhow::bail!("either --lat/--lon or --place is required"),
                };
                Command::AddLocation { name, target }
            }
            Action::Remove { index } => Command::RemoveLocation { index },
            Action::Chart { index } => Command::ShowChart { index },
            Action::List => Command::ListLocations,
            Action::Export { output } => return Ok((Command::ExportCsv, output)),
            Action::Climate { place, season } => Command::ClimateSummary { place, season },
        };
        Ok((command, None))
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "bloom_client=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let mut config = ClientConfig::load(cli.config.as_deref())?;
    if let Some(relay_url) = cli.relay_url {
        config.relay_url = relay_url;
    }
    if let Some(data_dir) = cli.data_dir {
        config.storage.data_dir = data_dir;
    }

    let dispatcher = Dispatcher::from_config(&config)?;
    let mut book = LocationBook::load(JsonFileStore::new(&config.storage.data_dir))?;

    let (command, csv_output) = cli.command.into_command()?;
    let outcome = dispatcher.handle(&mut book, command).await;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&outcome)?);
    } else {
        print_outcome(&outcome, csv_output)?;
    }

    Ok(if outcome.is_failure() {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    })
}

fn print_outcome(outcome: &Outcome, csv_output: Option<PathBuf>) -> anyhow::Result<()> {
    match &outcome.status.detail {
        Some(detail) => println!("{} ({})", outcome.status.message, detail),
        None => println!("{}", outcome.status.message),
    }

    for render in &outcome.renders {
        match render {
            Render::Map(view) => {
                for marker in &view.markers {
                    println!(
                        "  [{}] {} ({}, {})  NDVI {:.2}  {}",
                        marker.index, marker.name, marker.lat, marker.lon, marker.latest_ndvi, marker.tier
                    );
                }
            }
            Render::Chart(chart) => {
                for dataset in &chart.data.datasets {
                    println!("{}", dataset.label);
                    for (label, value) in chart.data.labels.iter().zip(&dataset.data) {
                        println!("  {}  {:.4}", label, value);
                    }
                }
            }
            Render::Table { html } => println!("{}", html),
            Render::Csv { file_name, content } => {
                let path = csv_output.clone().unwrap_or_else(|| PathBuf::from(file_name));
                std::fs::write(&path, content)?;
                println!("Wrote {}", path.display());
            }
        }
    }
    Ok(())
}
