//! Subcommand implementations.

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use chrono::Local;
use clap::{Args, Subcommand};
use climate_api::error::ApiError;
use climate_api::{service, AppState};
use climate_db::Database;
use log::info;

/// Where the measurement data comes from.
#[derive(Args, Debug)]
pub struct DataSource {
    /// SQLite dataset, opened read-only
    #[arg(long, env = "CLIMATE_DATABASE", default_value = "Resources/hawaii.sqlite")]
    pub database: PathBuf,

    /// Serve from an in-memory database seeded with this station CSV instead
    #[arg(long, requires = "measurements_csv")]
    pub stations_csv: Option<PathBuf>,

    /// Measurement CSV to seed the in-memory database with
    #[arg(long, requires = "stations_csv")]
    pub measurements_csv: Option<PathBuf>,
}

impl DataSource {
    pub fn open(&self) -> anyhow::Result<Database> {
        match (&self.stations_csv, &self.measurements_csv) {
            (Some(stations), Some(measurements)) => {
                let db = Database::new()?;
                let stations_data = std::fs::read_to_string(stations)
                    .with_context(|| format!("reading {}", stations.display()))?;
                let measurements_data = std::fs::read_to_string(measurements)
                    .with_context(|| format!("reading {}", measurements.display()))?;
                db.load_stations(&stations_data)?;
                db.load_measurements(&measurements_data)?;
                Ok(db)
            }
            _ => Database::open_read_only(&self.database),
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Serve the HTTP API
    Serve {
        #[command(flatten)]
        source: DataSource,

        /// Address to bind
        #[arg(long, env = "CLIMATE_HOST", default_value = "127.0.0.1")]
        host: IpAddr,

        /// Port to bind
        #[arg(short, long, env = "CLIMATE_PORT", default_value_t = 5000)]
        port: u16,
    },

    /// Print the [min, avg, max] temperature between two dates as JSON
    Range {
        /// First day of the range (YYYY-MM-DD)
        start_date: String,

        /// Last day of the range (YYYY-MM-DD), defaults to today
        end_date: Option<String>,

        #[command(flatten)]
        source: DataSource,
    },
}

pub async fn run(command: Command) -> anyhow::Result<ExitCode> {
    match command {
        Command::Serve { source, host, port } => {
            let db = source.open()?;
            match db.query_date_bounds()? {
                Some((first, last)) => info!("Serving measurements from {} to {}", first, last),
                None => info!("Serving an empty measurement table"),
            }
            climate_api::serve(SocketAddr::new(host, port), AppState::new(db)).await?;
            Ok(ExitCode::SUCCESS)
        }
        Command::Range {
            start_date,
            end_date,
            source,
        } => {
            let db = source.open()?;
            let today = Local::now().date_naive();
            match service::temperature_range(&db, &start_date, end_date.as_deref(), today) {
                Ok(triple) => {
                    println!("{}", serde_json::to_string(&triple)?);
                    Ok(ExitCode::SUCCESS)
                }
                Err(e @ ApiError::Range(_)) => {
                    println!("{}", serde_json::to_string(&e.body())?);
                    Ok(ExitCode::FAILURE)
                }
                Err(ApiError::Store(e)) => Err(e),
            }
        }
    }
}
