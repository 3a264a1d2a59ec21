use std::{path::PathBuf, sync::Arc, time::Duration};

use accuweather_core::{
    Condition, ConditionTable, Config, DataSource, DeviceInfo, LocationConfig, NativeUnits,
    SnapshotCoordinator, VendorSnapshot, WeatherEntity, WeatherState,
};
use anyhow::Context;
use clap::{ArgAction, Parser, Subcommand};
use serde::Serialize;
use tracing::{info, warn};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "accuweather", version, about = "AccuWeather weather-entity viewer")]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Register a location and the saved payload files to read it from.
    Add {
        /// AccuWeather location key, e.g. "268068".
        location_key: String,

        /// Display name; prompted for when absent.
        #[arg(long)]
        name: Option<String>,

        /// Current conditions JSON file.
        #[arg(long)]
        current: PathBuf,

        /// Daily forecast JSON file (array of days).
        #[arg(long)]
        forecast: Option<PathBuf>,

        /// Make this the default location.
        #[arg(long)]
        default: bool,
    },

    /// Print the entity state for a location.
    Show {
        /// Location key; the configured default when absent.
        location_key: Option<String>,
    },

    /// Re-read the payload files periodically and print the state when it changes.
    Watch {
        /// Location key; the configured default when absent.
        location_key: Option<String>,

        /// Seconds between reloads.
        #[arg(long, default_value_t = 60)]
        interval: u64,
    },

    /// Resolve a vendor icon code to its canonical condition.
    Classify {
        /// AccuWeather icon code.
        icon: u32,
    },
}

/// What `show` and `watch` print.
#[derive(Debug, Serialize)]
struct Report<'a> {
    unique_id: &'a str,
    attribution: &'a str,
    version: u64,
    units: NativeUnits,
    device_info: &'a DeviceInfo,
    state: &'a WeatherState,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Command::Add {
                location_key,
                name,
                current,
                forecast,
                default,
            } => add_location(location_key, name, current, forecast, default),
            Command::Show { location_key } => {
                let config = Config::load()?;
                let (key, location) = config.resolve(location_key.as_deref())?;

                let entity = open_entity(key, location)?;
                print_report(&entity, &entity.state())
            }
            Command::Watch {
                location_key,
                interval,
            } => {
                let config = Config::load()?;
                let (key, location) = config.resolve(location_key.as_deref())?;

                watch(key, location, Duration::from_secs(interval.max(1))).await
            }
            Command::Classify { icon } => {
                let condition = ConditionTable::accuweather().classify(icon);
                println!("{}", condition.as_ref().map_or("unknown", Condition::as_str));
                Ok(())
            }
        }
    }
}

fn add_location(
    location_key: String,
    name: Option<String>,
    current: PathBuf,
    forecast: Option<PathBuf>,
    default: bool,
) -> anyhow::Result<()> {
    let name = match name {
        Some(name) => name,
        None => inquire::Text::new("Display name for this location:")
            .with_default(&location_key)
            .prompt()
            .context("Failed to read location name")?,
    };

    let location = LocationConfig {
        name,
        current,
        forecast,
    };
    // Fail early on payloads we could not show later.
    location.read_snapshot()?;

    let mut config = Config::load()?;
    config.upsert_location(&location_key, location);
    if default {
        config.set_default_location(&location_key)?;
    }
    config.save()?;

    info!(location = %location_key, "Location saved");
    println!(
        "Saved location {location_key} to {}",
        Config::config_file_path()?.display()
    );
    Ok(())
}

fn open_entity(
    key: &str,
    location: &LocationConfig,
) -> anyhow::Result<WeatherEntity<Arc<SnapshotCoordinator>>> {
    let snapshot = location.read_snapshot()?;
    let coordinator = SnapshotCoordinator::new(key, &location.name, snapshot);

    Ok(WeatherEntity::new(Arc::new(coordinator)))
}

fn print_report<S: DataSource>(
    entity: &WeatherEntity<S>,
    state: &WeatherState,
) -> anyhow::Result<()> {
    let report = Report {
        unique_id: entity.unique_id(),
        attribution: entity.attribution(),
        version: entity.source().version(),
        units: entity.units(),
        device_info: entity.device_info(),
        state,
    };

    let json = serde_json::to_string_pretty(&report).context("Failed to render report")?;
    println!("{json}");
    Ok(())
}

async fn watch(key: &str, location: &LocationConfig, interval: Duration) -> anyhow::Result<()> {
    let entity = open_entity(key, location)?;
    let coordinator = Arc::clone(entity.source());

    let mut last = entity.state();
    print_report(&entity, &last)?;

    let mut ticker = tokio::time::interval(interval);
    // The first tick completes immediately.
    ticker.tick().await;

    // Created once so a Ctrl-C during a reload is not lost.
    let shutdown = tokio::signal::ctrl_c();
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                match reload(location.clone()).await {
                    Ok(snapshot) => {
                        coordinator.replace(snapshot);

                        let state = entity.state();
                        if state != last {
                            print_report(&entity, &state)?;
                            last = state;
                        }
                    }
                    Err(err) => {
                        warn!(
                            location = %key,
                            error = %format!("{err:#}"),
                            "Reload failed, keeping previous snapshot"
                        );
                    }
                }
            }
            _ = &mut shutdown => {
                info!(location = %key, "Stopping watch");
                break;
            }
        }
    }

    Ok(())
}

/// Read the payload files off the async runtime.
async fn reload(location: LocationConfig) -> anyhow::Result<VendorSnapshot> {
    tokio::task::spawn_blocking(move || location.read_snapshot())
        .await
        .context("Reload task panicked")?
}
