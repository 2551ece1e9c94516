//! SeaSpot CLI
//!
//! Current conditions, polling, location lookup and station readings from
//! the command line.

#![allow(clippy::print_stdout)]

mod cli;
mod render;

use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use application::{ConditionsPoller, ConditionsService, PollState};
use clap::Parser;
use domain::{Bearing, DateRange, LocationId, WindBand, knots};
use infrastructure::{AppConfig, MetoceanAdapter, StationAdapter, init_telemetry};
use serde::Serialize;
use tracing::debug;

use crate::cli::{Cli, Commands, StationCommands, log_filter_from_verbosity};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config =
        AppConfig::load_from(cli.config.as_deref()).context("Failed to load configuration")?;

    let mut telemetry = config.telemetry.clone();
    if let Some(filter) = log_filter_from_verbosity(cli.verbose) {
        telemetry = telemetry.with_log_filter(filter);
    }
    init_telemetry(&telemetry)?;
    debug!(environment = %config.environment, "Configuration loaded");

    let json = cli.json;

    match cli.command {
        Commands::Now {
            location,
            start,
            end,
            series,
        } => {
            let range = DateRange::parse(start.as_deref(), end.as_deref())?;
            let location = location_or_default(location, &config);
            let snapshot = build_service(&config)?.snapshot(location, &range).await?;

            if json {
                print_json(&snapshot)?;
            } else {
                print!("{}", render::snapshot(&snapshot));
                if series {
                    println!();
                    print!("{}", render::series(&snapshot.series));
                }
            }
        },

        Commands::Watch { location, interval } => {
            let location = location_or_default(location, &config);
            let interval = interval.map_or_else(
                || config.poll.interval(),
                |secs| Duration::from_secs(secs.max(1)),
            );
            watch(&config, location, interval, json).await?;
        },

        Commands::Place { id } => {
            let place = build_service(&config)?.place(id).await?;
            if json {
                print_json(&place)?;
            } else {
                println!("{}", render::place_line(&place));
            }
        },

        Commands::Places => {
            let places = build_service(&config)?.places().await?;
            print_places(&places, json)?;
        },

        Commands::Search { text } => {
            let places = build_service(&config)?.search_places(&text).await?;
            print_places(&places, json)?;
        },

        Commands::Station { command } => {
            let service = build_service(&config)?;
            match command {
                StationCommands::Now => {
                    let obs = service.station_now().await?;
                    if json {
                        print_json(&obs)?;
                    } else {
                        print!("{}", render::observation(&obs));
                    }
                },
                StationCommands::History { n } => {
                    let count = n.unwrap_or(config.poll.history_count);
                    let history = service.station_history(count).await?;
                    if json {
                        print_json(history.entries())?;
                    } else {
                        print!("{}", render::series(history.entries()));
                    }
                },
                StationCommands::Pws => {
                    let obs = service.pws_now().await?;
                    if json {
                        print_json(&obs)?;
                    } else {
                        print!("{}", render::observation(&obs));
                    }
                },
            }
        },

        Commands::Compass { degrees, offset } => {
            let bearing = Bearing::new(degrees).with_offset(offset);
            if json {
                print_json(&serde_json::json!({
                    "degrees": bearing.degrees(),
                    "compassPoint": bearing.compass_point(),
                }))?;
            } else {
                println!("{bearing}");
            }
        },

        Commands::Knots { ms } => {
            let kn = knots(ms);
            let band = WindBand::from_knots(kn);
            if json {
                print_json(&serde_json::json!({
                    "ms": ms,
                    "knots": kn,
                    "band": band.to_string(),
                    "color": band.hex_color(),
                }))?;
            } else {
                println!("{ms:.2} m/s = {kn:.2} kn ({band})");
            }
        },
    }

    Ok(())
}

fn build_service(config: &AppConfig) -> anyhow::Result<ConditionsService> {
    let metocean = MetoceanAdapter::new(config.endpoints.seaspot())?;
    let station = StationAdapter::new(config.endpoints.station(), config.pws.clone())?;
    Ok(ConditionsService::new(Arc::new(metocean)).with_station(Arc::new(station)))
}

fn location_or_default(location: Option<LocationId>, config: &AppConfig) -> LocationId {
    location.unwrap_or_else(|| config.poll.default_location())
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn print_places(places: &[domain::ActivityPlace], json: bool) -> anyhow::Result<()> {
    if json {
        return print_json(places);
    }
    if places.is_empty() {
        println!("No locations found");
    }
    for place in places {
        println!("{}", render::place_line(place));
    }
    Ok(())
}

/// Print every published state until Ctrl-C
async fn watch(
    config: &AppConfig,
    location: LocationId,
    interval: Duration,
    json: bool,
) -> anyhow::Result<()> {
    let service = Arc::new(build_service(config)?);
    let handle = ConditionsPoller::spawn(service, location, DateRange::unbounded(), interval);
    let mut updates = handle.subscribe();

    loop {
        let changed = tokio::select! {
            changed = updates.changed() => changed,
            _ = tokio::signal::ctrl_c() => break,
        };
        if changed.is_err() {
            break;
        }

        let state = updates.borrow_and_update().clone();
        match state {
            PollState::Ready(snapshot) if json => print_json(&snapshot)?,
            PollState::Ready(snapshot) => {
                println!("[{}]", snapshot.fetched_at.format("%Y-%m-%d %H:%M:%S"));
                print!("{}", render::snapshot(&snapshot));
            },
            PollState::Failed(message) => println!("Update failed: {message}"),
            PollState::Loading => {},
        }
    }

    handle.shutdown();
    Ok(())
}
