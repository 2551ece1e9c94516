//! Command-line arguments

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use domain::LocationId;

/// SeaSpot CLI
#[derive(Debug, Parser)]
#[command(name = "seaspot-cli")]
#[command(author, version, about = "SeaSpot metocean conditions CLI", long_about = None)]
pub struct Cli {
    /// Verbosity level
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Print JSON instead of text
    #[arg(long, global = true)]
    pub json: bool,

    /// Configuration file (default: ./seaspot.{toml,yaml,json} if present)
    #[arg(short, long, global = true, env = "SEASPOT_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Current conditions for a location
    Now {
        /// Location id (default: poll.default_location_id)
        #[arg(short, long)]
        location: Option<LocationId>,

        /// First day of the series (YYYY-MM-DD)
        #[arg(long)]
        start: Option<String>,

        /// Last day of the series (YYYY-MM-DD)
        #[arg(long)]
        end: Option<String>,

        /// Also print every series entry
        #[arg(long)]
        series: bool,
    },

    /// Poll a location until interrupted
    Watch {
        /// Location id (default: poll.default_location_id)
        #[arg(short, long)]
        location: Option<LocationId>,

        /// Seconds between polls (default: poll.interval_secs)
        #[arg(short, long)]
        interval: Option<u64>,
    },

    /// Show metadata for a location
    Place {
        /// Location id
        id: LocationId,
    },

    /// List every known location
    Places,

    /// Search locations by name
    Search {
        /// Free-text query
        text: String,
    },

    /// Local weather station readings
    Station {
        #[command(subcommand)]
        command: StationCommands,
    },

    /// Compass point for a direction in degrees
    Compass {
        /// Direction in degrees (any value, normalized into [0, 360))
        #[arg(allow_hyphen_values = true)]
        degrees: f64,

        /// Offset added before naming the point (180 = "blowing toward")
        #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
        offset: f64,
    },

    /// Convert a speed in m/s to knots
    Knots {
        /// Speed in m/s
        ms: f64,
    },
}

#[derive(Debug, Subcommand)]
pub enum StationCommands {
    /// Latest station observation
    Now,

    /// Recent station observations
    History {
        /// Number of observations (default: poll.history_count)
        #[arg(short, long)]
        n: Option<u32>,
    },

    /// Current weather.com PWS observation
    Pws,
}

/// Log filter for a `-v` count; `None` keeps the configured filter
pub const fn log_filter_from_verbosity(verbose: u8) -> Option<&'static str> {
    match verbose {
        0 => None,
        1 => Some("info"),
        2 => Some("debug"),
        _ => Some("trace"),
    }
}
