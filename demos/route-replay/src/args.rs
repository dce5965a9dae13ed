//! Command-line flags.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::Parser;
use fleet_core::{SpeedMultiplier, VehicleId};

/// Replay fleet delivery routes through the simulation engine.
#[derive(Debug, Parser)]
#[command(name = "route-replay")]
pub struct Args {
    /// Dataset JSON (default: built-in sample).
    #[arg(long, value_name = "PATH")]
    pub data: Option<PathBuf>,

    /// Replay only this vehicle (default: every simulatable one).
    #[arg(long, value_name = "ID", value_parser = parse_vehicle)]
    pub vehicle: Option<VehicleId>,

    /// Speed multiplier, e.g. 0.5, 1, 2, 4.
    #[arg(long, value_name = "N", default_value = "4", value_parser = parse_speed)]
    pub speed: SpeedMultiplier,

    /// Trajectory CSV output path.
    #[arg(long, value_name = "PATH", default_value = "output/route-replay/trajectory.csv")]
    pub out: PathBuf,

    /// Reference date for alerts (default: local system date).
    #[arg(long, value_name = "YYYY-MM-DD", value_parser = parse_date)]
    pub today: Option<NaiveDate>,

    /// Sleep between ticks instead of replaying instantly.
    #[arg(long)]
    pub realtime: bool,
}

fn parse_vehicle(s: &str) -> Result<VehicleId, String> {
    s.parse::<VehicleId>().map_err(|e| e.to_string())
}

fn parse_speed(s: &str) -> Result<SpeedMultiplier, String> {
    let value: f64 = s.parse().map_err(|e| format!("{s:?}: {e}"))?;
    SpeedMultiplier::new(value).map_err(|e| e.to_string())
}

fn parse_date(s: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|e| format!("{s:?}: {e}"))
}
