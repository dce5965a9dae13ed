//! route-replay — drives the route simulation engine over a fleet dataset.
//!
//! Loads the dataset (the built-in Spain sample by default), prints the
//! dashboard header tiles and alerts, then replays every simulatable
//! vehicle's delivery route and records the emitted positions to a
//! trajectory CSV.
//!
//! Logging goes through `tracing`; set `RUST_LOG=fleet_sim=debug` to see
//! phase transitions or `RUST_LOG=trace` for every tick.

mod args;

use std::time::Instant;

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use clap::Parser;
use fleet_core::{SimConfig, VehicleId};
use fleet_data::views::{DashboardSummary, StatusCounts, alerts, maintenance_schedule};
use fleet_data::{FleetStore, load_dataset_json, sample_store};
use fleet_output::CsvPositionSink;
use fleet_sim::{EmitCause, Phase, PositionEvent, PositionSink, SimulationEngine};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use args::Args;

// ── Progress-printing sink ────────────────────────────────────────────────────

/// Forwards to the CSV sink and prints a line at every quarter of the route.
struct ReplaySink {
    csv:        CsvPositionSink,
    next_print: u8,
    events:     usize,
}

impl ReplaySink {
    fn new(csv: CsvPositionSink) -> Self {
        Self { csv, next_print: 25, events: 0 }
    }
}

impl PositionSink for ReplaySink {
    fn on_position(&mut self, event: &PositionEvent) {
        self.events += 1;
        self.csv.on_position(event);

        let pct = event.progress.percent();
        match event.cause {
            EmitCause::Tick if pct >= self.next_print => {
                println!(
                    "  {:>4}%  {:>9.5}, {:>9.5}",
                    pct, event.position.lat, event.position.lng
                );
                self.next_print = pct - pct % 25 + 25;
            }
            EmitCause::Completed => println!(
                "  {:>4}%  {:>9.5}, {:>9.5}  (arrived)",
                100, event.position.lat, event.position.lng
            ),
            EmitCause::Reset => println!(
                "  reset   {:>9.5}, {:>9.5}  (stored location)",
                event.position.lat, event.position.lng
            ),
            EmitCause::Tick => {}
        }
    }

    fn on_phase_change(&mut self, _vehicle: Option<VehicleId>, _from: Phase, to: Phase) {
        if to == Phase::Ready {
            self.next_print = 25;
        }
    }
}

// ── Helpers ───────────────────────────────────────────────────────────────────

/// `--today`, or the local calendar date.
fn reference_date(args: &Args) -> NaiveDate {
    args.today.unwrap_or_else(|| Local::now().date_naive())
}

fn load(args: &Args) -> Result<FleetStore> {
    match &args.data {
        Some(path) => load_dataset_json(path)
            .with_context(|| format!("loading dataset {}", path.display())),
        None => sample_store().context("loading built-in sample dataset"),
    }
}

fn print_dashboard(store: &FleetStore, today: NaiveDate) {
    let summary = DashboardSummary::of(store);
    let counts = StatusCounts::of(store.vehicles());
    println!(
        "Vehicles: {} ({} active, {} maintenance, {} inactive)",
        counts.all, counts.active, counts.maintenance, counts.inactive
    );
    println!(
        "Deliveries: {} ({} in progress, {} pending)",
        summary.total_deliveries, summary.deliveries_in_progress, summary.pending_deliveries
    );
    println!();

    let alerts = alerts(store.vehicles(), today);
    println!("Alerts as of {today}: {}", alerts.len());
    for alert in &alerts {
        println!("  [{}] {}", alert.id, alert.message);
    }
    println!();

    println!("{:<22} {:<12} {:<8}", "Maintenance", "Date", "Soon");
    println!("{}", "-".repeat(44));
    for entry in maintenance_schedule(store.vehicles(), today) {
        println!(
            "{:<22} {:<12} {:<8}",
            entry.vehicle.name,
            entry.vehicle.next_maintenance.to_string(),
            if entry.upcoming { "yes" } else { "no" },
        );
    }
    println!();
}

/// Run the selected vehicle to completion, then reset it.
fn replay<'a, S: PositionSink>(
    engine:   &mut SimulationEngine<'a, FleetStore, S>,
    vehicle:  VehicleId,
    realtime: bool,
) -> Result<usize> {
    let mut now = Instant::now();
    engine.select_vehicle(Some(vehicle));
    engine.start(now)?;

    let mut ticks = 0;
    while engine.phase() == Phase::Running {
        let Some(due) = engine.ticker().next_due() else { break };
        if realtime {
            std::thread::sleep(due.saturating_duration_since(Instant::now()));
            now = Instant::now();
        } else {
            now = due;
        }
        ticks += engine.poll(now);
    }
    engine.reset()?;
    Ok(ticks)
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();

    println!("=== route-replay — fleet route simulation ===");
    println!();

    // 1. Dataset and dashboard.
    let store = load(&args)?;
    let today = reference_date(&args);
    print_dashboard(&store, today);

    // 2. Vehicles to replay.
    let vehicles: Vec<VehicleId> = match args.vehicle {
        Some(v) => {
            if store.route_for(v).is_none() {
                warn!(vehicle = %v, "vehicle has no simulatable route");
            }
            vec![v]
        }
        None => store.simulatable_vehicles().map(|v| v.id).collect(),
    };

    // 3. Output.
    if let Some(dir) = args.out.parent().filter(|d| !d.as_os_str().is_empty()) {
        std::fs::create_dir_all(dir)?;
    }
    let csv = CsvPositionSink::create(&args.out)?;

    // 4. Replay.
    let config = SimConfig::default();
    println!(
        "Replaying {} vehicle(s) at {} ({} ticks of {} ms each)",
        vehicles.len(),
        args.speed,
        config.ticks_to_complete(args.speed),
        config.tick_interval_ms,
    );
    let mut engine = SimulationEngine::new(&store, ReplaySink::new(csv), config)?;
    engine.set_speed_multiplier(args.speed);

    let t0 = Instant::now();
    let mut total_ticks = 0;
    for vehicle in vehicles {
        let name = store.vehicle(vehicle).map_or("?", |v| v.name.as_str());
        let destination = store
            .current_delivery(vehicle)
            .map_or("-", |d| d.destination.as_str());
        println!();
        println!("{vehicle} {name} → {destination}");

        match replay(&mut engine, vehicle, args.realtime) {
            Ok(ticks) => total_ticks += ticks,
            Err(e) => warn!(%vehicle, error = %e, "skipped"),
        }
    }
    let elapsed = t0.elapsed();

    // 5. Summary.
    let mut sink = engine.into_sink();
    sink.csv.finish()?;
    if let Some(e) = sink.csv.take_error() {
        eprintln!("output error: {e}");
    }
    info!(ticks = total_ticks, rows = sink.csv.rows_written(), "replay finished");

    println!();
    println!("Replay complete in {:.3} s", elapsed.as_secs_f64());
    println!("  ticks              : {total_ticks}");
    println!("  positions emitted  : {}", sink.events);
    println!("  {:<18} : {} rows", args.out.display(), sink.csv.rows_written());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn replay_runs_each_vehicle_to_completion() {
        let store = sample_store().unwrap();
        let mut engine =
            SimulationEngine::new(&store, fleet_sim::RecordingSink::default(), SimConfig::default())
                .unwrap();
        engine.set_speed(2.0).unwrap();
        let ticks = replay(&mut engine, VehicleId(4), false).unwrap();
        assert_eq!(ticks, 100);
        assert_eq!(engine.phase(), Phase::Ready);
        assert_eq!(engine.sink().last().unwrap().cause, EmitCause::Reset);
    }

    #[test]
    fn replay_refuses_vehicle_without_route() {
        let store = sample_store().unwrap();
        let mut engine =
            SimulationEngine::new(&store, fleet_sim::NoopSink, SimConfig::default()).unwrap();
        assert!(replay(&mut engine, VehicleId(3), false).is_err());
    }

    #[test]
    fn args_parse_flags() {
        let args = Args::try_parse_from([
            "route-replay", "--vehicle", "2", "--speed", "0.5", "--today", "2023-08-01", "--realtime",
        ])
        .unwrap();
        assert_eq!(args.vehicle, Some(VehicleId(2)));
        assert_eq!(args.speed.get(), 0.5);
        assert_eq!(args.today, NaiveDate::from_ymd_opt(2023, 8, 1));
        assert!(args.realtime);
    }

    #[test]
    fn args_defaults() {
        let args = Args::try_parse_from(["route-replay"]).unwrap();
        assert_eq!(args.speed, fleet_core::SpeedMultiplier::VERY_FAST);
        assert_eq!(args.vehicle, None);
        assert_eq!(args.today, None);
        assert!(!args.realtime);
        assert!(args.out.ends_with("trajectory.csv"));
    }

    #[test]
    fn reference_date_defaults_to_local_today() {
        let args = Args::try_parse_from(["route-replay"]).unwrap();
        let before = Local::now().date_naive();
        let today = reference_date(&args);
        let after = Local::now().date_naive();
        assert!(today == before || today == after);

        let pinned = Args::try_parse_from(["route-replay", "--today", "2023-07-25"]).unwrap();
        assert_eq!(reference_date(&pinned), NaiveDate::from_ymd_opt(2023, 7, 25).unwrap());
    }

    #[test]
    fn args_reject_bad_values() {
        assert!(Args::try_parse_from(["route-replay", "--speed", "0"]).is_err());
        assert!(Args::try_parse_from(["route-replay", "--vehicle", "x"]).is_err());
        assert!(Args::try_parse_from(["route-replay", "--today", "01/08/2023"]).is_err());
        assert!(Args::try_parse_from(["route-replay", "--bogus"]).is_err());
    }
}
