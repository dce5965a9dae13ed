//! `fleet-sim` — animates one vehicle along its delivery route.
//!
//! # Tick model
//!
//! ```text
//! host loop ──poll(now)──▶ Ticker ──firing(gen)──▶ SimulationEngine::fire
//!                                                    │ gen stale?  → dropped
//!                                                    │ not Running → ignored
//!                                                    ▼
//!                               progress += base_step · speed   (fixed-point)
//!                               position  = route.at(progress)
//!                                                    ▼
//!                                        PositionSink::on_position
//! ```
//!
//! Everything runs on the caller's thread.  The engine never sleeps; the host
//! decides when to call [`SimulationEngine::poll`] (the demo sleeps until
//! [`Ticker::next_due`]).  Every transition that leaves `Running` cancels the
//! ticker before touching state, and each arming gets a fresh generation, so
//! a firing obtained before a selection change can never move the newly
//! selected vehicle.
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use std::time::Instant;
//! use fleet_core::{SimConfig, VehicleId};
//! use fleet_sim::{RecordingSink, SimulationEngine};
//!
//! let store = fleet_data::sample_store()?;
//! let mut engine = SimulationEngine::new(&store, RecordingSink::default(), SimConfig::default())?;
//! engine.select_vehicle(Some(VehicleId(1)));
//! engine.set_speed(4.0)?;
//! engine.start(Instant::now())?;
//! loop {
//!     engine.poll(Instant::now());
//!     if !engine.is_running() { break; }
//! }
//! ```

pub mod command;
pub mod engine;
pub mod error;
pub mod sink;
pub mod ticker;


pub use command::Command;
pub use engine::{Phase, SimulationEngine, SimulationState};
pub use error::{SimError, SimResult};
pub use sink::{EmitCause, FnSink, NoopSink, PositionEvent, PositionSink, RecordingSink};
pub use ticker::{Ticker, TickerFiring};
