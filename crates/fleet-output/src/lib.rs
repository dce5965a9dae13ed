//! `fleet-output` — trajectory recording for simulated vehicles.
//!
//! [`CsvPositionSink`] is a [`PositionSink`][fleet_sim::PositionSink] that
//! appends one row per emitted position:
//!
//! ```text
//! seq,vehicle_id,lat,lng,progress
//! 0,1,40.41396,-3.70411,0.005
//! ```
//!
//! # Usage
//!
//! ```rust,ignore
//! use fleet_output::CsvPositionSink;
//!
//! let sink = CsvPositionSink::create(Path::new("trajectory.csv"))?;
//! let mut engine = SimulationEngine::new(&store, sink, SimConfig::default())?;
//! // ... drive the engine ...
//! let mut sink = engine.into_sink();
//! sink.finish()?;
//! ```

pub mod csv;
pub mod error;
pub mod row;


pub use csv::CsvPositionSink;
pub use error::{OutputError, OutputResult};
pub use row::TrajectoryRow;
