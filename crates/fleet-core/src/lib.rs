//! `fleet-core` — foundational types for the `fleet_twin` toolkit.
//!
//! This crate is a dependency of every other `fleet-*` crate.  It has no
//! `fleet-*` dependencies and only `thiserror` (plus optional `serde`) from
//! outside.
//!
//! # What lives here
//!
//! | Module        | Contents                                                |
//! |---------------|---------------------------------------------------------|
//! | [`ids`]       | `VehicleId`, `DeliveryId`                               |
//! | [`geo`]       | `GeoPoint`, linear blend, haversine distance            |
//! | [`route`]     | `Route` (≥ 2 waypoints) and [`interpolate`]             |
//! | [`time`]      | `Progress` (fixed-point), `SimConfig`                   |
//! | [`speed`]     | `SpeedMultiplier` and its presets                       |
//! | [`error`]     | `FleetError`, `RouteError`, `FleetResult`               |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod error;
pub mod geo;
pub mod ids;
pub mod route;
pub mod speed;
pub mod time;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use error::{FleetError, FleetResult, RouteError};
pub use geo::GeoPoint;
pub use ids::{DeliveryId, VehicleId};
pub use route::{Route, interpolate};
pub use speed::SpeedMultiplier;
pub use time::{Progress, SimConfig};
