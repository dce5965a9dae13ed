//! Framework error types.
//!
//! Sub-crates define their own error enums and wrap `FleetError` (or one of
//! its parts) as a variant via `#[from]`.

use thiserror::Error;

/// Reasons a waypoint sequence cannot be used as a [`Route`][crate::Route].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RouteError {
    #[error("a route needs at least 2 waypoints, got {0}")]
    TooFewWaypoints(usize),

    #[error("waypoint {index} has a non-finite coordinate")]
    NonFinite { index: usize },
}

/// The top-level error type for `fleet-core` and a common base for sub-crates.
#[derive(Debug, Error)]
pub enum FleetError {
    #[error("invalid route: {0}")]
    Route(#[from] RouteError),

    #[error("speed multiplier must be finite and >= 0.001, got {0}")]
    InvalidSpeed(f64),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("parse error: {0}")]
    Parse(String),
}

/// Shorthand result type for all `fleet-*` crates.
pub type FleetResult<T> = Result<T, FleetError>;
