use fleet_core::{FleetError, VehicleId};
use thiserror::Error;

use crate::Phase;

/// Rejected commands.  None of these is fatal: the engine state is left
/// exactly as it was before the call.
#[derive(Debug, Error)]
pub enum SimError {
    #[error("speed multiplier must be finite and > 0, got {0}")]
    InvalidSpeed(f64),

    #[error("cannot {command} while {phase}")]
    InvalidCommand {
        command: &'static str,
        phase:   Phase,
    },

    #[error("vehicle {0} has no route to simulate")]
    NoRouteAvailable(VehicleId),

    #[error("simulation configuration error: {0}")]
    Config(#[from] FleetError),

    #[error("command parse error: {0}")]
    Parse(String),
}

pub type SimResult<T> = Result<T, SimError>;
