use fleet_core::{DeliveryId, VehicleId};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DataError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("dataset JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("dataset parse error: {0}")]
    Parse(String),

    #[error("delivery {delivery} references unknown vehicle {vehicle}")]
    UnknownVehicle {
        delivery: DeliveryId,
        vehicle:  VehicleId,
    },

    #[error("duplicate {what} id {id}")]
    DuplicateId {
        what: &'static str,
        id:   u32,
    },
}

pub type DataResult<T> = Result<T, DataError>;
