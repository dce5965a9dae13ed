//! JSON dataset loader.
//!
//! # Format
//!
//! ```json
//! {
//!   "vehicles": [
//!     { "id": "1", "name": "Truck Madrid-01", "type": "truck", "status": "active",
//!       "driver": "Carlos Rodríguez", "fuelLevel": 85,
//!       "location": { "lat": 40.4168, "lng": -3.7038 },
//!       "nextMaintenance": "2023-09-15", "currentDelivery": "1" }
//!   ],
//!   "deliveries": [
//!     { "id": "1", "vehicleId": "1", "status": "in-progress",
//!       "destination": "Toledo", "customer": "Supermercados Toledo S.A.",
//!       "estimatedArrival": "2023-07-25T14:30:00",
//!       "items": [ { "name": "Groceries", "quantity": 120 } ],
//!       "route": [[40.4168, -3.7038], [39.8628, -4.0273]] }
//!   ]
//! }
//! ```
//!
//! Ids may be numeric strings or bare integers.  `route` may be `null` or
//! omitted.  Any other field (e.g. a redundant `position` array) is ignored.

use std::io::Read;
use std::path::Path;

use chrono::{NaiveDate, NaiveDateTime};
use fleet_core::{DeliveryId, GeoPoint, VehicleId};
use serde::Deserialize;
use tracing::info;

use crate::{
    DataError, DataResult, Delivery, DeliveryItem, DeliveryStatus, FleetStore, Vehicle,
    VehicleKind, VehicleStatus,
};

// ── JSON records ──────────────────────────────────────────────────────────────

#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Number(u32),
    Text(String),
}

impl RawId {
    fn parse<T: std::str::FromStr<Err = fleet_core::FleetError> + From<u32>>(
        self,
    ) -> DataResult<T> {
        match self {
            RawId::Number(n) => Ok(T::from(n)),
            RawId::Text(s) => s.parse().map_err(|e: fleet_core::FleetError| {
                DataError::Parse(e.to_string())
            }),
        }
    }
}

#[derive(Deserialize)]
struct DatasetRecord {
    vehicles:   Vec<VehicleRecord>,
    #[serde(default)]
    deliveries: Vec<DeliveryRecord>,
}

#[derive(Deserialize)]
struct LocationRecord {
    lat: f64,
    lng: f64,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct VehicleRecord {
    id:               RawId,
    name:             String,
    #[serde(rename = "type")]
    kind:             VehicleKind,
    status:           VehicleStatus,
    location:         LocationRecord,
    driver:           String,
    fuel_level:       u8,
    next_maintenance: NaiveDate,
    #[serde(default)]
    current_delivery: Option<RawId>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct DeliveryRecord {
    id:                RawId,
    #[serde(default)]
    vehicle_id:        Option<RawId>,
    status:            DeliveryStatus,
    destination:       String,
    customer:          String,
    #[serde(default)]
    estimated_arrival: Option<NaiveDateTime>,
    #[serde(default)]
    items:             Vec<DeliveryItem>,
    #[serde(default)]
    route:             Option<Vec<[f64; 2]>>,
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Load a [`FleetStore`] from a JSON file.
pub fn load_dataset_json(path: &Path) -> DataResult<FleetStore> {
    let file = std::fs::File::open(path)?;
    let store = load_dataset_reader(std::io::BufReader::new(file))?;
    info!(path = %path.display(), "dataset loaded");
    Ok(store)
}

/// Like [`load_dataset_json`] but accepts any `Read` source.
pub fn load_dataset_reader<R: Read>(reader: R) -> DataResult<FleetStore> {
    let record: DatasetRecord = serde_json::from_reader(reader)?;
    build_store(record)
}

/// Like [`load_dataset_json`] but parses an in-memory document.
pub fn load_dataset_str(json: &str) -> DataResult<FleetStore> {
    let record: DatasetRecord = serde_json::from_str(json)?;
    build_store(record)
}

// ── Helpers ───────────────────────────────────────────────────────────────────

fn build_store(record: DatasetRecord) -> DataResult<FleetStore> {
    let vehicles = record
        .vehicles
        .into_iter()
        .map(convert_vehicle)
        .collect::<DataResult<Vec<_>>>()?;
    let deliveries = record
        .deliveries
        .into_iter()
        .map(convert_delivery)
        .collect::<DataResult<Vec<_>>>()?;
    FleetStore::new(vehicles, deliveries)
}

fn convert_vehicle(r: VehicleRecord) -> DataResult<Vehicle> {
    let id: VehicleId = r.id.parse()?;
    if r.fuel_level > 100 {
        return Err(DataError::Parse(format!(
            "vehicle {id}: fuel level {} exceeds 100",
            r.fuel_level
        )));
    }
    Ok(Vehicle {
        id,
        name:             r.name,
        kind:             r.kind,
        status:           r.status,
        location:         GeoPoint::new(r.location.lat, r.location.lng),
        driver:           r.driver,
        fuel_level:       r.fuel_level,
        next_maintenance: r.next_maintenance,
        current_delivery: r.current_delivery.map(RawId::parse::<DeliveryId>).transpose()?,
    })
}

fn convert_delivery(r: DeliveryRecord) -> DataResult<Delivery> {
    Ok(Delivery {
        id:                r.id.parse()?,
        vehicle:           r.vehicle_id.map(RawId::parse::<VehicleId>).transpose()?,
        status:            r.status,
        destination:       r.destination,
        customer:          r.customer,
        estimated_arrival: r.estimated_arrival,
        items:             r.items,
        route:             r
            .route
            .unwrap_or_default()
            .into_iter()
            .map(GeoPoint::from)
            .collect(),
    })
}
