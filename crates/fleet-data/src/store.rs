//! `FleetStore` — the in-memory vehicle/delivery dataset.

use fleet_core::{DeliveryId, Route, VehicleId};
use tracing::{info, warn};

use crate::{DataError, DataResult, Delivery, Vehicle, VehicleStatus};

#[cfg(not(feature = "fx-hash"))]
type IdMap<K, V> = std::collections::HashMap<K, V>;
#[cfg(feature = "fx-hash")]
type IdMap<K, V> = rustc_hash::FxHashMap<K, V>;

/// Read-only fleet dataset plus a vehicle → route index.
///
/// The index is built once in [`FleetStore::new`]: for every vehicle, the
/// first in-progress delivery (in dataset order) whose route has at least two
/// valid waypoints.  Deliveries with short or malformed routes are skipped,
/// so a later in-progress delivery can still supply the route.
#[derive(Debug, Clone)]
pub struct FleetStore {
    vehicles:      Vec<Vehicle>,
    deliveries:    Vec<Delivery>,
    vehicle_index: IdMap<VehicleId, usize>,
    routes:        IdMap<VehicleId, Route>,
}

impl FleetStore {
    /// Validate ids and references, then build the lookup indexes.
    ///
    /// Fails on duplicate vehicle or delivery ids and on deliveries assigned
    /// to a vehicle that does not exist.
    pub fn new(vehicles: Vec<Vehicle>, deliveries: Vec<Delivery>) -> DataResult<Self> {
        let mut vehicle_index = IdMap::default();
        for (i, v) in vehicles.iter().enumerate() {
            if vehicle_index.insert(v.id, i).is_some() {
                return Err(DataError::DuplicateId { what: "vehicle", id: v.id.get() });
            }
        }

        let mut seen_deliveries: IdMap<DeliveryId, ()> = IdMap::default();
        let mut routes: IdMap<VehicleId, Route> = IdMap::default();

        for d in &deliveries {
            if seen_deliveries.insert(d.id, ()).is_some() {
                return Err(DataError::DuplicateId { what: "delivery", id: d.id.get() });
            }
            let Some(vehicle) = d.vehicle else { continue };
            if !vehicle_index.contains_key(&vehicle) {
                return Err(DataError::UnknownVehicle { delivery: d.id, vehicle });
            }
            if !d.is_in_progress() || routes.contains_key(&vehicle) {
                continue;
            }
            match Route::new(d.route.clone()) {
                Ok(route) => {
                    routes.insert(vehicle, route);
                }
                Err(e) => warn!(delivery = %d.id, %vehicle, "route not simulatable: {e}"),
            }
        }

        info!(
            vehicles   = vehicles.len(),
            deliveries = deliveries.len(),
            routes     = routes.len(),
            "fleet store built"
        );

        Ok(Self { vehicles, deliveries, vehicle_index, routes })
    }

    #[inline]
    pub fn vehicles(&self) -> &[Vehicle] {
        &self.vehicles
    }

    #[inline]
    pub fn deliveries(&self) -> &[Delivery] {
        &self.deliveries
    }

    pub fn vehicle(&self, id: VehicleId) -> Option<&Vehicle> {
        self.vehicle_index.get(&id).map(|&i| &self.vehicles[i])
    }

    pub fn delivery(&self, id: DeliveryId) -> Option<&Delivery> {
        self.deliveries.iter().find(|d| d.id == id)
    }

    /// All deliveries assigned to `vehicle`, in dataset order.
    pub fn deliveries_for(&self, vehicle: VehicleId) -> impl Iterator<Item = &Delivery> {
        self.deliveries
            .iter()
            .filter(move |d| d.vehicle == Some(vehicle))
    }

    /// The first in-progress delivery assigned to `vehicle`, whatever its
    /// route looks like.
    pub fn current_delivery(&self, vehicle: VehicleId) -> Option<&Delivery> {
        self.deliveries_for(vehicle).find(|d| d.is_in_progress())
    }

    /// Indexed route lookup; see [`RouteProvider`][crate::RouteProvider].
    #[inline]
    pub fn route_for(&self, vehicle: VehicleId) -> Option<&Route> {
        self.routes.get(&vehicle)
    }

    /// Vehicles the simulator offers for selection: active, assigned a
    /// current delivery, and with a simulatable route.
    pub fn simulatable_vehicles(&self) -> impl Iterator<Item = &Vehicle> {
        self.vehicles.iter().filter(|v| {
            v.status == VehicleStatus::Active
                && v.current_delivery.is_some()
                && self.routes.contains_key(&v.id)
        })
    }
}
