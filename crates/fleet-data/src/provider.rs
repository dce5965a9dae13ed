//! Data seams consumed by the simulation engine.
//!
//! The engine never sees a `FleetStore` directly; it asks for a route and
//! for a vehicle's stored location through these two traits.  Tests plug in
//! small hand-built providers.

use fleet_core::{GeoPoint, Route, VehicleId};

use crate::FleetStore;

/// Vehicle → active delivery route lookup.
///
/// Implementations must be pure: repeated calls with the same id return the
/// same answer for as long as the provider is borrowed.
pub trait RouteProvider {
    /// The route of `vehicle`'s in-progress delivery, or `None` if it has
    /// none, the route is too short, or the vehicle is unknown.
    fn route(&self, vehicle: VehicleId) -> Option<&Route>;
}

/// Vehicle → literal stored location lookup.
pub trait PositionSource {
    /// `None` for unknown vehicles.
    fn original_position(&self, vehicle: VehicleId) -> Option<GeoPoint>;
}

impl RouteProvider for FleetStore {
    fn route(&self, vehicle: VehicleId) -> Option<&Route> {
        self.route_for(vehicle)
    }
}

impl PositionSource for FleetStore {
    fn original_position(&self, vehicle: VehicleId) -> Option<GeoPoint> {
        self.vehicle(vehicle).map(|v| v.location)
    }
}
