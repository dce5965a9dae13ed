//! Derived dashboard data: counters, filters, search, alerts, maintenance
//! ordering and chart series.
//!
//! Every function here is a pure projection over borrowed vehicles or a
//! [`FleetStore`]; nothing is cached.  Functions that depend on the
//! calendar take `today` explicitly.

use std::collections::BTreeMap;

use chrono::{Days, NaiveDate};
use fleet_core::{GeoPoint, VehicleId};

use crate::{DeliveryStatus, FleetStore, Vehicle, VehicleKind, VehicleStatus};

/// Fallback map centre (Madrid) for an empty fleet.
pub const DEFAULT_CENTER: GeoPoint = GeoPoint::new(40.4167, -3.7033);

/// Fuel percentage below which a vehicle raises a low-fuel alert.
pub const LOW_FUEL_THRESHOLD: u8 = 30;

/// Maintenance due within this many days raises an alert.
pub const MAINTENANCE_ALERT_DAYS: i64 = 3;

/// Maintenance due before `today + UPCOMING_MAINTENANCE_DAYS` is "upcoming".
pub const UPCOMING_MAINTENANCE_DAYS: u64 = 7;

// ── Status counts & filtering ─────────────────────────────────────────────────

/// Per-status vehicle counters shown on the filter buttons and stat tiles.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct StatusCounts {
    pub all:         usize,
    pub active:      usize,
    pub maintenance: usize,
    pub inactive:    usize,
}

impl StatusCounts {
    pub fn of(vehicles: &[Vehicle]) -> Self {
        vehicles.iter().fold(Self::default(), |mut c, v| {
            c.all += 1;
            match v.status {
                VehicleStatus::Active      => c.active += 1,
                VehicleStatus::Maintenance => c.maintenance += 1,
                VehicleStatus::Inactive    => c.inactive += 1,
            }
            c
        })
    }

    pub fn get(&self, status: VehicleStatus) -> usize {
        match status {
            VehicleStatus::Active      => self.active,
            VehicleStatus::Maintenance => self.maintenance,
            VehicleStatus::Inactive    => self.inactive,
        }
    }

    /// Badge count on the notification bell.
    #[inline]
    pub fn needs_attention(&self) -> usize {
        self.maintenance + self.inactive
    }
}

/// Keep vehicles with `status`; `None` keeps everything.
pub fn filter_by_status<'a>(
    vehicles: impl IntoIterator<Item = &'a Vehicle>,
    status:   Option<VehicleStatus>,
) -> Vec<&'a Vehicle> {
    vehicles
        .into_iter()
        .filter(|v| status.is_none_or(|s| v.status == s))
        .collect()
}

/// Case-insensitive substring search over name, driver and vehicle type.
///
/// A blank `term` matches every vehicle; otherwise the term is matched as
/// typed, surrounding whitespace included.
pub fn search<'a>(vehicles: &'a [Vehicle], term: &str) -> Vec<&'a Vehicle> {
    if term.trim().is_empty() {
        return vehicles.iter().collect();
    }
    let term = term.to_lowercase();
    vehicles
        .iter()
        .filter(|v| {
            v.name.to_lowercase().contains(&term)
                || v.driver.to_lowercase().contains(&term)
                || v.kind.as_str().contains(&term)
        })
        .collect()
}

// ── Alerts ────────────────────────────────────────────────────────────────────

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum AlertKind {
    LowFuel { level: u8 },
    /// `days` until the scheduled date; zero or negative means due/overdue.
    MaintenanceDue { days: i64 },
    Inactive,
}

impl AlertKind {
    fn tag(self) -> &'static str {
        match self {
            AlertKind::LowFuel { .. }        => "fuel",
            AlertKind::MaintenanceDue { .. } => "maintenance",
            AlertKind::Inactive              => "inactive",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Alert {
    /// `"<kind>-<vehicle>"`, e.g. `"fuel-3"`.  Unique per vehicle and kind.
    pub id:      String,
    pub kind:    AlertKind,
    pub vehicle: VehicleId,
    pub message: String,
}

/// Alerts for every vehicle, in vehicle order; per vehicle: low fuel, then
/// maintenance, then inactive.
pub fn alerts(vehicles: &[Vehicle], today: NaiveDate) -> Vec<Alert> {
    let mut out = Vec::new();
    for v in vehicles {
        let mut push = |kind: AlertKind, message: String| {
            out.push(Alert {
                id: format!("{}-{}", kind.tag(), v.id.get()),
                kind,
                vehicle: v.id,
                message,
            });
        };

        if v.fuel_level < LOW_FUEL_THRESHOLD {
            push(
                AlertKind::LowFuel { level: v.fuel_level },
                format!("Low fuel level ({}%)", v.fuel_level),
            );
        }

        let days = days_until(today, v.next_maintenance);
        if days <= MAINTENANCE_ALERT_DAYS {
            push(
                AlertKind::MaintenanceDue { days },
                format!("Maintenance scheduled in {days} day(s)"),
            );
        }

        if v.status == VehicleStatus::Inactive {
            push(AlertKind::Inactive, "Vehicle inactive".to_owned());
        }
    }
    out
}

#[inline]
fn days_until(today: NaiveDate, date: NaiveDate) -> i64 {
    date.signed_duration_since(today).num_days()
}

// ── Maintenance schedule ──────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct MaintenanceEntry<'a> {
    pub vehicle:  &'a Vehicle,
    /// Due before `today + 7 days` (includes overdue).
    pub upcoming: bool,
}

/// Vehicles ordered by next maintenance date (stable for equal dates).
pub fn maintenance_schedule(vehicles: &[Vehicle], today: NaiveDate) -> Vec<MaintenanceEntry<'_>> {
    let horizon = today
        .checked_add_days(Days::new(UPCOMING_MAINTENANCE_DAYS))
        .unwrap_or(NaiveDate::MAX);
    let mut entries: Vec<_> = vehicles
        .iter()
        .map(|vehicle| MaintenanceEntry {
            vehicle,
            upcoming: vehicle.next_maintenance < horizon,
        })
        .collect();
    entries.sort_by_key(|e| e.vehicle.next_maintenance);
    entries
}

// ── Statistics ────────────────────────────────────────────────────────────────

/// Series behind the statistics charts.
#[derive(Clone, Debug, PartialEq)]
pub struct FleetStats {
    /// `(vehicle, fuel %)` in vehicle order.
    pub fuel:      Vec<(VehicleId, u8)>,
    pub by_kind:   BTreeMap<VehicleKind, usize>,
    pub by_status: StatusCounts,
}

impl FleetStats {
    pub fn of(vehicles: &[Vehicle]) -> Self {
        let mut by_kind = BTreeMap::new();
        for v in vehicles {
            *by_kind.entry(v.kind).or_insert(0) += 1;
        }
        Self {
            fuel: vehicles.iter().map(|v| (v.id, v.fuel_level)).collect(),
            by_kind,
            by_status: StatusCounts::of(vehicles),
        }
    }

    /// Mean fuel level, or `None` for an empty fleet.
    pub fn mean_fuel(&self) -> Option<f64> {
        if self.fuel.is_empty() {
            return None;
        }
        let total: u32 = self.fuel.iter().map(|&(_, f)| f as u32).sum();
        Some(total as f64 / self.fuel.len() as f64)
    }
}

/// Header tiles: fleet and delivery activity at a glance.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct DashboardSummary {
    pub active_vehicles:        usize,
    pub vehicles_in_maintenance: usize,
    pub deliveries_in_progress: usize,
    pub pending_deliveries:     usize,
    pub total_deliveries:       usize,
}

impl DashboardSummary {
    pub fn of(store: &FleetStore) -> Self {
        let counts = StatusCounts::of(store.vehicles());
        let deliveries = store.deliveries();
        let with_status =
            |s: DeliveryStatus| deliveries.iter().filter(|d| d.status == s).count();
        Self {
            active_vehicles:         counts.active,
            vehicles_in_maintenance: counts.maintenance,
            deliveries_in_progress:  with_status(DeliveryStatus::InProgress),
            pending_deliveries:      with_status(DeliveryStatus::Pending),
            total_deliveries:        deliveries.len(),
        }
    }
}

// ── Map helpers ───────────────────────────────────────────────────────────────

/// Mean of all vehicle locations; [`DEFAULT_CENTER`] for an empty slice.
pub fn map_center(vehicles: &[Vehicle]) -> GeoPoint {
    if vehicles.is_empty() {
        return DEFAULT_CENTER;
    }
    let n = vehicles.len() as f64;
    let (lat, lng) = vehicles
        .iter()
        .fold((0.0, 0.0), |(lat, lng), v| (lat + v.location.lat, lng + v.location.lng));
    GeoPoint::new(lat / n, lng / n)
}

/// Polylines to draw for `vehicle`: the non-empty routes of each of its
/// in-progress deliveries.
pub fn active_routes(store: &FleetStore, vehicle: VehicleId) -> Vec<&[GeoPoint]> {
    store
        .deliveries_for(vehicle)
        .filter(|d| d.is_in_progress() && !d.route.is_empty())
        .map(|d| d.route.as_slice())
        .collect()
}
