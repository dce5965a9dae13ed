//! Vehicle and delivery records.

use std::fmt;
use std::str::FromStr;

use chrono::{NaiveDate, NaiveDateTime};
use fleet_core::{DeliveryId, FleetError, GeoPoint, VehicleId};
use serde::{Deserialize, Serialize};

/// Generate `as_str`, `Display` and `FromStr` for a fieldless enum from a
/// single table of wire names.
macro_rules! wire_enum {
    ($name:ident { $($variant:ident => $text:literal),+ $(,)? }) => {
        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn as_str(self) -> &'static str {
                match self {
                    $($name::$variant => $text),+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = FleetError;

            fn from_str(s: &str) -> Result<Self, FleetError> {
                match s.trim() {
                    $($text => Ok($name::$variant),)+
                    other => Err(FleetError::Parse(format!(
                        "unknown {} {:?}", stringify!($name), other
                    ))),
                }
            }
        }
    };
}

// ── Enums ─────────────────────────────────────────────────────────────────────

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VehicleKind {
    Truck,
    Van,
    Car,
}

wire_enum!(VehicleKind { Truck => "truck", Van => "van", Car => "car" });

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VehicleStatus {
    Active,
    Maintenance,
    Inactive,
}

wire_enum!(VehicleStatus {
    Active      => "active",
    Maintenance => "maintenance",
    Inactive    => "inactive",
});

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DeliveryStatus {
    Pending,
    InProgress,
    Completed,
    Delayed,
}

wire_enum!(DeliveryStatus {
    Pending    => "pending",
    InProgress => "in-progress",
    Completed  => "completed",
    Delayed    => "delayed",
});

// ── Records ───────────────────────────────────────────────────────────────────

/// One fleet vehicle.
#[derive(Clone, Debug, PartialEq)]
pub struct Vehicle {
    pub id:               VehicleId,
    pub name:             String,
    pub kind:             VehicleKind,
    pub status:           VehicleStatus,
    /// Last reported (static) location.  The simulation restores markers to
    /// this point on reset.
    pub location:         GeoPoint,
    pub driver:           String,
    /// Fuel level in percent, `0..=100`.
    pub fuel_level:       u8,
    pub next_maintenance: NaiveDate,
    pub current_delivery: Option<DeliveryId>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeliveryItem {
    pub name:     String,
    pub quantity: u32,
}

/// One delivery order, optionally assigned to a vehicle.
#[derive(Clone, Debug, PartialEq)]
pub struct Delivery {
    pub id:                DeliveryId,
    pub vehicle:           Option<VehicleId>,
    pub status:            DeliveryStatus,
    pub destination:       String,
    pub customer:          String,
    pub estimated_arrival: Option<NaiveDateTime>,
    pub items:             Vec<DeliveryItem>,
    /// Raw waypoints as recorded; may be empty or a single point.  Only
    /// routes with two or more points are offered for simulation.
    pub route:             Vec<GeoPoint>,
}

impl Delivery {
    #[inline]
    pub fn is_in_progress(&self) -> bool {
        self.status == DeliveryStatus::InProgress
    }

    /// Total item quantity carried.
    pub fn item_count(&self) -> u32 {
        self.items.iter().map(|i| i.quantity).sum()
    }
}
