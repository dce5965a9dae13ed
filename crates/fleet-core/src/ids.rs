//! Strongly typed identifier wrappers.
//!
//! Dataset files carry ids as numeric strings (`"7"`); they are parsed once
//! at load time into these wrappers so the rest of the workspace compares
//! and hashes plain integers.  All IDs are `Copy + Ord + Hash`.

use std::fmt;
use std::str::FromStr;

use crate::FleetError;

/// Generate a typed ID wrapper around a primitive integer.
macro_rules! typed_id {
    ($(#[$attr:meta])* $vis:vis struct $name:ident($inner:ty);) => {
        $(#[$attr])*
        #[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        $vis struct $name(pub $inner);

        impl $name {
            /// The raw numeric value, as written in dataset files.
            #[inline(always)]
            pub fn get(self) -> $inner {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }

        impl From<$inner> for $name {
            #[inline(always)]
            fn from(n: $inner) -> $name {
                $name(n)
            }
        }

        /// Parses the bare number (`"7"`), ignoring surrounding whitespace.
        impl FromStr for $name {
            type Err = FleetError;

            fn from_str(s: &str) -> Result<$name, FleetError> {
                s.trim().parse::<$inner>().map($name).map_err(|e| {
                    FleetError::Parse(format!("{} {:?}: {e}", stringify!($name), s))
                })
            }
        }
    };
}

typed_id! {
    /// Identifier of a vehicle in the fleet.
    pub struct VehicleId(u32);
}

typed_id! {
    /// Identifier of a delivery order.
    pub struct DeliveryId(u32);
}
