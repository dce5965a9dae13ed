//! `fleet-data` — the read-only vehicle/delivery dataset and everything
//! derived from it.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                        |
//! |--------------|-----------------------------------------------------------------|
//! | [`model`]    | `Vehicle`, `Delivery` and their status / kind enums             |
//! | [`store`]    | `FleetStore` — vehicles, deliveries, vehicle → route index      |
//! | [`provider`] | `RouteProvider`, `PositionSource` — the simulation's data seams |
//! | [`loader`]   | JSON dataset loading                                            |
//! | [`sample`]   | Built-in sample fleet (seven vehicles across Spain)             |
//! | [`views`]    | Status counts, filters, search, alerts, maintenance, stats      |
//! | [`error`]    | `DataError`, `DataResult<T>`                                    |
//!
//! Everything here is side-effect free once a `FleetStore` is built; the
//! simulation engine borrows the store for the length of a session.

pub mod error;
pub mod loader;
pub mod model;
pub mod provider;
pub mod sample;
pub mod store;
pub mod views;


pub use error::{DataError, DataResult};
pub use loader::{load_dataset_json, load_dataset_reader, load_dataset_str};
pub use model::{Delivery, DeliveryItem, DeliveryStatus, Vehicle, VehicleKind, VehicleStatus};
pub use provider::{PositionSource, RouteProvider};
pub use sample::sample_store;
pub use store::FleetStore;
