//! Built-in sample fleet: seven vehicles across Spain, five of them on an
//! in-progress delivery with a five-waypoint route.

use crate::{DataResult, FleetStore, load_dataset_str};

/// The sample dataset, as shipped in `data/spain.json`.
pub const SAMPLE_DATASET_JSON: &str = include_str!("../data/spain.json");

/// Parse [`SAMPLE_DATASET_JSON`] into a store.
pub fn sample_store() -> DataResult<FleetStore> {
    load_dataset_str(SAMPLE_DATASET_JSON)
}
