//! Plain data row written by the trajectory sink.

use fleet_sim::PositionEvent;

/// One recorded position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrajectoryRow {
    /// Zero-based emission counter, across all vehicles.
    pub seq:        u64,
    pub vehicle_id: u32,
    pub lat:        f64,
    pub lng:        f64,
    /// Progress fraction in `[0, 1]`; `0` for reset rows.
    pub progress:   f64,
}

impl TrajectoryRow {
    pub const HEADER: [&'static str; 5] = ["seq", "vehicle_id", "lat", "lng", "progress"];

    pub fn from_event(seq: u64, event: &PositionEvent) -> Self {
        Self {
            seq,
            vehicle_id: event.vehicle.get(),
            lat:        event.position.lat,
            lng:        event.position.lng,
            progress:   event.progress.fraction(),
        }
    }
}
