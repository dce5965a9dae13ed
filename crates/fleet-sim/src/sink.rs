//! Position sink trait — where simulated positions go.

use fleet_core::{GeoPoint, Progress, VehicleId};

use crate::Phase;

/// Why a [`PositionEvent`] was emitted.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum EmitCause {
    /// A regular tick while running.
    Tick,
    /// The tick that reached the end of the route; the position is the last
    /// waypoint.
    Completed,
    /// `reset()`; the position is the vehicle's stored location, not a
    /// point on the route.
    Reset,
}

impl EmitCause {
    pub fn as_str(self) -> &'static str {
        match self {
            EmitCause::Tick      => "tick",
            EmitCause::Completed => "completed",
            EmitCause::Reset     => "reset",
        }
    }
}

/// A vehicle position published by the engine.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PositionEvent {
    pub vehicle:  VehicleId,
    pub position: GeoPoint,
    /// Simulation progress at emission (zero for resets).
    pub progress: Progress,
    pub cause:    EmitCause,
}

/// Receives positions from a [`SimulationEngine`][crate::SimulationEngine].
///
/// The sink is handed to the engine at construction and lives exactly as long
/// as the engine.  It is called synchronously, at most once per tick, once
/// per reset and once on completion.
///
/// # Example — map marker store
///
/// ```rust,ignore
/// struct Markers(HashMap<VehicleId, GeoPoint>);
///
/// impl PositionSink for Markers {
///     fn on_position(&mut self, e: &PositionEvent) {
///         self.0.insert(e.vehicle, e.position);
///     }
/// }
/// ```
pub trait PositionSink {
    fn on_position(&mut self, event: &PositionEvent);

    /// Called after every phase transition.  Default: no-op.
    fn on_phase_change(&mut self, _vehicle: Option<VehicleId>, _from: Phase, _to: Phase) {}
}

impl<S: PositionSink + ?Sized> PositionSink for &mut S {
    fn on_position(&mut self, event: &PositionEvent) {
        (**self).on_position(event);
    }

    fn on_phase_change(&mut self, vehicle: Option<VehicleId>, from: Phase, to: Phase) {
        (**self).on_phase_change(vehicle, from, to);
    }
}

impl<S: PositionSink + ?Sized> PositionSink for Box<S> {
    fn on_position(&mut self, event: &PositionEvent) {
        (**self).on_position(event);
    }

    fn on_phase_change(&mut self, vehicle: Option<VehicleId>, from: Phase, to: Phase) {
        (**self).on_phase_change(vehicle, from, to);
    }
}

/// A [`PositionSink`] that does nothing.
pub struct NoopSink;

impl PositionSink for NoopSink {
    fn on_position(&mut self, _event: &PositionEvent) {}
}

/// Adapts a closure into a [`PositionSink`].
pub struct FnSink<F>(pub F);

impl<F: FnMut(&PositionEvent)> PositionSink for FnSink<F> {
    fn on_position(&mut self, event: &PositionEvent) {
        (self.0)(event);
    }
}

/// Keeps every event and phase transition in memory.
#[derive(Debug, Default, Clone)]
pub struct RecordingSink {
    pub events:      Vec<PositionEvent>,
    pub transitions: Vec<(Phase, Phase)>,
}

impl RecordingSink {
    pub fn last(&self) -> Option<&PositionEvent> {
        self.events.last()
    }

    /// Events emitted for `vehicle`, in order.
    pub fn events_for(&self, vehicle: VehicleId) -> impl Iterator<Item = &PositionEvent> {
        self.events.iter().filter(move |e| e.vehicle == vehicle)
    }

    pub fn clear(&mut self) {
        self.events.clear();
        self.transitions.clear();
    }
}

impl PositionSink for RecordingSink {
    fn on_position(&mut self, event: &PositionEvent) {
        self.events.push(*event);
    }

    fn on_phase_change(&mut self, _vehicle: Option<VehicleId>, from: Phase, to: Phase) {
        self.transitions.push((from, to));
    }
}
