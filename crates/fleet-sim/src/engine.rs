//! The `SimulationEngine` state machine.

use std::fmt;
use std::time::Instant;

use fleet_core::{GeoPoint, Progress, Route, SimConfig, SpeedMultiplier, VehicleId};
use fleet_data::{PositionSource, RouteProvider};
use tracing::{debug, info, trace, warn};

use crate::{Command, EmitCause, PositionEvent, PositionSink, SimError, SimResult, Ticker, TickerFiring};

// ── Phase ─────────────────────────────────────────────────────────────────────

/// Lifecycle of the (single) simulation.
///
/// ```text
///            select(Some)              start               tick ≥ 1
///   Idle ───────────────▶ Ready ──────────────▶ Running ─────────────▶ Completed
///     ▲                    ▲  ▲                  │   ▲                    │
///     │ select(None)       │  └──── reset ───────┤   │ start              │
///     └── (any) ───────────┘                     ▼   │                    │
///                          └──── reset ────── Paused ┘                    │
///                          └──────────────────── reset ───────────────────┘
/// ```
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Phase {
    /// No vehicle selected.
    Idle,
    /// Vehicle selected, progress 0, not running.
    Ready,
    Running,
    /// Progress frozen mid-route.
    Paused,
    /// Progress is exactly 1.0.
    Completed,
}

impl Phase {
    pub fn as_str(self) -> &'static str {
        match self {
            Phase::Idle      => "idle",
            Phase::Ready     => "ready",
            Phase::Running   => "running",
            Phase::Paused    => "paused",
            Phase::Completed => "completed",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── SimulationState ───────────────────────────────────────────────────────────

/// Read-only snapshot for the control surface.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SimulationState {
    pub vehicle:   Option<VehicleId>,
    pub progress:  Progress,
    pub running:   bool,
    pub speed:     SpeedMultiplier,
    pub phase:     Phase,
    /// `false` when the selected vehicle has nothing to simulate; the play
    /// button should be disabled.
    pub has_route: bool,
}

// ── SimulationEngine ──────────────────────────────────────────────────────────

/// Drives one vehicle at a time along its delivery route.
///
/// Borrows the dataset (`P`) for the whole session and owns its sink (`S`)
/// and [`Ticker`].  All methods are synchronous; ticks happen only inside
/// [`poll`][Self::poll] / [`fire`][Self::fire] / [`tick`][Self::tick].
pub struct SimulationEngine<'a, P, S>
where
    P: RouteProvider + PositionSource,
    S: PositionSink,
{
    provider: &'a P,
    sink:     S,
    config:   SimConfig,
    ticker:   Ticker,
    selected: Option<VehicleId>,
    route:    Option<&'a Route>,
    progress: Progress,
    speed:    SpeedMultiplier,
    phase:    Phase,
}

impl<'a, P, S> SimulationEngine<'a, P, S>
where
    P: RouteProvider + PositionSource,
    S: PositionSink,
{
    /// Create an idle engine.  Fails if `config` does not validate.
    pub fn new(provider: &'a P, sink: S, config: SimConfig) -> SimResult<Self> {
        config.validate()?;
        let ticker = Ticker::new(config.tick_interval());
        Ok(Self {
            provider,
            sink,
            config,
            ticker,
            selected: None,
            route:    None,
            progress: Progress::ZERO,
            speed:    SpeedMultiplier::NORMAL,
            phase:    Phase::Idle,
        })
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    #[inline]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    #[inline]
    pub fn progress(&self) -> Progress {
        self.progress
    }

    #[inline]
    pub fn speed(&self) -> SpeedMultiplier {
        self.speed
    }

    #[inline]
    pub fn selected(&self) -> Option<VehicleId> {
        self.selected
    }

    /// The selected vehicle's route, if it has one.
    #[inline]
    pub fn route(&self) -> Option<&'a Route> {
        self.route
    }

    #[inline]
    pub fn has_route(&self) -> bool {
        self.route.is_some()
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.phase == Phase::Running
    }

    #[inline]
    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    #[inline]
    pub fn ticker(&self) -> &Ticker {
        &self.ticker
    }

    #[inline]
    pub fn sink(&self) -> &S {
        &self.sink
    }

    #[inline]
    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    /// Interpolated position at the current progress, if a route is loaded.
    pub fn current_position(&self) -> Option<GeoPoint> {
        self.route.map(|r| r.at(self.progress.fraction()))
    }

    pub fn snapshot(&self) -> SimulationState {
        SimulationState {
            vehicle:   self.selected,
            progress:  self.progress,
            running:   self.is_running(),
            speed:     self.speed,
            phase:     self.phase,
            has_route: self.has_route(),
        }
    }

    // ── Commands ──────────────────────────────────────────────────────────

    /// Select `vehicle` (or clear the selection with `None`).
    ///
    /// Always cancels the ticker first and resets progress to zero.  A vehicle
    /// without a simulatable route is still selected, but `start` will be
    /// refused.  Returns whether a route is available.
    pub fn select_vehicle(&mut self, vehicle: Option<VehicleId>) -> bool {
        self.ticker.cancel();
        self.progress = Progress::ZERO;
        self.selected = vehicle;
        let provider = self.provider;
        self.route = vehicle.and_then(|v| provider.route(v));

        match vehicle {
            None => {
                debug!("selection cleared");
                self.set_phase(Phase::Idle);
            }
            Some(v) => {
                match self.route {
                    Some(r) => debug!(vehicle = %v, waypoints = r.len(), "vehicle selected"),
                    None    => debug!(vehicle = %v, "vehicle selected, no route available"),
                }
                self.set_phase(Phase::Ready);
            }
        }
        self.route.is_some()
    }

    /// Begin or resume advancing.  Valid from `Ready` or `Paused` with a
    /// route; the first tick is due one interval after `now`.
    pub fn start(&mut self, now: Instant) -> SimResult<()> {
        match self.phase {
            Phase::Ready | Phase::Paused => {}
            phase => return Err(self.reject("start", phase)),
        }
        if self.route.is_none() {
            let vehicle = self.selected.ok_or(SimError::InvalidCommand {
                command: "start",
                phase:   self.phase,
            })?;
            debug!(%vehicle, "start rejected: no route");
            return Err(SimError::NoRouteAvailable(vehicle));
        }
        self.ticker.arm(now);
        self.set_phase(Phase::Running);
        Ok(())
    }

    /// Freeze progress.  Valid only while `Running`.
    pub fn pause(&mut self) -> SimResult<()> {
        if self.phase != Phase::Running {
            return Err(self.reject("pause", self.phase));
        }
        self.ticker.cancel();
        self.set_phase(Phase::Paused);
        Ok(())
    }

    /// `start` when not running, `pause` when running (the play/pause button).
    pub fn toggle(&mut self, now: Instant) -> SimResult<()> {
        if self.is_running() { self.pause() } else { self.start(now) }
    }

    /// Rewind to progress 0 and put the marker back on the vehicle's stored
    /// location.  Valid in any phase once a vehicle is selected; calling it
    /// repeatedly emits the same position each time.
    pub fn reset(&mut self) -> SimResult<()> {
        let Some(vehicle) = self.selected else {
            return Err(self.reject("reset", self.phase));
        };
        self.ticker.cancel();
        self.progress = Progress::ZERO;
        self.set_phase(Phase::Ready);

        match self.provider.original_position(vehicle) {
            Some(position) => self.emit(vehicle, position, EmitCause::Reset),
            None => warn!(%vehicle, "reset: vehicle has no stored location"),
        }
        Ok(())
    }

    /// Change the speed multiplier; applies from the next tick.
    pub fn set_speed(&mut self, multiplier: f64) -> SimResult<()> {
        let speed = SpeedMultiplier::new(multiplier).map_err(|_| {
            debug!(multiplier, "speed rejected");
            SimError::InvalidSpeed(multiplier)
        })?;
        self.set_speed_multiplier(speed);
        Ok(())
    }

    /// Infallible form of [`set_speed`][Self::set_speed].
    pub fn set_speed_multiplier(&mut self, speed: SpeedMultiplier) {
        if speed != self.speed {
            debug!(from = %self.speed, to = %speed, "speed changed");
        }
        self.speed = speed;
    }

    /// Dispatch a parsed control command.
    pub fn apply(&mut self, command: Command, now: Instant) -> SimResult<()> {
        match command {
            Command::Select(vehicle) => {
                self.select_vehicle(vehicle);
                Ok(())
            }
            Command::Speed(m) => self.set_speed(m),
            Command::Start    => self.start(now),
            Command::Pause    => self.pause(),
            Command::Toggle   => self.toggle(now),
            Command::Reset    => self.reset(),
        }
    }

    // ── Time ──────────────────────────────────────────────────────────────

    /// Run one tick for every ticker firing due by `now`.  Returns the number
    /// of ticks that advanced the simulation.
    pub fn poll(&mut self, now: Instant) -> usize {
        let mut ticks = 0;
        while let Some(firing) = self.due_firing(now) {
            if self.fire(firing) {
                ticks += 1;
            }
        }
        ticks
    }

    /// Take the next firing due by `now` without running it.
    ///
    /// For hosts that queue firings onto their own event loop and deliver
    /// them later with [`fire`][Self::fire].
    pub fn due_firing(&mut self, now: Instant) -> Option<TickerFiring> {
        self.ticker.poll(now)
    }

    /// Deliver a single firing.  Firings from an arming that has since been
    /// cancelled are dropped.  Returns `true` if a tick ran.
    pub fn fire(&mut self, firing: TickerFiring) -> bool {
        if !self.ticker.accepts(firing) {
            trace!(generation = firing.generation(), "stale ticker firing dropped");
            return false;
        }
        self.tick()
    }

    /// Advance by one step.  No-op unless `Running`.
    ///
    /// Normally invoked through [`poll`][Self::poll]; hosts with their own
    /// timer may call it directly.
    pub fn tick(&mut self) -> bool {
        if self.phase != Phase::Running {
            return false;
        }
        let (Some(vehicle), Some(route)) = (self.selected, self.route) else {
            return false;
        };

        let step = self.config.step_units(self.speed);
        self.progress = self.progress.advance(step);

        if self.progress.is_complete() {
            self.ticker.cancel();
            self.set_phase(Phase::Completed);
            info!(%vehicle, "route simulation completed");
            self.emit(vehicle, route.last(), EmitCause::Completed);
        } else {
            let position = route.at(self.progress.fraction());
            trace!(%vehicle, progress = self.progress.fraction(), %position, "tick");
            self.emit(vehicle, position, EmitCause::Tick);
        }
        true
    }

    /// Tear down: stop the ticker and hand back the sink.
    pub fn into_sink(mut self) -> S {
        if self.ticker.cancel() {
            debug!("engine dropped while running");
        }
        self.sink
    }

    // ── Internals ─────────────────────────────────────────────────────────

    fn emit(&mut self, vehicle: VehicleId, position: GeoPoint, cause: EmitCause) {
        let event = PositionEvent {
            vehicle,
            position,
            progress: self.progress,
            cause,
        };
        self.sink.on_position(&event);
    }

    fn set_phase(&mut self, to: Phase) {
        let from = self.phase;
        self.phase = to;
        if from != to {
            debug!(vehicle = ?self.selected, %from, %to, "phase change");
            self.sink.on_phase_change(self.selected, from, to);
        }
    }

    fn reject(&self, command: &'static str, phase: Phase) -> SimError {
        debug!(command, %phase, "command ignored");
        SimError::InvalidCommand { command, phase }
    }
}
