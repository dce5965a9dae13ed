//! Delivery routes and progress-based interpolation.
//!
//! # Parameterisation
//!
//! A route with N waypoints is split into N − 1 segments that each take an
//! **equal share of progress**, regardless of their real-world length:
//!
//! ```text
//!   total   = progress · (N − 1)
//!   segment = floor(total)        clamped to [0, N − 2]
//!   local   = total − segment
//!   point   = wp[segment] + (wp[segment + 1] − wp[segment]) · local
//! ```
//!
//! The clamp is what lets `progress = 1` land on the final waypoint: floor
//! would otherwise index one past the last segment.

use crate::{GeoPoint, RouteError};

/// An ordered, immutable sequence of at least two waypoints.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Route {
    points: Vec<GeoPoint>,
}

impl Route {
    /// Validate `points` and wrap them as a route.
    ///
    /// Fails with [`RouteError::TooFewWaypoints`] for fewer than two points
    /// and [`RouteError::NonFinite`] for NaN / infinite coordinates.
    pub fn new(points: Vec<GeoPoint>) -> Result<Self, RouteError> {
        if points.len() < 2 {
            return Err(RouteError::TooFewWaypoints(points.len()));
        }
        if let Some(index) = points.iter().position(|p| !p.is_finite()) {
            return Err(RouteError::NonFinite { index });
        }
        Ok(Self { points })
    }

    #[inline]
    pub fn points(&self) -> &[GeoPoint] {
        &self.points
    }

    /// Number of waypoints (always ≥ 2).
    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Always `false`; present for API symmetry with slices.
    #[inline]
    pub fn is_empty(&self) -> bool {
        false
    }

    #[inline]
    pub fn first(&self) -> GeoPoint {
        self.points[0]
    }

    #[inline]
    pub fn last(&self) -> GeoPoint {
        self.points[self.points.len() - 1]
    }

    /// Number of parameter segments (`len - 1`).
    #[inline]
    pub fn segment_count(&self) -> usize {
        self.points.len() - 1
    }

    /// Segment index and in-segment fraction for `progress`.
    ///
    /// `progress` is clamped to `[0, 1]`; NaN is treated as 0.
    pub fn locate(&self, progress: f64) -> (usize, f64) {
        let progress = if progress.is_nan() { 0.0 } else { progress.clamp(0.0, 1.0) };
        let segments = self.segment_count();
        let total = progress * segments as f64;
        let segment = (total.floor() as usize).min(segments - 1);
        (segment, total - segment as f64)
    }

    /// Index of the segment that `progress` falls in, in `[0, len - 2]`.
    #[inline]
    pub fn segment_at(&self, progress: f64) -> usize {
        self.locate(progress).0
    }

    /// Interpolated position at `progress`.  See the module docs.
    ///
    /// Endpoints are returned verbatim, so `at(0.0) == first()` and
    /// `at(1.0) == last()` hold bit-for-bit.
    pub fn at(&self, progress: f64) -> GeoPoint {
        let (segment, local) = self.locate(progress);
        let start = self.points[segment];
        let end = self.points[segment + 1];
        if local <= 0.0 {
            start
        } else if local >= 1.0 {
            end
        } else {
            start.lerp(end, local)
        }
    }

    /// Sum of haversine segment lengths, in metres.
    pub fn length_m(&self) -> f64 {
        self.points
            .windows(2)
            .map(|w| w[0].distance_m(w[1]))
            .sum()
    }
}

impl TryFrom<Vec<GeoPoint>> for Route {
    type Error = RouteError;

    fn try_from(points: Vec<GeoPoint>) -> Result<Self, RouteError> {
        Route::new(points)
    }
}

/// Free-function form of [`Route::at`].
#[inline]
pub fn interpolate(route: &Route, progress: f64) -> GeoPoint {
    route.at(progress)
}
