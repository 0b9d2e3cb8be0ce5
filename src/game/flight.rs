//! Shuttle Flight Model
//!
//! A flight leg is fully described at launch; the shuttle's position at any
//! later time is a pure function of the leg and that time. Nothing here
//! holds mutable state.

use serde::{Serialize, Deserialize};

use crate::config::GameConfig;
use crate::core::court::CourtPoint;
use crate::game::shot::ShotKind;

/// Shuttle position including height above the floor.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ShuttlePosition {
    /// Horizontal coordinate
    pub x: f64,
    /// Depth coordinate
    pub depth: f64,
    /// Height above the court (0 = on the floor or in a hand)
    pub height: f64,
}

impl ShuttlePosition {
    /// Shuttle resting at a floor point.
    #[inline]
    pub fn grounded(point: CourtPoint) -> Self {
        Self { x: point.x, depth: point.depth, height: 0.0 }
    }

    /// Floor projection.
    #[inline]
    pub fn floor(&self) -> CourtPoint {
        CourtPoint::new(self.x, self.depth)
    }
}

/// One single-direction shuttle flight.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct FlightLeg {
    /// Where the shuttle was struck
    pub origin: CourtPoint,
    /// Where the shuttle lands
    pub destination: CourtPoint,
    /// Stroke that launched this leg
    pub shot: ShotKind,
    /// Launch time (seconds, caller's clock)
    pub launched_at: f64,
    /// Total flight time
    pub duration: f64,
    /// Arc peak parameter
    pub arc_height: f64,
    /// Vertical acceleration (negative)
    pub gravity: f64,
}

impl FlightLeg {
    /// Launch a leg, taking duration and arc from the shot tables.
    pub fn launch(
        origin: CourtPoint,
        destination: CourtPoint,
        shot: ShotKind,
        launched_at: f64,
        config: &GameConfig,
    ) -> Self {
        Self {
            origin,
            destination,
            shot,
            launched_at,
            duration: config.flight_duration(shot),
            arc_height: config.arc_heights.get(shot),
            gravity: config.gravity,
        }
    }

    /// Time since launch, never negative.
    #[inline]
    pub fn elapsed(&self, now: f64) -> f64 {
        (now - self.launched_at).max(0.0)
    }

    /// Fraction of the flight completed, in `[0, 1]`.
    #[inline]
    pub fn progress(&self, now: f64) -> f64 {
        if self.duration <= 0.0 {
            return 1.0;
        }
        (self.elapsed(now) / self.duration).min(1.0)
    }

    /// Has the shuttle reached its destination?
    #[inline]
    pub fn is_complete(&self, now: f64) -> bool {
        self.progress(now) >= 1.0
    }

    /// Floor position at progress `t`.
    #[inline]
    pub fn point_at(&self, t: f64) -> CourtPoint {
        self.origin.lerp(self.destination, t.clamp(0.0, 1.0))
    }

    /// Shuttle position at `now`.
    pub fn shuttle_at(&self, now: f64) -> ShuttlePosition {
        let floor = self.point_at(self.progress(now));
        ShuttlePosition {
            x: floor.x,
            depth: floor.depth,
            height: ballistic_height(self.arc_height, self.duration, self.elapsed(now), self.gravity),
        }
    }
}

/// Height of a lobbed shuttle `elapsed` seconds into a flight.
///
/// Launch speed is `2 * peak / duration`; the curve is floored at zero and
/// the shuttle is grounded once the flight time is used up.
pub fn ballistic_height(peak: f64, duration: f64, elapsed: f64, gravity: f64) -> f64 {
    if duration <= 0.0 || elapsed <= 0.0 || elapsed >= duration {
        return 0.0;
    }
    let launch_velocity = 2.0 * peak / duration;
    (launch_velocity * elapsed + 0.5 * gravity * elapsed * elapsed).max(0.0)
}
