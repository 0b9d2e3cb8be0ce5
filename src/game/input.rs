//! Hand Input Mapping
//!
//! The hand tracker reports a centroid in normalized image coordinates
//! (`0.0..=1.0`, origin top-left, already mirrored) plus the change since the
//! previous frame. [`InputMapper`] turns that into a court target and the
//! two swing checks the rally needs. A frame without a hand is `None` and
//! produces nothing.

use serde::{Serialize, Deserialize};

use crate::config::GameConfig;
use crate::core::court::clamp_to_court;

/// One frame of hand tracking.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct HandSample {
    /// Centroid x (normalized)
    pub x: f64,
    /// Centroid y (normalized)
    pub y: f64,
    /// Change in x since last frame
    pub dx: f64,
    /// Change in y since last frame (positive = downward)
    pub dy: f64,
}

impl HandSample {
    /// Create a sample.
    pub const fn new(x: f64, y: f64, dx: f64, dy: f64) -> Self {
        Self { x, y, dx, dy }
    }

    /// A hand held still at `(x, y)`.
    pub const fn at_rest(x: f64, y: f64) -> Self {
        Self { x, y, dx: 0.0, dy: 0.0 }
    }
}

/// Thresholds and gains for interpreting hand samples.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct InputMapper {
    /// Court width the target is scaled to
    pub court_width: f64,
    /// Gain around the screen center
    pub sensitivity: f64,
    /// Per-axis delta that counts as a swing
    pub move_threshold: f64,
    /// Per-axis delta below which the hand is at rest
    pub neutral_threshold: f64,
}

impl InputMapper {
    /// Build from the constant table.
    pub fn from_config(config: &GameConfig) -> Self {
        Self {
            court_width: config.court_width,
            sensitivity: config.hand_sensitivity,
            move_threshold: config.move_threshold,
            neutral_threshold: config.neutral_threshold,
        }
    }

    /// Court x the player should move toward.
    ///
    /// The gain lets a small hand movement around the screen center cover
    /// the whole court.
    #[inline]
    pub fn target_x(&self, hand_x: f64) -> f64 {
        let mapped = ((hand_x - 0.5) * self.sensitivity + 0.5).clamp(0.0, 1.0);
        clamp_to_court(mapped * self.court_width, self.court_width)
    }

    /// Is the hand at rest? Used to re-arm the player after a stroke.
    #[inline]
    pub fn is_neutral(&self, sample: &HandSample) -> bool {
        sample.dx.abs() < self.neutral_threshold && sample.dy.abs() < self.neutral_threshold
    }

    /// Did the hand move fast enough on either axis to count as a swing?
    #[inline]
    pub fn is_stroke(&self, sample: &HandSample) -> bool {
        sample.dx.abs() > self.move_threshold || sample.dy.abs() > self.move_threshold
    }
}

/// Derives per-frame deltas from successive hand positions.
///
/// The first detection reports a zero delta. When the hand is lost the last
/// known position is kept, so the delta on re-detection spans the gap.
#[derive(Clone, Copy, Debug, Default)]
pub struct DeltaTracker {
    previous: Option<(f64, f64)>,
}

impl DeltaTracker {
    /// Create an empty tracker.
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed this frame's centroid, if any.
    pub fn observe(&mut self, centroid: Option<(f64, f64)>) -> Option<HandSample> {
        let (x, y) = centroid?;
        let (dx, dy) = match self.previous {
            Some((px, py)) => (x - px, y - py),
            None => (0.0, 0.0),
        };
        self.previous = Some((x, y));
        Some(HandSample { x, y, dx, dy })
    }

    /// Feed this frame's hand landmarks, if a hand was found.
    pub fn observe_landmarks(&mut self, landmarks: &[(f64, f64)]) -> Option<HandSample> {
        self.observe(landmark_centroid(landmarks))
    }
}

/// Mean of a set of landmark points. `None` for an empty set.
pub fn landmark_centroid(landmarks: &[(f64, f64)]) -> Option<(f64, f64)> {
    if landmarks.is_empty() {
        return None;
    }
    let n = landmarks.len() as f64;
    let (sx, sy) = landmarks
        .iter()
        .fold((0.0, 0.0), |(ax, ay), (x, y)| (ax + x, ay + y));
    Some((sx / n, sy / n))
}
