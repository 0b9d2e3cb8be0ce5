//! Shot Kinds and Stroke Classification
//!
//! A swing is classified from a single per-frame hand delta. Deltas use
//! image coordinates: positive `dy` is the hand moving down the frame.

use std::fmt;
use serde::{Serialize, Deserialize};

use crate::config::ConfigError;
use crate::core::court::Zone;

/// Category of stroke, fixed for the lifetime of a flight leg.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum ShotKind {
    /// Swing detected but not recognized as anything specific
    #[default]
    Normal = 0,
    /// Fast downward swing
    Smash = 1,
    /// Upward swing
    Clear = 2,
    /// Slow controlled swing
    Drop = 3,
}

impl ShotKind {
    /// Stance zone a hitter takes for this shot.
    ///
    /// Drops are played at the net, clears from behind the baseline.
    #[inline]
    pub fn zone(self) -> Zone {
        match self {
            ShotKind::Drop => Zone::Net,
            ShotKind::Clear => Zone::Back,
            ShotKind::Normal | ShotKind::Smash => Zone::Base,
        }
    }

    /// Upper-case label, as shown on the game HUD.
    pub fn label(self) -> &'static str {
        match self {
            ShotKind::Normal => "NORMAL",
            ShotKind::Smash => "SMASH",
            ShotKind::Clear => "CLEAR",
            ShotKind::Drop => "DROP",
        }
    }
}

impl fmt::Display for ShotKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Speed and direction thresholds for [`classify_shot`].
///
/// Tuned for hand-landmark centroids in normalized image coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ShotThresholds {
    /// Minimum speed for a smash
    pub smash_speed: f64,
    /// Minimum speed for a clear
    pub clear_speed: f64,
    /// Minimum speed for a drop
    pub drop_speed: f64,
    /// `dy` below this is an upward swing (negative)
    pub upward_dy: f64,
    /// `dy` above this is a downward swing (positive)
    pub downward_dy: f64,
}

impl Default for ShotThresholds {
    fn default() -> Self {
        Self {
            smash_speed: 0.045,
            clear_speed: 0.025,
            drop_speed: 0.015,
            upward_dy: -0.08,
            downward_dy: 0.08,
        }
    }
}

impl ShotThresholds {
    /// Check the thresholds describe distinct swings.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let all = [
            ("thresholds.smash_speed", self.smash_speed),
            ("thresholds.clear_speed", self.clear_speed),
            ("thresholds.drop_speed", self.drop_speed),
            ("thresholds.upward_dy", self.upward_dy),
            ("thresholds.downward_dy", self.downward_dy),
        ];
        for (field, value) in all {
            if !value.is_finite() {
                return Err(ConfigError::Invalid { field, reason: format!("{value} is not finite") });
            }
        }
        if self.drop_speed < 0.0 || self.clear_speed < 0.0 || self.smash_speed < 0.0 {
            return Err(ConfigError::Invalid {
                field: "thresholds",
                reason: "speed thresholds must not be negative".to_string(),
            });
        }
        if self.upward_dy >= 0.0 || self.downward_dy <= 0.0 {
            return Err(ConfigError::Invalid {
                field: "thresholds",
                reason: "upward_dy must be negative and downward_dy positive".to_string(),
            });
        }
        Ok(())
    }
}

/// Classify a swing from one frame's hand delta.
///
/// Checked in priority order: smash (fast and downward), clear (upward,
/// direction matters more than speed), drop (anything above the drop
/// speed). Returns `None` when the swing is too slow to be any of them.
pub fn classify_shot(dx: f64, dy: f64, thresholds: &ShotThresholds) -> Option<ShotKind> {
    let speed = (dx * dx + dy * dy).sqrt();

    if speed > thresholds.smash_speed && dy > thresholds.downward_dy {
        return Some(ShotKind::Smash);
    }

    if dy < thresholds.upward_dy && speed > thresholds.clear_speed {
        return Some(ShotKind::Clear);
    }

    if speed > thresholds.drop_speed {
        return Some(ShotKind::Drop);
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classify(dx: f64, dy: f64) -> Option<ShotKind> {
        classify_shot(dx, dy, &ShotThresholds::default())
    }

    #[test]
    fn test_fast_downward_is_smash() {
        assert_eq!(classify(0.0, 0.12), Some(ShotKind::Smash));
        assert_eq!(classify(0.05, 0.09), Some(ShotKind::Smash));
    }

    #[test]
    fn test_upward_is_clear() {
        assert_eq!(classify(0.0, -0.09), Some(ShotKind::Clear));
        assert_eq!(classify(0.02, -0.2), Some(ShotKind::Clear));
    }

    #[test]
    fn test_sideways_is_drop() {
        // Fast but horizontal: neither smash nor clear
        assert_eq!(classify(0.1, 0.0), Some(ShotKind::Drop));
        // Downward but under the downward threshold
        assert_eq!(classify(0.0, 0.05), Some(ShotKind::Drop));
    }

    #[test]
    fn test_too_slow_is_none() {
        assert_eq!(classify(0.0, 0.0), None);
        assert_eq!(classify(0.01, 0.01), None);
    }

    #[test]
    fn test_smash_has_priority_over_drop() {
        let t = ShotThresholds::default();
        // Both smash and drop conditions hold
        let (dx, dy): (f64, f64) = (0.0, 0.1);
        assert!((dx * dx + dy * dy).sqrt() > t.drop_speed);
        assert_eq!(classify(dx, dy), Some(ShotKind::Smash));
    }

    #[test]
    fn test_zones() {
        assert_eq!(ShotKind::Drop.zone(), Zone::Net);
        assert_eq!(ShotKind::Clear.zone(), Zone::Back);
        assert_eq!(ShotKind::Smash.zone(), Zone::Base);
        assert_eq!(ShotKind::Normal.zone(), Zone::Base);
    }

    #[test]
    fn test_thresholds_validate() {
        assert!(ShotThresholds::default().validate().is_ok());

        let flipped = ShotThresholds { upward_dy: 0.08, ..ShotThresholds::default() };
        assert!(flipped.validate().is_err());
    }
}
