//! Court Geometry
//!
//! Horizontal positions run across the court in `[0, court_width]`.
//! Depth runs toward the camera: the player's baseline sits at a larger
//! depth than the opponent's, so "toward the net" means decreasing depth
//! on the player's side and increasing depth on the opponent's side.

use std::fmt;
use serde::{Serialize, Deserialize};

/// A point on the court floor.
#[derive(Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct CourtPoint {
    /// Horizontal coordinate (court units)
    pub x: f64,
    /// Depth coordinate (zone units)
    pub depth: f64,
}

impl CourtPoint {
    /// Create a new point.
    #[inline]
    pub const fn new(x: f64, depth: f64) -> Self {
        Self { x, depth }
    }

    /// Linear interpolation toward `other` by `t`.
    #[inline]
    pub fn lerp(self, other: Self, t: f64) -> Self {
        Self {
            x: lerp(self.x, other.x, t),
            depth: lerp(self.depth, other.depth, t),
        }
    }
}

impl fmt::Debug for CourtPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.3}, {:.1})", self.x, self.depth)
    }
}

/// Which half of the court.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    /// The human player's half (near the camera)
    Player,
    /// The AI opponent's half
    Opponent,
}

/// Stance depth relative to a side's baseline.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Zone {
    /// Close to the net
    Net = 0,
    /// On the baseline
    Base = 1,
    /// Behind the baseline
    Back = 2,
}

/// Depth coordinates of every zone on both sides.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ZoneLayout {
    /// Player baseline depth
    pub player_base: f64,
    /// Opponent baseline depth
    pub opponent_base: f64,
    /// Distance from baseline to the net zone
    pub net_offset: f64,
    /// Distance from baseline to the back zone
    pub back_offset: f64,
}

impl ZoneLayout {
    /// Baseline depth for a side.
    #[inline]
    pub fn base(&self, side: Side) -> f64 {
        match side {
            Side::Player => self.player_base,
            Side::Opponent => self.opponent_base,
        }
    }

    /// Depth of `zone` on `side`.
    pub fn depth(&self, side: Side, zone: Zone) -> f64 {
        // +1 means "away from the net" for this side
        let away = match side {
            Side::Player => 1.0,
            Side::Opponent => -1.0,
        };
        let base = self.base(side);
        match zone {
            Zone::Net => base - away * self.net_offset,
            Zone::Base => base,
            Zone::Back => base + away * self.back_offset,
        }
    }
}

/// Linear interpolation.
#[inline]
pub fn lerp(from: f64, to: f64, t: f64) -> f64 {
    from + (to - from) * t
}

/// Clamp a horizontal coordinate to the court.
#[inline]
pub fn clamp_to_court(x: f64, court_width: f64) -> f64 {
    x.clamp(0.0, court_width)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layout() -> ZoneLayout {
        ZoneLayout {
            player_base: 650.0,
            opponent_base: 150.0,
            net_offset: 80.0,
            back_offset: 40.0,
        }
    }

    #[test]
    fn test_player_zones() {
        let l = layout();
        assert_eq!(l.depth(Side::Player, Zone::Net), 570.0);
        assert_eq!(l.depth(Side::Player, Zone::Base), 650.0);
        assert_eq!(l.depth(Side::Player, Zone::Back), 690.0);
    }

    #[test]
    fn test_opponent_zones_mirrored() {
        let l = layout();
        assert_eq!(l.depth(Side::Opponent, Zone::Net), 230.0);
        assert_eq!(l.depth(Side::Opponent, Zone::Base), 150.0);
        assert_eq!(l.depth(Side::Opponent, Zone::Back), 110.0);
    }

    #[test]
    fn test_lerp_endpoints() {
        let a = CourtPoint::new(2.0, 650.0);
        let b = CourtPoint::new(8.0, 150.0);
        assert_eq!(a.lerp(b, 0.0), a);
        assert_eq!(a.lerp(b, 1.0), b);
        assert_eq!(a.lerp(b, 0.5), CourtPoint::new(5.0, 400.0));
    }

    #[test]
    fn test_clamp_to_court() {
        assert_eq!(clamp_to_court(-1.0, 10.0), 0.0);
        assert_eq!(clamp_to_court(11.0, 10.0), 10.0);
        assert_eq!(clamp_to_court(4.2, 10.0), 4.2);
    }
}
