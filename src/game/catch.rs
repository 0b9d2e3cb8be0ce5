//! Catch Detection
//!
//! Whether the player reaches an incoming shuttle. The reach shrinks for
//! smashes, grows for drops, and shrinks further while the player is still
//! running toward where the hand is pointing.

use crate::config::GameConfig;
use crate::game::flight::ShuttlePosition;
use crate::game::shot::ShotKind;
use crate::game::state::CourtEntity;

/// Horizontal catch radius for an incoming shot.
pub fn dynamic_catch_radius(incoming: ShotKind, player: &CourtEntity, config: &GameConfig) -> f64 {
    let scaled = config.catch_radius * config.catch_radius_scales.get(incoming);
    let moving_penalty = player.horizontal_lag() * config.catch_movement_penalty;
    (scaled - moving_penalty).max(config.min_catch_radius)
}

/// Is the shuttle within reach of the player?
///
/// Horizontal distance is compared against `radius`, depth against the
/// fixed tolerance. Height is ignored.
#[inline]
pub fn within_reach(
    shuttle: &ShuttlePosition,
    player: &CourtEntity,
    radius: f64,
    depth_tolerance: f64,
) -> bool {
    let dist_x = (shuttle.x - player.x).abs();
    let dist_depth = (shuttle.depth - player.depth).abs();
    dist_x < radius && dist_depth < depth_tolerance
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::court::CourtPoint;

    fn still_player() -> CourtEntity {
        CourtEntity::at(CourtPoint::new(5.0, 650.0))
    }

    #[test]
    fn test_radius_per_shot() {
        let config = GameConfig::default();
        let player = still_player();

        let normal = dynamic_catch_radius(ShotKind::Normal, &player, &config);
        let smash = dynamic_catch_radius(ShotKind::Smash, &player, &config);
        let drop = dynamic_catch_radius(ShotKind::Drop, &player, &config);

        assert!((normal - 0.8).abs() < 1e-9);
        assert!((smash - 0.52).abs() < 1e-9);
        assert!((drop - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_moving_player_has_smaller_radius() {
        let config = GameConfig::default();
        let mut player = still_player();
        player.target_x = 6.0;

        let radius = dynamic_catch_radius(ShotKind::Normal, &player, &config);
        assert!((radius - 0.4).abs() < 1e-9);
    }

    #[test]
    fn test_radius_floor() {
        let config = GameConfig::default();
        let mut player = still_player();
        player.target_x = 10.0;

        let radius = dynamic_catch_radius(ShotKind::Smash, &player, &config);
        assert_eq!(radius, config.min_catch_radius);
    }

    #[test]
    fn test_within_reach() {
        let player = still_player();
        let near = ShuttlePosition { x: 5.3, depth: 640.0, height: 2.0 };
        let wide = ShuttlePosition { x: 6.0, depth: 650.0, height: 0.0 };
        let short = ShuttlePosition { x: 5.0, depth: 600.0, height: 0.0 };

        assert!(within_reach(&near, &player, 0.5, 35.0));
        assert!(!within_reach(&wide, &player, 0.5, 35.0));
        assert!(!within_reach(&short, &player, 0.5, 35.0));
    }
}
