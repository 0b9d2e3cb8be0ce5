//! Opponent Return Policy
//!
//! The opponent never mirrors a smash; it answers pressure with a lift or a
//! touch at the net, and punishes clears with a smash half the time.

use serde::{Serialize, Deserialize};

use crate::config::GameConfig;
use crate::core::court::{clamp_to_court, lerp};
use crate::core::rng::DeterministicRng;
use crate::game::shot::ShotKind;

/// The opponent's committed reply.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct OpponentReturn {
    /// Return stroke
    pub shot: ShotKind,
    /// Horizontal landing target on the player's side
    pub aim_x: f64,
}

/// Candidate replies to an incoming shot.
pub fn return_options(incoming: ShotKind) -> &'static [ShotKind] {
    match incoming {
        ShotKind::Smash => &[ShotKind::Clear, ShotKind::Drop],
        ShotKind::Drop => &[ShotKind::Drop, ShotKind::Clear],
        ShotKind::Clear => &[ShotKind::Smash, ShotKind::Clear],
        ShotKind::Normal => &[ShotKind::Clear],
    }
}

/// Pick the return stroke uniformly among the candidates.
pub fn choose_return_shot(incoming: ShotKind, rng: &mut DeterministicRng) -> ShotKind {
    rng.choose(return_options(incoming))
        .copied()
        .unwrap_or(ShotKind::Clear)
}

/// Uniform aim over the safe part of the court.
pub fn random_aim(rng: &mut DeterministicRng, config: &GameConfig) -> f64 {
    rng.next_range(config.aim_min, config.aim_max)
}

/// Where the opponent aims a given return.
///
/// Drops land short: `drop_pull` of the way from the opponent toward the
/// player. Everything else goes to a random safe spot.
pub fn return_aim(
    shot: ShotKind,
    opponent_x: f64,
    player_x: f64,
    rng: &mut DeterministicRng,
    config: &GameConfig,
) -> f64 {
    let aim = match shot {
        ShotKind::Drop => lerp(opponent_x, player_x, config.drop_pull),
        _ => random_aim(rng, config),
    };
    clamp_to_court(aim, config.court_width)
}

/// Decide the opponent's full reply to an incoming shot.
pub fn plan_return(
    incoming: ShotKind,
    opponent_x: f64,
    player_x: f64,
    rng: &mut DeterministicRng,
    config: &GameConfig,
) -> OpponentReturn {
    let shot = choose_return_shot(incoming, rng);
    let aim_x = return_aim(shot, opponent_x, player_x, rng, config);
    OpponentReturn { shot, aim_x }
}
