//! Rally Tick
//!
//! The per-frame driver. Each frame the caller supplies a monotonic `now`
//! (seconds) and the hand sample, if any; [`tick`] applies the input, moves
//! the player, then [`advance`]s the state machine. Nothing here sleeps or
//! reads a clock.

use serde::{Serialize, Deserialize};
use tracing::{debug, info, warn};

use crate::config::GameConfig;
use crate::core::court::{clamp_to_court, lerp, CourtPoint, Side};
use crate::game::catch::{dynamic_catch_radius, within_reach};
use crate::game::events::{RallyEvent, RallyOutcome};
use crate::game::flight::{FlightLeg, ShuttlePosition};
use crate::game::input::{HandSample, InputMapper};
use crate::game::opponent::{plan_return, random_aim};
use crate::game::shot::{classify_shot, ShotKind};
use crate::game::state::{RallyMatch, RallyState};

/// Result of a tick.
#[derive(Debug, Default)]
pub struct TickResult {
    /// Events generated this tick
    pub events: Vec<RallyEvent>,
    /// Set when a rally was resolved this tick
    pub outcome: Option<RallyOutcome>,
}

/// One recorded frame of a session.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct RecordedFrame {
    /// Frame time (seconds, monotonic)
    pub now: f64,
    /// Hand sample, absent when no hand was detected
    pub hand: Option<HandSample>,
}

/// Run one frame: input, player movement, then the rally update.
pub fn tick(
    game: &mut RallyMatch,
    now: f64,
    hand: Option<&HandSample>,
    config: &GameConfig,
) -> TickResult {
    apply_hand_input(game, now, hand, config);
    move_player(game, config);
    advance(game, now, config)
}

/// Advance the rally state machine to `now` and ease both sides' depth.
///
/// Phase logic only runs when `now` is later than the previous call, so a
/// repeated `now` changes nothing but the depth easing. Easing runs every
/// call regardless of state so zone changes keep animating across
/// transitions.
pub fn advance(game: &mut RallyMatch, now: f64, config: &GameConfig) -> TickResult {
    if game.observe_time(now) {
        match game.state {
            RallyState::Idle => {}
            RallyState::FlightToOpponent => update_flight_to_opponent(game, now, config),
            RallyState::OpponentWait => update_opponent_wait(game, now, config),
            RallyState::FlightToPlayer => update_flight_to_player(game, now, config),
        }
        debug_assert_eq!(game.state.in_flight(), game.leg.is_some());
    }

    game.player.ease_depth(config.zone_smoothing);
    game.opponent.ease_depth(config.zone_smoothing);

    let events = game.take_events();
    let outcome = events.iter().find_map(RallyEvent::outcome);
    TickResult { events, outcome }
}

/// Apply one hand sample: steer the player, re-arm after a stroke, or
/// detect a new stroke while idle.
pub fn apply_hand_input(
    game: &mut RallyMatch,
    now: f64,
    hand: Option<&HandSample>,
    config: &GameConfig,
) {
    let Some(hand) = hand else {
        return;
    };

    let mapper = InputMapper::from_config(config);
    game.player.target_x = mapper.target_x(hand.x);

    if game.state != RallyState::Idle {
        return;
    }

    if !game.player_ready {
        if mapper.is_neutral(hand) {
            game.player_ready = true;
            debug!("Player ready at {:.3}", now);
            game.push_event(RallyEvent::player_ready(now));
        }
    } else if game.cooldown_elapsed(now, config.stroke_cooldown) && mapper.is_stroke(hand) {
        let shot = classify_shot(hand.dx, hand.dy, &config.thresholds).unwrap_or(ShotKind::Normal);
        start_player_stroke(game, now, shot, config);
    }
}

/// Ease the player horizontally toward the hand target.
///
/// The gap considered per frame is capped at `max_player_speed`.
pub fn move_player(game: &mut RallyMatch, config: &GameConfig) {
    let gap = (game.player.target_x - game.player.x)
        .clamp(-config.max_player_speed, config.max_player_speed);
    game.player.x = clamp_to_court(game.player.x + gap * config.player_smoothing, config.court_width);
}

/// Launch the player's shot toward the opponent.
pub fn start_player_stroke(game: &mut RallyMatch, now: f64, shot: ShotKind, config: &GameConfig) {
    let layout = config.zone_layout();

    let random = random_aim(&mut game.rng, config);
    let aim = match shot {
        // Short shot: pulled back toward the hitter
        ShotKind::Drop => lerp(random, game.player.x, config.drop_pull),
        _ => random,
    };
    let aim_x = clamp_to_court(aim, config.court_width);

    let origin = CourtPoint::new(game.player.x, layout.depth(Side::Player, shot.zone()));
    let destination = CourtPoint::new(aim_x, layout.base(Side::Opponent));
    let leg = FlightLeg::launch(origin, destination, shot, now, config);

    game.shot = shot;
    game.leg = Some(leg);
    game.shuttle = leg.shuttle_at(now);
    game.player.target_depth = origin.depth;
    game.player_ready = false;
    game.last_stroke_at = Some(now);
    game.enter(RallyState::FlightToOpponent, now);

    debug!("Player hits {} toward x={:.2} ({:.2}s flight)", shot, aim_x, leg.duration);
    game.push_event(RallyEvent::player_stroke(now, shot, aim_x));
}

fn update_flight_to_opponent(game: &mut RallyMatch, now: f64, config: &GameConfig) {
    let Some(leg) = game.leg else {
        warn!("In {} without a flight leg; resetting to idle", game.state);
        game.enter(RallyState::Idle, now);
        return;
    };
    let layout = config.zone_layout();

    game.shuttle = leg.shuttle_at(now);
    game.player.target_depth = layout.depth(Side::Player, leg.shot.zone());

    if leg.is_complete(now) {
        game.opponent.x = leg.destination.x;
        game.opponent.target_x = leg.destination.x;
        game.opponent.target_depth = layout.depth(Side::Opponent, leg.shot.zone());
        game.shuttle = ShuttlePosition::grounded(game.opponent.position());
        game.leg = None;
        game.enter(RallyState::OpponentWait, now);

        debug!("Shuttle reached opponent at x={:.2}", game.opponent.x);
        game.push_event(RallyEvent::opponent_arrived(now, game.opponent.x));
    }
}

fn update_opponent_wait(game: &mut RallyMatch, now: f64, config: &GameConfig) {
    let incoming = game.shot;
    if now - game.state_started_at <= config.reaction_time(incoming) {
        return;
    }

    let layout = config.zone_layout();
    let reply = plan_return(incoming, game.opponent.x, game.player.x, &mut game.rng, config);

    let origin = CourtPoint::new(game.opponent.x, layout.depth(Side::Opponent, reply.shot.zone()));
    let destination = CourtPoint::new(reply.aim_x, layout.base(Side::Player));
    let leg = FlightLeg::launch(origin, destination, reply.shot, now, config);

    game.shot = reply.shot;
    game.opponent.target_depth = origin.depth;
    game.leg = Some(leg);
    game.shuttle = leg.shuttle_at(now);
    game.enter(RallyState::FlightToPlayer, now);

    debug!("Opponent answers {} with {} toward x={:.2}", incoming, reply.shot, reply.aim_x);
    game.push_event(RallyEvent::opponent_return(now, incoming, reply.shot, reply.aim_x));
}

fn update_flight_to_player(game: &mut RallyMatch, now: f64, config: &GameConfig) {
    let Some(leg) = game.leg else {
        warn!("In {} without a flight leg; resetting to idle", game.state);
        game.enter(RallyState::Idle, now);
        return;
    };

    let t = leg.progress(now);
    game.shuttle = leg.shuttle_at(now);

    // Early catch: can happen before the shuttle lands
    let radius = dynamic_catch_radius(leg.shot, &game.player, config);
    if within_reach(&game.shuttle, &game.player, radius, config.catch_depth_tolerance) {
        let layout = config.zone_layout();
        game.shuttle = ShuttlePosition::grounded(game.player.position());
        game.player.target_depth = layout.depth(Side::Player, leg.shot.zone());
        finish_rally(game, now, RallyOutcome::Won, leg.shot, t);
    } else if t >= 1.0 {
        finish_rally(game, now, RallyOutcome::Lost, leg.shot, t);
    }
}

fn finish_rally(game: &mut RallyMatch, now: f64, outcome: RallyOutcome, shot: ShotKind, progress: f64) {
    game.leg = None;
    game.player_ready = false;
    game.last_outcome = Some(outcome);
    game.enter(RallyState::Idle, now);

    match outcome {
        RallyOutcome::Won => info!("Rally won: caught {} at {:.0}% of flight", shot, progress * 100.0),
        RallyOutcome::Lost => info!("Rally lost: {} landed at {:?}", shot, game.shuttle.floor()),
    }
    game.push_event(RallyEvent::rally_ended(now, outcome, shot, progress));
}

/// Replay a recorded session from an initial state.
///
/// Returns the final state and every event produced.
pub fn replay_session(
    initial: RallyMatch,
    frames: &[RecordedFrame],
    config: &GameConfig,
) -> (RallyMatch, Vec<RallyEvent>) {
    let mut game = initial;
    let mut all_events = Vec::new();

    for frame in frames {
        let result = tick(&mut game, frame.now, frame.hand.as_ref(), config);
        all_events.extend(result.events);
    }

    (game, all_events)
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn shot_kind() -> impl Strategy<Value = ShotKind> {
        prop::sample::select(vec![ShotKind::Normal, ShotKind::Smash, ShotKind::Clear, ShotKind::Drop])
    }

    /// Everything but the two depths is unchanged, and each depth moved
    /// toward its target without passing it.
    fn check_only_eased(
        before: &RallyMatch,
        after: &RallyMatch,
        result: &TickResult,
    ) -> Result<(), TestCaseError> {
        prop_assert!(result.events.is_empty());
        prop_assert!(result.outcome.is_none());
        prop_assert_eq!(after.state, before.state);
        prop_assert_eq!(after.state_started_at, before.state_started_at);
        prop_assert_eq!(after.leg, before.leg);
        prop_assert_eq!(after.shuttle, before.shuttle);
        prop_assert_eq!(after.shot, before.shot);
        prop_assert_eq!(after.player_ready, before.player_ready);
        prop_assert_eq!(after.last_outcome, before.last_outcome);
        prop_assert_eq!(after.player.x, before.player.x);
        prop_assert_eq!(after.player.target_depth, before.player.target_depth);
        prop_assert_eq!(after.opponent.x, before.opponent.x);
        prop_assert_eq!(after.opponent.target_depth, before.opponent.target_depth);
        prop_assert_eq!(after.rng.state(), before.rng.state());

        for (eased, was) in [(after.player, before.player), (after.opponent, before.opponent)] {
            let gap_before = was.target_depth - was.depth;
            let gap_after = eased.target_depth - eased.depth;
            prop_assert!(gap_after.abs() <= gap_before.abs());
            prop_assert!(gap_after * gap_before >= 0.0);
        }
        Ok(())
    }

    proptest! {
        /// Property: the player never leaves the court, whatever the hand does
        #[test]
        fn prop_player_stays_on_court(
            seed in any::<u64>(),
            hands in prop::collection::vec(
                (-0.5f64..1.5, -0.5f64..1.5, -0.2f64..0.2, -0.2f64..0.2),
                1..200,
            ),
        ) {
            let config = GameConfig::default();
            let mut game = RallyMatch::new(seed, &config);

            for (i, (x, y, dx, dy)) in hands.into_iter().enumerate() {
                let hand = HandSample::new(x, y, dx, dy);
                tick(&mut game, i as f64 / 60.0, Some(&hand), &config);
                prop_assert!(game.player.x >= 0.0 && game.player.x <= config.court_width);
                prop_assert!(game.player.target_x >= 0.0 && game.player.target_x <= config.court_width);
            }
        }

        /// Property: flight progress never decreases and stays in [0, 1]
        #[test]
        fn prop_progress_monotonic(
            kind in shot_kind(),
            launched_at in 0.0f64..100.0,
            steps in prop::collection::vec(0.0f64..0.1, 1..100),
        ) {
            let config = GameConfig::default();
            let leg = FlightLeg::launch(
                CourtPoint::new(2.0, 650.0),
                CourtPoint::new(8.0, 150.0),
                kind,
                launched_at,
                &config,
            );

            let mut now = launched_at;
            let mut previous = leg.progress(now);
            for step in steps {
                now += step;
                let t = leg.progress(now);
                prop_assert!((0.0..=1.0).contains(&t));
                prop_assert!(t >= previous);
                previous = t;
            }
        }

        /// Property: repeating an update at the same time only moves depths,
        /// in whatever phase the rally has reached
        #[test]
        fn prop_repeat_advance_only_eases(
            seed in any::<u64>(),
            kind in shot_kind(),
            steps in prop::collection::vec(0.001f64..0.3, 1..40),
            depth_offset in -60.0f64..60.0,
        ) {
            let config = GameConfig::default();
            let mut game = RallyMatch::new(seed, &config);
            start_player_stroke(&mut game, 0.0, kind, &config);

            let mut now = 0.0;
            for step in steps {
                now += step;
                advance(&mut game, now, &config);
            }

            // Pull the player off its zone depth so easing has work to do
            game.player.depth = game.player.target_depth + depth_offset;

            let before = game.clone();
            let result = advance(&mut game, now, &config);
            check_only_eased(&before, &game, &result)?;
        }

        /// Property: a return in flight is not caught by easing alone
        #[test]
        fn prop_repeat_advance_keeps_return_in_flight(
            seed in any::<u64>(),
            kind in shot_kind(),
            elapsed in 0.01f64..0.25,
            depth_gap in 36.0f64..80.0,
        ) {
            let config = GameConfig::default();
            let mut game = RallyMatch::new(seed, &config);
            let home = game.player.position();

            let leg = FlightLeg::launch(home, home, kind, 0.0, &config);
            game.shot = kind;
            game.leg = Some(leg);
            game.enter(RallyState::FlightToPlayer, 0.0);
            game.player_ready = false;
            game.player.depth = home.depth + depth_gap;

            advance(&mut game, elapsed, &config);
            prop_assert_eq!(game.state, RallyState::FlightToPlayer);

            for _ in 0..20 {
                let before = game.clone();
                let result = advance(&mut game, elapsed, &config);
                check_only_eased(&before, &game, &result)?;
            }
        }

        /// Property: classification depends only on the delta
        #[test]
        fn prop_classification_pure(dx in -0.3f64..0.3, dy in -0.3f64..0.3) {
            let thresholds = GameConfig::default().thresholds;
            prop_assert_eq!(classify_shot(dx, dy, &thresholds), classify_shot(dx, dy, &thresholds));
        }

        /// Property: a smash is never answered with a smash
        #[test]
        fn prop_smash_never_mirrored(seed in any::<u64>(), wait in 0.6f64..5.0) {
            let config = GameConfig::default();
            let mut game = RallyMatch::new(seed, &config);
            game.shot = ShotKind::Smash;
            game.enter(RallyState::OpponentWait, 0.0);

            advance(&mut game, wait, &config);
            prop_assert_eq!(game.state, RallyState::FlightToPlayer);
            prop_assert_ne!(game.shot, ShotKind::Smash);
        }
    }
}
