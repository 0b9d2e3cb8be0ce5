//! Rally State Definitions
//!
//! Everything the rally owns lives in one [`RallyMatch`]. Only the tick
//! functions in [`crate::game::tick`] mutate it; collaborators read a
//! [`RallySnapshot`] after each tick.

use std::fmt;
use serde::{Serialize, Deserialize};

use crate::config::GameConfig;
use crate::core::court::{CourtPoint, Side};
use crate::core::hash::{StateHash, compute_state_hash};
use crate::core::rng::DeterministicRng;
use crate::game::events::{RallyEvent, RallyOutcome};
use crate::game::flight::{FlightLeg, ShuttlePosition};
use crate::game::shot::ShotKind;

// =============================================================================
// RALLY STATE
// =============================================================================

/// Phase of the current rally.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum RallyState {
    /// Waiting for the player to serve or hit
    #[default]
    Idle = 0,
    /// Player's shot in the air
    FlightToOpponent = 1,
    /// Opponent lining up a return
    OpponentWait = 2,
    /// Opponent's return in the air
    FlightToPlayer = 3,
}

impl RallyState {
    /// Does this state carry a flight leg?
    #[inline]
    pub fn in_flight(self) -> bool {
        matches!(self, RallyState::FlightToOpponent | RallyState::FlightToPlayer)
    }

    /// Short name for HUDs and logs.
    pub fn label(self) -> &'static str {
        match self {
            RallyState::Idle => "IDLE",
            RallyState::FlightToOpponent => "TO_OPPONENT",
            RallyState::OpponentWait => "OPPONENT_WAIT",
            RallyState::FlightToPlayer => "TO_PLAYER",
        }
    }
}

impl fmt::Display for RallyState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// =============================================================================
// COURT ENTITY
// =============================================================================

/// Player or opponent position, with the targets it eases toward.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct CourtEntity {
    /// Current horizontal position
    pub x: f64,
    /// Horizontal position being moved toward
    pub target_x: f64,
    /// Current (smoothed) depth
    pub depth: f64,
    /// Zone depth being moved toward
    pub target_depth: f64,
}

impl CourtEntity {
    /// Entity standing still at a point.
    pub fn at(point: CourtPoint) -> Self {
        Self {
            x: point.x,
            target_x: point.x,
            depth: point.depth,
            target_depth: point.depth,
        }
    }

    /// Current floor position.
    #[inline]
    pub fn position(&self) -> CourtPoint {
        CourtPoint::new(self.x, self.depth)
    }

    /// Distance still to cover horizontally.
    #[inline]
    pub fn horizontal_lag(&self) -> f64 {
        (self.target_x - self.x).abs()
    }

    /// Close a fraction of the depth gap. Never overshoots for
    /// `smoothing` in `(0, 1]`.
    #[inline]
    pub fn ease_depth(&mut self, smoothing: f64) {
        self.depth += (self.target_depth - self.depth) * smoothing;
    }
}

// =============================================================================
// SNAPSHOT
// =============================================================================

/// Read-only view handed to the renderer after each tick.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct RallySnapshot {
    /// Current phase
    pub state: RallyState,
    /// Player floor position
    pub player: CourtPoint,
    /// Where the hand is steering the player
    pub player_target_x: f64,
    /// Opponent floor position
    pub opponent: CourtPoint,
    /// Shuttle position
    pub shuttle: ShuttlePosition,
    /// Shot of the current or last leg
    pub shot: ShotKind,
    /// Flight progress of the active leg
    pub progress: Option<f64>,
    /// Can the player hit?
    pub player_ready: bool,
    /// Result of the most recent rally
    pub last_outcome: Option<RallyOutcome>,
}

// =============================================================================
// RALLY MATCH
// =============================================================================

/// Complete rally state.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RallyMatch {
    /// Seed the RNG was created from
    pub rng_seed: u64,

    /// Aim and opponent-choice randomness
    pub rng: DeterministicRng,

    /// Current phase
    pub state: RallyState,

    /// When the current phase began
    pub state_started_at: f64,

    /// Latest `now` the state machine has been advanced to
    pub last_advanced_at: Option<f64>,

    /// Human player
    pub player: CourtEntity,

    /// AI opponent
    pub opponent: CourtEntity,

    /// Shuttle position, derived from `leg` while in flight
    pub shuttle: ShuttlePosition,

    /// Active flight; `Some` exactly in the two flight states
    pub leg: Option<FlightLeg>,

    /// Shot of the current or last leg
    pub shot: ShotKind,

    /// Player may hit (cleared by a stroke, restored by a resting hand)
    pub player_ready: bool,

    /// Time of the last player stroke
    pub last_stroke_at: Option<f64>,

    /// Result of the most recent rally
    pub last_outcome: Option<RallyOutcome>,

    /// Events produced since the last `take_events`
    #[serde(skip)]
    events: Vec<RallyEvent>,
}

impl RallyMatch {
    /// Set up a rally with both sides on their baselines at mid court.
    pub fn new(rng_seed: u64, config: &GameConfig) -> Self {
        let layout = config.zone_layout();
        let mid = config.court_width / 2.0;
        let player_home = CourtPoint::new(mid, layout.base(Side::Player));
        let opponent_home = CourtPoint::new(mid, layout.base(Side::Opponent));

        Self {
            rng_seed,
            rng: DeterministicRng::new(rng_seed),
            state: RallyState::Idle,
            state_started_at: 0.0,
            last_advanced_at: None,
            player: CourtEntity::at(player_home),
            opponent: CourtEntity::at(opponent_home),
            shuttle: ShuttlePosition::grounded(player_home),
            leg: None,
            shot: ShotKind::Normal,
            player_ready: true,
            last_stroke_at: None,
            last_outcome: None,
            events: Vec::new(),
        }
    }

    /// Has the stroke cooldown passed?
    #[inline]
    pub fn cooldown_elapsed(&self, now: f64, cooldown: f64) -> bool {
        self.last_stroke_at.map_or(true, |at| now - at > cooldown)
    }

    /// Record `now` as seen by the state machine.
    ///
    /// Returns false when time has not moved past the last recorded value,
    /// in which case no phase logic may run.
    pub(crate) fn observe_time(&mut self, now: f64) -> bool {
        match self.last_advanced_at {
            Some(last) if now <= last => false,
            _ => {
                self.last_advanced_at = Some(now);
                true
            }
        }
    }

    /// Move to a new phase.
    pub(crate) fn enter(&mut self, state: RallyState, now: f64) {
        self.state = state;
        self.state_started_at = now;
    }

    /// Record an event.
    pub fn push_event(&mut self, event: RallyEvent) {
        self.events.push(event);
    }

    /// Drain recorded events.
    pub fn take_events(&mut self) -> Vec<RallyEvent> {
        std::mem::take(&mut self.events)
    }

    /// Snapshot for the renderer.
    pub fn snapshot(&self, now: f64) -> RallySnapshot {
        RallySnapshot {
            state: self.state,
            player: self.player.position(),
            player_target_x: self.player.target_x,
            opponent: self.opponent.position(),
            shuttle: self.shuttle,
            shot: self.shot,
            progress: self.leg.map(|leg| leg.progress(now)),
            player_ready: self.player_ready,
            last_outcome: self.last_outcome,
        }
    }

    /// Hash the full state for replay verification.
    pub fn compute_hash(&self) -> StateHash {
        compute_state_hash(self.rng_seed, |hasher| {
            let [s0, s1] = self.rng.state();
            hasher.update_u64(s0);
            hasher.update_u64(s1);
            hasher.update_u8(self.state as u8);
            hasher.update_f64(self.state_started_at);
            hasher.update_opt_f64(self.last_advanced_at);

            for entity in [&self.player, &self.opponent] {
                hasher.update_f64(entity.x);
                hasher.update_f64(entity.target_x);
                hasher.update_f64(entity.depth);
                hasher.update_f64(entity.target_depth);
            }

            hasher.update_f64(self.shuttle.x);
            hasher.update_f64(self.shuttle.depth);
            hasher.update_f64(self.shuttle.height);

            match &self.leg {
                Some(leg) => {
                    hasher.update_bool(true);
                    hasher.update_point(leg.origin);
                    hasher.update_point(leg.destination);
                    hasher.update_u8(leg.shot as u8);
                    hasher.update_f64(leg.launched_at);
                    hasher.update_f64(leg.duration);
                    hasher.update_f64(leg.arc_height);
                    hasher.update_f64(leg.gravity);
                }
                None => hasher.update_bool(false),
            }

            hasher.update_u8(self.shot as u8);
            hasher.update_bool(self.player_ready);
            hasher.update_opt_f64(self.last_stroke_at);
            hasher.update_u8(match self.last_outcome {
                None => 0,
                Some(RallyOutcome::Won) => 1,
                Some(RallyOutcome::Lost) => 2,
            });
        })
    }
}
