//! Rally Events
//!
//! Emitted by the tick loop at every notable transition, for HUD text,
//! sound cues and replay comparison.

use serde::{Serialize, Deserialize};

use crate::game::shot::ShotKind;

/// How a rally ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RallyOutcome {
    /// Player caught the opponent's return
    Won,
    /// Shuttle landed out of reach
    Lost,
}

/// Event payload.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum RallyEventData {
    /// Hand returned to rest; a new stroke can be played
    PlayerReady,

    /// Player struck the shuttle
    PlayerStroke {
        /// Classified stroke
        shot: ShotKind,
        /// Horizontal landing target on the opponent's side
        aim_x: f64,
    },

    /// Shuttle reached the opponent
    OpponentArrived {
        /// Where the opponent took the shuttle
        x: f64,
    },

    /// Opponent committed to a return
    OpponentReturn {
        /// Shot being answered
        incoming: ShotKind,
        /// Return stroke
        shot: ShotKind,
        /// Horizontal landing target on the player's side
        aim_x: f64,
    },

    /// Rally resolved
    RallyEnded {
        /// Won or lost
        outcome: RallyOutcome,
        /// Shot of the final leg
        shot: ShotKind,
        /// Flight progress at resolution (below 1.0 for early catches)
        progress: f64,
    },
}

/// An event with its timestamp.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RallyEvent {
    /// `now` of the tick that produced it
    pub at: f64,
    /// Event data
    pub data: RallyEventData,
}

impl RallyEvent {
    /// Create a new event.
    pub fn new(at: f64, data: RallyEventData) -> Self {
        Self { at, data }
    }

    /// Player re-armed.
    pub fn player_ready(at: f64) -> Self {
        Self::new(at, RallyEventData::PlayerReady)
    }

    /// Player stroke launched.
    pub fn player_stroke(at: f64, shot: ShotKind, aim_x: f64) -> Self {
        Self::new(at, RallyEventData::PlayerStroke { shot, aim_x })
    }

    /// Shuttle reached the opponent.
    pub fn opponent_arrived(at: f64, x: f64) -> Self {
        Self::new(at, RallyEventData::OpponentArrived { x })
    }

    /// Opponent return launched.
    pub fn opponent_return(at: f64, incoming: ShotKind, shot: ShotKind, aim_x: f64) -> Self {
        Self::new(at, RallyEventData::OpponentReturn { incoming, shot, aim_x })
    }

    /// Rally resolved.
    pub fn rally_ended(at: f64, outcome: RallyOutcome, shot: ShotKind, progress: f64) -> Self {
        Self::new(at, RallyEventData::RallyEnded { outcome, shot, progress })
    }

    /// Outcome, if this event ends a rally.
    pub fn outcome(&self) -> Option<RallyOutcome> {
        match self.data {
            RallyEventData::RallyEnded { outcome, .. } => Some(outcome),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_creation() {
        let event = RallyEvent::player_stroke(2.5, ShotKind::Drop, 3.25);
        assert_eq!(event.at, 2.5);
        assert_eq!(
            event.data,
            RallyEventData::PlayerStroke { shot: ShotKind::Drop, aim_x: 3.25 }
        );

        let event = RallyEvent::opponent_return(4.0, ShotKind::Smash, ShotKind::Clear, 6.0);
        assert!(matches!(
            event.data,
            RallyEventData::OpponentReturn { incoming: ShotKind::Smash, shot: ShotKind::Clear, .. }
        ));
    }

    #[test]
    fn test_outcome_only_on_rally_end() {
        assert_eq!(RallyEvent::player_ready(1.0).outcome(), None);
        assert_eq!(RallyEvent::player_stroke(1.0, ShotKind::Smash, 5.0).outcome(), None);
        assert_eq!(RallyEvent::opponent_arrived(1.0, 5.0).outcome(), None);
        assert_eq!(RallyEvent::opponent_return(1.0, ShotKind::Drop, ShotKind::Drop, 4.0).outcome(), None);

        let won = RallyEvent::rally_ended(3.0, RallyOutcome::Won, ShotKind::Smash, 0.4);
        let lost = RallyEvent::rally_ended(3.0, RallyOutcome::Lost, ShotKind::Clear, 1.0);
        assert_eq!(won.outcome(), Some(RallyOutcome::Won));
        assert_eq!(lost.outcome(), Some(RallyOutcome::Lost));
    }
}
