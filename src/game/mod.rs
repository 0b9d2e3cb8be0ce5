//! Rally Logic Module
//!
//! All rally simulation code. Time always comes from the caller.
//!
//! ## Module Structure
//!
//! - `shot`: Shot kinds and stroke classification
//! - `flight`: Shuttle flight legs and the ballistic arc
//! - `input`: Hand sample mapping and delta tracking
//! - `opponent`: Opponent return selection
//! - `catch`: Dynamic catch radius
//! - `state`: Rally state, entities, snapshot
//! - `tick`: Per-frame driver and replay
//! - `events`: Rally events

pub mod shot;
pub mod flight;
pub mod input;
pub mod opponent;
pub mod catch;
pub mod state;
pub mod tick;
pub mod events;

// Re-export key types
pub use shot::{ShotKind, ShotThresholds, classify_shot};
pub use flight::{FlightLeg, ShuttlePosition};
pub use input::{HandSample, InputMapper, DeltaTracker};
pub use state::{RallyMatch, RallyState, RallySnapshot, CourtEntity};
pub use tick::{TickResult, RecordedFrame, tick, advance, replay_session};
pub use events::{RallyEvent, RallyEventData, RallyOutcome};
