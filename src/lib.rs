//! # Shuttle Rally
//!
//! Rally core for a hand-tracked badminton game.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                      SHUTTLE RALLY                           │
//! ├─────────────────────────────────────────────────────────────┤
//! │  core/           - Deterministic primitives                  │
//! │  ├── court.rs    - Court points, sides, zone depths          │
//! │  ├── rng.rs      - Deterministic Xorshift128+ PRNG           │
//! │  └── hash.rs     - State hashing for replay checks           │
//! │                                                              │
//! │  config.rs       - Tunable constant table                    │
//! │                                                              │
//! │  game/           - Rally logic                               │
//! │  ├── shot.rs     - Stroke classification                     │
//! │  ├── flight.rs   - Shuttle flight model                      │
//! │  ├── input.rs    - Hand sample mapping                       │
//! │  ├── opponent.rs - Opponent return policy                    │
//! │  ├── catch.rs    - Dynamic catch radius                      │
//! │  ├── state.rs    - Rally state and snapshot                  │
//! │  ├── tick.rs     - Per-frame driver, replay                  │
//! │  └── events.rs   - Rally events                              │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! Camera capture and rendering live outside this crate: the caller feeds
//! one optional [`HandSample`] and a monotonic timestamp per frame and
//! draws from the [`RallySnapshot`].
//!
//! ## Determinism
//!
//! Given the same seed, config and recorded frames, a session replays to
//! the same state hash. All randomness comes from the match's seeded
//! [`DeterministicRng`].

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod core;
pub mod config;
pub mod game;

// Re-export commonly used types
pub use core::court::{CourtPoint, Side, Zone};
pub use core::rng::DeterministicRng;
pub use config::{GameConfig, ConfigError, ShotTable};
pub use game::input::HandSample;
pub use game::state::{RallyMatch, RallyState, RallySnapshot};
pub use game::shot::ShotKind;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Frame rate the demo driver runs at (Hz)
pub const DEMO_FRAME_RATE: u32 = 60;
