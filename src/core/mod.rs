//! Core deterministic primitives.
//!
//! Court geometry, seeded randomness and state hashing. Nothing in here
//! knows about rallies or shots.

pub mod court;
pub mod rng;
pub mod hash;

// Re-export core types
pub use court::{CourtPoint, Side, Zone, ZoneLayout};
pub use rng::DeterministicRng;
pub use hash::{StateHash, StateHasher, compute_state_hash};
