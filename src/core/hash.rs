//! State Hashing for Verification
//!
//! Provides deterministic hashing of rally state for:
//! - Replay validation
//! - Comparing two runs of the same recorded session

use sha2::{Sha256, Digest};

use super::court::CourtPoint;

/// Hash output type (256 bits / 32 bytes)
pub type StateHash = [u8; 32];

/// Deterministic hasher for rally state.
///
/// Wraps SHA-256 with helpers for the float types used by the court model.
/// Order of updates is critical for determinism.
pub struct StateHasher {
    hasher: Sha256,
}

impl StateHasher {
    /// Create a new hasher with domain separator.
    pub fn new(domain: &[u8]) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(domain);
        Self { hasher }
    }

    /// Create hasher for rally state.
    pub fn for_rally_state() -> Self {
        Self::new(b"SHUTTLE_RALLY_STATE_V1")
    }

    /// Update with a u8 value.
    #[inline]
    pub fn update_u8(&mut self, value: u8) {
        self.hasher.update([value]);
    }

    /// Update with a u64 value (little-endian).
    #[inline]
    pub fn update_u64(&mut self, value: u64) {
        self.hasher.update(value.to_le_bytes());
    }

    /// Update with an f64 value.
    ///
    /// Hashes the IEEE-754 bit pattern, so `0.0` and `-0.0` differ.
    #[inline]
    pub fn update_f64(&mut self, value: f64) {
        self.update_u64(value.to_bits());
    }

    /// Update with an optional f64 (presence byte, then value).
    #[inline]
    pub fn update_opt_f64(&mut self, value: Option<f64>) {
        match value {
            Some(v) => {
                self.update_u8(1);
                self.update_f64(v);
            }
            None => self.update_u8(0),
        }
    }

    /// Update with a court point.
    #[inline]
    pub fn update_point(&mut self, value: CourtPoint) {
        self.update_f64(value.x);
        self.update_f64(value.depth);
    }

    /// Update with a boolean.
    #[inline]
    pub fn update_bool(&mut self, value: bool) {
        self.update_u8(value as u8);
    }

    /// Finalize and return the hash.
    pub fn finalize(self) -> StateHash {
        self.hasher.finalize().into()
    }
}

/// Compute state hash for rally verification.
///
/// The closure adds state-specific data after the seed.
pub fn compute_state_hash<F>(rng_seed: u64, add_state: F) -> StateHash
where
    F: FnOnce(&mut StateHasher),
{
    let mut hasher = StateHasher::for_rally_state();
    hasher.update_u64(rng_seed);
    add_state(&mut hasher);
    hasher.finalize()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_hasher_determinism() {
        let make_hash = || {
            let mut hasher = StateHasher::for_rally_state();
            hasher.update_u64(12345);
            hasher.update_f64(5.5);
            hasher.update_point(CourtPoint::new(1.0, 650.0));
            hasher.update_bool(true);
            hasher.finalize()
        };

        assert_eq!(make_hash(), make_hash());
    }

    #[test]
    fn test_hash_order_matters() {
        let hash1 = {
            let mut h = StateHasher::new(b"test");
            h.update_f64(1.0);
            h.update_f64(2.0);
            h.finalize()
        };

        let hash2 = {
            let mut h = StateHasher::new(b"test");
            h.update_f64(2.0);
            h.update_f64(1.0);
            h.finalize()
        };

        assert_ne!(hash1, hash2);
    }

    #[test]
    fn test_optional_presence_is_hashed() {
        let with_none = compute_state_hash(1, |h| h.update_opt_f64(None));
        let with_zero = compute_state_hash(1, |h| h.update_opt_f64(Some(0.0)));
        assert_ne!(with_none, with_zero);
    }

    #[test]
    fn test_seed_changes_hash() {
        let a = compute_state_hash(100, |h| h.update_bool(true));
        let b = compute_state_hash(101, |h| h.update_bool(true));
        assert_ne!(a, b);
    }
}
