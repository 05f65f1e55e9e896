//! Seed hashing and the xorshift32 stream
//!
//! The stream must stay bit-compatible with other implementations of the
//! same reading algorithm: shifts 13, 17, 5 in that order, on wrapping
//! 32-bit state, divided by 2^32.

use sha2::{Digest, Sha256};

/// Substituted when the hashed seed is zero (xorshift state must be non-zero)
pub const FALLBACK_SEED: u32 = 0x9E37_79B9;

const TWO_POW_32: f64 = 4_294_967_296.0;

/// Hashes a seed string with SHA-256 and keeps the first 32 bits
pub fn hash_seed(seed: &str) -> u32 {
    let digest = Sha256::digest(seed.as_bytes());
    seed_from_digest(&digest)
}

/// Reads the first four digest bytes as a big-endian `u32`
///
/// This equals parsing the first eight hex digits of the digest.
pub fn seed_from_digest(digest: &[u8]) -> u32 {
    let mut head = [0u8; 4];
    for (dst, src) in head.iter_mut().zip(digest) {
        *dst = *src;
    }
    u32::from_be_bytes(head)
}

/// 32-bit xorshift generator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct XorShift32 {
    state: u32,
}

impl XorShift32 {
    /// Creates a generator; a zero seed is replaced by [`FALLBACK_SEED`]
    pub fn new(seed: u32) -> Self {
        let state = if seed == 0 { FALLBACK_SEED } else { seed };
        Self { state }
    }

    /// Returns the current state
    pub fn state(&self) -> u32 {
        self.state
    }

    /// Advances the state and returns it
    pub fn next_u32(&mut self) -> u32 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 17;
        x ^= x << 5;
        self.state = x;
        x
    }

    /// Advances the state and returns it as a float in [0, 1)
    pub fn next_f64(&mut self) -> f64 {
        f64::from(self.next_u32()) / TWO_POW_32
    }
}
