// Random sources for key generation.
use crate::common::{KeyError, RawKey};
use log::warn;
use rand::rngs::OsRng;
use rand::RngCore;
use rand_chacha::ChaCha20Rng;

/// Anything that can fill a key buffer with cryptographically secure bytes.
pub trait RandomSource {
    fn fill(&mut self, buf: &mut RawKey) -> Result<(), KeyError>;
}

/// The operating system's entropy source.
#[derive(Debug, Clone, Copy, Default)]
pub struct OsRandom;

impl RandomSource for OsRandom {
    fn fill(&mut self, buf: &mut RawKey) -> Result<(), KeyError> {
        OsRng.try_fill_bytes(buf).map_err(|e| {
            warn!("os random source failed: {}", e);
            KeyError::RandomnessUnavailable
        })
    }
}

/// A seeded ChaCha20 stream. Deterministic for a given seed.
impl RandomSource for ChaCha20Rng {
    fn fill(&mut self, buf: &mut RawKey) -> Result<(), KeyError> {
        self.try_fill_bytes(buf).map_err(|e| {
            warn!("chacha20 random source failed: {}", e);
            KeyError::RandomnessUnavailable
        })
    }
}
