//! Uniform random sources
//!
//! Every random decision in a playout (starting seat, leader tie-breaks,
//! deck reshuffles) goes through [`UniformRandomSource`]. The trait is
//! implemented for every [`RngCore`], so a seeded `ChaCha8Rng` can stand in
//! for [`SecureRandom`] anywhere.

use rand::rngs::OsRng;
use rand::{CryptoRng, RngCore};

// ============================================================================
// CAPABILITY
// ============================================================================

/// Bounded and floating-point draws on top of a raw 32-bit source.
///
/// `next_u32` and `fill_bytes` come from [`RngCore`].
pub trait UniformRandomSource: RngCore {
    /// Uniform value in the half-open range `[lo, hi)`.
    ///
    /// Draws below `2^32 mod (hi - lo)` are rejected so every value in the
    /// range is equally likely.
    fn next_in_range(&mut self, lo: u32, hi: u32) -> u32 {
        assert!(lo < hi, "empty range [{}, {})", lo, hi);
        let span = hi - lo;
        let floor = span.wrapping_neg() % span;
        loop {
            let draw = self.next_u32();
            if draw >= floor {
                return lo + draw % span;
            }
        }
    }

    /// Uniform index in `[0, len)`.
    fn next_index(&mut self, len: usize) -> usize {
        let len = u32::try_from(len).expect("index range exceeds u32");
        self.next_in_range(0, len) as usize
    }

    /// Uniform `f64` in `[0, 1)` built from 53 random bits.
    fn next_double(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 * (1.0 / (1u64 << 53) as f64)
    }
}

impl<R: RngCore + ?Sized> UniformRandomSource for R {}

// ============================================================================
// SECURE SOURCE
// ============================================================================

/// Operating-system CSPRNG.
///
/// Zero-sized and `Copy`: every worker thread can own one.
#[derive(Clone, Copy, Debug, Default)]
pub struct SecureRandom;

impl SecureRandom {
    pub fn new() -> Self {
        SecureRandom
    }
}

impl RngCore for SecureRandom {
    fn next_u32(&mut self) -> u32 {
        OsRng.next_u32()
    }

    fn next_u64(&mut self) -> u64 {
        OsRng.next_u64()
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        OsRng.fill_bytes(dest)
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        OsRng.try_fill_bytes(dest)
    }
}

impl CryptoRng for SecureRandom {}
