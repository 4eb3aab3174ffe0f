//! Reproducible random streams.
//!
//! # Determinism strategy
//!
//! Every engine owns exactly one [`SimRng`], a thin wrapper over the
//! canonical 32-bit Mersenne Twister ([`Mt19937`]).  All randomness in a
//! replication (population draws, daily re-placement, visit order,
//! infection trials) comes from that single stream in a fixed order, so:
//!
//! - The same seed always reproduces the same daily series, bit for bit.
//! - Output integers match every other MT19937 implementation for the same
//!   seed, which lets results be regression-tested across implementations.
//! - Nothing is global: replications never share a stream and can run on
//!   separate threads without coordination.
//!
//! The derived samplers use plain reductions (`u32 % n`, `u32 * 2^-32`)
//! instead of `rand`'s unbiased ones.  Swapping them would change every
//! trajectory.

use rand::{RngCore, SeedableRng};

use crate::{CoreError, CoreResult};

const N: usize = 624;
const M: usize = 397;
const MATRIX_A: u32 = 0x9908_b0df;
const UPPER_MASK: u32 = 0x8000_0000;
const LOWER_MASK: u32 = 0x7fff_ffff;
const INIT_MULTIPLIER: u32 = 1_812_433_253;

/// 2^-32: maps a `u32` onto `[0, 1)`.
const UNIT_SCALE: f64 = 1.0 / 4_294_967_296.0;

// ── Mt19937 ───────────────────────────────────────────────────────────────────

/// The standard 32-bit MT19937 generator (624-word state).
///
/// Implements [`RngCore`] and [`SeedableRng`] so it can drive any `rand`
/// distribution, but the simulation itself only draws through [`SimRng`].
#[derive(Clone)]
pub struct Mt19937 {
    state: [u32; N],
    index: usize,
}

impl Mt19937 {
    /// Standard MT19937 seed used when none is given.
    pub const DEFAULT_SEED: u32 = 5489;

    pub fn new(seed: u32) -> Self {
        let mut mt = Self { state: [0; N], index: N };
        mt.reseed(seed);
        mt
    }

    /// Reset the state with the standard initialisation recurrence.
    pub fn reseed(&mut self, seed: u32) {
        self.state[0] = seed;
        for i in 1..N {
            let prev = self.state[i - 1];
            self.state[i] = INIT_MULTIPLIER
                .wrapping_mul(prev ^ (prev >> 30))
                .wrapping_add(i as u32);
        }
        self.index = N;
    }

    /// Next tempered 32-bit output.
    #[inline]
    pub fn next_u32(&mut self) -> u32 {
        if self.index >= N {
            self.twist();
        }
        let mut y = self.state[self.index];
        self.index += 1;

        y ^= y >> 11;
        y ^= (y << 7) & 0x9d2c_5680;
        y ^= (y << 15) & 0xefc6_0000;
        y ^= y >> 18;
        y
    }

    /// Regenerate all 624 words.
    fn twist(&mut self) {
        for i in 0..N {
            let y = (self.state[i] & UPPER_MASK) | (self.state[(i + 1) % N] & LOWER_MASK);
            let mut next = self.state[(i + M) % N] ^ (y >> 1);
            if y & 1 != 0 {
                next ^= MATRIX_A;
            }
            self.state[i] = next;
        }
        self.index = 0;
    }
}

impl Default for Mt19937 {
    fn default() -> Self {
        Self::new(Self::DEFAULT_SEED)
    }
}

impl std::fmt::Debug for Mt19937 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Mt19937").field("index", &self.index).finish_non_exhaustive()
    }
}

impl RngCore for Mt19937 {
    #[inline]
    fn next_u32(&mut self) -> u32 {
        Mt19937::next_u32(self)
    }

    /// Low word first, matching `rand_core`'s `next_u64_via_u32`.
    #[inline]
    fn next_u64(&mut self) -> u64 {
        let lo = u64::from(Mt19937::next_u32(self));
        let hi = u64::from(Mt19937::next_u32(self));
        (hi << 32) | lo
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        for chunk in dest.chunks_mut(4) {
            let bytes = Mt19937::next_u32(self).to_le_bytes();
            chunk.copy_from_slice(&bytes[..chunk.len()]);
        }
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}

impl SeedableRng for Mt19937 {
    type Seed = [u8; 4];

    fn from_seed(seed: Self::Seed) -> Self {
        Self::new(u32::from_le_bytes(seed))
    }

    /// Uses the canonical init recurrence on the low 32 bits instead of
    /// `rand`'s PCG seed expansion, so `seed_from_u64(s)` matches `new(s)`.
    fn seed_from_u64(state: u64) -> Self {
        Self::new(state as u32)
    }
}

// ── SimRng ────────────────────────────────────────────────────────────────────

/// The engine-owned random stream.
///
/// Owned exclusively by one engine; used only on the thread running that
/// engine.  Seeds wider than 32 bits keep their low 32 bits.
#[derive(Clone, Debug)]
pub struct SimRng(Mt19937);

impl SimRng {
    pub fn new(seed: u64) -> Self {
        SimRng(Mt19937::new(seed as u32))
    }

    /// Reset to the state produced by `SimRng::new(seed)`.
    pub fn reseed(&mut self, seed: u64) {
        self.0.reseed(seed as u32);
    }

    /// Expose the inner generator for use with `rand` distribution types.
    #[inline]
    pub fn inner(&mut self) -> &mut Mt19937 {
        &mut self.0
    }

    #[inline]
    pub fn next_u32(&mut self) -> u32 {
        self.0.next_u32()
    }

    /// Uniform double in `[0, 1)` with 32 bits of resolution.
    #[inline]
    pub fn next_unit_f64(&mut self) -> f64 {
        f64::from(self.0.next_u32()) * UNIT_SCALE
    }

    /// Exponential sample with the given mean, by inverse CDF:
    /// `-mean * ln(1 - U)`.
    ///
    /// A negative or non-finite mean is rejected without consuming the stream.
    pub fn next_exponential(&mut self, mean: f64) -> CoreResult<f64> {
        if !mean.is_finite() || mean < 0.0 {
            return Err(CoreError::InvalidDistribution { mean });
        }
        Ok(-mean * (1.0 - self.next_unit_f64()).ln())
    }

    /// Integer in `[0, n)` by modulo reduction.
    ///
    /// # Panics
    /// Panics if `n == 0`.
    #[inline]
    pub fn below(&mut self, n: u32) -> u32 {
        self.0.next_u32() % n
    }

    /// Fisher-Yates shuffle, walking down from the last element.
    ///
    /// Slices longer than `u32::MAX` elements are not supported.
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        for i in (1..slice.len()).rev() {
            let j = self.below(i as u32 + 1) as usize;
            slice.swap(i, j);
        }
    }
}
