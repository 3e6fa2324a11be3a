//! Small, fast pseudo-random number generation for sampling.
//!
//! The renderer threads an explicit generator through every sampling call
//! instead of reaching for a global one, so that a given starting state
//! always reproduces the same image.

use crate::Vec3;
use rand::RngCore;

/// State used in place of zero, which is a fixed point of xorshift.
const ZERO_STATE_FALLBACK: u32 = 123_456_789;

/// 1 / 2^24, maps the top 24 bits of a word onto [0, 1).
const UNIT_SCALE: f32 = 1.0 / 16_777_216.0;

/// Mix an integer id into a well-distributed 32-bit generator state.
///
/// Used to derive independent streams from pixel indices, primitive ids
/// and similar keys. Pure: the same input always gives the same output.
#[inline]
pub const fn seed(x: u32) -> u32 {
    // PCG output permutation
    let state = x.wrapping_mul(747_796_405).wrapping_add(2_891_336_453);
    let word = ((state >> ((state >> 28) + 4)) ^ state).wrapping_mul(277_803_737);
    (word >> 22) ^ word
}

/// Marsaglia xorshift generator with 32 bits of state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct XorShift32 {
    state: u32,
}

impl XorShift32 {
    /// Create a generator starting at `state`.
    pub const fn new(state: u32) -> Self {
        let state = if state == 0 { ZERO_STATE_FALLBACK } else { state };
        Self { state }
    }

    /// Create a generator whose state is `seed(key)`.
    pub const fn from_seed_u32(key: u32) -> Self {
        Self::new(seed(key))
    }

    /// Current state, e.g. to fork a reproducible stream.
    #[inline]
    pub fn state(&self) -> u32 {
        self.state
    }

    /// Advance the state and return it.
    #[inline]
    pub fn step(&mut self) -> u32 {
        let mut s = self.state;
        s ^= s << 13;
        s ^= s >> 17;
        s ^= s << 5;
        self.state = s;
        s
    }

    /// Uniform float in [0, 1).
    #[inline]
    pub fn next_f32(&mut self) -> f32 {
        (self.step() >> 8) as f32 * UNIT_SCALE
    }

    /// Uniform point inside the unit ball (length <= 1).
    pub fn random_in_sphere(&mut self) -> Vec3 {
        loop {
            let v = self.signed_cube_sample();
            if v.length_squared() <= 1.0 {
                return v;
            }
        }
    }

    /// Uniform direction on the unit sphere.
    pub fn random_unit_vector(&mut self) -> Vec3 {
        loop {
            let v = self.signed_cube_sample();
            let length_sq = v.length_squared();
            if length_sq > 0.0 && length_sq <= 1.0 {
                return v / length_sq.sqrt();
            }
        }
    }

    /// Uniform point in the cube [-1, 1)^3.
    #[inline]
    fn signed_cube_sample(&mut self) -> Vec3 {
        Vec3::new(
            self.next_f32() * 2.0 - 1.0,
            self.next_f32() * 2.0 - 1.0,
            self.next_f32() * 2.0 - 1.0,
        )
    }
}

impl Default for XorShift32 {
    fn default() -> Self {
        Self::new(ZERO_STATE_FALLBACK)
    }
}

impl RngCore for XorShift32 {
    fn next_u32(&mut self) -> u32 {
        self.step()
    }

    fn next_u64(&mut self) -> u64 {
        let lo = self.step() as u64;
        let hi = self.step() as u64;
        (hi << 32) | lo
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        for chunk in dest.chunks_mut(4) {
            let bytes = self.step().to_le_bytes();
            chunk.copy_from_slice(&bytes[..chunk.len()]);
        }
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}
