//! Deterministic RNG helpers.
//!
//! Small and dependency-free so games replay bit-for-bit from a seed. **Not** cryptographic.

pub trait DeterministicRng {
    fn next_u64(&mut self) -> u64;

    /// Uniform-ish value in `0..bound`. Returns 0 for an empty range.
    fn next_below(&mut self, bound: u64) -> u64 {
        if bound == 0 {
            return 0;
        }
        // Multiply-shift keeps the top bits, which are the well-mixed ones.
        ((self.next_u64() as u128 * bound as u128) >> 64) as u64
    }

    fn choose<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T> {
        if items.is_empty() {
            return None;
        }
        let idx = self.next_below(items.len() as u64) as usize;
        items.get(idx)
    }
}

/// SplitMix64: tiny generator, good enough for food placement and tie-breaking.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SplitMix64 {
    state: u64,
}

impl SplitMix64 {
    pub fn new(seed: u64) -> Self {
        Self { state: seed }
    }
}

impl DeterministicRng for SplitMix64 {
    fn next_u64(&mut self) -> u64 {
        self.state = self.state.wrapping_add(0x9E3779B97F4A7C15);
        mix64(self.state)
    }
}

pub fn mix64(mut x: u64) -> u64 {
    x = (x ^ (x >> 30)).wrapping_mul(0xBF58476D1CE4E5B9);
    x = (x ^ (x >> 27)).wrapping_mul(0x94D049BB133111EB);
    x ^ (x >> 31)
}

/// Seed for the `stream`-th independent sequence under `base` (e.g. one per game).
pub fn derive_seed(base: u64, stream: u64) -> u64 {
    mix64(base ^ mix64(stream.wrapping_add(0x9E3779B97F4A7C15)))
}
