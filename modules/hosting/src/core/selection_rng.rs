//! Seeded pseudo-random source for candidate selection.

use portable_atomic::{AtomicU64, Ordering};


/// Pseudo-random index source used to spread placements across candidates.
///
/// Mixes a monotonic draw counter with a fixed seed through one LCG step.
/// Deterministic for a given seed and draw sequence; uniform enough for
/// load spreading.
#[derive(Debug)]
pub struct SelectionRng {
  seed:    u64,
  counter: AtomicU64,
}

impl SelectionRng {
  /// Creates a source with the given seed.
  #[must_use]
  pub const fn new(seed: u64) -> Self {
    Self { seed, counter: AtomicU64::new(0) }
  }

  /// Returns a pseudo-random index in `0..len`.
  ///
  /// `len` must be non-zero.
  #[must_use]
  pub fn next_index(&self, len: usize) -> usize {
    let mixed = self.counter.fetch_add(1, Ordering::Relaxed) ^ self.seed;
    (Self::mix(mixed) as usize) % len
  }

  /// Returns true with roughly `percent` in 100 odds.
  #[must_use]
  pub fn roll_percent(&self, percent: u8) -> bool {
    self.next_index(100) < percent as usize
  }

  const fn mix(value: u64) -> u64 {
    value.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407)
  }
}
