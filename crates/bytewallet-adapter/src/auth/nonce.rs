/*
[INPUT]:  Injected random generator or counter seed
[OUTPUT]: Decimal nonce strings for request envelopes
[POS]:    Auth layer - replay-reduction values mixed into each signature
[UPDATE]: When changing nonce width or adding nonce strategies
*/

use std::ops::RangeInclusive;
use std::sync::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};

use rand::rngs::StdRng;
use rand::{Rng, RngCore, SeedableRng};

/// Inclusive bounds of the gateway's default six-digit nonce
pub const DEFAULT_NONCE_RANGE: RangeInclusive<u64> = 100_000..=999_999;

/// Source of per-request nonces.
///
/// None of the implementations guarantee uniqueness; the gateway is expected
/// to do its own replay protection.
pub trait NonceSource: Send + Sync {
    /// Produce the next nonce as a decimal string
    fn next_nonce(&self) -> String;
}

/// Uniform random nonce drawn from an owned generator
#[derive(Debug)]
pub struct RandomNonce<R = StdRng> {
    rng: Mutex<R>,
    range: RangeInclusive<u64>,
}

impl RandomNonce<StdRng> {
    /// Six-digit nonces from an entropy-seeded generator
    pub fn new() -> Self {
        Self::from_rng(StdRng::from_entropy())
    }

    /// Six-digit nonces from a fixed seed (reproducible sequences)
    pub fn seeded(seed: u64) -> Self {
        Self::from_rng(StdRng::seed_from_u64(seed))
    }
}

impl Default for RandomNonce<StdRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: RngCore> RandomNonce<R> {
    /// Six-digit nonces from a caller-supplied generator
    pub fn from_rng(rng: R) -> Self {
        Self {
            rng: Mutex::new(rng),
            range: DEFAULT_NONCE_RANGE,
        }
    }

    /// Widen or narrow the nonce space
    ///
    /// # Panics
    ///
    /// Panics if `range` is empty (`start > end`).
    pub fn with_range(mut self, range: RangeInclusive<u64>) -> Self {
        assert!(
            range.start() <= range.end(),
            "nonce range {}..={} is empty",
            range.start(),
            range.end()
        );
        self.range = range;
        self
    }

    pub fn range(&self) -> &RangeInclusive<u64> {
        &self.range
    }
}

impl<R: RngCore + Send> NonceSource for RandomNonce<R> {
    fn next_nonce(&self) -> String {
        let mut rng = self.rng.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        rng.gen_range(self.range.clone()).to_string()
    }
}

/// Monotonic counter nonce
#[derive(Debug)]
pub struct CounterNonce {
    next: AtomicU64,
}

impl CounterNonce {
    pub fn new(start: u64) -> Self {
        Self {
            next: AtomicU64::new(start),
        }
    }
}

impl Default for CounterNonce {
    fn default() -> Self {
        Self::new(*DEFAULT_NONCE_RANGE.start())
    }
}

impl NonceSource for CounterNonce {
    fn next_nonce(&self) -> String {
        self.next.fetch_add(1, Ordering::Relaxed).to_string()
    }
}
