/*
[INPUT]:  Wall clock
[OUTPUT]: Unix timestamps (seconds) for request envelopes
[POS]:    Auth layer - time source mixed into each signature
[UPDATE]: When the gateway changes timestamp precision
*/

use chrono::Utc;

/// Time source for envelope timestamps
pub trait Clock: Send + Sync {
    /// Seconds since the Unix epoch
    fn unix_timestamp(&self) -> i64;
}

/// Reads the system clock
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn unix_timestamp(&self) -> i64 {
        Utc::now().timestamp()
    }
}

/// Always returns the same instant
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub i64);

impl Clock for FixedClock {
    fn unix_timestamp(&self) -> i64 {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_system_clock_is_seconds() {
        let now = SystemClock.unix_timestamp();
        // after 2023-11-14 and before 2100
        assert!(now > 1_700_000_000);
        assert!(now < 4_102_444_800);
    }

    #[test]
    fn test_fixed_clock() {
        assert_eq!(FixedClock(1_700_000_000).unix_timestamp(), 1_700_000_000);
    }
}
