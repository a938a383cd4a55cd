//! Wrapping millisecond timestamps
//!
//! The device clock is a 32-bit millisecond counter that overflows roughly
//! every 49.7 days. Every elapsed-time computation in the crate goes through
//! [`Timestamp::elapsed_since`], which relies on modular subtraction so that
//! `now - start` stays correct across the overflow.

use embassy_time::{Duration, Instant};

/// Point in time on the wrapping millisecond clock
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Timestamp(u32);

impl Timestamp {
    /// Start of the clock
    pub const ZERO: Self = Self(0);

    /// Create a timestamp from a raw millisecond counter value
    pub const fn from_millis(millis: u32) -> Self {
        Self(millis)
    }

    /// Raw millisecond counter value
    pub const fn as_millis(self) -> u32 {
        self.0
    }

    /// Time elapsed since `earlier`
    ///
    /// Correct across counter overflow as long as the real span is shorter
    /// than one full counter period.
    pub const fn elapsed_since(self, earlier: Self) -> Duration {
        Duration::from_millis(self.0.wrapping_sub(earlier.0) as u64)
    }

    /// Timestamp `duration` after this one, wrapping on overflow
    #[allow(clippy::cast_possible_truncation)]
    pub const fn wrapping_add(self, duration: Duration) -> Self {
        Self(self.0.wrapping_add(duration.as_millis() as u32))
    }

    /// Timestamp `duration` before this one, wrapping on underflow
    #[allow(clippy::cast_possible_truncation)]
    pub const fn wrapping_sub(self, duration: Duration) -> Self {
        Self(self.0.wrapping_sub(duration.as_millis() as u32))
    }

    /// Returns `true` once this timestamp is at or past `deadline`
    ///
    /// Valid for deadlines less than 2^31 ms away in either direction.
    #[allow(clippy::cast_possible_wrap)]
    pub const fn has_reached(self, deadline: Self) -> bool {
        self.0.wrapping_sub(deadline.0) as i32 >= 0
    }

    /// This timestamp, or `limit` if this one lies after it
    pub const fn not_after(self, limit: Self) -> Self {
        if limit.has_reached(self) { self } else { limit }
    }
}

impl From<Instant> for Timestamp {
    /// Keeps the low 32 bits of the instant's millisecond count
    #[allow(clippy::cast_possible_truncation)]
    fn from(instant: Instant) -> Self {
        Self(instant.as_millis() as u32)
    }
}
