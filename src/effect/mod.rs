//! Time-driven effects
//!
//! Every effect is a pure function of the current cycle time, the time the
//! effect started and how long it is supposed to run. Effects hold only their
//! parameters, never state, so the same call always yields the same frame.

mod alternate;
mod color_shift;
mod pulse;

use embassy_time::Duration;

pub use alternate::AlternateLeds;
pub use color_shift::ColorShift;
pub use pulse::PulseLeds;

use crate::time::Timestamp;

/// On/off state of the two auxiliary indicator LEDs
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LedState {
    pub led1: bool,
    pub led2: bool,
}

impl LedState {
    pub const OFF: Self = Self {
        led1: false,
        led2: false,
    };

    pub const BOTH: Self = Self {
        led1: true,
        led2: true,
    };

    pub const fn new(led1: bool, led2: bool) -> Self {
        Self { led1, led2 }
    }
}

/// Output of one effect evaluation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Frame<T> {
    /// What the effect wants displayed right now
    pub value: T,
    /// `false` once the effect's duration has run out
    pub active: bool,
}

pub trait Effect {
    type Output;

    /// Evaluate the effect at `cycle_time`
    fn evaluate(
        &self,
        cycle_time: Timestamp,
        effect_start: Timestamp,
        duration: Duration,
    ) -> Frame<Self::Output>;
}

/// Whether an effect that started at `effect_start` is still running
///
/// Zero-length effects are expired from the start.
#[inline]
pub(crate) fn is_active(
    cycle_time: Timestamp,
    effect_start: Timestamp,
    duration: Duration,
) -> bool {
    cycle_time.elapsed_since(effect_start) < duration
}
