use embassy_time::Duration;

use super::{Effect, Frame, LedState, is_active};
use crate::time::Timestamp;

/// Blink the two indicator LEDs in anti-phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AlternateLeds {
    /// Full on/off cycles per second
    pub frequency: u32,
}

impl AlternateLeds {
    pub const fn new(frequency: u32) -> Self {
        Self { frequency }
    }

    /// Time each LED stays lit, at least 1 ms
    const fn half_period_ms(self) -> u64 {
        let half = 1000 / (2 * self.frequency as u64);
        if half == 0 { 1 } else { half }
    }
}

impl Effect for AlternateLeds {
    type Output = LedState;

    fn evaluate(
        &self,
        cycle_time: Timestamp,
        effect_start: Timestamp,
        duration: Duration,
    ) -> Frame<LedState> {
        let first_phase = if self.frequency == 0 {
            true
        } else {
            let elapsed = cycle_time.elapsed_since(effect_start).as_millis();
            (elapsed / self.half_period_ms()) % 2 == 0
        };

        Frame {
            value: LedState::new(first_phase, !first_phase),
            active: is_active(cycle_time, effect_start, duration),
        }
    }
}
