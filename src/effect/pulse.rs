use core::f32::consts::TAU;

use embassy_time::Duration;

use super::{Effect, Frame, is_active};
use crate::time::Timestamp;

/// Breathe both indicator LEDs between off and full brightness
///
/// The ramp is a raised cosine: 0 at the start of each period, 255 at the
/// half period and back to 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PulseLeds {
    /// Full pulses per second
    pub frequency: u32,
}

impl PulseLeds {
    pub const fn new(frequency: u32) -> Self {
        Self { frequency }
    }

    const fn period_ms(self) -> u64 {
        let period = 1000 / self.frequency as u64;
        if period == 0 { 1 } else { period }
    }
}

impl Effect for PulseLeds {
    /// Brightness of both LEDs, 0-255
    type Output = u8;

    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        clippy::cast_precision_loss
    )]
    fn evaluate(
        &self,
        cycle_time: Timestamp,
        effect_start: Timestamp,
        duration: Duration,
    ) -> Frame<u8> {
        let level = if self.frequency == 0 {
            0
        } else {
            let period = self.period_ms();
            let position = cycle_time.elapsed_since(effect_start).as_millis() % period;
            let phase = position as f32 / period as f32;
            let ramp = (1.0 - libm::cosf(TAU * phase)) * 0.5;
            libm::roundf(ramp * 255.0) as u8
        };

        Frame {
            value: level,
            active: is_active(cycle_time, effect_start, duration),
        }
    }
}
