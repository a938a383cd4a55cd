//! Linear cross-fade between two colors

use embassy_time::Duration;

use super::{Effect, Frame, is_active};
use crate::{Rgb, math8::lerp8, time::Timestamp};

/// Fade from `start` to `target` over the effect duration
///
/// A zero duration jumps directly to `target` and reports inactive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorShift {
    pub start: Rgb,
    pub target: Rgb,
}

impl ColorShift {
    pub const fn new(start: Rgb, target: Rgb) -> Self {
        Self { start, target }
    }

    /// Hold a single color for the effect duration
    pub const fn hold(color: Rgb) -> Self {
        Self::new(color, color)
    }
}

impl Effect for ColorShift {
    type Output = Rgb;

    fn evaluate(
        &self,
        cycle_time: Timestamp,
        effect_start: Timestamp,
        duration: Duration,
    ) -> Frame<Rgb> {
        let elapsed = cycle_time.elapsed_since(effect_start).as_millis();
        let total = duration.as_millis();

        Frame {
            value: Rgb {
                r: lerp8(self.start.r, self.target.r, elapsed, total),
                g: lerp8(self.start.g, self.target.g, elapsed, total),
                b: lerp8(self.start.b, self.target.b, elapsed, total),
            },
            active: is_active(cycle_time, effect_start, duration),
        }
    }
}
