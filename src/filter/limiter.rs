//! Output power limiter
//!
//! Keeps the summed, gamma-corrected channel output under the battery and
//! driver budget. Channels that are meant to be off stay off; channels that
//! are on never drop below the minimum visible brightness, even if that means
//! overshooting the budget by the (tiny) corrected value of the floor.

use super::Filter;
use crate::{Rgb, config::LimiterConfig, gamma};

/// Fixed-point 1.0 for the brightness scale
const SCALE_ONE: u32 = 1 << 16;

/// Clamp and scale colors to the configured power budget
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutputLimiter {
    min_brightness: u8,
    max_brightness: u8,
    max_output: u16,
}

impl Default for OutputLimiter {
    fn default() -> Self {
        Self::new(LimiterConfig::DEFAULT)
    }
}

impl OutputLimiter {
    pub const fn new(config: LimiterConfig) -> Self {
        Self {
            min_brightness: config.min_brightness,
            max_brightness: config.max_brightness,
            max_output: config.max_output,
        }
    }

    /// Limit a color to the brightness window and output budget
    pub fn limit(&self, color: Rgb) -> Rgb {
        let out = Rgb {
            r: self.clamp(color.r),
            g: self.clamp(color.g),
            b: self.clamp(color.b),
        };

        let total = gamma::output_of(out);
        if total <= self.max_output {
            return out;
        }

        // Every channel is monotonic in the scale, floor included, so the
        // largest scale that still fits the budget can be bisected.
        let mut low = 0;
        let mut high = SCALE_ONE - 1;
        while low < high {
            let mid = (low + high).div_ceil(2);
            if gamma::output_of(self.scaled(out, mid)) <= self.max_output {
                low = mid;
            } else {
                high = mid - 1;
            }
        }

        self.scaled(out, low)
    }

    /// Upper bound on how far a limited color may exceed `max_output`
    pub fn floor_margin(&self) -> u16 {
        3 * u16::from(gamma::correct(self.min_brightness))
    }

    fn clamp(&self, value: u8) -> u8 {
        if value == 0 {
            return 0;
        }
        value.max(self.min_brightness).min(self.max_brightness)
    }

    /// `color` scaled by `scale / SCALE_ONE`, with lit channels held at the floor
    fn scaled(&self, color: Rgb, scale: u32) -> Rgb {
        Rgb {
            r: self.scale_channel(color.r, scale),
            g: self.scale_channel(color.g, scale),
            b: self.scale_channel(color.b, scale),
        }
    }

    #[allow(clippy::cast_possible_truncation)]
    fn scale_channel(&self, value: u8, scale: u32) -> u8 {
        if value == 0 {
            return 0;
        }
        let scaled = u32::from(value) * scale / SCALE_ONE;
        (scaled as u8).max(self.min_brightness)
    }
}

impl Filter for OutputLimiter {
    fn apply(&self, color: Rgb) -> Rgb {
        self.limit(color)
    }
}
