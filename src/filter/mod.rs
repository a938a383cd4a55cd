use crate::Rgb;
use crate::config::LimiterConfig;
use crate::gamma;

mod limiter;

pub use limiter::OutputLimiter;

pub(crate) trait Filter {
    /// Apply the filter to a single color
    fn apply(&self, color: Rgb) -> Rgb;
}

/// Gamma correction as the last stage of the output chain
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct GammaCorrection;

impl Filter for GammaCorrection {
    fn apply(&self, color: Rgb) -> Rgb {
        gamma::correct_rgb(color)
    }
}

/// Filter processor - turns an effect color into a hardware color
///
/// Limiting happens in linear space, gamma correction afterwards, so the
/// power budget is checked against what the LEDs will actually draw.
#[derive(Debug, Clone, Copy)]
pub(crate) struct FilterProcessor {
    pub(crate) limiter: OutputLimiter,
    pub(crate) gamma: GammaCorrection,
}

impl FilterProcessor {
    pub(crate) const fn new(config: LimiterConfig) -> Self {
        Self {
            limiter: OutputLimiter::new(config),
            gamma: GammaCorrection,
        }
    }

    /// Run the full output chain
    pub(crate) fn apply(&self, color: Rgb) -> Rgb {
        let limited = self.limiter.apply(color);
        self.gamma.apply(limited)
    }
}
