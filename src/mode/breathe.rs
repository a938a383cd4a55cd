//! Breathing teal light
//!
//! The RGB color and both indicators follow the same slow pulse.

use embassy_time::Duration;

use super::{Indicators, Mode, ModeFrame};
use crate::{
    Rgb,
    effect::{Effect, PulseLeds},
    math8::scale8,
    time::Timestamp,
};

const COLOR: Rgb = Rgb {
    r: 0,
    g: 180,
    b: 160,
};

const PULSE: PulseLeds = PulseLeds::new(1);

#[derive(Debug, Clone, Copy, Default)]
pub struct BreatheMode;

impl Mode for BreatheMode {
    fn render(&self, cycle_time: Timestamp, mode_start: Timestamp) -> ModeFrame {
        let level = PULSE.evaluate(cycle_time, mode_start, Duration::MAX).value;

        ModeFrame {
            color: Rgb {
                r: scale8(COLOR.r, level),
                g: scale8(COLOR.g, level),
                b: scale8(COLOR.b, level),
            },
            indicators: Indicators::Level(level),
            active: true,
        }
    }
}
