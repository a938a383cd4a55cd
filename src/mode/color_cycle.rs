//! Slow red, green, blue cross-fade

use super::{Indicators, Mode, ModeFrame, sequence::{ColorStep, play_loop}};
use crate::{Rgb, effect::LedState, time::Timestamp};

const FADE_MS: u64 = 2_000;

const RED: Rgb = Rgb { r: 255, g: 0, b: 0 };
const GREEN: Rgb = Rgb { r: 0, g: 255, b: 0 };
const BLUE: Rgb = Rgb { r: 0, g: 0, b: 255 };

const STEPS: [ColorStep; 3] = [
    ColorStep::fade(RED, GREEN, FADE_MS),
    ColorStep::fade(GREEN, BLUE, FADE_MS),
    ColorStep::fade(BLUE, RED, FADE_MS),
];

#[derive(Debug, Clone, Copy, Default)]
pub struct ColorCycleMode;

impl Mode for ColorCycleMode {
    fn render(&self, cycle_time: Timestamp, mode_start: Timestamp) -> ModeFrame {
        ModeFrame {
            color: play_loop(&STEPS, cycle_time, mode_start),
            indicators: Indicators::State(LedState::OFF),
            active: true,
        }
    }
}
