//! Holiday mode: red and green cross-fade with blinking indicators

use embassy_time::Duration;

use super::{
    Indicators, Mode, ModeFrame,
    sequence::{ColorStep, play_loop},
};
use crate::{
    Rgb,
    effect::{AlternateLeds, Effect},
    time::Timestamp,
};

const FADE_MS: u64 = 1_500;
const BLINK_HZ: u32 = 2;

const RED: Rgb = Rgb { r: 255, g: 0, b: 0 };
const GREEN: Rgb = Rgb { r: 0, g: 255, b: 0 };

const STEPS: [ColorStep; 2] = [
    ColorStep::fade(RED, GREEN, FADE_MS),
    ColorStep::fade(GREEN, RED, FADE_MS),
];

#[derive(Debug, Clone, Copy, Default)]
pub struct ChristmasMode;

impl Mode for ChristmasMode {
    fn render(&self, cycle_time: Timestamp, mode_start: Timestamp) -> ModeFrame {
        let leds = AlternateLeds::new(BLINK_HZ).evaluate(cycle_time, mode_start, Duration::MAX);

        ModeFrame {
            color: play_loop(&STEPS, cycle_time, mode_start),
            indicators: Indicators::State(leds.value),
            active: true,
        }
    }
}
