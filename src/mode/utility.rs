//! Utility modes
//!
//! These are never reached by cycling through modes. They show a fixed
//! pattern and then report inactive so the state machine can move on.

use embassy_time::Duration;

use super::{Indicators, Mode, ModeFrame};
use crate::{
    Rgb,
    effect::{Effect, LedState, PulseLeds},
    time::Timestamp,
};

const WAKE_PULSE: PulseLeds = PulseLeds::new(2);

/// Wake indication: RGB dark, indicators pulsing
#[derive(Debug, Clone, Copy)]
pub struct WakeMode {
    duration: Duration,
}

impl WakeMode {
    pub const fn new(duration: Duration) -> Self {
        Self { duration }
    }
}

impl Mode for WakeMode {
    fn render(&self, cycle_time: Timestamp, mode_start: Timestamp) -> ModeFrame {
        let pulse = WAKE_PULSE.evaluate(cycle_time, mode_start, self.duration);
        ModeFrame {
            color: Rgb::default(),
            indicators: Indicators::Level(pulse.value),
            active: pulse.active,
        }
    }
}

const TEST_STEP_MS: u64 = 500;

const TEST_PATTERN: [(Rgb, LedState); 6] = [
    (Rgb { r: 255, g: 0, b: 0 }, LedState::OFF),
    (Rgb { r: 0, g: 255, b: 0 }, LedState::OFF),
    (Rgb { r: 0, g: 0, b: 255 }, LedState::OFF),
    (Rgb { r: 255, g: 255, b: 255 }, LedState::OFF),
    (Rgb { r: 0, g: 0, b: 0 }, LedState::new(true, false)),
    (Rgb { r: 0, g: 0, b: 0 }, LedState::new(false, true)),
];

/// Diagnostic sequence: each channel, white, then each indicator
#[derive(Debug, Clone, Copy, Default)]
pub struct TestMode;

impl Mode for TestMode {
    #[allow(clippy::cast_possible_truncation)]
    fn render(&self, cycle_time: Timestamp, mode_start: Timestamp) -> ModeFrame {
        let step = cycle_time.elapsed_since(mode_start).as_millis() / TEST_STEP_MS;
        match TEST_PATTERN.get(step as usize) {
            Some(&(color, leds)) => ModeFrame {
                color,
                indicators: Indicators::State(leds),
                active: true,
            },
            None => ModeFrame::dark(),
        }
    }
}
