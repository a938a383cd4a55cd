#![no_std]

pub mod button;
pub mod channel;
pub mod config;
pub mod controller;
pub mod effect;
pub mod filter;
pub mod gamma;
pub mod math8;
pub mod mode;
pub mod scheduler;
pub mod state;
pub mod time;

pub use button::{ButtonClassifier, ButtonEvent, ButtonEvents, Gesture, PressHistory};
pub use channel::{ButtonSample, SampleChannel, SampleReceiver, SampleSender};
pub use config::{
    ButtonConfig, ButtonPolarity, LightConfig, LimiterConfig, ModeConfig, OffGesture,
    RapidPressConfig, WakePolicy,
};
pub use controller::{LightController, TickResult};
pub use effect::{AlternateLeds, ColorShift, Effect, Frame, LedState, PulseLeds};
pub use filter::OutputLimiter;
pub use mode::{LAST_MODE, ModeId, ModeRunner};
pub use scheduler::TickScheduler;
pub use state::{ModeState, ModeStateMachine, Transition};
pub use time::Timestamp;

pub use embassy_time::{Duration, Instant};

pub type Rgb = smart_leds::RGB8;

/// Indicator brightness at or above which an on/off LED is lit
pub const LED_LEVEL_THRESHOLD: u8 = 128;

/// Hardware output sink
///
/// Implement this trait on top of the board's PWM and GPIO drivers.
/// The controller is generic over it.
pub trait LightOutput {
    /// Drive the RGB channels
    ///
    /// `check_levels` asks the sink to apply its own safety clamp. It is only
    /// `false` when the caller already guarantees the bounds, e.g. when
    /// forcing the light off.
    fn set_color(&mut self, color: Rgb, check_levels: bool);

    /// Switch the two indicator LEDs
    fn set_led_state(&mut self, led1_on: bool, led2_on: bool);

    /// Drive both indicator LEDs at a brightness level
    ///
    /// Sinks without PWM on the indicators fall back to on/off.
    fn set_led_level(&mut self, level: u8) {
        let on = level >= LED_LEVEL_THRESHOLD;
        self.set_led_state(on, on);
    }
}
