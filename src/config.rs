//! Build-time configuration
//!
//! All tunables of the light are fixed when the firmware is built and handed
//! to the components at construction. The constants below are the shipped
//! values; the structs exist so tests and alternative boards can inject
//! their own.

use embassy_time::Duration;

/// Lowest "on" value for a channel. Never used to turn a channel off.
pub const MIN_BRIGHTNESS: u8 = 2;
/// Highest value a channel may be driven at
pub const MAX_BRIGHTNESS: u8 = 255;
/// Maximum summed gamma-corrected output across the three channels
pub const MAX_LED_OUTPUT: u16 = 440;

/// Window in which the start presses must happen
pub const MILLIS_TO_START: u64 = 1500;
/// Rapid presses needed to turn the light on
pub const PRESSES_TO_START: u8 = 3;
/// Button presses are ignored for this long after the light turns on
pub const START_COOLDOWN_MILLIS: u64 = 500;

/// Window in which the off presses must happen
pub const MILLIS_TO_OFF: u64 = 1000;
/// Rapid presses needed to turn the light off
pub const PRESSES_TO_OFF: u8 = 4;

/// A level change must hold this long to count
pub const DEBOUNCE_MILLIS: u64 = 50;
/// Presses at least this long are long presses
pub const DEBOUNCE_MILLIS_LONG_PRESS: u64 = 500;

/// Turn off automatically after 1.5 hours without interaction
pub const AUTO_OFF_MILLIS: u64 = 90 * 60 * 1000;

/// How long the wake indication runs before giving up
pub const WAKE_MILLIS: u64 = 5000;

/// Electrical polarity of the push button
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonPolarity {
    /// Pressed pulls the line low
    ActiveLow,
    /// Pressed pulls the line high
    ActiveHigh,
}

impl ButtonPolarity {
    /// Translate a raw line level into "is pressed"
    pub const fn is_pressed(self, level_high: bool) -> bool {
        match self {
            Self::ActiveLow => !level_high,
            Self::ActiveHigh => level_high,
        }
    }
}

/// Gesture that turns a running light off
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OffGesture {
    /// A single long press
    LongPress,
    /// The rapid off sequence (requires [`ButtonConfig::off`])
    RapidPress,
    /// Whichever of the two comes first
    Either,
}

/// What happens when the device is woken from sleep
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WakePolicy {
    /// Any button activity confirms and starts the first mode,
    /// otherwise the light goes back off once the wake indication ends.
    RequirePress,
    /// Resume the last regular mode once the wake indication ends.
    AutoResume,
}

/// Output power limits
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LimiterConfig {
    pub min_brightness: u8,
    pub max_brightness: u8,
    pub max_output: u16,
}

impl LimiterConfig {
    pub const DEFAULT: Self = Self {
        min_brightness: MIN_BRIGHTNESS,
        max_brightness: MAX_BRIGHTNESS,
        max_output: MAX_LED_OUTPUT,
    };
}

impl Default for LimiterConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Rapid press sequence: `presses` presses inside `window`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RapidPressConfig {
    pub presses: u8,
    pub window: Duration,
}

impl RapidPressConfig {
    pub const START: Self = Self {
        presses: PRESSES_TO_START,
        window: Duration::from_millis(MILLIS_TO_START),
    };

    pub const OFF: Self = Self {
        presses: PRESSES_TO_OFF,
        window: Duration::from_millis(MILLIS_TO_OFF),
    };
}

/// Button timing and gesture configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ButtonConfig {
    pub polarity: ButtonPolarity,
    pub debounce: Duration,
    pub long_press: Duration,
    /// Sequence that turns the light on
    pub start: RapidPressConfig,
    /// Sequence that turns the light off, `None` when the feature is disabled
    pub off: Option<RapidPressConfig>,
}

impl ButtonConfig {
    pub const DEFAULT: Self = Self {
        polarity: ButtonPolarity::ActiveLow,
        debounce: Duration::from_millis(DEBOUNCE_MILLIS),
        long_press: Duration::from_millis(DEBOUNCE_MILLIS_LONG_PRESS),
        start: RapidPressConfig::START,
        off: None,
    };
}

impl Default for ButtonConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Mode state machine configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModeConfig {
    pub start_cooldown: Duration,
    pub auto_off: Duration,
    pub off_gesture: OffGesture,
    pub wake_policy: WakePolicy,
    pub wake_duration: Duration,
}

impl ModeConfig {
    pub const DEFAULT: Self = Self {
        start_cooldown: Duration::from_millis(START_COOLDOWN_MILLIS),
        auto_off: Duration::from_millis(AUTO_OFF_MILLIS),
        off_gesture: OffGesture::LongPress,
        wake_policy: WakePolicy::RequirePress,
        wake_duration: Duration::from_millis(WAKE_MILLIS),
    };
}

impl Default for ModeConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Complete light configuration
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LightConfig {
    pub limiter: LimiterConfig,
    pub button: ButtonConfig,
    pub modes: ModeConfig,
}

impl LightConfig {
    pub const DEFAULT: Self = Self {
        limiter: LimiterConfig::DEFAULT,
        button: ButtonConfig::DEFAULT,
        modes: ModeConfig::DEFAULT,
    };

    /// Enable the rapid press off sequence alongside the long press
    #[must_use]
    pub const fn with_rapid_press_off(mut self) -> Self {
        self.button.off = Some(RapidPressConfig::OFF);
        self.modes.off_gesture = OffGesture::Either;
        self
    }
}
