//! Mode system with compile-time known mode variants
//!
//! Every mode is a fixed composition of effects. Modes are stored in an enum
//! so dispatch is an exhaustive match instead of a table of callbacks.

mod breathe;
mod christmas;
mod color_cycle;
mod sequence;
mod utility;

pub use breathe::BreatheMode;
pub use christmas::ChristmasMode;
pub use color_cycle::ColorCycleMode;
pub use utility::{TestMode, WakeMode};

use embassy_time::Duration;

#[cfg(feature = "esp32-log")]
use esp_println::println;

use crate::{
    LightOutput, Rgb,
    config::LightConfig,
    effect::LedState,
    filter::FilterProcessor,
    state::ModeState,
    time::Timestamp,
};

const MODE_NAME_OFF: &str = "off";
const MODE_NAME_COLOR_CYCLE: &str = "color_cycle";
const MODE_NAME_BREATHE: &str = "breathe";
const MODE_NAME_CHRISTMAS: &str = "christmas";
const MODE_NAME_WAKE: &str = "wake";
const MODE_NAME_TEST: &str = "test";

/// Turns off the light. Must be 0.
pub const MODE_UTILITY_OFF: u8 = 0;
const MODE_ID_COLOR_CYCLE: u8 = 1;
const MODE_ID_BREATHE: u8 = 2;
const MODE_ID_CHRISTMAS: u8 = 3;
/// Woken from sleep, waiting to see whether the user means it
pub const MODE_UTILITY_WAKE: u8 = 10;
/// Generic test mode
pub const MODE_UTILITY_TEST: u8 = 11;

/// Number of regular modes, not counting off
pub const MODE_COUNT: u8 = 3;
/// Id of the last regular mode
pub const LAST_MODE: u8 = MODE_COUNT;

/// What the indicator LEDs should show
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Indicators {
    /// Independent on/off
    State(LedState),
    /// Both at one brightness
    Level(u8),
}

/// Everything a mode wants displayed on one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModeFrame {
    pub color: Rgb,
    pub indicators: Indicators,
    pub active: bool,
}

impl ModeFrame {
    /// All outputs off, mode finished
    pub const fn dark() -> Self {
        Self {
            color: Rgb { r: 0, g: 0, b: 0 },
            indicators: Indicators::State(LedState::OFF),
            active: false,
        }
    }
}

pub trait Mode {
    /// Compose the frame for `cycle_time`, the mode having started at `mode_start`
    fn render(&self, cycle_time: Timestamp, mode_start: Timestamp) -> ModeFrame;
}

/// Known mode ids.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum ModeId {
    #[default]
    Off = MODE_UTILITY_OFF,
    ColorCycle = MODE_ID_COLOR_CYCLE,
    Breathe = MODE_ID_BREATHE,
    Christmas = MODE_ID_CHRISTMAS,
    Wake = MODE_UTILITY_WAKE,
    Test = MODE_UTILITY_TEST,
}

impl ModeId {
    /// First regular mode, entered by the start gesture
    pub const FIRST: Self = Self::ColorCycle;

    /// Known id for `value`, `None` for anything else
    ///
    /// [`ModeRunner::run_raw`] runs unknown ids as [`ModeId::Off`].
    pub const fn from_raw(value: u8) -> Option<Self> {
        Some(match value {
            MODE_UTILITY_OFF => Self::Off,
            MODE_ID_COLOR_CYCLE => Self::ColorCycle,
            MODE_ID_BREATHE => Self::Breathe,
            MODE_ID_CHRISTMAS => Self::Christmas,
            MODE_UTILITY_WAKE => Self::Wake,
            MODE_UTILITY_TEST => Self::Test,
            _ => return None,
        })
    }

    pub const fn as_raw(self) -> u8 {
        self as u8
    }

    /// Regular modes are the ones reachable by pressing the button
    pub const fn is_regular(self) -> bool {
        let raw = self.as_raw();
        raw >= 1 && raw <= LAST_MODE
    }

    /// The regular mode after this one, wrapping from the last back to the first
    ///
    /// Anything that is not a regular mode starts the cycle over.
    pub const fn next_regular(self) -> Self {
        if !self.is_regular() {
            return Self::FIRST;
        }
        let next = self.as_raw() % LAST_MODE + 1;
        match Self::from_raw(next) {
            Some(mode) => mode,
            None => Self::FIRST,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Off => MODE_NAME_OFF,
            Self::ColorCycle => MODE_NAME_COLOR_CYCLE,
            Self::Breathe => MODE_NAME_BREATHE,
            Self::Christmas => MODE_NAME_CHRISTMAS,
            Self::Wake => MODE_NAME_WAKE,
            Self::Test => MODE_NAME_TEST,
        }
    }

    pub fn parse_from_str(s: &str) -> Option<Self> {
        match s {
            MODE_NAME_OFF => Some(Self::Off),
            MODE_NAME_COLOR_CYCLE => Some(Self::ColorCycle),
            MODE_NAME_BREATHE => Some(Self::Breathe),
            MODE_NAME_CHRISTMAS => Some(Self::Christmas),
            MODE_NAME_WAKE => Some(Self::Wake),
            MODE_NAME_TEST => Some(Self::Test),
            _ => None,
        }
    }

    /// Bind the mode to its effect composition
    pub const fn to_slot(self, wake_duration: Duration) -> ModeSlot {
        match self {
            Self::Off => ModeSlot::Off,
            Self::ColorCycle => ModeSlot::ColorCycle(ColorCycleMode),
            Self::Breathe => ModeSlot::Breathe(BreatheMode),
            Self::Christmas => ModeSlot::Christmas(ChristmasMode),
            Self::Wake => ModeSlot::Wake(WakeMode::new(wake_duration)),
            Self::Test => ModeSlot::Test(TestMode),
        }
    }
}

/// Mode slot - enum containing all possible modes
#[derive(Debug, Clone, Copy)]
pub enum ModeSlot {
    Off,
    ColorCycle(ColorCycleMode),
    Breathe(BreatheMode),
    Christmas(ChristmasMode),
    Wake(WakeMode),
    Test(TestMode),
}

impl ModeSlot {
    /// Render the current mode
    pub fn render(&self, cycle_time: Timestamp, mode_start: Timestamp) -> ModeFrame {
        match self {
            Self::Off => ModeFrame::dark(),
            Self::ColorCycle(mode) => mode.render(cycle_time, mode_start),
            Self::Breathe(mode) => mode.render(cycle_time, mode_start),
            Self::Christmas(mode) => mode.render(cycle_time, mode_start),
            Self::Wake(mode) => mode.render(cycle_time, mode_start),
            Self::Test(mode) => mode.render(cycle_time, mode_start),
        }
    }

    pub const fn id(&self) -> ModeId {
        match self {
            Self::Off => ModeId::Off,
            Self::ColorCycle(_) => ModeId::ColorCycle,
            Self::Breathe(_) => ModeId::Breathe,
            Self::Christmas(_) => ModeId::Christmas,
            Self::Wake(_) => ModeId::Wake,
            Self::Test(_) => ModeId::Test,
        }
    }
}

/// Runs the active mode and pushes the result to the hardware
#[derive(Debug, Clone, Copy)]
pub struct ModeRunner {
    filters: FilterProcessor,
    wake_duration: Duration,
}

impl Default for ModeRunner {
    fn default() -> Self {
        Self::new(&LightConfig::DEFAULT)
    }
}

impl ModeRunner {
    pub const fn new(config: &LightConfig) -> Self {
        Self {
            filters: FilterProcessor::new(config.limiter),
            wake_duration: config.modes.wake_duration,
        }
    }

    /// Render `mode` at `cycle_time` and write it to `output`
    ///
    /// Returns whether the mode is still active. Off always reports inactive.
    pub fn run<O: LightOutput>(
        &self,
        mode: ModeId,
        cycle_time: Timestamp,
        state: &ModeState,
        output: &mut O,
    ) -> bool {
        let slot = mode.to_slot(self.wake_duration);
        if let ModeSlot::Off = slot {
            output.set_color(Rgb::default(), false);
            output.set_led_state(false, false);
            return false;
        }

        let frame = slot.render(cycle_time, state.effect_start);
        output.set_color(self.filters.apply(frame.color), true);
        match frame.indicators {
            Indicators::State(leds) => output.set_led_state(leds.led1, leds.led2),
            Indicators::Level(level) => output.set_led_level(level),
        }

        #[cfg(feature = "esp32-log")]
        if !frame.active {
            println!("[ModeRunner.run] mode {} finished", mode.as_str());
        }

        frame.active
    }

    /// Run a raw mode id; anything unknown runs as off
    pub fn run_raw<O: LightOutput>(
        &self,
        mode: u8,
        cycle_time: Timestamp,
        state: &ModeState,
        output: &mut O,
    ) -> bool {
        let mode = ModeId::from_raw(mode).unwrap_or(ModeId::Off);
        self.run(mode, cycle_time, state, output)
    }

    /// Color the hardware would receive for `color`
    pub fn output_color(&self, color: Rgb) -> Rgb {
        self.filters.apply(color)
    }
}
