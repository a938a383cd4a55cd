//! Push-button debouncing and gesture classification
//!
//! The classifier is fed one raw sample per tick. A level change only counts
//! once it has held for the debounce time; anything shorter is bounce and is
//! dropped without an event. Confirmed presses are classified as short or
//! long on release, and short presses feed the rapid-sequence detector.
//!
//! Only one rapid sequence is armed at a time, and it owns the single press
//! history. The driver arms the start gesture while the light is off and the
//! off gesture while it is on, so a press can never count towards both.

use embassy_time::Duration;
use heapless::{Deque, Vec};

#[cfg(feature = "esp32-log")]
use esp_println::println;

use crate::{
    config::{ButtonConfig, ButtonPolarity, RapidPressConfig},
    time::Timestamp,
};

/// Most press timestamps a history keeps
pub const PRESS_HISTORY_SIZE: usize = 8;

/// Which rapid sequence completed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gesture {
    Start,
    Off,
}

/// Logical button event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonEvent {
    /// Debounced press
    Pressed,
    /// Debounced release
    Released,
    /// Released before the long press threshold
    ShortPress,
    /// Released at or after the long press threshold
    LongPress,
    /// `count` short presses landed inside the gesture's window
    RapidSequenceComplete { gesture: Gesture, count: u8 },
}

/// Events produced by a single sample
pub type ButtonEvents = Vec<ButtonEvent, 4>;

/// Bounded, time ordered list of recent press timestamps
#[derive(Debug, Clone, Default)]
pub struct PressHistory {
    presses: Deque<Timestamp, PRESS_HISTORY_SIZE>,
}

impl PressHistory {
    pub const fn new() -> Self {
        Self {
            presses: Deque::new(),
        }
    }

    /// Append a press, dropping the oldest one when full
    pub fn push(&mut self, at: Timestamp) {
        if self.presses.is_full() {
            self.presses.pop_front();
        }
        let _ = self.presses.push_back(at);
    }

    /// Drop presses more than `window` before `now`
    pub fn evict_older_than(&mut self, now: Timestamp, window: Duration) {
        while let Some(&oldest) = self.presses.front() {
            if now.elapsed_since(oldest) <= window {
                break;
            }
            self.presses.pop_front();
        }
    }

    pub fn clear(&mut self) {
        self.presses.clear();
    }

    pub fn len(&self) -> usize {
        self.presses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.presses.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Timestamp> {
        self.presses.iter()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DebounceState {
    /// No sample seen yet
    Idle,
    /// Level changed, waiting for it to hold
    Debouncing {
        candidate: bool,
        since: Timestamp,
        stable: bool,
        stable_since: Timestamp,
    },
    /// Level confirmed
    Stable { pressed: bool, since: Timestamp },
}

/// Turns raw button samples into [`ButtonEvent`]s
#[derive(Debug, Clone)]
pub struct ButtonClassifier {
    polarity: ButtonPolarity,
    debounce: Duration,
    long_press: Duration,
    state: DebounceState,
    start: RapidPressConfig,
    off: Option<RapidPressConfig>,
    armed: Gesture,
    history: PressHistory,
}

impl Default for ButtonClassifier {
    fn default() -> Self {
        Self::new(&ButtonConfig::DEFAULT)
    }
}

impl ButtonClassifier {
    pub const fn new(config: &ButtonConfig) -> Self {
        Self {
            polarity: config.polarity,
            debounce: config.debounce,
            long_press: config.long_press,
            state: DebounceState::Idle,
            start: config.start,
            off: config.off,
            armed: Gesture::Start,
            history: PressHistory::new(),
        }
    }

    /// Feed a raw line level
    pub fn sample(&mut self, level_high: bool, now: Timestamp) -> ButtonEvents {
        self.update(self.polarity.is_pressed(level_high), now)
    }

    /// Feed a polarity-corrected button state
    pub fn update(&mut self, pressed: bool, now: Timestamp) -> ButtonEvents {
        let mut events = ButtonEvents::new();

        match self.state {
            DebounceState::Idle => {
                self.state = if pressed {
                    DebounceState::Debouncing {
                        candidate: true,
                        since: now,
                        stable: false,
                        stable_since: now,
                    }
                } else {
                    DebounceState::Stable {
                        pressed: false,
                        since: now,
                    }
                };
            }
            DebounceState::Stable {
                pressed: stable,
                since,
            } => {
                if pressed != stable {
                    self.state = DebounceState::Debouncing {
                        candidate: pressed,
                        since: now,
                        stable,
                        stable_since: since,
                    };
                }
            }
            DebounceState::Debouncing {
                candidate,
                since,
                stable,
                stable_since,
            } => {
                if pressed != candidate {
                    // Bounced back before settling
                    self.state = DebounceState::Stable {
                        pressed: stable,
                        since: stable_since,
                    };
                } else if now.elapsed_since(since) >= self.debounce {
                    self.state = DebounceState::Stable {
                        pressed: candidate,
                        since,
                    };
                    if candidate {
                        let _ = events.push(ButtonEvent::Pressed);
                    } else {
                        self.released(stable_since, since, &mut events);
                    }
                }
            }
        }

        events
    }

    /// Forget any partially entered rapid sequence
    pub fn reset_sequences(&mut self) {
        self.history.clear();
    }

    /// Select which rapid sequence short presses count towards
    ///
    /// Switching gestures drops the presses collected for the old one.
    pub fn arm(&mut self, gesture: Gesture) {
        if self.armed != gesture {
            self.armed = gesture;
            self.history.clear();
        }
    }

    pub const fn armed(&self) -> Gesture {
        self.armed
    }

    /// Whether the button is currently held, as far as debouncing knows
    pub const fn is_pressed(&self) -> bool {
        matches!(self.state, DebounceState::Stable { pressed: true, .. })
            || matches!(self.state, DebounceState::Debouncing { stable: true, .. })
    }

    fn released(
        &mut self,
        pressed_at: Timestamp,
        released_at: Timestamp,
        events: &mut ButtonEvents,
    ) {
        let _ = events.push(ButtonEvent::Released);

        if released_at.elapsed_since(pressed_at) >= self.long_press {
            #[cfg(feature = "esp32-log")]
            println!("[ButtonClassifier] long press at {}", released_at.as_millis());
            self.reset_sequences();
            let _ = events.push(ButtonEvent::LongPress);
            return;
        }

        let _ = events.push(ButtonEvent::ShortPress);

        if let Some(event) = self.record(pressed_at) {
            let _ = events.push(event);
        }
    }

    /// Record a short press against the armed sequence
    ///
    /// A completed sequence consumes the history, so overlapping windows
    /// cannot fire twice.
    fn record(&mut self, at: Timestamp) -> Option<ButtonEvent> {
        let gesture = self.armed;
        let config = match gesture {
            Gesture::Start => self.start,
            Gesture::Off => self.off?,
        };

        self.history.push(at);
        self.history.evict_older_than(at, config.window);

        let needed = usize::from(config.presses).clamp(1, PRESS_HISTORY_SIZE);
        if self.history.len() < needed {
            return None;
        }
        self.history.clear();

        #[cfg(feature = "esp32-log")]
        println!("[ButtonClassifier] rapid sequence {:?} x{}", gesture, config.presses);
        Some(ButtonEvent::RapidSequenceComplete {
            gesture,
            count: config.presses,
        })
    }
}
