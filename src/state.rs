//! Button-driven mode state machine
//!
//! Owns the [`ModeState`] and is its only writer. Inputs are classified
//! button events, the tick clock (for auto-off), and two external triggers:
//! wake-from-sleep and test entry. Every transition restarts the new mode's
//! effects at `now` and counts as user activity.

#[cfg(feature = "esp32-log")]
use esp_println::println;

use crate::{
    button::{ButtonEvent, Gesture},
    config::{ModeConfig, OffGesture, WakePolicy},
    mode::ModeId,
    time::Timestamp,
};

/// Mutable state of the light
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModeState {
    /// Active mode
    pub mode: ModeId,
    /// When the active mode's effects started
    pub effect_start: Timestamp,
    /// Button events are ignored until this point, if set
    pub cooldown_until: Option<Timestamp>,
    /// Last transition or accepted button event
    pub last_activity: Timestamp,
}

impl ModeState {
    /// Light off, nothing pending
    pub const fn off(now: Timestamp) -> Self {
        Self {
            mode: ModeId::Off,
            effect_start: now,
            cooldown_until: None,
            last_activity: now,
        }
    }

    /// Whether button events are currently being ignored
    pub fn in_cooldown(&self, now: Timestamp) -> bool {
        self.cooldown_until
            .is_some_and(|until| !now.has_reached(until))
    }
}

/// A completed mode change
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub from: ModeId,
    pub to: ModeId,
    pub at: Timestamp,
}

/// Mode state machine
#[derive(Debug, Clone)]
pub struct ModeStateMachine {
    config: ModeConfig,
    state: ModeState,
    /// Last regular mode that was shown, for resuming after wake
    last_regular: ModeId,
}

impl ModeStateMachine {
    pub const fn new(config: ModeConfig, now: Timestamp) -> Self {
        Self {
            config,
            state: ModeState::off(now),
            last_regular: ModeId::FIRST,
        }
    }

    pub const fn state(&self) -> &ModeState {
        &self.state
    }

    pub const fn mode(&self) -> ModeId {
        self.state.mode
    }

    /// Apply a classified button event
    pub fn handle_event(&mut self, event: ButtonEvent, now: Timestamp) -> Option<Transition> {
        if self.state.in_cooldown(now) {
            return None;
        }

        let mode = self.state.mode;
        if mode != ModeId::Off {
            self.state.last_activity = now;
        }

        match mode {
            ModeId::Off => match event {
                ButtonEvent::RapidSequenceComplete {
                    gesture: Gesture::Start,
                    ..
                } => Some(self.transition(ModeId::FIRST, now)),
                _ => None,
            },
            ModeId::Wake => {
                if !Self::is_gesture(event) {
                    return None;
                }
                let target = match self.config.wake_policy {
                    WakePolicy::RequirePress => ModeId::FIRST,
                    WakePolicy::AutoResume => self.last_regular,
                };
                Some(self.transition(target, now))
            }
            ModeId::Test => {
                if self.is_off_gesture(event) {
                    return Some(self.transition(ModeId::Off, now));
                }
                None
            }
            ModeId::ColorCycle | ModeId::Breathe | ModeId::Christmas => {
                if self.is_off_gesture(event) {
                    return Some(self.transition(ModeId::Off, now));
                }
                match event {
                    ButtonEvent::ShortPress => Some(self.transition(mode.next_regular(), now)),
                    _ => None,
                }
            }
        }
    }

    /// Time-driven checks, evaluated once per tick
    pub fn tick(&mut self, now: Timestamp) -> Option<Transition> {
        if self.state.cooldown_until.is_some() && !self.state.in_cooldown(now) {
            self.state.cooldown_until = None;
        }

        if self.state.mode == ModeId::Off {
            return None;
        }
        if now.elapsed_since(self.state.last_activity) >= self.config.auto_off {
            #[cfg(feature = "esp32-log")]
            println!("[ModeStateMachine.tick] auto off");
            return Some(self.transition(ModeId::Off, now));
        }
        None
    }

    /// The device was woken from sleep
    ///
    /// Ignored while the test pattern runs.
    pub fn wake(&mut self, now: Timestamp) -> Option<Transition> {
        if self.state.mode == ModeId::Test {
            return None;
        }
        Some(self.transition(ModeId::Wake, now))
    }

    /// External test entry trigger
    pub fn enter_test(&mut self, now: Timestamp) -> Option<Transition> {
        Some(self.transition(ModeId::Test, now))
    }

    /// The active mode reported it has run its course
    pub fn finish(&mut self, now: Timestamp) -> Option<Transition> {
        let next = match self.state.mode {
            ModeId::Off => return None,
            ModeId::Wake => match self.config.wake_policy {
                WakePolicy::RequirePress => ModeId::Off,
                WakePolicy::AutoResume => self.last_regular,
            },
            ModeId::Test => ModeId::Off,
            regular => regular.next_regular(),
        };
        Some(self.transition(next, now))
    }

    /// Button events that confirm a wake: completed gestures, not raw edges
    const fn is_gesture(event: ButtonEvent) -> bool {
        !matches!(event, ButtonEvent::Pressed | ButtonEvent::Released)
    }

    fn is_off_gesture(&self, event: ButtonEvent) -> bool {
        match event {
            ButtonEvent::LongPress => matches!(
                self.config.off_gesture,
                OffGesture::LongPress | OffGesture::Either
            ),
            ButtonEvent::RapidSequenceComplete {
                gesture: Gesture::Off,
                ..
            } => matches!(
                self.config.off_gesture,
                OffGesture::RapidPress | OffGesture::Either
            ),
            _ => false,
        }
    }

    fn transition(&mut self, to: ModeId, now: Timestamp) -> Transition {
        let from = self.state.mode;

        if to == ModeId::Off {
            // The start cooldown outlives the off transition so a light that
            // went off right after starting cannot be restarted by stray presses.
            self.state = ModeState {
                cooldown_until: self.state.cooldown_until,
                ..ModeState::off(now)
            };
        } else {
            if to.is_regular() && !from.is_regular() {
                self.state.cooldown_until = Some(now.wrapping_add(self.config.start_cooldown));
            }
            self.state.mode = to;
            self.state.effect_start = now;
            self.state.last_activity = now;
        }

        if to.is_regular() {
            self.last_regular = to;
        }

        #[cfg(feature = "esp32-log")]
        println!(
            "[ModeStateMachine] {} -> {} at {}",
            from.as_str(),
            to.as_str(),
            now.as_millis()
        );

        Transition { from, to, at: now }
    }
}
