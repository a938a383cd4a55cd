//! Tick driver
//!
//! Wires the classifier, state machine, mode runner and hardware sink
//! together. One call to [`LightController::tick`] is one tick, always in the
//! same order: sample, classify, transition, auto-off, render, output.

use crate::{
    LightOutput,
    button::{ButtonClassifier, ButtonEvents, Gesture},
    channel::SampleReceiver,
    config::LightConfig,
    mode::{ModeId, ModeRunner},
    state::{ModeState, ModeStateMachine, Transition},
    time::Timestamp,
};

/// Outcome of one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickResult {
    /// Mode after the tick, including a transition caused by the mode finishing
    pub mode: ModeId,
    /// Whether the rendered mode is still running
    pub active: bool,
    /// Last transition that happened during the tick
    pub transition: Option<Transition>,
}

/// The light's main loop body
pub struct LightController<O: LightOutput> {
    classifier: ButtonClassifier,
    machine: ModeStateMachine,
    runner: ModeRunner,
    output: O,
}

impl<O: LightOutput> LightController<O> {
    pub fn new(config: &LightConfig, output: O, now: Timestamp) -> Self {
        Self {
            classifier: ButtonClassifier::new(&config.button),
            machine: ModeStateMachine::new(config.modes, now),
            runner: ModeRunner::new(config),
            output,
        }
    }

    /// Run one tick with the button level sampled at `now`
    pub fn tick(&mut self, now: Timestamp, level_high: bool) -> TickResult {
        let events = self.classifier.sample(level_high, now);
        let transition = self.apply_events(&events, now);
        self.finish_tick(now, transition)
    }

    /// Run one tick, first replaying samples queued by the button interrupt
    ///
    /// Queued samples are classified at the time they were captured. The
    /// current level is sampled afterwards so a level that stopped changing
    /// still gets confirmed by the debouncer.
    pub fn tick_queued<const SIZE: usize>(
        &mut self,
        now: Timestamp,
        level_high: bool,
        samples: &SampleReceiver<'_, SIZE>,
    ) -> TickResult {
        let mut transition = None;
        while let Ok(sample) = samples.try_receive() {
            // A sample captured after `now` was read is treated as taken at `now`
            let at = sample.at.not_after(now);
            let events = self.classifier.sample(sample.level_high, at);
            transition = self.apply_events(&events, at).or(transition);
        }
        let events = self.classifier.sample(level_high, now);
        transition = self.apply_events(&events, now).or(transition);
        self.finish_tick(now, transition)
    }

    /// External wake-from-sleep event
    pub fn wake(&mut self, now: Timestamp) -> Option<Transition> {
        let transition = self.machine.wake(now);
        self.observe(transition)
    }

    /// External test entry trigger
    pub fn enter_test(&mut self, now: Timestamp) -> Option<Transition> {
        let transition = self.machine.enter_test(now);
        self.observe(transition)
    }

    pub const fn mode(&self) -> ModeId {
        self.machine.mode()
    }

    pub const fn state(&self) -> &ModeState {
        self.machine.state()
    }

    pub const fn is_off(&self) -> bool {
        matches!(self.machine.mode(), ModeId::Off)
    }

    /// Off and the button released: safe to enter sleep
    pub const fn can_sleep(&self) -> bool {
        self.is_off() && !self.classifier.is_pressed()
    }

    pub const fn output(&self) -> &O {
        &self.output
    }

    pub fn output_mut(&mut self) -> &mut O {
        &mut self.output
    }

    fn apply_events(&mut self, events: &ButtonEvents, at: Timestamp) -> Option<Transition> {
        let mut last = None;
        for &event in events {
            let transition = self.machine.handle_event(event, at);
            last = self.observe(transition).or(last);
        }
        last
    }

    fn finish_tick(&mut self, now: Timestamp, transition: Option<Transition>) -> TickResult {
        let auto_off = self.machine.tick(now);
        let mut transition = self.observe(auto_off).or(transition);

        let state = *self.machine.state();
        let active = self.runner.run(state.mode, now, &state, &mut self.output);
        if !active {
            let finished = self.machine.finish(now);
            transition = self.observe(finished).or(transition);
        }

        TickResult {
            mode: self.machine.mode(),
            active,
            transition,
        }
    }

    /// Side effects of a transition outside the state machine
    ///
    /// Keeps the classifier's armed gesture in step with the mode: the start
    /// sequence while the light is dark, the off sequence while it is lit.
    fn observe(&mut self, transition: Option<Transition>) -> Option<Transition> {
        if let Some(Transition { to, .. }) = transition {
            let gesture = match to {
                ModeId::Off | ModeId::Wake => Gesture::Start,
                _ => Gesture::Off,
            };
            self.classifier.arm(gesture);
            if to == ModeId::Off {
                self.classifier.reset_sequences();
            }
        }
        transition
    }
}
