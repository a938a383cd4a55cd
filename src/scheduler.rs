//! Fixed-rate tick pacing.
//!
//! Wraps a [`LightController`] and works out when the next tick is due.
//! The caller is responsible for sleeping/waiting between ticks.

use embassy_time::{Duration, Instant};

use crate::{LightOutput, controller::{LightController, TickResult}, time::Timestamp};

/// Default tick rate (100 Hz).
pub const DEFAULT_TICK_RATE: u64 = 100;

/// Default tick period based on the tick rate.
pub const DEFAULT_TICK_PERIOD: Duration = Duration::from_millis(1000 / DEFAULT_TICK_RATE);

/// Result of a scheduled tick.
#[derive(Debug, Clone, Copy)]
pub struct ScheduledTick {
    /// What the controller did this tick.
    pub result: TickResult,
    /// The deadline for the next tick.
    pub next_deadline: Instant,
    /// How long to wait until the next tick (may be zero if behind schedule).
    pub sleep_duration: Duration,
}

/// Portable tick scheduler that manages pacing without async.
///
/// # Usage
///
/// ```ignore
/// let mut scheduler = TickScheduler::new(controller);
///
/// loop {
///     let now = Instant::now();
///     let tick = scheduler.tick(now, button.is_high());
///     if scheduler.controller().can_sleep() {
///         enter_sleep();
///     }
///     Timer::after(tick.sleep_duration).await;
/// }
/// ```
pub struct TickScheduler<O: LightOutput> {
    controller: LightController<O>,
    next_tick: Instant,
    period: Duration,
}

impl<O: LightOutput> TickScheduler<O> {
    /// Create a new scheduler ticking at `DEFAULT_TICK_RATE`.
    pub fn new(controller: LightController<O>) -> Self {
        Self::with_period(controller, DEFAULT_TICK_PERIOD)
    }

    /// Create a new scheduler with a custom tick period.
    pub fn with_period(controller: LightController<O>, period: Duration) -> Self {
        Self {
            controller,
            next_tick: Instant::from_millis(0),
            period,
        }
    }

    /// Run one tick and return pacing information.
    ///
    /// If we have fallen more than two periods behind, the schedule restarts
    /// from `now` instead of bursting through the backlog.
    pub fn tick(&mut self, now: Instant, level_high: bool) -> ScheduledTick {
        let max_drift = self.period * 2;
        if now > self.next_tick + max_drift {
            self.next_tick = now;
        }

        let result = self.controller.tick(Timestamp::from(now), level_high);

        self.next_tick += self.period;

        let sleep_duration = if self.next_tick > now {
            self.next_tick - now
        } else {
            Duration::from_millis(0)
        };

        ScheduledTick {
            result,
            next_deadline: self.next_tick,
            sleep_duration,
        }
    }

    pub fn controller(&self) -> &LightController<O> {
        &self.controller
    }

    pub fn controller_mut(&mut self) -> &mut LightController<O> {
        &mut self.controller
    }
}
