//! Interrupt-to-tick handoff for button samples
//!
//! A pin-change interrupt must never touch the mode state directly. It pushes
//! a timestamped [`ButtonSample`] into this bounded queue instead, and the
//! tick driver drains it at the start of the next tick. Access goes through
//! `critical-section`, so it is safe between an ISR and the main loop.

use core::cell::RefCell;

use critical_section::Mutex;
use heapless::Deque;

use crate::time::Timestamp;

/// Raw button level captured at a point in time
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ButtonSample {
    /// Raw line level, before polarity is applied
    pub level_high: bool,
    pub at: Timestamp,
}

/// Error returned when trying to send to a full channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrySendError<T>(pub T);

/// Error returned when trying to receive from an empty channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TryReceiveError;

/// Bounded queue of button samples
pub struct SampleChannel<const SIZE: usize> {
    inner: Mutex<RefCell<Deque<ButtonSample, SIZE>>>,
}

impl<const SIZE: usize> SampleChannel<SIZE> {
    pub const fn new() -> Self {
        Self {
            inner: Mutex::new(RefCell::new(Deque::new())),
        }
    }

    /// Producer handle, for the interrupt handler
    pub const fn sender(&self) -> SampleSender<'_, SIZE> {
        SampleSender { channel: self }
    }

    /// Consumer handle, for the tick driver
    pub const fn receiver(&self) -> SampleReceiver<'_, SIZE> {
        SampleReceiver { channel: self }
    }

    /// Queue a sample
    ///
    /// Returns `Err(TrySendError(sample))` if the queue is full.
    pub fn try_send(&self, sample: ButtonSample) -> Result<(), TrySendError<ButtonSample>> {
        critical_section::with(|cs| {
            let mut queue = self.inner.borrow(cs).borrow_mut();
            queue.push_back(sample).map_err(TrySendError)
        })
    }

    /// Queue a sample, discarding the oldest one if the queue is full
    ///
    /// Returns the discarded sample, if any.
    pub fn send_overwriting(&self, sample: ButtonSample) -> Option<ButtonSample> {
        critical_section::with(|cs| {
            let mut queue = self.inner.borrow(cs).borrow_mut();
            let dropped = if queue.is_full() {
                queue.pop_front()
            } else {
                None
            };
            let _ = queue.push_back(sample);
            dropped
        })
    }

    /// Take the oldest queued sample
    pub fn try_receive(&self) -> Result<ButtonSample, TryReceiveError> {
        critical_section::with(|cs| {
            let mut queue = self.inner.borrow(cs).borrow_mut();
            queue.pop_front().ok_or(TryReceiveError)
        })
    }
}

impl<const SIZE: usize> Default for SampleChannel<SIZE> {
    fn default() -> Self {
        Self::new()
    }
}

/// Producer handle of a [`SampleChannel`].
#[derive(Clone, Copy)]
pub struct SampleSender<'a, const SIZE: usize> {
    channel: &'a SampleChannel<SIZE>,
}

impl<const SIZE: usize> SampleSender<'_, SIZE> {
    pub fn try_send(&self, sample: ButtonSample) -> Result<(), TrySendError<ButtonSample>> {
        self.channel.try_send(sample)
    }

    pub fn send_overwriting(&self, sample: ButtonSample) -> Option<ButtonSample> {
        self.channel.send_overwriting(sample)
    }
}

/// Consumer handle of a [`SampleChannel`].
#[derive(Clone, Copy)]
pub struct SampleReceiver<'a, const SIZE: usize> {
    channel: &'a SampleChannel<SIZE>,
}

impl<const SIZE: usize> SampleReceiver<'_, SIZE> {
    pub fn try_receive(&self) -> Result<ButtonSample, TryReceiveError> {
        self.channel.try_receive()
    }
}
