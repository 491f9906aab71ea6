use std::time::{Duration, Instant};

use tracing::{debug_span, trace};
use tsuzuri_core::keymap::Keycode;

use super::types::{ForwardKey, KeyResponse, KeyState, RepeatAction};
use super::Seat;

/// Used until the compositor reports the real repeat settings.
const DEFAULT_RATE: u32 = 25;
const DEFAULT_DELAY: u32 = 600;

#[derive(Debug, Clone, Copy)]
struct ActiveRepeat {
    code: Keycode,
    /// Protocol timestamp (ms) of the next synthesized press.
    timestamp: u32,
    deadline: Instant,
}

/// Single repeat slot of a seat.
#[derive(Debug)]
pub(crate) struct RepeatState {
    /// Repeats per second; 0 disables repeat.
    rate: u32,
    /// Milliseconds before the first repeat.
    delay: u32,
    active: Option<ActiveRepeat>,
}

impl Default for RepeatState {
    fn default() -> Self {
        Self {
            rate: DEFAULT_RATE,
            delay: DEFAULT_DELAY,
            active: None,
        }
    }
}

impl RepeatState {
    pub(crate) fn set_info(&mut self, rate: i32, delay: i32) {
        self.rate = rate.max(0) as u32;
        self.delay = delay.max(0) as u32;
        if self.rate == 0 {
            self.active = None;
        }
    }

    pub(crate) fn key(&self) -> Option<Keycode> {
        self.active.map(|a| a.code)
    }

    pub(crate) fn deadline(&self) -> Option<Instant> {
        self.active.map(|a| a.deadline)
    }

    fn interval_ms(&self) -> u32 {
        (1000 / self.rate).max(1)
    }

    /// Start repeating `code` pressed at `time`. Returns the first deadline,
    /// or `None` when repeat is off.
    pub(crate) fn arm(&mut self, code: Keycode, time: u32, now: Instant) -> Option<Instant> {
        if self.rate == 0 {
            self.active = None;
            return None;
        }
        let deadline = now + Duration::from_millis(self.delay.into());
        self.active = Some(ActiveRepeat {
            code,
            timestamp: time.wrapping_add(self.delay),
            deadline,
        });
        Some(deadline)
    }

    /// Take the due tick and schedule the next one a full interval after
    /// it, so ticks never drift.
    pub(crate) fn tick(&mut self) -> Option<(Keycode, u32)> {
        if self.rate == 0 {
            self.active = None;
            return None;
        }
        let interval = self.interval_ms();
        let active = self.active.as_mut()?;
        let due = (active.code, active.timestamp);
        active.timestamp = active.timestamp.wrapping_add(interval);
        active.deadline += Duration::from_millis(interval.into());
        Some(due)
    }

    /// Returns whether a repeat was in flight.
    pub(crate) fn cancel(&mut self) -> bool {
        self.active.take().is_some()
    }
}

impl Seat {
    /// Keyboard repeat settings: `rate` in keys per second, `delay` in ms.
    pub fn on_repeat_info(&mut self, rate: i32, delay: i32) {
        self.repeat.set_info(rate, delay);
    }

    /// Replay the repeating key. Call when [`Seat::repeat_deadline`] passes.
    pub fn on_repeat_timer(&mut self) -> KeyResponse {
        let Some((code, timestamp)) = self.repeat.tick() else {
            return KeyResponse::not_handled();
        };
        let _span = debug_span!("repeat", seat = %self.name, code = code.0, timestamp).entered();
        let mut resp = self.handle_key(code);
        if resp.handled {
            resp.repeat = self
                .repeat
                .deadline()
                .map_or(RepeatAction::Cancel, RepeatAction::Arm);
        } else {
            // The key stopped meaning anything here; hand it to the
            // application once and stop.
            trace!("repeat no longer handled");
            self.repeat.cancel();
            resp.repeat = RepeatAction::Cancel;
            resp.forward = Some(ForwardKey {
                timestamp,
                code,
                state: KeyState::Pressed,
            });
        }
        resp
    }
}
