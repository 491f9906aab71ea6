//! Seat arena and the glue between seats and the compositor.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;
use std::time::{Duration, Instant};

use tracing::{debug, debug_span, warn};
use tsuzuri_core::action::Action;
use tsuzuri_core::conversion::ConversionEngine;
use tsuzuri_core::keymap::{Keycode, Keymap, ModifierState};
use tsuzuri_session::{KeyResponse, KeyState, PopupAction, PopupModel, RepeatAction, Seat, SeatConfig};

use crate::control::ControlError;
use crate::timer::TimerQueue;

/// Stable handle of a seat inside a [`Host`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SeatId(pub u32);

impl fmt::Display for SeatId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Input method side of the compositor protocol for one seat.
pub trait CompositorSession {
    fn set_preedit(&mut self, text: &str, cursor_begin: usize, cursor_end: usize);
    fn commit_text(&mut self, text: &str);
    /// Redraw the popup, or hide it when `popup` is `None`.
    fn request_redraw(&mut self, popup: Option<&PopupModel>);
}

/// Pass-through for keys the input method leaves alone.
pub trait VirtualKeyboard {
    fn forward_key(&mut self, timestamp: u32, code: Keycode, state: KeyState);
    fn forward_modifiers(&mut self, modifiers: &ModifierState);
    fn forward_keymap(&mut self, _keymap: &Arc<dyn Keymap>) {}
}

/// Creates the conversion engine of each new seat.
pub type EngineFactory = Box<dyn Fn() -> Box<dyn ConversionEngine>>;

struct SeatEntry {
    seat: Seat,
    session: Box<dyn CompositorSession>,
    keyboard: Box<dyn VirtualKeyboard>,
}

/// Every seat of one compositor connection.
pub struct Host {
    config: SeatConfig,
    engines: EngineFactory,
    seats: BTreeMap<SeatId, SeatEntry>,
    next_id: u32,
    timers: TimerQueue,
}

impl Host {
    pub fn new(config: SeatConfig, engines: EngineFactory) -> Self {
        Self {
            config,
            engines,
            seats: BTreeMap::new(),
            next_id: 0,
            timers: TimerQueue::new(),
        }
    }

    pub fn add_seat(
        &mut self,
        name: impl Into<String>,
        session: Box<dyn CompositorSession>,
        keyboard: Box<dyn VirtualKeyboard>,
    ) -> SeatId {
        let id = SeatId(self.next_id);
        self.next_id += 1;
        let seat = Seat::new(name, (self.engines)(), self.config.clone());
        debug!(%id, seat = seat.name(), "seat added");
        self.seats.insert(
            id,
            SeatEntry {
                seat,
                session,
                keyboard,
            },
        );
        id
    }

    /// Drop a seat. Pending timer entries for it are discarded when due.
    pub fn remove_seat(&mut self, id: SeatId) -> Option<Seat> {
        let entry = self.seats.remove(&id)?;
        debug!(%id, seat = entry.seat.name(), "seat removed");
        Some(entry.seat)
    }

    pub fn seat(&self, id: SeatId) -> Option<&Seat> {
        self.seats.get(&id).map(|e| &e.seat)
    }

    pub fn find_seat(&self, name: &str) -> Option<SeatId> {
        self.seats
            .iter()
            .find(|(_, e)| e.seat.name() == name)
            .map(|(&id, _)| id)
    }

    pub fn seat_ids(&self) -> impl Iterator<Item = SeatId> + '_ {
        self.seats.keys().copied()
    }

    pub fn on_activate(&mut self, id: SeatId) {
        if let Some(entry) = self.entry(id) {
            entry.seat.on_activate();
        }
    }

    pub fn on_deactivate(&mut self, id: SeatId) {
        if let Some(entry) = self.entry(id) {
            entry.seat.on_deactivate();
        }
    }

    pub fn on_done(&mut self, id: SeatId) {
        self.with_seat(id, |seat| seat.on_done());
    }

    pub fn on_key(&mut self, id: SeatId, code: Keycode, state: KeyState, time: u32, now: Instant) {
        self.with_seat(id, |seat| seat.on_key(code, state, time, now));
    }

    /// Mirror the modifiers to the virtual keyboard before the seat sees
    /// them, so forwarded keys carry the right state.
    pub fn on_modifiers(&mut self, id: SeatId, modifiers: ModifierState) {
        if let Some(entry) = self.entry(id) {
            entry.keyboard.forward_modifiers(&modifiers);
            entry.seat.on_modifiers(modifiers);
        }
    }

    pub fn on_keymap_changed(&mut self, id: SeatId, keymap: Arc<dyn Keymap>) {
        if let Some(entry) = self.entry(id) {
            entry.keyboard.forward_keymap(&keymap);
            entry.seat.on_keymap_changed(keymap);
        }
    }

    pub fn on_repeat_info(&mut self, id: SeatId, rate: i32, delay: i32) {
        if let Some(entry) = self.entry(id) {
            entry.seat.on_repeat_info(rate, delay);
        }
    }

    /// How long the event loop may block before [`Host::dispatch_timers`]
    /// has work.
    pub fn next_timeout(&self, now: Instant) -> Option<Duration> {
        self.timers.timeout(now)
    }

    /// Fire every repeat timer due at `now`.
    pub fn dispatch_timers(&mut self, now: Instant) {
        for (deadline, id) in self.timers.pop_expired(now) {
            let live = self
                .seats
                .get(&id)
                .is_some_and(|e| e.seat.repeat_deadline() == Some(deadline));
            if live {
                self.with_seat(id, |seat| seat.on_repeat_timer());
            }
        }
    }

    /// Run `action_name` on the seat called `seat_name` as if a bound key
    /// had been pressed.
    pub fn perform_action(&mut self, seat_name: &str, action_name: &str) -> Result<(), ControlError> {
        let _span = debug_span!("perform_action", seat = seat_name, action = action_name).entered();
        let id = self
            .find_seat(seat_name)
            .ok_or_else(|| ControlError::NoSuchSeat(seat_name.to_string()))?;
        let action: Action = action_name
            .parse()
            .map_err(|_| ControlError::UnknownAction(action_name.to_string()))?;
        self.with_seat(id, |seat| seat.handle_action(action));
        Ok(())
    }

    fn entry(&mut self, id: SeatId) -> Option<&mut SeatEntry> {
        let entry = self.seats.get_mut(&id);
        if entry.is_none() {
            warn!(%id, "event for unknown seat");
        }
        entry
    }

    fn with_seat(&mut self, id: SeatId, f: impl FnOnce(&mut Seat) -> KeyResponse) {
        let Some(entry) = self.seats.get_mut(&id) else {
            warn!(%id, "event for unknown seat");
            return;
        };
        let resp = f(&mut entry.seat);
        apply(entry, &mut self.timers, id, resp);
    }
}

/// Hand a seat's response to its collaborators: commit, preedit, popup,
/// then the forwarded key.
fn apply(entry: &mut SeatEntry, timers: &mut TimerQueue, id: SeatId, resp: KeyResponse) {
    if let Some(text) = &resp.commit {
        entry.session.commit_text(text);
    }
    if let Some(preedit) = &resp.preedit {
        entry
            .session
            .set_preedit(&preedit.text, preedit.cursor_begin, preedit.cursor_end);
    }
    match &resp.popup {
        PopupAction::Keep => {}
        PopupAction::Show(model) => entry.session.request_redraw(Some(model)),
        PopupAction::Hide => entry.session.request_redraw(None),
    }
    if let RepeatAction::Arm(deadline) = resp.repeat {
        timers.schedule(deadline, id);
    }
    if let Some(key) = resp.forward {
        entry.keyboard.forward_key(key.timestamp, key.code, key.state);
    }
}
