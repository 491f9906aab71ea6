use std::time::Instant;

use tracing::{debug, debug_span, trace};
use tsuzuri_core::action::Action;
use tsuzuri_core::keymap::Keycode;

use super::resolver;
use super::types::{ForwardKey, KeyResponse, KeyState, RepeatAction};
use super::Seat;

impl Seat {
    /// Process a raw key event from the compositor.
    pub fn on_key(&mut self, code: Keycode, state: KeyState, time: u32, now: Instant) -> KeyResponse {
        let _span = debug_span!("on_key", seat = %self.name, code = code.0, ?state).entered();
        let resp = match state {
            KeyState::Pressed => self.on_key_pressed(code, time, now),
            KeyState::Released => self.on_key_released(code, time),
        };
        debug!(
            handled = resp.handled,
            forwarded = resp.forward.is_some(),
            "key done"
        );
        resp
    }

    fn on_key_pressed(&mut self, code: Keycode, time: u32, now: Instant) -> KeyResponse {
        if !self.active {
            return KeyResponse::forwarded(time, code, KeyState::Pressed);
        }

        // A different key takes over from the one repeating. Its press was
        // swallowed, so its release must be too.
        let preempted = match self.repeat.key() {
            Some(previous) if previous != code => {
                self.repeat.cancel();
                self.pressed.push(previous);
                true
            }
            _ => false,
        };

        let mut resp = self.handle_key(code);
        if !resp.handled {
            resp.forward = Some(ForwardKey {
                timestamp: time,
                code,
                state: KeyState::Pressed,
            });
        } else if let Some(deadline) = self.arm_repeat(code, time, now) {
            resp.repeat = RepeatAction::Arm(deadline);
        } else {
            self.pressed.push(code);
        }
        if preempted && resp.repeat == RepeatAction::Keep {
            resp.repeat = RepeatAction::Cancel;
        }
        resp
    }

    fn on_key_released(&mut self, code: Keycode, time: u32) -> KeyResponse {
        if self.repeat.key() == Some(code) {
            self.repeat.cancel();
            let mut resp = KeyResponse::handled();
            resp.repeat = RepeatAction::Cancel;
            return resp;
        }
        if let Some(i) = self.pressed.iter().position(|&k| k == code) {
            self.pressed.swap_remove(i);
            return KeyResponse::handled();
        }
        KeyResponse::forwarded(time, code, KeyState::Released)
    }

    fn arm_repeat(&mut self, code: Keycode, time: u32, now: Instant) -> Option<Instant> {
        let repeats = self
            .keymap
            .as_ref()
            .is_some_and(|keymap| keymap.key_repeats(code));
        if repeats {
            self.repeat.arm(code, time, now)
        } else {
            None
        }
    }

    /// Resolve a key press: bound action first, then literal text input.
    ///
    /// While selecting, a key with no selecting or global binding commits
    /// the selection and is then looked up again as if composing.
    pub(crate) fn handle_key(&mut self, code: Keycode) -> KeyResponse {
        let Some(keymap) = self.keymap.clone() else {
            return KeyResponse::not_handled();
        };
        let mask = resolver::active_mask(keymap.as_ref(), &self.modifiers);

        let mut resp = KeyResponse::not_handled();
        loop {
            if let Some(action) = self.lookup(code, mask) {
                return resp.then(self.handle_action(action));
            }
            if keymap.keysym(code, &self.modifiers).is_modifier() {
                return resp;
            }
            if !self.is_selecting() {
                break;
            }
            resp = resp.then(self.selecting_commit());
            resp.handled = false;
        }

        if !self.is_composing() {
            return resp;
        }
        let Some(text) = keymap.text(code, &self.modifiers) else {
            return resp;
        };
        if text.is_empty() || text.chars().any(char::is_control) {
            return resp;
        }
        trace!(%text, "literal input");
        self.buffer.insert(&text);
        self.buffer.transliterate();
        resp.then(self.composing_update())
    }

    /// Mode-dependent lookup: selecting table, then composing table (only
    /// with a non-empty buffer), then the global table.
    fn lookup(&self, code: Keycode, mask: u32) -> Option<Action> {
        let tables = [
            (self.is_selecting(), &self.resolved.selecting),
            (
                self.is_composing() && !self.buffer.is_empty(),
                &self.resolved.composing,
            ),
            (true, &self.resolved.global),
        ];
        tables
            .into_iter()
            .filter(|(enabled, _)| *enabled)
            .find_map(|(_, table)| table.lookup(code, mask))
    }
}
