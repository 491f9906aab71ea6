//! Per-seat input method state machine.
//!
//! `Seat` owns the composition buffer, the conversion engine and the
//! keymap-specific binding tables of one keyboard endpoint. It consumes raw
//! key and activation events and returns a [`KeyResponse`] describing what
//! the protocol layer must send to the compositor.

pub(crate) mod types;

mod actions;
mod commit;
mod key_handlers;
pub mod popup;
mod repeat;
pub mod resolver;
mod response;
pub mod segments;

#[cfg(test)]
mod tests;

use std::sync::Arc;
use std::time::Instant;

use tracing::debug;
use tsuzuri_core::binding::BindingSet;
use tsuzuri_core::conversion::ConversionEngine;
use tsuzuri_core::keymap::{Keycode, Keymap, ModifierState};
use tsuzuri_core::romaji::TextBuffer;
use tsuzuri_core::settings::Settings;

pub use popup::{CandidatePage, PopupModel, SelectingPopup};
pub use resolver::SeatBindings;
pub use segments::{Segment, SegmentModel};
pub use types::{
    Direction, ForwardKey, KeyResponse, KeyState, Mode, PopupAction, Preedit, RepeatAction,
};

use repeat::RepeatState;
use types::SeatState;

/// Settings a seat is created with.
#[derive(Debug, Clone, Default)]
pub struct SeatConfig {
    pub bindings: Arc<BindingSet>,
    pub active_at_startup: bool,
    pub emulate_im_popups: bool,
}

impl From<&Settings> for SeatConfig {
    fn from(s: &Settings) -> Self {
        Self {
            bindings: Arc::new(s.bindings.clone()),
            active_at_startup: s.active_at_startup,
            emulate_im_popups: s.emulate_im_popups,
        }
    }
}

/// Input method state of one seat.
pub struct Seat {
    name: String,
    engine: Box<dyn ConversionEngine>,
    bindings: Arc<BindingSet>,
    emulate_im_popups: bool,

    keymap: Option<Arc<dyn Keymap>>,
    resolved: SeatBindings,
    modifiers: ModifierState,

    state: SeatState,
    buffer: TextBuffer,
    /// Candidate list shown while selecting.
    candidates_visible: bool,

    /// Activation as of the last `done`, and as latched since.
    active: bool,
    pending_active: bool,

    repeat: RepeatState,
    /// Handled presses whose release must be swallowed too.
    pressed: Vec<Keycode>,
}

impl Seat {
    pub fn new(
        name: impl Into<String>,
        engine: Box<dyn ConversionEngine>,
        config: SeatConfig,
    ) -> Self {
        let state = if config.active_at_startup {
            SeatState::Composing
        } else {
            SeatState::Disabled
        };
        Self {
            name: name.into(),
            engine,
            bindings: config.bindings,
            emulate_im_popups: config.emulate_im_popups,
            keymap: None,
            resolved: SeatBindings::default(),
            modifiers: ModifierState::default(),
            state,
            buffer: TextBuffer::new(),
            candidates_visible: false,
            active: false,
            pending_active: false,
            repeat: RepeatState::default(),
            pressed: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn mode(&self) -> Mode {
        self.state.mode()
    }

    pub fn buffer(&self) -> &TextBuffer {
        &self.buffer
    }

    pub fn segments(&self) -> Option<&SegmentModel> {
        match &self.state {
            SeatState::Selecting(model) => Some(model),
            _ => None,
        }
    }

    pub fn engine(&self) -> &dyn ConversionEngine {
        self.engine.as_ref()
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn resolved_bindings(&self) -> &SeatBindings {
        &self.resolved
    }

    pub fn modifiers(&self) -> &ModifierState {
        &self.modifiers
    }

    /// Deadline of the pending repeat tick, if a key is repeating.
    pub fn repeat_deadline(&self) -> Option<Instant> {
        self.repeat.deadline()
    }

    /// Composing or selecting.
    fn is_composing(&self) -> bool {
        !matches!(self.state, SeatState::Disabled)
    }

    fn is_selecting(&self) -> bool {
        matches!(self.state, SeatState::Selecting(_))
    }

    pub fn on_activate(&mut self) {
        self.pending_active = true;
    }

    pub fn on_deactivate(&mut self) {
        self.pending_active = false;
    }

    /// Apply the activation latched since the last `done`.
    ///
    /// Becoming active starts from an empty buffer; any selection left over
    /// from an earlier focus is dropped without committing.
    pub fn on_done(&mut self) -> KeyResponse {
        let was_active = self.active;
        self.active = self.pending_active;
        let mut resp = KeyResponse::handled();
        if !was_active && self.active {
            debug!(seat = %self.name, "activated");
            if self.is_selecting() {
                self.state = SeatState::Composing;
            }
            self.candidates_visible = false;
            self.buffer.clear();
            resp.popup = self.redraw();
        } else if was_active && !self.active {
            debug!(seat = %self.name, "deactivated");
            // Presses swallowed before the focus loss keep their releases
            // swallowed too.
            if let Some(code) = self.repeat.key() {
                self.repeat.cancel();
                self.pressed.push(code);
                resp.repeat = RepeatAction::Cancel;
            }
        }
        resp
    }

    pub fn on_modifiers(&mut self, modifiers: ModifierState) {
        self.modifiers = modifiers;
    }

    /// Replace the keymap and rebuild every binding table from it.
    pub fn on_keymap_changed(&mut self, keymap: Arc<dyn Keymap>) {
        self.resolved = SeatBindings::resolve(&self.bindings, keymap.as_ref());
        self.keymap = Some(keymap);
    }
}
