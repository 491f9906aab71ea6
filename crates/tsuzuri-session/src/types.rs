use std::time::Instant;

use tsuzuri_core::keymap::Keycode;

use crate::popup::PopupModel;
use crate::segments::SegmentModel;

/// Seat mode as seen from outside.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Disabled,
    Composing,
    Selecting,
}

/// Internal state: selection data only exists while selecting.
pub(crate) enum SeatState {
    Disabled,
    Composing,
    Selecting(SegmentModel),
}

impl SeatState {
    pub(crate) fn mode(&self) -> Mode {
        match self {
            SeatState::Disabled => Mode::Disabled,
            SeatState::Composing => Mode::Composing,
            SeatState::Selecting(_) => Mode::Selecting,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyState {
    Released,
    Pressed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Backward,
    Forward,
}

/// Preedit text with the highlighted byte span.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Preedit {
    pub text: String,
    pub cursor_begin: usize,
    pub cursor_end: usize,
}

impl Preedit {
    pub(crate) fn empty() -> Self {
        Self::default()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum PopupAction {
    /// Leave the popup as it is.
    #[default]
    Keep,
    Show(PopupModel),
    Hide,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RepeatAction {
    #[default]
    Keep,
    /// (Re)arm the seat's repeat timer for this deadline.
    Arm(Instant),
    Cancel,
}

/// A key event to pass through to the virtual keyboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ForwardKey {
    pub timestamp: u32,
    pub code: Keycode,
    pub state: KeyState,
}

/// Everything the protocol layer has to do after one input event.
///
/// Apply in field order: commit, preedit, popup, then forward the key.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeyResponse {
    pub handled: bool,
    pub commit: Option<String>,
    pub preedit: Option<Preedit>,
    pub popup: PopupAction,
    pub repeat: RepeatAction,
    pub forward: Option<ForwardKey>,
}

impl KeyResponse {
    pub(crate) fn not_handled() -> Self {
        Self::default()
    }

    pub(crate) fn handled() -> Self {
        Self {
            handled: true,
            ..Self::default()
        }
    }

    pub(crate) fn forwarded(timestamp: u32, code: Keycode, state: KeyState) -> Self {
        Self {
            forward: Some(ForwardKey {
                timestamp,
                code,
                state,
            }),
            ..Self::default()
        }
    }

    /// Sequence `next` after `self`: commits concatenate, everything else is
    /// taken from `next` unless it leaves it unchanged.
    pub(crate) fn then(mut self, next: KeyResponse) -> KeyResponse {
        if let Some(text) = next.commit {
            match self.commit {
                Some(ref mut t) => t.push_str(&text),
                None => self.commit = Some(text),
            }
        }
        self.handled = next.handled;
        if next.preedit.is_some() {
            self.preedit = next.preedit;
        }
        if !matches!(next.popup, PopupAction::Keep) {
            self.popup = next.popup;
        }
        if !matches!(next.repeat, RepeatAction::Keep) {
            self.repeat = next.repeat;
        }
        if next.forward.is_some() {
            self.forward = next.forward;
        }
        self
    }
}
