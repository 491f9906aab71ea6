//! Physical keymaps.
//!
//! A [`Keymap`] answers what a physical key produces under a given modifier
//! state, which modifier names sit at which bit index, and whether a key
//! auto-repeats. Bindings are resolved against it whenever the compositor
//! hands the seat a new keymap.

mod us;

pub use us::UsKeymap;

use crate::keysym::Keysym;

/// Physical key code in keymap numbering (evdev code + 8).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Keycode(pub u32);

/// Modifier state as last reported by the compositor.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ModifierState {
    pub depressed: u32,
    pub latched: u32,
    pub locked: u32,
    pub group: u32,
}

impl ModifierState {
    /// Bits of every modifier currently in effect.
    pub fn effective(&self) -> u32 {
        self.depressed | self.latched | self.locked
    }

    pub fn is_active(&self, index: u32) -> bool {
        1u32.checked_shl(index)
            .is_some_and(|bit| self.effective() & bit != 0)
    }
}

pub trait Keymap {
    /// Every key code the keymap defines.
    fn keycodes(&self) -> Vec<Keycode>;

    /// Symbol produced by `code` under `mods`, or [`Keysym::NO_SYMBOL`].
    fn keysym(&self, code: Keycode, mods: &ModifierState) -> Keysym;

    /// Symbol produced with no modifiers held.
    fn base_keysym(&self, code: Keycode) -> Keysym {
        self.keysym(code, &ModifierState::default())
    }

    /// Text produced by `code` under `mods`. Control keys yield their
    /// control character.
    fn text(&self, code: Keycode, mods: &ModifierState) -> Option<String>;

    /// Bit index of a named modifier ("Shift", "Lock", "Control", "Mod1".."Mod5").
    fn mod_index(&self, name: &str) -> Option<u32>;

    fn key_repeats(&self, code: Keycode) -> bool;
}
