//! Keymap-specific binding tables.
//!
//! Logical bindings name a keysym and modifiers. Here they are expanded to
//! every key code that produces the keysym unmodified and to the modifier
//! bit mask of the current keymap, then sorted by (code, mask).

use tracing::{debug, warn};
use tsuzuri_core::action::Action;
use tsuzuri_core::binding::{Binding, BindingSet, Modifier, ModifierSet};
use tsuzuri_core::keymap::{Keycode, Keymap, ModifierState};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct ResolvedBinding {
    pub code: Keycode,
    pub mask: u32,
    pub action: Action,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BindingTable {
    entries: Vec<ResolvedBinding>,
}

impl BindingTable {
    pub fn resolve(bindings: &[Binding], keymap: &dyn Keymap) -> Self {
        let codes = keymap.keycodes();
        let mut entries = Vec::new();
        for binding in bindings {
            let Some(mask) = modifier_mask(binding.modifiers, keymap) else {
                warn!(%binding, "modifier missing from keymap, binding ignored");
                continue;
            };
            let before = entries.len();
            entries.extend(
                codes
                    .iter()
                    .filter(|&&code| keymap.base_keysym(code) == binding.keysym)
                    .map(|&code| ResolvedBinding {
                        code,
                        mask,
                        action: binding.action,
                    }),
            );
            if entries.len() == before {
                debug!(%binding, "no key produces this symbol");
            }
        }
        entries.sort();
        Self { entries }
    }

    /// First action bound to exactly (`code`, `mask`).
    pub fn lookup(&self, code: Keycode, mask: u32) -> Option<Action> {
        let i = self
            .entries
            .partition_point(|e| (e.code, e.mask) < (code, mask));
        self.entries
            .get(i)
            .filter(|e| e.code == code && e.mask == mask)
            .map(|e| e.action)
    }

    pub fn entries(&self) -> &[ResolvedBinding] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// The three resolved tables of one seat.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SeatBindings {
    pub global: BindingTable,
    pub composing: BindingTable,
    pub selecting: BindingTable,
}

impl SeatBindings {
    pub fn resolve(bindings: &BindingSet, keymap: &dyn Keymap) -> Self {
        let resolved = Self {
            global: BindingTable::resolve(&bindings.global, keymap),
            composing: BindingTable::resolve(&bindings.composing, keymap),
            selecting: BindingTable::resolve(&bindings.selecting, keymap),
        };
        debug!(
            global = resolved.global.len(),
            composing = resolved.composing.len(),
            selecting = resolved.selecting.len(),
            "bindings resolved"
        );
        resolved
    }
}

fn modifier_bit(keymap: &dyn Keymap, modifier: Modifier) -> Option<u32> {
    keymap
        .mod_index(modifier.keymap_name())
        .and_then(|index| 1u32.checked_shl(index))
}

fn modifier_mask(modifiers: ModifierSet, keymap: &dyn Keymap) -> Option<u32> {
    modifiers
        .iter()
        .try_fold(0, |mask, m| modifier_bit(keymap, m).map(|bit| mask | bit))
}

/// Active modifiers for binding lookup. Caps Lock and Num Lock never take
/// part in matching.
pub fn active_mask(keymap: &dyn Keymap, mods: &ModifierState) -> u32 {
    [Modifier::Lock, Modifier::Num]
        .into_iter()
        .filter_map(|m| modifier_bit(keymap, m))
        .fold(mods.effective(), |mask, bit| mask & !bit)
}
