//! Logical key bindings: a key symbol plus modifiers mapped to an [`Action`].
//!
//! These are keymap-independent. They are turned into keycode tables per
//! seat once the compositor supplies a keymap.

use std::fmt;

use crate::action::{Action, UnknownAction};
use crate::keysym::Keysym;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Modifier {
    Shift,
    Lock,
    Ctrl,
    Alt,
    Num,
    Mod3,
    Logo,
    Mod5,
}

impl Modifier {
    pub const ALL: [Modifier; 8] = [
        Modifier::Shift,
        Modifier::Lock,
        Modifier::Ctrl,
        Modifier::Alt,
        Modifier::Num,
        Modifier::Mod3,
        Modifier::Logo,
        Modifier::Mod5,
    ];

    /// Parse a modifier as written in a key chord.
    pub fn from_name(name: &str) -> Option<Modifier> {
        let modifier = match name {
            "Shift" => Modifier::Shift,
            "Lock" => Modifier::Lock,
            "Ctrl" | "Control" => Modifier::Ctrl,
            "Mod1" | "Alt" => Modifier::Alt,
            "Mod2" => Modifier::Num,
            "Mod3" => Modifier::Mod3,
            "Mod4" | "Super" | "Logo" => Modifier::Logo,
            "Mod5" => Modifier::Mod5,
            _ => return None,
        };
        Some(modifier)
    }

    /// Name of the modifier inside a keymap.
    pub fn keymap_name(self) -> &'static str {
        match self {
            Modifier::Shift => "Shift",
            Modifier::Lock => "Lock",
            Modifier::Ctrl => "Control",
            Modifier::Alt => "Mod1",
            Modifier::Num => "Mod2",
            Modifier::Mod3 => "Mod3",
            Modifier::Logo => "Mod4",
            Modifier::Mod5 => "Mod5",
        }
    }

    fn bit(self) -> u8 {
        1 << self as u8
    }
}

impl fmt::Display for Modifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Modifier::Ctrl => "Ctrl",
            Modifier::Alt => "Alt",
            Modifier::Logo => "Super",
            other => other.keymap_name(),
        };
        f.write_str(name)
    }
}

/// A set of logical modifiers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ModifierSet(u8);

impl ModifierSet {
    pub const EMPTY: ModifierSet = ModifierSet(0);

    pub fn insert(&mut self, modifier: Modifier) {
        self.0 |= modifier.bit();
    }

    pub fn contains(self, modifier: Modifier) -> bool {
        self.0 & modifier.bit() != 0
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn iter(self) -> impl Iterator<Item = Modifier> {
        Modifier::ALL.into_iter().filter(move |&m| self.contains(m))
    }
}

impl FromIterator<Modifier> for ModifierSet {
    fn from_iter<I: IntoIterator<Item = Modifier>>(iter: I) -> Self {
        let mut set = ModifierSet::EMPTY;
        for m in iter {
            set.insert(m);
        }
        set
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BindingError {
    #[error("empty key chord")]
    Empty,
    #[error("invalid modifier: {0}")]
    UnknownModifier(String),
    #[error("invalid key: {0}")]
    UnknownKey(String),
    #[error(transparent)]
    UnknownAction(#[from] UnknownAction),
}

/// Which mode-specific table a binding belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum BindingClass {
    Global,
    Composing,
    Selecting,
}

impl fmt::Display for BindingClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            BindingClass::Global => "global",
            BindingClass::Composing => "composing",
            BindingClass::Selecting => "selecting",
        })
    }
}

/// A keymap-independent binding. Ordering is by (keysym, modifiers, action).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Binding {
    pub keysym: Keysym,
    pub modifiers: ModifierSet,
    pub action: Action,
}

impl Binding {
    /// Parse a chord such as `"Ctrl+Shift+space"` bound to `action`.
    pub fn parse(chord: &str, action: &str) -> Result<Binding, BindingError> {
        let action: Action = action.parse()?;
        let (modifiers, keysym) = parse_chord(chord)?;
        Ok(Binding {
            keysym,
            modifiers,
            action,
        })
    }
}

/// Split `"Mod+...+Key"` into its modifiers and key symbol.
pub fn parse_chord(chord: &str) -> Result<(ModifierSet, Keysym), BindingError> {
    let mut parts: Vec<&str> = chord.split('+').map(str::trim).collect();
    let key = match parts.pop() {
        Some("") if parts.is_empty() => return Err(BindingError::Empty),
        Some(key) => key,
        None => return Err(BindingError::Empty),
    };
    let modifiers = parts
        .into_iter()
        .map(|name| {
            Modifier::from_name(name).ok_or_else(|| BindingError::UnknownModifier(name.into()))
        })
        .collect::<Result<ModifierSet, _>>()?;
    let keysym = Keysym::from_name(key).ok_or_else(|| BindingError::UnknownKey(key.into()))?;
    Ok((modifiers, keysym))
}

impl fmt::Display for Binding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for m in self.modifiers.iter() {
            write!(f, "{m}+")?;
        }
        write!(f, "{} {}", self.keysym, self.action)
    }
}

/// Bindings for each class, each kept sorted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BindingSet {
    pub global: Vec<Binding>,
    pub composing: Vec<Binding>,
    pub selecting: Vec<Binding>,
}

impl BindingSet {
    pub fn class(&self, class: BindingClass) -> &[Binding] {
        match class {
            BindingClass::Global => &self.global,
            BindingClass::Composing => &self.composing,
            BindingClass::Selecting => &self.selecting,
        }
    }

    pub fn push(&mut self, class: BindingClass, binding: Binding) {
        let table = match class {
            BindingClass::Global => &mut self.global,
            BindingClass::Composing => &mut self.composing,
            BindingClass::Selecting => &mut self.selecting,
        };
        let at = table.partition_point(|b| b < &binding);
        table.insert(at, binding);
    }

    pub fn len(&self) -> usize {
        self.global.len() + self.composing.len() + self.selecting.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
