//! Key symbols, using the X11 keysym numbering that Wayland keymaps carry.

use std::fmt;

/// A key symbol as produced by a keymap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Keysym(pub u32);

/// Offset for keysyms that directly encode a Unicode code point.
const UNICODE_OFFSET: u32 = 0x0100_0000;

impl Keysym {
    pub const NO_SYMBOL: Keysym = Keysym(0);
    pub const SPACE: Keysym = Keysym(0x0020);
    pub const BACKSPACE: Keysym = Keysym(0xff08);
    pub const TAB: Keysym = Keysym(0xff09);
    pub const RETURN: Keysym = Keysym(0xff0d);
    pub const ESCAPE: Keysym = Keysym(0xff1b);
    pub const MUHENKAN: Keysym = Keysym(0xff22);
    pub const HENKAN: Keysym = Keysym(0xff23);
    pub const HIRAGANA_KATAKANA: Keysym = Keysym(0xff27);
    pub const ZENKAKU_HANKAKU: Keysym = Keysym(0xff2a);
    pub const HOME: Keysym = Keysym(0xff50);
    pub const LEFT: Keysym = Keysym(0xff51);
    pub const UP: Keysym = Keysym(0xff52);
    pub const RIGHT: Keysym = Keysym(0xff53);
    pub const DOWN: Keysym = Keysym(0xff54);
    pub const PAGE_UP: Keysym = Keysym(0xff55);
    pub const PAGE_DOWN: Keysym = Keysym(0xff56);
    pub const END: Keysym = Keysym(0xff57);
    pub const INSERT: Keysym = Keysym(0xff63);
    pub const NUM_LOCK: Keysym = Keysym(0xff7f);
    pub const F1: Keysym = Keysym(0xffbe);
    pub const SHIFT_L: Keysym = Keysym(0xffe1);
    pub const SHIFT_R: Keysym = Keysym(0xffe2);
    pub const CONTROL_L: Keysym = Keysym(0xffe3);
    pub const CONTROL_R: Keysym = Keysym(0xffe4);
    pub const CAPS_LOCK: Keysym = Keysym(0xffe5);
    pub const META_L: Keysym = Keysym(0xffe7);
    pub const META_R: Keysym = Keysym(0xffe8);
    pub const ALT_L: Keysym = Keysym(0xffe9);
    pub const ALT_R: Keysym = Keysym(0xffea);
    pub const SUPER_L: Keysym = Keysym(0xffeb);
    pub const SUPER_R: Keysym = Keysym(0xffec);
    pub const HYPER_L: Keysym = Keysym(0xffed);
    pub const HYPER_R: Keysym = Keysym(0xffee);
    pub const DELETE: Keysym = Keysym(0xffff);

    /// Look a keysym up by name, ignoring case.
    ///
    /// A single character names the keysym of that character; letters
    /// resolve to their lowercase symbol, which is what an unshifted key
    /// produces.
    pub fn from_name(name: &str) -> Option<Keysym> {
        let mut chars = name.chars();
        if let (Some(c), None) = (chars.next(), chars.next()) {
            return Keysym::from_char(c.to_ascii_lowercase());
        }
        NAMES
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|&(_, sym)| sym)
    }

    /// Canonical name, if the keysym has one.
    pub fn name(self) -> Option<&'static str> {
        NAMES.iter().find(|&&(_, sym)| sym == self).map(|&(n, _)| n)
    }

    pub fn from_char(c: char) -> Option<Keysym> {
        if c.is_control() {
            return None;
        }
        match c as u32 {
            cp @ (0x20..=0x7e | 0xa0..=0xff) => Some(Keysym(cp)),
            cp => Some(Keysym(UNICODE_OFFSET + cp)),
        }
    }

    /// The character this keysym directly encodes, if any.
    pub fn to_char(self) -> Option<char> {
        match self.0 {
            cp @ (0x20..=0x7e | 0xa0..=0xff) => char::from_u32(cp),
            sym if sym > UNICODE_OFFSET => char::from_u32(sym - UNICODE_OFFSET),
            _ => None,
        }
    }

    /// Bare modifier keys: shift, control, alt, super and hyper on either side.
    pub fn is_modifier(self) -> bool {
        matches!(
            self,
            Keysym::SHIFT_L
                | Keysym::SHIFT_R
                | Keysym::CONTROL_L
                | Keysym::CONTROL_R
                | Keysym::ALT_L
                | Keysym::ALT_R
                | Keysym::SUPER_L
                | Keysym::SUPER_R
                | Keysym::HYPER_L
                | Keysym::HYPER_R
        )
    }
}

impl fmt::Display for Keysym {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(name) = self.name() {
            f.write_str(name)
        } else if let Some(c) = self.to_char() {
            write!(f, "{c}")
        } else {
            write!(f, "0x{:04x}", self.0)
        }
    }
}

const NAMES: &[(&str, Keysym)] = &[
    ("space", Keysym::SPACE),
    ("exclam", Keysym(0x21)),
    ("quotedbl", Keysym(0x22)),
    ("numbersign", Keysym(0x23)),
    ("dollar", Keysym(0x24)),
    ("percent", Keysym(0x25)),
    ("ampersand", Keysym(0x26)),
    ("apostrophe", Keysym(0x27)),
    ("parenleft", Keysym(0x28)),
    ("parenright", Keysym(0x29)),
    ("asterisk", Keysym(0x2a)),
    ("plus", Keysym(0x2b)),
    ("comma", Keysym(0x2c)),
    ("minus", Keysym(0x2d)),
    ("period", Keysym(0x2e)),
    ("slash", Keysym(0x2f)),
    ("colon", Keysym(0x3a)),
    ("semicolon", Keysym(0x3b)),
    ("less", Keysym(0x3c)),
    ("equal", Keysym(0x3d)),
    ("greater", Keysym(0x3e)),
    ("question", Keysym(0x3f)),
    ("at", Keysym(0x40)),
    ("bracketleft", Keysym(0x5b)),
    ("backslash", Keysym(0x5c)),
    ("bracketright", Keysym(0x5d)),
    ("asciicircum", Keysym(0x5e)),
    ("underscore", Keysym(0x5f)),
    ("grave", Keysym(0x60)),
    ("braceleft", Keysym(0x7b)),
    ("bar", Keysym(0x7c)),
    ("braceright", Keysym(0x7d)),
    ("asciitilde", Keysym(0x7e)),
    ("BackSpace", Keysym::BACKSPACE),
    ("Tab", Keysym::TAB),
    ("Return", Keysym::RETURN),
    ("Escape", Keysym::ESCAPE),
    ("Muhenkan", Keysym::MUHENKAN),
    ("Henkan", Keysym::HENKAN),
    ("Henkan_Mode", Keysym::HENKAN),
    ("Hiragana_Katakana", Keysym::HIRAGANA_KATAKANA),
    ("Zenkaku_Hankaku", Keysym::ZENKAKU_HANKAKU),
    ("Home", Keysym::HOME),
    ("Left", Keysym::LEFT),
    ("Up", Keysym::UP),
    ("Right", Keysym::RIGHT),
    ("Down", Keysym::DOWN),
    ("Prior", Keysym::PAGE_UP),
    ("Page_Up", Keysym::PAGE_UP),
    ("Next", Keysym::PAGE_DOWN),
    ("Page_Down", Keysym::PAGE_DOWN),
    ("End", Keysym::END),
    ("Insert", Keysym::INSERT),
    ("Num_Lock", Keysym::NUM_LOCK),
    ("F1", Keysym(0xffbe)),
    ("F2", Keysym(0xffbf)),
    ("F3", Keysym(0xffc0)),
    ("F4", Keysym(0xffc1)),
    ("F5", Keysym(0xffc2)),
    ("F6", Keysym(0xffc3)),
    ("F7", Keysym(0xffc4)),
    ("F8", Keysym(0xffc5)),
    ("F9", Keysym(0xffc6)),
    ("F10", Keysym(0xffc7)),
    ("F11", Keysym(0xffc8)),
    ("F12", Keysym(0xffc9)),
    ("Shift_L", Keysym::SHIFT_L),
    ("Shift_R", Keysym::SHIFT_R),
    ("Control_L", Keysym::CONTROL_L),
    ("Control_R", Keysym::CONTROL_R),
    ("Caps_Lock", Keysym::CAPS_LOCK),
    ("Meta_L", Keysym::META_L),
    ("Meta_R", Keysym::META_R),
    ("Alt_L", Keysym::ALT_L),
    ("Alt_R", Keysym::ALT_R),
    ("Super_L", Keysym::SUPER_L),
    ("Super_R", Keysym::SUPER_R),
    ("Hyper_L", Keysym::HYPER_L),
    ("Hyper_R", Keysym::HYPER_R),
    ("Delete", Keysym::DELETE),
];
