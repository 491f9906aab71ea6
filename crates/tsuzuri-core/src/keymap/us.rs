use super::{Keycode, Keymap, ModifierState};
use crate::keysym::Keysym;

/// Keymap codes are evdev codes shifted by this amount.
const EVDEV_OFFSET: u32 = 8;

const MOD_NAMES: [&str; 8] = [
    "Shift", "Lock", "Control", "Mod1", "Mod2", "Mod3", "Mod4", "Mod5",
];
const SHIFT: u32 = 0;
const LOCK: u32 = 1;
const CONTROL: u32 = 2;

/// Keys that produce a character, as (evdev code, unshifted, shifted).
const PRINTABLE: &[(u32, char, char)] = &[
    (2, '1', '!'),
    (3, '2', '@'),
    (4, '3', '#'),
    (5, '4', '$'),
    (6, '5', '%'),
    (7, '6', '^'),
    (8, '7', '&'),
    (9, '8', '*'),
    (10, '9', '('),
    (11, '0', ')'),
    (12, '-', '_'),
    (13, '=', '+'),
    (16, 'q', 'Q'),
    (17, 'w', 'W'),
    (18, 'e', 'E'),
    (19, 'r', 'R'),
    (20, 't', 'T'),
    (21, 'y', 'Y'),
    (22, 'u', 'U'),
    (23, 'i', 'I'),
    (24, 'o', 'O'),
    (25, 'p', 'P'),
    (26, '[', '{'),
    (27, ']', '}'),
    (30, 'a', 'A'),
    (31, 's', 'S'),
    (32, 'd', 'D'),
    (33, 'f', 'F'),
    (34, 'g', 'G'),
    (35, 'h', 'H'),
    (36, 'j', 'J'),
    (37, 'k', 'K'),
    (38, 'l', 'L'),
    (39, ';', ':'),
    (40, '\'', '"'),
    (41, '`', '~'),
    (43, '\\', '|'),
    (44, 'z', 'Z'),
    (45, 'x', 'X'),
    (46, 'c', 'C'),
    (47, 'v', 'V'),
    (48, 'b', 'B'),
    (49, 'n', 'N'),
    (50, 'm', 'M'),
    (51, ',', '<'),
    (52, '.', '>'),
    (53, '/', '?'),
    (57, ' ', ' '),
];

/// Keys with a single named symbol, as (evdev code, keysym).
const SPECIAL: &[(u32, Keysym)] = &[
    (1, Keysym::ESCAPE),
    (14, Keysym::BACKSPACE),
    (15, Keysym::TAB),
    (28, Keysym::RETURN),
    (29, Keysym::CONTROL_L),
    (42, Keysym::SHIFT_L),
    (54, Keysym::SHIFT_R),
    (56, Keysym::ALT_L),
    (58, Keysym::CAPS_LOCK),
    (59, Keysym(0xffbe)),
    (60, Keysym(0xffbf)),
    (61, Keysym(0xffc0)),
    (62, Keysym(0xffc1)),
    (63, Keysym(0xffc2)),
    (64, Keysym(0xffc3)),
    (65, Keysym(0xffc4)),
    (66, Keysym(0xffc5)),
    (67, Keysym(0xffc6)),
    (68, Keysym(0xffc7)),
    (69, Keysym::NUM_LOCK),
    (85, Keysym::ZENKAKU_HANKAKU),
    (87, Keysym(0xffc8)),
    (88, Keysym(0xffc9)),
    (92, Keysym::HENKAN),
    (93, Keysym::HIRAGANA_KATAKANA),
    (94, Keysym::MUHENKAN),
    (97, Keysym::CONTROL_R),
    (100, Keysym::ALT_R),
    (102, Keysym::HOME),
    (103, Keysym::UP),
    (104, Keysym::PAGE_UP),
    (105, Keysym::LEFT),
    (106, Keysym::RIGHT),
    (107, Keysym::END),
    (108, Keysym::DOWN),
    (109, Keysym::PAGE_DOWN),
    (110, Keysym::INSERT),
    (111, Keysym::DELETE),
    (125, Keysym::SUPER_L),
    (126, Keysym::SUPER_R),
];

/// A built-in US QWERTY layout with the standard modifier assignment.
///
/// Used when no compositor keymap is available (the CLI simulator) and in
/// tests.
#[derive(Debug, Clone, Copy, Default)]
pub struct UsKeymap;

impl UsKeymap {
    pub fn new() -> Self {
        Self
    }

    /// Key code producing `c`, and whether Shift is needed for it.
    pub fn keycode_for_char(&self, c: char) -> Option<(Keycode, bool)> {
        PRINTABLE.iter().find_map(|&(evdev, base, shifted)| {
            if base == c {
                Some((Keycode(evdev + EVDEV_OFFSET), false))
            } else if shifted == c {
                Some((Keycode(evdev + EVDEV_OFFSET), true))
            } else {
                None
            }
        })
    }

    /// Key code whose unmodified symbol is `sym`.
    pub fn keycode_for_keysym(&self, sym: Keysym) -> Option<Keycode> {
        self.keycodes()
            .into_iter()
            .find(|&code| self.base_keysym(code) == sym)
    }

    /// Bit mask for the named modifiers.
    pub fn mask(&self, names: &[&str]) -> u32 {
        names
            .iter()
            .filter_map(|name| self.mod_index(name))
            .fold(0, |mask, index| mask | 1 << index)
    }
}

fn printable(code: Keycode) -> Option<(char, char)> {
    let evdev = code.0.checked_sub(EVDEV_OFFSET)?;
    PRINTABLE
        .iter()
        .find(|&&(e, _, _)| e == evdev)
        .map(|&(_, base, shifted)| (base, shifted))
}

fn special(code: Keycode) -> Option<Keysym> {
    let evdev = code.0.checked_sub(EVDEV_OFFSET)?;
    SPECIAL
        .iter()
        .find(|&&(e, _)| e == evdev)
        .map(|&(_, sym)| sym)
}

/// The character `code` types under `mods`, before control mapping.
fn level_char(code: Keycode, mods: &ModifierState) -> Option<char> {
    let (base, shifted) = printable(code)?;
    let caps = mods.is_active(LOCK) && base.is_ascii_alphabetic();
    if mods.is_active(SHIFT) != caps {
        Some(shifted)
    } else {
        Some(base)
    }
}

impl Keymap for UsKeymap {
    fn keycodes(&self) -> Vec<Keycode> {
        let mut codes: Vec<Keycode> = PRINTABLE
            .iter()
            .map(|&(evdev, _, _)| evdev)
            .chain(SPECIAL.iter().map(|&(evdev, _)| evdev))
            .map(|evdev| Keycode(evdev + EVDEV_OFFSET))
            .collect();
        codes.sort();
        codes
    }

    fn keysym(&self, code: Keycode, mods: &ModifierState) -> Keysym {
        if let Some(c) = level_char(code, mods) {
            return Keysym::from_char(c).unwrap_or(Keysym::NO_SYMBOL);
        }
        special(code).unwrap_or(Keysym::NO_SYMBOL)
    }

    fn text(&self, code: Keycode, mods: &ModifierState) -> Option<String> {
        if let Some(c) = level_char(code, mods) {
            if mods.is_active(CONTROL) && matches!(c.to_ascii_uppercase(), '@'..='_') {
                let control = (c.to_ascii_uppercase() as u8) & 0x1f;
                return Some(char::from(control).to_string());
            }
            return Some(c.to_string());
        }
        let c = match special(code)? {
            Keysym::RETURN => '\r',
            Keysym::TAB => '\t',
            Keysym::BACKSPACE => '\u{8}',
            Keysym::ESCAPE => '\u{1b}',
            Keysym::DELETE => '\u{7f}',
            _ => return None,
        };
        Some(c.to_string())
    }

    fn mod_index(&self, name: &str) -> Option<u32> {
        MOD_NAMES
            .iter()
            .position(|&n| n == name)
            .map(|i| i as u32)
    }

    fn key_repeats(&self, code: Keycode) -> bool {
        match special(code) {
            Some(sym) => {
                !sym.is_modifier()
                    && !matches!(
                        sym,
                        Keysym::CAPS_LOCK | Keysym::NUM_LOCK | Keysym::META_L | Keysym::META_R
                    )
            }
            None => printable(code).is_some(),
        }
    }
}
