//! Kana helpers used when building fallback candidates.

/// Distance from a hiragana code point to the matching katakana.
const KATAKANA_SHIFT: u32 = 0x60;

/// Hiragana with a katakana twin at [`KATAKANA_SHIFT`]: ぁ..ゖ plus the
/// iteration marks ゝ ゞ.
fn has_katakana_twin(c: char) -> bool {
    matches!(c, '\u{3041}'..='\u{3096}' | '\u{309D}' | '\u{309E}')
}

/// Katakana spelling of `s`. Anything that is not hiragana (ー, ASCII,
/// kanji) is kept as is.
pub fn to_katakana(s: &str) -> String {
    s.chars()
        .map(|c| {
            if has_katakana_twin(c) {
                char::from_u32(c as u32 + KATAKANA_SHIFT).unwrap_or(c)
            } else {
                c
            }
        })
        .collect()
}
