//! Static romaji tables.
//!
//! Lookups are keyed on ASCII bytes. A consonant "has a pair table" when
//! [`pair`] can produce kana for it; only those consonants take part in
//! doubling and youon composition.

/// Kana for a lone trailing byte (vowels and full-width punctuation).
pub(super) fn single(c: u8) -> Option<&'static str> {
    let kana = match c {
        b'-' => "ー",
        b'a' => "あ",
        b'e' => "え",
        b'i' => "い",
        b'o' => "お",
        b'u' => "う",
        b',' => "、",
        b'.' => "。",
        b'/' => "・",
        b'<' => "＜",
        b'>' => "＞",
        b'?' => "？",
        b'[' => "「",
        b']' => "」",
        b'{' => "｛",
        b'}' => "｝",
        b'~' => "〜",
        b'!' => "！",
        b'@' => "＠",
        b'#' => "＃",
        b'$' => "＄",
        b'%' => "％",
        b'^' => "＾",
        b'&' => "＆",
        b'*' => "＊",
        b'(' => "（",
        b')' => "）",
        b'+' => "＋",
        b'`' => "｀",
        b'1' => "１",
        b'2' => "２",
        b'3' => "３",
        b'4' => "４",
        b'5' => "５",
        b'6' => "６",
        b'7' => "７",
        b'8' => "８",
        b'9' => "９",
        b'0' => "０",
        b'=' => "＝",
        b'|' => "｜",
        b'\\' => "￥",
        _ => return None,
    };
    Some(kana)
}

/// Small kana appended after an `i`-row mora to form a youon.
pub(super) fn youon(c: u8) -> Option<&'static str> {
    match c {
        b'a' => Some("ゃ"),
        b'u' => Some("ゅ"),
        b'o' => Some("ょ"),
        _ => None,
    }
}

/// True when `c` is a consonant with its own pair table.
pub(super) fn has_pairs(c: u8) -> bool {
    matches!(
        c,
        b'b' | b'd'
            | b'f'
            | b'g'
            | b'h'
            | b'j'
            | b'k'
            | b'l'
            | b'm'
            | b'n'
            | b'p'
            | b'r'
            | b's'
            | b't'
            | b'v'
            | b'w'
            | b'x'
            | b'y'
            | b'z'
    )
}

/// Kana for a consonant followed by `next`.
///
/// `n` followed by another consonant yields `ん` with that consonant kept
/// as ASCII so it can start the next mora.
pub(super) fn pair(consonant: u8, next: u8) -> Option<&'static str> {
    let kana = match (consonant, next) {
        (b'b', b'a') => "ば",
        (b'b', b'e') => "べ",
        (b'b', b'i') => "び",
        (b'b', b'o') => "ぼ",
        (b'b', b'u') => "ぶ",

        (b'd', b'a') => "だ",
        (b'd', b'e') => "で",
        (b'd', b'i') => "ぢ",
        (b'd', b'o') => "ど",
        (b'd', b'u') => "づ",

        (b'f', b'a') => "ふぁ",
        (b'f', b'e') => "ふぇ",
        (b'f', b'i') => "ふぃ",
        (b'f', b'o') => "ふぉ",
        (b'f', b'u') => "ふ",

        (b'g', b'a') => "が",
        (b'g', b'e') => "げ",
        (b'g', b'i') => "ぎ",
        (b'g', b'o') => "ご",
        (b'g', b'u') => "ぐ",

        (b'h', b'a') => "は",
        (b'h', b'e') => "へ",
        (b'h', b'i') => "ひ",
        (b'h', b'o') => "ほ",
        (b'h', b'u') => "ふ",

        (b'j', b'a') => "じゃ",
        (b'j', b'e') => "じぇ",
        (b'j', b'i') => "じ",
        (b'j', b'o') => "じょ",
        (b'j', b'u') => "じゅ",

        (b'k', b'a') => "か",
        (b'k', b'e') => "け",
        (b'k', b'i') => "き",
        (b'k', b'o') => "こ",
        (b'k', b'u') => "く",

        (b'l' | b'x', b'a') => "ぁ",
        (b'l' | b'x', b'e') => "ぇ",
        (b'l' | b'x', b'i') => "ぃ",
        (b'l' | b'x', b'o') => "ぉ",
        (b'l' | b'x', b'u') => "ぅ",

        (b'm', b'a') => "ま",
        (b'm', b'e') => "め",
        (b'm', b'i') => "み",
        (b'm', b'o') => "も",
        (b'm', b'u') => "む",

        (b'n', b'a') => "な",
        (b'n', b'e') => "ね",
        (b'n', b'i') => "に",
        (b'n', b'o') => "の",
        (b'n', b'u') => "ぬ",
        (b'n', b'n') => "ん",
        (b'n', b'b') => "んb",
        (b'n', b'd') => "んd",
        (b'n', b'f') => "んf",
        (b'n', b'g') => "んg",
        (b'n', b'h') => "んh",
        (b'n', b'j') => "んj",
        (b'n', b'k') => "んk",
        (b'n', b'l') => "んl",
        (b'n', b'm') => "んm",
        (b'n', b'p') => "んp",
        (b'n', b'r') => "んr",
        (b'n', b's') => "んs",
        (b'n', b't') => "んt",
        (b'n', b'v') => "んv",
        (b'n', b'w') => "んw",
        (b'n', b'x') => "んx",
        (b'n', b'y') => "んy",
        (b'n', b'z') => "んz",

        (b'p', b'a') => "ぱ",
        (b'p', b'e') => "ぺ",
        (b'p', b'i') => "ぴ",
        (b'p', b'o') => "ぽ",
        (b'p', b'u') => "ぷ",

        (b'r', b'a') => "ら",
        (b'r', b'e') => "れ",
        (b'r', b'i') => "り",
        (b'r', b'o') => "ろ",
        (b'r', b'u') => "る",

        (b's', b'a') => "さ",
        (b's', b'e') => "せ",
        (b's', b'i') => "し",
        (b's', b'o') => "そ",
        (b's', b'u') => "す",

        (b't', b'a') => "た",
        (b't', b'e') => "て",
        (b't', b'i') => "ち",
        (b't', b'o') => "と",
        (b't', b'u') => "つ",

        (b'v', b'a') => "ゔぁ",
        (b'v', b'e') => "ゔぇ",
        (b'v', b'i') => "ゔぃ",
        (b'v', b'o') => "ゔぉ",
        (b'v', b'u') => "ゔ",

        (b'w', b'a') => "わ",
        (b'w', b'e') => "うぇ",
        (b'w', b'i') => "うぃ",
        (b'w', b'o') => "を",
        (b'w', b'u') => "う",

        (b'y', b'a') => "や",
        (b'y', b'e') => "いぇ",
        (b'y', b'i') => "い",
        (b'y', b'o') => "よ",
        (b'y', b'u') => "ゆ",

        (b'z', b'a') => "ざ",
        (b'z', b'e') => "ぜ",
        (b'z', b'i') => "じ",
        (b'z', b'o') => "ぞ",
        (b'z', b'u') => "ず",

        _ => return None,
    };
    Some(kana)
}
