use tsuzuri_core::romaji::TextBuffer;

/// Feed `input` through the transliterator one character at a time, the
/// way a seat does while composing.
pub fn transliterate(input: &str, finish: bool) -> String {
    let mut buffer = TextBuffer::new();
    let mut utf8 = [0u8; 4];
    for c in input.chars() {
        buffer.insert(c.encode_utf8(&mut utf8));
        buffer.transliterate();
    }
    if finish {
        buffer.convert_trailing_n();
    }
    buffer.as_str().to_string()
}

pub fn romaji_cmd(input: &str, finish: bool) {
    println!("{}", transliterate(input, finish));
}
