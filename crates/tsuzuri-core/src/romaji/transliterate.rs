use tracing::trace;

use super::buffer::TextBuffer;
use super::table;

/// Number of ASCII bytes before the cursor the transducer looks at.
const CONTEXT: usize = 4;

impl TextBuffer {
    /// Rewrite the romaji just before the cursor into kana.
    ///
    /// Runs after every single-character insertion. Only the trailing ASCII
    /// run (at most four bytes) is inspected; any kana already in the buffer
    /// stops the match. When nothing matches the buffer is left alone so the
    /// pending romaji can be completed by later input.
    pub fn transliterate(&mut self) {
        let [c0, c1, c2, c3] = self.ascii_context();

        if c2 == b'n' && c3 == b'\'' {
            return self.rewrite(2, "ん");
        }
        if c3 == 0 {
            return;
        }
        if c3 == b'.' {
            return self.rewrite(1, "。");
        }

        // Geminate consonant: "kk" becomes "っk". `n` is excluded so that
        // "nn" reaches the pair table and yields "ん".
        if c2 == c3 && c3 != b'n' && table::has_pairs(c3) {
            let mut consonant = [0u8; 4];
            let consonant = (c3 as char).encode_utf8(&mut consonant);
            self.rewrite(2, "っ");
            self.insert(consonant);
            return self.transliterate();
        }

        match (c1, c2, c3) {
            (b's', b'h', b'i') => return self.rewrite(3, "し"),
            (b'c', b'h', b'i') => return self.rewrite(3, "ち"),
            (b'x' | b'l', b't', b'u') => return self.rewrite(3, "っ"),
            (b't', b's', b'u') if matches!(c0, b'x' | b'l') => return self.rewrite(4, "っ"),
            (b't', b's', b'u') => return self.rewrite(3, "つ"),
            _ => {}
        }

        if let Some(small) = table::youon(c3) {
            let c1 = match (c1, c2) {
                (b's', b'h') => b's',
                (b'c', b'h') => b't',
                (c1, b'y') => c1,
                _ => 0,
            };
            if c1 != 0 {
                if matches!(c1, b'x' | b'l') {
                    return self.rewrite(3, small);
                }
                if let Some(mora) = table::pair(c1, b'i') {
                    return self.rewrite(3, &format!("{mora}{small}"));
                }
            }
        }

        if c2 != 0 {
            if let Some(kana) = table::pair(c2, c3) {
                return self.rewrite(2, kana);
            }
        }

        if let Some(kana) = table::single(c3) {
            self.rewrite(1, kana);
        }
    }

    /// Turn a bare trailing `n` before the cursor into "ん".
    ///
    /// Romaji `n` stays ambiguous until the next vowel arrives, so this is
    /// applied only when the text is handed off for conversion.
    pub fn convert_trailing_n(&mut self) {
        if self.before_cursor().ends_with('n') {
            self.rewrite(1, "ん");
        }
    }

    /// Trailing ASCII bytes before the cursor, right-aligned and zero-padded.
    fn ascii_context(&self) -> [u8; CONTEXT] {
        let mut context = [0u8; CONTEXT];
        let before = self.before_cursor().as_bytes();
        for (slot, &b) in context.iter_mut().rev().zip(before.iter().rev()) {
            if !b.is_ascii() {
                break;
            }
            *slot = b;
        }
        context
    }

    fn rewrite(&mut self, count: usize, kana: &str) {
        trace!(count, kana, "transliterate");
        self.replace_tail(count, kana);
    }
}
