//! Composition buffer and romaji-to-kana transliteration.
//!
//! The transducer is a fixed, precedence-ordered set of rules applied to the
//! ASCII bytes just before the cursor after every insertion. It handles
//! sokuon (っ), hatsuon (ん) and yōon (きゃ) without any lookahead.

mod buffer;
mod table;
mod transliterate;

pub use buffer::TextBuffer;
