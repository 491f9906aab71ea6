/// Editable UTF-8 text with a byte cursor that always sits on a character
/// boundary.
///
/// Deletion and cursor movement count whole characters, never bytes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextBuffer {
    text: String,
    cursor: usize,
}

impl TextBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Length in bytes.
    pub fn len(&self) -> usize {
        self.text.len()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Cursor position as a byte offset into [`as_str`](Self::as_str).
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Text before the cursor.
    pub fn before_cursor(&self) -> &str {
        &self.text[..self.cursor]
    }

    pub fn clear(&mut self) {
        self.text.clear();
        self.cursor = 0;
    }

    /// Insert `s` at the cursor and move the cursor past it.
    pub fn insert(&mut self, s: &str) {
        self.text.insert_str(self.cursor, s);
        self.cursor += s.len();
    }

    /// Remove up to `count` characters before the cursor.
    pub fn delete_backward(&mut self, count: usize) {
        if count == 0 {
            return;
        }
        let start = self.text[..self.cursor]
            .char_indices()
            .rev()
            .take(count)
            .last()
            .map_or(self.cursor, |(i, _)| i);
        self.text.replace_range(start..self.cursor, "");
        self.cursor = start;
    }

    /// Remove up to `count` characters after the cursor.
    pub fn delete_forward(&mut self, count: usize) {
        let end = self.text[self.cursor..]
            .char_indices()
            .nth(count)
            .map_or(self.text.len(), |(i, _)| self.cursor + i);
        self.text.replace_range(self.cursor..end, "");
    }

    pub fn move_left(&mut self) {
        if let Some(c) = self.text[..self.cursor].chars().next_back() {
            self.cursor -= c.len_utf8();
        }
    }

    pub fn move_right(&mut self) {
        if let Some(c) = self.text[self.cursor..].chars().next() {
            self.cursor += c.len_utf8();
        }
    }

    /// Delete `count` characters before the cursor and insert `s` there.
    pub(super) fn replace_tail(&mut self, count: usize, s: &str) {
        self.delete_backward(count);
        self.insert(s);
    }
}
