//! Single-line text input for the task form.

/// A text input with a character-indexed cursor.
#[derive(Clone, Debug, Default)]
pub struct InputField {
    pub value: String,
    cursor: usize,
}

impl InputField {
    /// Create an input field with the cursor after the initial text.
    pub fn with_value(value: &str) -> Self {
        Self {
            value: value.to_string(),
            cursor: value.chars().count(),
        }
    }

    /// Cursor position in characters.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    fn byte_index(&self, char_idx: usize) -> usize {
        self.value
            .char_indices()
            .nth(char_idx)
            .map_or(self.value.len(), |(i, _)| i)
    }

    /// Insert a character at the cursor.
    pub fn handle_char(&mut self, c: char) {
        let idx = self.byte_index(self.cursor);
        self.value.insert(idx, c);
        self.cursor += 1;
    }

    /// Delete the character before the cursor. Returns whether text changed.
    pub fn handle_backspace(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        self.cursor -= 1;
        let idx = self.byte_index(self.cursor);
        self.value.remove(idx);
        true
    }

    /// Delete the character under the cursor. Returns whether text changed.
    pub fn handle_delete(&mut self) -> bool {
        if self.cursor >= self.value.chars().count() {
            return false;
        }
        let idx = self.byte_index(self.cursor);
        self.value.remove(idx);
        true
    }

    pub fn move_cursor_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_cursor_right(&mut self) {
        if self.cursor < self.value.chars().count() {
            self.cursor += 1;
        }
    }

    pub fn move_home(&mut self) {
        self.cursor = 0;
    }

    pub fn move_end(&mut self) {
        self.cursor = self.value.chars().count();
    }
}
