//! Single-line text editing shared by the query bar and the `:` line.
//!
//! The cursor is tracked as a char index, so it doubles as the on-screen
//! column offset for the narrow input we accept.

use crate::event::{AppEvent, Direction};

/// Outcome of feeding one [`AppEvent`] to a [`LineEdit`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edit {
    /// The text changed.
    Text,
    /// Only the cursor moved.
    Cursor,
    /// The event is not an editing event, or had nothing to act on.
    Ignored,
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct LineEdit {
    text: String,
    /// Cursor position in chars, `0..=text.chars().count()`.
    cursor: usize,
}

impl LineEdit {
    /// A line holding `text` with the cursor at the end.
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        let cursor = text.chars().count();
        Self { text, cursor }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    pub fn clear(&mut self) {
        self.text.clear();
        self.cursor = 0;
    }

    /// Columns occupied by the text left of the cursor, saturated to `u16`.
    pub fn cursor_cols(&self) -> u16 {
        u16::try_from(self.cursor).unwrap_or(u16::MAX)
    }

    pub fn apply(&mut self, event: &AppEvent) -> Edit {
        match event {
            AppEvent::Char(c) => {
                let at = self.byte_at(self.cursor);
                self.text.insert(at, *c);
                self.cursor += 1;
                Edit::Text
            }
            AppEvent::Backspace if self.cursor > 0 => {
                self.cursor -= 1;
                let at = self.byte_at(self.cursor);
                self.text.remove(at);
                Edit::Text
            }
            AppEvent::Nav(Direction::Left) if self.cursor > 0 => {
                self.cursor -= 1;
                Edit::Cursor
            }
            AppEvent::Nav(Direction::Right) if self.cursor < self.text.chars().count() => {
                self.cursor += 1;
                Edit::Cursor
            }
            _ => Edit::Ignored,
        }
    }

    fn byte_at(&self, chars: usize) -> usize {
        self.text
            .char_indices()
            .nth(chars)
            .map_or(self.text.len(), |(i, _)| i)
    }
}
