//! The `:` line drawn over the bottom row.
//!
//! `:` opens it from any pane but the query bar. The app shell runs the
//! command on `Enter` and closes the line on `Escape`; a failed command
//! leaves its message here until the next key. Commands live in
//! [`crate::commands`].

use super::line_edit::LineEdit;
use crate::event::AppEvent;
use crate::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Modifier,
    text::{Line, Span},
    widgets::{Clear, Widget},
};

#[derive(Debug, Default)]
pub struct CommandBarState {
    line: LineEdit,
    /// Error message from the last failed command, cleared on the next key.
    pub error: Option<String>,
}

impl CommandBarState {
    /// Text typed after the `:` prompt.
    pub fn input(&self) -> &str {
        self.line.text()
    }

    /// Reset to a blank, error-free state. Call when opening the bar.
    pub fn clear(&mut self) {
        self.line.clear();
        self.error = None;
    }

    /// Any key dismisses a pending error; editing keys go to the line.
    /// `Enter` and `Escape` are handled by the app shell.
    pub fn handle(&mut self, event: &AppEvent) {
        self.error = None;
        self.line.apply(event);
    }

    /// Terminal column of the text cursor, one past the `:` prompt.
    pub fn cursor_col(&self, area: Rect) -> u16 {
        area.x
            .saturating_add(1)
            .saturating_add(self.line.cursor_cols())
            .min(area.right().saturating_sub(1))
    }
}

// ---------------------------------------------------------------------------
// Widget
// ---------------------------------------------------------------------------

/// Single-row command-bar overlay. The caller passes a 1-row `Rect`.
pub struct CommandBar<'a> {
    state: &'a CommandBarState,
    theme: &'a Theme,
}

impl<'a> CommandBar<'a> {
    pub fn new(state: &'a CommandBarState, theme: &'a Theme) -> Self {
        Self { state, theme }
    }
}

impl Widget for CommandBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Clear.render(area, buf);

        let line = if let Some(ref err) = self.state.error {
            Line::from(Span::styled(format!("E  {err}"), self.theme.status_error))
        } else {
            Line::from(vec![
                Span::styled(
                    ":",
                    self.theme.border_command_bar.add_modifier(Modifier::BOLD),
                ),
                Span::raw(self.state.input()),
            ])
        };

        buf.set_line(area.x, area.y, &line, area.width);
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
