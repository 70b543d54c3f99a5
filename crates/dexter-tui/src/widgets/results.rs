//! Results list — the ranked catalog in the main pane.
//!
//! # Navigation (when pane is focused)
//!
//! | Key | Action |
//! |-----|--------|
//! | `↑` / `k` | Move cursor up one row |
//! | `↓` / `j` | Move cursor down one row |
//! | `PageUp` / `Ctrl+u` | Up one page |
//! | `PageDown` / `Ctrl+d` | Down one page |
//! | `g` / `G` | First / last row |
//!
//! `offset` is the index of the first visible row; the cursor is always kept
//! inside `offset..offset + height`.

use std::cell::Cell;

use crate::event::{AppEvent, Direction};
use crate::theme::Theme;
use dexter_core::Pokemon;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{
        Block, Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState, StatefulWidget, Widget,
    },
};

const PAGE_STEP: usize = 10;

// ---------------------------------------------------------------------------
// State
// ---------------------------------------------------------------------------

pub struct ResultsState {
    pub rows: Vec<Pokemon>,
    /// Index into `rows` of the highlighted row.
    pub cursor: usize,
    /// Index of the first visible row.
    pub offset: usize,
    pub show_description: bool,
    pub name_width: usize,
    /// Cached from the last render so `handle()` can keep the cursor visible.
    pub(crate) last_height: Cell<usize>,
}

impl Default for ResultsState {
    fn default() -> Self {
        Self {
            rows: Vec::new(),
            cursor: 0,
            offset: 0,
            show_description: true,
            name_width: 14,
            last_height: Cell::new(20),
        }
    }
}

impl ResultsState {
    /// Replace the rows with a fresh search result and return to the top.
    pub fn set_rows(&mut self, rows: Vec<Pokemon>) {
        self.rows = rows;
        self.cursor = 0;
        self.offset = 0;
    }

    pub fn selected(&self) -> Option<&Pokemon> {
        self.rows.get(self.cursor)
    }

    fn height(&self) -> usize {
        self.last_height.get().max(1)
    }

    fn follow_cursor(&mut self) {
        let height = self.height();
        if self.cursor < self.offset {
            self.offset = self.cursor;
        } else if self.cursor >= self.offset + height {
            self.offset = self.cursor + 1 - height;
        }
    }

    pub fn handle(&mut self, event: &AppEvent) {
        let total = self.rows.len();
        if total == 0 {
            return;
        }
        let last = total - 1;

        match event {
            AppEvent::Nav(Direction::Up) => self.cursor = self.cursor.saturating_sub(1),
            AppEvent::Nav(Direction::Down) => self.cursor = (self.cursor + 1).min(last),
            AppEvent::ScrollUp => self.cursor = self.cursor.saturating_sub(PAGE_STEP),
            AppEvent::ScrollDown => self.cursor = (self.cursor + PAGE_STEP).min(last),
            AppEvent::ScrollToTop => self.cursor = 0,
            AppEvent::ScrollToBottom => self.cursor = last,
            _ => return,
        }
        self.follow_cursor();
        tracing::debug!(cursor = self.cursor, offset = self.offset, "results: cursor moved");
    }
}

// ---------------------------------------------------------------------------
// Widget
// ---------------------------------------------------------------------------

pub struct Results<'a> {
    state: &'a ResultsState,
    /// Shown instead of rows when there are none (loading, error, no match).
    empty_message: &'a str,
    focused: bool,
    theme: &'a Theme,
}

impl<'a> Results<'a> {
    pub fn new(
        state: &'a ResultsState,
        empty_message: &'a str,
        focused: bool,
        theme: &'a Theme,
    ) -> Self {
        Self { state, empty_message, focused, theme }
    }
}

impl Widget for Results<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let total = self.state.rows.len();
        let block = Block::bordered()
            .title(format!("Pokémon ({total})"))
            .border_style(self.theme.border(self.focused));
        let inner = block.inner(area);
        block.render(area, buf);

        let height = inner.height as usize;
        self.state.last_height.set(height);

        if total == 0 {
            Paragraph::new(Line::from(Span::styled(
                self.empty_message,
                Style::default().add_modifier(Modifier::DIM),
            )))
            .render(inner, buf);
            return;
        }

        let start = self.state.offset.min(total.saturating_sub(1));
        let end = (start + height).min(total);

        let lines: Vec<Line<'static>> = self.state.rows[start..end]
            .iter()
            .enumerate()
            .map(|(row, pokemon)| {
                let line = render_row(pokemon, self.state, self.theme);
                if start + row == self.state.cursor {
                    line.patch_style(self.theme.result_selected)
                } else {
                    line
                }
            })
            .collect();

        let text_area = Rect { width: inner.width.saturating_sub(1), ..inner };
        let sb_area = Rect {
            x: inner.right().saturating_sub(1),
            width: 1,
            ..inner
        };

        Paragraph::new(lines).render(text_area, buf);

        let mut sb_state = ScrollbarState::new(total)
            .position(start)
            .viewport_content_length(height);
        StatefulWidget::render(
            Scrollbar::new(ScrollbarOrientation::VerticalRight)
                .begin_symbol(None)
                .end_symbol(None),
            sb_area,
            buf,
            &mut sb_state,
        );
    }
}

// ---------------------------------------------------------------------------
// Row rendering
// ---------------------------------------------------------------------------

fn render_row(pokemon: &Pokemon, state: &ResultsState, theme: &Theme) -> Line<'static> {
    let mut spans: Vec<Span<'static>> = vec![
        Span::styled(format!("#{:<5}", pokemon.padded_id()), theme.result_id),
        Span::styled(
            format!("{:<width$} ", pokemon.name, width = state.name_width),
            theme.result_name,
        ),
    ];

    for t in &pokemon.types {
        spans.push(Span::styled(format!(" {t} "), theme.type_style(t)));
        spans.push(Span::raw(" "));
    }

    for (i, ability) in pokemon.abilities.iter().enumerate() {
        if i > 0 {
            spans.push(Span::raw(", "));
        }
        spans.push(Span::styled(ability.clone(), theme.ability_style(ability)));
    }

    if state.show_description {
        spans.push(Span::styled(
            format!("  {}", pokemon.description),
            theme.result_description,
        ));
    }

    Line::from(spans)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn rows(n: u32) -> Vec<Pokemon> {
        (1..=n)
            .map(|id| Pokemon {
                id,
                name: format!("mon{id}"),
                types: vec!["normal".into()],
                abilities: vec!["run-away".into()],
                description: String::new(),
                image: None,
                stats: vec![],
                height: 1,
                weight: 1,
            })
            .collect()
    }

    fn state(n: u32, height: usize) -> ResultsState {
        let mut s = ResultsState::default();
        s.last_height.set(height);
        s.set_rows(rows(n));
        s
    }

    #[test]
    fn cursor_clamps_at_both_ends() {
        let mut s = state(3, 10);
        s.handle(&AppEvent::Nav(Direction::Up));
        assert_eq!(s.cursor, 0);
        for _ in 0..5 {
            s.handle(&AppEvent::Nav(Direction::Down));
        }
        assert_eq!(s.cursor, 2);
        assert_eq!(s.selected().map(|p| p.id), Some(3));
    }

    #[test]
    fn moving_past_the_window_scrolls() {
        let mut s = state(50, 5);
        for _ in 0..7 {
            s.handle(&AppEvent::Nav(Direction::Down));
        }
        assert_eq!(s.cursor, 7);
        assert_eq!(s.offset, 3);
        s.handle(&AppEvent::ScrollToTop);
        assert_eq!((s.cursor, s.offset), (0, 0));
        s.handle(&AppEvent::ScrollToBottom);
        assert_eq!((s.cursor, s.offset), (49, 45));
    }

    #[test]
    fn paging_moves_ten_rows() {
        let mut s = state(50, 5);
        s.handle(&AppEvent::ScrollDown);
        assert_eq!(s.cursor, 10);
        s.handle(&AppEvent::ScrollUp);
        assert_eq!(s.cursor, 0);
    }

    #[test]
    fn new_rows_reset_to_top() {
        let mut s = state(50, 5);
        s.handle(&AppEvent::ScrollToBottom);
        s.set_rows(rows(2));
        assert_eq!((s.cursor, s.offset), (0, 0));
    }

    #[test]
    fn empty_rows_ignore_navigation() {
        let mut s = ResultsState::default();
        s.handle(&AppEvent::Nav(Direction::Down));
        assert!(s.selected().is_none());
    }
}
