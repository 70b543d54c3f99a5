//! Type list — the left pane for picking the type filter.
//!
//! # Navigation
//! - `↑`/`k` and `↓`/`j` move the cursor.
//! - `Enter` (or `→`/`l`) applies the type under the cursor.
//!
//! The first entry is always `all`; the rest are the distinct types of the
//! loaded catalog in alphabetical order.

use crate::event::{AppEvent, Direction};
use crate::theme::Theme;
use dexter_core::TypeFilter;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, List, ListItem, ListState, StatefulWidget, Widget},
};

// ---------------------------------------------------------------------------
// State
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
pub struct TypeListState {
    /// Distinct type tags, without the leading `all` entry.
    pub types: Vec<String>,
    /// Index into the visible list (0 = `all`).
    pub cursor: usize,
}

impl TypeListState {
    pub fn set_types(&mut self, types: Vec<String>) {
        self.types = types;
        self.cursor = self.cursor.min(self.types.len());
    }

    fn filter_at(&self, idx: usize) -> TypeFilter {
        match idx {
            0 => TypeFilter::All,
            n => self
                .types
                .get(n - 1)
                .map(|t| TypeFilter::Only(t.clone()))
                .unwrap_or_default(),
        }
    }

    fn position_of(&self, filter: &TypeFilter) -> Option<usize> {
        match filter {
            TypeFilter::All => Some(0),
            TypeFilter::Only(t) => self.types.iter().position(|x| x == t).map(|i| i + 1),
        }
    }

    /// The filter after `current`, wrapping back to `all`. Also moves the
    /// cursor onto it so the pane tracks `t` presses.
    pub fn cycle(&mut self, current: &TypeFilter) -> TypeFilter {
        let len = self.types.len() + 1;
        let next = self.position_of(current).map(|i| (i + 1) % len).unwrap_or(0);
        self.cursor = next;
        self.filter_at(next)
    }

    /// Handle an [`AppEvent`]. Returns the chosen filter on `Enter`.
    pub fn handle(&mut self, event: &AppEvent) -> Option<TypeFilter> {
        match event {
            AppEvent::Nav(Direction::Up) => {
                self.cursor = self.cursor.saturating_sub(1);
                tracing::debug!(cursor = self.cursor, "types: cursor up");
                None
            }
            AppEvent::Nav(Direction::Down) => {
                if self.cursor < self.types.len() {
                    self.cursor += 1;
                }
                tracing::debug!(cursor = self.cursor, "types: cursor down");
                None
            }
            AppEvent::Enter | AppEvent::Nav(Direction::Right) => {
                let filter = self.filter_at(self.cursor);
                tracing::debug!(filter = %filter, "types: selected");
                Some(filter)
            }
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Widget
// ---------------------------------------------------------------------------

pub struct TypeList<'a> {
    state: &'a TypeListState,
    active: &'a TypeFilter,
    focused: bool,
    theme: &'a Theme,
}

impl<'a> TypeList<'a> {
    pub fn new(
        state: &'a TypeListState,
        active: &'a TypeFilter,
        focused: bool,
        theme: &'a Theme,
    ) -> Self {
        Self { state, active, focused, theme }
    }
}

impl Widget for TypeList<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::bordered()
            .title("Types")
            .border_style(self.theme.border(self.focused));
        let inner = block.inner(area);
        block.render(area, buf);

        let marker = |active: bool| if active { "● " } else { "  " };

        let mut items = vec![ListItem::new(Line::from(format!(
            "{}all",
            marker(*self.active == TypeFilter::All)
        )))];
        items.extend(self.state.types.iter().map(|t| {
            let active = matches!(self.active, TypeFilter::Only(a) if a == t);
            ListItem::new(Line::from(vec![
                Span::raw(marker(active)),
                Span::styled(format!(" {t} "), self.theme.type_style(t)),
            ]))
        }));

        let list =
            List::new(items).highlight_style(Style::default().add_modifier(Modifier::REVERSED));

        let cursor = self.focused.then_some(self.state.cursor);
        let mut list_state = ListState::default().with_selected(cursor);
        StatefulWidget::render(list, inner, buf, &mut list_state);
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
