//! Search input along the bottom of the screen, with the active sort key and
//! type filter shown on its right.
//!
//! Editing goes through [`LineEdit`]. A change only marks the query dirty;
//! the app shell runs the search once typing has paused for the debounce
//! window.

use super::line_edit::{Edit, LineEdit};
use crate::event::AppEvent;
use crate::theme::Theme;
use dexter_core::{SortKey, TypeFilter};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction as LayoutDir, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Paragraph, Widget},
};

#[derive(Debug, Default)]
pub struct QueryBarState {
    line: LineEdit,
}

impl QueryBarState {
    pub fn with_query(query: impl Into<String>) -> Self {
        Self { line: LineEdit::new(query) }
    }

    /// The raw query as typed.
    pub fn query(&self) -> &str {
        self.line.text()
    }

    /// Feed an editing key. Returns `true` when the query text changed.
    pub fn handle(&mut self, event: &AppEvent) -> bool {
        let edit = self.line.apply(event);
        if edit != Edit::Ignored {
            tracing::debug!(query = %self.line.text(), cursor = self.line.cursor(), ?edit, "query edited");
        }
        edit == Edit::Text
    }
}

// ---------------------------------------------------------------------------
// Widget
// ---------------------------------------------------------------------------

pub struct QueryBar<'a> {
    state: &'a QueryBarState,
    sort: SortKey,
    type_filter: &'a TypeFilter,
    focused: bool,
    theme: &'a Theme,
}

impl<'a> QueryBar<'a> {
    pub fn new(
        state: &'a QueryBarState,
        sort: SortKey,
        type_filter: &'a TypeFilter,
        focused: bool,
        theme: &'a Theme,
    ) -> Self {
        Self { state, sort, type_filter, focused, theme }
    }

    /// Absolute terminal position of the text cursor within this widget's
    /// rendered area. Pass to `frame.set_cursor_position()` after rendering.
    pub fn cursor_position(&self, area: Rect) -> (u16, u16) {
        // Inside the 1-cell border.
        let x = area
            .x
            .saturating_add(1)
            .saturating_add(self.state.line.cursor_cols())
            .min(area.right().saturating_sub(1));
        (x, area.y + 1)
    }
}

/// Split a query into spans, highlighting the `:` and `::` mode markers.
fn query_spans<'q>(query: &'q str, marker: Style) -> Vec<Span<'q>> {
    let mut spans = Vec::new();
    for (i, token) in query.split(' ').enumerate() {
        if i > 0 {
            spans.push(Span::raw(" "));
        }
        let prefix_len = if token.starts_with("::") {
            2
        } else if token.starts_with(':') {
            1
        } else {
            0
        };
        if prefix_len > 0 {
            spans.push(Span::styled(&token[..prefix_len], marker));
        }
        if prefix_len < token.len() {
            spans.push(Span::raw(&token[prefix_len..]));
        }
    }
    spans
}

impl Widget for QueryBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::bordered()
            .title("Search")
            .border_style(self.theme.border(self.focused));

        let inner = block.inner(area);
        block.render(area, buf);

        let status = format!("sort:{}  type:{}", self.sort, self.type_filter);
        let chunks = Layout::default()
            .direction(LayoutDir::Horizontal)
            .constraints([Constraint::Fill(1), Constraint::Length(status.len() as u16 + 1)])
            .split(inner);

        let query_line = if self.state.query().is_empty() && !self.focused {
            Line::from(Span::styled(
                "press / to search  (:type  ::ability)",
                Style::default().add_modifier(Modifier::DIM),
            ))
        } else {
            Line::from(query_spans(self.state.query(), self.theme.search_highlight))
        };
        Paragraph::new(query_line).render(chunks[0], buf);

        Paragraph::new(Line::from(Span::styled(status, self.theme.status_hint)))
            .render(chunks[1], buf);
    }
}
