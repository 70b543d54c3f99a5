//! Help popup — centred floating overlay listing keybindings and the query
//! syntax.
//!
//! Toggle with `?`; close with `?` or `Escape`.

use crate::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, Clear, Paragraph, Widget},
};

const BINDINGS: &[(&str, &str)] = &[
    ("q  /  Ctrl+c", "Quit"),
    ("Tab", "Cycle focus: types → results → search"),
    ("/", "Focus the search bar"),
    ("Escape", "Leave search bar / close overlay"),
    ("↑ k  /  ↓ j", "Move the cursor"),
    ("PageUp / PageDown", "Move a page"),
    ("g  /  G", "First / last result"),
    ("Enter", "Open details / apply type"),
    ("s", "Cycle sort order"),
    ("t", "Cycle type filter"),
    (":", "Command line (q, help, theme, sort, type, top)"),
    ("?", "Toggle this help popup"),
];

const SYNTAX: &[(&str, &str)] = &[
    ("pika 25", "Name or dex number"),
    (":fire", "Type"),
    ("::static", "Ability"),
    (":fire ::blaze char", "Modes stick until the next marker"),
];

pub struct HelpPopup<'a> {
    theme: &'a Theme,
}

impl<'a> HelpPopup<'a> {
    pub fn new(theme: &'a Theme) -> Self {
        Self { theme }
    }
}

impl Widget for HelpPopup<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let height = (BINDINGS.len() + SYNTAX.len() + 5) as u16;
        let popup = centered_rect(72, height, area);
        Clear.render(popup, buf);

        let block = Block::bordered()
            .title(" dexter — keys (? to close) ")
            .border_style(self.theme.border_focused);

        let inner = block.inner(popup);
        block.render(popup, buf);

        let key_style = self.theme.result_name.add_modifier(Modifier::BOLD);
        let row = |(key, desc): &(&'static str, &'static str)| {
            Line::from(vec![
                Span::styled(format!("  {:<22}", key), key_style),
                Span::raw(*desc),
            ])
        };

        let mut lines: Vec<Line> = BINDINGS.iter().map(row).collect();
        lines.push(Line::raw(""));
        lines.push(Line::from(Span::styled("  Search syntax", self.theme.search_highlight)));
        lines.extend(SYNTAX.iter().map(row));

        Paragraph::new(lines).render(inner, buf);
    }
}

/// A `width` × `height` rectangle centred in `area`, shrunk to fit.
pub fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let x = area.x + area.width.saturating_sub(width) / 2;
    let y = area.y + area.height.saturating_sub(height) / 2;
    Rect {
        x,
        y,
        width: width.min(area.width),
        height: height.min(area.height),
    }
}
