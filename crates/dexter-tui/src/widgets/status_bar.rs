//! Status bar — the one-line strip at the top of the screen.
//!
//! Shows the catalog load state (progress while loading, a banner on
//! failure, `shown/total` once ready) with keybinding hints right-aligned.

use crate::app::LoadState;
use crate::theme::Theme;
use dexter_api::LoadProgress;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Modifier,
    text::{Line, Span},
    widgets::Widget,
};

/// `Loading… 312/1025`, or just `Loading…` before the list arrives.
pub fn progress_label(progress: LoadProgress) -> String {
    if progress.total == 0 {
        "Loading…".to_string()
    } else {
        format!("Loading… {progress}")
    }
}

pub struct StatusBar<'a> {
    load: &'a LoadState,
    shown: usize,
    total: usize,
    theme: &'a Theme,
}

impl<'a> StatusBar<'a> {
    pub fn new(load: &'a LoadState, shown: usize, total: usize, theme: &'a Theme) -> Self {
        Self { load, shown, total, theme }
    }
}

impl Widget for StatusBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let title = Span::styled(" dexter ", self.theme.border_focused.add_modifier(Modifier::BOLD));
        let state = match self.load {
            LoadState::Loading(p) => Span::styled(progress_label(*p), self.theme.status_loading),
            LoadState::Failed(err) => {
                Span::styled(format!(" failed to load catalog: {err} "), self.theme.status_error)
            }
            LoadState::Ready => Span::styled(
                format!("{}/{} shown", self.shown, self.total),
                self.theme.status_hint,
            ),
        };
        buf.set_line(area.x, area.y, &Line::from(vec![title, state]), area.width);

        let hint = " /:search  s:sort  t:type  ?:help  q:quit ";
        let hint_x = area.right().saturating_sub(hint.chars().count() as u16);
        buf.set_string(hint_x, area.y, hint, self.theme.status_hint);
    }
}
