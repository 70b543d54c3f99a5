//! Detail modal — everything known about one record.
//!
//! Opened with `Enter` on a result, closed with `Escape`. Ability effects are
//! fetched on demand; until they arrive the line reads `loading…`.

use crate::event::{AppEvent, Direction};
use crate::theme::Theme;
use crate::widgets::help::centered_rect;
use dexter_core::{AbilityDetail, Pokemon};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Clear, Paragraph, Widget, Wrap},
};
use std::collections::HashMap;

/// Width of the widest stat bar, reached at a base stat of 255.
const STAT_BAR_WIDTH: u32 = 30;
const STAT_MAX: u32 = 255;

#[derive(Debug)]
pub struct DetailState {
    pub pokemon: Pokemon,
    pub scroll: u16,
}

impl DetailState {
    pub fn new(pokemon: Pokemon) -> Self {
        Self { pokemon, scroll: 0 }
    }

    pub fn handle(&mut self, event: &AppEvent) {
        match event {
            AppEvent::Nav(Direction::Up) | AppEvent::ScrollUp => {
                self.scroll = self.scroll.saturating_sub(1)
            }
            AppEvent::Nav(Direction::Down) | AppEvent::ScrollDown => {
                self.scroll = self.scroll.saturating_add(1)
            }
            AppEvent::ScrollToTop => self.scroll = 0,
            _ => {}
        }
    }
}

pub struct Detail<'a> {
    state: &'a DetailState,
    abilities: &'a HashMap<String, AbilityDetail>,
    theme: &'a Theme,
}

impl<'a> Detail<'a> {
    pub fn new(
        state: &'a DetailState,
        abilities: &'a HashMap<String, AbilityDetail>,
        theme: &'a Theme,
    ) -> Self {
        Self { state, abilities, theme }
    }

    fn lines(&self) -> Vec<Line<'static>> {
        let p = &self.state.pokemon;
        let heading = self.theme.search_highlight;
        let mut lines = Vec::new();

        let mut badges = Vec::new();
        for t in &p.types {
            badges.push(Span::styled(format!(" {t} "), self.theme.type_style(t)));
            badges.push(Span::raw(" "));
        }
        lines.push(Line::from(badges));
        lines.push(Line::raw(""));
        lines.push(Line::from(Span::styled(
            p.description.clone(),
            self.theme.result_description,
        )));
        lines.push(Line::raw(""));

        lines.push(Line::from(Span::styled("Abilities", heading)));
        for ability in &p.abilities {
            let effect = match self.abilities.get(ability) {
                None => "loading…".to_string(),
                Some(d) => d.summary().unwrap_or("no description available").to_string(),
            };
            lines.push(Line::from(vec![
                Span::raw("  "),
                Span::styled(
                    ability.clone(),
                    self.theme.ability_style(ability).add_modifier(Modifier::BOLD),
                ),
                Span::raw("  "),
                Span::styled(effect, Style::default().add_modifier(Modifier::DIM)),
            ]));
        }
        lines.push(Line::raw(""));

        lines.push(Line::from(vec![
            Span::styled("Height ", heading),
            Span::raw(format!("{:.1} m", p.height_m())),
            Span::styled("   Weight ", heading),
            Span::raw(format!("{:.1} kg", p.weight_kg())),
        ]));
        lines.push(Line::raw(""));

        lines.push(Line::from(Span::styled("Base stats", heading)));
        for stat in &p.stats {
            let bar = (stat.base.min(STAT_MAX) * STAT_BAR_WIDTH / STAT_MAX) as usize;
            lines.push(Line::from(vec![
                Span::raw(format!("  {:<16}{:>4} ", stat.label(), stat.base)),
                Span::styled("█".repeat(bar.max(1)), self.theme.border_focused),
            ]));
        }

        if let Some(url) = &p.image {
            lines.push(Line::raw(""));
            lines.push(Line::from(vec![
                Span::styled("Artwork ", heading),
                Span::styled(url.clone(), Style::default().add_modifier(Modifier::UNDERLINED)),
            ]));
        }
        lines
    }
}

impl Widget for Detail<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let popup = centered_rect(
            area.width.saturating_sub(8).min(90),
            area.height.saturating_sub(4),
            area,
        );
        Clear.render(popup, buf);

        let p = &self.state.pokemon;
        let block = Block::bordered()
            .title(format!(" #{}  {} ", p.padded_id(), p.name))
            .title_bottom(" Esc to close ")
            .border_style(self.theme.border_focused);

        Paragraph::new(self.lines())
            .block(block)
            .wrap(Wrap { trim: false })
            .scroll((self.state.scroll, 0))
            .render(popup, buf);
    }
}
