//! Colour themes for the dexter TUI.
//!
//! A theme is a TOML document; the two built-in ones are compiled in with
//! [`include_str!`]. Each entry is a style table:
//!
//! ```toml
//! focused = { fg = "cyan", mods = ["bold"] }
//! ```
//!
//! Colours are anything ratatui's `Color` parses: names (`dark-gray`,
//! `light_red`), `#rrggbb`, or a bare 0-255 palette index.
//!
//! # Badge colours
//!
//! Type badges use the canonical type palette, overridable per theme under
//! `[types.colors]`. Ability badges are not themed: the name is hashed to one
//! of seventeen base hues with a hash-derived lightness, so the same ability
//! always gets the same colour.

use config::{Config, File, FileFormat};
use ratatui::style::{Color, Modifier, Style};
use serde::Deserialize;
use std::collections::HashMap;

const BUILTIN_DEFAULT: &str = include_str!("themes/default.toml");
const BUILTIN_GRUVBOX: &str = include_str!("themes/gruvbox_dark.toml");

/// Canonical badge colour for each of the eighteen types.
const TYPE_COLORS: [(&str, Color); 18] = [
    ("normal", Color::Rgb(0xA8, 0xA8, 0x78)),
    ("fire", Color::Rgb(0xF0, 0x80, 0x30)),
    ("water", Color::Rgb(0x68, 0x90, 0xF0)),
    ("electric", Color::Rgb(0xF8, 0xD0, 0x30)),
    ("grass", Color::Rgb(0x78, 0xC8, 0x50)),
    ("ice", Color::Rgb(0x98, 0xD8, 0xD8)),
    ("fighting", Color::Rgb(0xC0, 0x30, 0x28)),
    ("poison", Color::Rgb(0xA0, 0x40, 0xA0)),
    ("ground", Color::Rgb(0xE0, 0xC0, 0x68)),
    ("flying", Color::Rgb(0xA8, 0x90, 0xF0)),
    ("psychic", Color::Rgb(0xF8, 0x58, 0x88)),
    ("bug", Color::Rgb(0xA8, 0xB8, 0x20)),
    ("rock", Color::Rgb(0xB8, 0xA0, 0x38)),
    ("ghost", Color::Rgb(0x70, 0x58, 0x98)),
    ("dragon", Color::Rgb(0x70, 0x38, 0xF8)),
    ("dark", Color::Rgb(0x70, 0x58, 0x48)),
    ("steel", Color::Rgb(0xB8, 0xB8, 0xD0)),
    ("fairy", Color::Rgb(0xEE, 0x99, 0xAC)),
];

const TYPE_FALLBACK: Color = Color::Rgb(0x77, 0x77, 0x77);

const ABILITY_BASE_HUES: [u16; 17] = [
    0, 15, 30, 45, 60, 90, 120, 150, 180, 200, 220, 240, 260, 280, 300, 320, 340,
];
const ABILITY_SATURATION: u8 = 70;

/// Names accepted by [`Theme::by_name`].
pub const THEME_NAMES: [&str; 2] = ["default", "gruvbox"];

/// One style table as written in a theme file.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct StyleSpec {
    fg: Option<String>,
    bg: Option<String>,
    mods: Vec<String>,
}

impl StyleSpec {
    fn resolve(&self) -> Style {
        let mut style = Style::default();
        if let Some(fg) = self.fg.as_deref().and_then(color) {
            style = style.fg(fg);
        }
        if let Some(bg) = self.bg.as_deref().and_then(color) {
            style = style.bg(bg);
        }
        self.mods
            .iter()
            .filter_map(|m| modifier(m))
            .fold(style, Style::add_modifier)
    }
}

#[derive(Debug, Deserialize)]
struct ThemeFile {
    chrome: ChromeSection,
    query: QuerySection,
    results: ResultsSection,
    status: StatusSection,
    #[serde(default)]
    types: TypesSection,
}

#[derive(Debug, Deserialize)]
struct ChromeSection {
    focused: StyleSpec,
    unfocused: StyleSpec,
    prompt: StyleSpec,
}

#[derive(Debug, Deserialize)]
struct QuerySection {
    marker: StyleSpec,
}

#[derive(Debug, Deserialize)]
struct ResultsSection {
    id: StyleSpec,
    name: StyleSpec,
    description: StyleSpec,
    selected: StyleSpec,
}

#[derive(Debug, Deserialize)]
struct StatusSection {
    loading: StyleSpec,
    error: StyleSpec,
    hint: StyleSpec,
}

#[derive(Debug, Default, Deserialize)]
struct TypesSection {
    fallback: Option<String>,
    #[serde(default)]
    colors: HashMap<String, String>,
}

/// Resolved application theme.
#[derive(Debug, Clone)]
pub struct Theme {
    pub border_focused: Style,
    pub border_unfocused: Style,
    /// The `:` prompt of the command line.
    pub border_command_bar: Style,

    /// Applied to the `:` / `::` mode markers in the query bar.
    pub search_highlight: Style,

    pub result_id: Style,
    pub result_name: Style,
    pub result_description: Style,
    pub result_selected: Style,

    pub status_loading: Style,
    pub status_error: Style,
    pub status_hint: Style,

    type_colors: HashMap<String, Color>,
    type_fallback: Color,
}

impl Theme {
    /// The built-in default theme.
    ///
    /// # Panics
    ///
    /// Panics if the embedded TOML is malformed.
    pub fn load_default() -> Self {
        Self::from_toml_str(BUILTIN_DEFAULT).expect("built-in default theme parses")
    }

    /// The built-in Gruvbox Dark theme.
    ///
    /// # Panics
    ///
    /// Panics if the embedded TOML is malformed.
    pub fn load_gruvbox_dark() -> Self {
        Self::from_toml_str(BUILTIN_GRUVBOX).expect("built-in gruvbox theme parses")
    }

    /// Look up a built-in theme by name, case-insensitively.
    pub fn by_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "default" => Some(Self::load_default()),
            "gruvbox" | "gruvbox_dark" | "gruvbox-dark" => Some(Self::load_gruvbox_dark()),
            _ => None,
        }
    }

    /// Parse a theme document. Unknown keys are ignored; unparseable colours
    /// and modifiers are dropped with a warning.
    pub fn from_toml_str(src: &str) -> anyhow::Result<Self> {
        let file: ThemeFile = Config::builder()
            .add_source(File::from_str(src, FileFormat::Toml))
            .build()?
            .try_deserialize()?;

        let mut type_colors: HashMap<String, Color> = TYPE_COLORS
            .iter()
            .map(|&(name, c)| (name.to_owned(), c))
            .collect();
        type_colors.extend(
            file.types
                .colors
                .iter()
                .filter_map(|(name, value)| Some((name.to_ascii_lowercase(), color(value)?))),
        );

        Ok(Self {
            border_focused: file.chrome.focused.resolve(),
            border_unfocused: file.chrome.unfocused.resolve(),
            border_command_bar: file.chrome.prompt.resolve(),
            search_highlight: file.query.marker.resolve(),
            result_id: file.results.id.resolve(),
            result_name: file.results.name.resolve(),
            result_description: file.results.description.resolve(),
            result_selected: file.results.selected.resolve(),
            status_loading: file.status.loading.resolve(),
            status_error: file.status.error.resolve(),
            status_hint: file.status.hint.resolve(),
            type_fallback: file.types.fallback.as_deref().and_then(color).unwrap_or(TYPE_FALLBACK),
            type_colors,
        })
    }

    pub fn border(&self, focused: bool) -> Style {
        if focused {
            self.border_focused
        } else {
            self.border_unfocused
        }
    }

    /// Badge colour for a type tag; unknown tags get the fallback grey.
    pub fn type_color(&self, type_name: &str) -> Color {
        self.type_colors
            .get(type_name)
            .copied()
            .unwrap_or(self.type_fallback)
    }

    /// Badge style for a type tag: dark text on the type colour.
    pub fn type_style(&self, type_name: &str) -> Style {
        Style::default()
            .fg(Color::Black)
            .bg(self.type_color(type_name))
            .add_modifier(Modifier::BOLD)
    }

    /// Foreground style for an ability name.
    pub fn ability_style(&self, ability: &str) -> Style {
        Style::default().fg(ability_color(ability))
    }
}

// ---------------------------------------------------------------------------
// Ability colours
// ---------------------------------------------------------------------------

/// 32-bit string hash over UTF-16 code units: `h = c + ((h << 5) - h)`,
/// where the shift wraps at 32 bits and the subtraction does not.
fn ability_hash(name: &str) -> i64 {
    name.encode_utf16().fold(0i64, |h, c| {
        i64::from(c) + i64::from((h as i32) << 5) - h
    })
}

/// `(hue°, saturation%, lightness%)` for an ability name.
pub fn ability_hsl(name: &str) -> (u16, u8, u8) {
    let h = ability_hash(name);
    let hue = ABILITY_BASE_HUES[(h.unsigned_abs() % ABILITY_BASE_HUES.len() as u64) as usize];
    let lightness = 45 + (((h as i32) >> 8).unsigned_abs() % 30) as u8;
    (hue, ABILITY_SATURATION, lightness)
}

pub fn ability_color(name: &str) -> Color {
    let (h, s, l) = ability_hsl(name);
    let (r, g, b) = hsl_to_rgb(f64::from(h), f64::from(s) / 100.0, f64::from(l) / 100.0);
    Color::Rgb(r, g, b)
}

fn hsl_to_rgb(hue: f64, sat: f64, light: f64) -> (u8, u8, u8) {
    let chroma = (1.0 - (2.0 * light - 1.0).abs()) * sat;
    let sector = (hue % 360.0) / 60.0;
    let x = chroma * (1.0 - (sector % 2.0 - 1.0).abs());
    let (r, g, b) = match sector as u32 {
        0 => (chroma, x, 0.0),
        1 => (x, chroma, 0.0),
        2 => (0.0, chroma, x),
        3 => (0.0, x, chroma),
        4 => (x, 0.0, chroma),
        _ => (chroma, 0.0, x),
    };
    let m = light - chroma / 2.0;
    let channel = |v: f64| ((v + m) * 255.0).round().clamp(0.0, 255.0) as u8;
    (channel(r), channel(g), channel(b))
}

fn color(value: &str) -> Option<Color> {
    match value.parse() {
        Ok(c) => Some(c),
        Err(_) => {
            tracing::warn!(value, "theme: unrecognised colour");
            None
        }
    }
}

fn modifier(name: &str) -> Option<Modifier> {
    let m = match name.to_ascii_lowercase().as_str() {
        "bold" => Modifier::BOLD,
        "dim" => Modifier::DIM,
        "italic" => Modifier::ITALIC,
        "underlined" | "underline" => Modifier::UNDERLINED,
        "reversed" => Modifier::REVERSED,
        _ => {
            tracing::warn!(name, "theme: unrecognised modifier");
            return None;
        }
    };
    Some(m)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn default_theme_loads() {
        let theme = Theme::load_default();
        assert_ne!(theme.border_focused, Style::default());
        assert_ne!(theme.search_highlight, Style::default());
        assert_ne!(theme.status_error, Style::default());
        assert_eq!(theme.type_color("fire"), Color::Rgb(0xF0, 0x80, 0x30));
    }

    #[test]
    fn gruvbox_dark_theme_loads_with_overrides() {
        let theme = Theme::load_gruvbox_dark();
        assert_ne!(theme.border_focused, Style::default());
        assert_eq!(theme.type_color("normal"), Color::Rgb(0xa8, 0x99, 0x84));
        // Not overridden, so the canonical colour stays.
        assert_eq!(theme.type_color("water"), Color::Rgb(0x68, 0x90, 0xF0));
    }

    #[test]
    fn by_name_resolves_aliases() {
        assert!(Theme::by_name("Gruvbox-Dark").is_some());
        assert!(Theme::by_name("default").is_some());
        assert!(Theme::by_name("solarized").is_none());
    }

    #[test]
    fn unknown_type_uses_fallback() {
        let theme = Theme::load_default();
        assert_eq!(theme.type_color("shadow"), Color::Rgb(0x77, 0x77, 0x77));
    }

    #[test]
    fn ability_hsl_matches_hash_table() {
        // "a": h = 97 → hue index 97 % 17 = 12, lightness 45 + 0
        assert_eq!(ability_hsl("a"), (260, 70, 45));
        // "ab": h = 98 + (97 << 5) - 97 = 3105 → index 11, lightness 45 + 12
        assert_eq!(ability_hsl("ab"), (240, 70, 57));
    }

    #[test]
    fn ability_color_is_stable() {
        assert_eq!(ability_color("lightning-rod"), ability_color("lightning-rod"));
        let (_, _, l) = ability_hsl("lightning-rod");
        assert!((45..75).contains(&l));
    }

    #[test]
    fn long_names_wrap_without_panicking() {
        let name = "a-very-long-ability-name-that-overflows-thirty-two-bits";
        let (hue, _, l) = ability_hsl(name);
        assert!(ABILITY_BASE_HUES.contains(&hue));
        assert!((45..75).contains(&l));
    }

    #[test]
    fn hsl_primary_red() {
        assert_eq!(hsl_to_rgb(0.0, 0.7, 0.5), (217, 38, 38));
        assert_eq!(hsl_to_rgb(120.0, 1.0, 0.5), (0, 255, 0));
    }

    #[test]
    fn style_spec_resolves_colours_and_mods() {
        let spec = StyleSpec {
            fg: Some("dark-gray".into()),
            bg: Some("236".into()),
            mods: vec!["bold".into(), "Italic".into(), "sparkly".into()],
        };
        assert_eq!(
            spec.resolve(),
            Style::default()
                .fg(Color::DarkGray)
                .bg(Color::Indexed(236))
                .add_modifier(Modifier::BOLD | Modifier::ITALIC)
        );
    }

    #[test]
    fn colours_accept_hex_and_reject_nonsense() {
        assert_eq!(color("#ff0080"), Some(Color::Rgb(255, 0, 128)));
        assert_eq!(color("chartreuse"), None);
    }

    #[test]
    fn missing_section_is_an_error() {
        assert!(Theme::from_toml_str("[chrome]\nfocused = {}\n").is_err());
    }
}
