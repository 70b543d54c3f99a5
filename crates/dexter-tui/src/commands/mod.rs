//! `:` commands.
//!
//! | Command | Action |
//! |---------|--------|
//! | `q`, `quit` | Quit |
//! | `help` | Toggle the help popup |
//! | `theme <name>` | Switch theme (`default`, `gruvbox`) |
//! | `sort <key>` | Set the sort key (`alphabetic`, `newest`, …) |
//! | `type <name\|all>` | Set the type filter |
//! | `top` | Jump to the first result |

use crate::{app::AppState, app::Focus, event::AppEvent, theme::Theme, theme::THEME_NAMES};
use dexter_core::{SortKey, TypeFilter};

// ---------------------------------------------------------------------------
// Command
// ---------------------------------------------------------------------------

/// A parsed, validated command ready to be executed by the app shell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Quit,
    Help,
    Theme(String),
    Sort(SortKey),
    Type(TypeFilter),
    Top,
}

impl Command {
    /// Parse a raw command string (the text after the `:` prefix).
    ///
    /// Returns `Ok(cmd)` on success, `Err(message)` on failure. An empty
    /// string returns `Err("")` as a sentinel meaning "close without acting".
    pub fn parse(input: &str) -> Result<Command, String> {
        let input = input.trim();
        if input.is_empty() {
            return Err(String::new());
        }

        let (word, rest) = input
            .split_once(char::is_whitespace)
            .map(|(w, r)| (w, r.trim()))
            .unwrap_or((input, ""));

        match word {
            "q" | "quit" => Ok(Command::Quit),
            "help" => Ok(Command::Help),
            "top" => Ok(Command::Top),
            "theme" if rest.is_empty() => {
                Err(format!("usage: theme <{}>", THEME_NAMES.join("|")))
            }
            "theme" => Ok(Command::Theme(rest.to_string())),
            "sort" if rest.is_empty() => Err("usage: sort <key>".to_string()),
            "sort" => rest.parse().map(Command::Sort).map_err(|e| e.to_string()),
            "type" if rest.is_empty() => Err("usage: type <name|all>".to_string()),
            "type" => Ok(Command::Type(rest.parse().unwrap_or_default())),
            other => Err(format!("unknown command: {other}")),
        }
    }
}

/// Execute a parsed [`Command`] against the application state.
pub fn execute_command(s: &mut AppState, cmd: Command) -> Result<(), String> {
    match cmd {
        Command::Quit => s.quit = true,
        Command::Help => s.show_help = !s.show_help,
        Command::Theme(name) => {
            s.theme = Theme::by_name(&name).ok_or_else(|| format!("unknown theme: {name}"))?;
        }
        Command::Sort(key) => s.set_sort(key),
        Command::Type(filter) => {
            if let TypeFilter::Only(t) = &filter {
                if !s.types.types.contains(t) {
                    return Err(format!("unknown type: {t}"));
                }
            }
            s.set_type_filter(filter);
        }
        Command::Top => {
            s.results.handle(&AppEvent::ScrollToTop);
            s.prev_focus = Focus::Results;
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
