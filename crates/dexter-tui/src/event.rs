//! Semantic application events — crossterm key events mapped to a
//! widget-agnostic vocabulary so widgets never touch crossterm directly.
//!
//! # Keybindings
//!
//! | Key(s)                  | Event                      |
//! |-------------------------|----------------------------|
//! | `q`, `Ctrl+c`           | `Quit`                     |
//! | `Tab`                   | `FocusNext`                |
//! | `/`                     | `QueryFocus`               |
//! | `s`                     | `CycleSort`                |
//! | `t`                     | `CycleType`                |
//! | `PageUp`, `Ctrl+u`      | `ScrollUp`                 |
//! | `PageDown`, `Ctrl+d`    | `ScrollDown`               |
//! | `g` / `Home`            | `ScrollToTop`              |
//! | `G` / `End`             | `ScrollToBottom`           |
//! | `↑` / `k`               | `Nav(Up)`                  |
//! | `↓` / `j`               | `Nav(Down)`                |
//! | `←` / `h`               | `Nav(Left)`                |
//! | `→` / `l`               | `Nav(Right)`               |
//! | printable char          | `Char(c)`                  |
//! | `Backspace`             | `Backspace`                |
//! | `Enter`                 | `Enter`                    |
//! | `Esc`                   | `Escape`                   |
//! | terminal resize         | `Resize(w, h)`             |
//!
//! ## Insert mode
//!
//! When the query bar or command bar is focused, the event loop calls
//! [`to_app_event_insert`] instead. Every printable character types itself;
//! only `Ctrl+c`, `Esc`, `Enter`, `Tab`, `Backspace` and the arrow keys keep
//! their bindings.

use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers};

/// Cardinal direction for list navigation and text-cursor movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

/// A semantic application event derived from a raw crossterm [`Event`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    Quit,
    /// Move keyboard focus to the next pane (Tab-cycle).
    FocusNext,
    QueryFocus,
    /// Advance to the next sort key.
    CycleSort,
    /// Advance to the next type filter.
    CycleType,
    ScrollUp,
    ScrollDown,
    ScrollToTop,
    ScrollToBottom,
    Nav(Direction),
    /// A printable character forwarded to the active text input.
    Char(char),
    Backspace,
    /// Confirm the active input, apply a type, or open the detail view.
    Enter,
    Resize(u16, u16),
    /// Dismiss the active overlay or leave the query bar.
    Escape,
}

/// Which key table a raw event is read with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    /// Letters are shortcuts.
    Navigate,
    /// Letters type themselves.
    Insert,
}

/// Navigation-mode mapping. Returns `None` for mouse events and unbound keys.
pub fn to_app_event(event: Event) -> Option<AppEvent> {
    translate(event, InputMode::Navigate)
}

/// Text-input mapping used while the query bar or command line has focus.
pub fn to_app_event_insert(event: Event) -> Option<AppEvent> {
    translate(event, InputMode::Insert)
}

pub fn translate(event: Event, mode: InputMode) -> Option<AppEvent> {
    let key = match event {
        Event::Resize(w, h) => return Some(AppEvent::Resize(w, h)),
        Event::Key(key) => key,
        _ => return None,
    };

    if let Some(ev) = common_key(key) {
        return Some(ev);
    }
    match mode {
        InputMode::Navigate => shortcut(key).or_else(|| typed(key)),
        InputMode::Insert => typed(key),
    }
}

/// Keys bound the same way in both modes.
fn common_key(key: KeyEvent) -> Option<AppEvent> {
    let plain = key.modifiers == KeyModifiers::NONE;
    let ev = match key.code {
        KeyCode::Char('c') if key.modifiers == KeyModifiers::CONTROL => AppEvent::Quit,
        KeyCode::Up => AppEvent::Nav(Direction::Up),
        KeyCode::Down => AppEvent::Nav(Direction::Down),
        KeyCode::Left => AppEvent::Nav(Direction::Left),
        KeyCode::Right => AppEvent::Nav(Direction::Right),
        KeyCode::Tab if plain => AppEvent::FocusNext,
        KeyCode::Backspace if plain => AppEvent::Backspace,
        KeyCode::Enter if plain => AppEvent::Enter,
        KeyCode::Esc => AppEvent::Escape,
        _ => return None,
    };
    Some(ev)
}

/// Single-key commands, only outside text inputs.
fn shortcut(key: KeyEvent) -> Option<AppEvent> {
    let ctrl = key.modifiers == KeyModifiers::CONTROL;
    let ev = match key.code {
        KeyCode::PageUp => AppEvent::ScrollUp,
        KeyCode::PageDown => AppEvent::ScrollDown,
        KeyCode::Home => AppEvent::ScrollToTop,
        KeyCode::End => AppEvent::ScrollToBottom,
        KeyCode::Char('u') if ctrl => AppEvent::ScrollUp,
        KeyCode::Char('d') if ctrl => AppEvent::ScrollDown,
        // SHIFT may or may not be reported with an uppercase letter
        KeyCode::Char('G') => AppEvent::ScrollToBottom,
        KeyCode::Char(c) if key.modifiers == KeyModifiers::NONE => match c {
            'q' => AppEvent::Quit,
            '/' => AppEvent::QueryFocus,
            's' => AppEvent::CycleSort,
            't' => AppEvent::CycleType,
            'g' => AppEvent::ScrollToTop,
            'k' => AppEvent::Nav(Direction::Up),
            'j' => AppEvent::Nav(Direction::Down),
            'h' => AppEvent::Nav(Direction::Left),
            'l' => AppEvent::Nav(Direction::Right),
            _ => return None,
        },
        _ => return None,
    };
    Some(ev)
}

fn typed(key: KeyEvent) -> Option<AppEvent> {
    match key.code {
        KeyCode::Char(c) if matches!(key.modifiers, KeyModifiers::NONE | KeyModifiers::SHIFT) => {
            Some(AppEvent::Char(c))
        }
        _ => None,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
