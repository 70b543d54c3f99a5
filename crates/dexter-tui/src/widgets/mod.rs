//! Ratatui widgets for the dexter TUI.

pub mod command_bar;
pub mod detail;
pub mod help;
pub mod line_edit;
pub mod query_bar;
pub mod results;
pub mod status_bar;
pub mod type_list;
