//! dexter — terminal Pokédex with fuzzy search.
//!
//! The workspace is split the same way the data flows:
//!
//! ```text
//! dexter-api ──► Vec<Pokemon> ──► dexter-core::search ──► dexter-tui
//!  (PokeAPI,                        (normalize, score,      or
//!   snapshot)                        parse, rank)         headless
//! ```
//!
//! This crate hosts the binary and the headless printer, and re-exports the
//! member crates so integration tests can reach everything from one place.

pub mod headless;

pub use dexter_api;
pub use dexter_core;
pub use dexter_tui;
