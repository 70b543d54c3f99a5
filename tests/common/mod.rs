//! Shared test utilities for dexter integration harnesses.
//!
//! Import everything you need via `mod common; use common::*;` at the top of
//! each harness file. Every helper is deterministic; the fake PokeAPI binds
//! to an ephemeral port so harnesses can run in parallel.

#![allow(dead_code, unused_imports)]

pub mod assertions;
pub mod builders;
pub mod fake_poke_api;
pub mod fixtures;

pub use assertions::*;
pub use builders::*;
pub use fixtures::*;
