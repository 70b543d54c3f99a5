//! dexter-core — catalog types and the fuzzy search engine.
//!
//! # Architecture
//!
//! ```text
//! raw query ──► parse_search_query ──► ParsedQuery
//!                                          │
//! records ──► TypeFilter ──► matches_terms ┴─► rank ──► ordered results
//! ```
//!
//! Everything here is synchronous and pure; fetching lives in `dexter-api`
//! and rendering in `dexter-tui`.

pub mod config;
pub mod normalizer;
pub mod search;
pub mod types;

pub use search::{
    compute_match_scores, fuzzy_score, matches_terms, parse_search_query, rank, search,
    search_score, sort_records, MatchScore, ParsedQuery, Ranked, Score, SearchRequest, NO_MATCH,
};
pub use types::{AbilityDetail, BaseStat, Pokemon, SortKey, TypeFilter};
