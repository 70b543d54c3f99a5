//! Search layer — fuzzy scoring, the query micro-language, and ranking.
//!
//! # Query syntax
//!
//! ```text
//! pika :electric ::static lightning
//! ^^^^ ^^^^^^^^^ ^^^^^^^^ ^^^^^^^^^
//! name   type    ability  ability (sticky)
//! ```
//!
//! A `:` prefix routes a token to the type field, `::` to the ability field,
//! and an unprefixed token goes to whichever field was selected last (name/id
//! at the start). Terms are AND-combined within and across fields.
//!
//! # Scores
//!
//! Lower is better. The four tiers never overlap:
//!
//! | Tier        | Score              |
//! |-------------|--------------------|
//! | exact       | `0`                |
//! | prefix      | `2`                |
//! | substring   | `10 + index`       |
//! | subsequence | `100 + gaps`       |
//! | no match    | [`NO_MATCH`] (`+∞`) |

use crate::normalizer::{is_subsequence, normalize};
use crate::types::{Pokemon, SortKey, TypeFilter};
use std::cmp::Ordering;

/// Relevance score. Lower is better; [`NO_MATCH`] means the term was not found.
pub type Score = f64;

/// Sentinel for "no match for this term in this field".
pub const NO_MATCH: Score = f64::INFINITY;

const EXACT: Score = 0.0;
const PREFIX: Score = 2.0;
const SUBSTRING_BASE: Score = 10.0;
const SUBSEQUENCE_BASE: Score = 100.0;
/// Keeps `10 + index` inside the substring band for very long texts.
const SUBSTRING_MAX_INDEX: usize = 89;

// ---------------------------------------------------------------------------
// Fuzzy scorer
// ---------------------------------------------------------------------------

/// Score `term` against `text`. Both are normalized first.
pub fn fuzzy_score(term: &str, text: &str) -> Score {
    score_normalized(&normalize(term), &normalize(text))
}

fn score_normalized(t: &str, x: &str) -> Score {
    if t.is_empty() || x.is_empty() {
        return NO_MATCH;
    }
    if x == t {
        return EXACT;
    }
    if x.starts_with(t) {
        return PREFIX;
    }
    if let Some(idx) = x.find(t) {
        return SUBSTRING_BASE + idx.min(SUBSTRING_MAX_INDEX) as Score;
    }
    if is_subsequence(t, x) {
        return SUBSEQUENCE_BASE + greedy_gaps(t, x) as Score;
    }
    NO_MATCH
}

/// Skipped characters between consecutive matched positions of the greedy
/// left-to-right alignment of `t` in `x`. Leading characters before the first
/// match are not counted.
fn greedy_gaps(t: &str, x: &str) -> usize {
    let t = t.as_bytes();
    let mut ti = 0;
    let mut last: Option<usize> = None;
    let mut gaps = 0;
    for (i, &b) in x.as_bytes().iter().enumerate() {
        if ti == t.len() {
            break;
        }
        if b == t[ti] {
            if let Some(prev) = last {
                gaps += i - prev - 1;
            }
            last = Some(i);
            ti += 1;
        }
    }
    gaps
}

/// Whole-record score for single-box search: the best of name, padded id,
/// space-joined types and space-joined abilities.
pub fn search_score(term: &str, pokemon: &Pokemon) -> Score {
    let t = normalize(term);
    [
        normalize(&pokemon.name),
        pokemon.padded_id(),
        normalize(&pokemon.types.join(" ")),
        normalize(&pokemon.abilities.join(" ")),
    ]
    .iter()
    .map(|x| score_normalized(&t, x))
    .fold(NO_MATCH, f64::min)
}

// ---------------------------------------------------------------------------
// Query parser
// ---------------------------------------------------------------------------

/// Which record field a term is matched against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    /// Name or zero-padded id.
    Name,
    Type,
    Ability,
}

/// A raw query split into per-field term groups. Terms are kept verbatim;
/// normalization happens at scoring time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedQuery {
    pub name_terms: Vec<String>,
    pub type_terms: Vec<String>,
    pub ability_terms: Vec<String>,
}

impl ParsedQuery {
    pub fn is_empty(&self) -> bool {
        self.name_terms.is_empty() && self.type_terms.is_empty() && self.ability_terms.is_empty()
    }

    /// Every term across all groups: name, then type, then ability.
    pub fn terms(&self) -> impl Iterator<Item = &str> {
        self.name_terms
            .iter()
            .chain(&self.type_terms)
            .chain(&self.ability_terms)
            .map(String::as_str)
    }

    fn group_mut(&mut self, field: Field) -> &mut Vec<String> {
        match field {
            Field::Name => &mut self.name_terms,
            Field::Type => &mut self.type_terms,
            Field::Ability => &mut self.ability_terms,
        }
    }
}

/// Split `raw` on whitespace and route each token by its sticky field prefix.
pub fn parse_search_query(raw: &str) -> ParsedQuery {
    let mut parsed = ParsedQuery::default();
    let mut mode = Field::Name;

    for token in raw.split_whitespace() {
        let (field, term) = if let Some(rest) = token.strip_prefix("::") {
            (Field::Ability, rest)
        } else if let Some(rest) = token.strip_prefix(':') {
            (Field::Type, rest)
        } else {
            parsed.group_mut(mode).push(token.to_string());
            continue;
        };
        // The mode switches even when the prefix stands alone.
        mode = field;
        if !term.is_empty() {
            parsed.group_mut(field).push(term.to_string());
        }
    }

    parsed
}

// ---------------------------------------------------------------------------
// Match predicate / ranker
// ---------------------------------------------------------------------------

/// Per-field score sums for one record against one query.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct MatchScore {
    pub name_score: Score,
    pub type_score: Score,
    pub ability_score: Score,
}

impl MatchScore {
    /// True iff every component is finite, i.e. no term went unmatched.
    pub fn is_match(&self) -> bool {
        self.name_score.is_finite() && self.type_score.is_finite() && self.ability_score.is_finite()
    }
}

/// Normalized candidate values for each field of one record.
struct Candidates {
    name: Vec<String>,
    types: Vec<String>,
    abilities: Vec<String>,
}

impl Candidates {
    fn of(pokemon: &Pokemon) -> Self {
        Self {
            name: vec![normalize(&pokemon.name), pokemon.padded_id()],
            types: pokemon.types.iter().map(|t| normalize(t)).collect(),
            abilities: pokemon.abilities.iter().map(|a| normalize(a)).collect(),
        }
    }
}

/// Best (minimum) score of one term over a set of normalized candidates.
fn best_score(term: &str, candidates: &[String]) -> Score {
    let t = normalize(term);
    candidates
        .iter()
        .map(|x| score_normalized(&t, x))
        .fold(NO_MATCH, f64::min)
}

fn group_sum(terms: &[String], candidates: &[String]) -> Score {
    terms
        .iter()
        .map(|term| best_score(term, candidates))
        .fold(0.0, |acc, s| acc + s)
}

/// True iff every term of every non-empty group matches at least one of the
/// group's candidate values.
pub fn matches_terms(pokemon: &Pokemon, parsed: &ParsedQuery) -> bool {
    let c = Candidates::of(pokemon);
    let all_found = |terms: &[String], candidates: &[String]| {
        terms
            .iter()
            .all(|term| best_score(term, candidates).is_finite())
    };
    all_found(&parsed.name_terms, &c.name)
        && all_found(&parsed.type_terms, &c.types)
        && all_found(&parsed.ability_terms, &c.abilities)
}

/// Sum, per group, of each term's best score against that group's candidates.
pub fn compute_match_scores(pokemon: &Pokemon, parsed: &ParsedQuery) -> MatchScore {
    let c = Candidates::of(pokemon);
    MatchScore {
        name_score: group_sum(&parsed.name_terms, &c.name),
        type_score: group_sum(&parsed.type_terms, &c.types),
        ability_score: group_sum(&parsed.ability_terms, &c.abilities),
    }
}

/// Primary ranking key: the whole-record score of every term, summed. An empty
/// query ranks every record at `0`.
pub fn relevance(pokemon: &Pokemon, parsed: &ParsedQuery) -> Score {
    parsed
        .terms()
        .map(|term| search_score(term, pokemon))
        .fold(0.0, |acc, s| acc + s)
}

/// Compare two records by an explicit [`SortKey`] alone.
pub fn compare_by_key(a: &Pokemon, b: &Pokemon, key: SortKey) -> Ordering {
    match key {
        SortKey::Alphabetic => a.name.cmp(&b.name),
        SortKey::AlphabeticReverse => b.name.cmp(&a.name),
        SortKey::Abilities => b.abilities.len().cmp(&a.abilities.len()),
        SortKey::AbilitiesReverse => a.abilities.len().cmp(&b.abilities.len()),
        SortKey::Oldest => a.id.cmp(&b.id),
        SortKey::Newest => b.id.cmp(&a.id),
    }
}

// ---------------------------------------------------------------------------
// Search entry point
// ---------------------------------------------------------------------------

/// Everything a single search needs. Built fresh by the presentation layer on
/// every change; the core holds no search state of its own.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchRequest {
    pub sort: SortKey,
    pub type_filter: TypeFilter,
    pub query: String,
}

impl SearchRequest {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            ..Self::default()
        }
    }

    pub fn with_sort(mut self, sort: SortKey) -> Self {
        self.sort = sort;
        self
    }

    pub fn with_type_filter(mut self, type_filter: TypeFilter) -> Self {
        self.type_filter = type_filter;
        self
    }
}

/// One search hit with the keys it was ranked by.
#[derive(Debug, Clone, Copy)]
pub struct Ranked<'a> {
    pub pokemon: &'a Pokemon,
    pub relevance: Score,
    pub scores: MatchScore,
}

/// Filter and order `records` for `request`, keeping the scores.
///
/// Ordering is relevance ascending, then the request's [`SortKey`], then name.
pub fn rank<'a>(records: &'a [Pokemon], request: &SearchRequest) -> Vec<Ranked<'a>> {
    let parsed = parse_search_query(&request.query);

    let mut ranked: Vec<Ranked<'a>> = records
        .iter()
        .filter(|p| request.type_filter.admits(p))
        .filter(|p| matches_terms(p, &parsed))
        .map(|p| Ranked {
            pokemon: p,
            relevance: relevance(p, &parsed),
            scores: compute_match_scores(p, &parsed),
        })
        .collect();

    ranked.sort_by(|a, b| {
        a.relevance
            .total_cmp(&b.relevance)
            .then_with(|| compare_by_key(a.pokemon, b.pokemon, request.sort))
            .then_with(|| a.pokemon.name.cmp(&b.pokemon.name))
    });

    tracing::trace!(
        query = %request.query,
        sort = %request.sort,
        type_filter = %request.type_filter,
        results = ranked.len(),
        "search ranked"
    );

    ranked
}

/// Filter and order `records` for `request`.
pub fn search<'a>(records: &'a [Pokemon], request: &SearchRequest) -> Vec<&'a Pokemon> {
    rank(records, request).into_iter().map(|r| r.pokemon).collect()
}

/// Explicit ordering only, with no query and no type filter.
pub fn sort_records(records: &[Pokemon], key: SortKey) -> Vec<&Pokemon> {
    search(records, &SearchRequest::default().with_sort(key))
}

/// Distinct type tags across the catalog, sorted.
pub fn distinct_types(records: &[Pokemon]) -> Vec<String> {
    let mut types: Vec<String> = records
        .iter()
        .flat_map(|p| p.types.iter().cloned())
        .collect();
    types.sort();
    types.dedup();
    types
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
