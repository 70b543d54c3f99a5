//! Test builders — ergonomic constructors for `Pokemon` records and requests.
//!
//! These builders are designed for readability in test assertions, not for
//! production use. They panic on invalid input rather than returning `Result`.

use dexter_core::{BaseStat, Pokemon, SearchRequest, SortKey, TypeFilter};

// ---------------------------------------------------------------------------
// PokemonBuilder
// ---------------------------------------------------------------------------

/// Fluent builder for [`Pokemon`] test fixtures.
///
/// # Example
///
/// ```rust
/// let p = PokemonBuilder::new(25, "pikachu")
///     .types(&["electric"])
///     .abilities(&["static", "lightning-rod"])
///     .build();
/// ```
pub struct PokemonBuilder {
    id: u32,
    name: String,
    types: Vec<String>,
    abilities: Vec<String>,
    description: String,
    image: Option<String>,
    stats: Vec<BaseStat>,
    height: u32,
    weight: u32,
}

impl PokemonBuilder {
    pub fn new(id: u32, name: impl Into<String>) -> Self {
        assert!(id > 0, "dex ids start at 1");
        Self {
            id,
            name: name.into(),
            types: vec!["normal".to_string()],
            abilities: Vec::new(),
            description: dexter_core::types::NO_DESCRIPTION.to_string(),
            image: None,
            stats: Vec::new(),
            height: 10,
            weight: 100,
        }
    }

    pub fn types(mut self, types: &[&str]) -> Self {
        self.types = types.iter().map(|s| s.to_string()).collect();
        self
    }

    pub fn abilities(mut self, abilities: &[&str]) -> Self {
        self.abilities = abilities.iter().map(|s| s.to_string()).collect();
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn image(mut self, url: impl Into<String>) -> Self {
        self.image = Some(url.into());
        self
    }

    pub fn stat(mut self, name: &str, base: u32) -> Self {
        self.stats.push(BaseStat { name: name.to_string(), base });
        self
    }

    pub fn size(mut self, height: u32, weight: u32) -> Self {
        self.height = height;
        self.weight = weight;
        self
    }

    pub fn build(self) -> Pokemon {
        Pokemon {
            id: self.id,
            name: self.name,
            types: self.types,
            abilities: self.abilities,
            description: self.description,
            image: self.image,
            stats: self.stats,
            height: self.height,
            weight: self.weight,
        }
    }
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

/// A request with the default sort and no type filter.
pub fn query(q: &str) -> SearchRequest {
    SearchRequest::new(q)
}

/// A request with an explicit sort key.
pub fn query_sorted(q: &str, sort: SortKey) -> SearchRequest {
    SearchRequest::new(q).with_sort(sort)
}

/// A request restricted to one type.
pub fn query_typed(q: &str, ty: &str) -> SearchRequest {
    SearchRequest::new(q).with_type_filter(TypeFilter::Only(ty.to_string()))
}

/// Names of `results`, in order.
pub fn names(results: &[&Pokemon]) -> Vec<String> {
    results.iter().map(|p| p.name.clone()).collect()
}
