//! dexter-api — catalog sources for dexter.
//!
//! Each source produces [`dexter_core::Pokemon`] records for the search core
//! and resolves ability descriptions on demand. The [`CatalogLoader`] wraps a
//! source to serialize bulk loads and publish progress; the
//! [`AbilityResolver`] fronts it with an injected [`AbilityCache`].

pub mod ability;
pub mod cache;
pub mod client;
pub mod error;
pub mod loader;
pub mod snapshot;

pub use ability::AbilityResolver;
pub use cache::{AbilityCache, MemoryAbilityCache};
pub use client::PokeApiClient;
pub use error::ApiError;
pub use loader::CatalogLoader;
pub use snapshot::SnapshotSource;

use async_trait::async_trait;
use dexter_core::{AbilityDetail, Pokemon};
use tokio::sync::watch;

/// Bulk-load progress, published while a catalog load runs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadProgress {
    pub done: usize,
    pub total: usize,
}

impl std::fmt::Display for LoadProgress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.done, self.total)
    }
}

/// Trait implemented by each catalog source.
#[async_trait]
pub trait CatalogSource: Send + Sync {
    /// Fetch every record. Fails as a whole if the catalog cannot be listed.
    async fn load_all_records(
        &self,
        progress: &watch::Sender<LoadProgress>,
    ) -> Result<Vec<Pokemon>, ApiError>;

    /// Fetch the description of one ability by its API name.
    async fn load_ability_detail(&self, name: &str) -> Result<AbilityDetail, ApiError>;
}
