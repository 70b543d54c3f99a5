//! On-demand ability descriptions with caching.
//!
//! Failures degrade to [`AbilityDetail::placeholder`] and are not cached, so a
//! later hover retries the fetch.

use crate::{AbilityCache, CatalogSource};
use dexter_core::normalizer::normalize;
use dexter_core::AbilityDetail;
use std::sync::Arc;

/// Resolves ability names to details through a shared cache.
#[derive(Clone)]
pub struct AbilityResolver {
    source: Arc<dyn CatalogSource>,
    cache: Arc<dyn AbilityCache>,
}

impl AbilityResolver {
    pub fn new(source: Arc<dyn CatalogSource>, cache: Arc<dyn AbilityCache>) -> Self {
        Self { source, cache }
    }

    /// Return the cached detail for `name`, fetching it on a miss.
    pub async fn resolve(&self, name: &str) -> AbilityDetail {
        let key = normalize(name);
        if let Some(hit) = self.cache.get(&key) {
            tracing::trace!(ability = name, "ability cache hit");
            return hit;
        }

        match self.source.load_ability_detail(name).await {
            Ok(detail) => {
                self.cache.put(key, detail.clone());
                detail
            }
            Err(err) => {
                tracing::warn!(ability = name, error = %err, "ability lookup failed");
                AbilityDetail::placeholder(name)
            }
        }
    }
}
