//! Ability-detail cache abstraction.
//!
//! Keys are normalized ability names (see [`dexter_core::normalizer::normalize`]),
//! so `"Lightning-Rod"` and `"lightning-rod"` share one slot.

use dexter_core::AbilityDetail;
use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

/// Key-value store for fetched ability details.
pub trait AbilityCache: Send + Sync {
    fn get(&self, key: &str) -> Option<AbilityDetail>;
    fn put(&self, key: String, detail: AbilityDetail);
}

/// Process-lifetime in-memory cache. Never evicts.
#[derive(Debug, Default)]
pub struct MemoryAbilityCache {
    entries: RwLock<HashMap<String, AbilityDetail>>,
}

impl MemoryAbilityCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl AbilityCache for MemoryAbilityCache {
    fn get(&self, key: &str) -> Option<AbilityDetail> {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned()
    }

    fn put(&self, key: String, detail: AbilityDetail) {
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key, detail);
    }
}
