//! Offline catalog source reading a JSON array of records from disk.
//!
//! Used by `--from-file` and by tests that should not touch the network.

use crate::{ApiError, CatalogSource, LoadProgress};
use async_trait::async_trait;
use dexter_core::{AbilityDetail, Pokemon};
use std::path::{Path, PathBuf};
use tokio::sync::watch;

#[derive(Debug, Clone)]
pub struct SnapshotSource {
    path: PathBuf,
}

impl SnapshotSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl CatalogSource for SnapshotSource {
    async fn load_all_records(
        &self,
        progress: &watch::Sender<LoadProgress>,
    ) -> Result<Vec<Pokemon>, ApiError> {
        let bytes = tokio::fs::read(&self.path).await.map_err(|source| ApiError::Snapshot {
            path: self.path.clone(),
            source,
        })?;
        let records: Vec<Pokemon> =
            serde_json::from_slice(&bytes).map_err(|source| ApiError::Decode {
                url: self.path.display().to_string(),
                source,
            })?;

        let total = records.len();
        progress.send_replace(LoadProgress { done: total, total });
        tracing::debug!(path = %self.path.display(), total, "snapshot loaded");
        Ok(records)
    }

    async fn load_ability_detail(&self, name: &str) -> Result<AbilityDetail, ApiError> {
        Err(ApiError::Unavailable(format!("ability {name:?}")))
    }
}
