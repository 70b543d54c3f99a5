//! Serialized bulk loads with progress publication.
//!
//! Only one load may run at a time; a second [`CatalogLoader::load`] while the
//! first is still running fails fast with [`ApiError::LoadInProgress`].

use crate::{ApiError, CatalogSource, LoadProgress};
use dexter_core::Pokemon;
use std::sync::Arc;
use tokio::sync::{watch, Mutex};

pub struct CatalogLoader {
    source: Arc<dyn CatalogSource>,
    gate: Mutex<()>,
    progress: watch::Sender<LoadProgress>,
}

impl CatalogLoader {
    pub fn new(source: Arc<dyn CatalogSource>) -> Self {
        let (progress, _) = watch::channel(LoadProgress::default());
        Self {
            source,
            gate: Mutex::new(()),
            progress,
        }
    }

    pub fn source(&self) -> Arc<dyn CatalogSource> {
        Arc::clone(&self.source)
    }

    /// Receiver that observes `done/total` updates of every load.
    pub fn subscribe(&self) -> watch::Receiver<LoadProgress> {
        self.progress.subscribe()
    }

    pub fn is_loading(&self) -> bool {
        self.gate.try_lock().is_err()
    }

    /// Run one bulk load. Records are returned in source order.
    pub async fn load(&self) -> Result<Vec<Pokemon>, ApiError> {
        let _guard = self.gate.try_lock().map_err(|_| ApiError::LoadInProgress)?;

        self.progress.send_replace(LoadProgress::default());
        tracing::info!("catalog load started");

        let result = self.source.load_all_records(&self.progress).await;
        match &result {
            Ok(records) => tracing::info!(count = records.len(), "catalog load finished"),
            Err(err) => tracing::error!(error = %err, "catalog load failed"),
        }
        result
    }
}
