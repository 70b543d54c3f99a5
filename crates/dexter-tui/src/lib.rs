//! dexter TUI — ratatui application shell.

pub mod app;
pub mod commands;
pub mod event;
pub mod theme;
pub mod widgets;

pub use app::{App, AppState};

use dexter_api::CatalogSource;
use dexter_core::{config::Config, SearchRequest};
use std::sync::Arc;

/// Start the TUI against `source`. Network work is spawned on `runtime`; the
/// calling thread owns the terminal until the user quits.
pub fn run(
    config: Config,
    source: Arc<dyn CatalogSource>,
    request: SearchRequest,
    runtime: tokio::runtime::Handle,
) -> anyhow::Result<()> {
    let theme = theme::Theme::by_name(&config.ui.theme).unwrap_or_else(|| {
        tracing::warn!(theme = %config.ui.theme, "unknown theme, using default");
        theme::Theme::load_default()
    });
    App::new(AppState::new(config, theme, request), source, runtime).run()
}
