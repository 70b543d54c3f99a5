use anyhow::Context;
use clap::Parser;
use dexter::headless::{self, HeadlessOptions, OutputFormat};
use dexter_api::{CatalogSource, PokeApiClient, SnapshotSource};
use dexter_core::{config::Config, SearchRequest, SortKey, TypeFilter};
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "dexter", version, about = "dexter — terminal Pokédex with fuzzy search")]
struct Cli {
    /// Write debug logs to /tmp/dexter-debug.log (tail -f to inspect).
    #[arg(long)]
    debug: bool,

    /// Print one search to stdout instead of starting the TUI.
    #[arg(long)]
    headless: bool,

    /// Initial query, e.g. `pika :electric ::static`.
    #[arg(long, short)]
    query: Option<String>,

    /// Sort key applied after relevance.
    #[arg(long)]
    sort: Option<SortKey>,

    /// Keep only records of this type (`all` to disable).
    #[arg(long = "type", value_name = "TYPE")]
    type_filter: Option<TypeFilter>,

    /// Number of records requested from the list endpoint.
    #[arg(long)]
    limit: Option<usize>,

    /// Load the catalog from a JSON snapshot instead of the PokeAPI.
    #[arg(long, value_name = "PATH")]
    from_file: Option<PathBuf>,

    /// Headless output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    format: OutputFormat,

    /// Append the ranking scores to each headless result.
    #[arg(long)]
    explain: bool,
}

fn init_tracing(cli: &Cli) -> anyhow::Result<()> {
    let filter = |default: &str| {
        tracing_subscriber::EnvFilter::try_from_env("RUST_LOG")
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default))
    };

    if cli.debug {
        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open("/tmp/dexter-debug.log")?;
        tracing_subscriber::fmt()
            .with_writer(std::sync::Mutex::new(file))
            .with_ansi(false)
            .with_env_filter(filter("debug"))
            .init();
        tracing::info!("dexter debug log started — tail -f /tmp/dexter-debug.log");
    } else if cli.headless {
        tracing_subscriber::fmt()
            .with_writer(std::io::stderr)
            .with_env_filter(filter("warn"))
            .init();
    }
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(&cli)?;

    let mut config = Config::load().unwrap_or_else(|err| {
        tracing::warn!(error = %err, "could not load config, using defaults");
        Config::defaults()
    });
    if let Some(limit) = cli.limit {
        config.api.limit = limit;
    }

    let request = SearchRequest::new(cli.query.clone().unwrap_or_default())
        .with_sort(cli.sort.unwrap_or(config.search.default_sort))
        .with_type_filter(cli.type_filter.clone().unwrap_or_default());

    let source: Arc<dyn CatalogSource> = match &cli.from_file {
        Some(path) => Arc::new(SnapshotSource::new(path)),
        None => Arc::new(PokeApiClient::new(&config.api)?),
    };

    let runtime = tokio::runtime::Runtime::new().context("failed to start the tokio runtime")?;

    if cli.headless {
        let opts = HeadlessOptions {
            request,
            format: cli.format,
            explain: cli.explain,
        };
        let mut stdout = std::io::stdout().lock();
        runtime.block_on(headless::run(source, &opts, &mut stdout))?;
        return Ok(());
    }

    dexter_tui::run(config, source, request, runtime.handle().clone())
}
