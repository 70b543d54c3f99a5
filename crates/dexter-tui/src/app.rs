//! Top-level application state and the main event loop.
//!
//! [`App::run`] sets up the terminal, drives the crossterm event loop, and
//! tears everything down cleanly on exit or panic. Network work runs on the
//! tokio runtime passed in by the binary; results come back as [`Msg`]
//! values over an unbounded channel that the loop drains every frame.
//!
//! All state transitions live on [`AppState`] and take an explicit `now`,
//! so the debounce and the event handling are testable without a terminal.

use crate::{
    commands::{execute_command, Command},
    event::{self, AppEvent, Direction},
    theme::Theme,
    widgets::{
        command_bar::{CommandBar, CommandBarState},
        detail::{Detail, DetailState},
        help::HelpPopup,
        query_bar::{QueryBar, QueryBarState},
        results::{Results, ResultsState},
        status_bar::{progress_label, StatusBar},
        type_list::{TypeList, TypeListState},
    },
};
use crossterm::{
    event::{self as ct_event, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use dexter_api::{
    AbilityResolver, CatalogLoader, CatalogSource, LoadProgress, MemoryAbilityCache,
};
use dexter_core::{
    config::Config, search::distinct_types, AbilityDetail, Pokemon, SearchRequest, SortKey,
    TypeFilter,
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction as LayoutDir, Layout, Rect},
    Frame, Terminal,
};
use std::{
    collections::{HashMap, HashSet},
    io,
    sync::Arc,
    time::{Duration, Instant},
};
use tokio::{
    runtime::Handle,
    sync::{mpsc, watch},
};

const TYPE_PANE_WIDTH: u16 = 16;

// ---------------------------------------------------------------------------
// Focus, load state and background messages
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Types,
    Results,
    QueryBar,
    /// Vim-style `:` command line is active.
    Command,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadState {
    Loading(LoadProgress),
    Ready,
    Failed(String),
}

/// Results of background work, delivered to the event loop.
#[derive(Debug)]
pub enum Msg {
    Loaded(Vec<Pokemon>),
    LoadFailed(String),
    Ability { name: String, detail: AbilityDetail },
}

// ---------------------------------------------------------------------------
// AppState
// ---------------------------------------------------------------------------

pub struct AppState {
    pub catalog: Vec<Pokemon>,
    pub load: LoadState,
    /// Sort, type filter and the last query that was actually searched.
    pub request: SearchRequest,
    pub types: TypeListState,
    pub results: ResultsState,
    pub query: QueryBarState,
    /// Time of the last query edit not yet searched.
    pub query_edited_at: Option<Instant>,
    pub debounce: Duration,
    pub detail: Option<DetailState>,
    /// Ability details received so far, keyed by API name.
    pub abilities: HashMap<String, AbilityDetail>,
    /// Lookups waiting to be spawned by the event loop.
    ability_requests: Vec<String>,
    ability_in_flight: HashSet<String>,
    pub focus: Focus,
    /// Focus state before entering command mode, restored on exit.
    pub prev_focus: Focus,
    pub theme: Theme,
    pub config: Config,
    pub show_help: bool,
    pub command_bar: CommandBarState,
    pub quit: bool,
}

impl AppState {
    pub fn new(config: Config, theme: Theme, request: SearchRequest) -> Self {
        let results = ResultsState {
            show_description: config.ui.show_description,
            name_width: usize::from(config.ui.name_column_width),
            ..ResultsState::default()
        };

        Self {
            catalog: Vec::new(),
            load: LoadState::Loading(LoadProgress::default()),
            query: QueryBarState::with_query(request.query.clone()),
            request,
            types: TypeListState::default(),
            results,
            query_edited_at: None,
            debounce: config.search.debounce(),
            detail: None,
            abilities: HashMap::new(),
            ability_requests: Vec::new(),
            ability_in_flight: HashSet::new(),
            focus: Focus::Results,
            prev_focus: Focus::Results,
            theme,
            config,
            show_help: false,
            command_bar: CommandBarState::default(),
            quit: false,
        }
    }

    // ── Background results ────────────────────────────────────────────────

    pub fn apply(&mut self, msg: Msg) {
        match msg {
            Msg::Loaded(records) => {
                tracing::debug!(count = records.len(), "catalog ready");
                self.types.set_types(distinct_types(&records));
                self.catalog = records;
                self.load = LoadState::Ready;
                self.refresh();
            }
            Msg::LoadFailed(err) => {
                tracing::debug!(error = %err, "catalog failed");
                self.load = LoadState::Failed(err);
            }
            Msg::Ability { name, detail } => {
                self.ability_in_flight.remove(&name);
                self.abilities.insert(name, detail);
            }
        }
    }

    pub fn set_progress(&mut self, progress: LoadProgress) {
        if let LoadState::Loading(p) = &mut self.load {
            *p = progress;
        }
    }

    /// Run the debounced search once the query bar has been quiet long enough.
    pub fn tick(&mut self, now: Instant) {
        if let Some(edited) = self.query_edited_at {
            if now.saturating_duration_since(edited) >= self.debounce {
                self.query_edited_at = None;
                self.refresh();
            }
        }
    }

    /// Re-run the search with the current query, sort and type filter.
    pub fn refresh(&mut self) {
        self.request.query = self.query.query().to_string();
        let rows: Vec<Pokemon> = dexter_core::search(&self.catalog, &self.request)
            .into_iter()
            .cloned()
            .collect();
        tracing::debug!(
            query = %self.request.query,
            sort = %self.request.sort,
            type_filter = %self.request.type_filter,
            results = rows.len(),
            "search refreshed"
        );
        self.results.set_rows(rows);
    }

    pub fn set_sort(&mut self, sort: SortKey) {
        tracing::debug!(%sort, "sort changed");
        self.request.sort = sort;
        self.refresh();
    }

    pub fn set_type_filter(&mut self, filter: TypeFilter) {
        tracing::debug!(%filter, "type filter changed");
        self.request.type_filter = filter;
        self.refresh();
    }

    /// Drain the ability lookups queued since the last call.
    pub fn take_ability_requests(&mut self) -> Vec<String> {
        std::mem::take(&mut self.ability_requests)
    }

    fn open_detail(&mut self) {
        let Some(pokemon) = self.results.selected().cloned() else {
            return;
        };
        tracing::debug!(name = %pokemon.name, "detail opened");
        for ability in &pokemon.abilities {
            let known = self
                .abilities
                .get(ability)
                .is_some_and(|d| !d.is_placeholder());
            if !known && self.ability_in_flight.insert(ability.clone()) {
                self.ability_requests.push(ability.clone());
            }
        }
        self.detail = Some(DetailState::new(pokemon));
    }

    // ── Key handling ──────────────────────────────────────────────────────

    pub fn handle(&mut self, event: AppEvent, now: Instant) {
        // Help popup intercepts all events; only close keys pass through.
        if self.show_help {
            if matches!(event, AppEvent::Char('?') | AppEvent::Escape | AppEvent::Quit) {
                tracing::debug!("help popup closed");
                self.show_help = false;
            }
            return;
        }

        if let Some(detail) = &mut self.detail {
            match event {
                AppEvent::Escape | AppEvent::Quit | AppEvent::Enter => {
                    tracing::debug!("detail closed");
                    self.detail = None;
                }
                other => detail.handle(&other),
            }
            return;
        }

        if self.focus == Focus::Command {
            self.handle_command_bar(event);
            return;
        }

        match event {
            AppEvent::Char('?') if self.focus != Focus::QueryBar => {
                tracing::debug!("help popup opened");
                self.show_help = true;
            }

            AppEvent::Char(':') if self.focus != Focus::QueryBar => {
                tracing::debug!(prev_focus = ?self.focus, "entering command mode");
                self.prev_focus = self.focus;
                self.command_bar.clear();
                self.focus = Focus::Command;
            }

            AppEvent::Quit => {
                tracing::debug!("quit");
                self.quit = true;
            }

            AppEvent::Escape => {
                if self.focus == Focus::QueryBar {
                    tracing::debug!("focus: QueryBar -> Results");
                    self.focus = Focus::Results;
                }
            }

            // Types → Results → QueryBar → Types
            AppEvent::FocusNext => {
                let next = match self.focus {
                    Focus::Types => Focus::Results,
                    Focus::Results => Focus::QueryBar,
                    Focus::QueryBar | Focus::Command => Focus::Types,
                };
                tracing::debug!(from = ?self.focus, to = ?next, "focus cycle");
                self.focus = next;
            }

            AppEvent::QueryFocus => {
                tracing::debug!("focus -> QueryBar");
                self.focus = Focus::QueryBar;
            }

            AppEvent::CycleSort => self.set_sort(self.request.sort.next()),

            AppEvent::CycleType => {
                let next = self.types.cycle(&self.request.type_filter);
                self.set_type_filter(next);
            }

            // Terminal resize is handled automatically by ratatui
            AppEvent::Resize(_, _) => {}

            other => self.dispatch_to_focused(other, now),
        }
    }

    fn handle_command_bar(&mut self, event: AppEvent) {
        match event {
            AppEvent::Escape => {
                tracing::debug!("command bar cancelled");
                self.command_bar.clear();
                self.focus = self.prev_focus;
            }
            AppEvent::Enter => match Command::parse(self.command_bar.input()) {
                Ok(cmd) => {
                    tracing::debug!(command = ?cmd, "executing command");
                    match execute_command(self, cmd) {
                        Ok(()) => {
                            self.command_bar.clear();
                            self.focus = self.prev_focus;
                        }
                        Err(msg) => self.command_bar.error = Some(msg),
                    }
                }
                // Empty input: just close
                Err(msg) if msg.is_empty() => {
                    self.command_bar.clear();
                    self.focus = self.prev_focus;
                }
                Err(msg) => self.command_bar.error = Some(msg),
            },
            AppEvent::Quit => self.quit = true,
            other => self.command_bar.handle(&other),
        }
    }

    /// Route an event to the widget that owns the current focus.
    fn dispatch_to_focused(&mut self, event: AppEvent, now: Instant) {
        match self.focus {
            Focus::Types => {
                if let Some(filter) = self.types.handle(&event) {
                    self.set_type_filter(filter);
                }
            }
            Focus::Results => match event {
                AppEvent::Enter => self.open_detail(),
                other => self.results.handle(&other),
            },
            Focus::QueryBar => match event {
                // Search immediately and hand focus to the results
                AppEvent::Enter => {
                    self.query_edited_at = None;
                    self.refresh();
                    self.focus = Focus::Results;
                }
                AppEvent::Nav(Direction::Up | Direction::Down) => self.results.handle(&event),
                other => {
                    if self.query.handle(&other) {
                        self.query_edited_at = Some(now);
                    }
                }
            },
            Focus::Command => {} // handled before dispatch
        }
    }

    fn empty_message(&self) -> String {
        match &self.load {
            LoadState::Loading(p) => progress_label(*p),
            LoadState::Failed(_) => "The catalog could not be loaded.".to_string(),
            LoadState::Ready => "No Pokémon match this search.".to_string(),
        }
    }
}

/// Returns true when the current focus is on a text-input widget, meaning
/// alphabetic keys should produce characters rather than trigger shortcuts.
fn is_insert_mode(focus: Focus) -> bool {
    matches!(focus, Focus::QueryBar | Focus::Command)
}

// ---------------------------------------------------------------------------
// App
// ---------------------------------------------------------------------------

pub struct App {
    state: AppState,
    runtime: Handle,
    loader: Arc<CatalogLoader>,
    resolver: AbilityResolver,
    tx: mpsc::UnboundedSender<Msg>,
    rx: mpsc::UnboundedReceiver<Msg>,
    progress: watch::Receiver<LoadProgress>,
}

impl App {
    pub fn new(state: AppState, source: Arc<dyn CatalogSource>, runtime: Handle) -> Self {
        let loader = Arc::new(CatalogLoader::new(Arc::clone(&source)));
        let resolver = AbilityResolver::new(source, Arc::new(MemoryAbilityCache::new()));
        let progress = loader.subscribe();
        let (tx, rx) = mpsc::unbounded_channel();

        App { state, runtime, loader, resolver, tx, rx, progress }
    }

    /// Set up the terminal, run the event loop, and restore the terminal on exit.
    pub fn run(mut self) -> anyhow::Result<()> {
        install_panic_hook();
        self.start_load();

        enable_raw_mode()?;
        execute!(io::stdout(), EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(io::stdout());
        let mut terminal = Terminal::new(backend)?;

        let result = self.event_loop(&mut terminal);

        // Always restore terminal, even if the loop returned an error
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        let _ = terminal.show_cursor();

        result
    }

    fn start_load(&self) {
        let loader = Arc::clone(&self.loader);
        let tx = self.tx.clone();
        self.runtime.spawn(async move {
            let msg = match loader.load().await {
                Ok(records) => Msg::Loaded(records),
                Err(err) => Msg::LoadFailed(err.to_string()),
            };
            let _ = tx.send(msg);
        });
    }

    fn spawn_ability_lookups(&mut self) {
        for name in self.state.take_ability_requests() {
            let resolver = self.resolver.clone();
            let tx = self.tx.clone();
            self.runtime.spawn(async move {
                let detail = resolver.resolve(&name).await;
                let _ = tx.send(Msg::Ability { name, detail });
            });
        }
    }

    /// Fold background progress and messages into the state, then run any
    /// debounced search that is due.
    fn pump(&mut self, now: Instant) {
        if self.progress.has_changed().unwrap_or(false) {
            let progress = *self.progress.borrow_and_update();
            self.state.set_progress(progress);
        }
        while let Ok(msg) = self.rx.try_recv() {
            self.state.apply(msg);
        }
        self.state.tick(now);
    }

    fn event_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    ) -> anyhow::Result<()> {
        loop {
            self.pump(Instant::now());

            {
                let s = &self.state;
                terminal.draw(|frame| draw(frame, s))?;
            }

            if self.state.quit {
                break;
            }

            if ct_event::poll(Duration::from_millis(16))? {
                let app_event = match ct_event::read()? {
                    Event::Key(key) if key.kind != KeyEventKind::Press => None,
                    // Use insert-mode mapping when a text widget is focused
                    Event::Key(key) if is_insert_mode(self.state.focus) => {
                        event::to_app_event_insert(Event::Key(key))
                    }
                    other => event::to_app_event(other),
                };
                if let Some(ev) = app_event {
                    tracing::debug!(focus = ?self.state.focus, event = ?ev, "key event");
                    self.state.handle(ev, Instant::now());
                    self.spawn_ability_lookups();
                }
            }
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Rendering
// ---------------------------------------------------------------------------

fn draw(frame: &mut Frame, state: &AppState) {
    let area = frame.area();

    // Vertical: 1-line status bar | body | 3-line query bar
    let vert = Layout::default()
        .direction(LayoutDir::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Fill(1),
            Constraint::Length(3),
        ])
        .split(area);

    let horiz = Layout::default()
        .direction(LayoutDir::Horizontal)
        .constraints([Constraint::Length(TYPE_PANE_WIDTH), Constraint::Fill(1)])
        .split(vert[1]);

    frame.render_widget(
        StatusBar::new(
            &state.load,
            state.results.rows.len(),
            state.catalog.len(),
            &state.theme,
        ),
        vert[0],
    );
    frame.render_widget(
        TypeList::new(
            &state.types,
            &state.request.type_filter,
            state.focus == Focus::Types,
            &state.theme,
        ),
        horiz[0],
    );
    let empty = state.empty_message();
    frame.render_widget(
        Results::new(&state.results, &empty, state.focus == Focus::Results, &state.theme),
        horiz[1],
    );
    let query_bar = QueryBar::new(
        &state.query,
        state.request.sort,
        &state.request.type_filter,
        state.focus == Focus::QueryBar,
        &state.theme,
    );
    let (cx, cy) = query_bar.cursor_position(vert[2]);
    frame.render_widget(query_bar, vert[2]);

    if let Some(detail) = &state.detail {
        frame.render_widget(Detail::new(detail, &state.abilities, &state.theme), vert[1]);
    }

    if state.show_help {
        frame.render_widget(HelpPopup::new(&state.theme), area);
    }

    // Command bar overlays the bottom row of the screen
    if state.focus == Focus::Command {
        let cmd_area = Rect { y: area.bottom().saturating_sub(1), height: 1, ..area };
        frame.render_widget(CommandBar::new(&state.command_bar, &state.theme), cmd_area);
        let col = state.command_bar.cursor_col(cmd_area);
        frame.set_cursor_position((col, cmd_area.y));
        return;
    }

    if state.focus == Focus::QueryBar && state.detail.is_none() && !state.show_help {
        frame.set_cursor_position((cx, cy));
    }
}

// ---------------------------------------------------------------------------
// Terminal helpers
// ---------------------------------------------------------------------------

fn install_panic_hook() {
    let original = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original(info);
    }));
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
