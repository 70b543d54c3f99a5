//! Fake PokeAPI server for integration tests.
//!
//! Spins up a minimal `axum` HTTP server on a random TCP port bound to
//! 127.0.0.1. Serves the four shapes the client reads:
//! - `GET /pokemon?limit=N` — the catalog list, truncated to `N`
//! - `GET /pokemon/{name}` — detail payload pointing at its species URL
//! - `GET /pokemon-species/{name}` — English (and Japanese) flavor text
//! - `GET /ability/{name}` — effect entries for registered abilities
//!
//! Individual records or the list itself can be made to fail with a 500, and
//! every request is counted so tests can assert on caching.
//!
//! # Example
//!
//! ```rust,no_run
//! let api = FakePokeApi::start(starters()).await.unwrap();
//! api.fail_record("squirtle").await;
//! let client = PokeApiClient::new(&api.config()).unwrap();
//! ```

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use dexter_core::config::ApiConfig;
use dexter_core::Pokemon;
use serde_json::json;
use std::collections::{HashMap, HashSet};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::Mutex;

/// State shared between the router and test code.
#[derive(Default)]
struct ApiState {
    base_url: String,
    records: Vec<Pokemon>,
    abilities: HashMap<String, (String, String)>,
    failing: HashSet<String>,
    fail_list: bool,
    hits: HashMap<String, usize>,
}

impl ApiState {
    fn hit(&mut self, path: String) {
        *self.hits.entry(path).or_default() += 1;
    }
}

type Shared = Arc<Mutex<ApiState>>;

/// Handle to the running fake PokeAPI server.
pub struct FakePokeApi {
    addr: SocketAddr,
    state: Shared,
}

impl FakePokeApi {
    /// Start the server serving `records`. Returns once it is listening.
    pub async fn start(records: Vec<Pokemon>) -> std::io::Result<Self> {
        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        let state = Arc::new(Mutex::new(ApiState {
            base_url: format!("http://{addr}"),
            records,
            ..ApiState::default()
        }));

        let app = Router::new()
            .route("/pokemon", get(list))
            .route("/pokemon/{name}", get(detail))
            .route("/pokemon-species/{name}", get(species))
            .route("/ability/{name}", get(ability))
            .with_state(state.clone());

        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Ok(Self { addr, state })
    }

    /// Base URL for the API (e.g. `http://127.0.0.1:PORT`).
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// An [`ApiConfig`] pointed at this server with a small concurrency.
    pub fn config(&self) -> ApiConfig {
        ApiConfig {
            base_url: self.base_url(),
            limit: 2000,
            concurrency: 4,
            timeout_secs: 5,
        }
    }

    /// Make the detail endpoint for `name` answer 500.
    pub async fn fail_record(&self, name: &str) {
        self.state.lock().await.failing.insert(name.to_string());
    }

    /// Make the list endpoint answer 500.
    pub async fn fail_list(&self) {
        self.state.lock().await.fail_list = true;
    }

    /// Register an ability with its effect and short effect.
    pub async fn add_ability(&self, name: &str, effect: &str, short_effect: &str) {
        self.state
            .lock()
            .await
            .abilities
            .insert(name.to_string(), (effect.to_string(), short_effect.to_string()));
    }

    /// How many times `path` (e.g. `/ability/static`) was requested.
    pub async fn hits(&self, path: &str) -> usize {
        self.state.lock().await.hits.get(path).copied().unwrap_or(0)
    }
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

async fn list(State(state): State<Shared>, Query(params): Query<HashMap<String, String>>) -> Response {
    let mut s = state.lock().await;
    s.hit("/pokemon".to_string());
    if s.fail_list {
        return StatusCode::INTERNAL_SERVER_ERROR.into_response();
    }
    let limit = params
        .get("limit")
        .and_then(|l| l.parse::<usize>().ok())
        .unwrap_or(20);
    let results: Vec<_> = s
        .records
        .iter()
        .take(limit)
        .map(|p| json!({ "name": p.name, "url": format!("{}/pokemon/{}", s.base_url, p.name) }))
        .collect();
    Json(json!({ "count": s.records.len(), "results": results })).into_response()
}

async fn detail(State(state): State<Shared>, Path(name): Path<String>) -> Response {
    let mut s = state.lock().await;
    s.hit(format!("/pokemon/{name}"));
    if s.failing.contains(&name) {
        return StatusCode::INTERNAL_SERVER_ERROR.into_response();
    }
    let Some(p) = s.records.iter().find(|p| p.name == name) else {
        return StatusCode::NOT_FOUND.into_response();
    };
    let artwork = json!({ "front_default": p.image });
    Json(json!({
        "id": p.id,
        "name": p.name,
        "height": p.height,
        "weight": p.weight,
        "abilities": p.abilities.iter().enumerate().map(|(i, a)| json!({
            "ability": { "name": a, "url": format!("{}/ability/{}", s.base_url, a) },
            "is_hidden": false,
            "slot": i + 1,
        })).collect::<Vec<_>>(),
        "types": p.types.iter().enumerate().map(|(i, t)| json!({
            "slot": i + 1,
            "type": { "name": t, "url": "" },
        })).collect::<Vec<_>>(),
        "stats": p.stats.iter().map(|st| json!({
            "base_stat": st.base,
            "effort": 0,
            "stat": { "name": st.name, "url": "" },
        })).collect::<Vec<_>>(),
        "sprites": { "front_default": null, "other": { "official-artwork": artwork } },
        "species": { "name": p.name, "url": format!("{}/pokemon-species/{}", s.base_url, p.name) },
    }))
    .into_response()
}

async fn species(State(state): State<Shared>, Path(name): Path<String>) -> Response {
    let mut s = state.lock().await;
    s.hit(format!("/pokemon-species/{name}"));
    let Some(p) = s.records.iter().find(|p| p.name == name) else {
        return StatusCode::NOT_FOUND.into_response();
    };
    // Japanese first so the client has to pick by language.
    Json(json!({
        "flavor_text_entries": [
            { "flavor_text": "日本語", "language": { "name": "ja" } },
            { "flavor_text": p.description.replace(' ', "\u{c}"), "language": { "name": "en" } },
        ]
    }))
    .into_response()
}

async fn ability(State(state): State<Shared>, Path(name): Path<String>) -> Response {
    let mut s = state.lock().await;
    s.hit(format!("/ability/{name}"));
    match s.abilities.get(&name) {
        Some((effect, short_effect)) => Json(json!({
            "name": name,
            "effect_entries": [{
                "effect": effect,
                "short_effect": short_effect,
                "language": { "name": "en" },
            }],
        }))
        .into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}
