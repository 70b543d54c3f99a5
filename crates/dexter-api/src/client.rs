//! PokeAPI client.
//!
//! A bulk load issues one list request, then a detail and a species request
//! per record with bounded concurrency. List order is preserved.
//!
//! ```text
//! GET {base}/pokemon?limit=N ──► [{name, url}, …]
//!        │
//!        └─► per entry: GET url ──► detail ──► GET species.url ──► flavor text
//! ```

use crate::{ApiError, CatalogSource, LoadProgress};
use async_trait::async_trait;
use dexter_core::config::ApiConfig;
use dexter_core::types::NO_DESCRIPTION;
use dexter_core::{AbilityDetail, BaseStat, Pokemon};
use futures::stream::{self, StreamExt};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::sync::watch;

// ---------------------------------------------------------------------------
// Wire types — only the fields dexter reads
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct NamedResource {
    name: String,
    #[serde(default)]
    url: String,
}

#[derive(Debug, Deserialize)]
struct ListPayload {
    #[serde(default)]
    results: Vec<NamedResource>,
}

#[derive(Debug, Deserialize)]
struct AbilitySlot {
    ability: NamedResource,
}

#[derive(Debug, Deserialize)]
struct TypeSlot {
    #[serde(rename = "type")]
    kind: NamedResource,
}

#[derive(Debug, Deserialize)]
struct StatSlot {
    base_stat: u32,
    stat: NamedResource,
}

#[derive(Debug, Default, Deserialize)]
struct Artwork {
    front_default: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct Sprites {
    front_default: Option<String>,
    #[serde(default)]
    other: HashMap<String, Artwork>,
}

#[derive(Debug, Deserialize)]
struct PokemonPayload {
    id: u32,
    name: String,
    #[serde(default)]
    height: u32,
    #[serde(default)]
    weight: u32,
    #[serde(default)]
    abilities: Vec<AbilitySlot>,
    #[serde(default)]
    types: Vec<TypeSlot>,
    #[serde(default)]
    stats: Vec<StatSlot>,
    #[serde(default)]
    sprites: Sprites,
    species: NamedResource,
}

#[derive(Debug, Deserialize)]
struct Language {
    name: String,
}

#[derive(Debug, Deserialize)]
struct FlavorText {
    flavor_text: String,
    language: Language,
}

#[derive(Debug, Deserialize)]
struct SpeciesPayload {
    #[serde(default)]
    flavor_text_entries: Vec<FlavorText>,
}

#[derive(Debug, Deserialize)]
struct EffectEntry {
    #[serde(default)]
    effect: Option<String>,
    #[serde(default)]
    short_effect: Option<String>,
    language: Language,
}

#[derive(Debug, Deserialize)]
struct AbilityPayload {
    name: String,
    #[serde(default)]
    effect_entries: Vec<EffectEntry>,
    #[serde(default)]
    flavor_text_entries: Vec<FlavorText>,
}

fn english_flavor(entries: &[FlavorText]) -> Option<String> {
    entries
        .iter()
        .find(|e| e.language.name == "en")
        .map(|e| e.flavor_text.replace('\u{c}', " "))
}

impl PokemonPayload {
    fn into_pokemon(self, description: Option<String>) -> Pokemon {
        let image = self
            .sprites
            .other
            .get("official-artwork")
            .and_then(|a| a.front_default.clone())
            .or(self.sprites.front_default);

        Pokemon {
            id: self.id,
            name: self.name,
            types: self.types.into_iter().map(|t| t.kind.name).collect(),
            abilities: self.abilities.into_iter().map(|a| a.ability.name).collect(),
            description: description.unwrap_or_else(|| NO_DESCRIPTION.to_string()),
            image,
            stats: self
                .stats
                .into_iter()
                .map(|s| BaseStat { name: s.stat.name, base: s.base_stat })
                .collect(),
            height: self.height,
            weight: self.weight,
        }
    }
}

impl AbilityPayload {
    fn into_detail(self) -> AbilityDetail {
        let english = self.effect_entries.into_iter().find(|e| e.language.name == "en");
        let (effect, short_effect) = match english {
            Some(e) => (e.effect, e.short_effect),
            // Newer abilities only ship flavor text.
            None => (None, english_flavor(&self.flavor_text_entries)),
        };
        AbilityDetail { name: self.name, effect, short_effect }
    }
}

// ---------------------------------------------------------------------------
// Client
// ---------------------------------------------------------------------------

/// HTTP catalog source backed by the public PokeAPI (or anything serving the
/// same shapes at `base_url`).
#[derive(Debug, Clone)]
pub struct PokeApiClient {
    client: Client,
    base_url: String,
    limit: usize,
    concurrency: usize,
}

impl PokeApiClient {
    pub fn new(config: &ApiConfig) -> Result<Self, ApiError> {
        let client = Client::builder()
            .timeout(config.timeout())
            .user_agent(concat!("dexter/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|source| ApiError::Http {
                url: config.base_url.clone(),
                source,
            })?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            limit: config.limit,
            concurrency: config.concurrency.max(1),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, ApiError> {
        let http = |source| ApiError::Http { url: url.to_string(), source };

        let response = self.client.get(url).send().await.map_err(http)?;
        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }
        let body = response.bytes().await.map_err(http)?;
        serde_json::from_slice(&body).map_err(|source| ApiError::Decode {
            url: url.to_string(),
            source,
        })
    }

    async fn load_one(&self, entry: &NamedResource) -> Result<Pokemon, ApiError> {
        let detail: PokemonPayload = self.get_json(&entry.url).await?;
        let species: SpeciesPayload = self.get_json(&detail.species.url).await?;
        Ok(detail.into_pokemon(english_flavor(&species.flavor_text_entries)))
    }

    /// [`Self::load_one`] plus progress accounting; a failed record is
    /// logged and yields `None`.
    async fn load_counted(
        &self,
        entry: NamedResource,
        done: &AtomicUsize,
        total: usize,
        progress: &watch::Sender<LoadProgress>,
    ) -> Option<Pokemon> {
        let result = self.load_one(&entry).await;
        let n = done.fetch_add(1, Ordering::Relaxed) + 1;
        progress.send_replace(LoadProgress { done: n, total });
        match result {
            Ok(pokemon) => Some(pokemon),
            Err(err) => {
                tracing::warn!(name = %entry.name, error = %err, "skipping record");
                None
            }
        }
    }
}

#[async_trait]
impl CatalogSource for PokeApiClient {
    async fn load_all_records(
        &self,
        progress: &watch::Sender<LoadProgress>,
    ) -> Result<Vec<Pokemon>, ApiError> {
        let list_url = format!("{}/pokemon?limit={}", self.base_url, self.limit);
        let list: ListPayload = self.get_json(&list_url).await?;

        let total = list.results.len();
        progress.send_replace(LoadProgress { done: 0, total });
        tracing::debug!(total, concurrency = self.concurrency, "catalog listed");

        let done = AtomicUsize::new(0);
        let fetched: Vec<Option<Pokemon>> = stream::iter(list.results)
            .map(|entry| self.load_counted(entry, &done, total, progress))
            .buffered(self.concurrency)
            .collect()
            .await;

        let records: Vec<Pokemon> = fetched.into_iter().flatten().collect();
        if records.is_empty() && total > 0 {
            return Err(ApiError::Empty);
        }
        Ok(records)
    }

    async fn load_ability_detail(&self, name: &str) -> Result<AbilityDetail, ApiError> {
        let url = format!("{}/ability/{}", self.base_url, name);
        let payload: AbilityPayload = self.get_json(&url).await?;
        Ok(payload.into_detail())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const PIKACHU: &str = r#"{
        "id": 25,
        "name": "pikachu",
        "height": 4,
        "weight": 60,
        "abilities": [
            {"ability": {"name": "static", "url": "x"}, "is_hidden": false, "slot": 1},
            {"ability": {"name": "lightning-rod", "url": "x"}, "is_hidden": true, "slot": 3}
        ],
        "types": [{"slot": 1, "type": {"name": "electric", "url": "x"}}],
        "stats": [{"base_stat": 35, "effort": 0, "stat": {"name": "hp", "url": "x"}}],
        "sprites": {
            "front_default": "sprite.png",
            "other": {"official-artwork": {"front_default": "artwork.png"}}
        },
        "species": {"name": "pikachu", "url": "species/25"}
    }"#;

    #[test]
    fn detail_payload_maps_to_pokemon() {
        let payload: PokemonPayload = serde_json::from_str(PIKACHU).unwrap();
        let p = payload.into_pokemon(Some("Mouse.".into()));
        assert_eq!(p.id, 25);
        assert_eq!(p.types, vec!["electric"]);
        assert_eq!(p.abilities, vec!["static", "lightning-rod"]);
        assert_eq!(p.image.as_deref(), Some("artwork.png"));
        assert_eq!(p.stats, vec![BaseStat { name: "hp".into(), base: 35 }]);
        assert_eq!(p.description, "Mouse.");
    }

    #[test]
    fn missing_artwork_falls_back_to_sprite_and_description_defaults() {
        let mut value: serde_json::Value = serde_json::from_str(PIKACHU).unwrap();
        value["sprites"]["other"] = serde_json::json!({});
        let payload: PokemonPayload = serde_json::from_value(value).unwrap();
        let p = payload.into_pokemon(None);
        assert_eq!(p.image.as_deref(), Some("sprite.png"));
        assert_eq!(p.description, NO_DESCRIPTION);
    }

    #[test]
    fn flavor_text_picks_english_and_strips_form_feeds() {
        let species: SpeciesPayload = serde_json::from_str(
            r#"{"flavor_text_entries": [
                {"flavor_text": "Souris.", "language": {"name": "fr"}},
                {"flavor_text": "When several\u000cof these", "language": {"name": "en"}}
            ]}"#,
        )
        .unwrap();
        assert_eq!(
            english_flavor(&species.flavor_text_entries).as_deref(),
            Some("When several of these")
        );
    }

    #[test]
    fn ability_payload_prefers_english_effect_entries() {
        let payload: AbilityPayload = serde_json::from_str(
            r#"{"name": "static", "effect_entries": [
                {"effect": "Long.", "short_effect": "Short.", "language": {"name": "en"}}
            ]}"#,
        )
        .unwrap();
        let d = payload.into_detail();
        assert_eq!(d.short_effect.as_deref(), Some("Short."));
        assert_eq!(d.effect.as_deref(), Some("Long."));
    }

    #[test]
    fn ability_payload_falls_back_to_flavor_text() {
        let payload: AbilityPayload = serde_json::from_str(
            r#"{"name": "new-ability", "effect_entries": [],
                "flavor_text_entries": [{"flavor_text": "Does things.", "language": {"name": "en"}}]}"#,
        )
        .unwrap();
        let d = payload.into_detail();
        assert_eq!(d.effect, None);
        assert_eq!(d.short_effect.as_deref(), Some("Does things."));
    }

    #[test]
    fn base_url_trailing_slash_is_trimmed() {
        let mut cfg = ApiConfig::default();
        cfg.base_url = "http://127.0.0.1:9/api/v2/".into();
        let client = PokeApiClient::new(&cfg).unwrap();
        assert_eq!(client.base_url(), "http://127.0.0.1:9/api/v2");
    }
}
