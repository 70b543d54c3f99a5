//! Headless mode: load the catalog once, run one search, print the results.
//!
//! Table output is one line per record:
//!
//! ```text
//! #001  bulbasaur  grass/poison  overgrow, chlorophyll
//! ```
//!
//! With `--explain` each line is followed by the ranking keys; with
//! `--format json` the records (and keys) are printed as a JSON array.

use anyhow::Context;
use dexter_api::{CatalogLoader, CatalogSource};
use dexter_core::{rank, Pokemon, Ranked, Score, SearchRequest};
use serde::Serialize;
use std::io::Write;
use std::sync::Arc;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

#[derive(Debug, Clone, Default)]
pub struct HeadlessOptions {
    pub request: SearchRequest,
    pub format: OutputFormat,
    pub explain: bool,
}

/// One table row: `#id  name  type/type  ability, ability`.
pub fn format_row(pokemon: &Pokemon) -> String {
    format!(
        "#{}  {}  {}  {}",
        pokemon.padded_id(),
        pokemon.name,
        pokemon.types.join("/"),
        pokemon.abilities.join(", ")
    )
}

fn fmt_score(score: Score) -> String {
    if score.is_finite() {
        format!("{score}")
    } else {
        "-".to_string()
    }
}

/// The ranking keys of one hit: `relevance=2 name=2 type=0 ability=0`.
pub fn format_explain(hit: &Ranked<'_>) -> String {
    format!(
        "relevance={} name={} type={} ability={}",
        fmt_score(hit.relevance),
        fmt_score(hit.scores.name_score),
        fmt_score(hit.scores.type_score),
        fmt_score(hit.scores.ability_score),
    )
}

#[derive(Serialize)]
struct Explained<'a> {
    #[serde(flatten)]
    pokemon: &'a Pokemon,
    relevance: Score,
    name_score: Score,
    type_score: Score,
    ability_score: Score,
}

/// Rank `records` and write them to `out`. Returns the number of hits.
pub fn write_results<W: Write>(
    records: &[Pokemon],
    opts: &HeadlessOptions,
    out: &mut W,
) -> anyhow::Result<usize> {
    let hits = rank(records, &opts.request);

    match (opts.format, opts.explain) {
        (OutputFormat::Table, explain) => {
            for hit in &hits {
                if explain {
                    writeln!(out, "{}  ({})", format_row(hit.pokemon), format_explain(hit))?;
                } else {
                    writeln!(out, "{}", format_row(hit.pokemon))?;
                }
            }
        }
        (OutputFormat::Json, false) => {
            let plain: Vec<&Pokemon> = hits.iter().map(|h| h.pokemon).collect();
            serde_json::to_writer_pretty(&mut *out, &plain)?;
            writeln!(out)?;
        }
        (OutputFormat::Json, true) => {
            let explained: Vec<Explained<'_>> = hits
                .iter()
                .map(|h| Explained {
                    pokemon: h.pokemon,
                    relevance: h.relevance,
                    name_score: h.scores.name_score,
                    type_score: h.scores.type_score,
                    ability_score: h.scores.ability_score,
                })
                .collect();
            serde_json::to_writer_pretty(&mut *out, &explained)?;
            writeln!(out)?;
        }
    }

    out.flush()?;
    tracing::debug!(hits = hits.len(), "headless results written");
    Ok(hits.len())
}

/// Load the whole catalog from `source`, then print one search.
pub async fn run<W: Write>(
    source: Arc<dyn CatalogSource>,
    opts: &HeadlessOptions,
    out: &mut W,
) -> anyhow::Result<usize> {
    let loader = CatalogLoader::new(source);
    let records = loader.load().await.context("failed to load the catalog")?;
    write_results(&records, opts, out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use dexter_core::{SortKey, TypeFilter};
    use pretty_assertions::assert_eq;

    fn mon(id: u32, name: &str, types: &[&str], abilities: &[&str]) -> Pokemon {
        Pokemon {
            id,
            name: name.into(),
            types: types.iter().map(|s| s.to_string()).collect(),
            abilities: abilities.iter().map(|s| s.to_string()).collect(),
            description: String::new(),
            image: None,
            stats: vec![],
            height: 0,
            weight: 0,
        }
    }

    fn starters() -> Vec<Pokemon> {
        vec![
            mon(1, "bulbasaur", &["grass", "poison"], &["overgrow", "chlorophyll"]),
            mon(4, "charmander", &["fire"], &["blaze", "solar-power"]),
        ]
    }

    fn output(opts: &HeadlessOptions) -> String {
        let mut buf = Vec::new();
        write_results(&starters(), opts, &mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn table_rows() {
        let out = output(&HeadlessOptions::default());
        assert_eq!(
            out,
            "#001  bulbasaur  grass/poison  overgrow, chlorophyll\n\
             #004  charmander  fire  blaze, solar-power\n"
        );
    }

    #[test]
    fn explain_appends_scores() {
        let opts = HeadlessOptions {
            request: SearchRequest::new("char"),
            explain: true,
            ..HeadlessOptions::default()
        };
        assert_eq!(
            output(&opts),
            "#004  charmander  fire  blaze, solar-power  (relevance=2 name=2 type=0 ability=0)\n"
        );
    }

    #[test]
    fn json_is_an_array_of_records() {
        let opts = HeadlessOptions {
            request: SearchRequest::default()
                .with_sort(SortKey::Newest)
                .with_type_filter(TypeFilter::All),
            format: OutputFormat::Json,
            ..HeadlessOptions::default()
        };
        let parsed: Vec<Pokemon> = serde_json::from_str(&output(&opts)).unwrap();
        assert_eq!(parsed.iter().map(|p| p.id).collect::<Vec<_>>(), vec![4, 1]);
    }

    #[test]
    fn explained_json_carries_scores() {
        let opts = HeadlessOptions {
            request: SearchRequest::new(":fire"),
            format: OutputFormat::Json,
            explain: true,
        };
        let parsed: serde_json::Value = serde_json::from_str(&output(&opts)).unwrap();
        assert_eq!(parsed[0]["name"], "charmander");
        assert_eq!(parsed[0]["type_score"], 0.0);
        assert_eq!(parsed[0]["relevance"], 0.0);
    }

    #[test]
    fn unmatched_scores_render_as_dash() {
        assert_eq!(fmt_score(f64::INFINITY), "-");
        assert_eq!(fmt_score(104.0), "104");
    }
}
