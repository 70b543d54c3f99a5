//! Static catalog corpora used across harnesses.
//!
//! `starters()` is the small hand-checked set most assertions are written
//! against. `generated(n)` is a larger synthetic catalog for throughput and
//! property tests; its names are deterministic so failures reproduce.

use crate::common::builders::PokemonBuilder;
use dexter_core::Pokemon;

/// Eleven well-known records with real types and abilities.
pub fn starters() -> Vec<Pokemon> {
    vec![
        PokemonBuilder::new(1, "bulbasaur")
            .types(&["grass", "poison"])
            .abilities(&["overgrow", "chlorophyll"])
            .description("A strange seed was planted on its back at birth.")
            .stat("hp", 45)
            .size(7, 69)
            .build(),
        PokemonBuilder::new(4, "charmander")
            .types(&["fire"])
            .abilities(&["blaze", "solar-power"])
            .description("Obviously prefers hot places.")
            .stat("hp", 39)
            .size(6, 85)
            .build(),
        PokemonBuilder::new(6, "charizard")
            .types(&["fire", "flying"])
            .abilities(&["blaze", "solar-power"])
            .size(17, 905)
            .build(),
        PokemonBuilder::new(7, "squirtle")
            .types(&["water"])
            .abilities(&["torrent", "rain-dish"])
            .size(5, 90)
            .build(),
        PokemonBuilder::new(25, "pikachu")
            .types(&["electric"])
            .abilities(&["static", "lightning-rod"])
            .description("When several of these gather, their electricity could build and cause lightning storms.")
            .size(4, 60)
            .build(),
        PokemonBuilder::new(26, "raichu")
            .types(&["electric"])
            .abilities(&["static", "lightning-rod"])
            .size(8, 300)
            .build(),
        PokemonBuilder::new(35, "clefairy")
            .types(&["fairy"])
            .abilities(&["cute-charm", "magic-guard", "friend-guard"])
            .build(),
        PokemonBuilder::new(92, "gastly")
            .types(&["ghost", "poison"])
            .abilities(&["levitate"])
            .build(),
        PokemonBuilder::new(132, "ditto")
            .types(&["normal"])
            .abilities(&["limber", "imposter"])
            .build(),
        PokemonBuilder::new(133, "eevee")
            .types(&["normal"])
            .abilities(&["run-away", "adaptability", "anticipation"])
            .build(),
        PokemonBuilder::new(1025, "pecharunt")
            .types(&["poison", "ghost"])
            .abilities(&["poison-puppeteer"])
            .build(),
    ]
}

const SYLLABLES: &[&str] = &["pi", "ka", "chu", "bul", "ba", "saur", "char", "man", "der", "ee", "vee", "dit", "to"];
const TYPES: &[&str] = &["normal", "fire", "water", "grass", "electric", "ice", "fighting", "poison", "ground"];
const ABILITIES: &[&str] = &["static", "blaze", "torrent", "overgrow", "levitate", "limber", "intimidate"];

/// A deterministic synthetic catalog of `n` records with ids `1..=n`.
pub fn generated(n: u32) -> Vec<Pokemon> {
    (1..=n)
        .map(|id| {
            let i = id as usize;
            let name = format!(
                "{}{}{}",
                SYLLABLES[i % SYLLABLES.len()],
                SYLLABLES[(i / 3) % SYLLABLES.len()],
                SYLLABLES[(i / 7) % SYLLABLES.len()]
            );
            let mut types = vec![TYPES[i % TYPES.len()]];
            if i % 2 == 0 {
                types.push(TYPES[(i / 2) % TYPES.len()]);
                types.dedup();
            }
            let abilities: Vec<&str> = (0..1 + i % 3).map(|k| ABILITIES[(i + k) % ABILITIES.len()]).collect();
            PokemonBuilder::new(id, name).types(&types).abilities(&abilities).build()
        })
        .collect()
}

/// Write `records` to a JSON snapshot inside `dir` and return its path.
pub fn write_snapshot(dir: &std::path::Path, records: &[Pokemon]) -> std::path::PathBuf {
    let path = dir.join("catalog.json");
    std::fs::write(&path, serde_json::to_vec_pretty(records).unwrap()).unwrap();
    path
}
