//! Domain-specific assertion macros for dexter harnesses.
//!
//! These wrap `pretty_assertions` and add failure messages that name the
//! ordering or matching rule that was broken, plus the offending records.

/// Assert that the names of `results` equal `expected`, in order.
///
/// ```rust
/// assert_names!(search(&records, &query("char")), ["charizard", "charmander"]);
/// ```
#[macro_export]
macro_rules! assert_names {
    ($results:expr, [$($name:expr),* $(,)?]) => {{
        let actual: Vec<String> = $results.iter().map(|p| p.name.clone()).collect();
        let expected: Vec<String> = vec![$($name.to_string()),*];
        pretty_assertions::assert_eq!(actual, expected, "result order");
    }};
}

/// Assert that `results` contains a record named `$name`.
#[macro_export]
macro_rules! assert_contains_name {
    ($results:expr, $name:expr) => {{
        let name: &str = $name;
        if !$results.iter().any(|p| p.name == name) {
            panic!(
                "assert_contains_name! failed: {:?} not in results.\n  Results: {:?}",
                name,
                $results.iter().map(|p| p.name.as_str()).collect::<Vec<_>>()
            );
        }
    }};
}

/// Assert that no record in `results` is named `$name`.
#[macro_export]
macro_rules! assert_excludes_name {
    ($results:expr, $name:expr) => {{
        let name: &str = $name;
        if $results.iter().any(|p| p.name == name) {
            panic!(
                "assert_excludes_name! failed: {:?} unexpectedly in results.\n  Results: {:?}",
                name,
                $results.iter().map(|p| p.name.as_str()).collect::<Vec<_>>()
            );
        }
    }};
}

/// Assert that a slice of ranked hits is ordered by non-decreasing relevance.
#[macro_export]
macro_rules! assert_relevance_ordered {
    ($ranked:expr) => {{
        for pair in $ranked.windows(2) {
            if pair[0].relevance > pair[1].relevance {
                panic!(
                    "assert_relevance_ordered! failed: {} ({}) ranked before {} ({})",
                    pair[0].pokemon.name, pair[0].relevance, pair[1].pokemon.name, pair[1].relevance
                );
            }
        }
    }};
}

/// Assert that every record in `results` carries type `$ty`.
#[macro_export]
macro_rules! assert_all_typed {
    ($results:expr, $ty:expr) => {{
        let ty: &str = $ty;
        for p in $results.iter() {
            if !p.types.iter().any(|t| t == ty) {
                panic!(
                    "assert_all_typed! failed: {} has types {:?}, expected {:?}",
                    p.name, p.types, ty
                );
            }
        }
    }};
}
