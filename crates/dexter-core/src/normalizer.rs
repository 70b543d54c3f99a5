//! Normalizer — canonicalises text before any fuzzy comparison.
//!
//! Both query terms and candidate field values pass through [`normalize`], so
//! `"Mr. Mime"`, `"mr-mime"` and `"MRMIME"` all compare as `"mrmime"`.

/// Lowercase `s` (full Unicode mapping) and drop every character outside
/// `[a-z0-9]`.
pub fn normalize(s: &str) -> String {
    s.to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit())
        .collect()
}

/// True iff every byte of `needle` appears in `hay` in order.
///
/// Both inputs are expected to be normalized (ASCII only). An empty needle
/// matches vacuously.
pub fn is_subsequence(needle: &str, hay: &str) -> bool {
    let needle = needle.as_bytes();
    let mut i = 0;
    for &b in hay.as_bytes() {
        if i == needle.len() {
            break;
        }
        if b == needle[i] {
            i += 1;
        }
    }
    i == needle.len()
}
