//! Variant ranking for `.match`.
//!
//! Each selector contributes the keys its function matched, most preferred
//! first, or `None` when the selector failed and only `*` can match it. A
//! variant is eligible when every key matches its selector. Eligible variants
//! are ordered by:
//!
//! 1. fewest catch-all keys,
//! 2. key preference, compared selector by selector,
//! 3. position in the source.

use mf2_syntax::{Variant, VariantKey};

/// Returns the distinct literal keys in selector column `index`, in source order.
#[must_use]
pub fn column_keys(variants: &[Variant], index: usize) -> Vec<&str> {
    let mut keys: Vec<&str> = Vec::new();
    for variant in variants {
        if let Some(VariantKey::Literal(literal)) = variant.keys.get(index) {
            let key = literal.value();
            if !keys.contains(&key) {
                keys.push(key);
            }
        }
    }
    keys
}

/// Returns the index of the best matching variant, if any variant matches.
#[must_use]
pub fn best_variant(variants: &[Variant], matches: &[Option<Vec<String>>]) -> Option<usize> {
    variants
        .iter()
        .enumerate()
        .filter_map(|(index, variant)| rank(variant, matches).map(|rank| (rank, index)))
        .min()
        .map(|(_, index)| index)
}

/// Sort key for an eligible variant; `None` if some key does not match.
fn rank(variant: &Variant, matches: &[Option<Vec<String>>]) -> Option<(usize, Vec<usize>)> {
    if variant.keys.len() != matches.len() {
        return None;
    }

    let mut preferences = Vec::with_capacity(matches.len());
    for (key, matched) in variant.keys.iter().zip(matches) {
        let preference = match key {
            VariantKey::CatchAll => usize::MAX,
            VariantKey::Literal(literal) => matched
                .as_ref()?
                .iter()
                .position(|m| m == literal.value())?,
        };
        preferences.push(preference);
    }

    Some((variant.catch_all_count(), preferences))
}
