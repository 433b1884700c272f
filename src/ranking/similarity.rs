//! Pairwise similarity metrics on the 0-100 scale.
//!
//! Two metric families back the field scorer: an order-sensitive quick ratio
//! for short structured strings (emails, handles) and an order-insensitive
//! weighted ratio for display names. Both are built on `rapidfuzz`'s
//! normalized Indel ratio so the concrete algorithm stays swappable behind
//! these two functions.

use rapidfuzz::fuzz;
use std::collections::BTreeSet;

/// Token-derived ratios never beat an identical full string.
const TOKEN_SCALE: f64 = 0.95;

/// Order-sensitive similarity for short structured strings.
///
/// Empty input on either side scores 0.0, matching the "absent field" policy
/// of the ranker.
pub fn quick_ratio(a: &str, b: &str) -> f64 {
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }
    fuzz::ratio(a.chars(), b.chars()) * 100.0
}

/// Order-insensitive similarity for display names.
///
/// Takes the best of the full-string ratio, the token-sort ratio and the
/// token-set ratio. Tokens are split on non-alphanumerics, so punctuation in
/// a stored name cannot poison the comparison.
pub fn weighted_ratio(a: &str, b: &str) -> f64 {
    let tokens_a = tokenize(a);
    let tokens_b = tokenize(b);
    if tokens_a.is_empty() || tokens_b.is_empty() {
        return 0.0;
    }

    let full = fuzz::ratio(a.chars(), b.chars()) * 100.0;
    let sorted_a = join_sorted(&tokens_a);
    let sorted_b = join_sorted(&tokens_b);
    let token_sort = fuzz::ratio(sorted_a.chars(), sorted_b.chars()) * 100.0;
    let token_set = token_set_ratio(&tokens_a, &tokens_b);

    full.max(token_sort * TOKEN_SCALE).max(token_set * TOKEN_SCALE)
}

fn tokenize(s: &str) -> Vec<&str> {
    s.split(|c: char| !c.is_alphanumeric())
        .filter(|t| !t.is_empty())
        .collect()
}

fn join_sorted(tokens: &[&str]) -> String {
    let mut sorted = tokens.to_vec();
    sorted.sort_unstable();
    sorted.join(" ")
}

/// Classic token-set comparison: score the shared-token core against each
/// side's core-plus-remainder, take the best pairing.
fn token_set_ratio(tokens_a: &[&str], tokens_b: &[&str]) -> f64 {
    let set_a: BTreeSet<&str> = tokens_a.iter().copied().collect();
    let set_b: BTreeSet<&str> = tokens_b.iter().copied().collect();

    let common: Vec<&str> = set_a.intersection(&set_b).copied().collect();
    let only_a: Vec<&str> = set_a.difference(&set_b).copied().collect();
    let only_b: Vec<&str> = set_b.difference(&set_a).copied().collect();

    if !common.is_empty() && only_a.is_empty() && only_b.is_empty() {
        return 100.0;
    }

    let core = common.join(" ");
    let with_a = append_tokens(&core, &only_a);
    let with_b = append_tokens(&core, &only_b);

    let core_vs_a = fuzz::ratio(core.chars(), with_a.chars()) * 100.0;
    let core_vs_b = fuzz::ratio(core.chars(), with_b.chars()) * 100.0;
    let a_vs_b = fuzz::ratio(with_a.chars(), with_b.chars()) * 100.0;

    core_vs_a.max(core_vs_b).max(a_vs_b)
}

fn append_tokens(core: &str, rest: &[&str]) -> String {
    if rest.is_empty() {
        return core.to_string();
    }
    if core.is_empty() {
        return rest.join(" ");
    }
    format!("{} {}", core, rest.join(" "))
}
