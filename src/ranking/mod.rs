//! Fuzzy user-search ranking.
//!
//! The pipeline: normalize the query once, score each candidate field in its
//! own pass over the batch, pick field weights from the query's surface form,
//! fuse the weighted scores with `max`, filter by threshold, stable-sort
//! descending, truncate. Pure and synchronous; callers bound cost by bounding
//! the candidate list and the limit.

pub mod normalize;
pub mod shape;
pub mod similarity;

pub use normalize::{normalize, normalize_handle};
pub use shape::{FieldWeights, QueryShape};

use serde::{Deserialize, Serialize};

use crate::core::UserRecord;

/// Prefix overrides only fire for queries at least this long, so single-letter
/// queries do not match nearly everything.
const MIN_PREFIX_QUERY_CHARS: usize = 3;

/// A candidate with its fused score and the per-field breakdown.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchResult {
    /// The matched user
    pub user: UserRecord,

    /// Fused score: `max` of the weighted field scores
    pub score: f64,

    /// Raw 0-100 display-name similarity, before weighting
    pub name_score: f64,

    /// Raw 0-100 email similarity, before weighting
    pub email_score: f64,

    /// Raw 0-100 handle similarity, before weighting
    pub handle_score: f64,
}

/// Knobs for [`rank_users`].
#[derive(Debug, Clone)]
pub struct RankOptions {
    /// Maximum number of results returned; 0 yields an empty list
    pub limit: usize,

    /// Minimum fused score a candidate must reach to be kept
    pub min_score: f64,
}

impl Default for RankOptions {
    fn default() -> Self {
        Self { limit: 10, min_score: 60.0 }
    }
}

/// Rank candidates against a free-text query.
///
/// Absent fields contribute 0.0 instead of failing, and an empty result list
/// is a valid outcome. Ties keep the input order (the sort is stable).
pub fn rank_users(users: &[UserRecord], query: &str, options: &RankOptions) -> Vec<MatchResult> {
    if users.is_empty() {
        return Vec::new();
    }

    let q = normalize(Some(query));
    let q_handle = match q.strip_prefix('@') {
        Some(stripped) => stripped.to_string(),
        None => q.clone(),
    };

    // One pass per field across the whole candidate batch. Classification
    // runs on the un-stripped query so an `@` prefix can still be seen.
    let names: Vec<String> = users.iter().map(|u| normalize(u.display_name.as_deref())).collect();
    let emails: Vec<String> = users.iter().map(|u| normalize(u.email.as_deref())).collect();
    let handles: Vec<String> = users
        .iter()
        .map(|u| normalize_handle(u.handle.as_deref()))
        .collect();

    let name_scores = score_name_field(&q, &names);
    let email_scores = score_structured_field(&q, &emails);
    let handle_scores = score_structured_field(&q_handle, &handles);

    let weights = QueryShape::classify(&q).weights();

    let mut results: Vec<MatchResult> = Vec::with_capacity(users.len());
    for (i, user) in users.iter().enumerate() {
        let total = (weights.name * name_scores[i])
            .max(weights.email * email_scores[i])
            .max(weights.handle * handle_scores[i]);

        if total >= options.min_score {
            results.push(MatchResult {
                user: user.clone(),
                score: total,
                name_score: name_scores[i],
                email_score: email_scores[i],
                handle_score: handle_scores[i],
            });
        }
    }

    results.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(std::cmp::Ordering::Equal));
    results.truncate(options.limit);
    results
}

/// Display names: order-insensitive fuzzy similarity, no override ladder.
fn score_name_field(query: &str, names: &[String]) -> Vec<f64> {
    names
        .iter()
        .map(|name| similarity::weighted_ratio(query, name))
        .collect()
}

/// Emails and handles share the override ladder: absent → 0, exact → 100,
/// prefix of at least [`MIN_PREFIX_QUERY_CHARS`] → 95, else quick ratio.
fn score_structured_field(query: &str, fields: &[String]) -> Vec<f64> {
    fields
        .iter()
        .map(|field| {
            if field.is_empty() {
                0.0
            } else if query == field {
                100.0
            } else if field.starts_with(query) && query.chars().count() >= MIN_PREFIX_QUERY_CHARS {
                95.0
            } else {
                similarity::quick_ratio(query, field)
            }
        })
        .collect()
}
