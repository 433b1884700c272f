use serde::{Deserialize, Serialize};

use crate::ranking::MatchResult;

/// How the best match in a response was reached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchResultType {
    /// A field matched the query exactly (raw field score 100)
    Exact,
    /// A field started with the query (prefix override, raw field score 95)
    Prefix,
    /// Best match came from fuzzy similarity alone
    Fuzzy,
    /// Nothing cleared the minimum score
    Empty,
}

impl SearchResultType {
    /// Classify a ranked (best-first) match list.
    pub fn for_matches(matches: &[MatchResult]) -> Self {
        match matches.first() {
            None => SearchResultType::Empty,
            Some(best) => {
                let top_field = best.name_score.max(best.email_score).max(best.handle_score);
                if top_field >= 100.0 {
                    SearchResultType::Exact
                } else if top_field >= 95.0 {
                    SearchResultType::Prefix
                } else {
                    SearchResultType::Fuzzy
                }
            }
        }
    }
}

/// Ranked search result with metadata about how it was produced.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResponse {
    /// Ranked matches, best first; empty is a valid outcome
    pub matches: Vec<MatchResult>,

    /// How the best match was reached
    pub result_type: SearchResultType,

    /// Candidates the directory prefilter produced for ranking
    pub candidates_considered: usize,

    /// End-to-end search latency in milliseconds
    pub latency_ms: f64,

    /// Directory the candidates came from
    pub directory: String,
}

impl SearchResponse {
    /// Best match, if any cleared the threshold.
    pub fn best(&self) -> Option<&MatchResult> {
        self.matches.first()
    }

    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }

    /// Display string for logging
    pub fn display(&self) -> String {
        match self.best() {
            Some(best) => format!(
                "{} - {:.1}% ({} candidates, {:.2}ms) [{}] {:?}",
                best.user.display_label(),
                best.score,
                self.candidates_considered,
                self.latency_ms,
                self.directory,
                self.result_type,
            ),
            None => format!(
                "no match ({} candidates, {:.2}ms) [{}]",
                self.candidates_considered, self.latency_ms, self.directory,
            ),
        }
    }
}
