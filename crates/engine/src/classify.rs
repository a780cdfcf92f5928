//! Pure two-stage term matching over placement URLs.
//!
//! Stage 1 scans the ignore list; any hit keeps the placement regardless of
//! the exclude terms. Stage 2 scans the exclude terms in list order under
//! the configured match mode. Both sides are lowercased first.

use placement_core::types::MatchMode;
use placement_core::AppConfig;
use tracing::debug;

/// Outcome of classifying one URL, carrying the term that decided it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    /// An ignore term matched; the placement is kept.
    Ignored { term: String },
    /// An exclude term matched and no ignore term did.
    Excluded { term: String },
    /// Neither list matched; the placement is kept.
    NoMatch,
}

/// Classify a placement URL against the configured term lists.
///
/// Deterministic in `(url, config)`. The first matching term in each list
/// wins, so term order only affects which term gets reported.
pub fn classify(url: &str, config: &AppConfig) -> Decision {
    let normalized = url.to_lowercase();

    for term in &config.ignore_terms {
        let term = term.to_lowercase();
        if normalized.contains(&term) {
            if config.log {
                debug!(url = %url, term = %term, "Ignore term matched, keeping placement");
            }
            return Decision::Ignored { term };
        }
    }

    for term in &config.exclude_terms {
        let term = term.to_lowercase();
        let hit = match config.match_mode {
            MatchMode::EndsWith => normalized.ends_with(&term),
            MatchMode::Contains => normalized.contains(&term),
        };
        if hit {
            if config.log {
                debug!(url = %url, term = %term, "Exclude term matched");
            }
            return Decision::Excluded { term };
        }
    }

    Decision::NoMatch
}

/// True iff the URL should be excluded.
pub fn should_exclude(url: &str, config: &AppConfig) -> bool {
    matches!(classify(url, config), Decision::Excluded { .. })
}
