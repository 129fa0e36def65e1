//! Validation, thresholding and deduplication of scored candidates.

use std::collections::HashSet;

use super::score::Candidate;
use super::text;

/// Absolute score floor: below this nothing counts as a heading, no
/// matter how weak the rest of the document is.
const SCORE_FLOOR: f32 = 0.4;
/// Relative cutoff against the best candidate in scope.
const TOP_RATIO: f32 = 0.6;
/// Hard cap on the number of headings kept per document.
const MAX_HEADINGS: usize = 50;

/// Apply the adaptive threshold, cap the result set, order by reading
/// position and drop duplicates.
///
/// Input must be sorted by descending score (as `score_candidates`
/// returns it). Output is in reading order with normalized, unique text.
pub fn validate_and_dedup(scored: Vec<Candidate>) -> Vec<Candidate> {
    let Some(top) = scored.first() else {
        return Vec::new();
    };

    let threshold = SCORE_FLOOR.max(top.heading_score * TOP_RATIO);

    let mut kept: Vec<Candidate> = scored
        .into_iter()
        .filter(|c| c.heading_score >= threshold)
        .take(MAX_HEADINGS)
        .collect();

    kept.sort_by(|a, b| {
        a.element
            .page
            .cmp(&b.element.page)
            .then_with(|| {
                a.element
                    .y()
                    .partial_cmp(&b.element.y())
                    .unwrap_or(std::cmp::Ordering::Equal)
            })
    });

    let mut seen: HashSet<String> = HashSet::new();
    let mut result = Vec::with_capacity(kept.len());

    for mut candidate in kept {
        let normalized = text::normalize(&candidate.element.text);

        // Re-check after normalization: cleanup can reduce a line to
        // something the raw-text gate would have rejected.
        if text::is_obvious_false_positive(&normalized) {
            continue;
        }

        let key = normalized.to_lowercase();
        if !seen.insert(key) {
            continue;
        }

        candidate.element.text = normalized;
        result.push(candidate);
    }

    result
}
