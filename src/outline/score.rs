//! Heading scoring.
//!
//! Each admitted candidate gets a continuous score in [0, 1] from five
//! weighted sub-scores. The sub-scores are pure functions so each channel
//! can be probed on its own; the weights live in one place.

use crate::embed::SemanticIndex;
use crate::model::TextElement;

use super::profile::FontProfile;
use super::text;

/// Channel weights for the composite heading score. Weights sum to 1.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreWeights {
    /// Typography channel (size rank, bold)
    pub font: f32,
    /// Structural-pattern channel
    pub pattern: f32,
    /// Lexical/semantic channel
    pub semantic: f32,
    /// Indentation channel
    pub layout: f32,
    /// Text-length channel
    pub length: f32,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            font: 0.25,
            pattern: 0.25,
            semantic: 0.25,
            layout: 0.15,
            length: 0.10,
        }
    }
}

/// A text element with its composite heading score.
#[derive(Debug, Clone)]
pub struct Candidate {
    /// The underlying line
    pub element: TextElement,
    /// Composite score in [0, 1]
    pub heading_score: f32,
}

/// Score the admitted elements and return them sorted by descending
/// score. The sort is stable, so equal scores keep their scan order.
pub fn score_candidates(
    elements: Vec<TextElement>,
    profile: &FontProfile,
    semantic: Option<&SemanticIndex>,
    weights: &ScoreWeights,
) -> Vec<Candidate> {
    let mut candidates: Vec<Candidate> = elements
        .into_iter()
        .map(|element| {
            let heading_score = composite_score(&element, profile, semantic, weights);
            Candidate {
                element,
                heading_score,
            }
        })
        .collect();

    candidates.sort_by(|a, b| {
        b.heading_score
            .partial_cmp(&a.heading_score)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    candidates
}

/// The weighted sum of the five channels.
pub fn composite_score(
    element: &TextElement,
    profile: &FontProfile,
    semantic: Option<&SemanticIndex>,
    weights: &ScoreWeights,
) -> f32 {
    weights.font * font_score(element.font_size, element.is_bold, profile)
        + weights.pattern * pattern_score(&element.text)
        + weights.semantic * semantic_score(&element.text, semantic)
        + weights.layout * layout_score(element.indent(), profile)
        + weights.length * length_score(&element.text)
}

/// Typography: rank among the distinct sizes when the document has at
/// least three of them, otherwise a size-vs-mean ratio; bold adds a flat
/// bonus. Clamped to 1.
pub fn font_score(font_size: f32, is_bold: bool, profile: &FontProfile) -> f32 {
    let mut score: f32 = 0.0;

    if profile.unique_sizes.len() >= 3 {
        match profile.size_rank(font_size) {
            Some(0) => score += 1.0,
            Some(1) => score += 0.8,
            Some(2) => score += 0.6,
            _ => {}
        }
    } else if profile.mean_size > 0.0 {
        if font_size > profile.mean_size * 1.3 {
            score += 1.0;
        } else if font_size > profile.mean_size * 1.1 {
            score += 0.7;
        }
    }

    if is_bold {
        score += 0.5;
    }

    score.min(1.0)
}

/// Structural pattern: the first matching pattern wins, earlier patterns
/// score higher; all-caps text of reasonable length gets a fallback score.
pub fn pattern_score(text: &str) -> f32 {
    let trimmed = text.trim();

    if let Some(index) = text::structural_pattern_index(trimmed) {
        return 1.0 - index as f32 * 0.1;
    }

    let len = trimmed.chars().count();
    if text::is_upper_case(trimmed) && (5..=50).contains(&len) {
        return 0.7;
    }

    0.0
}

/// Minimum text length before the embedding model is consulted.
const MIN_SEMANTIC_LEN: usize = 6;

/// Lexical/semantic: the better of vocabulary matching and nearest-
/// archetype cosine similarity. Without an embedder this is pure lexical
/// matching.
pub fn semantic_score(text: &str, semantic: Option<&SemanticIndex>) -> f32 {
    let lexical = (text::vocabulary_matches(text) as f32 / 3.0).min(1.0);

    let model = match semantic {
        Some(index) if text.chars().count() >= MIN_SEMANTIC_LEN => {
            index.best_similarity(text).unwrap_or(0.0)
        }
        _ => 0.0,
    };

    lexical.max(model)
}

/// Layout: headings sit near the left margin.
pub fn layout_score(indent: f32, profile: &FontProfile) -> f32 {
    if indent <= profile.min_indent + 5.0 {
        1.0
    } else if indent <= profile.mean_indent {
        0.7
    } else {
        0.3
    }
}

/// Length: headings are short but not trivially short.
pub fn length_score(text: &str) -> f32 {
    let len = text.chars().count();
    if (5..=80).contains(&len) {
        1.0
    } else if (3..=120).contains(&len) {
        0.7
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::BBox;

    fn elem(text: &str, size: f32, bold: bool, indent: f32) -> TextElement {
        TextElement::new(text, 1, size, bold, BBox::new(indent, 0.0, indent + 200.0, 12.0))
    }

    fn three_size_profile() -> FontProfile {
        let elements = vec![
            elem("body body body", 10.0, false, 72.0),
            elem("body body body", 10.0, false, 72.0),
            elem("mid heading", 16.0, false, 72.0),
            elem("big heading", 24.0, false, 72.0),
        ];
        FontProfile::from_elements(&elements)
    }

    #[test]
    fn test_font_score_rank_path() {
        let profile = three_size_profile();
        assert!((font_score(24.0, false, &profile) - 1.0).abs() < 1e-6);
        assert!((font_score(16.0, false, &profile) - 0.8).abs() < 1e-6);
        assert!((font_score(10.0, false, &profile) - 0.6).abs() < 1e-6);
    }

    #[test]
    fn test_font_score_bold_bonus_clamped() {
        let profile = three_size_profile();
        assert!((font_score(24.0, true, &profile) - 1.0).abs() < 1e-6);
        assert!((font_score(16.0, true, &profile) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_font_score_ratio_path() {
        // Two distinct sizes: mean-ratio branch
        let elements = vec![
            elem("a", 10.0, false, 72.0),
            elem("b", 10.0, false, 72.0),
            elem("c", 10.0, false, 72.0),
            elem("d", 20.0, false, 72.0),
        ];
        let profile = FontProfile::from_elements(&elements);
        // mean = 12.5; 20 > 1.3 * 12.5
        assert!((font_score(20.0, false, &profile) - 1.0).abs() < 1e-6);
        // 14 is between 1.1x and 1.3x
        assert!((font_score(14.0, false, &profile) - 0.7).abs() < 1e-6);
        assert_eq!(font_score(10.0, false, &profile), 0.0);
    }

    #[test]
    fn test_pattern_score_first_match_wins() {
        assert!((pattern_score("Chapter 1") - 1.0).abs() < 1e-6);
        assert!((pattern_score("3.2 Evaluation") - 0.9).abs() < 1e-6);
        assert!((pattern_score("Introduction") - 0.4).abs() < 1e-6);
    }

    #[test]
    fn test_pattern_score_upper_case_fallback() {
        // No hyphen/space-only uppercase run of 5+, so not pattern 4;
        // falls back to the all-caps rule
        assert!((pattern_score("FAQ AND ERRATA 2") - 0.7).abs() < 1e-6);
        assert_eq!(pattern_score("FAQ"), 0.0); // too short for the fallback
        assert_eq!(pattern_score("ordinary text"), 0.0);
    }

    #[test]
    fn test_semantic_score_lexical_only() {
        assert!((semantic_score("Introduction", None) - (1.0f32 / 3.0)).abs() < 1e-6);
        assert!((semantic_score("Methods and Results Analysis", None) - 1.0).abs() < 1e-6);
        assert_eq!(semantic_score("zebra crossing", None), 0.0);
    }

    #[test]
    fn test_layout_score_tiers() {
        let profile = three_size_profile(); // min = mean = 72
        assert!((layout_score(72.0, &profile) - 1.0).abs() < 1e-6);
        assert!((layout_score(76.9, &profile) - 1.0).abs() < 1e-6);
        assert!((layout_score(200.0, &profile) - 0.3).abs() < 1e-6);
    }

    #[test]
    fn test_layout_score_mean_tier() {
        let elements = vec![elem("a", 10.0, false, 40.0), elem("b", 10.0, false, 120.0)];
        let profile = FontProfile::from_elements(&elements); // min 40, mean 80
        assert!((layout_score(70.0, &profile) - 0.7).abs() < 1e-6);
    }

    #[test]
    fn test_length_score_bands() {
        assert_eq!(length_score("abcd"), 0.7); // 4 chars: outer band
        assert_eq!(length_score("hello"), 1.0);
        assert_eq!(length_score(&"x".repeat(80)), 1.0);
        assert_eq!(length_score(&"x".repeat(100)), 0.7);
        assert_eq!(length_score(&"x".repeat(130)), 0.0);
        assert_eq!(length_score("ab"), 0.0);
    }

    #[test]
    fn test_weights_sum_to_one() {
        let w = ScoreWeights::default();
        assert!((w.font + w.pattern + w.semantic + w.layout + w.length - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_composite_in_unit_interval_and_sorted() {
        let profile = three_size_profile();
        let elements = vec![
            elem("some quieter body text", 10.0, false, 90.0),
            elem("Introduction", 24.0, true, 72.0),
        ];
        let scored = score_candidates(elements, &profile, None, &ScoreWeights::default());
        assert_eq!(scored.len(), 2);
        assert!(scored[0].heading_score >= scored[1].heading_score);
        assert_eq!(scored[0].element.text, "Introduction");
        for c in &scored {
            assert!((0.0..=1.0).contains(&c.heading_score));
        }
    }

    #[test]
    fn test_stable_tie_order() {
        let profile = three_size_profile();
        let elements = vec![
            elem("Methodology Alpha", 24.0, false, 72.0),
            elem("Methodology Betaa", 24.0, false, 72.0),
        ];
        let scored = score_candidates(elements, &profile, None, &ScoreWeights::default());
        assert_eq!(scored[0].element.text, "Methodology Alpha");
    }
}
