//! Hierarchy level assignment.
//!
//! The three largest distinct heading font sizes map to H1/H2/H3;
//! anything smaller is treated as body-adjacent noise and dropped. Sizes
//! closer than half a point are merged into one tier first, so a document
//! emitting 11.999999 and 12.0 yields a single level.

use crate::model::{Heading, HeadingLevel};

use super::score::Candidate;

/// Sizes within this distance belong to the same tier.
const CLUSTER_TOLERANCE: f32 = 0.5;
/// Maximum hierarchy depth.
const MAX_LEVELS: usize = 3;

/// Assign levels to validated candidates (in reading order) and emit the
/// final outline, preserving that order.
pub fn assign_levels(candidates: &[Candidate]) -> Vec<Heading> {
    if candidates.is_empty() {
        return Vec::new();
    }

    let tiers = size_tiers(candidates);

    candidates
        .iter()
        .filter_map(|candidate| {
            let text = candidate.element.text.trim();
            if text.is_empty() {
                return None;
            }

            let rank = tier_rank(&tiers, candidate.element.font_size)?;
            let level = HeadingLevel::from_rank(rank)?;
            Some(Heading::new(level, text, candidate.element.page))
        })
        .collect()
}

/// Representative sizes (cluster maxima) of the heading size tiers,
/// largest first, capped at the maximum depth.
fn size_tiers(candidates: &[Candidate]) -> Vec<f32> {
    let mut sizes: Vec<f32> = candidates
        .iter()
        .map(|c| c.element.font_size)
        .filter(|s| *s > 0.0)
        .collect();
    sizes.sort_by(|a, b| b.partial_cmp(a).unwrap_or(std::cmp::Ordering::Equal));

    let mut tiers: Vec<f32> = Vec::new();
    for size in sizes {
        match tiers.last() {
            Some(&rep) if rep - size <= CLUSTER_TOLERANCE => {}
            _ => tiers.push(size),
        }
        if tiers.len() > MAX_LEVELS {
            break;
        }
    }

    tiers.truncate(MAX_LEVELS);
    tiers
}

/// Tier index for a font size, if it falls in one of the kept tiers.
fn tier_rank(tiers: &[f32], font_size: f32) -> Option<usize> {
    tiers
        .iter()
        .position(|&rep| font_size >= rep - CLUSTER_TOLERANCE && font_size <= rep + CLUSTER_TOLERANCE)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{BBox, TextElement};

    fn candidate(text: &str, page: u32, y: f32, size: f32) -> Candidate {
        Candidate {
            element: TextElement::new(text, page, size, true, BBox::new(72.0, y, 300.0, y + size)),
            heading_score: 0.8,
        }
    }

    #[test]
    fn test_empty() {
        assert!(assign_levels(&[]).is_empty());
    }

    #[test]
    fn test_three_tier_mapping() {
        let candidates = vec![
            candidate("Title Sized", 1, 10.0, 24.0),
            candidate("Section Sized", 1, 40.0, 18.0),
            candidate("Subsection Sized", 1, 70.0, 14.0),
        ];
        let headings = assign_levels(&candidates);
        assert_eq!(headings.len(), 3);
        assert_eq!(headings[0].level, HeadingLevel::H1);
        assert_eq!(headings[1].level, HeadingLevel::H2);
        assert_eq!(headings[2].level, HeadingLevel::H3);
    }

    #[test]
    fn test_fourth_size_dropped() {
        let candidates = vec![
            candidate("One", 1, 10.0, 24.0),
            candidate("Two", 1, 20.0, 18.0),
            candidate("Three", 1, 30.0, 14.0),
            candidate("Four", 1, 40.0, 11.0),
        ];
        let headings = assign_levels(&candidates);
        assert_eq!(headings.len(), 3);
        assert!(headings.iter().all(|h| h.text != "Four"));
    }

    #[test]
    fn test_near_equal_sizes_merge_into_one_tier() {
        let candidates = vec![
            candidate("Exact", 1, 10.0, 12.0),
            candidate("Slightly Off", 1, 30.0, 11.9999),
        ];
        let headings = assign_levels(&candidates);
        assert_eq!(headings.len(), 2);
        assert!(headings.iter().all(|h| h.level == HeadingLevel::H1));
    }

    #[test]
    fn test_reading_order_preserved() {
        let candidates = vec![
            candidate("Small First", 1, 10.0, 14.0),
            candidate("Large Second", 2, 10.0, 24.0),
        ];
        let headings = assign_levels(&candidates);
        assert_eq!(headings[0].text, "Small First");
        assert_eq!(headings[0].level, HeadingLevel::H2);
        assert_eq!(headings[1].text, "Large Second");
        assert_eq!(headings[1].level, HeadingLevel::H1);
    }

    #[test]
    fn test_single_size_is_h1() {
        let candidates = vec![
            candidate("Alpha Section", 1, 10.0, 16.0),
            candidate("Beta Section", 3, 10.0, 16.0),
        ];
        let headings = assign_levels(&candidates);
        assert_eq!(headings.len(), 2);
        assert!(headings.iter().all(|h| h.level == HeadingLevel::H1));
    }
}
