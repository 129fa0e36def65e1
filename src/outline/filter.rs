//! Cheap candidate admission gate.
//!
//! A coarse multi-channel filter that runs on every line of the scan
//! scope. Its only job is to keep the expensive scorer off body text and
//! page furniture; final ranking happens in the scorer.

use crate::model::TextElement;

use super::profile::FontProfile;
use super::text;

/// Minimum heading text length in characters.
const MIN_LEN: usize = 3;
/// Maximum heading text length in characters.
const MAX_LEN: usize = 150;
/// Gate admission threshold on the summed channel points.
const ADMIT_POINTS: u32 = 3;

/// Whether an element is worth scoring as a heading candidate.
pub fn is_candidate(element: &TextElement, profile: &FontProfile) -> bool {
    let len = element.len();
    if len < MIN_LEN || len > MAX_LEN {
        return false;
    }

    if text::is_obvious_false_positive(&element.text) {
        return false;
    }

    gate_points(element, profile) >= ADMIT_POINTS
}

/// Integer evidence points across the four gate channels.
fn gate_points(element: &TextElement, profile: &FontProfile) -> u32 {
    typography_points(element, profile)
        + pattern_points(&element.text)
        + lexical_points(&element.text)
        + layout_points(element, profile)
}

fn typography_points(element: &TextElement, profile: &FontProfile) -> u32 {
    let mut points = 0;
    if element.font_size >= profile.p75 || element.font_size > profile.mean_size * 1.2 {
        points += 2;
    }
    if profile.is_top_size(element.font_size, 3) {
        points += 1;
    }
    if element.is_bold {
        points += 2;
    }
    points
}

fn pattern_points(text: &str) -> u32 {
    if text::structural_pattern_index(text).is_some() {
        3
    } else {
        0
    }
}

fn lexical_points(text: &str) -> u32 {
    if text::vocabulary_matches(text) > 0 {
        2
    } else {
        0
    }
}

fn layout_points(element: &TextElement, profile: &FontProfile) -> u32 {
    if element.indent() <= profile.mean_indent {
        1
    } else {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::BBox;

    fn elem(text: &str, size: f32, bold: bool, indent: f32) -> TextElement {
        TextElement::new(text, 1, size, bold, BBox::new(indent, 0.0, indent + 200.0, 12.0))
    }

    fn body_profile() -> FontProfile {
        // Mostly 10 pt body at indent 72, with enough distinct larger
        // sizes that body text is not among the top three
        let mut elements: Vec<TextElement> = (0..20)
            .map(|i| elem(&format!("body line {i} with plain words"), 10.0, false, 72.0))
            .collect();
        elements.push(elem("Big Heading", 18.0, true, 72.0));
        elements.push(elem("Another One", 14.0, false, 72.0));
        elements.push(elem("Quiet Caption", 12.0, false, 72.0));
        FontProfile::from_elements(&elements)
    }

    #[test]
    fn test_rejects_by_length() {
        let profile = body_profile();
        assert!(!is_candidate(&elem("ab", 18.0, true, 72.0), &profile));
        let long = "x".repeat(151);
        assert!(!is_candidate(&elem(&long, 18.0, true, 72.0), &profile));
    }

    #[test]
    fn test_rejects_false_positives_despite_typography() {
        let profile = body_profile();
        assert!(!is_candidate(&elem("Page 12", 18.0, true, 72.0), &profile));
        assert!(!is_candidate(&elem("Figure 2", 18.0, true, 72.0), &profile));
    }

    #[test]
    fn test_admits_large_bold_line() {
        let profile = body_profile();
        // +2 size, +1 top-3, +2 bold, +1 indent
        assert!(is_candidate(&elem("Overview of Nothing", 18.0, true, 72.0), &profile));
    }

    #[test]
    fn test_admits_patterned_body_size_line() {
        let profile = body_profile();
        // Pattern alone (+3) meets the gate even at body size, plus indent
        assert!(is_candidate(&elem("2.1 Zebra Crossing", 10.0, false, 72.0), &profile));
    }

    #[test]
    fn test_rejects_plain_body_text() {
        let profile = body_profile();
        // Body size, not bold, no pattern, no vocabulary. 10 pt meets the
        // p75 of this distribution (+2), so an indented line stays under
        // the gate only because it misses the layout point.
        assert!(!is_candidate(
            &elem("just an ordinary sentence here", 10.0, false, 120.0),
            &profile
        ));
    }

    #[test]
    fn test_vocabulary_contributes() {
        let profile = body_profile();
        // vocabulary (+2) + indent (+1) admits even at body size
        assert!(is_candidate(&elem("Results at a glance", 10.0, false, 72.0), &profile));
    }

    #[test]
    fn test_empty_profile_admits_nothing_plain() {
        let profile = FontProfile::from_elements(&[]);
        // With an empty profile only pattern/vocabulary channels can fire
        assert!(!is_candidate(&elem("ordinary words only", 12.0, false, 72.0), &profile));
    }
}
