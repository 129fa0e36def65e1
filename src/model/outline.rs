//! Final outline artifact types.

use serde::{Deserialize, Serialize};

/// Heading hierarchy level. Depth is capped at three tiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HeadingLevel {
    /// Top-level heading (largest heading font)
    H1,
    /// Second-level heading
    H2,
    /// Third-level heading
    H3,
}

impl HeadingLevel {
    /// Level from a 0-based rank among the distinct heading sizes
    /// (0 = largest). Ranks past the third tier have no level.
    pub fn from_rank(rank: usize) -> Option<Self> {
        match rank {
            0 => Some(HeadingLevel::H1),
            1 => Some(HeadingLevel::H2),
            2 => Some(HeadingLevel::H3),
            _ => None,
        }
    }

    /// String form used in the JSON artifact.
    pub fn as_str(&self) -> &'static str {
        match self {
            HeadingLevel::H1 => "H1",
            HeadingLevel::H2 => "H2",
            HeadingLevel::H3 => "H3",
        }
    }
}

impl std::fmt::Display for HeadingLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single entry of the extracted outline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Heading {
    /// Hierarchy level
    pub level: HeadingLevel,
    /// Normalized heading text (non-empty)
    pub text: String,
    /// Page the heading appears on (1-indexed)
    pub page: u32,
}

impl Heading {
    /// Create a new heading.
    pub fn new(level: HeadingLevel, text: impl Into<String>, page: u32) -> Self {
        Self {
            level,
            text: text.into(),
            page,
        }
    }
}

/// The extracted outline: document title plus ordered headings.
///
/// This is the sole externally visible artifact of the pipeline. An empty
/// title and an empty outline are both valid terminal outcomes.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct OutlineResult {
    /// Document title, possibly empty
    pub title: String,
    /// Headings in reading order (page, then vertical position)
    pub outline: Vec<Heading>,
}

impl OutlineResult {
    /// The empty result, returned for unreadable documents and exhausted
    /// time budgets.
    pub fn empty() -> Self {
        Self::default()
    }

    /// A result with a title but no headings.
    pub fn title_only(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            outline: Vec::new(),
        }
    }

    /// Structural contract check applied before the result is persisted:
    /// every heading must carry a valid level, a page >= 1, and non-empty
    /// trimmed text.
    pub fn is_structurally_valid(&self) -> bool {
        self.outline
            .iter()
            .all(|h| h.page >= 1 && !h.text.trim().is_empty())
    }

    /// Replace self with the empty result if the structural contract does
    /// not hold.
    pub fn sanitized(self) -> Self {
        if self.is_structurally_valid() {
            self
        } else {
            log::warn!("outline failed structural validation, substituting empty result");
            Self::empty()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_from_rank() {
        assert_eq!(HeadingLevel::from_rank(0), Some(HeadingLevel::H1));
        assert_eq!(HeadingLevel::from_rank(1), Some(HeadingLevel::H2));
        assert_eq!(HeadingLevel::from_rank(2), Some(HeadingLevel::H3));
        assert_eq!(HeadingLevel::from_rank(3), None);
    }

    #[test]
    fn test_level_serializes_as_plain_string() {
        let json = serde_json::to_string(&HeadingLevel::H2).unwrap();
        assert_eq!(json, "\"H2\"");
    }

    #[test]
    fn test_result_json_shape() {
        let result = OutlineResult {
            title: "A Study".to_string(),
            outline: vec![Heading::new(HeadingLevel::H1, "Introduction", 1)],
        };
        let json = serde_json::to_string(&result).unwrap();
        assert!(json.contains("\"title\":\"A Study\""));
        assert!(json.contains("\"level\":\"H1\""));
        assert!(json.contains("\"page\":1"));
    }

    #[test]
    fn test_structural_validation() {
        let good = OutlineResult {
            title: String::new(),
            outline: vec![Heading::new(HeadingLevel::H1, "Results", 3)],
        };
        assert!(good.is_structurally_valid());

        let blank_text = OutlineResult {
            title: "t".to_string(),
            outline: vec![Heading::new(HeadingLevel::H2, "   ", 1)],
        };
        assert!(!blank_text.is_structurally_valid());
        assert_eq!(blank_text.sanitized(), OutlineResult::empty());

        let zero_page = OutlineResult {
            title: String::new(),
            outline: vec![Heading::new(HeadingLevel::H3, "Notes", 0)],
        };
        assert!(!zero_page.is_structurally_valid());
    }

    #[test]
    fn test_empty_result_is_valid() {
        assert!(OutlineResult::empty().is_structurally_valid());
    }
}
