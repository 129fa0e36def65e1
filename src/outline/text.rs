//! Text normalization and the shared pattern/vocabulary tables.
//!
//! The tables are process-wide immutable statics: the structural heading
//! patterns are ordered (earlier patterns are stronger evidence and score
//! higher), the false-positive patterns reject furniture like page numbers
//! and figure captions, and the vocabulary is the fixed set of academic
//! and structural section terms.

use once_cell::sync::Lazy;
use regex::Regex;
use unicode_normalization::UnicodeNormalization;

/// Structural heading patterns, strongest first.
pub static STRUCTURAL_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"(?i)^(Chapter|Section|Appendix|Part)\s+\d+",
        r"^\d+(\.\d+)*\s+[A-Z]",
        r"(?i)^[IVXLCDM]+\.?\s+[A-Z]",
        r"^[A-Z][A-Z\s\-]{4,}$",
        r"^\d+(\.\d+){0,2}$",
        r"(?i)^[A-Z]\.\s+[A-Z]",
        r"(?i)^(Abstract|Introduction|Conclusion|References|Bibliography)$",
    ]
    .iter()
    .map(|p| Regex::new(p).expect("structural pattern"))
    .collect()
});

/// Patterns for text that is never a heading: page furniture, captions,
/// URLs, bare numbers, punctuation runs, dates.
pub static FALSE_POSITIVE_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"(?i)^page\s*\d*$",
        r"(?i)^fig(ure)?\s*\d*",
        r"(?i)^table\s*\d*",
        r"(?i)^(www\.|http|https)",
        r"^\d+$",
        r"^[^\w\s]*$",
        r"(?i)^(jan|feb|mar|apr|may|jun|jul|aug|sep|oct|nov|dec)",
    ]
    .iter()
    .map(|p| Regex::new(p).expect("false positive pattern"))
    .collect()
});

/// Section vocabulary used by the lexical signal.
pub static HEADING_VOCABULARY: &[&str] = &[
    "abstract",
    "introduction",
    "background",
    "literature",
    "review",
    "summary",
    "conclusion",
    "discussion",
    "results",
    "findings",
    "analysis",
    "evaluation",
    "method",
    "methods",
    "methodology",
    "approach",
    "techniques",
    "implementation",
    "experiments",
    "experimental",
    "study",
    "research",
    "investigation",
    "chapter",
    "section",
    "subsection",
    "appendix",
    "part",
    "overview",
    "references",
    "bibliography",
    "acknowledgments",
    "preface",
    "contents",
    "objectives",
    "goals",
    "hypothesis",
    "theory",
    "framework",
    "model",
    "design",
    "architecture",
    "system",
    "algorithm",
    "procedure",
    "process",
];

static WHITESPACE_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("whitespace regex"));
static STRIP_CHARS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"[^\w\s\-\.\,\:\;\!\?\(\)\[\]\'\"]+"#).expect("strip regex"));

/// Normalize extracted text: Unicode NFC, whitespace collapsed to single
/// spaces, non-semantic punctuation removed. Non-ASCII letters survive.
pub fn normalize(text: &str) -> String {
    if text.is_empty() {
        return String::new();
    }

    let composed: String = text.nfc().collect();
    let collapsed = WHITESPACE_RUN.replace_all(composed.trim(), " ");
    STRIP_CHARS.replace_all(&collapsed, "").trim().to_string()
}

/// Whether text matches an obvious-false-positive pattern (or is too short
/// to be anything).
pub fn is_obvious_false_positive(text: &str) -> bool {
    let cleaned = text.trim().to_lowercase();
    if cleaned.chars().count() < 3 {
        return true;
    }
    FALSE_POSITIVE_PATTERNS.iter().any(|p| p.is_match(&cleaned))
}

/// Index of the first structural pattern matching the trimmed text.
pub fn structural_pattern_index(text: &str) -> Option<usize> {
    let trimmed = text.trim();
    STRUCTURAL_PATTERNS.iter().position(|p| p.is_match(trimmed))
}

/// Number of vocabulary terms contained in the text (substring match on
/// the lowercased text).
pub fn vocabulary_matches(text: &str) -> usize {
    let lower = text.to_lowercase();
    HEADING_VOCABULARY
        .iter()
        .filter(|term| lower.contains(*term))
        .count()
}

/// Whether the text is fully upper-case: at least one cased character and
/// no lower-case ones.
pub fn is_upper_case(text: &str) -> bool {
    let mut has_cased = false;
    for c in text.chars() {
        if c.is_lowercase() {
            return false;
        }
        if c.is_uppercase() {
            has_cased = true;
        }
    }
    has_cased
}
