//! Document title extraction.
//!
//! Three-tier fallback: metadata title, then the most prominent line near
//! the top of the first page, then the filename. Each tier short-circuits
//! on the first valid result; an empty title is a valid outcome.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::parser::DocumentSource;

use super::text;

/// Metadata/filename titles that are placeholders, not titles.
static BAD_TITLE_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [r"^\d+$", r"^untitled", r"^document", r"^microsoft\s+word"]
        .iter()
        .map(|p| Regex::new(p).expect("title pattern"))
        .collect()
});

/// First-page lines that cannot be titles.
static AVOID_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"^\d+$",
        r"^page\s+\d+",
        r"^fig",
        r"^table",
        r"^table\s+of\s+contents",
        r"^contents$",
    ]
    .iter()
    .map(|p| Regex::new(p).expect("avoid pattern"))
    .collect()
});

/// Lines examined on the first page before giving up on tier 2.
const FIRST_PAGE_LINE_LIMIT: usize = 30;
/// Minimum font size for a first-page title candidate.
const MIN_TITLE_FONT_SIZE: f32 = 10.0;
/// Maximum distance from the page top for a title candidate.
const MAX_TITLE_Y: f32 = 400.0;

/// Extract the document title. `file_stem` is the input filename without
/// extension, used as the last resort.
pub fn extract_title(source: &dyn DocumentSource, file_stem: Option<&str>) -> String {
    if let Some(title) = from_metadata(source) {
        return title;
    }

    if let Some(title) = from_first_page(source) {
        log::info!("title from first page: {title}");
        return title;
    }

    if let Some(stem) = file_stem {
        if let Some(title) = from_filename(stem) {
            log::info!("title from filename: {title}");
            return title;
        }
    }

    String::new()
}

fn from_metadata(source: &dyn DocumentSource) -> Option<String> {
    let raw = source.metadata_title()?;
    let title = text::normalize(&raw);
    is_valid_title(&title).then_some(title)
}

fn from_first_page(source: &dyn DocumentSource) -> Option<String> {
    if source.page_count() == 0 {
        return None;
    }

    let elements = match source.text_elements(1) {
        Ok(elements) => elements,
        Err(e) => {
            log::warn!("could not read first page for title extraction: {e}");
            return None;
        }
    };

    elements
        .iter()
        .take(FIRST_PAGE_LINE_LIMIT)
        .filter(|e| is_title_candidate(&e.text, e.font_size, e.y()))
        .max_by(|a, b| {
            a.font_size
                .partial_cmp(&b.font_size)
                .unwrap_or(std::cmp::Ordering::Equal)
                // larger font wins; at equal size the higher line wins
                .then_with(|| {
                    b.y()
                        .partial_cmp(&a.y())
                        .unwrap_or(std::cmp::Ordering::Equal)
                })
        })
        .map(|e| text::normalize(&e.text))
}

fn is_title_candidate(line: &str, font_size: f32, y: f32) -> bool {
    let len = line.chars().count();
    if !(5..=200).contains(&len) {
        return false;
    }

    if font_size < MIN_TITLE_FONT_SIZE || y > MAX_TITLE_Y {
        return false;
    }

    if !line.chars().any(|c| c.is_alphabetic()) {
        return false;
    }

    let lower = line.to_lowercase();
    !AVOID_PATTERNS.iter().any(|p| p.is_match(&lower))
}

fn from_filename(stem: &str) -> Option<String> {
    let spaced = stem.replace(['_', '-'], " ");
    let title = text::normalize(&spaced);
    is_valid_title(&title).then_some(title)
}

fn is_valid_title(title: &str) -> bool {
    let len = title.chars().count();
    if !(3..=200).contains(&len) {
        return false;
    }

    if !title.chars().any(|c| c.is_alphabetic()) {
        return false;
    }

    let lower = title.to_lowercase();
    !BAD_TITLE_PATTERNS.iter().any(|p| p.is_match(&lower))
}
