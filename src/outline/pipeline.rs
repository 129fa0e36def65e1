//! Per-document orchestration.
//!
//! The entry points here never return an error: every failure mode
//! (unopenable file, zero pages, per-page parse errors, exhausted budget,
//! invalid assembled output) is converted into a valid, possibly empty
//! `OutlineResult`.

use std::path::Path;
use std::time::Duration;

use crate::embed::SemanticIndex;
use crate::model::{Heading, OutlineResult, TextElement};
use crate::parser::{DocumentSource, PdfSource};

use super::filter::is_candidate;
use super::levels::assign_levels;
use super::profile::FontProfile;
use super::scan::{
    plan_scan, ScanBudget, ABORT_FRACTION, HEADINGS_SKIP_FRACTION, MAX_FULL_SCAN_PAGES,
};
use super::score::{score_candidates, ScoreWeights};
use super::title::extract_title;
use super::validate::validate_and_dedup;

/// Tuning knobs for one extraction pass.
#[derive(Debug, Clone)]
pub struct ExtractOptions {
    /// Wall-clock budget per document
    pub time_limit: Duration,
    /// Page-count ceiling for full scans
    pub max_full_scan_pages: u32,
    /// Scoring channel weights
    pub weights: ScoreWeights,
}

impl ExtractOptions {
    /// Options with the default ten-second budget.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the per-document time budget.
    pub fn with_time_limit(mut self, limit: Duration) -> Self {
        self.time_limit = limit;
        self
    }

    /// Set the full-scan page ceiling.
    pub fn with_max_full_scan_pages(mut self, pages: u32) -> Self {
        self.max_full_scan_pages = pages;
        self
    }

    /// Set the scoring weights.
    pub fn with_weights(mut self, weights: ScoreWeights) -> Self {
        self.weights = weights;
        self
    }
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            time_limit: Duration::from_secs(10),
            max_full_scan_pages: MAX_FULL_SCAN_PAGES,
            weights: ScoreWeights::default(),
        }
    }
}

/// Extract an outline from a PDF file. Document-level failures yield the
/// empty result.
pub fn extract_outline_from_path(
    path: &Path,
    budget: &ScanBudget,
    options: &ExtractOptions,
    semantic: Option<&SemanticIndex>,
) -> OutlineResult {
    let source = match PdfSource::open(path) {
        Ok(source) => source,
        Err(e) => {
            log::error!("could not open {}: {e}", path.display());
            return OutlineResult::empty();
        }
    };

    let stem = path.file_stem().and_then(|s| s.to_str());
    extract_outline_from_source(&source, stem, budget, options, semantic)
}

/// Extract an outline from any document source. This is the pipeline
/// proper: zero-page check, budget checkpoints, title, adaptive scan,
/// heading detection, level assignment, output validation.
pub fn extract_outline_from_source(
    source: &dyn DocumentSource,
    file_stem: Option<&str>,
    budget: &ScanBudget,
    options: &ExtractOptions,
    semantic: Option<&SemanticIndex>,
) -> OutlineResult {
    let page_count = source.page_count();
    if page_count == 0 {
        log::warn!("document has no pages");
        return OutlineResult::empty();
    }

    if budget.past_fraction(ABORT_FRACTION) {
        log::warn!("time limit reached before processing");
        return OutlineResult::empty();
    }

    let title = extract_title(source, file_stem);

    if budget.past_fraction(HEADINGS_SKIP_FRACTION) {
        log::warn!("time limit reached after title extraction");
        return OutlineResult::title_only(title);
    }

    let mode = plan_scan(page_count, budget.remaining(), options.max_full_scan_pages);
    let elements = collect_elements(source, mode.pages(page_count));
    let outline = detect_headings(elements, semantic, &options.weights);

    OutlineResult { title, outline }.sanitized()
}

/// Gather the text elements of the selected pages, skipping pages that
/// fail to parse.
fn collect_elements(source: &dyn DocumentSource, pages: Vec<u32>) -> Vec<TextElement> {
    let mut elements = Vec::new();

    for page in pages {
        match source.text_elements(page) {
            Ok(page_elements) => elements.extend(page_elements),
            Err(e) => {
                log::warn!("skipping page {page}: {e}");
            }
        }
    }

    elements
}

/// Run the heading pipeline over a scan scope: profile, admission gate,
/// scoring, validation/dedup, level assignment.
pub fn detect_headings(
    elements: Vec<TextElement>,
    semantic: Option<&SemanticIndex>,
    weights: &ScoreWeights,
) -> Vec<Heading> {
    if elements.is_empty() {
        return Vec::new();
    }

    let profile = FontProfile::from_elements(&elements);

    let admitted: Vec<TextElement> = elements
        .into_iter()
        .filter(|e| is_candidate(e, &profile))
        .collect();

    let scored = score_candidates(admitted, &profile, semantic, weights);
    let validated = validate_and_dedup(scored);

    log::debug!("{} headings after validation", validated.len());
    assign_levels(&validated)
}
