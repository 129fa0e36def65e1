//! # skimpdf
//!
//! Time-budgeted structural outline extraction from PDF documents.
//!
//! skimpdf infers a document title and a ranked H1–H3 heading outline
//! from raw positioned text, without relying on the PDF's bookmark
//! metadata. It works on documents that carry no semantic structure at
//! all: headings are recovered from typography, structural text patterns,
//! vocabulary, and layout, under a strict wall-clock budget.
//!
//! ## Quick Start
//!
//! ```no_run
//! use std::time::Duration;
//! use skimpdf::extract_outline;
//!
//! let result = extract_outline("paper.pdf", Duration::from_secs(10));
//! println!("{}", result.title);
//! for heading in &result.outline {
//!     println!("{} {} (p. {})", heading.level, heading.text, heading.page);
//! }
//! ```
//!
//! ## Behavior under pressure
//!
//! - Documents over 30 pages, or scans started with little budget left,
//!   are sampled (first + last + strided middle pages) instead of fully
//!   scanned.
//! - Two checkpoints can short-circuit to a partial result; an unreadable
//!   document yields `{title: "", outline: []}`. The extraction entry
//!   points never return an error.
//! - An optional sentence-embedding model sharpens the semantic scoring
//!   channel; without one, scoring degrades to lexical matching.

pub mod detect;
pub mod embed;
pub mod error;
pub mod model;
pub mod outline;
pub mod output;
pub mod parser;

// Re-export commonly used types
pub use detect::{detect_format_from_bytes, detect_format_from_path, is_pdf, PdfFormat};
pub use embed::{EmbedError, SemanticIndex, TextEmbedder};
pub use error::{Error, Result};
pub use model::{BBox, Heading, HeadingLevel, OutlineResult, TextElement};
pub use outline::{ExtractOptions, ScanBudget, ScanMode, ScoreWeights};
pub use output::{to_json, JsonFormat};
pub use parser::{DocumentSource, PdfSource};

use std::path::Path;
use std::time::Duration;

/// Extract an outline from a PDF file under the given time budget.
///
/// Never fails: unreadable documents and exhausted budgets yield a
/// well-formed, possibly empty result.
///
/// # Example
///
/// ```no_run
/// use std::time::Duration;
///
/// let result = skimpdf::extract_outline("report.pdf", Duration::from_secs(10));
/// println!("{} headings", result.outline.len());
/// ```
pub fn extract_outline<P: AsRef<Path>>(path: P, time_limit: Duration) -> OutlineResult {
    Extractor::new().with_time_limit(time_limit).extract(path)
}

/// Builder for configured outline extraction.
///
/// # Example
///
/// ```no_run
/// use std::time::Duration;
/// use skimpdf::Extractor;
///
/// let result = Extractor::new()
///     .with_time_limit(Duration::from_secs(5))
///     .extract("thesis.pdf");
/// ```
pub struct Extractor {
    options: ExtractOptions,
    semantic: Option<SemanticIndex>,
}

impl Extractor {
    /// Create an extractor with default options (ten-second budget, no
    /// embedding model).
    pub fn new() -> Self {
        Self {
            options: ExtractOptions::default(),
            semantic: None,
        }
    }

    /// Set the per-document time budget.
    pub fn with_time_limit(mut self, limit: Duration) -> Self {
        self.options = self.options.with_time_limit(limit);
        self
    }

    /// Set the page-count ceiling for full scans.
    pub fn with_max_full_scan_pages(mut self, pages: u32) -> Self {
        self.options = self.options.with_max_full_scan_pages(pages);
        self
    }

    /// Set the scoring channel weights.
    pub fn with_weights(mut self, weights: ScoreWeights) -> Self {
        self.options = self.options.with_weights(weights);
        self
    }

    /// Attach a sentence-embedding model for the semantic scoring
    /// channel. If the archetype embeddings cannot be built, scoring
    /// silently stays lexical.
    pub fn with_embedder(mut self, embedder: Box<dyn TextEmbedder>) -> Self {
        self.semantic = SemanticIndex::new(embedder);
        self
    }

    /// Extract an outline from a PDF file. The budget clock starts now.
    pub fn extract<P: AsRef<Path>>(&self, path: P) -> OutlineResult {
        let budget = ScanBudget::new(self.options.time_limit);
        outline::extract_outline_from_path(
            path.as_ref(),
            &budget,
            &self.options,
            self.semantic.as_ref(),
        )
    }

    /// Extract an outline from an already-opened document source.
    /// `file_stem` feeds the filename tier of title extraction.
    pub fn extract_from_source(
        &self,
        source: &dyn DocumentSource,
        file_stem: Option<&str>,
    ) -> OutlineResult {
        let budget = ScanBudget::new(self.options.time_limit);
        outline::extract_outline_from_source(
            source,
            file_stem,
            &budget,
            &self.options,
            self.semantic.as_ref(),
        )
    }
}

impl Default for Extractor {
    fn default() -> Self {
        Self::new()
    }
}
