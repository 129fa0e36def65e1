//! PDF parsing adapter.
//!
//! The outline pipeline consumes documents through the [`DocumentSource`]
//! trait; [`PdfSource`] is the lopdf-backed implementation that turns page
//! content streams into positioned text lines.

mod source;
mod spans;

pub use source::{DocumentSource, PdfSource};
