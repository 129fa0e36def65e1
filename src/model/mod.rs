//! Core data types for outline extraction.

mod element;
mod outline;

pub use element::{BBox, TextElement};
pub use outline::{Heading, HeadingLevel, OutlineResult};
