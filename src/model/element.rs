//! Positioned text line types produced by the parser adapter.

use serde::{Deserialize, Serialize};

/// Bounding box of a text line, in top-down page coordinates
/// (y0 is the distance from the top of the page).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct BBox {
    /// Left edge
    pub x0: f32,
    /// Top edge
    pub y0: f32,
    /// Right edge
    pub x1: f32,
    /// Bottom edge
    pub y1: f32,
}

impl BBox {
    /// Create a new bounding box.
    pub fn new(x0: f32, y0: f32, x1: f32, y1: f32) -> Self {
        Self { x0, y0, x1, y1 }
    }

    /// Left indentation of the line.
    pub fn indent(&self) -> f32 {
        self.x0
    }

    /// Width of the box.
    pub fn width(&self) -> f32 {
        self.x1 - self.x0
    }
}

/// One line of text as positioned on a page, with font metadata.
///
/// Produced once per rendered text line by the parser adapter and consumed
/// by the outline pipeline. Elements live for a single scan pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextElement {
    /// Line text (already whitespace-joined from its spans)
    pub text: String,
    /// Page number (1-indexed)
    pub page: u32,
    /// Dominant font size of the line in points
    pub font_size: f32,
    /// Whether the line is predominantly bold
    pub is_bold: bool,
    /// Position on the page
    pub bbox: BBox,
}

impl TextElement {
    /// Create a new text element.
    pub fn new(
        text: impl Into<String>,
        page: u32,
        font_size: f32,
        is_bold: bool,
        bbox: BBox,
    ) -> Self {
        Self {
            text: text.into(),
            page,
            font_size,
            is_bold,
            bbox,
        }
    }

    /// Left indentation of the element.
    pub fn indent(&self) -> f32 {
        self.bbox.x0
    }

    /// Vertical position (distance from page top).
    pub fn y(&self) -> f32 {
        self.bbox.y0
    }

    /// Character length of the text.
    pub fn len(&self) -> usize {
        self.text.chars().count()
    }

    /// Whether the text is empty.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}
