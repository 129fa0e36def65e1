//! Content-stream text extraction.
//!
//! Walks a page's content stream tracking the text matrix, decodes the
//! text-showing operators with the page's font encodings, and groups the
//! resulting spans into baseline lines.

use std::collections::{BTreeMap, HashMap};

use lopdf::{Document as LopdfDocument, Object, ObjectId};

use crate::error::{Error, Result};
use crate::model::{BBox, TextElement};
use crate::outline::text::normalize;

/// A text run with position and style, before line grouping.
#[derive(Debug, Clone)]
pub struct TextSpan {
    /// Decoded text content
    pub text: String,
    /// X position (left edge, bottom-up page coordinates)
    pub x: f32,
    /// Y position (baseline, bottom-up page coordinates)
    pub y: f32,
    /// Estimated width of the run
    pub width: f32,
    /// Font size in points
    pub font_size: f32,
    /// Whether the font appears to be bold
    pub is_bold: bool,
}

impl TextSpan {
    fn new(text: String, x: f32, y: f32, font_size: f32, font_name: &str) -> Self {
        let lower = font_name.to_lowercase();
        let is_bold =
            lower.contains("bold") || lower.contains("black") || lower.contains("heavy");
        // Width estimate: roughly half an em per character
        let width = text.chars().count() as f32 * font_size * 0.5;

        Self {
            text,
            x,
            y,
            width,
            font_size,
            is_bold,
        }
    }
}

/// Extract the text spans of one page (1-indexed).
pub fn extract_page_spans(doc: &LopdfDocument, page_num: u32) -> Result<Vec<TextSpan>> {
    let pages = doc.get_pages();
    let page_id = pages
        .get(&page_num)
        .ok_or(Error::PageOutOfRange(page_num, pages.len() as u32))?;

    let lopdf_fonts = doc
        .get_page_fonts(*page_id)
        .map_err(|e| Error::PdfParse(e.to_string()))?;

    // Resource name -> base font name, for bold detection
    let mut fonts = HashMap::new();
    for (name, font) in &lopdf_fonts {
        let base_font = font
            .get(b"BaseFont")
            .ok()
            .and_then(|o| o.as_name().ok())
            .map(|n| String::from_utf8_lossy(n).to_string())
            .unwrap_or_else(|| "Unknown".to_string());
        fonts.insert(name.clone(), base_font);
    }

    let content = page_content(doc, *page_id)?;
    walk_content_stream(doc, &content, &fonts, &lopdf_fonts)
}

/// Group a page's spans into lines and emit one `TextElement` per line.
///
/// `page_height` converts baselines from PDF's bottom-up coordinates into
/// top-down positions, so smaller y means closer to the top of the page.
pub fn spans_to_elements(spans: Vec<TextSpan>, page: u32, page_height: f32) -> Vec<TextElement> {
    let mut elements = Vec::new();

    for line in group_spans_into_lines(spans) {
        let text = normalize(&line_text(&line));
        if text.chars().count() < 3 {
            continue;
        }

        let font_size = line
            .iter()
            .map(|s| s.font_size)
            .fold(0.0f32, f32::max);
        if font_size <= 0.0 {
            continue;
        }

        let is_bold = line.iter().any(|s| s.is_bold);
        let x0 = line
            .iter()
            .map(|s| s.x)
            .fold(f32::INFINITY, f32::min);
        let x1 = line
            .iter()
            .map(|s| s.x + s.width)
            .fold(0.0f32, f32::max);
        let baseline = line[0].y;
        let y0 = (page_height - baseline).max(0.0);

        elements.push(TextElement::new(
            text,
            page,
            font_size,
            is_bold,
            BBox::new(x0, y0, x1, y0 + font_size),
        ));
    }

    elements
}

/// Group spans into baseline lines: sort by Y (top first) then X, and
/// split whenever the baseline moves by more than 30% of the font size.
fn group_spans_into_lines(mut spans: Vec<TextSpan>) -> Vec<Vec<TextSpan>> {
    if spans.is_empty() {
        return Vec::new();
    }

    spans.sort_by(|a, b| {
        b.y.partial_cmp(&a.y)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.x.partial_cmp(&b.x).unwrap_or(std::cmp::Ordering::Equal))
    });

    let mut lines: Vec<Vec<TextSpan>> = Vec::new();
    let mut current: Vec<TextSpan> = Vec::new();
    let mut current_y: Option<f32> = None;

    for span in spans {
        let tolerance = span.font_size * 0.3;

        match current_y {
            Some(y) if (span.y - y).abs() <= tolerance => current.push(span),
            Some(_) => {
                lines.push(std::mem::take(&mut current));
                current_y = Some(span.y);
                current.push(span);
            }
            None => {
                current_y = Some(span.y);
                current.push(span);
            }
        }
    }

    if !current.is_empty() {
        lines.push(current);
    }

    // Reading order within a line, regardless of baseline jitter
    for line in &mut lines {
        line.sort_by(|a, b| a.x.partial_cmp(&b.x).unwrap_or(std::cmp::Ordering::Equal));
    }

    lines
}

/// Join a line's spans, inserting spaces across visible gaps (none
/// between characters of spaceless scripts).
fn line_text(spans: &[TextSpan]) -> String {
    let mut result = String::new();

    for (i, span) in spans.iter().enumerate() {
        if i == 0 {
            result.push_str(&span.text);
            continue;
        }

        let prev = &spans[i - 1];
        let gap = span.x - (prev.x + prev.width);
        let char_count = span.text.chars().count();
        let avg_char_width = if char_count > 0 && span.width > 0.0 {
            span.width / char_count as f32
        } else {
            span.font_size * 0.5
        };

        let prev_last = prev.text.chars().last();
        let curr_first = span.text.chars().next();
        let both_spaceless = prev_last.map(is_spaceless_script_char).unwrap_or(false)
            && curr_first.map(is_spaceless_script_char).unwrap_or(false);

        let already_spaced = prev.text.ends_with(' ') || span.text.starts_with(' ');

        if gap > avg_char_width * 0.2 && !both_spaceless && !already_spaced {
            result.push(' ');
        }

        result.push_str(&span.text);
    }

    result
}

/// Fetch and concatenate a page's content streams.
fn page_content(doc: &LopdfDocument, page_id: ObjectId) -> Result<Vec<u8>> {
    let page_dict = doc
        .get_dictionary(page_id)
        .map_err(|e| Error::PdfParse(e.to_string()))?;

    let contents = page_dict
        .get(b"Contents")
        .map_err(|e| Error::PdfParse(e.to_string()))?;

    match contents {
        Object::Reference(r) => {
            if let Ok(Object::Stream(s)) = doc.get_object(*r) {
                return s
                    .decompressed_content()
                    .map_err(|e| Error::PdfParse(e.to_string()));
            }
            Err(Error::PdfParse("invalid content stream".to_string()))
        }
        Object::Array(arr) => {
            let mut content = Vec::new();
            for obj in arr {
                if let Object::Reference(r) = obj {
                    if let Ok(Object::Stream(s)) = doc.get_object(*r) {
                        if let Ok(data) = s.decompressed_content() {
                            content.extend_from_slice(&data);
                            content.push(b' ');
                        }
                    }
                }
            }
            Ok(content)
        }
        _ => Err(Error::PdfParse("invalid content stream".to_string())),
    }
}

/// Kerning adjustment (in 1/1000 text-space units) treated as a word gap.
const TJ_SPACE_THRESHOLD: f32 = 200.0;

/// Walk the content stream operators that affect text, emitting spans.
fn walk_content_stream(
    doc: &LopdfDocument,
    content: &[u8],
    fonts: &HashMap<Vec<u8>, String>,
    lopdf_fonts: &BTreeMap<Vec<u8>, &lopdf::Dictionary>,
) -> Result<Vec<TextSpan>> {
    let content =
        lopdf::content::Content::decode(content).map_err(|e| Error::PdfParse(e.to_string()))?;

    let mut spans = Vec::new();
    let mut current_font = String::new();
    let mut current_font_name: Vec<u8> = Vec::new();
    let mut current_font_size: f32 = 12.0;
    let mut matrix = TextMatrix::default();
    let mut in_text_block = false;

    for op in content.operations {
        match op.operator.as_str() {
            "BT" => {
                in_text_block = true;
                matrix = TextMatrix::default();
            }
            "ET" => {
                in_text_block = false;
            }
            "Tf" => {
                if op.operands.len() >= 2 {
                    if let Object::Name(font_name) = &op.operands[0] {
                        current_font_name = font_name.clone();
                        current_font = fonts
                            .get(font_name.as_slice())
                            .cloned()
                            .unwrap_or_else(|| {
                                String::from_utf8_lossy(font_name.as_slice()).to_string()
                            });
                    }
                    current_font_size = as_number(&op.operands[1]).unwrap_or(12.0);
                }
            }
            "Td" | "TD" => {
                if op.operands.len() >= 2 {
                    let tx = as_number(&op.operands[0]).unwrap_or(0.0);
                    let ty = as_number(&op.operands[1]).unwrap_or(0.0);
                    matrix.translate(tx, ty);
                }
            }
            "Tm" => {
                if op.operands.len() >= 6 {
                    matrix.set(
                        as_number(&op.operands[0]).unwrap_or(1.0),
                        as_number(&op.operands[1]).unwrap_or(0.0),
                        as_number(&op.operands[2]).unwrap_or(0.0),
                        as_number(&op.operands[3]).unwrap_or(1.0),
                        as_number(&op.operands[4]).unwrap_or(0.0),
                        as_number(&op.operands[5]).unwrap_or(0.0),
                    );
                }
            }
            "T*" => {
                matrix.next_line();
            }
            "Tj" | "TJ" => {
                if !in_text_block {
                    continue;
                }

                let encoding = lopdf_fonts
                    .get(&current_font_name)
                    .and_then(|f| f.get_font_encoding(doc).ok());

                let text = if op.operator == "TJ" {
                    decode_tj_array(op.operands.first(), encoding.as_ref())
                } else if let Some(Object::String(bytes, _)) = op.operands.first() {
                    decode_string(bytes, encoding.as_ref())
                } else {
                    String::new()
                };

                push_span(
                    &mut spans,
                    text,
                    &matrix,
                    current_font_size,
                    &current_font,
                );
            }
            "'" | "\"" => {
                matrix.next_line();
                if !in_text_block {
                    continue;
                }

                let text_idx = if op.operator == "\"" { 2 } else { 0 };
                if let Some(Object::String(bytes, _)) = op.operands.get(text_idx) {
                    let encoding = lopdf_fonts
                        .get(&current_font_name)
                        .and_then(|f| f.get_font_encoding(doc).ok());
                    let text = decode_string(bytes, encoding.as_ref());
                    push_span(
                        &mut spans,
                        text,
                        &matrix,
                        current_font_size,
                        &current_font,
                    );
                }
            }
            _ => {}
        }
    }

    Ok(spans)
}

fn push_span(
    spans: &mut Vec<TextSpan>,
    text: String,
    matrix: &TextMatrix,
    font_size: f32,
    font_name: &str,
) {
    if text.trim().is_empty() {
        return;
    }

    let (x, y) = matrix.position();
    let effective_size = font_size * matrix.scale();
    spans.push(TextSpan::new(text, x, y, effective_size, font_name));
}

/// Decode a TJ operand array: strings interleaved with kerning numbers,
/// where large negative adjustments mark word gaps.
fn decode_tj_array(
    operand: Option<&Object>,
    encoding: Option<&lopdf::Encoding>,
) -> String {
    let Some(Object::Array(arr)) = operand else {
        return String::new();
    };

    let mut combined = String::new();

    for item in arr {
        match item {
            Object::String(bytes, _) => {
                combined.push_str(&decode_string(bytes, encoding));
            }
            Object::Integer(n) => {
                maybe_push_space(&mut combined, -(*n as f32));
            }
            Object::Real(n) => {
                maybe_push_space(&mut combined, -n);
            }
            _ => {}
        }
    }

    combined
}

fn maybe_push_space(combined: &mut String, adjustment: f32) {
    if adjustment <= TJ_SPACE_THRESHOLD || combined.is_empty() || combined.ends_with(' ') {
        return;
    }

    if let Some(last) = combined.chars().last() {
        if !is_spaceless_script_char(last) {
            combined.push(' ');
        }
    }
}

fn decode_string(bytes: &[u8], encoding: Option<&lopdf::Encoding>) -> String {
    if let Some(enc) = encoding {
        if let Ok(decoded) = LopdfDocument::decode_text(enc, bytes) {
            return decoded;
        }
    }
    decode_text_simple(bytes)
}

/// Fallback decoding when no font encoding is available: UTF-16BE with
/// BOM, then UTF-8, then Latin-1.
fn decode_text_simple(bytes: &[u8]) -> String {
    if bytes.len() >= 2 && bytes[0] == 0xFE && bytes[1] == 0xFF {
        let utf16: Vec<u16> = bytes[2..]
            .chunks(2)
            .filter_map(|c| {
                if c.len() == 2 {
                    Some(u16::from_be_bytes([c[0], c[1]]))
                } else {
                    None
                }
            })
            .collect();
        return String::from_utf16(&utf16).unwrap_or_default();
    }

    if let Ok(s) = String::from_utf8(bytes.to_vec()) {
        return s;
    }

    bytes.iter().map(|&b| b as char).collect()
}

/// Whether a character belongs to a script written without word spaces
/// (Han ideographs and kana; Hangul uses spaces).
fn is_spaceless_script_char(c: char) -> bool {
    let code = c as u32;

    (0x4E00..=0x9FFF).contains(&code)
        || (0x3400..=0x4DBF).contains(&code)
        || (0x3040..=0x309F).contains(&code)
        || (0x30A0..=0x30FF).contains(&code)
        || (0x3000..=0x303F).contains(&code)
}

/// Text matrix bookkeeping for position tracking in the content stream.
#[derive(Debug, Clone)]
struct TextMatrix {
    a: f32,
    b: f32,
    c: f32,
    d: f32,
    e: f32, // X translation
    f: f32, // Y translation
}

impl Default for TextMatrix {
    fn default() -> Self {
        Self {
            a: 1.0,
            b: 0.0,
            c: 0.0,
            d: 1.0,
            e: 0.0,
            f: 0.0,
        }
    }
}

impl TextMatrix {
    fn set(&mut self, a: f32, b: f32, c: f32, d: f32, e: f32, f: f32) {
        self.a = a;
        self.b = b;
        self.c = c;
        self.d = d;
        self.e = e;
        self.f = f;
    }

    fn translate(&mut self, tx: f32, ty: f32) {
        self.e += tx * self.a + ty * self.c;
        self.f += tx * self.b + ty * self.d;
    }

    fn next_line(&mut self) {
        // Default leading; a TL operator would refine this
        self.f -= 12.0 * self.d;
    }

    fn position(&self) -> (f32, f32) {
        (self.e, self.f)
    }

    fn scale(&self) -> f32 {
        (self.a * self.a + self.c * self.c).sqrt()
    }
}

fn as_number(obj: &Object) -> Option<f32> {
    match obj {
        Object::Integer(i) => Some(*i as f32),
        Object::Real(r) => Some(*r),
        _ => None,
    }
}
