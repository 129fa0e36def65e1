//! Document source abstraction and the lopdf-backed implementation.

use std::path::Path;

use lopdf::Document as LopdfDocument;

use crate::detect::detect_format_from_path;
use crate::error::{Error, Result};
use crate::model::TextElement;

use super::spans::{extract_page_spans, spans_to_elements};

/// What the outline pipeline needs from a parsed document.
///
/// Page numbers are 1-indexed. Implementations own their underlying
/// handle; dropping the source releases it on every exit path.
pub trait DocumentSource {
    /// Number of pages in the document.
    fn page_count(&self) -> u32;

    /// The positioned text lines of one page.
    fn text_elements(&self, page: u32) -> Result<Vec<TextElement>>;

    /// The metadata title field, if the document carries one.
    fn metadata_title(&self) -> Option<String>;
}

/// A PDF document opened through lopdf.
pub struct PdfSource {
    doc: LopdfDocument,
}

impl PdfSource {
    /// Open a PDF file.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        detect_format_from_path(path)?;

        let doc = LopdfDocument::load(path).map_err(|e| match e {
            lopdf::Error::Decryption(_) => Error::Encrypted,
            _ => Error::from(e),
        })?;

        if doc.is_encrypted() {
            return Err(Error::Encrypted);
        }

        Ok(Self { doc })
    }

    /// Open a PDF from bytes.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        let doc = LopdfDocument::load_mem(data).map_err(|e| match e {
            lopdf::Error::Decryption(_) => Error::Encrypted,
            _ => Error::from(e),
        })?;

        if doc.is_encrypted() {
            return Err(Error::Encrypted);
        }

        Ok(Self { doc })
    }

    /// Page height in points, defaulting to Letter when the MediaBox is
    /// absent or malformed.
    fn page_height(&self, page_num: u32) -> f32 {
        let pages = self.doc.get_pages();
        let Some(page_id) = pages.get(&page_num) else {
            return 792.0;
        };

        if let Ok(page_dict) = self.doc.get_dictionary(*page_id) {
            if let Ok(media_box) = page_dict.get(b"MediaBox") {
                if let Ok(array) = media_box.as_array() {
                    if array.len() >= 4 {
                        return array[3].as_float().unwrap_or(792.0);
                    }
                }
            }
        }

        792.0
    }
}

impl DocumentSource for PdfSource {
    fn page_count(&self) -> u32 {
        self.doc.get_pages().len() as u32
    }

    fn text_elements(&self, page: u32) -> Result<Vec<TextElement>> {
        let spans = extract_page_spans(&self.doc, page)?;
        Ok(spans_to_elements(spans, page, self.page_height(page)))
    }

    fn metadata_title(&self) -> Option<String> {
        let info = self.doc.trailer.get(b"Info").ok()?;
        let info_ref = info.as_reference().ok()?;
        let info_dict = self.doc.get_dictionary(info_ref).ok()?;
        dict_string(info_dict, b"Title")
    }
}

/// Read a string value from a PDF dictionary, handling UTF-16BE (the PDF
/// Unicode convention) with UTF-8/Latin-1 fallbacks.
fn dict_string(dict: &lopdf::Dictionary, key: &[u8]) -> Option<String> {
    dict.get(key).ok().and_then(|obj| match obj {
        lopdf::Object::String(bytes, _) => {
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
                String::from_utf16(&utf16).ok()
            } else {
                String::from_utf8(bytes.clone())
                    .ok()
                    .or_else(|| Some(bytes.iter().map(|&b| b as char).collect()))
            }
        }
        lopdf::Object::Name(bytes) => String::from_utf8(bytes.clone()).ok(),
        _ => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dict_string_utf16() {
        let mut dict = lopdf::Dictionary::new();
        dict.set(
            b"Title".to_vec(),
            lopdf::Object::String(
                vec![0xFE, 0xFF, 0x00, 0x48, 0x00, 0x69],
                lopdf::StringFormat::Literal,
            ),
        );
        assert_eq!(dict_string(&dict, b"Title"), Some("Hi".to_string()));
    }

    #[test]
    fn test_dict_string_plain() {
        let mut dict = lopdf::Dictionary::new();
        dict.set(
            b"Title".to_vec(),
            lopdf::Object::String(b"Plain Title".to_vec(), lopdf::StringFormat::Literal),
        );
        assert_eq!(dict_string(&dict, b"Title"), Some("Plain Title".to_string()));
    }

    #[test]
    fn test_dict_string_missing() {
        let dict = lopdf::Dictionary::new();
        assert_eq!(dict_string(&dict, b"Title"), None);
    }

    #[test]
    fn test_open_rejects_non_pdf() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("not_a_pdf.pdf");
        std::fs::write(&path, b"just some text, definitely not a PDF").unwrap();
        assert!(matches!(PdfSource::open(&path), Err(Error::UnknownFormat)));
    }

    #[test]
    fn test_open_missing_file() {
        assert!(PdfSource::open("/nonexistent/nowhere.pdf").is_err());
    }

    #[test]
    fn test_from_bytes_rejects_garbage() {
        assert!(PdfSource::from_bytes(b"garbage").is_err());
    }
}
