//! Tier 2: raw content-stream scanning.
//!
//! Loads the document through the lenient structural parser, decodes each
//! page's content streams, and pulls out the operands of `Tj` text-show
//! operators with a pattern match. This recovers text from documents whose
//! text layer is absent or too damaged for tier 1, at the cost of ignoring
//! positioning: `TJ` arrays and glyph spacing are not interpreted, so the
//! output is a flat word stream.

use once_cell::sync::Lazy;
use regex::Regex;

use lopdf::{Document, Object, ObjectId};

use super::error::{PdfError, Result};
use super::{PdfTextStrategy, load_document};

/// Literal string operand immediately preceding a `Tj` operator. Whitespace
/// between operand and operator is a token separator, not part of the string.
static SHOW_TEXT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\((.*?)\)\s*Tj").expect("show-text regex pattern is valid and should compile")
});

pub struct ContentStreamStrategy;

impl PdfTextStrategy for ContentStreamStrategy {
    fn name(&self) -> &'static str {
        "content-stream"
    }

    fn extract(&self, bytes: &[u8]) -> Result<String> {
        let mut document = load_document(bytes)?;
        document.decompress();

        let mut page_texts: Vec<String> = Vec::new();
        for (_page_num, page_id) in document.get_pages() {
            let text = page_text(&document, page_id)?;
            if !text.is_empty() {
                page_texts.push(text);
            }
        }
        Ok(page_texts.join("\n"))
    }
}

fn page_text(document: &Document, page_id: ObjectId) -> Result<String> {
    let page = document.get_dictionary(page_id)?;
    // A page without a Contents entry is blank, not broken.
    let contents = match page.get(b"Contents") {
        Ok(object) => object,
        Err(_) => return Ok(String::new()),
    };
    let data = content_data(document, contents)?;
    Ok(show_text_operands(&data))
}

/// Resolve a Contents value to decoded stream bytes.
///
/// The entry comes in three encodings: an indirect reference to a stream, an
/// array of references, or a directly embedded stream object. Array chunks
/// are joined with a newline so operators never fuse across stream
/// boundaries.
fn content_data(document: &Document, contents: &Object) -> Result<Vec<u8>> {
    match contents {
        Object::Reference(id) => {
            let object = document.get_object(*id)?;
            content_data(document, object)
        }
        Object::Stream(stream) => stream
            .decompressed_content()
            .map_err(|e| PdfError::StreamDecodeFailed(e.to_string())),
        Object::Array(items) => {
            let mut data = Vec::new();
            for item in items {
                let chunk = content_data(document, item)?;
                if !data.is_empty() && !chunk.is_empty() {
                    data.push(b'\n');
                }
                data.extend_from_slice(&chunk);
            }
            Ok(data)
        }
        _ => Ok(Vec::new()),
    }
}

/// Capture all `(...)Tj` operands in a decoded content stream, joined with
/// single spaces. Escape sequences inside the literals are kept as-is.
fn show_text_operands(data: &[u8]) -> String {
    let content = String::from_utf8_lossy(data);
    let pieces: Vec<&str> = SHOW_TEXT
        .captures_iter(&content)
        .filter_map(|captures| captures.get(1).map(|m| m.as_str()))
        .collect();
    pieces.join(" ")
}
