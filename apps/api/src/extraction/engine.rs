//! Structured PDF engines: raw bytes in, [`PageTree`] out.

use std::collections::BTreeMap;

use lopdf::content::{Content, Operation};
use lopdf::{Document, Encoding, Object, ObjectId};
use tracing::debug;

use crate::extraction::error::ExtractionError;
use crate::extraction::tree::{Page, PageTree, Run, TextBlock};

/// A synchronous engine producing a [`PageTree`].
///
/// Implementations run on the blocking pool. `cancelled` turns true once the
/// caller has stopped waiting; engines should poll it between pages.
pub trait PageTreeEngine: Send + Sync + 'static {
    fn name(&self) -> &'static str;

    fn parse(&self, bytes: &[u8], cancelled: &dyn Fn() -> bool)
        -> Result<PageTree, ExtractionError>;
}

/// Walks page content streams with `lopdf`.
///
/// Each `BT`..`ET` text object becomes one block and every string shown by
/// `Tj`, `'`, `"` or inside a `TJ` array becomes one run. Shown bytes are
/// decoded through the encoding of the font selected by `Tf` (simple
/// encodings and `ToUnicode` maps), and run text is percent-encoded on the
/// way out.
#[derive(Debug, Default, Clone, Copy)]
pub struct LopdfEngine;

impl PageTreeEngine for LopdfEngine {
    fn name(&self) -> &'static str {
        "lopdf"
    }

    fn parse(
        &self,
        bytes: &[u8],
        cancelled: &dyn Fn() -> bool,
    ) -> Result<PageTree, ExtractionError> {
        let doc = Document::load_mem(bytes)
            .map_err(|e| ExtractionError::parse_failure(format!("invalid PDF: {e}")))?;

        if doc.is_encrypted() {
            return Err(ExtractionError::parse_failure("document is encrypted"));
        }

        // BTreeMap keyed by page number, so iteration is reading order.
        let pages = doc.get_pages();
        let mut tree = PageTree {
            pages: Vec::with_capacity(pages.len()),
        };

        for (number, page_id) in pages {
            if cancelled() {
                return Err(ExtractionError::parse_failure("extraction abandoned"));
            }

            let raw = doc.get_page_content(page_id).map_err(|e| {
                ExtractionError::parse_failure(format!("page {number}: unreadable content: {e}"))
            })?;
            if raw.is_empty() {
                tree.pages.push(Page::default());
                continue;
            }

            let content = Content::decode(&raw).map_err(|e| {
                ExtractionError::parse_failure(format!("page {number}: bad content stream: {e}"))
            })?;
            let encodings = page_encodings(&doc, page_id);
            tree.pages.push(page_from_operations(&content.operations, &encodings));
        }

        Ok(tree)
    }
}

/// Font resource name → encoding, for the fonts of one page.
type FontEncodings<'a> = BTreeMap<Vec<u8>, Encoding<'a>>;

fn page_encodings(doc: &Document, page_id: ObjectId) -> FontEncodings<'_> {
    let Ok(fonts) = doc.get_page_fonts(page_id) else {
        return FontEncodings::new();
    };
    fonts
        .into_iter()
        .filter(|(_, font)| font.type_is(b"Font"))
        .filter_map(|(name, font)| match font.get_font_encoding(doc) {
            Ok(encoding) => Some((name, encoding)),
            Err(e) => {
                debug!(
                    font = %String::from_utf8_lossy(&name),
                    error = %e,
                    "font encoding unavailable, falling back to raw bytes"
                );
                None
            }
        })
        .collect()
}

fn page_from_operations(operations: &[Operation], encodings: &FontEncodings<'_>) -> Page {
    let mut page = Page::default();
    let mut open: Option<TextBlock> = None;
    // Font selection is graphics state and survives ET.
    let mut font: Option<&Encoding<'_>> = None;

    for op in operations {
        match op.operator.as_str() {
            "Tf" => {
                font = op
                    .operands
                    .first()
                    .and_then(|name| name.as_name().ok())
                    .and_then(|name| encodings.get(name));
            }
            "BT" => {
                // A nested BT is malformed; close what we have and start over.
                if let Some(block) = open.replace(TextBlock::default()) {
                    push_block(&mut page, block);
                }
            }
            "ET" => {
                if let Some(block) = open.take() {
                    push_block(&mut page, block);
                }
            }
            "Tj" | "'" => {
                if let Some(block) = open.as_mut() {
                    push_string(block, op.operands.last(), font);
                }
            }
            "\"" => {
                if let Some(block) = open.as_mut() {
                    push_string(block, op.operands.get(2), font);
                }
            }
            "TJ" => {
                if let (Some(block), Some(Object::Array(items))) =
                    (open.as_mut(), op.operands.first())
                {
                    for item in items {
                        push_string(block, Some(item), font);
                    }
                }
            }
            _ => {}
        }
    }

    if let Some(block) = open.take() {
        push_block(&mut page, block);
    }
    page
}

fn push_block(page: &mut Page, block: TextBlock) {
    if !block.runs.is_empty() {
        page.blocks.push(block);
    }
}

fn push_string(block: &mut TextBlock, operand: Option<&Object>, font: Option<&Encoding<'_>>) {
    if let Some(Object::String(bytes, _)) = operand {
        let text = decode_shown(bytes, font);
        if !text.is_empty() {
            block
                .runs
                .push(Run::new(urlencoding::encode(&text).into_owned()));
        }
    }
}

fn decode_shown(bytes: &[u8], font: Option<&Encoding<'_>>) -> String {
    match font.map(|encoding| Document::decode_text(encoding, bytes)) {
        Some(Ok(text)) => text,
        _ => decode_pdf_string(bytes),
    }
}

/// Fallback for strings shown without a usable font encoding: UTF-16BE when
/// the BOM is present, otherwise one char per byte.
fn decode_pdf_string(bytes: &[u8]) -> String {
    if let Some(rest) = bytes.strip_prefix(&[0xFE, 0xFF]) {
        let units: Vec<u16> = rest
            .chunks_exact(2)
            .map(|pair| u16::from_be_bytes([pair[0], pair[1]]))
            .collect();
        return String::from_utf16_lossy(&units);
    }
    bytes.iter().map(|&b| char::from(b)).collect()
}
