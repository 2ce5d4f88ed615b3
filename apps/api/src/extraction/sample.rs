//! In-memory PDF construction. Backs the startup engine self-test and the
//! extraction tests, so neither depends on files on disk.

use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, ObjectId, Stream};

/// Text carried by the startup self-test document.
pub const SAMPLE_TEXT: &str = "careerops engine self-test";

/// One page whose text objects each show a single string with `Tj`.
pub fn text_page(blocks: &[&str]) -> Vec<Operation> {
    let mut ops = Vec::new();
    for (i, text) in blocks.iter().enumerate() {
        let y = 700 - (i as i64) * 20;
        ops.push(Operation::new("BT", vec![]));
        ops.push(Operation::new("Tf", vec!["F1".into(), 12.into()]));
        ops.push(Operation::new("Td", vec![72.into(), y.into()]));
        ops.push(Operation::new("Tj", vec![Object::string_literal(*text)]));
        ops.push(Operation::new("ET", vec![]));
    }
    ops
}

/// Serializes a document with one page per operation list, all pages sharing
/// a Helvetica font named `F1`.
pub fn document_from_pages(pages: Vec<Vec<Operation>>) -> lopdf::Result<Vec<u8>> {
    document_with_font(pages, |doc| {
        doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Helvetica",
        })
    })
}

/// Like [`document_from_pages`], with `F1` bound to whatever font object
/// `font` adds to the document.
pub fn document_with_font<F>(pages: Vec<Vec<Operation>>, font: F) -> lopdf::Result<Vec<u8>>
where
    F: FnOnce(&mut Document) -> ObjectId,
{
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let font_id = font(&mut doc);
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! {
            "F1" => font_id,
        },
    });

    let mut kids = Vec::with_capacity(pages.len());
    for operations in pages {
        let content = Content { operations };
        let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode()?));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
            "Resources" => resources_id,
            "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
        });
        kids.push(Object::from(page_id));
    }

    let count = kids.len() as i64;
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => count,
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut buf = Vec::new();
    doc.save_to(&mut buf)?;
    Ok(buf)
}

/// A single-page document showing [`SAMPLE_TEXT`].
pub fn sample_document() -> lopdf::Result<Vec<u8>> {
    document_from_pages(vec![text_page(&[SAMPLE_TEXT])])
}
