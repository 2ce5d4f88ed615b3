//! Rebuilds plain text from a [`PageTree`] in engine emission order.

use crate::extraction::decode::decode_or_passthrough;
use crate::extraction::tree::PageTree;

/// Concatenates every run, each followed by one space, and closes every page
/// (empty ones included) with one newline. Nothing is trimmed.
pub fn reassemble_untrimmed(tree: &PageTree) -> String {
    let mut out = String::new();
    for page in &tree.pages {
        for block in &page.blocks {
            for run in &block.runs {
                out.push_str(&decode_or_passthrough(&run.encoded));
                out.push(' ');
            }
        }
        out.push('\n');
    }
    out
}

/// [`reassemble_untrimmed`] with outer whitespace removed. Interior
/// separators are left exactly as emitted.
pub fn reassemble(tree: &PageTree) -> String {
    reassemble_untrimmed(tree).trim().to_string()
}
