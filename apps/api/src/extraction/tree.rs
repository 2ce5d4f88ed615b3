//! Structured page/block/run model produced by a [`PageTreeEngine`].
//!
//! Field names follow the wire shape emitted by event-driven PDF-to-JSON
//! engines (`{"Pages":[{"Texts":[{"R":[{"T":"..."}]}]}]}`) so a tree captured
//! from such an engine deserializes as-is.
//!
//! [`PageTreeEngine`]: crate::extraction::engine::PageTreeEngine

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageTree {
    #[serde(rename = "Pages", default)]
    pub pages: Vec<Page>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page {
    #[serde(rename = "Texts", default)]
    pub blocks: Vec<TextBlock>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextBlock {
    #[serde(rename = "R", default)]
    pub runs: Vec<Run>,
}

/// Smallest unit of text; `encoded` is percent-encoded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Run {
    #[serde(rename = "T")]
    pub encoded: String,
}

impl PageTree {
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    pub fn run_count(&self) -> usize {
        self.pages
            .iter()
            .flat_map(|p| &p.blocks)
            .map(|b| b.runs.len())
            .sum()
    }
}

impl Run {
    pub fn new(encoded: impl Into<String>) -> Self {
        Self {
            encoded: encoded.into(),
        }
    }
}

#[cfg(test)]
impl TextBlock {
    pub fn from_runs<I, S>(runs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            runs: runs.into_iter().map(Run::new).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserializes_engine_wire_shape() {
        let json = r#"{
            "Pages": [
                {"Texts": [{"R": [{"T": "Hello%20World"}]}, {"R": [{"T": "a"}, {"T": "b"}]}]},
                {"Texts": []},
                {}
            ]
        }"#;
        let tree: PageTree = serde_json::from_str(json).unwrap();
        assert_eq!(tree.page_count(), 3);
        assert_eq!(tree.run_count(), 3);
        assert_eq!(tree.pages[0].blocks[0].runs[0].encoded, "Hello%20World");
        assert!(tree.pages[2].blocks.is_empty());
    }

    #[test]
    fn test_serializes_with_wire_field_names() {
        let tree = PageTree {
            pages: vec![Page {
                blocks: vec![TextBlock::from_runs(["x"])],
            }],
        };
        let value = serde_json::to_value(&tree).unwrap();
        assert_eq!(value["Pages"][0]["Texts"][0]["R"][0]["T"], "x");
    }
}
