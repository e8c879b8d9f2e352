use serde::{Deserialize, Serialize};

/// A footnote collected while the document body was being converted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Footnote {
    /// 1-based position in citation order, assigned on registration.
    pub index: usize,
    pub text: String,
    /// Display label, written by the footnote renderer when the footnote is
    /// flushed at a section boundary.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl Footnote {
    pub fn new<S: Into<String>>(index: usize, text: S) -> Footnote {
        Footnote {
            index,
            text: text.into(),
            label: None,
        }
    }

    /// Anchor the footnote body is drawn at, so references can link to it.
    pub fn def_anchor(&self) -> String {
        format!("_footnotedef_{}", self.index)
    }

    /// Anchor of the in-text reference, so the body can link back to it.
    pub fn ref_anchor(&self) -> String {
        format!("_footnoteref_{}", self.index)
    }
}
