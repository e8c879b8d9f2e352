//! The two renderers and the state they share across a document pass.
//!
//! The surrounding pipeline creates one [`RenderSession`] per document, calls
//! [`title_page::render`] once, and calls [`footnotes::render`] wherever
//! footnotes should be flushed: at section boundaries, at the end of the
//! document, or both.

pub mod footnotes;
pub mod template;
pub mod title_page;

/// State that lives for one rendering pass over a document.
#[derive(Debug, Default, Clone)]
pub struct RenderSession {
    rendered_footnotes: Vec<usize>,
}

impl RenderSession {
    pub fn new() -> RenderSession {
        RenderSession::default()
    }

    /// Indices of the footnotes already drawn, in the order they were drawn.
    pub fn rendered_footnotes(&self) -> &[usize] {
        &self.rendered_footnotes
    }

    pub fn has_rendered(&self, index: usize) -> bool {
        self.rendered_footnotes.contains(&index)
    }

    fn mark_rendered<I: IntoIterator<Item = usize>>(&mut self, indices: I) {
        self.rendered_footnotes.extend(indices);
    }
}

/// Turn literal `\n` sequences into real line breaks.
pub(crate) fn unescape_line_breaks(text: &str) -> String {
    text.replace("\\n", "\n")
}
