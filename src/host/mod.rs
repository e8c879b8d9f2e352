//! The drawing interface the renderers talk to.
//!
//! A [`RenderingHost`] owns the page: it knows where the cursor is, how big a
//! page is, which font a themed scope maps to and how to shape and place text.
//! The renderers only decide *what* goes where, in what order, with which
//! spacing.
//!
//! ## Cursor
//!
//! The cursor is the vertical space left between the current drawing position
//! and the bottom of the content area. Drawing and advancing make it smaller;
//! a fresh page starts with the cursor at the full content height.
//!
//! ## Measuring
//!
//! Some layouts need to know how tall a block is before committing to where it
//! goes. [`RenderingHost::measure`] runs the same drawing code against a
//! throwaway context and reports the [`Extent`] it used; none of that output
//! reaches the page. Drawing for real is a separate, ordinary call.

mod transcript;
pub use transcript::*;

use crate::theme::TopPosition;
use anyhow::Result;
use serde::{Deserialize, Serialize};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAlign {
    Left,
    Center,
    Right,
    Justify,
}

/// Named font settings from the theme. The host decides what each looks like.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FontScope {
    TitlePage,
    TitlePageTitle,
    TitlePageSubtitle,
    TitlePageAuthors,
    TitlePageRevision,
    Footnotes,
}

impl FontScope {
    /// Theme key prefix for this scope.
    pub fn key(&self) -> &'static str {
        match self {
            FontScope::TitlePage => "title_page",
            FontScope::TitlePageTitle => "title_page_title",
            FontScope::TitlePageSubtitle => "title_page_subtitle",
            FontScope::TitlePageAuthors => "title_page_authors",
            FontScope::TitlePageRevision => "title_page_revision",
            FontScope::Footnotes => "footnotes",
        }
    }
}

/// What a caption is captioning.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CaptionCategory {
    Footnotes,
}

/// How a paragraph is set.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ParagraphOptions {
    pub align: TextAlign,
    /// Space left below the paragraph.
    pub margin_bottom: f32,
    pub hyphenate: bool,
    /// Collapse line breaks and runs of whitespace into single spaces.
    /// Off means line breaks in the text are kept as they are.
    pub normalize: bool,
}

impl ParagraphOptions {
    pub fn new(align: TextAlign) -> ParagraphOptions {
        ParagraphOptions {
            align,
            margin_bottom: 0.0,
            hyphenate: true,
            normalize: true,
        }
    }

    pub fn margin_bottom(mut self, margin_bottom: f32) -> Self {
        self.margin_bottom = margin_bottom;
        self
    }

    pub fn hyphenate(mut self, hyphenate: bool) -> Self {
        self.hyphenate = hyphenate;
        self
    }

    pub fn normalize(mut self, normalize: bool) -> Self {
        self.normalize = normalize;
        self
    }
}

/// How much room some content took when it was measured.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Extent {
    /// Height of the content if it fits on a single page.
    pub single_page_height: Option<f32>,
}

/// A piece of paragraph content.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum Inline {
    Text { text: String },
    /// An invisible link target.
    Anchor { id: String },
    /// Visible text linking to an anchor elsewhere in the document.
    Link { target: String, text: String },
}

/// Paragraph content: text interleaved with anchors and internal links.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Prose(pub Vec<Inline>);

impl Prose {
    pub fn push_text<S: Into<String>>(&mut self, text: S) -> &mut Self {
        self.0.push(Inline::Text { text: text.into() });
        self
    }

    pub fn push_anchor<S: Into<String>>(&mut self, id: S) -> &mut Self {
        self.0.push(Inline::Anchor { id: id.into() });
        self
    }

    pub fn push_link<T: Into<String>, S: Into<String>>(&mut self, target: T, text: S) -> &mut Self {
        self.0.push(Inline::Link {
            target: target.into(),
            text: text.into(),
        });
        self
    }

    /// The visible text, with anchors dropped and links reduced to their text.
    pub fn plain_text(&self) -> String {
        self.0
            .iter()
            .map(|inline| match inline {
                Inline::Text { text } | Inline::Link { text, .. } => text.as_str(),
                Inline::Anchor { .. } => "",
            })
            .collect()
    }

    pub fn anchors(&self) -> impl Iterator<Item = &str> {
        self.0.iter().filter_map(|inline| match inline {
            Inline::Anchor { id } => Some(id.as_str()),
            _ => None,
        })
    }

    pub fn link_targets(&self) -> impl Iterator<Item = &str> {
        self.0.iter().filter_map(|inline| match inline {
            Inline::Link { target, .. } => Some(target.as_str()),
            _ => None,
        })
    }
}

impl From<String> for Prose {
    fn from(text: String) -> Self {
        Prose(vec![Inline::Text { text }])
    }
}

impl From<&str> for Prose {
    fn from(text: &str) -> Self {
        Prose::from(text.to_string())
    }
}

/// Collapse every run of whitespace, line breaks included, into one space.
pub fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// The page and text engine the renderers draw into.
///
/// The scoped methods (`with_themed_font`, `with_indent`) must restore the
/// previous state when `f` returns, whether it returned `Ok` or `Err`.
pub trait RenderingHost {
    /// Vertical space left below the drawing position.
    fn cursor(&self) -> f32;

    /// Move the drawing position so that `y` is left below it.
    fn set_cursor(&mut self, y: f32);

    /// Move the drawing position down.
    fn advance(&mut self, amount: f32);

    /// Run `content` against a throwaway context and report how much room it
    /// took. Nothing drawn there reaches the page and the cursor is left
    /// untouched.
    ///
    /// Hosts that can't measure return `Ok(None)`, which is the default.
    fn measure<F>(&mut self, content: F) -> Result<Option<Extent>>
    where
        F: FnOnce(&mut Self) -> Result<()>,
        Self: Sized,
    {
        let _ = content;
        Ok(None)
    }

    /// Run `f` with the theme's font settings for `scope` applied.
    fn with_themed_font<R, F>(&mut self, scope: FontScope, f: F) -> Result<R>
    where
        F: FnOnce(&mut Self) -> Result<R>,
        Self: Sized;

    /// Run `f` with the content area narrowed by `left` and `right`.
    fn with_indent<R, F>(&mut self, left: f32, right: f32, f: F) -> Result<R>
    where
        F: FnOnce(&mut Self) -> Result<R>,
        Self: Sized;

    fn draw_paragraph(&mut self, prose: &Prose, options: &ParagraphOptions) -> Result<()>;

    fn draw_caption(&mut self, text: &str, category: CaptionCategory) -> Result<()>;

    /// Turn a themed top position into a cursor value.
    fn resolve_top(&self, position: TopPosition) -> f32;
}
