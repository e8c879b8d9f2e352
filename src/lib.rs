//! Footnote and title page layout for document-to-PDF pipelines.
//!
//! The crate does not draw anything itself. Both renderers read an already
//! parsed [`Document`] and a [`ThemeConfig`], then issue drawing calls into a
//! [`RenderingHost`] supplied by the surrounding pipeline. Text shaping,
//! pagination and PDF encoding all live on the other side of that trait.
//!
//! - [`rendering::footnotes::render`] flushes footnotes that have been cited
//!   but not yet rendered, numbering them relative to what the
//!   [`RenderSession`] has already emitted.
//! - [`rendering::title_page::render`] lays out the title, subtitle, authors
//!   and revision line.
//!
//! [`TranscriptHost`] is a reference host that lays text out on fixed-height
//! pages and records every operation, which is what the tests and the
//! `page-extenders preview` command run against.

pub mod document;
pub mod host;
pub mod preview;
pub mod rendering;
pub mod theme;

pub use document::{Author, AuthorBuilder, Document, FlushPoint, Footnote, Section, XrefStyle};
pub use host::{
    CaptionCategory, DrawOp, Extent, FontScope, Inline, ParagraphOptions, Prose, RenderingHost,
    TextAlign, TranscriptHost,
};
pub use rendering::RenderSession;
pub use theme::ThemeConfig;
