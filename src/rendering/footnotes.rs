//! Footnote block rendering.
//!
//! Footnotes pile up on the document while the body is converted. Whenever the
//! pipeline reaches a flush point it calls [`render`], which draws every
//! footnote the session hasn't drawn yet and records them as drawn.
//!
//! ## Numbering
//!
//! Labels count from 1 within each flush: a footnote's label is its index
//! minus the number of footnotes already drawn. When a section is flushed,
//! the label also carries the section's cross reference text (`2 - Section
//! 3.1`) and is stored on the footnote so references to it can show the same
//! label.
//!
//! ## Bottom alignment
//!
//! With `footnotes.margin_top = "auto"` the block sits at the bottom of the
//! page. The block is measured first; if it fits on one page and there's room
//! left below the cursor, the cursor is pushed down by that room so the block
//! ends on the page bottom.

use crate::document::{Document, FlushPoint};
use crate::host::{CaptionCategory, FontScope, ParagraphOptions, Prose, RenderingHost, TextAlign};
use crate::rendering::RenderSession;
use crate::theme::{FootnotesMarginTop, ThemeConfig};
use anyhow::{Context, Result};

/// One footnote ready to draw.
#[derive(Debug, Clone, PartialEq)]
struct FootnoteEntry {
    /// Position in `Document::footnotes`.
    position: usize,
    index: usize,
    label: usize,
    def_anchor: String,
    ref_anchor: String,
    /// Label stored on the footnote after drawing, for section flushes.
    section_label: Option<String>,
    text: String,
}

impl FootnoteEntry {
    /// `[label] text`, anchored so references can jump here and link back.
    fn prose(&self) -> Prose {
        let mut prose = Prose::default();
        prose
            .push_anchor(self.def_anchor.as_str())
            .push_text("[")
            .push_link(self.ref_anchor.as_str(), self.label.to_string())
            .push_text(format!("] {}", self.text));
        prose
    }
}

/// Everything drawn for one flush, so the same content can be measured and
/// then drawn.
#[derive(Debug)]
struct FootnoteBlock {
    title: Option<String>,
    entries: Vec<FootnoteEntry>,
    item_spacing: f32,
}

impl FootnoteBlock {
    fn ink<H: RenderingHost>(&self, host: &mut H) -> Result<()> {
        host.with_themed_font(FontScope::Footnotes, |host| {
            if let Some(title) = &self.title {
                host.draw_caption(title, CaptionCategory::Footnotes)?;
            }

            let options = ParagraphOptions::new(TextAlign::Left)
                .margin_bottom(self.item_spacing)
                .hyphenate(false);
            for entry in &self.entries {
                log::trace!("drawing footnote {} as [{}]", entry.index, entry.label);
                host.draw_paragraph(&entry.prose(), &options)
                    .with_context(|| format!("Failed to draw footnote {}", entry.index))?;
            }
            Ok(())
        })
    }
}

/// Collect the footnotes that still need drawing, in index order.
fn pending_entries(
    node: &FlushPoint<'_>,
    doc: &Document,
    session: &RenderSession,
) -> Vec<FootnoteEntry> {
    let mut pending: Vec<usize> = doc
        .footnotes
        .iter()
        .enumerate()
        .filter(|(_, footnote)| !session.has_rendered(footnote.index))
        .map(|(position, _)| position)
        .collect();
    if pending.is_empty() {
        return Vec::default();
    }
    pending.sort_by_key(|&position| doc.footnotes[position].index);

    let index_offset = session.rendered_footnotes().len();
    let xreftext = node
        .section()
        .map(|section| section.xreftext(doc, doc.xrefstyle()));

    pending
        .into_iter()
        .map(|position| {
            let footnote = &doc.footnotes[position];
            let label = footnote.index.saturating_sub(index_offset);
            FootnoteEntry {
                position,
                index: footnote.index,
                label,
                def_anchor: footnote.def_anchor(),
                ref_anchor: footnote.ref_anchor(),
                section_label: xreftext
                    .as_ref()
                    .map(|xreftext| format!("{label} - {xreftext}")),
                text: footnote.text.clone(),
            }
        })
        .collect()
}

/// Draw the footnotes cited since the last flush.
///
/// Does nothing when there are none. Otherwise draws them through `host`,
/// stores section labels on the footnotes, and records them in `session` so
/// the next flush neither repeats nor renumbers them.
pub fn render<H: RenderingHost>(
    host: &mut H,
    node: &FlushPoint<'_>,
    doc: &mut Document,
    theme: &ThemeConfig,
    session: &mut RenderSession,
) -> Result<()> {
    let entries = pending_entries(node, doc, session);
    if entries.is_empty() {
        log::trace!("no pending footnotes at {node:?}");
        return Ok(());
    }
    log::debug!(
        "flushing {} footnote(s), {} already rendered",
        entries.len(),
        session.rendered_footnotes().len()
    );

    if node.is_document() || node.is_last_child() {
        host.advance(theme.block.margin_bottom);
    }

    let valign_bottom = match theme.footnotes.margin_top {
        FootnotesMarginTop::Auto => true,
        FootnotesMarginTop::Length(margin_top) => {
            host.advance(margin_top);
            false
        }
    };

    let block = FootnoteBlock {
        title: doc.attr("footnotes-title").map(|title| title.into_owned()),
        entries,
        item_spacing: theme.footnotes.item_spacing,
    };

    if valign_bottom {
        let extent = host
            .measure(|scratch| block.ink(scratch))
            .with_context(|| "Failed to measure footnotes")?;
        match extent.and_then(|extent| extent.single_page_height) {
            Some(height) => {
                let delta = host.cursor() - height - theme.footnotes.valign_epsilon;
                if delta > 0.0 {
                    log::debug!("pushing footnotes down by {delta} to the page bottom");
                    host.advance(delta);
                }
            }
            None => log::debug!("footnotes have no single page extent, drawing in place"),
        }
    }

    block
        .ink(host)
        .with_context(|| "Failed to draw footnotes")?;

    for entry in &block.entries {
        if let Some(label) = &entry.section_label {
            doc.footnotes[entry.position].label = Some(label.clone());
        }
    }
    session.mark_rendered(block.entries.iter().map(|entry| entry.index));

    Ok(())
}
