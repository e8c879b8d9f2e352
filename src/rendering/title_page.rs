//! Title page rendering.
//!
//! The title page is a stack of up to four blocks, top to bottom: title,
//! subtitle, authors and revision. Each block can be hidden with
//! `display = "none"` and has its own margins in the theme:
//!
//! ```toml
//! [title_page.authors]
//! margin_top = 12
//! margin_left = 36
//! ```
//!
//! Top and bottom margins move the cursor before and after the block; left and
//! right margins indent it. All blocks share one alignment,
//! `title_page.text_align`, falling back to `base.text_align`.
//!
//! ## Line Breaks
//!
//! Title and subtitle often come from single-line attributes, so a literal
//! `\n` in them becomes a real line break, and those blocks are drawn without
//! whitespace normalization to keep the breaks. The author line is normalized.
//!
//! ## Revision Line
//!
//! `Version 2.0, 2024-01-01: draft`: the version label and `revnumber`, then
//! `revdate`, joined by `title_page.revision.delimiter`, with `revremark`
//! appended after a colon.

use crate::document::Document;
use crate::host::{FontScope, ParagraphOptions, Prose, RenderingHost};
use crate::rendering::{template, unescape_line_breaks};
use crate::theme::{ThemeConfig, TitlePageBlockTheme};
use anyhow::{Context, Result};

/// Draw one title page block: margins, indent, font scope, paragraph.
fn ink_block<H: RenderingHost>(
    host: &mut H,
    block: &TitlePageBlockTheme,
    font: FontScope,
    text: String,
    options: ParagraphOptions,
) -> Result<()> {
    host.advance(block.margin_top);
    host.with_indent(block.margin_left, block.margin_right, |host| {
        host.with_themed_font(font, |host| host.draw_paragraph(&Prose::from(text), &options))
    })?;
    host.advance(block.margin_bottom);
    Ok(())
}

/// The authors line, or `None` when there are no authors.
pub fn authors_text(doc: &Document, theme: &ThemeConfig) -> Option<String> {
    if doc.authors.is_empty() {
        return None;
    }
    let authors = &theme.title_page.authors;
    Some(
        doc.authors
            .iter()
            .enumerate()
            .map(|(i, author)| template::format_author(doc, author, i == 0, authors))
            .collect::<Vec<String>>()
            .join(&authors.delimiter),
    )
}

/// The revision line, or `None` when there's neither a revision number nor date.
pub fn revision_text(doc: &Document, theme: &ThemeConfig) -> Option<String> {
    let mut parts: Vec<String> = Vec::with_capacity(2);
    if let Some(revnumber) = doc.attr("revnumber") {
        match doc.attr("version-label") {
            Some(label) if !label.is_empty() => parts.push(format!("{label} {revnumber}")),
            _ => parts.push(revnumber.to_string()),
        }
    }
    if let Some(revdate) = doc.attr("revdate") {
        parts.push(revdate.to_string());
    }
    if parts.is_empty() {
        return None;
    }

    let mut text = parts.join(&theme.title_page.revision.delimiter);
    if let Some(revremark) = doc.attr("revremark") {
        text = format!("{text}: {revremark}");
    }
    Some(text)
}

/// Draw the title page.
///
/// Draws onto wherever the host's cursor is, or at `title_page.title_top` if
/// the theme sets it. Calling this twice draws everything twice.
pub fn render<H: RenderingHost>(host: &mut H, doc: &Document, theme: &ThemeConfig) -> Result<()> {
    let align = theme.title_page_text_align();
    let title_page = &theme.title_page;
    let keep_breaks = ParagraphOptions::new(align).normalize(false);

    host.with_themed_font(FontScope::TitlePage, |host| {
        if let Some(title_top) = title_page.title_top {
            let y = host.resolve_top(title_top);
            host.set_cursor(y);
        }

        match doc.title_text() {
            Some(title) if !title_page.title.is_hidden() => {
                ink_block(
                    host,
                    &title_page.title,
                    FontScope::TitlePageTitle,
                    unescape_line_breaks(&title),
                    keep_breaks,
                )
                .with_context(|| "Failed to draw title")?;
            }
            _ => log::debug!("title page: no title to draw"),
        }

        match doc.subtitle_text() {
            Some(subtitle) if !title_page.subtitle.is_hidden() => {
                ink_block(
                    host,
                    &title_page.subtitle,
                    FontScope::TitlePageSubtitle,
                    unescape_line_breaks(&subtitle),
                    keep_breaks,
                )
                .with_context(|| "Failed to draw subtitle")?;
            }
            _ => log::debug!("title page: no subtitle to draw"),
        }

        match authors_text(doc, theme) {
            Some(authors) if !title_page.authors.block.is_hidden() => {
                ink_block(
                    host,
                    &title_page.authors.block,
                    FontScope::TitlePageAuthors,
                    authors,
                    ParagraphOptions::new(align),
                )
                .with_context(|| "Failed to draw authors")?;
            }
            _ => log::debug!("title page: no authors to draw"),
        }

        match revision_text(doc, theme) {
            Some(revision) if !title_page.revision.block.is_hidden() => {
                ink_block(
                    host,
                    &title_page.revision.block,
                    FontScope::TitlePageRevision,
                    revision,
                    keep_breaks,
                )
                .with_context(|| "Failed to draw revision")?;
            }
            _ => log::debug!("title page: no revision to draw"),
        }

        Ok(())
    })
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::document::{Author, AuthorBuilder};
    use crate::host::{DrawOp, PageGeometry, TextAlign, TranscriptHost};
    use crate::theme::{BlockDisplay, TopPosition};

    fn host() -> TranscriptHost {
        TranscriptHost::new(PageGeometry {
            content_width: 600.0,
            content_height: 400.0,
            line_height: 10.0,
            char_width: 6.0,
        })
    }

    fn full_doc() -> Document {
        let mut doc = Document::default();
        doc.set_title("The Book: A Subtitle")
            .add_author(Author::from("Ada Lovelace"))
            .add_author(
                AuthorBuilder::default()
                    .name("Grace Hopper")
                    .email("grace@example.com")
                    .build()
                    .unwrap(),
            )
            .set_attribute("revnumber", "2.0")
            .set_attribute("revdate", "2024-01-01")
            .set_attribute("revremark", "draft");
        doc
    }

    fn hidden_theme() -> ThemeConfig {
        let mut theme = ThemeConfig::default();
        theme.title_page.title.display = BlockDisplay::Hidden;
        theme.title_page.subtitle.display = BlockDisplay::Hidden;
        theme.title_page.authors.block.display = BlockDisplay::Hidden;
        theme.title_page.revision.block.display = BlockDisplay::Hidden;
        theme
    }

    fn paragraph_fonts(host: &TranscriptHost) -> Vec<Option<FontScope>> {
        host.ops()
            .iter()
            .filter_map(|op| match op {
                DrawOp::Paragraph { font, .. } => Some(*font),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn renders_all_blocks_in_order() {
        let mut host = host();
        render(&mut host, &full_doc(), &ThemeConfig::default()).unwrap();

        assert_eq!(
            host.paragraph_texts(),
            vec![
                "The Book",
                "A Subtitle",
                "Ada Lovelace, Grace Hopper",
                "Version 2.0, 2024-01-01: draft",
            ]
        );
        assert_eq!(
            paragraph_fonts(&host),
            vec![
                Some(FontScope::TitlePageTitle),
                Some(FontScope::TitlePageSubtitle),
                Some(FontScope::TitlePageAuthors),
                Some(FontScope::TitlePageRevision),
            ]
        );
    }

    #[test]
    fn revision_line_matches_expected_format() {
        let mut doc = Document::default();
        doc.set_attribute("revnumber", "2.0")
            .set_attribute("revdate", "2024-01-01")
            .set_attribute("revremark", "draft")
            .set_attribute("version-label", "Version");
        assert_eq!(
            revision_text(&doc, &ThemeConfig::default()).as_deref(),
            Some("Version 2.0, 2024-01-01: draft")
        );
    }

    #[test]
    fn revision_line_with_partial_info() {
        let theme = ThemeConfig::default();
        let mut doc = Document::default();
        assert_eq!(revision_text(&doc, &theme), None);

        // a remark alone is not enough
        doc.set_attribute("revremark", "draft");
        assert_eq!(revision_text(&doc, &theme), None);

        doc.set_attribute("revdate", "2024-01-01");
        assert_eq!(
            revision_text(&doc, &theme).as_deref(),
            Some("2024-01-01: draft")
        );

        let mut doc = Document::default();
        doc.set_attribute("revnumber", "3").set_attribute("version-label", "");
        assert_eq!(revision_text(&doc, &theme).as_deref(), Some("3"));
    }

    #[test]
    fn revision_delimiter_is_configurable() {
        let mut theme = ThemeConfig::default();
        theme.title_page.revision.delimiter = " | ".to_string();
        let doc = full_doc();
        assert_eq!(
            revision_text(&doc, &theme).as_deref(),
            Some("Version 2.0 | 2024-01-01: draft")
        );
    }

    #[test]
    fn literal_line_breaks_become_real_ones() {
        let mut host = host();
        let mut doc = Document::default();
        doc.set_title("Line One\\nLine Two");
        render(&mut host, &doc, &ThemeConfig::default()).unwrap();

        match &host.ops()[0] {
            DrawOp::Paragraph {
                text,
                lines,
                options,
                ..
            } => {
                assert_eq!(text, "Line One\nLine Two");
                assert!(!text.contains("\\n"));
                assert_eq!(*lines, 2);
                assert!(!options.normalize);
            }
            op => panic!("unexpected op: {op:?}"),
        }
    }

    #[test]
    fn subtitle_line_breaks_become_real_ones() {
        let mut doc = Document::default();
        doc.set_title("T").set_attribute("thesubtitle", "a\\nb");
        let mut host = host();
        render(&mut host, &doc, &ThemeConfig::default()).unwrap();
        assert_eq!(host.paragraph_texts(), vec!["T", "a\nb"]);
    }

    #[test]
    fn all_hidden_draws_nothing() {
        let mut host = host();
        render(&mut host, &full_doc(), &hidden_theme()).unwrap();
        assert!(host.ops().is_empty(), "unexpected ops: {:?}", host.ops());
    }

    #[test]
    fn missing_content_skips_blocks() {
        let mut host = host();
        let mut doc = Document::default();
        doc.set_title("Only A Title");
        render(&mut host, &doc, &ThemeConfig::default()).unwrap();
        assert_eq!(host.paragraph_texts(), vec!["Only A Title"]);
    }

    #[test]
    fn blocks_apply_margins_and_indents() {
        let mut theme = hidden_theme();
        theme.title_page.authors.block = TitlePageBlockTheme {
            display: BlockDisplay::Shown,
            margin_top: 20.0,
            margin_bottom: 5.0,
            margin_left: 30.0,
            margin_right: 10.0,
        };
        let mut host = host();
        render(&mut host, &full_doc(), &theme).unwrap();

        match &host.ops()[..] {
            [DrawOp::Advance { amount: top, .. }, DrawOp::Paragraph {
                top: paragraph_top,
                indent_left,
                indent_right,
                ..
            }, DrawOp::Advance { amount: bottom, .. }] => {
                assert_eq!(*top, 20.0);
                assert_eq!(*paragraph_top, 380.0);
                assert_eq!(*indent_left, 30.0);
                assert_eq!(*indent_right, 10.0);
                assert_eq!(*bottom, 5.0);
            }
            ops => panic!("unexpected ops: {ops:?}"),
        }
        assert_eq!(host.cursor(), 365.0);
    }

    #[test]
    fn title_top_repositions_before_title() {
        let mut theme = ThemeConfig::default();
        theme.title_page.title_top = Some(TopPosition::Percent(25.0));
        let mut doc = Document::default();
        doc.set_title("Positioned");
        let mut host = host();
        render(&mut host, &doc, &theme).unwrap();

        assert_eq!(
            host.ops()[0],
            DrawOp::Reposition {
                page: 1,
                cursor: 300.0
            }
        );
        assert!(matches!(host.ops()[1], DrawOp::Paragraph { top, .. } if top == 300.0));
        assert_eq!(
            host.ops()
                .iter()
                .filter(|op| matches!(op, DrawOp::Reposition { .. }))
                .count(),
            1
        );
    }

    #[test]
    fn alignment_falls_back_to_base() {
        let mut theme = ThemeConfig::default();
        theme.base.text_align = TextAlign::Right;
        assert_eq!(theme.title_page_text_align(), TextAlign::Right);

        theme.title_page.text_align = Some(TextAlign::Center);
        assert_eq!(theme.title_page_text_align(), TextAlign::Center);

        let mut host = host();
        render(&mut host, &full_doc(), &theme).unwrap();
        assert!(host.ops().iter().all(|op| match op {
            DrawOp::Paragraph { options, .. } => options.align == TextAlign::Center,
            _ => true,
        }));
    }

    #[test]
    fn author_line_is_normalized() {
        let mut theme = ThemeConfig::default();
        theme.title_page.authors.content = Some("{author}\n{email}".to_string());
        let mut doc = full_doc();
        doc.set_title("T");
        let mut host = host();
        render(&mut host, &doc, &theme).unwrap();

        assert_eq!(
            authors_text(&doc, &theme).as_deref(),
            Some("Ada Lovelace, Grace Hopper\ngrace@example.com")
        );
        assert!(host
            .paragraph_texts()
            .contains(&"Ada Lovelace, Grace Hopper grace@example.com"));
    }
}
