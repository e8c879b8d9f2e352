//! A host that lays content out on fixed-size pages and records what it drew.
//!
//! Text is set in a monospaced grid: every line is `line_height` tall and holds
//! as many characters as fit the indented width. That is crude next to a real
//! text engine but enough to paginate, measure and check where things land.

use super::{
    normalize_whitespace, CaptionCategory, Extent, FontScope, ParagraphOptions, Prose,
    RenderingHost,
};
use crate::theme::TopPosition;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Page dimensions used by [`TranscriptHost`], in points.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PageGeometry {
    pub content_width: f32,
    pub content_height: f32,
    pub line_height: f32,
    pub char_width: f32,
}

impl Default for PageGeometry {
    /// US Letter with half inch margins, 10pt text.
    fn default() -> Self {
        PageGeometry {
            content_width: 540.0,
            content_height: 720.0,
            line_height: 14.0,
            char_width: 6.0,
        }
    }
}

/// One recorded host operation.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "snake_case", tag = "op")]
pub enum DrawOp {
    Paragraph {
        page: usize,
        /// Cursor where the first line starts.
        top: f32,
        indent_left: f32,
        indent_right: f32,
        font: Option<FontScope>,
        text: String,
        lines: usize,
        anchors: Vec<String>,
        links: Vec<String>,
        options: ParagraphOptions,
    },
    Caption {
        page: usize,
        top: f32,
        font: Option<FontScope>,
        category: CaptionCategory,
        text: String,
    },
    Advance {
        page: usize,
        amount: f32,
    },
    Reposition {
        page: usize,
        cursor: f32,
    },
}

impl DrawOp {
    /// Whether this operation put something visible on the page.
    pub fn is_ink(&self) -> bool {
        matches!(self, DrawOp::Paragraph { .. } | DrawOp::Caption { .. })
    }
}

impl fmt::Display for DrawOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let font_key = |font: &Option<FontScope>| font.map(|s| s.key()).unwrap_or("base");
        match self {
            DrawOp::Paragraph {
                page,
                top,
                indent_left,
                indent_right,
                font,
                text,
                options,
                ..
            } => {
                write!(
                    f,
                    "p{page} @{top:.1} [{}] {:?} indent {indent_left}/{indent_right}: ",
                    font_key(font),
                    options.align
                )?;
                write!(f, "{}", text.replace('\n', "\u{21b5}"))
            }
            DrawOp::Caption {
                page,
                top,
                font,
                category,
                text,
            } => write!(
                f,
                "p{page} @{top:.1} [{}] caption {category:?}: {text}",
                font_key(font)
            ),
            DrawOp::Advance { page, amount } => write!(f, "p{page} advance {amount:.4}"),
            DrawOp::Reposition { page, cursor } => write!(f, "p{page} cursor -> {cursor:.1}"),
        }
    }
}

/// A [`RenderingHost`] that records every operation instead of drawing it.
#[derive(Clone, Debug)]
pub struct TranscriptHost {
    geometry: PageGeometry,
    cursor: f32,
    page: usize,
    indent_left: f32,
    indent_right: f32,
    fonts: Vec<FontScope>,
    ops: Vec<DrawOp>,
}

impl Default for TranscriptHost {
    fn default() -> Self {
        TranscriptHost::new(PageGeometry::default())
    }
}

impl TranscriptHost {
    pub fn new(geometry: PageGeometry) -> TranscriptHost {
        TranscriptHost {
            geometry,
            cursor: geometry.content_height,
            page: 1,
            indent_left: 0.0,
            indent_right: 0.0,
            fonts: Vec::default(),
            ops: Vec::default(),
        }
    }

    pub fn geometry(&self) -> &PageGeometry {
        &self.geometry
    }

    /// 1-based number of the page being drawn on.
    pub fn page(&self) -> usize {
        self.page
    }

    pub fn ops(&self) -> &[DrawOp] {
        &self.ops
    }

    pub fn into_ops(self) -> Vec<DrawOp> {
        self.ops
    }

    /// Number of operations that put something on the page.
    pub fn ink_count(&self) -> usize {
        self.ops.iter().filter(|op| op.is_ink()).count()
    }

    /// Text of every paragraph drawn so far, in order.
    pub fn paragraph_texts(&self) -> Vec<&str> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                DrawOp::Paragraph { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Move to the top of the next page.
    pub fn start_new_page(&mut self) {
        self.page += 1;
        self.cursor = self.geometry.content_height;
    }

    /// Use up `count` lines of space, breaking pages as needed. Stands in for
    /// body text drawn by someone else.
    pub fn fill_lines(&mut self, count: usize) {
        for _ in 0..count {
            self.place(self.geometry.line_height);
        }
    }

    /// A fresh host with the same geometry and styling, at the top of a page.
    fn scratch(&self) -> TranscriptHost {
        TranscriptHost {
            geometry: self.geometry,
            cursor: self.geometry.content_height,
            page: 1,
            indent_left: self.indent_left,
            indent_right: self.indent_right,
            fonts: self.fonts.clone(),
            ops: Vec::default(),
        }
    }

    fn chars_per_line(&self) -> usize {
        let width = self.geometry.content_width - self.indent_left - self.indent_right;
        ((width / self.geometry.char_width).floor() as usize).max(1)
    }

    /// Number of lines `text` wraps to at the current indent.
    fn line_count(&self, text: &str) -> usize {
        let per_line = self.chars_per_line();
        text.split('\n')
            .map(|line| line.chars().count().div_ceil(per_line).max(1))
            .sum()
    }

    /// Start a new page if `height` doesn't fit below the cursor, unless the
    /// page is still empty. Returns the page and cursor the content starts at.
    fn place(&mut self, height: f32) -> (usize, f32) {
        if height > self.cursor && self.cursor < self.geometry.content_height {
            log::trace!("page {} full, starting page {}", self.page, self.page + 1);
            self.page += 1;
            self.cursor = self.geometry.content_height;
        }
        let top = self.cursor;
        self.cursor = (self.cursor - height).max(0.0);
        (self.page, top)
    }
}

impl RenderingHost for TranscriptHost {
    fn cursor(&self) -> f32 {
        self.cursor
    }

    fn set_cursor(&mut self, y: f32) {
        self.cursor = y.clamp(0.0, self.geometry.content_height);
        self.ops.push(DrawOp::Reposition {
            page: self.page,
            cursor: self.cursor,
        });
    }

    fn advance(&mut self, amount: f32) {
        if amount == 0.0 {
            return;
        }
        self.cursor = (self.cursor - amount).max(0.0);
        self.ops.push(DrawOp::Advance {
            page: self.page,
            amount,
        });
    }

    fn measure<F>(&mut self, content: F) -> Result<Option<Extent>>
    where
        F: FnOnce(&mut Self) -> Result<()>,
    {
        let mut scratch = self.scratch();
        content(&mut scratch)?;

        let single_page_height = if scratch.page == 1 {
            Some(scratch.geometry.content_height - scratch.cursor)
        } else {
            None
        };
        Ok(Some(Extent { single_page_height }))
    }

    fn with_themed_font<R, F>(&mut self, scope: FontScope, f: F) -> Result<R>
    where
        F: FnOnce(&mut Self) -> Result<R>,
    {
        self.fonts.push(scope);
        let result = f(self);
        self.fonts.pop();
        result
    }

    fn with_indent<R, F>(&mut self, left: f32, right: f32, f: F) -> Result<R>
    where
        F: FnOnce(&mut Self) -> Result<R>,
    {
        self.indent_left += left;
        self.indent_right += right;
        let result = f(self);
        self.indent_left -= left;
        self.indent_right -= right;
        result
    }

    fn draw_paragraph(&mut self, prose: &Prose, options: &ParagraphOptions) -> Result<()> {
        let text = if options.normalize {
            normalize_whitespace(&prose.plain_text())
        } else {
            prose.plain_text()
        };
        let lines = self.line_count(&text);
        let (page, top) = self.place(lines as f32 * self.geometry.line_height);
        self.cursor = (self.cursor - options.margin_bottom).max(0.0);

        self.ops.push(DrawOp::Paragraph {
            page,
            top,
            indent_left: self.indent_left,
            indent_right: self.indent_right,
            font: self.fonts.last().copied(),
            text,
            lines,
            anchors: prose.anchors().map(ToString::to_string).collect(),
            links: prose.link_targets().map(ToString::to_string).collect(),
            options: *options,
        });
        Ok(())
    }

    fn draw_caption(&mut self, text: &str, category: CaptionCategory) -> Result<()> {
        let lines = self.line_count(text);
        let (page, top) = self.place(lines as f32 * self.geometry.line_height);
        self.ops.push(DrawOp::Caption {
            page,
            top,
            font: self.fonts.last().copied(),
            category,
            text: text.to_string(),
        });
        Ok(())
    }

    fn resolve_top(&self, position: TopPosition) -> f32 {
        let height = self.geometry.content_height;
        let from_top = match position {
            TopPosition::Percent(percent) => height * percent / 100.0,
            TopPosition::Length(length) => length,
        };
        (height - from_top).clamp(0.0, height)
    }
}
