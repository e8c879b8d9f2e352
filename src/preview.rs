//! Preview jobs: a document with some sections and their footnotes, run
//! through both renderers against a [`TranscriptHost`].

use crate::document::{Document, FlushPoint, Footnote, Section};
use crate::host::{DrawOp, PageGeometry, TranscriptHost};
use crate::rendering::{footnotes, title_page, RenderSession};
use crate::theme::ThemeConfig;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Where footnotes get flushed during a preview.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlushMode {
    /// After every section, and again at the end of the document.
    #[default]
    Section,
    /// Only at the end of the document.
    Document,
}

/// One section of body text in a preview job.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PreviewSection {
    #[serde(flatten)]
    pub section: Section,
    /// Lines of body text the section takes up before its footnotes.
    #[serde(default)]
    pub body_lines: usize,
    /// Footnotes cited in the section, in citation order.
    #[serde(default)]
    pub footnotes: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PreviewJob {
    pub document: Document,
    #[serde(default)]
    pub sections: Vec<PreviewSection>,
    #[serde(default)]
    pub flush: FlushMode,
    #[serde(default)]
    pub page: PageGeometry,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub theme: Option<ThemeConfig>,
}

/// What a preview produced.
#[derive(Debug, Clone, Serialize)]
pub struct PreviewOutcome {
    pub ops: Vec<DrawOp>,
    /// Footnotes as they ended up after rendering, labels included.
    pub footnotes: Vec<Footnote>,
    pub pages: usize,
}

impl PreviewJob {
    pub fn from_toml_str(contents: &str) -> Result<PreviewJob> {
        toml::from_str(contents).with_context(|| "Failed to parse preview job TOML")
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<PreviewJob> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to load preview job {}", path.display()))?;
        Self::from_toml_str(&contents)
            .with_context(|| format!("Failed to read preview job {}", path.display()))
    }

    /// Render the title page on page one, then the sections from page two,
    /// flushing footnotes as `flush` says.
    ///
    /// `theme` takes precedence over the job's own theme table.
    pub fn run(self, theme: Option<ThemeConfig>) -> Result<PreviewOutcome> {
        let PreviewJob {
            mut document,
            sections,
            flush,
            page,
            theme: job_theme,
        } = self;
        let theme = theme.or(job_theme).unwrap_or_default();

        let mut host = TranscriptHost::new(page);
        let mut session = RenderSession::new();

        title_page::render(&mut host, &document, &theme)
            .with_context(|| "Failed to render title page")?;
        host.start_new_page();

        let count = sections.len();
        for (i, preview) in sections.iter().enumerate() {
            log::debug!("section {}: {}", i + 1, preview.section.title);
            host.fill_lines(preview.body_lines);
            for text in &preview.footnotes {
                document.register_footnote(text.as_str());
            }

            if flush == FlushMode::Section {
                let node = FlushPoint::Section {
                    section: &preview.section,
                    last: i + 1 == count,
                };
                footnotes::render(&mut host, &node, &mut document, &theme, &mut session)
                    .with_context(|| {
                        format!("Failed to render footnotes for {}", preview.section.title)
                    })?;
            }
        }

        footnotes::render(
            &mut host,
            &FlushPoint::Document,
            &mut document,
            &theme,
            &mut session,
        )
        .with_context(|| "Failed to render footnotes at document end")?;

        let pages = host.page();
        Ok(PreviewOutcome {
            ops: host.into_ops(),
            footnotes: document.footnotes,
            pages,
        })
    }
}
