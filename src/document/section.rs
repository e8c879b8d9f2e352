//! Sections and the points at which footnotes get flushed.

use super::Document;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::str::FromStr;

/// How a cross reference to a section is worded.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum XrefStyle {
    /// `Section 2.1, "Title"`
    Full,
    /// `Section 2.1`
    Short,
    /// `Title`
    Basic,
}

impl FromStr for XrefStyle {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "full" => Ok(XrefStyle::Full),
            "short" => Ok(XrefStyle::Short),
            "basic" => Ok(XrefStyle::Basic),
            _ => Err(()),
        }
    }
}

/// A titled section of the document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    pub title: String,
    /// Section level, 1 being the top level below the document title.
    #[serde(default = "default_level")]
    pub level: u8,
    /// Section number, e.g. `2.1`, when sections are numbered.
    #[serde(default)]
    pub sectnum: Option<String>,
    /// Explicit cross reference text, used verbatim regardless of style.
    #[serde(default)]
    pub reftext: Option<String>,
}

fn default_level() -> u8 {
    1
}

impl Section {
    pub fn new<S: Into<String>>(title: S) -> Section {
        Section {
            title: title.into(),
            level: default_level(),
            sectnum: None,
            reftext: None,
        }
    }

    pub fn numbered<S: Into<String>>(mut self, sectnum: S) -> Section {
        self.sectnum = Some(sectnum.into());
        self
    }

    pub fn at_level(mut self, level: u8) -> Section {
        self.level = level;
        self
    }

    /// The word a numbered reference starts with ("Section", "Chapter").
    ///
    /// Top-level sections of a book are chapters.
    pub fn refsig<'d>(&self, doc: &'d Document) -> Option<Cow<'d, str>> {
        if self.level == 1 && doc.attr("doctype").as_deref() == Some("book") {
            doc.attr("chapter-refsig")
        } else {
            doc.attr("section-refsig")
        }
    }

    /// Text used when something refers to this section.
    pub fn xreftext(&self, doc: &Document, style: Option<XrefStyle>) -> String {
        if let Some(reftext) = &self.reftext {
            return reftext.clone();
        }

        let Some(sectnum) = &self.sectnum else {
            return self.title.clone();
        };
        let signified = match self.refsig(doc) {
            Some(refsig) if !refsig.is_empty() => format!("{refsig} {sectnum}"),
            _ => sectnum.clone(),
        };

        match style {
            Some(XrefStyle::Full) => format!("{signified}, \"{}\"", self.title),
            Some(XrefStyle::Short) => signified,
            Some(XrefStyle::Basic) | None => self.title.clone(),
        }
    }
}

/// Where in the document a footnote flush is happening.
#[derive(Debug, Clone, Copy)]
pub enum FlushPoint<'a> {
    /// End of the whole document.
    Document,
    /// End of a section.
    Section { section: &'a Section, last: bool },
    /// After some other block.
    Block { last: bool },
}

impl<'a> FlushPoint<'a> {
    pub fn is_document(&self) -> bool {
        matches!(self, FlushPoint::Document)
    }

    /// Whether this is the last top-level block of the document.
    pub fn is_last_child(&self) -> bool {
        match self {
            FlushPoint::Document => false,
            FlushPoint::Section { last, .. } | FlushPoint::Block { last } => *last,
        }
    }

    pub fn section(&self) -> Option<&'a Section> {
        match self {
            FlushPoint::Section { section, .. } => Some(section),
            _ => None,
        }
    }
}
