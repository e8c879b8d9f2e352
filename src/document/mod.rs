//! The parsed document as seen by the renderers.
//!
//! Everything here is produced by the surrounding pipeline while it converts
//! the document body. The renderers only read it, apart from the display label
//! the footnote renderer attaches to footnotes flushed at a section boundary.

mod author;
pub use author::*;

mod footnote;
pub use footnote::*;

mod section;
pub use section::*;

use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::collections::BTreeMap;

/// Attribute values that apply when the document doesn't set them.
const DEFAULT_ATTRIBUTES: &[(&str, &str)] = &[
    ("version-label", "Version"),
    ("section-refsig", "Section"),
    ("chapter-refsig", "Chapter"),
    ("title-separator", ":"),
];

/// A document title split into its main title and subtitle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocTitle {
    pub main: String,
    pub subtitle: Option<String>,
}

impl DocTitle {
    /// Split `title` at the last occurrence of `separator` followed by a space.
    pub fn partition(title: &str, separator: &str) -> DocTitle {
        let needle = format!("{separator} ");
        match title.rfind(&needle) {
            Some(at) if !separator.is_empty() => DocTitle {
                main: title[..at].to_string(),
                subtitle: Some(title[at + needle.len()..].to_string()),
            },
            _ => DocTitle {
                main: title.to_string(),
                subtitle: None,
            },
        }
    }
}

/// Everything the renderers need to know about the document being converted.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Document {
    /// The full document title, including any subtitle
    #[serde(default)]
    pub doctitle: Option<String>,

    /// The authors, in the order they were listed. The first is the primary author.
    #[serde(default)]
    pub authors: Vec<Author>,

    /// Named document attributes (`revnumber`, `xrefstyle`, `footnotes-title`, ...)
    #[serde(default)]
    pub attributes: BTreeMap<String, String>,

    /// Footnotes in citation order
    #[serde(default)]
    pub footnotes: Vec<Footnote>,
}

impl Document {
    pub fn set_title<S: ToString>(&mut self, title: S) -> &mut Self {
        self.doctitle = Some(title.to_string());
        self
    }

    pub fn add_author<A: Into<Author>>(&mut self, author: A) -> &mut Self {
        self.authors.push(author.into());
        self
    }

    pub fn set_attribute<K: ToString, V: ToString>(&mut self, name: K, value: V) -> &mut Self {
        self.attributes.insert(name.to_string(), value.to_string());
        self
    }

    pub fn remove_attribute(&mut self, name: &str) -> &mut Self {
        self.attributes.remove(name);
        self
    }

    /// Record a newly cited footnote and return its index.
    pub fn register_footnote<S: Into<String>>(&mut self, text: S) -> usize {
        let index = self.footnotes.last().map(|f| f.index).unwrap_or(0) + 1;
        self.footnotes.push(Footnote::new(index, text));
        index
    }

    /// Look up an attribute.
    ///
    /// Explicit attributes win, then the ones derived from the authors, then
    /// the built-in defaults.
    pub fn attr(&self, name: &str) -> Option<Cow<'_, str>> {
        if let Some(value) = self.attributes.get(name) {
            return Some(Cow::Borrowed(value.as_str()));
        }
        if let Some(value) = self.author_attr(name) {
            return Some(value);
        }
        DEFAULT_ATTRIBUTES
            .iter()
            .find(|(key, _)| *key == name)
            .map(|(_, value)| Cow::Borrowed(*value))
    }

    /// `authors` lists every name; the rest describe the first author.
    fn author_attr(&self, name: &str) -> Option<Cow<'_, str>> {
        if name == "authors" {
            if self.authors.is_empty() {
                return None;
            }
            let names: Vec<&str> = self.authors.iter().map(|a| a.name.as_str()).collect();
            return Some(Cow::Owned(names.join(", ")));
        }

        let primary = self.authors.first()?;
        match name {
            "author" => Some(Cow::Borrowed(primary.name.as_str())),
            "email" => primary.email.as_deref().map(Cow::Borrowed),
            "firstname" => Some(Cow::Borrowed(primary.firstname())),
            "lastname" => primary.lastname().map(Cow::Borrowed),
            "authorinitials" => Some(Cow::Owned(primary.initials())),
            _ => None,
        }
    }

    pub fn has_attr(&self, name: &str) -> bool {
        self.attr(name).is_some()
    }

    /// The document title partitioned into main title and subtitle.
    pub fn doctitle(&self) -> Option<DocTitle> {
        let separator = self.attr("title-separator");
        let separator = separator.as_deref().unwrap_or(":");
        self.doctitle
            .as_deref()
            .map(|title| DocTitle::partition(title, separator))
    }

    /// The title as shown on the title page; the `thetitle` attribute overrides.
    pub fn title_text(&self) -> Option<String> {
        self.attr("thetitle")
            .map(Cow::into_owned)
            .or_else(|| self.doctitle().map(|title| title.main))
    }

    /// The subtitle as shown on the title page; the `thesubtitle` attribute overrides.
    pub fn subtitle_text(&self) -> Option<String> {
        self.attr("thesubtitle")
            .map(Cow::into_owned)
            .or_else(|| self.doctitle().and_then(|title| title.subtitle))
    }

    /// The cross reference style configured by the `xrefstyle` attribute.
    pub fn xrefstyle(&self) -> Option<XrefStyle> {
        let style = self.attr("xrefstyle")?;
        match style.parse() {
            Ok(style) => Some(style),
            Err(()) => {
                log::warn!("ignoring unknown xrefstyle '{style}'");
                None
            }
        }
    }
}
