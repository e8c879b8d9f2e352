//! Attribute templates for title page author lines.
//!
//! Templates reference attributes as `{name}`. While an author is formatted,
//! that author's attributes shadow the document's:
//!
//! - `{author}` - full name
//! - `{firstname}`, `{lastname}`, `{authorinitials}`
//! - `{email}` - email address, if any
//! - `{url}` - the author's url, or a `mailto:` link built from the email
//!
//! Any other name is looked up on the document. The primary (first) author is
//! the one the document's own author attributes describe, so for that author
//! explicitly set document attributes win over the author's fields. A line
//! referencing something that isn't set is dropped, so optional parts can sit
//! on their own line.

use crate::document::{Author, Document};
use crate::theme::{AuthorContentKey, TitlePageAuthorsTheme};
use std::borrow::Cow;

/// Attribute lookup for one author, falling through to the document.
pub struct AuthorScope<'a> {
    doc: &'a Document,
    author: &'a Author,
    primary: bool,
    url: Option<String>,
}

impl<'a> AuthorScope<'a> {
    pub fn new(doc: &'a Document, author: &'a Author, primary: bool) -> AuthorScope<'a> {
        AuthorScope {
            doc,
            author,
            primary,
            url: author.contact_url(),
        }
    }

    /// The url the template choice is based on.
    pub fn url(&self) -> Option<&str> {
        self.url.as_deref()
    }

    pub fn attr(&self, name: &str) -> Option<Cow<'a, str>> {
        if self.primary && name != "url" {
            if let Some(value) = self.doc.attributes.get(name) {
                return Some(Cow::Borrowed(value.as_str()));
            }
        }
        match name {
            "author" => Some(Cow::Borrowed(self.author.name.as_str())),
            "firstname" => Some(Cow::Borrowed(self.author.firstname())),
            "lastname" => self.author.lastname().map(Cow::Borrowed),
            "authorinitials" => Some(Cow::Owned(self.author.initials())),
            "email" => self.author.email.as_deref().map(Cow::Borrowed),
            // an author without a url never inherits the document's
            "url" => self.url.clone().map(Cow::Owned),
            _ => self.doc.attr(name),
        }
    }
}

/// Substitute `{name}` references in `template`.
///
/// Lines with a reference `lookup` can't resolve are left out. Braces that
/// don't enclose an attribute name are kept as written.
pub fn expand<'a, F>(template: &str, lookup: F) -> String
where
    F: Fn(&str) -> Option<Cow<'a, str>>,
{
    template
        .lines()
        .filter_map(|line| expand_line(line, &lookup))
        .collect::<Vec<_>>()
        .join("\n")
}

fn is_attribute_name(name: &str) -> bool {
    !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
}

fn expand_line<'a, F>(line: &str, lookup: &F) -> Option<String>
where
    F: Fn(&str) -> Option<Cow<'a, str>>,
{
    let mut out = String::with_capacity(line.len());
    let mut rest = line;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        match after.find('}') {
            Some(close) if is_attribute_name(&after[..close]) => {
                let value = lookup(&after[..close])?;
                out.push_str(&value);
                rest = &after[close + 1..];
            }
            _ => {
                out.push('{');
                rest = after;
            }
        }
    }
    out.push_str(rest);
    Some(out)
}

/// Format one author for the title page. `primary` is set for the first
/// author listed.
///
/// Uses the theme template matching how the author can be reached, then the
/// generic template, then just the name.
pub fn format_author(
    doc: &Document,
    author: &Author,
    primary: bool,
    theme: &TitlePageAuthorsTheme,
) -> String {
    let scope = AuthorScope::new(doc, author, primary);
    let key = AuthorContentKey::for_url(scope.url());
    match theme.content_for(key) {
        Some(template) => expand(template, |name| scope.attr(name)),
        None => author.name.clone(),
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::document::AuthorBuilder;

    fn lookup(name: &str) -> Option<Cow<'static, str>> {
        match name {
            "author" => Some(Cow::Borrowed("Ada")),
            "email" => Some(Cow::Borrowed("ada@example.com")),
            _ => None,
        }
    }

    #[test]
    fn can_expand_template() {
        assert_eq!(expand("{author} <{email}>", lookup), "Ada <ada@example.com>");
        assert_eq!(expand("no references", lookup), "no references");
    }

    #[test]
    fn drops_lines_with_unresolved_attributes() {
        assert_eq!(expand("{author}\n{url}\n{email}", lookup), "Ada\nada@example.com");
        assert_eq!(expand("{url}", lookup), "");
    }

    #[test]
    fn keeps_braces_that_are_not_references() {
        assert_eq!(expand("{ author } {} {author", lookup), "{ author } {} {author");
        assert_eq!(expand("{author}}", lookup), "Ada}");
    }

    #[test]
    fn author_attributes_shadow_document() {
        let mut doc = Document::default();
        doc.set_attribute("author", "Someone Else")
            .set_attribute("url", "https://doc.example")
            .set_attribute("revnumber", "1.0");
        let author = Author::from("Ada Lovelace");
        let scope = AuthorScope::new(&doc, &author, false);

        assert_eq!(scope.attr("author").as_deref(), Some("Ada Lovelace"));
        assert_eq!(scope.attr("lastname").as_deref(), Some("Lovelace"));
        assert_eq!(scope.attr("authorinitials").as_deref(), Some("AL"));
        assert_eq!(scope.attr("url"), None);
        assert_eq!(scope.attr("revnumber").as_deref(), Some("1.0"));
    }

    #[test]
    fn picks_template_by_contact() {
        let doc = Document::default();
        let theme = TitlePageAuthorsTheme {
            content_name_only: Some("{author}".to_string()),
            content_with_email: Some("{author} <{email}>".to_string()),
            content_with_url: Some("{author} ({url})".to_string()),
            ..TitlePageAuthorsTheme::default()
        };

        let plain = Author::from("Ada");
        assert_eq!(format_author(&doc, &plain, true, &theme), "Ada");

        let emailed = AuthorBuilder::default()
            .name("Ada")
            .email("a@b.com")
            .build()
            .unwrap();
        assert_eq!(format_author(&doc, &emailed, true, &theme), "Ada <a@b.com>");

        let linked = AuthorBuilder::default()
            .name("Ada")
            .url("https://x")
            .build()
            .unwrap();
        assert_eq!(format_author(&doc, &linked, true, &theme), "Ada (https://x)");
    }

    #[test]
    fn falls_back_to_generic_template_then_name() {
        let doc = Document::default();
        let author = AuthorBuilder::default()
            .name("Ada Lovelace")
            .email("a@b.com")
            .build()
            .unwrap();

        let mut theme = TitlePageAuthorsTheme::default();
        assert_eq!(format_author(&doc, &author, true, &theme), "Ada Lovelace");

        theme.content = Some("{lastname}, {firstname}".to_string());
        assert_eq!(format_author(&doc, &author, true, &theme), "Lovelace, Ada");
    }

    #[test]
    fn can_reference_every_author_from_a_template() {
        let mut doc = Document::default();
        doc.add_author("Ada Lovelace").add_author("Grace Hopper");
        let theme = TitlePageAuthorsTheme {
            content: Some("{author} of {authors}".to_string()),
            ..TitlePageAuthorsTheme::default()
        };

        assert_eq!(
            format_author(&doc, &doc.authors[0], true, &theme),
            "Ada Lovelace of Ada Lovelace, Grace Hopper"
        );
        assert_eq!(
            format_author(&doc, &doc.authors[1], false, &theme),
            "Grace Hopper of Ada Lovelace, Grace Hopper"
        );
    }

    #[test]
    fn document_attributes_describe_the_primary_author() {
        let mut doc = Document::default();
        doc.set_attribute("email", "team@example.com");
        let author = AuthorBuilder::default()
            .name("Ada")
            .email("ada@example.com")
            .build()
            .unwrap();
        let theme = TitlePageAuthorsTheme {
            content: Some("{author} <{email}>".to_string()),
            ..TitlePageAuthorsTheme::default()
        };

        assert_eq!(
            format_author(&doc, &author, true, &theme),
            "Ada <team@example.com>"
        );
        assert_eq!(
            format_author(&doc, &author, false, &theme),
            "Ada <ada@example.com>"
        );
    }
}
