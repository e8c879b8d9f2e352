//! Theme configuration consumed by the renderers.
//!
//! Theme keys are dotted names (`title_page.title.margin_top`). Here they map
//! onto nested TOML tables, so `title_page.title.margin_top` lives under
//! `[title_page.title]`. Every key has a default; a theme file only needs to
//! mention what it changes. Lengths are in points.

use crate::host::TextAlign;
use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// A number, or a string holding a keyword or a percentage.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
enum RawValue {
    Number(f32),
    Text(String),
}

/// Space above the footnotes block.
#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawValue", into = "RawValue")]
pub enum FootnotesMarginTop {
    /// Pin the block to the bottom of the page instead of spacing it.
    #[default]
    Auto,
    Length(f32),
}

impl TryFrom<RawValue> for FootnotesMarginTop {
    type Error = anyhow::Error;

    fn try_from(value: RawValue) -> Result<Self, Self::Error> {
        match value {
            RawValue::Number(n) => Ok(FootnotesMarginTop::Length(n)),
            RawValue::Text(s) if s.trim() == "auto" => Ok(FootnotesMarginTop::Auto),
            RawValue::Text(s) => s
                .trim()
                .parse()
                .map(FootnotesMarginTop::Length)
                .map_err(|_| anyhow!("expected a length or 'auto', found '{s}'")),
        }
    }
}

impl From<FootnotesMarginTop> for RawValue {
    fn from(value: FootnotesMarginTop) -> Self {
        match value {
            FootnotesMarginTop::Auto => RawValue::Text("auto".to_string()),
            FootnotesMarginTop::Length(n) => RawValue::Number(n),
        }
    }
}

/// Where the title page content starts, measured down from the top of the page.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawValue", into = "RawValue")]
pub enum TopPosition {
    /// Percentage of the content height, e.g. `"40%"`.
    Percent(f32),
    /// Fixed distance.
    Length(f32),
}

impl TryFrom<RawValue> for TopPosition {
    type Error = anyhow::Error;

    fn try_from(value: RawValue) -> Result<Self, Self::Error> {
        match value {
            RawValue::Number(n) => Ok(TopPosition::Length(n)),
            RawValue::Text(s) => {
                let trimmed = s.trim();
                let parsed = match trimmed.strip_suffix('%') {
                    Some(percent) => percent.trim().parse().map(TopPosition::Percent),
                    None => trimmed.parse().map(TopPosition::Length),
                };
                parsed.map_err(|_| anyhow!("expected a length or percentage, found '{s}'"))
            }
        }
    }
}

impl From<TopPosition> for RawValue {
    fn from(value: TopPosition) -> Self {
        match value {
            TopPosition::Percent(p) => RawValue::Text(format!("{p}%")),
            TopPosition::Length(n) => RawValue::Number(n),
        }
    }
}

/// Whether a title page block is drawn.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum BlockDisplay {
    #[default]
    #[serde(rename = "block")]
    Shown,
    #[serde(rename = "none")]
    Hidden,
}

/// Document-wide defaults.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BaseTheme {
    pub text_align: TextAlign,
}

impl Default for BaseTheme {
    fn default() -> Self {
        BaseTheme {
            text_align: TextAlign::Justify,
        }
    }
}

/// Spacing shared by all blocks.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BlockTheme {
    pub margin_bottom: f32,
}

impl Default for BlockTheme {
    fn default() -> Self {
        BlockTheme {
            margin_bottom: 12.0,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FootnotesTheme {
    pub margin_top: FootnotesMarginTop,
    /// Space below each footnote.
    pub item_spacing: f32,
    /// Slack subtracted when pushing a bottom-aligned block down, so it never
    /// lands a rounding error past the page bottom.
    pub valign_epsilon: f32,
}

impl Default for FootnotesTheme {
    fn default() -> Self {
        FootnotesTheme {
            margin_top: FootnotesMarginTop::Auto,
            item_spacing: 3.0,
            valign_epsilon: 0.0001,
        }
    }
}

/// Placement of one title page block. Missing margins are zero.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TitlePageBlockTheme {
    pub display: BlockDisplay,
    pub margin_top: f32,
    pub margin_bottom: f32,
    pub margin_left: f32,
    pub margin_right: f32,
}

impl TitlePageBlockTheme {
    pub fn is_hidden(&self) -> bool {
        self.display == BlockDisplay::Hidden
    }
}

/// Which author content template applies to an author.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum AuthorContentKey {
    NameOnly,
    WithEmail,
    WithUrl,
}

impl AuthorContentKey {
    /// Pick the template for an author reachable at `url`.
    pub fn for_url(url: Option<&str>) -> AuthorContentKey {
        match url {
            None => AuthorContentKey::NameOnly,
            Some(url) if url.starts_with("mailto:") => AuthorContentKey::WithEmail,
            Some(_) => AuthorContentKey::WithUrl,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TitlePageAuthorsTheme {
    #[serde(flatten)]
    pub block: TitlePageBlockTheme,
    pub delimiter: String,
    /// Template used when no contact-specific template is set.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_name_only: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_with_email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_with_url: Option<String>,
}

impl Default for TitlePageAuthorsTheme {
    fn default() -> Self {
        TitlePageAuthorsTheme {
            block: TitlePageBlockTheme::default(),
            delimiter: ", ".to_string(),
            content: None,
            content_name_only: None,
            content_with_email: None,
            content_with_url: None,
        }
    }
}

impl TitlePageAuthorsTheme {
    /// The template for `key`, falling back to the generic one.
    pub fn content_for(&self, key: AuthorContentKey) -> Option<&str> {
        let specific = match key {
            AuthorContentKey::NameOnly => &self.content_name_only,
            AuthorContentKey::WithEmail => &self.content_with_email,
            AuthorContentKey::WithUrl => &self.content_with_url,
        };
        specific.as_deref().or(self.content.as_deref())
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TitlePageRevisionTheme {
    #[serde(flatten)]
    pub block: TitlePageBlockTheme,
    pub delimiter: String,
}

impl Default for TitlePageRevisionTheme {
    fn default() -> Self {
        TitlePageRevisionTheme {
            block: TitlePageBlockTheme::default(),
            delimiter: ", ".to_string(),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TitlePageTheme {
    /// Alignment of every block; the base alignment applies when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_align: Option<TextAlign>,
    /// Where the title starts. Unset leaves the cursor where it is.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title_top: Option<TopPosition>,
    pub title: TitlePageBlockTheme,
    pub subtitle: TitlePageBlockTheme,
    pub authors: TitlePageAuthorsTheme,
    pub revision: TitlePageRevisionTheme,
}

/// All theme settings the renderers read.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThemeConfig {
    pub base: BaseTheme,
    pub block: BlockTheme,
    pub footnotes: FootnotesTheme,
    pub title_page: TitlePageTheme,
}

impl ThemeConfig {
    pub fn from_toml_str(contents: &str) -> Result<ThemeConfig> {
        toml::from_str(contents).with_context(|| "Failed to parse theme TOML")
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<ThemeConfig> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to load theme {}", path.display()))?;
        Self::from_toml_str(&contents)
            .with_context(|| format!("Failed to read theme {}", path.display()))
    }

    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string(self).with_context(|| "Failed to serialize theme")
    }

    /// Alignment for every title page block.
    pub fn title_page_text_align(&self) -> TextAlign {
        self.title_page.text_align.unwrap_or(self.base.text_align)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn can_serialize_theme() {
        let theme = ThemeConfig::default();
        let toml = theme.to_toml_string().expect("can serialize theme to TOML");
        let parsed = ThemeConfig::from_toml_str(&toml).expect("can parse serialized theme");
        assert_eq!(parsed, theme);
    }

    #[test]
    fn empty_theme_uses_defaults() {
        let theme = ThemeConfig::from_toml_str("").expect("can parse empty theme");
        assert_eq!(theme, ThemeConfig::default());
        assert_eq!(theme.footnotes.margin_top, FootnotesMarginTop::Auto);
        assert_eq!(theme.title_page.authors.delimiter, ", ");
        assert_eq!(theme.title_page.revision.delimiter, ", ");
        assert_eq!(theme.title_page.title.margin_left, 0.0);
        assert_eq!(theme.title_page_text_align(), TextAlign::Justify);
    }

    #[test]
    fn can_parse_nested_keys() {
        let theme = ThemeConfig::from_toml_str(
            r#"
            [footnotes]
            margin_top = 6
            item_spacing = 2.5

            [title_page]
            text_align = "center"
            title_top = "40%"

            [title_page.title]
            margin_top = 10
            margin_left = 4.5

            [title_page.subtitle]
            display = "none"

            [title_page.authors]
            delimiter = " / "
            content_with_email = "{author} <{email}>"
            "#,
        )
        .expect("can parse theme");

        assert_eq!(theme.footnotes.margin_top, FootnotesMarginTop::Length(6.0));
        assert_eq!(theme.footnotes.item_spacing, 2.5);
        assert_eq!(theme.title_page_text_align(), TextAlign::Center);
        assert_eq!(theme.title_page.title_top, Some(TopPosition::Percent(40.0)));
        assert_eq!(theme.title_page.title.margin_top, 10.0);
        assert_eq!(theme.title_page.title.margin_left, 4.5);
        assert!(theme.title_page.subtitle.is_hidden());
        assert!(!theme.title_page.title.is_hidden());
        assert_eq!(theme.title_page.authors.delimiter, " / ");
        assert_eq!(
            theme
                .title_page
                .authors
                .content_for(AuthorContentKey::WithEmail),
            Some("{author} <{email}>")
        );
    }

    #[test]
    fn can_parse_keyword_and_string_lengths() {
        let theme = ThemeConfig::from_toml_str(
            r#"
            [footnotes]
            margin_top = "auto"
            [title_page]
            title_top = "72"
            "#,
        )
        .expect("can parse theme");
        assert_eq!(theme.footnotes.margin_top, FootnotesMarginTop::Auto);
        assert_eq!(theme.title_page.title_top, Some(TopPosition::Length(72.0)));
    }

    #[test]
    fn rejects_unknown_keywords() {
        let result = ThemeConfig::from_toml_str(
            r#"
            [footnotes]
            margin_top = "sideways"
            "#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn author_content_key_follows_url() {
        assert_eq!(
            AuthorContentKey::for_url(Some("mailto:a@b.com")),
            AuthorContentKey::WithEmail
        );
        assert_eq!(
            AuthorContentKey::for_url(Some("https://x")),
            AuthorContentKey::WithUrl
        );
        assert_eq!(AuthorContentKey::for_url(None), AuthorContentKey::NameOnly);
    }

    #[test]
    fn author_content_falls_back_to_generic_template() {
        let mut authors = TitlePageAuthorsTheme::default();
        assert_eq!(authors.content_for(AuthorContentKey::WithUrl), None);

        authors.content = Some("{author}".to_string());
        assert_eq!(
            authors.content_for(AuthorContentKey::WithUrl),
            Some("{author}")
        );

        authors.content_with_url = Some("{author} ({url})".to_string());
        assert_eq!(
            authors.content_for(AuthorContentKey::WithUrl),
            Some("{author} ({url})")
        );
        assert_eq!(
            authors.content_for(AuthorContentKey::NameOnly),
            Some("{author}")
        );
    }
}
