use derive_builder::Builder;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A document author as listed in the document header.
#[derive(Builder, Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[builder(setter(into))]
pub struct Author {
    pub name: String,
    #[builder(setter(into, strip_option), default)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[builder(setter(into, strip_option), default)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl Author {
    /// The first word of the name.
    pub fn firstname(&self) -> &str {
        self.name.split_whitespace().next().unwrap_or_default()
    }

    /// Everything after the first word of the name, if there is anything.
    pub fn lastname(&self) -> Option<&str> {
        let trimmed = self.name.trim();
        trimmed
            .split_once(char::is_whitespace)
            .map(|(_, rest)| rest.trim_start())
            .filter(|rest| !rest.is_empty())
    }

    /// Upper-cased first letter of every word in the name.
    pub fn initials(&self) -> String {
        self.name
            .split_whitespace()
            .filter_map(|word| word.chars().next())
            .flat_map(char::to_uppercase)
            .collect()
    }

    /// How this author can be reached.
    ///
    /// An explicit url wins. Otherwise the email becomes a `mailto:` link,
    /// unless it holds no `@`, in which case it's already a url and is used
    /// as-is.
    pub fn contact_url(&self) -> Option<String> {
        if let Some(url) = &self.url {
            return Some(url.clone());
        }
        self.email.as_ref().map(|email| {
            if email.contains('@') {
                format!("mailto:{email}")
            } else {
                email.clone()
            }
        })
    }
}

impl fmt::Display for Author {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.email {
            Some(email) => write!(f, "{} <{email}>", self.name),
            None => write!(f, "{}", self.name),
        }
    }
}

impl<S: Into<String>> From<S> for Author {
    fn from(s: S) -> Self {
        Author {
            name: s.into(),
            email: None,
            url: None,
        }
    }
}
