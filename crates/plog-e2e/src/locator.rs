//! CSS selectors for Plog page elements.
//!
//! The application marks every interactive element with a `name` attribute,
//! so most lookups go through [`Selector::name`].

use std::fmt;

/// A CSS selector understood by [`crate::BrowserDriver`]
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Selector(String);

impl Selector {
    /// Raw CSS selector
    #[must_use]
    pub fn css(selector: impl Into<String>) -> Self {
        Self(selector.into())
    }

    /// Any element whose `name` attribute equals `name`
    #[must_use]
    pub fn name(name: &str) -> Self {
        Self(format!("[name=\"{name}\"]"))
    }

    /// A `tag` element whose `name` attribute equals `name`
    #[must_use]
    pub fn tag_name(tag: &str, name: &str) -> Self {
        Self(format!("{tag}[name='{name}']"))
    }

    /// The selector text
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for Selector {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
