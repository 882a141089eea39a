//! Selector types for identifying elements on the automation surface.
//!
//! A [`Selector`] is opaque to this crate: the core never interprets the
//! variant or its value, it only hands the selector to the surface and
//! repeats the surface's visibility predicate. The variants exist so that
//! error messages and logs can name what was being looked for.

use crate::result::{DeslizarError, DeslizarResult};

/// Opaque identifier for an element, interpreted only by the surface.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Selector {
    /// Native element id / resource-id
    Id(String),
    /// CSS selector (browser-backed surfaces)
    Css(String),
    /// XPath expression
    XPath(String),
    /// Visible text content
    Text(String),
    /// Accessibility identifier (mobile surfaces)
    AccessibilityId(String),
}

impl Selector {
    /// Create an id selector
    #[must_use]
    pub fn id(value: impl Into<String>) -> Self {
        Self::Id(value.into())
    }

    /// Create a CSS selector
    #[must_use]
    pub fn css(value: impl Into<String>) -> Self {
        Self::Css(value.into())
    }

    /// Create an XPath selector
    #[must_use]
    pub fn xpath(value: impl Into<String>) -> Self {
        Self::XPath(value.into())
    }

    /// Create a text selector
    #[must_use]
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }

    /// Create an accessibility-id selector
    #[must_use]
    pub fn accessibility_id(value: impl Into<String>) -> Self {
        Self::AccessibilityId(value.into())
    }

    /// The raw selector value, uninterpreted.
    #[must_use]
    pub fn value(&self) -> &str {
        match self {
            Self::Id(v)
            | Self::Css(v)
            | Self::XPath(v)
            | Self::Text(v)
            | Self::AccessibilityId(v) => v,
        }
    }

    /// Short tag used in `Display` output and log events.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Id(_) => "id",
            Self::Css(_) => "css",
            Self::XPath(_) => "xpath",
            Self::Text(_) => "text",
            Self::AccessibilityId(_) => "accessibility-id",
        }
    }

    /// Reject selectors with an empty value before any surface call.
    pub fn validate(&self) -> DeslizarResult<()> {
        if self.value().trim().is_empty() {
            return Err(DeslizarError::InvalidArgument {
                message: format!("{} selector value must not be empty", self.kind()),
            });
        }
        Ok(())
    }
}

impl std::fmt::Display for Selector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}={}", self.kind(), self.value())
    }
}
