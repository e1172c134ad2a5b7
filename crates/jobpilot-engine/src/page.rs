//! The page capability seam the engine flows are written against.

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;

use crate::error::DriverError;

/// Where to look for an affordance on the page.
///
/// Affordances are re-probed at every decision point; a `Locator` names a
/// query, never a cached element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Locator {
    /// CSS selector.
    Css(String),
    /// Any element whose visible text contains this string.
    Text(String),
    /// Elements matching the selector whose visible text contains the string.
    CssWithText { css: String, text: String },
}

impl Locator {
    pub fn css(selector: impl Into<String>) -> Self {
        Locator::Css(selector.into())
    }

    pub fn text(text: impl Into<String>) -> Self {
        Locator::Text(text.into())
    }

    pub fn css_with_text(css: impl Into<String>, text: impl Into<String>) -> Self {
        Locator::CssWithText {
            css: css.into(),
            text: text.into(),
        }
    }
}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Locator::Css(css) => write!(f, "css={}", css),
            Locator::Text(text) => write!(f, "text={}", text),
            Locator::CssWithText { css, text } => write!(f, "{}:has-text({})", css, text),
        }
    }
}

/// Capabilities the engine needs from a live page.
///
/// Any backend implementing this set suffices; the browser crate provides a
/// CDP-backed implementation and the tests use a scripted fake.
#[async_trait]
pub trait PageDriver: Send + Sync {
    /// Navigate and wait (bounded) for the page to become usable.
    async fn goto(&self, url: &str, timeout: Duration) -> Result<(), DriverError>;

    /// Is at least one matching element currently present?
    async fn probe(&self, locator: &Locator) -> Result<bool, DriverError>;

    /// Wait (bounded) for a matching element to appear.
    async fn wait_for(&self, locator: &Locator, timeout: Duration) -> Result<(), DriverError>;

    /// Click the first matching element.
    async fn click(&self, locator: &Locator) -> Result<(), DriverError>;

    /// Fill the first matching input with the given text, replacing any
    /// existing value.
    async fn fill(&self, locator: &Locator, text: &str) -> Result<(), DriverError>;

    /// Visible text of the first matching element, if any.
    async fn text_of(&self, locator: &Locator) -> Result<Option<String>, DriverError>;

    /// Evaluate a JavaScript expression and return its JSON value.
    async fn evaluate(&self, expression: &str) -> Result<Value, DriverError>;

    /// Current document title.
    async fn title(&self) -> Result<String, DriverError>;

    /// Full rendered HTML of the page.
    async fn content(&self) -> Result<String, DriverError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_locator_display() {
        assert_eq!(Locator::css("button.apply").to_string(), "css=button.apply");
        assert_eq!(Locator::text("Отправить").to_string(), "text=Отправить");
        assert_eq!(
            Locator::css_with_text("a", "details").to_string(),
            "a:has-text(details)"
        );
    }

    #[test]
    fn test_locator_equality() {
        assert_eq!(Locator::css("textarea"), Locator::Css("textarea".into()));
        assert_ne!(Locator::css("textarea"), Locator::text("textarea"));
    }
}
