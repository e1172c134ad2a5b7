//! Domain types shared across the engine flows.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Opaque reference to a vacancy page, supplied by the caller.
///
/// The engine never mutates it; it is only handed to the driver for
/// navigation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostingReference(String);

impl PostingReference {
    pub fn new(url: impl Into<String>) -> Self {
        Self(url.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PostingReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Optional cover letter text.
///
/// Absent and blank are treated the same: several UI paths must only be
/// entered when real text was supplied.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CoverLetter(Option<String>);

impl CoverLetter {
    pub fn new(text: impl Into<String>) -> Self {
        Self(Some(text.into()))
    }

    pub fn none() -> Self {
        Self(None)
    }

    /// True when non-whitespace text was supplied.
    pub fn has_text(&self) -> bool {
        self.0
            .as_deref()
            .is_some_and(|t| !t.trim().is_empty())
    }

    pub fn text(&self) -> &str {
        self.0.as_deref().unwrap_or("")
    }
}

impl From<Option<String>> for CoverLetter {
    fn from(text: Option<String>) -> Self {
        Self(text)
    }
}

/// A vacancy scraped from the search results.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Vacancy {
    pub title: String,
    pub url: String,
    pub employer: String,
    #[serde(default)]
    pub description: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cover_letter_has_text() {
        assert!(CoverLetter::new("Hello").has_text());
        assert!(!CoverLetter::new("").has_text());
        assert!(!CoverLetter::new("   ").has_text());
        assert!(!CoverLetter::none().has_text());
    }

    #[test]
    fn test_cover_letter_from_option() {
        let letter = CoverLetter::from(Some("text".to_string()));
        assert!(letter.has_text());
        assert_eq!(letter.text(), "text");

        let absent = CoverLetter::from(None);
        assert!(!absent.has_text());
        assert_eq!(absent.text(), "");
    }

    #[test]
    fn test_posting_reference_display() {
        let posting = PostingReference::new("https://hh.ru/vacancy/123");
        assert_eq!(posting.to_string(), "https://hh.ru/vacancy/123");
        assert_eq!(posting.as_str(), "https://hh.ru/vacancy/123");
    }

    #[test]
    fn test_vacancy_serialization() {
        let vacancy = Vacancy {
            title: "Frontend Developer".to_string(),
            url: "https://hh.ru/vacancy/1".to_string(),
            employer: "Acme".to_string(),
            description: String::new(),
        };
        let json = serde_json::to_value(&vacancy).unwrap();
        assert_eq!(json["title"], "Frontend Developer");
        assert_eq!(json["employer"], "Acme");
    }
}
