//! Title extraction: find the target element, then its first text node.

use super::tree_search::{find_element_by_class, find_text};
use scraper::Html;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Element predicate parameters for the structural search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TitleTarget {
    /// Tag name the element must have (e.g., `"span"`).
    pub tag: String,
    /// Substring the element's `class` attribute must contain.
    pub class: String,
}

impl TitleTarget {
    pub fn new(tag: impl Into<String>, class: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            class: class.into(),
        }
    }
}

impl Default for TitleTarget {
    /// MediaWiki page title heading.
    fn default() -> Self {
        Self::new("span", "mw-page-title-main")
    }
}

/// How extraction ended for one identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "detail", rename_all = "snake_case")]
pub enum TitleOutcome {
    /// Text payload of the first text node under the matched element, verbatim.
    Found(String),
    FetchFailed(String),
    ParseFailed(String),
    /// No element satisfied the structural predicate.
    NoMatch,
    /// The matched element has no text descendant.
    NoText,
    /// The worker ended without reporting (panicked or was aborted).
    Lost,
}

impl TitleOutcome {
    /// Short label for logs and JSON.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Found(_) => "found",
            Self::FetchFailed(_) => "fetch_failed",
            Self::ParseFailed(_) => "parse_failed",
            Self::NoMatch => "no_match",
            Self::NoText => "no_text",
            Self::Lost => "lost",
        }
    }
}

/// One output record per identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScrapeResult {
    pub url: String,
    pub outcome: TitleOutcome,
}

impl ScrapeResult {
    pub fn new(url: impl Into<String>, outcome: TitleOutcome) -> Self {
        Self {
            url: url.into(),
            outcome,
        }
    }

    /// Extracted title, or the empty string for any failure.
    pub fn title(&self) -> &str {
        match &self.outcome {
            TitleOutcome::Found(text) => text,
            _ => "",
        }
    }

    pub fn is_found(&self) -> bool {
        matches!(self.outcome, TitleOutcome::Found(_))
    }
}

impl fmt::Display for ScrapeResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

/// Run the structural search from the document root, then the text search
/// from the matched element.
pub fn extract(document: &Html, target: &TitleTarget) -> TitleOutcome {
    let Some(element) = find_element_by_class(Some(document.tree.root()), &target.tag, &target.class)
    else {
        return TitleOutcome::NoMatch;
    };

    match find_text(Some(element)).and_then(|node| node.value().as_text()) {
        Some(text) => TitleOutcome::Found(String::from(&**text)),
        None => TitleOutcome::NoText,
    }
}

/// [`extract`] collapsed to a plain string; empty when nothing was found.
pub fn extract_title(document: &Html, target: &TitleTarget) -> String {
    match extract(document, target) {
        TitleOutcome::Found(text) => text,
        _ => String::new(),
    }
}
