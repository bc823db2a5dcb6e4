// src/core/extract.rs
//
// Ordered fallback extraction. A field is described by a list of `Probe`s;
// the first one that yields a non-empty string wins.

use std::sync::LazyLock;

use regex::Regex;
use scraper::{ElementRef, Html};

use super::html::{first_attr, first_text, spaced_text};
use super::sanitize::{decimal, digits_only};

/// Compiled once on first use; shared by the probe tables.
pub type StaticRegex = LazyLock<Regex>;

/// A parsed page plus the two flattened text views the patterns run against.
pub struct Page {
    doc: Html,
    spaced: String,
    joined: String,
}

impl Page {
    pub fn parse(body: &str) -> Self {
        Self::from_document(Html::parse_document(body))
    }

    pub fn from_document(doc: Html) -> Self {
        let root = doc.root_element();
        let spaced = spaced_text(root);
        let joined: String = root.text().collect();
        Self { doc, spaced, joined }
    }

    pub fn root(&self) -> ElementRef<'_> {
        self.doc.root_element()
    }

    /// Page text, nodes trimmed and joined by single spaces.
    pub fn spaced(&self) -> &str {
        &self.spaced
    }

    /// Page text exactly as the nodes concatenate, no separators added.
    pub fn joined(&self) -> &str {
        &self.joined
    }
}

#[derive(Clone, Copy)]
pub enum Probe {
    /// Text of the first element matching the selector.
    Text(&'static str),
    /// Same, with comma decimals turned into dots.
    Decimal(&'static str),
    /// Same, digits only.
    Digits(&'static str),
    /// Attribute of the first element matching the selector.
    Attr(&'static str, &'static str),
    /// Capture group 1 over the spaced page text, comma decimals normalized.
    Pattern(&'static StaticRegex),
    /// Capture group 1 over the joined page text, verbatim.
    JoinedPattern(&'static StaticRegex),
    /// Anything the selector/regex forms cannot say.
    With(fn(&Page) -> String),
}

impl Probe {
    pub fn run(&self, page: &Page) -> String {
        match *self {
            Probe::Text(css) => first_text(page.root(), css),
            Probe::Decimal(css) => decimal(&first_text(page.root(), css)),
            Probe::Digits(css) => digits_only(&first_text(page.root(), css)),
            Probe::Attr(css, attr) => first_attr(page.root(), css, attr),
            Probe::Pattern(re) => capture(re, page.spaced()).map(decimal).unwrap_or_default(),
            Probe::JoinedPattern(re) => {
                capture(re, page.joined()).map(|s| s.trim().to_string()).unwrap_or_default()
            }
            Probe::With(f) => f(page),
        }
    }
}

/// Run `probes` in order, stopping at the first non-empty value.
pub fn first_hit(page: &Page, probes: &[Probe]) -> String {
    probes
        .iter()
        .map(|p| p.run(page))
        .find(|v| !v.is_empty())
        .unwrap_or_default()
}

/// Group 1 of the first match of `re` in `text`.
pub fn capture<'t>(re: &Regex, text: &'t str) -> Option<&'t str> {
    re.captures(text)?.get(1).map(|m| m.as_str())
}
