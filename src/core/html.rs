// src/core/html.rs
//
// Thin helpers over `scraper` that mirror how the site's text is read:
// every text node trimmed, empties dropped, then concatenated.

use scraper::{ElementRef, Selector};
use tracing::debug;

use super::sanitize::normalize_ws;

/// Parse a CSS selector; a bad selector is a miss, not a crash.
pub fn selector(css: &str) -> Option<Selector> {
    match Selector::parse(css) {
        Ok(sel) => Some(sel),
        Err(e) => {
            debug!("bad selector {css:?}: {e:?}");
            None
        }
    }
}

/// Trimmed text nodes glued with no separator ("<b> 4,2 </b><i>/5</i>" → "4,2/5").
pub fn text_of(el: ElementRef<'_>) -> String {
    el.text().map(str::trim).filter(|t| !t.is_empty()).collect()
}

/// Trimmed text nodes joined by single spaces; used for pattern matching.
pub fn spaced_text(el: ElementRef<'_>) -> String {
    let parts: Vec<&str> = el.text().map(str::trim).filter(|t| !t.is_empty()).collect();
    normalize_ws(&parts.join(" "))
}

/// All matches of `css` under `scope`, document order.
pub fn select_all<'a>(scope: ElementRef<'a>, css: &str) -> Vec<ElementRef<'a>> {
    match selector(css) {
        Some(sel) => scope.select(&sel).collect(),
        None => Vec::new(),
    }
}

pub fn select_first<'a>(scope: ElementRef<'a>, css: &str) -> Option<ElementRef<'a>> {
    let sel = selector(css)?;
    scope.select(&sel).next()
}

/// Text of the first match, "" when nothing matches.
pub fn first_text(scope: ElementRef<'_>, css: &str) -> String {
    select_first(scope, css).map(text_of).unwrap_or_default()
}

/// Attribute of the first match, "" when absent.
pub fn first_attr(scope: ElementRef<'_>, css: &str, attr: &str) -> String {
    select_first(scope, css)
        .and_then(|el| el.value().attr(attr))
        .map(|v| v.trim().to_string())
        .unwrap_or_default()
}
