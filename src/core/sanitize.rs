// src/core/sanitize.rs
use std::sync::LazyLock;

use regex::Regex;

static PCT_SUFFIXED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([\d,\.]+)\s*%").expect("static regex"));
static NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([\d,\.]+)").expect("static regex"));

/// Collapse whitespace runs to one space and trim.
pub fn normalize_ws(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_space = false;
    for ch in s.chars() {
        if ch.is_whitespace() {
            if !prev_space { out.push(' '); prev_space = true; }
        } else { out.push(ch); prev_space = false; }
    }
    out.trim().to_string()
}

/// "3,8" → "3.8". The site writes Azerbaijani decimals with a comma.
pub fn decimal(s: &str) -> String {
    s.trim().replace(',', ".")
}

/// Keep ASCII digits only: "1 204 rəy" → "1204".
pub fn digits_only(s: &str) -> String {
    s.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// First number in `text`, preferring one followed by `%`.
/// "5 ulduz 54,5%" → "54.5"; "12" → "12"; no number → "".
pub fn pct(text: &str) -> String {
    PCT_SUFFIXED
        .captures(text)
        .or_else(|| NUMBER.captures(text))
        .and_then(|c| c.get(1))
        .map(|m| decimal(m.as_str()))
        .unwrap_or_default()
}

/// Last non-empty path segment of a link target.
/// "/sirketler/kapital-bank/" → "kapital-bank"; "/" → "".
pub fn slug_from_href(href: &str) -> String {
    href.trim_matches('/')
        .rsplit('/')
        .next()
        .unwrap_or("")
        .to_string()
}
