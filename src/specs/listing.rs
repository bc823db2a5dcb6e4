// src/specs/listing.rs
//! Scraping *spec* for the company listing (`/sirketler/?page=N`).
//!
//! Purpose:
//! - Read the pagination block and report how many listing pages exist.
//! - Turn every `a.company-wrapper` card into a `CompanyStub`.
//!
//! Nothing here fetches; the caller hands in a parsed document.

use std::sync::LazyLock;

use regex::Regex;
use scraper::{ElementRef, Html};

use crate::config::consts::CATEGORY_NOISE;
use crate::core::html::{first_text, select_all, select_first, spaced_text, text_of};
use crate::core::sanitize::{decimal, slug_from_href};
use crate::data::CompanyStub;

static PAGE_PARAM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"page=(\d+)").expect("static regex"));
static REVIEW_COUNT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)Rəy\s*say[ıi]\s*:\s*(\d+)").expect("static regex"));
static SHORT_RATING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d\.\d$").expect("static regex"));

/// Highest page number referenced by the pagination, 1 when there is none.
pub fn total_pages(doc: &Html) -> u32 {
    let root = doc.root_element();
    let mut max_page = 1u32;

    // Link targets: "?page=106"
    for a in select_all(root, "ul.pagination a, .pagination a, a[href*='page=']") {
        let href = a.value().attr("href").unwrap_or("");
        if let Some(n) = PAGE_PARAM
            .captures(href)
            .and_then(|c| c.get(1))
            .and_then(|m| m.as_str().parse::<u32>().ok())
        {
            max_page = max_page.max(n);
        }
    }

    // Visible numbers: <li>106</li>
    for li in select_all(root, "ul.pagination li, .pagination li") {
        let txt = text_of(li);
        if !txt.is_empty() && txt.chars().all(|c| c.is_ascii_digit()) {
            if let Ok(n) = txt.parse::<u32>() {
                max_page = max_page.max(n);
            }
        }
    }

    max_page
}

/// All company cards on one listing page, in page order.
pub fn parse_listing(doc: &Html) -> Vec<CompanyStub> {
    select_all(doc.root_element(), "a.company-wrapper")
        .into_iter()
        .filter_map(parse_card)
        .collect()
}

fn parse_card(card: ElementRef<'_>) -> Option<CompanyStub> {
    let slug = slug_from_href(card.value().attr("href").unwrap_or(""));
    if slug.is_empty() {
        return None;
    }

    Some(CompanyStub {
        slug,
        name: first_text(card, "h5"),
        category: category_line(card),
        rating_listing: card_rating(card),
        review_count_listing: REVIEW_COUNT
            .captures(&spaced_text(card))
            .and_then(|c| c.get(1))
            .map(|m| s!(m.as_str()))
            .unwrap_or_default(),
    })
}

/// First paragraph that is not the review counter or a bare web address.
fn category_line(card: ElementRef<'_>) -> String {
    select_all(card, "p")
        .into_iter()
        .map(text_of)
        .find(|t| !t.is_empty() && !CATEGORY_NOISE.iter().any(|noise| t.contains(noise)))
        .unwrap_or_default()
}

/// Dedicated rating badge, else the first short "d.d" number in the card.
fn card_rating(card: ElementRef<'_>) -> String {
    if let Some(badge) = select_first(card, ".company-rating-number, .rating-number") {
        return decimal(&text_of(badge));
    }
    select_all(card, "span, div")
        .into_iter()
        .map(|el| decimal(&text_of(el)))
        .find(|t| SHORT_RATING.is_match(t))
        .unwrap_or_default()
}
