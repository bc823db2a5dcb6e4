// src/specs/company.rs
//! Scraping *spec* for a company detail page (`/<slug>/`).
//!
//! Company pages are not uniform: older profiles use different class names for
//! the same facts. Every field is therefore a short list of `Probe`s tried in
//! priority order; the first non-empty answer wins.
//!
//! Fetching, backfill from the listing and writing all live in `scrape`.

use std::sync::LazyLock;

use regex::Regex;
use scraper::ElementRef;

use crate::config::consts::SITE_MARKER;
use crate::core::extract::{capture, StaticRegex};
use crate::core::html::{first_attr, select_all, spaced_text, text_of};
use crate::core::sanitize::{decimal, pct};
use crate::core::{first_hit, Page, Probe};
use crate::data::{CompanyRecord, Platform};

use Probe::*;

fn re(pattern: &str) -> Regex {
    Regex::new(pattern).expect("static regex")
}

static FOUNDED_LABEL: StaticRegex = LazyLock::new(|| re(r"(?i)Quruluş tarixi|Founded|Yaranma"));
static REVIEWS_TEXT: StaticRegex = LazyLock::new(|| re(r"(?i)(\d+)\s*rəy"));
static RESPONSE_TEXT: StaticRegex =
    LazyLock::new(|| re(r"(?i)Cavab\s+nisbəti[^\d]*([\d,\.]+)\s*%"));
static RESOLVED_TEXT: StaticRegex =
    LazyLock::new(|| re(r"(?i)Həll\s+edilmiş[^\d]*([\d,\.]+)\s*%"));
static LOYALTY_TEXT: StaticRegex =
    LazyLock::new(|| re(r"(?i)Müştəri\s+loyallığı[^\d\-]*([\-\d,\.]+)\s*%"));

/// "N ulduz ... P%" on the page text, index 0 is the 1-star tier.
static STAR_TEXT: LazyLock<[Regex; 5]> = LazyLock::new(|| {
    std::array::from_fn(|i| re(&format!(r"(?i){}\s*(?:ulduz|star)[^\d]*?([\d,\.]+)\s*%", i + 1)))
});
/// A tier number labelled as such: "5 ulduz", "4 star", "3★".
static STAR_LABEL: StaticRegex = LazyLock::new(|| re(r"(?i)(?:^|[^\d,.])([1-5])\s*(?:ulduz|star|★)"));

static NAME: &[Probe] = &[
    Text("h1.company-name"),
    Text("h1"),
    Text(".company-title h1"),
    Text(".company-info h1"),
];

static CATEGORY: &[Probe] = &[
    Text(".company-category"),
    Text(".category-name"),
    Text(".company-type"),
];

static FOUNDED: &[Probe] = &[With(founded_next_to_label)];

static DESCRIPTION: &[Probe] = &[
    Text(".company-description p"),
    Text(".about-company p"),
    Text(".company-about"),
    Text("#about p"),
    Text(".description"),
];

const WEBSITE_BUTTON: &str = "a.website-url-btn, [data-href], .company-website a";

static WEBSITE: &[Probe] = &[
    Attr(WEBSITE_BUTTON, "data-href"),
    Attr(WEBSITE_BUTTON, "href"),
    With(first_external_link),
];

static OVERALL_RATING: &[Probe] = &[
    Decimal(".overall-rating .rating-number"),
    Decimal(".company-rating span.number"),
    Decimal(".rating-score"),
    Decimal(".stars-number"),
    Decimal(".company-score"),
];

static TOTAL_REVIEWS: &[Probe] = &[
    Digits(".total-reviews"),
    Digits(".reviews-count"),
    Digits(".review-count strong"),
    JoinedPattern(&REVIEWS_TEXT),
];

static RESPONSE_RATE: &[Probe] = &[Pattern(&RESPONSE_TEXT)];
static RESOLVED: &[Probe] = &[Pattern(&RESOLVED_TEXT)];
static LOYALTY: &[Probe] = &[Pattern(&LOYALTY_TEXT)];

const STAR_ROWS: &str = ".star-row, .rating-row, .review-bar, li.star-item";

/// Extract every field the page offers. Fields the page does not have stay "".
pub fn parse_company(page: &Page, slug: &str, profile_url: &str) -> CompanyRecord {
    let mut rec = CompanyRecord::skeleton(slug, profile_url);

    rec.name = first_hit(page, NAME);
    rec.category = first_hit(page, CATEGORY);
    rec.founded = first_hit(page, FOUNDED);
    rec.description = first_hit(page, DESCRIPTION);
    rec.website = first_hit(page, WEBSITE);

    for p in Platform::ALL {
        let css = format!("a[href*='{}']", p.domain());
        *rec.social_mut(p) = first_attr(page.root(), &css, "href");
    }

    rec.overall_rating = first_hit(page, OVERALL_RATING);
    rec.total_reviews = first_hit(page, TOTAL_REVIEWS);
    rec.response_rate_pct = first_hit(page, RESPONSE_RATE);
    rec.resolved_complaints_pct = first_hit(page, RESOLVED);
    rec.customer_loyalty_pct = first_hit(page, LOYALTY);

    fill_star_tiers(page, &mut rec);
    rec
}

/// "Quruluş tarixi" label → the element right after the label's container,
/// or the container itself when it has no following sibling.
fn founded_next_to_label(page: &Page) -> String {
    let label = page.root().descendants().find(|node| {
        node.value()
            .as_text()
            .is_some_and(|t| FOUNDED_LABEL.is_match(t))
    });
    let Some(container) = label.and_then(|n| n.parent()).and_then(ElementRef::wrap) else {
        return s!();
    };
    match container.next_siblings().find_map(ElementRef::wrap) {
        Some(sibling) => text_of(sibling),
        None => text_of(container),
    }
}

/// First absolute link leaving the site that is not labelled as a social profile.
fn first_external_link(page: &Page) -> String {
    select_all(page.root(), "a[href^='http']")
        .into_iter()
        .filter_map(|a| {
            let href = a.value().attr("href")?;
            if href.contains(SITE_MARKER) {
                return None;
            }
            let label = text_of(a).to_lowercase();
            let social = Platform::ALL.iter().any(|p| label.contains(p.domain()));
            (!social).then(|| s!(href))
        })
        .next()
        .unwrap_or_default()
}

/// Star distribution. Row widgets first; the page-text pattern only fills
/// tiers the rows left empty.
fn fill_star_tiers(page: &Page, rec: &mut CompanyRecord) {
    for row in select_all(page.root(), STAR_ROWS) {
        let txt = spaced_text(row);
        let Some(tier) = row_tier(&txt) else { continue };
        let value = pct(&txt);
        let slot = rec.star_mut(tier);
        if !value.is_empty() && slot.is_empty() {
            *slot = value;
        }
    }

    for tier in (1..=5u8).rev() {
        if !rec.star(tier).is_empty() {
            continue;
        }
        if let Some(v) = capture(&STAR_TEXT[usize::from(tier) - 1], page.spaced()) {
            *rec.star_mut(tier) = decimal(v);
        }
    }
}

/// Star tier a distribution row describes: a 1–5 labelled "ulduz"/"star"/"★"
/// anywhere in the row, else a bare single-digit token (not the percentage).
fn row_tier(text: &str) -> Option<u8> {
    let labelled = capture(&STAR_LABEL, text);
    let bare = || {
        text.split_whitespace()
            .map(|tok| tok.trim_matches(|c: char| !c.is_alphanumeric()))
            .find(|tok| tok.len() == 1 && matches!(tok.as_bytes()[0], b'1'..=b'5'))
    };
    labelled.or_else(bare)?.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    const FIXTURE: &str = include_str!("../../tests/fixtures/company.html");

    fn fixture() -> CompanyRecord {
        parse_company(&Page::parse(FIXTURE), "kapital-bank", "https://www.bildir.az/kapital-bank/")
    }

    #[test]
    fn identity_fields() {
        let rec = fixture();
        assert_eq!(rec.slug, "kapital-bank");
        assert_eq!(rec.profile_url, "https://www.bildir.az/kapital-bank/");
        assert_eq!(rec.name, "Kapital Bank ASC");
        assert_eq!(rec.category, "Banklar");
        assert_eq!(rec.founded, "1874");
        assert_eq!(rec.description, "Azərbaycanın ən qədim bankı.");
        assert_eq!(rec.website, "https://www.kapitalbank.az");
    }

    #[test]
    fn social_links_take_first_matching_href() {
        let rec = fixture();
        // The site's own page header link comes first; charts filter it out.
        assert_eq!(rec.facebook, "https://www.facebook.com/bildir.az");
        assert_eq!(rec.instagram, "https://instagram.com/kapitalbank");
        assert_eq!(rec.linkedin, "https://www.linkedin.com/company/kapital-bank");
        assert_eq!(rec.youtube, "");
        assert_eq!(rec.twitter, "");
    }

    #[test]
    fn rating_reviews_and_rates() {
        let rec = fixture();
        assert_eq!(rec.overall_rating, "3.4");
        assert_eq!(rec.total_reviews, "1245");
        assert_eq!(rec.response_rate_pct, "92.3");
        assert_eq!(rec.resolved_complaints_pct, "41.7");
        assert_eq!(rec.customer_loyalty_pct, "-12.5");
    }

    #[test]
    fn star_rows_win_over_page_text() {
        let rec = fixture();
        assert_eq!(rec.star5_pct, "22.7"); // not the 99% promo line
        assert_eq!(rec.star4_pct, "15.2");
        assert_eq!(rec.star3_pct, "9.0");
        assert_eq!(rec.star2_pct, "8.1");
        assert_eq!(rec.star1_pct, "45.0");
    }

    #[test]
    fn empty_page_yields_empty_fields() {
        let rec = parse_company(&Page::parse("<html><body></body></html>"), "x", "u");
        assert_eq!(rec, CompanyRecord::skeleton("x", "u"));
    }

    #[test]
    fn reviews_fall_back_to_page_text() {
        let page = Page::parse("<html><body><p>Cəmi <b>37</b> rəy yazılıb</p></body></html>");
        let rec = parse_company(&page, "x", "u");
        assert_eq!(rec.total_reviews, "37");
    }

    #[test]
    fn website_falls_back_to_external_link() {
        let page = Page::parse(
            r#"<html><body>
                <a href="https://www.bildir.az/sirketler/">Şirkətlər</a>
                <a href="https://fb.me/x">Facebook</a>
                <a href="https://wolt.com/az">wolt.com</a>
            </body></html>"#,
        );
        let rec = parse_company(&page, "wolt", "u");
        assert_eq!(rec.website, "https://wolt.com/az");
    }

    #[test]
    fn founded_uses_container_text_without_sibling() {
        let page = Page::parse("<html><body><div><p>Founded 2019</p></div></body></html>");
        let rec = parse_company(&page, "x", "u");
        assert_eq!(rec.founded, "Founded 2019");
    }

    #[test]
    fn row_tier_finds_the_star_count_anywhere() {
        assert_eq!(row_tier("4 ulduz 15,2%"), Some(4));
        assert_eq!(row_tier("54,5% 5 ulduz"), Some(5));
        assert_eq!(row_tier("★ 3 9%"), Some(3));
        assert_eq!(row_tier("2★ 8,1%"), Some(2));
        assert_eq!(row_tier("12 rəy"), None);
        assert_eq!(row_tier("45,0%"), None);
        assert_eq!(row_tier("no digits"), None);
    }

    #[test]
    fn percentage_first_rows_are_read() {
        let page = Page::parse(
            r#"<html><body>
                <div class="star-row"><span>54,5%</span><span>5 ulduz</span></div>
                <div class="rating-row"><i class="icon"></i><span>12%</span> <b>1</b> star</div>
            </body></html>"#,
        );
        let rec = parse_company(&page, "x", "u");
        assert_eq!(rec.star5_pct, "54.5");
        assert_eq!(rec.star1_pct, "12");
        assert_eq!(rec.star4_pct, "");
    }
}
