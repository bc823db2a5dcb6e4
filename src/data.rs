// src/data.rs
//
// Row shapes shared by the scraper and the chart generator.
//
// - CompanyStub:   what one listing-page card tells us; only lives long enough
//                  to backfill the detail record.
// - CompanyRecord: one output row. Every value is a string and "missing" is
//                  always the empty string.

use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CompanyStub {
    pub slug: String,
    pub name: String,
    pub category: String,
    pub rating_listing: String,
    pub review_count_listing: String,
}

string_row! {
    #[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(default)]
    pub struct CompanyRecord {
        slug,
        name,
        category,
        founded,
        description,
        website,
        facebook,
        instagram,
        linkedin,
        youtube,
        twitter,
        overall_rating,
        total_reviews,
        response_rate_pct,
        resolved_complaints_pct,
        customer_loyalty_pct,
        star5_pct,
        star4_pct,
        star3_pct,
        star2_pct,
        star1_pct,
        profile_url,
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Platform {
    Facebook,
    Instagram,
    Linkedin,
    Youtube,
    Twitter,
}

impl Platform {
    pub const ALL: [Platform; 5] = [
        Platform::Facebook,
        Platform::Instagram,
        Platform::Linkedin,
        Platform::Youtube,
        Platform::Twitter,
    ];

    /// Fragment looked for in link targets (and, lowercased, in link text).
    pub fn domain(self) -> &'static str {
        match self {
            Platform::Facebook => "facebook",
            Platform::Instagram => "instagram",
            Platform::Linkedin => "linkedin",
            Platform::Youtube => "youtube",
            Platform::Twitter => "twitter",
        }
    }
}

impl CompanyRecord {
    /// The degraded shape: only identity and where it came from.
    pub fn skeleton(slug: &str, profile_url: &str) -> Self {
        Self {
            slug: s!(slug),
            profile_url: s!(profile_url),
            ..Self::default()
        }
    }

    pub fn social(&self, p: Platform) -> &str {
        match p {
            Platform::Facebook => &self.facebook,
            Platform::Instagram => &self.instagram,
            Platform::Linkedin => &self.linkedin,
            Platform::Youtube => &self.youtube,
            Platform::Twitter => &self.twitter,
        }
    }

    pub fn social_mut(&mut self, p: Platform) -> &mut String {
        match p {
            Platform::Facebook => &mut self.facebook,
            Platform::Instagram => &mut self.instagram,
            Platform::Linkedin => &mut self.linkedin,
            Platform::Youtube => &mut self.youtube,
            Platform::Twitter => &mut self.twitter,
        }
    }

    /// Star tier 1..=5. Anything else is a caller bug.
    pub fn star(&self, n: u8) -> &str {
        match n {
            5 => &self.star5_pct,
            4 => &self.star4_pct,
            3 => &self.star3_pct,
            2 => &self.star2_pct,
            1 => &self.star1_pct,
            _ => unreachable!("star tier out of range: {n}"),
        }
    }

    pub fn star_mut(&mut self, n: u8) -> &mut String {
        match n {
            5 => &mut self.star5_pct,
            4 => &mut self.star4_pct,
            3 => &mut self.star3_pct,
            2 => &mut self.star2_pct,
            1 => &mut self.star1_pct,
            _ => unreachable!("star tier out of range: {n}"),
        }
    }

    /// Fill name, category, rating and review count from the listing card,
    /// each only where the detail page left it empty.
    pub fn backfill(&mut self, stub: &CompanyStub) {
        let pairs: [(&mut String, &String); 4] = [
            (&mut self.name, &stub.name),
            (&mut self.category, &stub.category),
            (&mut self.overall_rating, &stub.rating_listing),
            (&mut self.total_reviews, &stub.review_count_listing),
        ];
        for (dst, src) in pairs {
            if dst.is_empty() {
                dst.clone_from(src);
            }
        }
    }
}
