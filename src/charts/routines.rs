// src/charts/routines.rs
//
// The ten charts. Each one takes the rows (or the category summary), picks
// its numbers through `stats` and draws one PNG into the output directory.

use std::path::PathBuf;

use plotters::prelude::RGBColor;

use super::draw::{self, Bars, Columns, Layout, Series, BLUE, GRAY, GREEN, LIGHT_BLUE, ORANGE, RED, YELLOW};
use super::stats::{self, CategorySummary, RATING_BUCKETS};
use crate::config::ChartConfig;
use crate::data::CompanyRecord;
use crate::error::ChartError;

pub const MARKET_LANDSCAPE: &str = "01_market_landscape.png";
pub const AVG_RATING: &str = "02_avg_rating_by_category.png";
pub const REVIEW_VOLUME: &str = "03_review_volume_by_category.png";
pub const RESPONSE_VS_RESOLUTION: &str = "04_response_vs_resolution.png";
pub const CUSTOMER_LOYALTY: &str = "05_customer_loyalty.png";
pub const RATING_DISTRIBUTION: &str = "06_rating_distribution.png";
pub const MOST_REVIEWED: &str = "07_most_reviewed_companies.png";
pub const BEST_VS_WORST: &str = "08_best_vs_worst_companies.png";
pub const SOCIAL_PRESENCE: &str = "09_social_media_presence.png";
pub const STAR_BREAKDOWN: &str = "10_star_breakdown_by_category.png";

pub const ALL: [&str; 10] = [
    MARKET_LANDSCAPE,
    AVG_RATING,
    REVIEW_VOLUME,
    RESPONSE_VS_RESOLUTION,
    CUSTOMER_LOYALTY,
    RATING_DISTRIBUTION,
    MOST_REVIEWED,
    BEST_VS_WORST,
    SOCIAL_PRESENCE,
    STAR_BREAKDOWN,
];

const FACEBOOK_BLUE: RGBColor = RGBColor(0x18, 0x77, 0xF2);
const INSTAGRAM_PINK: RGBColor = RGBColor(0xE1, 0x30, 0x6C);
const LINKEDIN_BLUE: RGBColor = RGBColor(0x0A, 0x66, 0xC2);
const STAR_COLORS: [RGBColor; 5] = [
    GREEN,
    RGBColor(0x31, 0xC4, 0x8D),
    YELLOW,
    RGBColor(0xF9, 0x80, 0x80),
    RED,
];
const STAR_NAMES: [&str; 5] = ["5★ Promoters", "4★", "3★ Neutral", "2★", "1★ Detractors"];

fn rating_color(v: f64) -> RGBColor {
    if v >= 3.5 {
        GREEN
    } else if v >= 2.5 {
        YELLOW
    } else {
        RED
    }
}

/// Upper end of a value axis with some head room; never zero.
fn headroom(max: f64, factor: f64) -> f64 {
    if max > 0.0 { max * factor } else { 1.0 }
}

fn max_of(values: &[f64]) -> f64 {
    values.iter().copied().fold(0.0, f64::max)
}

/// "12,345"
fn thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

fn save(
    cfg: &ChartConfig,
    name: &str,
    paint: impl FnOnce(&draw::Area<'_>) -> Result<(), ChartError>,
) -> Result<PathBuf, ChartError> {
    let path = cfg.chart_path(name);
    draw::render_png(&path, cfg.size, paint)?;
    Ok(path)
}

pub fn market_landscape(rows: &[CompanyRecord], cfg: &ChartConfig) -> Result<PathBuf, ChartError> {
    let mut counts = stats::category_counts(rows);
    counts.truncate(15);
    let values: Vec<f64> = counts.iter().map(|(_, n)| *n as f64).collect();
    let top = max_of(&values);

    let bars = Bars {
        title: "Market Landscape: Number of Businesses by Sector",
        axis: "Number of Companies",
        labels: counts.iter().map(|(c, _)| c.clone()).collect(),
        colors: values.iter().map(|&v| if v == top { BLUE } else { LIGHT_BLUE }).collect(),
        notes: counts.iter().map(|(_, n)| n.to_string()).collect(),
        range: 0.0..headroom(top, 1.15),
        values,
        marks: Vec::new(),
        legend: Vec::new(),
    };
    save(cfg, MARKET_LANDSCAPE, |area| draw::hbars(area, &bars))
}

pub fn avg_rating(summary: &[CategorySummary], cfg: &ChartConfig) -> Result<PathBuf, ChartError> {
    let mut data: Vec<&CategorySummary> = summary.iter().collect();
    data.sort_by(|a, b| b.avg_rating.total_cmp(&a.avg_rating));
    data.truncate(15);
    let values: Vec<f64> = data.iter().map(|s| s.avg_rating).collect();

    let bars = Bars {
        title: "Customer Satisfaction by Sector: Average Rating",
        axis: "Average Customer Rating (out of 5)",
        labels: data.iter().map(|s| s.category.clone()).collect(),
        colors: values.iter().map(|&v| rating_color(v)).collect(),
        notes: values.iter().map(|v| format!("{v:.1}")).collect(),
        range: 0.0..5.4,
        values,
        marks: vec![2.5],
        legend: vec![
            ("Strong (≥ 3.5)", GREEN),
            ("Moderate (2.5–3.5)", YELLOW),
            ("Critical (< 2.5)", RED),
        ],
    };
    save(cfg, AVG_RATING, |area| draw::hbars(area, &bars))
}

pub fn review_volume(summary: &[CategorySummary], cfg: &ChartConfig) -> Result<PathBuf, ChartError> {
    let mut data: Vec<&CategorySummary> = summary.iter().collect();
    data.sort_by(|a, b| b.total_reviews.cmp(&a.total_reviews));
    data.truncate(12);
    let values: Vec<f64> = data.iter().map(|s| s.total_reviews as f64).collect();

    let cols = Columns {
        title: "Customer Engagement: Total Reviews per Sector",
        axis: "Total Customer Reviews",
        labels: data.iter().map(|s| s.category.clone()).collect(),
        notes: data.iter().map(|s| thousands(s.total_reviews)).collect(),
        y_max: headroom(max_of(&values), 1.12),
        series: vec![Series::uniform("Reviews", BLUE, values)],
        layout: Layout::Grouped,
    };
    save(cfg, REVIEW_VOLUME, |area| draw::columns(area, &cols))
}

pub fn response_vs_resolution(summary: &[CategorySummary], cfg: &ChartConfig) -> Result<PathBuf, ChartError> {
    let mut data: Vec<&CategorySummary> = summary.iter().collect();
    data.sort_by(|a, b| b.total_reviews.cmp(&a.total_reviews));
    data.truncate(12);

    let cols = Columns {
        title: "Customer Service Performance: Response vs. Resolution Rate by Sector",
        axis: "Rate (%)",
        labels: data.iter().map(|s| s.category.clone()).collect(),
        series: vec![
            Series::uniform("Response Rate %", BLUE, data.iter().map(|s| s.avg_response).collect()),
            Series::uniform("Resolution Rate %", ORANGE, data.iter().map(|s| s.avg_resolved).collect()),
        ],
        layout: Layout::Grouped,
        y_max: 115.0,
        notes: Vec::new(),
    };
    save(cfg, RESPONSE_VS_RESOLUTION, |area| draw::columns(area, &cols))
}

pub fn customer_loyalty(summary: &[CategorySummary], cfg: &ChartConfig) -> Result<PathBuf, ChartError> {
    let mut data: Vec<&CategorySummary> = summary.iter().collect();
    data.sort_by(|a, b| b.avg_loyalty.total_cmp(&a.avg_loyalty));
    data.truncate(15);
    let values: Vec<f64> = data.iter().map(|s| s.avg_loyalty).collect();

    let lo = values.iter().copied().fold(0.0, f64::min);
    let hi = max_of(&values);
    let span = (hi - lo).max(1.0);

    let bars = Bars {
        title: "Customer Loyalty by Sector: Net Promoter Indicator",
        axis: "Customer Loyalty Score (%)",
        labels: data.iter().map(|s| s.category.clone()).collect(),
        colors: values.iter().map(|&v| if v >= 0.0 { GREEN } else { RED }).collect(),
        notes: values.iter().map(|v| format!("{v:+.1}%")).collect(),
        range: (lo - span * 0.15)..(hi + span * 0.15),
        values,
        marks: vec![0.0],
        legend: vec![("Net Promoters (positive)", GREEN), ("Net Detractors (negative)", RED)],
    };
    save(cfg, CUSTOMER_LOYALTY, |area| draw::hbars(area, &bars))
}

pub fn rating_distribution(rows: &[CompanyRecord], cfg: &ChartConfig) -> Result<PathBuf, ChartError> {
    let counts = stats::rating_buckets(rows);
    let total: usize = counts.iter().sum();
    let values: Vec<f64> = counts.iter().map(|&n| n as f64).collect();

    let cols = Columns {
        title: "Rating Distribution: How Trustworthy Is the Market?",
        axis: "Number of Companies",
        labels: RATING_BUCKETS.iter().map(|b| s!(*b)).collect(),
        notes: counts
            .iter()
            .map(|&n| {
                let share = if total == 0 { 0.0 } else { 100.0 * n as f64 / total as f64 };
                format!("{n} ({share:.0}%)")
            })
            .collect(),
        y_max: headroom(max_of(&values), 1.2),
        series: vec![Series {
            name: "Companies",
            colors: vec![GRAY, RED, RED, YELLOW, GREEN, GREEN],
            values,
        }],
        layout: Layout::Grouped,
    };
    save(cfg, RATING_DISTRIBUTION, |area| draw::columns(area, &cols))
}

pub fn most_reviewed(rows: &[CompanyRecord], cfg: &ChartConfig) -> Result<PathBuf, ChartError> {
    let top = stats::most_reviewed(rows, cfg.min_reviews, 15);
    let values: Vec<f64> = top.iter().map(|c| c.reviews).collect();

    let bars = Bars {
        title: "Most Scrutinised Companies: Highest Review Counts",
        axis: "Total Reviews (Customer Feedback Volume)",
        labels: top.iter().map(|c| c.name.clone()).collect(),
        colors: top.iter().map(|c| c.rating.map_or(GRAY, rating_color)).collect(),
        notes: top
            .iter()
            .map(|c| match c.rating.filter(|&r| r != 0.0) {
                Some(r) => format!("{}  ★{r:.1}", thousands(c.reviews as u64)),
                None => thousands(c.reviews as u64),
            })
            .collect(),
        range: 0.0..headroom(max_of(&values), 1.2),
        values,
        marks: Vec::new(),
        legend: vec![
            ("Well-rated (≥ 3.5)", GREEN),
            ("Moderate (2.5–3.5)", YELLOW),
            ("Poorly-rated (< 2.5)", RED),
        ],
    };
    save(cfg, MOST_REVIEWED, |area| draw::hbars(area, &bars))
}

pub fn best_vs_worst(rows: &[CompanyRecord], cfg: &ChartConfig) -> Result<PathBuf, ChartError> {
    let (best, worst) = stats::best_and_worst(rows, cfg.min_reviews, 10);

    let panel = |title: &'static str, list: &[stats::RatedCompany], color: RGBColor, mark: f64| {
        let values: Vec<f64> = list.iter().map(|c| c.rating.unwrap_or_default()).collect();
        Bars {
            title,
            axis: "Rating (out of 5)",
            labels: list.iter().map(|c| c.name.clone()).collect(),
            colors: vec![color; values.len()],
            notes: values.iter().map(|v| format!("{v:.1}")).collect(),
            range: 0.0..5.6,
            values,
            marks: vec![mark],
            legend: Vec::new(),
        }
    };
    let left = panel("Top 10 Most Trusted Companies", &best, GREEN, 4.0);
    let right = panel("Bottom 10 Lowest-Rated Companies", &worst, RED, 2.5);

    save(cfg, BEST_VS_WORST, |area| {
        let body = area.titled(
            "Company Reputation Extremes: Trusted vs. At-Risk Brands",
            draw::font(32.0),
        )?;
        let half = (body.dim_in_pixel().0 / 2) as i32;
        let (l, r) = body.split_horizontally(half);
        draw::hbars(&l, &left)?;
        draw::hbars(&r, &right)
    })
}

pub fn social_presence(rows: &[CompanyRecord], cfg: &ChartConfig) -> Result<PathBuf, ChartError> {
    let shares = stats::social_presence(rows, 12);

    let cols = Columns {
        title: "Digital Presence: Social Media Adoption by Sector",
        axis: "% of Companies with Profile",
        labels: shares.iter().map(|s| s.category.clone()).collect(),
        series: vec![
            Series::uniform("Facebook", FACEBOOK_BLUE, shares.iter().map(|s| s.facebook).collect()),
            Series::uniform("Instagram", INSTAGRAM_PINK, shares.iter().map(|s| s.instagram).collect()),
            Series::uniform("LinkedIn", LINKEDIN_BLUE, shares.iter().map(|s| s.linkedin).collect()),
        ],
        layout: Layout::Grouped,
        y_max: 115.0,
        notes: Vec::new(),
    };
    save(cfg, SOCIAL_PRESENCE, |area| draw::columns(area, &cols))
}

pub fn star_breakdown(rows: &[CompanyRecord], cfg: &ChartConfig) -> Result<PathBuf, ChartError> {
    let mix = stats::star_mix(rows, &cfg.star_categories);
    let stacked_max = mix.iter().map(|(_, t)| t.iter().sum::<f64>()).fold(0.0, f64::max);

    let series = (0..5)
        .map(|tier| Series::uniform(STAR_NAMES[tier], STAR_COLORS[tier], mix.iter().map(|(_, t)| t[tier]).collect()))
        .collect();

    let cols = Columns {
        title: "Review Sentiment Breakdown: Star Rating Mix by Key Sector",
        axis: "Average % of Reviews",
        labels: mix.iter().map(|(c, _)| c.clone()).collect(),
        series,
        layout: Layout::Stacked,
        y_max: headroom(stacked_max, 1.15),
        notes: Vec::new(),
    };
    save(cfg, STAR_BREAKDOWN, |area| draw::columns(area, &cols))
}
