// src/config/consts.rs

// Net config
pub const BASE_URL: &str = "https://www.bildir.az";
pub const LISTING_PATH: &str = "/sirketler/";
/// Substring identifying links back into the scraped site itself.
pub const SITE_MARKER: &str = "bildir";

pub const USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) \
    AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";
pub const ACCEPT_LANGUAGE: &str = "az,en-US;q=0.9,en;q=0.8";
pub const ACCEPT: &str = "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8";

// Politeness
pub const REQUEST_DELAY_MS: u64 = 1_000; // between requests, and backoff base
pub const MAX_RETRIES: u32 = 3;
pub const TIMEOUT_SECS: u64 = 15;

// Listing heuristics
/// Paragraphs containing any of these are not the category line.
pub const CATEGORY_NOISE: &[&str] = &["Rəy", "www"];

// Output
pub const DATA_CSV: &str = "data/data.csv";
pub const CHARTS_DIR: &str = "charts";

// Charts
pub const MIN_COMPANIES: usize = 5;
pub const MIN_REVIEWS: f64 = 10.0;
pub const UNCATEGORIZED: &str = "Digər";
pub const CHART_SIZE: (u32, u32) = (1800, 1050);
pub const STAR_CATEGORIES: &[&str] = &[
    "Kargo şirkətləri",
    "İnternet və İT xidmətləri",
    "Banklar",
    "Yemək çatdırılması",
    "Supermarketlər",
    "Maliyyə",
];
pub const FONT_CANDIDATES: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
    "/usr/share/fonts/liberation/LiberationSans-Regular.ttf",
    "/System/Library/Fonts/Supplemental/Arial.ttf",
    "/Library/Fonts/Arial.ttf",
    "C:\\Windows\\Fonts\\arial.ttf",
];
