// src/config/options.rs
use std::path::{Path, PathBuf};
use std::time::Duration;

use super::consts::*;

/// Everything the fetcher and the traversal need, fixed at construction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScrapeConfig {
    pub base_url: String,
    pub listing_path: String,
    pub output: PathBuf,
    /// Pause after every request; also the linear backoff unit.
    pub request_delay: Duration,
    pub max_retries: u32,
    pub timeout: Duration,
    pub user_agent: String,
    pub accept_language: String,
    pub accept: String,
}

impl Default for ScrapeConfig {
    fn default() -> Self {
        Self {
            base_url: s!(BASE_URL),
            listing_path: s!(LISTING_PATH),
            output: PathBuf::from(DATA_CSV),
            request_delay: Duration::from_millis(REQUEST_DELAY_MS),
            max_retries: MAX_RETRIES,
            timeout: Duration::from_secs(TIMEOUT_SECS),
            user_agent: s!(USER_AGENT),
            accept_language: s!(ACCEPT_LANGUAGE),
            accept: s!(ACCEPT),
        }
    }
}

impl ScrapeConfig {
    /// Same settings against another host (tests, mirrors).
    pub fn with_base_url(mut self, base: &str) -> Self {
        self.base_url = s!(base.trim_end_matches('/'));
        self
    }

    /// "https://host/sirketler/?page=3"
    pub fn listing_url(&self, page: u32) -> String {
        join!(&self.base_url, &self.listing_path, "?page=", &page.to_string())
    }

    /// "https://host/<slug>/"
    pub fn profile_url(&self, slug: &str) -> String {
        join!(&self.base_url, "/", slug, "/")
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ChartConfig {
    pub input: PathBuf,
    pub out_dir: PathBuf,
    /// Categories with fewer companies are left out of the summary charts.
    pub min_companies: usize,
    /// Companies with fewer reviews are left out of the per-company charts.
    pub min_reviews: f64,
    pub size: (u32, u32),
    pub star_categories: Vec<String>,
    pub font_candidates: Vec<PathBuf>,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            input: PathBuf::from(DATA_CSV),
            out_dir: PathBuf::from(CHARTS_DIR),
            min_companies: MIN_COMPANIES,
            min_reviews: MIN_REVIEWS,
            size: CHART_SIZE,
            star_categories: STAR_CATEGORIES.iter().map(|c| s!(*c)).collect(),
            font_candidates: FONT_CANDIDATES.iter().map(PathBuf::from).collect(),
        }
    }
}

impl ChartConfig {
    pub fn chart_path(&self, file_name: &str) -> PathBuf {
        self.out_dir.join(file_name)
    }

    pub fn with_paths(mut self, input: &Path, out_dir: &Path) -> Self {
        self.input = input.to_path_buf();
        self.out_dir = out_dir.to_path_buf();
        self
    }
}
