// src/error.rs
use std::{io, path::PathBuf};
use thiserror::Error;

/// Failures that stop a scrape run. Per-page and per-company fetch failures
/// are not errors; they degrade to empty data (see `scrape::scrape_company`).
#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),

    #[error("invalid request header: {0}")]
    Header(#[from] reqwest::header::InvalidHeaderValue),

    #[error("could not fetch first listing page {url}")]
    FirstPage { url: String },

    #[error("no companies found on the listing pages")]
    NoCompanies,

    #[error("output file error: {0}")]
    Io(#[from] io::Error),

    #[error("CSV write error: {0}")]
    Csv(#[from] csv::Error),
}

#[derive(Debug, Error)]
pub enum ChartError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("CSV read error: {0}")]
    Csv(#[from] csv::Error),

    #[error("no usable TrueType font found (tried {tried:?})")]
    NoFont { tried: Vec<PathBuf> },

    #[error("drawing failed: {0}")]
    Draw(String),

    #[error("PNG encode failed: {0}")]
    Image(#[from] image::ImageError),
}

impl<E: std::error::Error + Send + Sync> From<plotters::drawing::DrawingAreaErrorKind<E>> for ChartError {
    fn from(e: plotters::drawing::DrawingAreaErrorKind<E>) -> Self {
        ChartError::Draw(e.to_string())
    }
}
