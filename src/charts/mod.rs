// src/charts/mod.rs
//! Chart generation from the scraped table.
//!
//! - `stats`: pure aggregations (category summary, buckets, rankings).
//! - `draw`: plotters bar-chart primitives and PNG output.
//! - `routines`: the ten fixed charts.
//!
//! Charts are independent of each other; they share only the loaded rows.

pub mod draw;
pub mod routines;
pub mod stats;

use std::{fs, path::PathBuf, sync::OnceLock};

use plotters::style::{register_font, FontStyle};
use tracing::{debug, warn};

use crate::config::ChartConfig;
use crate::data::CompanyRecord;
use crate::error::ChartError;
use crate::file::ensure_directory;
use stats::CategorySummary;

/// Register the first readable TrueType font as "sans-serif". Runs once per
/// process; later calls report the first outcome.
pub fn ensure_font(candidates: &[PathBuf]) -> Result<(), ChartError> {
    static REGISTERED: OnceLock<Option<PathBuf>> = OnceLock::new();

    match REGISTERED.get_or_init(|| register_first(candidates)) {
        Some(_) => Ok(()),
        None => Err(ChartError::NoFont { tried: candidates.to_vec() }),
    }
}

fn register_first(candidates: &[PathBuf]) -> Option<PathBuf> {
    for path in candidates {
        let Ok(bytes) = fs::read(path) else { continue };
        // plotters keeps font data for the life of the process.
        let bytes: &'static [u8] = Box::leak(bytes.into_boxed_slice());
        match register_font("sans-serif", FontStyle::Normal, bytes) {
            Ok(()) => {
                debug!("Using font {}", path.display());
                return Some(path.clone());
            }
            Err(_) => warn!("Not a usable font: {}", path.display()),
        }
    }
    None
}

/// Render all ten charts into `cfg.out_dir`, calling `on_saved` with each file
/// name as it is written. Stops at the first chart that fails.
pub fn render_all(
    rows: &[CompanyRecord],
    summary: &[CategorySummary],
    cfg: &ChartConfig,
    on_saved: &mut dyn FnMut(&str),
) -> Result<Vec<PathBuf>, ChartError> {
    ensure_directory(&cfg.out_dir)?;
    ensure_font(&cfg.font_candidates)?;

    let steps: [(&str, &dyn Fn() -> Result<PathBuf, ChartError>); 10] = [
        (routines::MARKET_LANDSCAPE, &|| routines::market_landscape(rows, cfg)),
        (routines::AVG_RATING, &|| routines::avg_rating(summary, cfg)),
        (routines::REVIEW_VOLUME, &|| routines::review_volume(summary, cfg)),
        (routines::RESPONSE_VS_RESOLUTION, &|| routines::response_vs_resolution(summary, cfg)),
        (routines::CUSTOMER_LOYALTY, &|| routines::customer_loyalty(summary, cfg)),
        (routines::RATING_DISTRIBUTION, &|| routines::rating_distribution(rows, cfg)),
        (routines::MOST_REVIEWED, &|| routines::most_reviewed(rows, cfg)),
        (routines::BEST_VS_WORST, &|| routines::best_vs_worst(rows, cfg)),
        (routines::SOCIAL_PRESENCE, &|| routines::social_presence(rows, cfg)),
        (routines::STAR_BREAKDOWN, &|| routines::star_breakdown(rows, cfg)),
    ];

    let mut written = Vec::with_capacity(steps.len());
    for (name, step) in steps {
        debug!("Rendering {name}");
        written.push(step()?);
        on_saved(name);
    }
    Ok(written)
}
