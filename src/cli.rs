// src/cli.rs
//! Entry points for the two binaries. Neither takes arguments; paths and
//! limits come from `config::consts`, log filtering from `RUST_LOG`.

use color_eyre::eyre::{Result, WrapErr};

use crate::charts::{self, stats};
use crate::config::{ChartConfig, ScrapeConfig};
use crate::core::Fetcher;
use crate::progress::Progress;
use crate::{scrape, store};

/// Console sink for the scrape run. Per-company lines come from the log; this
/// only frames the run and lists companies written without detail data.
#[derive(Default)]
pub struct ConsoleProgress {
    total: usize,
    failed: Vec<String>,
}

impl Progress for ConsoleProgress {
    fn begin(&mut self, total: usize) {
        self.total = total;
        println!("Scraping {total} companies …");
    }

    fn log(&mut self, msg: &str) {
        println!("{msg}");
    }

    fn item_failed(&mut self, _index: usize, slug: &str) {
        self.failed.push(s!(slug));
    }

    fn finish(&mut self) {
        if !self.failed.is_empty() {
            println!(
                "{}/{} companies have listing data only: {}",
                self.failed.len(),
                self.total,
                self.failed.join(", ")
            );
        }
    }
}

pub fn run_scrape() -> Result<()> {
    let cfg = ScrapeConfig::default();
    let fetcher = Fetcher::new(&cfg).wrap_err("could not set up the HTTP client")?;

    let mut progress = ConsoleProgress::default();
    let summary = scrape::run(&fetcher, &cfg, &mut progress)
        .wrap_err_with(|| format!("scrape into {} failed", cfg.output.display()))?;

    println!(
        "Done: {} rows written to {} ({} listed over {} pages, {} unique).",
        summary.written,
        cfg.output.display(),
        summary.listed,
        summary.pages,
        summary.unique
    );
    Ok(())
}

pub fn run_charts() -> Result<()> {
    let cfg = ChartConfig::default();

    println!("Loading data …");
    let rows = store::load_records(&cfg.input)
        .wrap_err_with(|| format!("could not read {}", cfg.input.display()))?;
    println!("  {} companies loaded.", rows.len());

    let summary = stats::summarize(&rows, cfg.min_companies);
    println!("  {} categories with ≥{} companies.\n", summary.len(), cfg.min_companies);

    println!("Generating charts …");
    charts::render_all(&rows, &summary, &cfg, &mut |name| println!("  Saved: {name}"))?;

    println!("\nAll charts saved to: {}", cfg.out_dir.display());
    Ok(())
}
