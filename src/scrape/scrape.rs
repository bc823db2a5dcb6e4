// src/scrape/scrape.rs
use std::{collections::HashSet, thread};

use tracing::{info, warn};

use crate::{
    config::ScrapeConfig,
    core::{Fetch, Page},
    data::{CompanyRecord, CompanyStub},
    error::ScrapeError,
    file::RecordWriter,
    progress::Progress,
    specs::{company::parse_company, listing::{parse_listing, total_pages}},
};

/// What a finished run did.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub pages: u32,
    /// Cards seen across all listing pages, duplicates included.
    pub listed: usize,
    pub unique: usize,
    pub written: usize,
    /// Rows written without detail data because the profile page failed.
    pub degraded: usize,
}

/// Walk every listing page and return the cards in page order.
///
/// Page 1 is the only page whose failure stops the run; any later page that
/// cannot be fetched contributes nothing.
pub fn collect_stubs<F: Fetch + ?Sized>(
    fetch: &F,
    cfg: &ScrapeConfig,
    progress: &mut dyn Progress,
) -> Result<(u32, Vec<CompanyStub>), ScrapeError> {
    let first_url = cfg.listing_url(1);
    let first = fetch
        .document(&first_url)
        .ok_or_else(|| ScrapeError::FirstPage { url: first_url.clone() })?;

    let pages = total_pages(&first);
    let mut stubs = parse_listing(&first);
    info!("Listing has {pages} pages; page 1: {} companies", stubs.len());
    progress.log(&format!("Listing page 1/{pages}: {} companies", stubs.len()));
    thread::sleep(cfg.request_delay);

    for page in 2..=pages {
        let url = cfg.listing_url(page);
        let found = match fetch.document(&url) {
            Some(doc) => parse_listing(&doc),
            None => {
                warn!("Listing page {page} unavailable, skipping");
                Vec::new()
            }
        };
        info!("Page {page}/{pages}: {} companies", found.len());
        progress.log(&format!("Listing page {page}/{pages}: {} companies", found.len()));
        stubs.extend(found);
        thread::sleep(cfg.request_delay); // be polite
    }

    Ok((pages, stubs))
}

/// Drop repeated slugs, keeping the first occurrence and the original order.
pub fn dedup_stubs(mut stubs: Vec<CompanyStub>) -> Vec<CompanyStub> {
    let mut seen: HashSet<String> = HashSet::with_capacity(stubs.len());
    stubs.retain(|s| seen.insert(s.slug.clone()));
    stubs
}

/// Detail record for one slug. If the profile page cannot be fetched the
/// record carries only `slug` and `profile_url`.
pub fn scrape_company<F: Fetch + ?Sized>(fetch: &F, cfg: &ScrapeConfig, slug: &str) -> CompanyRecord {
    company_detail(fetch, cfg, slug).0
}

/// Record plus whether it fell back to the skeleton.
fn company_detail<F: Fetch + ?Sized>(fetch: &F, cfg: &ScrapeConfig, slug: &str) -> (CompanyRecord, bool) {
    let url = cfg.profile_url(slug);
    match fetch.fetch(&url) {
        Some(body) => (parse_company(&Page::parse(&body), slug, &url), false),
        None => (CompanyRecord::skeleton(slug, &url), true),
    }
}

/// Full pipeline: listing → dedup → one detail fetch per company → CSV row.
///
/// Every row is flushed as soon as it is written.
pub fn run<F: Fetch + ?Sized>(
    fetch: &F,
    cfg: &ScrapeConfig,
    progress: &mut dyn Progress,
) -> Result<RunSummary, ScrapeError> {
    let result = run_inner(fetch, cfg, progress);
    progress.finish();
    result
}

fn run_inner<F: Fetch + ?Sized>(
    fetch: &F,
    cfg: &ScrapeConfig,
    progress: &mut dyn Progress,
) -> Result<RunSummary, ScrapeError> {
    let (pages, stubs) = collect_stubs(fetch, cfg, progress)?;
    let listed = stubs.len();
    let unique = dedup_stubs(stubs);
    info!("{listed} companies listed, {} unique", unique.len());
    if unique.is_empty() {
        return Err(ScrapeError::NoCompanies);
    }

    let mut out = RecordWriter::create(&cfg.output)?;
    let mut summary = RunSummary { pages, listed, unique: unique.len(), ..Default::default() };

    progress.begin(unique.len());

    for (i, stub) in unique.iter().enumerate() {
        info!("[{}/{}] {}", i + 1, unique.len(), stub.slug);

        let (mut rec, degraded) = company_detail(fetch, cfg, &stub.slug);
        rec.backfill(stub);
        out.append(&rec)?;

        if degraded {
            summary.degraded += 1;
            warn!("{}: detail page unavailable, wrote listing data only", stub.slug);
            progress.item_failed(i, &stub.slug);
        } else {
            progress.item_done(i, &stub.slug);
        }
        thread::sleep(cfg.request_delay);
    }

    summary.written = out.rows();
    info!("Wrote {} rows to {}", summary.written, out.path().display());
    Ok(summary)
}
