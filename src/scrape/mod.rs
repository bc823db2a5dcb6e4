// src/scrape/mod.rs
mod scrape;
pub use scrape::{collect_stubs, dedup_stubs, run, scrape_company, RunSummary};
