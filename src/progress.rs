// src/progress.rs
/// Lightweight progress reporting used by the scrape run.
/// Frontends implement this to surface status to users; logging goes through
/// `tracing` regardless.
pub trait Progress {
    /// Called once the company list is known, with the number of companies.
    fn begin(&mut self, _total: usize) {}

    /// Free-form status line for human eyes.
    fn log(&mut self, _msg: &str) {}

    /// One company row was written with data from its detail page.
    fn item_done(&mut self, _index: usize, _slug: &str) {}

    /// One company row was written from the listing only (detail fetch failed).
    fn item_failed(&mut self, _index: usize, _slug: &str) {}

    /// Called at the end, successful or not.
    fn finish(&mut self) {}
}

/// A no-op progress sink.
pub struct NullProgress;
impl Progress for NullProgress {}
