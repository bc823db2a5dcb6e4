//! # Scraping “specs” module
//!
//! Page-specific scraping specifications for bildir.az. Each spec covers one
//! kind of page and encodes *where the data lives in the HTML* and *how to
//! extract it robustly*.
//!
//! ## What lives here
//! - **Pure HTML parsing**: every function takes an already parsed document.
//! - **Selector choice & precedence**: ordered `Probe` lists, first non-empty
//!   answer wins (see `core::extract`).
//! - **Light shaping** into `CompanyStub` / `CompanyRecord`.
//!
//! ## What does **not** live here
//! - Fetching, retries and delays (`core::net`, `scrape`).
//! - Deduplication, listing backfill and the CSV output (`scrape`, `file`).
//!
//! ## Typical call chain
//! ```text
//! scrape::run → Fetch::document → specs::listing::{total_pages, parse_listing}
//!             → Fetch::fetch    → specs::company::parse_company
//!             → file::RecordWriter::append
//! ```
//!
//! ## Conventions
//! - Missing markup yields `""`, never an error and never a guessed value.
//! - Decimal commas become dots; percentages drop the `%`.
//! - Specs are tested offline against fixtures in `tests/fixtures/`.
pub mod company;
pub mod listing;
