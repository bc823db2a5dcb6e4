// src/core/mod.rs

pub mod extract;
pub mod html;
pub mod net;
pub mod sanitize;

pub use extract::{first_hit, Page, Probe};
pub use net::{Fetch, Fetcher};
