// src/lib.rs

#[macro_use]
pub mod macros;

#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod core;
pub mod data;
pub mod error;
pub mod specs;

pub mod charts;
pub mod file;
pub mod log;
pub mod progress;
pub mod scrape;
pub mod store;
