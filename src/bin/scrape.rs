// src/bin/scrape.rs
use bildir_scrape::{cli, log};

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    log::init();
    cli::run_scrape()
}
