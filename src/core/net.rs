// src/core/net.rs
// Blocking HTTP GET with bounded retries.

use std::{thread, time::Duration};

use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE};
use scraper::Html;
use tracing::{error, warn};

use crate::config::ScrapeConfig;
use crate::error::ScrapeError;

/// Anything that can hand back a page body for a URL.
///
/// `None` means "gave up"; callers decide whether that is fatal (first listing
/// page) or just an empty result (everything else).
pub trait Fetch {
    fn fetch(&self, url: &str) -> Option<String>;

    fn document(&self, url: &str) -> Option<Html> {
        self.fetch(url).map(|body| Html::parse_document(&body))
    }
}

pub struct Fetcher {
    client: Client,
    max_retries: u32,
    backoff: Duration,
}

impl Fetcher {
    pub fn new(cfg: &ScrapeConfig) -> Result<Self, ScrapeError> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_str(&cfg.accept_language)?);
        headers.insert(ACCEPT, HeaderValue::from_str(&cfg.accept)?);

        let client = Client::builder()
            .user_agent(cfg.user_agent.as_str())
            .default_headers(headers)
            .timeout(cfg.timeout)
            .build()?;

        Ok(Self {
            client,
            max_retries: cfg.max_retries.max(1),
            backoff: cfg.request_delay,
        })
    }

    fn get_once(&self, url: &str) -> Result<String, reqwest::Error> {
        self.client.get(url).send()?.error_for_status()?.text()
    }
}

impl Fetch for Fetcher {
    fn fetch(&self, url: &str) -> Option<String> {
        for attempt in 1..=self.max_retries {
            match self.get_once(url) {
                Ok(body) => return Some(body),
                Err(e) => {
                    warn!("Attempt {attempt}/{} failed for {url}: {e}", self.max_retries);
                    if attempt < self.max_retries {
                        thread::sleep(self.backoff * attempt);
                    }
                }
            }
        }
        error!("Giving up on {url}");
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Canned;

    impl Fetch for Canned {
        fn fetch(&self, url: &str) -> Option<String> {
            (url == "ok").then(|| s!("<html><body><h1>hi</h1></body></html>"))
        }
    }

    #[test]
    fn document_parses_fetched_body() {
        let doc = Canned.document("ok").unwrap();
        let h1 = crate::core::html::first_text(doc.root_element(), "h1");
        assert_eq!(h1, "hi");
        assert!(Canned.document("missing").is_none());
    }

    #[test]
    fn bad_header_value_is_rejected() {
        let mut cfg = ScrapeConfig::default();
        cfg.accept_language = s!("bad\nvalue");
        assert!(matches!(Fetcher::new(&cfg), Err(ScrapeError::Header(_))));
    }
}
