// tests/fetcher.rs
use std::io::{Read, Write};
use std::net::TcpListener;
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::{Duration, Instant};

use bildir_scrape::config::ScrapeConfig;
use bildir_scrape::core::{Fetch, Fetcher};
use bildir_scrape::data::CompanyRecord;
use bildir_scrape::scrape;

fn config(base: &str) -> ScrapeConfig {
    ScrapeConfig {
        request_delay: Duration::ZERO,
        timeout: Duration::from_secs(5),
        ..ScrapeConfig::default()
    }
    .with_base_url(base)
}

struct Server {
    base: String,
    /// Request line and headers of every request, in arrival order.
    heads: Arc<Mutex<Vec<String>>>,
}

impl Server {
    fn hits(&self) -> usize {
        self.heads.lock().unwrap().len()
    }
}

/// Answer every connection with `status` and `body`, keeping each request head.
fn serve(status: &'static str, body: &'static str) -> Server {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let base = format!("http://{}", listener.local_addr().unwrap());
    let heads = Arc::new(Mutex::new(Vec::new()));
    let seen = Arc::clone(&heads);

    thread::spawn(move || {
        for stream in listener.incoming() {
            let Ok(mut stream) = stream else { break };
            let mut request = Vec::new();
            let mut buf = [0u8; 1024];
            while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                match stream.read(&mut buf) {
                    Ok(0) | Err(_) => break,
                    Ok(n) => request.extend_from_slice(&buf[..n]),
                }
            }
            seen.lock().unwrap().push(String::from_utf8_lossy(&request).into_owned());
            let response = format!(
                "HTTP/1.1 {status}\r\nContent-Type: text/html; charset=utf-8\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            );
            let _ = stream.write_all(response.as_bytes());
        }
    });

    Server { base, heads }
}

/// Value of header `name` in a raw request head, names compared case-insensitively.
fn header<'h>(head: &'h str, name: &str) -> Option<&'h str> {
    head.lines().find_map(|line| {
        let (key, value) = line.split_once(':')?;
        key.trim().eq_ignore_ascii_case(name).then(|| value.trim())
    })
}

#[test]
fn ok_response_returns_body() {
    let server = serve("200 OK", "<html><body><h1>Wolt</h1></body></html>");
    let fetcher = Fetcher::new(&config(&server.base)).unwrap();

    let body = fetcher.fetch(&format!("{}/wolt/", server.base)).unwrap();
    assert!(body.contains("<h1>Wolt</h1>"));
    assert_eq!(server.hits(), 1);
}

#[test]
fn every_request_carries_the_browser_headers() {
    let server = serve("503 Service Unavailable", "busy");
    let cfg = config(&server.base);
    let fetcher = Fetcher::new(&cfg).unwrap();

    assert!(fetcher.fetch(&format!("{}/wolt/", server.base)).is_none());

    let heads = server.heads.lock().unwrap();
    assert_eq!(heads.len(), 3);
    for head in heads.iter() {
        assert!(head.starts_with("GET /wolt/ "), "{head}");
        assert_eq!(header(head, "user-agent"), Some(cfg.user_agent.as_str()));
        assert_eq!(header(head, "accept-language"), Some(cfg.accept_language.as_str()));
        assert_eq!(header(head, "accept"), Some(cfg.accept.as_str()));
    }
}

#[test]
fn error_status_is_retried_then_given_up() {
    let server = serve("503 Service Unavailable", "busy");
    let fetcher = Fetcher::new(&config(&server.base)).unwrap();

    assert!(fetcher.fetch(&format!("{}/wolt/", server.base)).is_none());
    assert_eq!(server.hits(), 3);
}

#[test]
fn retries_back_off_linearly() {
    let server = serve("503 Service Unavailable", "busy");
    let delay = Duration::from_millis(40);
    let cfg = ScrapeConfig { request_delay: delay, ..config(&server.base) };
    let fetcher = Fetcher::new(&cfg).unwrap();

    let started = Instant::now();
    assert!(fetcher.fetch(&format!("{}/wolt/", server.base)).is_none());
    let elapsed = started.elapsed();

    // Sleeps of 1x and 2x the delay between three attempts, none after the last.
    assert_eq!(server.hits(), 3);
    assert!(elapsed >= delay * 3, "{elapsed:?}");
    assert!(elapsed < delay * 6 + Duration::from_secs(2), "{elapsed:?}");
}

#[test]
fn refused_connection_degrades_the_record() {
    // Bind then drop to get a local port nobody listens on.
    let port = TcpListener::bind("127.0.0.1:0").unwrap().local_addr().unwrap().port();
    let cfg = config(&format!("http://127.0.0.1:{port}"));
    let fetcher = Fetcher::new(&cfg).unwrap();

    let rec = scrape::scrape_company(&fetcher, &cfg, "azercell");
    assert_eq!(rec, CompanyRecord::skeleton("azercell", &cfg.profile_url("azercell")));
}
