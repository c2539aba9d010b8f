// fetcher.rs
use crate::scraper::ScraperError;
use log::{debug, warn};
use rand::Rng;
use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT_LANGUAGE, REFERER};
use reqwest::StatusCode;
use std::time::{Duration, Instant};

const USER_AGENT: &str =
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/121.0 Safari/537.36";

const ZENROWS_ENDPOINT: &str = "https://api.zenrows.com/v1/";

/// Blocking HTML fetcher shared by the site scrapers.
///
/// With a ZenRows key every page goes through their rendering proxy,
/// otherwise the site is requested directly.
pub struct PageFetcher {
    client: Client,
    zenrows_api_key: Option<String>,
    max_attempts: u64,
}

impl PageFetcher {
    pub fn new(zenrows_api_key: Option<String>) -> Result<Self, ScraperError> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(60))
            .build()
            .map_err(|e| ScraperError::Network(e.to_string()))?;

        Ok(Self {
            client,
            zenrows_api_key,
            max_attempts: 3,
        })
    }

    pub fn fetch_html(&self, url: &str) -> Result<String, ScraperError> {
        const MAX_BACKOFF_SECS: u64 = 10;
        const JITTER_MAX_SECS: u64 = 2;

        let mut last_err = None;

        for attempt in 1..=self.max_attempts {
            let start = Instant::now();

            match self.try_fetch_html(url) {
                Ok(html) => {
                    debug!("fetched {url} on attempt {attempt} in {:?}", start.elapsed());
                    return Ok(html);
                }
                // A block will not lift by retrying a few seconds later.
                Err(e @ ScraperError::Blocked(_)) => return Err(e),
                Err(e) => {
                    warn!("attempt {attempt} for {url} failed in {:?}: {e}", start.elapsed());
                    last_err = Some(e);

                    if attempt < self.max_attempts {
                        let base = std::cmp::min(2 * attempt, MAX_BACKOFF_SECS);
                        let jitter = rand::thread_rng().gen_range(0..=JITTER_MAX_SECS);
                        std::thread::sleep(Duration::from_secs(base + jitter));
                    }
                }
            }
        }

        Err(last_err.unwrap_or_else(|| ScraperError::Network(format!("no attempt made for {url}"))))
    }

    fn try_fetch_html(&self, url: &str) -> Result<String, ScraperError> {
        let mut headers = HeaderMap::new();
        headers.insert(REFERER, HeaderValue::from_static("https://www.google.com/"));
        headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("en-US,en;q=0.9"));

        let request = match &self.zenrows_api_key {
            Some(key) => self.client.get(ZENROWS_ENDPOINT).query(&[
                ("url", url),
                ("apikey", key.as_str()),
                ("js_render", "true"),
                ("original_status", "true"),
            ]),
            None => self.client.get(url),
        };

        let resp = request
            .headers(headers)
            .send()
            .map_err(|e| ScraperError::Network(e.to_string()))?;

        let status = resp.status();
        let text = resp
            .text()
            .map_err(|e| ScraperError::Network(e.to_string()))?;

        match status {
            s if s.is_success() => Ok(text),
            StatusCode::FORBIDDEN | StatusCode::TOO_MANY_REQUESTS => {
                Err(ScraperError::Blocked(format!("HTTP {status} for {url}")))
            }
            _ => Err(ScraperError::Network(format!("HTTP {status} for {url}"))),
        }
    }
}
