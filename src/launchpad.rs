//! Anonymous client for the Launchpad web service.
//!
//! Speaks the small slice of the Launchpad REST API this tool needs: the
//! distribution series collection. The production endpoint is
//! [`crate::config::PRODUCTION_SERVICE_ROOT`]; tests inject a local HTTP
//! server URL through the same constructor.

use anyhow::{Context, Result, bail};
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;
use time::OffsetDateTime;

use crate::cache::PageCache;

/// Consumer name identifying this tool to the service, sent as the User-Agent.
const CONSUMER_NAME: &str = "ubuntu-series-gen";

/// Safeguard against a misbehaving server handing out endless collection pages.
const MAX_COLLECTION_PAGES: usize = 50;

// ---------------------------------------------------------------------------
// Wire model
// ---------------------------------------------------------------------------

/// One page of a Launchpad collection.
///
/// Collections are served in fixed-size pages; `next_collection_link` is
/// absent on the last page. `#[serde(default)]` tolerates schema expansion
/// and missing optional data without failing deserialization.
#[derive(Debug, Deserialize)]
struct CollectionPage {
    #[serde(default)]
    entries: Vec<DistroSeries>,
    #[serde(default)]
    next_collection_link: Option<String>,
}

/// A distribution series record: one release of the distribution.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct DistroSeries {
    /// Codename alias, e.g. "jammy".
    pub name: String,
    /// Dotted version identifier, e.g. "22.04".
    pub version: String,
    /// Whether the series is still officially supported.
    #[serde(default)]
    pub supported: bool,
    /// When the series was released. Null for upcoming series.
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub datereleased: Option<OffsetDateTime>,
}

// ---------------------------------------------------------------------------
// LaunchpadClient
// ---------------------------------------------------------------------------

/// Read-only Launchpad client bound to one service root.
#[derive(Debug)]
pub struct LaunchpadClient {
    client: reqwest::blocking::Client,
    root_url: String,
    cache: PageCache,
}

impl LaunchpadClient {
    /// Log in anonymously against a service root.
    ///
    /// Builds the HTTP client with the consumer name and the connect/read
    /// timeout, then performs one request against the root to verify the
    /// service is reachable for anonymous reads. `cache_dir` receives the
    /// response cache; the directory is owned by the caller.
    ///
    /// `root_url` is trimmed and stripped of trailing slashes to prevent
    /// double-slash issues when joining resource paths.
    pub fn login_anonymously(root_url: &str, cache_dir: &Path, timeout: Duration) -> Result<Self> {
        let normalized = root_url.trim().trim_end_matches('/').to_string();
        let client = reqwest::blocking::Client::builder()
            .user_agent(CONSUMER_NAME)
            .timeout(timeout)
            .connect_timeout(timeout)
            .build()
            .context("Failed to build HTTP client")?;

        let lp = Self {
            client,
            root_url: normalized,
            cache: PageCache::new(cache_dir),
        };

        lp.fetch(&lp.root_url)
            .context("Anonymous login to the Launchpad service failed")?;
        Ok(lp)
    }

    /// Enumerate every known series of a distribution.
    ///
    /// Follows `next_collection_link` until the last page, returning entries
    /// in service order.
    pub fn distro_series(&self, distribution: &str) -> Result<Vec<DistroSeries>> {
        let mut url = format!("{}/{distribution}/series", self.root_url);
        let mut entries = Vec::new();

        for _ in 0..MAX_COLLECTION_PAGES {
            let body = self.fetch(&url)?;
            let page: CollectionPage = serde_json::from_str(&body)
                .with_context(|| format!("failed to parse series collection from {url}"))?;
            entries.extend(page.entries);
            match page.next_collection_link {
                Some(next) => url = next,
                None => return Ok(entries),
            }
        }

        bail!(
            "series collection for '{distribution}' did not terminate after {MAX_COLLECTION_PAGES} pages"
        );
    }

    /// GET a URL, consulting the response cache first.
    ///
    /// Cache writes are best-effort: a failed write only costs a refetch.
    fn fetch(&self, url: &str) -> Result<String> {
        if let Some(body) = self.cache.get(url) {
            return Ok(body);
        }

        let resp = self
            .client
            .get(url)
            .send()
            .with_context(|| format!("failed to connect to {url}"))?;

        let body = map_http_error(resp)?;
        let _ = self.cache.put(url, &body);
        Ok(body)
    }
}

// ---------------------------------------------------------------------------
// HTTP error mapping
// ---------------------------------------------------------------------------

/// Read a response body and return it as a string, or map non-success status
/// codes to errors carrying a readable body snippet.
fn map_http_error(resp: reqwest::blocking::Response) -> Result<String> {
    let status = resp.status();
    let url = resp.url().to_string();
    let body = resp.text().unwrap_or_default();

    if status.is_success() {
        return Ok(body);
    }

    bail!(
        "Launchpad returned HTTP {status} for {url}: {}",
        body_snippet(&body)
    );
}

/// Truncate large error bodies to prevent noisy output.
fn body_snippet(body: &str) -> String {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return "no details provided".to_string();
    }
    if trimmed.len() > 200 {
        format!("{}...", &trimmed[..200])
    } else {
        trimmed.to_string()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
