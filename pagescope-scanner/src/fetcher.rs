use crate::assets::extract_asset_urls;
use crate::error::{Result, ScanError};
use crate::result::{AssetProbe, PageAssets, StringCheck};
use crate::search::{encode_page_url, presence};
use crate::sitemap::parse_sitemap;
use reqwest::Client;
use reqwest::header::{CONTENT_LENGTH, HeaderMap};
use std::time::{Duration, Instant};
use tracing::{debug, info};
use url::Url;

pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

const USER_AGENT: &str = concat!("pagescope/", env!("CARGO_PKG_VERSION"));

/// Sequential HTTP front end shared by all three pipelines.
///
/// Every method awaits a single request before returning, so a caller that
/// awaits them in turn keeps exactly one request in flight.
pub struct Fetcher {
    client: Client,
}

impl Fetcher {
    pub fn new() -> Result<Self> {
        Self::with_timeout(DEFAULT_TIMEOUT_SECS)
    }

    pub fn with_timeout(timeout_secs: u64) -> Result<Self> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(timeout_secs.div_ceil(2)))
            .redirect(reqwest::redirect::Policy::limited(10))
            .build()?;

        Ok(Self { client })
    }

    /// GET a URL and return its body, whatever the status code.
    pub async fn fetch_text(&self, url: &str) -> Result<String> {
        debug!("Fetching {}", url);

        let start = Instant::now();
        let response = self.client.get(url).send().await?;
        let status = response.status();
        let body = response.text().await?;

        debug!(
            "Fetched {} ({}, {} bytes, {:?})",
            url,
            status.as_u16(),
            body.len(),
            start.elapsed()
        );
        Ok(body)
    }

    /// Fetch and parse a sitemap. Any failure aborts: there is no partial list.
    pub async fn fetch_sitemap(&self, sitemap_url: &str) -> Result<Vec<String>> {
        let url = Url::parse(sitemap_url)
            .map_err(|e| ScanError::InvalidUrl(format!("{}: {}", sitemap_url, e)))?;

        let body = self.fetch_text(url.as_str()).await?;
        let urls = parse_sitemap(&body)?;

        info!("Found {} URLs in sitemap {}", urls.len(), sitemap_url);
        Ok(urls)
    }

    /// Fetch a page and list the assets it references. Failures are returned
    /// on the record for the caller to report.
    pub async fn discover_assets(&self, page_url: &str) -> PageAssets {
        info!("Processing URL: {}", page_url);

        match self.fetch_text(page_url).await {
            Ok(html) => {
                let assets = extract_asset_urls(&html, page_url);
                debug!("{} assets referenced by {}", assets.len(), page_url);
                PageAssets::new(page_url.to_string(), assets)
            }
            Err(e) => {
                debug!("Error fetching page {}: {}", page_url, e);
                PageAssets::with_error(page_url.to_string(), e.to_string())
            }
        }
    }

    /// HEAD an asset and read its size from `content-length`.
    pub async fn measure_asset(&self, asset_url: &str) -> AssetProbe {
        match self.client.head(asset_url).send().await {
            Ok(response) => {
                let size_kb = size_from_headers(response.headers());
                debug!(
                    "HEAD {} -> {} ({:.2} KB)",
                    asset_url,
                    response.status().as_u16(),
                    size_kb
                );
                AssetProbe::new(asset_url.to_string(), size_kb)
            }
            Err(e) => {
                debug!("Error fetching size for {}: {}", asset_url, e);
                AssetProbe::with_error(asset_url.to_string(), ScanError::from(e).to_string())
            }
        }
    }

    /// Fetch a page's raw source and report which search strings it contains.
    pub async fn check_strings(
        &self,
        index: usize,
        page_url: &str,
        search_strings: &[String],
    ) -> StringCheck {
        let outcome = match encode_page_url(page_url) {
            Ok(url) => self.fetch_text(url.as_str()).await,
            Err(e) => Err(e),
        };

        match outcome {
            Ok(source) => StringCheck::new(
                index,
                page_url.to_string(),
                presence(&source, search_strings),
            ),
            Err(e) => {
                debug!("Error occurred for URL ({}): {}: {}", index, page_url, e);
                StringCheck::with_error(index, page_url.to_string(), e.to_string())
            }
        }
    }
}

/// Size in kilobytes from a `content-length` header; 0 when missing or unparsable.
pub fn size_from_headers(headers: &HeaderMap) -> f64 {
    let Some(value) = headers.get(CONTENT_LENGTH) else {
        return 0.0;
    };

    match value.to_str().ok().and_then(|v| v.trim().parse::<u64>().ok()) {
        Some(bytes) => bytes_to_kb(bytes),
        None => {
            debug!("Unparsable content-length: {:?}", value);
            0.0
        }
    }
}

pub fn bytes_to_kb(bytes: u64) -> f64 {
    bytes as f64 / 1024.0
}
