use crate::config::{AssetScanConfig, PageSource, PageWeighConfig, StringScanConfig};
use crate::report::{AssetReport, PageWeightReport, StringScanReport};
use indicatif::{ProgressBar, ProgressStyle};
use pagescope_scanner::error::Result;
use pagescope_scanner::result::{AssetRecord, PageWeight, StringCheck};
use pagescope_scanner::Fetcher;
use std::sync::Arc;
use tracing::{info, warn};

/// Called with each oversized asset as soon as it is measured
pub type AssetRecordCallback = Arc<dyn Fn(&AssetRecord) + Send + Sync>;

/// Called with each page total as soon as the page is weighed
pub type PageWeightCallback = Arc<dyn Fn(&PageWeight) + Send + Sync>;

/// Called with each matrix row as soon as the page is checked
pub type StringCheckCallback = Arc<dyn Fn(&StringCheck) + Send + Sync>;

/// Resolve a page source into the ordered list of pages to visit.
///
/// A sitemap that cannot be fetched or parsed aborts the run.
pub async fn resolve_pages(fetcher: &Fetcher, source: &PageSource) -> Result<Vec<String>> {
    match source {
        PageSource::Urls(urls) => Ok(urls.clone()),
        PageSource::Sitemap(sitemap_url) => fetcher.fetch_sitemap(sitemap_url).await,
    }
}

fn progress_bar(len: usize, show: bool) -> ProgressBar {
    if !show {
        return ProgressBar::hidden();
    }

    let pb = ProgressBar::new(len as u64);
    if let Ok(style) = ProgressStyle::with_template(
        "{spinner:.cyan} Processing pages [{bar:40.cyan/blue}] {pos}/{len} {wide_msg}",
    ) {
        pb.set_style(style.progress_chars("=> "));
    }
    pb
}

/// List every asset at or above the threshold, page by page.
pub async fn execute_asset_scan(
    config: &AssetScanConfig,
    on_record: Option<AssetRecordCallback>,
) -> Result<AssetReport> {
    let fetcher = Fetcher::with_timeout(config.timeout_secs)?;
    let pages = resolve_pages(&fetcher, &config.source).await?;
    info!(
        "Checking {} page(s) for assets >= {:.2} KB",
        pages.len(),
        config.threshold_kb
    );

    let pb = progress_bar(pages.len(), config.show_progress);
    let mut report = AssetReport {
        threshold_kb: config.threshold_kb,
        ..Default::default()
    };

    for page_url in &pages {
        pb.set_message(page_url.clone());
        let page = fetcher.discover_assets(page_url).await;
        report.pages_processed += 1;
        if let Some(ref error) = page.error {
            report.pages_failed += 1;
            pb.suspend(|| warn!("Error fetching page {}: {}", page_url, error));
        }

        for asset_url in &page.assets {
            let probe = fetcher.measure_asset(asset_url).await;
            report.assets_checked += 1;
            if let Some(ref error) = probe.error {
                report.assets_failed += 1;
                pb.suspend(|| warn!("Error fetching size for {}: {}", probe.url, error));
            }

            if probe.size_kb >= config.threshold_kb {
                let record = AssetRecord {
                    page_url: page_url.clone(),
                    asset_url: probe.url,
                    size_kb: probe.size_kb,
                };
                if let Some(ref callback) = on_record {
                    pb.suspend(|| callback(&record));
                }
                report.records.push(record);
            }
        }

        pb.inc(1);
    }

    pb.finish_and_clear();
    info!(
        "Asset scan complete: {} of {} assets over threshold",
        report.records.len(),
        report.assets_checked
    );
    Ok(report)
}

/// Sum every asset on each page into one page weight.
pub async fn execute_page_weigh(
    config: &PageWeighConfig,
    on_page: Option<PageWeightCallback>,
) -> Result<PageWeightReport> {
    let fetcher = Fetcher::with_timeout(config.timeout_secs)?;
    let pages = resolve_pages(&fetcher, &config.source).await?;
    info!("Weighing {} page(s)", pages.len());

    let pb = progress_bar(pages.len(), config.show_progress);
    let mut report = PageWeightReport::default();

    for page_url in &pages {
        pb.set_message(page_url.clone());
        let page = fetcher.discover_assets(page_url).await;

        let weight = match page.error {
            Some(error) => {
                pb.suspend(|| warn!("Error fetching page {}: {}", page_url, error));
                PageWeight::with_error(page_url.clone(), error)
            }
            None => {
                let mut probes = Vec::with_capacity(page.assets.len());
                for asset_url in &page.assets {
                    probes.push(fetcher.measure_asset(asset_url).await);
                }
                PageWeight::from_probes(page_url.clone(), &probes)
            }
        };

        if weight.assets_failed > 0 {
            pb.suspend(|| {
                warn!(
                    "{} of {} assets on {} could not be measured",
                    weight.assets_failed, weight.assets_measured, page_url
                )
            });
        }
        if let Some(ref callback) = on_page {
            pb.suspend(|| callback(&weight));
        }
        report.pages.push(weight);
        pb.inc(1);
    }

    pb.finish_and_clear();
    info!("Page weigh complete: {:.2} kB total", report.total_kb());
    Ok(report)
}

/// Check each page's raw source for every search string.
pub async fn execute_string_scan(
    config: &StringScanConfig,
    on_row: Option<StringCheckCallback>,
) -> Result<StringScanReport> {
    let fetcher = Fetcher::with_timeout(config.timeout_secs)?;
    let pages = resolve_pages(&fetcher, &config.source).await?;
    info!(
        "Scanning {} page(s) for {} search string(s)",
        pages.len(),
        config.search_strings.len()
    );

    let pb = progress_bar(pages.len(), config.show_progress);
    let mut report = StringScanReport {
        search_strings: config.search_strings.clone(),
        rows: Vec::with_capacity(pages.len()),
    };

    for (index, page_url) in pages.iter().enumerate() {
        pb.set_message(page_url.clone());
        let row = fetcher
            .check_strings(index + 1, page_url, &config.search_strings)
            .await;

        if let Some(ref error) = row.error {
            pb.suspend(|| {
                warn!("Error occurred for URL ({}): {}: {}", row.index, page_url, error)
            });
        }
        if let Some(ref callback) = on_row {
            pb.suspend(|| callback(&row));
        }
        report.rows.push(row);
        pb.inc(1);
    }

    pb.finish_and_clear();
    info!("String scan complete: {} error(s)", report.errors());
    Ok(report)
}
