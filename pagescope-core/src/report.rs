// Console rows, CSV rendering and timestamped report files

use chrono::{DateTime, Local};
use pagescope_scanner::error::Result;
use pagescope_scanner::result::{AssetRecord, PageWeight, StringCheck};
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

const FOUND: &str = "🟢";
const MISSING: &str = "🔴";

/// Oversized assets found across all pages of a run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AssetReport {
    pub threshold_kb: f64,
    pub pages_processed: usize,
    pub pages_failed: usize,
    pub assets_checked: usize,
    pub assets_failed: usize,
    pub records: Vec<AssetRecord>,
}

/// One total per page, in sitemap order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PageWeightReport {
    pub pages: Vec<PageWeight>,
}

/// The string presence matrix. Column order follows `search_strings`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StringScanReport {
    pub search_strings: Vec<String>,
    pub rows: Vec<StringCheck>,
}

/// The three kinds of CSV file a run can produce.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ReportKind {
    LargeAssets,
    PageSizes,
    SitemapResults,
}

impl ReportKind {
    pub fn base_name(&self) -> &'static str {
        match self {
            ReportKind::LargeAssets => "large_assets",
            ReportKind::PageSizes => "page_sizes",
            ReportKind::SitemapResults => "results-sitemap",
        }
    }

    /// The string scan report has always been stamped to the minute.
    pub fn timestamp_format(&self) -> &'static str {
        match self {
            ReportKind::LargeAssets | ReportKind::PageSizes => "%Y%m%d_%H%M%S",
            ReportKind::SitemapResults => "%Y%m%d_%H%M",
        }
    }

    pub fn file_name(&self, now: &DateTime<Local>) -> String {
        format!(
            "{}_{}.csv",
            self.base_name(),
            now.format(self.timestamp_format())
        )
    }
}

// ============================================================================
// Console output
// ============================================================================

pub fn asset_table_header() -> String {
    format!("Page URL | Asset URL | Size (KB)\n{}", "-".repeat(100))
}

pub fn format_asset_row(record: &AssetRecord) -> String {
    format!(
        "{} | {} | {:.2} kB",
        record.page_url, record.asset_url, record.size_kb
    )
}

pub fn page_weight_table_header() -> String {
    format!("URL | Pagesize (kB)\n{}", "-".repeat(50))
}

pub fn format_page_weight_row(page: &PageWeight) -> String {
    format!("{} | {:.2} kB", page.url, page.size_kb)
}

pub fn string_scan_table_header(search_strings: &[String]) -> String {
    let mut columns = vec!["Index".to_string(), "URL".to_string()];
    columns.extend(search_strings.iter().map(|s| contains_column(s)));
    columns.push("Error".to_string());

    format!("{}\n{}", columns.join(" | "), "-".repeat(100))
}

/// Error rows leave one blank cell per search string.
pub fn format_string_check_row(row: &StringCheck, search_count: usize) -> String {
    let mut cells = vec![row.index.to_string(), row.url.clone()];

    if row.error.is_some() {
        cells.extend(std::iter::repeat_n(String::new(), search_count));
    } else {
        cells.extend(
            row.found
                .iter()
                .map(|&found| if found { FOUND } else { MISSING }.to_string()),
        );
    }
    cells.push(row.error.clone().unwrap_or_default());

    cells.join(" | ")
}

fn contains_column(search_string: &str) -> String {
    format!("Contains '{}'", search_string)
}

// ============================================================================
// CSV output
// ============================================================================

/// Quote a field if it contains a delimiter, quote or line break.
pub fn escape_csv_field(field: &str) -> String {
    if field.contains(',') || field.contains('"') || field.contains('\n') || field.contains('\r')
    {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

fn csv_line<I, S>(fields: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut line = fields
        .into_iter()
        .map(|f| escape_csv_field(f.as_ref()))
        .collect::<Vec<_>>()
        .join(",");
    line.push('\n');
    line
}

pub fn generate_asset_csv(report: &AssetReport) -> String {
    let mut csv = csv_line(["Page URL", "Asset URL", "Size (KB)"]);
    for record in &report.records {
        csv.push_str(&csv_line([
            record.page_url.clone(),
            record.asset_url.clone(),
            format!("{:.2}", record.size_kb),
        ]));
    }
    csv
}

pub fn generate_page_weight_csv(report: &PageWeightReport) -> String {
    let mut csv = csv_line(["URL", "Pagesize (kB)"]);
    for page in &report.pages {
        csv.push_str(&csv_line([page.url.clone(), format!("{:.2}", page.size_kb)]));
    }
    csv
}

pub fn generate_string_scan_csv(report: &StringScanReport) -> String {
    let mut header = vec!["Index".to_string(), "URL".to_string()];
    header.extend(report.search_strings.iter().map(|s| contains_column(s)));
    header.push("Error".to_string());

    let mut csv = csv_line(header);
    for row in &report.rows {
        let mut fields = vec![row.index.to_string(), row.url.clone()];
        if row.error.is_some() {
            fields.extend(std::iter::repeat_n(String::new(), report.search_strings.len()));
        } else {
            fields.extend(row.found.iter().map(|found| found.to_string()));
        }
        fields.push(row.error.clone().unwrap_or_default());
        csv.push_str(&csv_line(fields));
    }
    csv
}

pub fn save_report(content: &str, path: &Path) -> Result<()> {
    let mut file = File::create(path)?;
    file.write_all(content.as_bytes())?;
    Ok(())
}

/// Write a CSV report into `dir` (created if missing) under a timestamped name.
pub fn write_csv_report(dir: &Path, kind: ReportKind, content: &str) -> Result<PathBuf> {
    fs::create_dir_all(dir)?;
    let path = dir.join(kind.file_name(&Local::now()));
    save_report(content, &path)?;
    Ok(path)
}

// ============================================================================
// Summaries
// ============================================================================

impl AssetReport {
    pub fn summary(&self) -> String {
        format!(
            "Pages processed: {} ({} failed)\nAssets checked: {} ({} failed)\nAssets >= {:.2} KB: {}",
            self.pages_processed,
            self.pages_failed,
            self.assets_checked,
            self.assets_failed,
            self.threshold_kb,
            self.records.len()
        )
    }
}

impl PageWeightReport {
    pub fn total_kb(&self) -> f64 {
        self.pages.iter().fold(0.0, |acc, p| acc + p.size_kb)
    }

    pub fn pages_failed(&self) -> usize {
        self.pages.iter().filter(|p| p.error.is_some()).count()
    }

    /// The heaviest page, if any page was weighed.
    pub fn heaviest(&self) -> Option<&PageWeight> {
        self.pages
            .iter()
            .filter(|p| p.error.is_none())
            .max_by(|a, b| a.size_kb.total_cmp(&b.size_kb))
    }

    pub fn summary(&self) -> String {
        let mut summary = format!(
            "Pages processed: {} ({} failed)\nTotal weight: {:.2} kB",
            self.pages.len(),
            self.pages_failed(),
            self.total_kb()
        );
        if let Some(page) = self.heaviest() {
            summary.push_str(&format!("\nHeaviest page: {} ({:.2} kB)", page.url, page.size_kb));
        }
        summary
    }
}

impl StringScanReport {
    /// Number of pages containing each search string, in column order.
    pub fn match_counts(&self) -> Vec<usize> {
        (0..self.search_strings.len())
            .map(|i| {
                self.rows
                    .iter()
                    .filter(|row| row.found.get(i).copied().unwrap_or(false))
                    .count()
            })
            .collect()
    }

    pub fn errors(&self) -> usize {
        self.rows.iter().filter(|row| row.error.is_some()).count()
    }

    pub fn summary(&self) -> String {
        let mut summary = format!(
            "Pages processed: {} ({} failed)",
            self.rows.len(),
            self.errors()
        );
        for (search, count) in self.search_strings.iter().zip(self.match_counts()) {
            summary.push_str(&format!("\n{}: {} page(s)", contains_column(search), count));
        }
        summary
    }
}
