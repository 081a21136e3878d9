// Tests for console rows, CSV generation and report files

use pagescope_core::report::{
    AssetReport, PageWeightReport, ReportKind, StringScanReport, asset_table_header,
    format_page_weight_row, format_string_check_row, generate_asset_csv,
    generate_page_weight_csv, generate_string_scan_csv, page_weight_table_header,
    string_scan_table_header, write_csv_report,
};
use pagescope_scanner::ScanError;
use pagescope_scanner::result::{AssetRecord, PageWeight, StringCheck};
use std::fs;
use tempfile::TempDir;

fn search_strings() -> Vec<String> {
    vec!["gtag(".to_string(), "Hello, World".to_string()]
}

fn sample_scan_report() -> StringScanReport {
    StringScanReport {
        search_strings: search_strings(),
        rows: vec![
            StringCheck::new(1, "https://example.com/".to_string(), vec![true, false]),
            StringCheck::with_error(
                2,
                "https://example.com/down".to_string(),
                "HTTP request failed: connection refused".to_string(),
            ),
        ],
    }
}

// ============================================================================
// Console Output Tests
// ============================================================================

#[test]
fn test_asset_table_header() {
    let header = asset_table_header();
    let mut lines = header.lines();
    assert_eq!(lines.next(), Some("Page URL | Asset URL | Size (KB)"));
    assert_eq!(lines.next(), Some("-".repeat(100).as_str()));
}

#[test]
fn test_page_weight_rows() {
    assert!(page_weight_table_header().starts_with("URL | Pagesize (kB)\n"));

    let page = PageWeight {
        url: "https://example.com/".to_string(),
        size_kb: 1536.0 / 7.0,
        assets_measured: 7,
        assets_failed: 0,
        error: None,
    };
    assert_eq!(
        format_page_weight_row(&page),
        "https://example.com/ | 219.43 kB"
    );
}

#[test]
fn test_string_scan_header_lists_each_search_string() {
    let header = string_scan_table_header(&search_strings());
    assert!(header.starts_with(
        "Index | URL | Contains 'gtag(' | Contains 'Hello, World' | Error\n"
    ));
}

#[test]
fn test_string_scan_rows() {
    let report = sample_scan_report();

    assert_eq!(
        format_string_check_row(&report.rows[0], 2),
        "1 | https://example.com/ | 🟢 | 🔴 | "
    );
    assert_eq!(
        format_string_check_row(&report.rows[1], 2),
        "2 | https://example.com/down |  |  | HTTP request failed: connection refused"
    );
}

// ============================================================================
// CSV Tests
// ============================================================================

#[test]
fn test_asset_csv() {
    let report = AssetReport {
        threshold_kb: 100.0,
        records: vec![AssetRecord {
            page_url: "https://example.com/".to_string(),
            asset_url: "https://example.com/hero,large.jpg".to_string(),
            size_kb: 200.0,
        }],
        ..Default::default()
    };

    assert_eq!(
        generate_asset_csv(&report),
        "Page URL,Asset URL,Size (KB)\nhttps://example.com/,\"https://example.com/hero,large.jpg\",200.00\n"
    );
}

#[test]
fn test_page_weight_csv() {
    let report = PageWeightReport {
        pages: vec![
            PageWeight::from_probes("https://example.com/".to_string(), &[]),
            PageWeight::with_error("https://example.com/x".to_string(), "boom".to_string()),
        ],
    };

    assert_eq!(
        generate_page_weight_csv(&report),
        "URL,Pagesize (kB)\nhttps://example.com/,0.00\nhttps://example.com/x,0.00\n"
    );
}

#[test]
fn test_string_scan_csv() {
    let csv = generate_string_scan_csv(&sample_scan_report());
    let lines: Vec<&str> = csv.lines().collect();

    assert_eq!(
        lines[0],
        "Index,URL,Contains 'gtag(',\"Contains 'Hello, World'\",Error"
    );
    assert_eq!(lines[1], "1,https://example.com/,true,false,");
    assert_eq!(
        lines[2],
        "2,https://example.com/down,,,HTTP request failed: connection refused"
    );
}

// ============================================================================
// Summary Tests
// ============================================================================

#[test]
fn test_page_weight_summary() {
    let report = PageWeightReport {
        pages: vec![
            PageWeight {
                url: "https://example.com/".to_string(),
                size_kb: 10.0,
                assets_measured: 1,
                assets_failed: 0,
                error: None,
            },
            PageWeight {
                url: "https://example.com/heavy".to_string(),
                size_kb: 90.5,
                assets_measured: 4,
                assets_failed: 0,
                error: None,
            },
            PageWeight::with_error("https://example.com/down".to_string(), "boom".to_string()),
        ],
    };

    assert_eq!(report.total_kb(), 100.5);
    assert_eq!(report.pages_failed(), 1);
    assert_eq!(
        report.heaviest().map(|p| p.url.as_str()),
        Some("https://example.com/heavy")
    );

    let summary = report.summary();
    assert!(summary.contains("Pages processed: 3 (1 failed)"));
    assert!(summary.contains("Total weight: 100.50 kB"));
}

#[test]
fn test_string_scan_summary() {
    let summary = sample_scan_report().summary();
    assert!(summary.contains("Pages processed: 2 (1 failed)"));
    assert!(summary.contains("Contains 'gtag(': 1 page(s)"));
    assert!(summary.contains("Contains 'Hello, World': 0 page(s)"));
}

// ============================================================================
// Report File Tests
// ============================================================================

#[test]
fn test_write_csv_report_creates_directory() -> Result<(), Box<dyn std::error::Error>> {
    let temp_dir = TempDir::new()?;
    let outputs = temp_dir.path().join("nested").join("outputs");

    let path = write_csv_report(&outputs, ReportKind::PageSizes, "URL,Pagesize (kB)\n")?;

    assert!(path.starts_with(&outputs));
    let name = path.file_name().unwrap().to_string_lossy().to_string();
    assert!(name.starts_with("page_sizes_"));
    assert!(name.ends_with(".csv"));
    // page_sizes_YYYYMMDD_HHMMSS.csv
    assert_eq!(name.len(), "page_sizes_".len() + 15 + ".csv".len());
    assert_eq!(fs::read_to_string(&path)?, "URL,Pagesize (kB)\n");

    Ok(())
}

#[test]
fn test_sitemap_results_are_stamped_to_the_minute() -> Result<(), Box<dyn std::error::Error>> {
    let temp_dir = TempDir::new()?;
    let path = write_csv_report(temp_dir.path(), ReportKind::SitemapResults, "Index,URL,Error\n")?;

    let name = path.file_name().unwrap().to_string_lossy().to_string();
    assert!(name.starts_with("results-sitemap_"));
    assert_eq!(name.len(), "results-sitemap_".len() + 13 + ".csv".len());

    Ok(())
}

#[test]
fn test_write_csv_report_fails_when_dir_is_a_file() -> Result<(), Box<dyn std::error::Error>> {
    let temp_dir = TempDir::new()?;
    let blocker = temp_dir.path().join("outputs");
    fs::write(&blocker, "not a directory")?;

    let result = write_csv_report(&blocker, ReportKind::LargeAssets, "Page URL\n");
    assert!(matches!(result, Err(ScanError::IoError(_))));

    Ok(())
}
