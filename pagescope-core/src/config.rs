//! Run configuration and input validation.
//!
//! Everything here is pure: the binary collects raw strings from flags or
//! prompts and hands them to these parsers, so validation can be tested
//! without a terminal.

use std::path::PathBuf;
use thiserror::Error;
use url::Url;

pub use pagescope_scanner::fetcher::DEFAULT_TIMEOUT_SECS;

/// Threshold offered at the prompt when none is given.
pub const RECOMMENDED_THRESHOLD_KB: f64 = 100.0;

/// Directory CSV reports land in unless overridden.
pub const DEFAULT_OUTPUT_DIR: &str = "outputs";

#[derive(Debug, Error, PartialEq)]
pub enum InputError {
    #[error("Invalid choice. Please press 'c' for console, 'f' for file, or 'x' to exit.")]
    InvalidChoice,

    #[error(
        "One or more URLs are invalid. Please enter valid URLs starting with 'http://' or 'https://'."
    )]
    InvalidUrls,

    #[error("Invalid sitemap URL. Please enter a URL starting with 'http://' or 'https://'.")]
    InvalidSitemapUrl,

    #[error("Please enter a valid, non-negative number for the size threshold.")]
    InvalidThreshold,

    #[error("Please enter at least one search string.")]
    NoSearchStrings,

    #[error("Timeout must be a whole number of seconds greater than zero.")]
    InvalidTimeout,
}

/// Answer to "console, file or exit?".
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OutputChoice {
    Console,
    File,
    Exit,
}

/// Where a run's rows go.
#[derive(Debug, Clone, PartialEq)]
pub enum OutputTarget {
    /// Rows are printed as soon as they are available.
    Console,
    /// Rows are collected and written as one CSV into this directory.
    File(PathBuf),
}

/// Where the list of pages comes from.
#[derive(Debug, Clone, PartialEq)]
pub enum PageSource {
    Urls(Vec<String>),
    Sitemap(String),
}

/// Oversized asset listing.
#[derive(Debug, Clone)]
pub struct AssetScanConfig {
    pub source: PageSource,
    pub threshold_kb: f64,
    pub output: OutputTarget,
    pub timeout_secs: u64,
    pub show_progress: bool,
}

/// Per-page total asset weight.
#[derive(Debug, Clone)]
pub struct PageWeighConfig {
    pub source: PageSource,
    pub output: OutputTarget,
    pub timeout_secs: u64,
    pub show_progress: bool,
}

/// Literal string presence matrix.
#[derive(Debug, Clone)]
pub struct StringScanConfig {
    pub source: PageSource,
    pub search_strings: Vec<String>,
    pub output: OutputTarget,
    pub timeout_secs: u64,
    pub show_progress: bool,
}

/// `c`, `f` or `x`, case-insensitive, surrounding whitespace ignored.
pub fn parse_output_choice(input: &str) -> Result<OutputChoice, InputError> {
    match input.trim().to_lowercase().as_str() {
        "c" | "console" => Ok(OutputChoice::Console),
        "f" | "file" => Ok(OutputChoice::File),
        "x" | "exit" => Ok(OutputChoice::Exit),
        _ => Err(InputError::InvalidChoice),
    }
}

/// An absolute http(s) URL with a host.
pub fn is_valid_page_url(candidate: &str) -> bool {
    if candidate.chars().any(char::is_whitespace) {
        return false;
    }

    Url::parse(candidate)
        .map(|url| {
            matches!(url.scheme(), "http" | "https")
                && url.host_str().is_some_and(|host| !host.is_empty())
        })
        .unwrap_or(false)
}

/// Split a comma-separated URL list. Every entry must be valid; a single bad
/// entry rejects the whole list.
pub fn parse_url_list(input: &str) -> Result<Vec<String>, InputError> {
    let urls: Vec<String> = input.split(',').map(|u| u.trim().to_string()).collect();

    if urls.iter().all(|u| is_valid_page_url(u)) {
        Ok(urls)
    } else {
        Err(InputError::InvalidUrls)
    }
}

pub fn parse_sitemap_url(input: &str) -> Result<String, InputError> {
    let url = input.trim();
    if is_valid_page_url(url) {
        Ok(url.to_string())
    } else {
        Err(InputError::InvalidSitemapUrl)
    }
}

/// Threshold in KB. Must be finite and non-negative.
pub fn parse_threshold(input: &str) -> Result<f64, InputError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(InputError::InvalidThreshold);
    }

    match trimmed.parse::<f64>() {
        Ok(value) if value.is_finite() && value >= 0.0 => Ok(value),
        _ => Err(InputError::InvalidThreshold),
    }
}

/// Comma-separated search strings, trimmed, empties dropped.
pub fn parse_search_strings(input: &str) -> Result<Vec<String>, InputError> {
    let strings: Vec<String> = input
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect();

    if strings.is_empty() {
        Err(InputError::NoSearchStrings)
    } else {
        Ok(strings)
    }
}

pub fn parse_timeout(input: &str) -> Result<u64, InputError> {
    match input.trim().parse::<u64>() {
        Ok(secs) if secs > 0 => Ok(secs),
        _ => Err(InputError::InvalidTimeout),
    }
}
