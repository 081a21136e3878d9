use crate::error::{Result, ScanError};
use url::Url;

/// Case-sensitive literal substring check, one flag per search string.
pub fn presence(source: &str, search_strings: &[String]) -> Vec<bool> {
    search_strings
        .iter()
        .map(|needle| source.contains(needle.as_str()))
        .collect()
}

/// Normalise a page URL before fetching it. Spaces, non-ASCII characters and
/// other bytes outside the URL grammar are percent-encoded.
pub fn encode_page_url(raw: &str) -> Result<Url> {
    Url::parse(raw.trim()).map_err(|e| ScanError::InvalidUrl(format!("{}: {}", raw, e)))
}
