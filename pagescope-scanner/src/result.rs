use serde::{Deserialize, Serialize};

/// An asset that passed the size threshold, tied to the page that references it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssetRecord {
    pub page_url: String,
    pub asset_url: String,
    pub size_kb: f64,
}

/// Outcome of a single HEAD measurement. `size_kb` is 0 whenever `error` is set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssetProbe {
    pub url: String,
    pub size_kb: f64,
    pub error: Option<String>,
}

impl AssetProbe {
    pub fn new(url: String, size_kb: f64) -> Self {
        Self {
            url,
            size_kb,
            error: None,
        }
    }

    pub fn with_error(url: String, error: String) -> Self {
        Self {
            url,
            size_kb: 0.0,
            error: Some(error),
        }
    }

    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }
}

/// Asset URLs discovered on one page, in tag order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageAssets {
    pub page_url: String,
    pub assets: Vec<String>,
    pub error: Option<String>,
}

impl PageAssets {
    pub fn new(page_url: String, assets: Vec<String>) -> Self {
        Self {
            page_url,
            assets,
            error: None,
        }
    }

    pub fn with_error(page_url: String, error: String) -> Self {
        Self {
            page_url,
            assets: Vec::new(),
            error: Some(error),
        }
    }
}

/// Total asset weight of one page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageWeight {
    pub url: String,
    pub size_kb: f64,
    pub assets_measured: usize,
    pub assets_failed: usize,
    pub error: Option<String>,
}

impl PageWeight {
    /// Sum a page's probes. Failed probes contribute 0 and are counted separately.
    pub fn from_probes(url: String, probes: &[AssetProbe]) -> Self {
        let size_kb = probes.iter().fold(0.0, |acc, p| acc + p.size_kb);
        let assets_failed = probes.iter().filter(|p| !p.is_ok()).count();

        Self {
            url,
            size_kb,
            assets_measured: probes.len(),
            assets_failed,
            error: None,
        }
    }

    pub fn with_error(url: String, error: String) -> Self {
        Self {
            url,
            size_kb: 0.0,
            assets_measured: 0,
            assets_failed: 0,
            error: Some(error),
        }
    }
}

/// One row of the string-presence matrix. `found` is empty on error rows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StringCheck {
    pub index: usize,
    pub url: String,
    pub found: Vec<bool>,
    pub error: Option<String>,
}

impl StringCheck {
    pub fn new(index: usize, url: String, found: Vec<bool>) -> Self {
        Self {
            index,
            url,
            found,
            error: None,
        }
    }

    pub fn with_error(index: usize, url: String, error: String) -> Self {
        Self {
            index,
            url,
            found: Vec::new(),
            error: Some(error),
        }
    }
}
