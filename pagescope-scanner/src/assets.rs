use scraper::{Html, Selector};
use tracing::debug;
use url::Url;

/// Tag/attribute pairs that reference embedded assets, scanned in this order.
pub const ASSET_TAGS: &[(&str, &str)] = &[
    ("img", "src"),
    ("script", "src"),
    ("link", "href"),
    ("video", "src"),
    ("source", "src"),
];

/// Collect every asset reference in `html`, resolved against `page_url`.
///
/// Results are grouped by tag in [`ASSET_TAGS`] order, then document order
/// within a tag. Duplicate references are kept.
pub fn extract_asset_urls(html: &str, page_url: &str) -> Vec<String> {
    let base = match Url::parse(page_url) {
        Ok(base) => base,
        Err(e) => {
            debug!("Cannot resolve assets against {}: {}", page_url, e);
            return Vec::new();
        }
    };

    let document = Html::parse_document(html);
    let mut assets = Vec::new();

    for (tag, attr) in ASSET_TAGS {
        let selector = Selector::parse(&format!("{}[{}]", tag, attr))
            .expect("asset selectors are static and valid");

        for element in document.select(&selector) {
            if let Some(value) = element.value().attr(attr)
                && let Some(absolute_url) = resolve_asset_url(&base, value)
            {
                debug!("Found {} asset: {}", tag, absolute_url);
                assets.push(absolute_url);
            }
        }
    }

    assets
}

/// Resolve a raw attribute value into an absolute http(s) URL.
pub fn resolve_asset_url(base: &Url, reference: &str) -> Option<String> {
    let reference = reference.trim();
    if reference.is_empty()
        || reference.starts_with('#')
        || reference.starts_with("javascript:")
        || reference.starts_with("mailto:")
        || reference.starts_with("data:")
    {
        return None;
    }

    let mut resolved = base.join(reference).ok()?;
    if resolved.scheme() != "http" && resolved.scheme() != "https" {
        return None;
    }
    resolved.set_fragment(None);

    Some(resolved.to_string())
}
