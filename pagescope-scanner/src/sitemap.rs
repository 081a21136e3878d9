//! Sitemap XML parsing.
//!
//! Extracts the text of every `loc` element directly under a `url` or
//! `sitemap` entry. Names are matched locally so both prefixed and default
//! namespaces work. Extension `loc`s such as `image:image/image:loc` are
//! skipped because their parent is not an entry.

use crate::error::{Result, ScanError};
use quick_xml::events::Event;

/// Parse sitemap XML into its `loc` URLs, in document order.
///
/// Malformed XML is an error; no partial list is returned.
pub fn parse_sitemap(xml: &str) -> Result<Vec<String>> {
    let mut urls = Vec::new();
    let mut open: Vec<Vec<u8>> = Vec::new();
    let mut saw_root = false;
    let mut in_loc = false;
    let mut current = String::new();

    let mut reader = quick_xml::Reader::from_str(xml);
    reader.config_mut().trim_text(true);
    let mut buf = Vec::new();

    loop {
        let position = reader.buffer_position() as u64;
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) => {
                saw_root = true;
                let name = e.local_name().as_ref().to_vec();
                if name == b"loc" && is_entry(open.last()) {
                    in_loc = true;
                    current.clear();
                }
                open.push(name);
            }
            Ok(Event::Empty(_)) => {
                saw_root = true;
            }
            Ok(Event::Text(ref e)) => {
                if in_loc {
                    let text = e
                        .unescape()
                        .map_err(|err| parse_error(position, err))?;
                    current.push_str(&text);
                }
            }
            Ok(Event::CData(ref e)) => {
                if in_loc {
                    current.push_str(&String::from_utf8_lossy(e));
                }
            }
            Ok(Event::End(ref e)) => {
                open.pop();
                if in_loc && e.local_name().as_ref() == b"loc" {
                    let url = current.trim();
                    if !url.is_empty() {
                        urls.push(url.to_string());
                    }
                    in_loc = false;
                }
            }
            Ok(Event::Eof) => break,
            Err(err) => return Err(parse_error(position, err)),
            _ => {}
        }
        buf.clear();
    }

    if !saw_root {
        return Err(ScanError::SitemapParse("no root element found".to_string()));
    }
    if !open.is_empty() {
        return Err(ScanError::SitemapParse(format!(
            "unexpected end of document with {} unclosed element(s)",
            open.len()
        )));
    }

    Ok(urls)
}

fn is_entry(parent: Option<&Vec<u8>>) -> bool {
    matches!(parent.map(Vec::as_slice), Some(b"url" | b"sitemap"))
}

fn parse_error(position: u64, err: impl std::fmt::Display) -> ScanError {
    ScanError::SitemapParse(format!("at byte {}: {}", position, err))
}
