use scraper::ElementRef;

use crate::error::ScrapeError;

pub fn extract_text(node: ElementRef) -> String {
    node.text().collect::<String>()
}

/// Collapse the non-breaking spaces the booking site pads its cells with,
/// then trim.
pub fn tidy_cell(text: &str) -> String {
    text.replace('\u{a0}', " ").trim().to_string()
}

/// Absolute course page URL: base + relative href, plain concatenation.
/// The site emits hrefs relative to the index directory.
pub fn get_html_link_to_page(base_url: &str, html_fragment: &str) -> String {
    base_url.to_string() + html_fragment
}

/// Cut a raw price cell down to the fee list: everything strictly before
/// the first currency marker, with trailing whitespace removed.
///
/// A cell without the marker is an extraction failure, never passed
/// through raw.
pub fn clean_price(raw: &str, marker: char, page: &str) -> Result<String, ScrapeError> {
    match raw.find(marker) {
        Some(pos) => Ok(raw[..pos].trim_end().to_string()),
        None => Err(ScrapeError::MissingCurrencyMarker {
            page: page.to_string(),
            text: raw.to_string(),
        }),
    }
}
