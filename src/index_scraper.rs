use log::info;
use scraper::Html;

use crate::{
    error::ScrapeError,
    records::CourseRef,
    requests::RequestClient,
    selectors::Selectors,
    text_manipulators::{extract_text, tidy_cell},
};

/// Scrapes the index page into the ordered list of offered courses.
#[derive(Debug)]
pub struct IndexScraper {
    pub url: String,
    pub course_refs: Vec<CourseRef>,
}

impl IndexScraper {
    pub fn new(url: String) -> Self {
        Self {
            url,
            course_refs: vec![],
        }
    }

    pub async fn scrape(
        &mut self,
        client: &RequestClient,
        selectors: &Selectors,
    ) -> anyhow::Result<()> {
        info!("scraping course index: {}", self.url);
        let html = client.fetch_url_body(&self.url).await?;
        let document = Html::parse_document(&html);
        self.course_refs = extract_course_refs(&document, selectors, &self.url)?;
        Ok(())
    }
}

/// Pulls (name, href) out of every course anchor in the menu container.
///
/// The menu's final anchor links back to the sport A-Z overview, not to
/// a course; it is dropped here. Name and href come out of the same
/// anchor node, so the two stay parallel by construction.
pub fn extract_course_refs(
    document: &Html,
    selectors: &Selectors,
    page: &str,
) -> Result<Vec<CourseRef>, ScrapeError> {
    let anchors: Vec<_> = document.select(&selectors.index_anchor).collect();
    if anchors.is_empty() {
        return Err(ScrapeError::EmptyDocument {
            page: page.to_string(),
        });
    }

    let mut course_refs = Vec::new();
    for anchor in &anchors[..anchors.len() - 1] {
        let name = tidy_cell(&extract_text(*anchor));
        let Some(href) = anchor.value().attr("href") else {
            return Err(ScrapeError::QueryMismatch {
                page: page.to_string(),
                what: format!("href attribute on course anchor {name:?}"),
            });
        };
        course_refs.push(CourseRef {
            name,
            href: href.to_string(),
        });
    }

    Ok(course_refs)
}
