use anyhow::Context;
use regex::Regex;
use serde::{Deserialize, de::DeserializeOwned};

use crate::selectors::Selectors;

/// Index page for the current booking period.
const DEFAULT_INDEX_URL: &str =
    "https://buchung.hochschulsport.uni-muenster.de/angebote/aktueller_zeitraum/index.html";

/// Character that terminates the fee list inside a price cell.
const CURRENCY_MARKER: char = '€';

/// The env config env vars needed for scraping.
#[derive(Debug, Deserialize)]
pub struct ScrapingEnv {
    sport_index_url: Option<String>,
}

pub struct ScrapeConfig {
    index_url: String,
    base_url: String,
    pub selectors: Selectors,
    pub currency_marker: char,
}

impl ScrapeConfig {
    pub fn new() -> anyhow::Result<Self> {
        let scraping_env = ScrapingEnv::load_from_env()?;
        let index_url = scraping_env
            .sport_index_url
            .unwrap_or_else(|| DEFAULT_INDEX_URL.to_string());
        let base_url = BaseUrlExtractor::new()?.extract_base_url(&index_url)?;
        Ok(Self {
            index_url,
            base_url,
            selectors: Selectors::new(),
            currency_marker: CURRENCY_MARKER,
        })
    }

    pub fn index_url(&self) -> &str {
        &self.index_url
    }

    /// Directory all relative course hrefs are resolved against.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

pub struct BaseUrlExtractor {
    // Regex that strips the document name off the index url, leaving the
    // directory the course hrefs are relative to.
    base_extraction_regex: Regex,
}

impl BaseUrlExtractor {
    pub fn new() -> anyhow::Result<Self> {
        let base_extraction_regex = Regex::new(r"^(.*/)[^/]*$")?;
        Ok(Self {
            base_extraction_regex,
        })
    }

    pub fn extract_base_url(&self, index_url: &str) -> anyhow::Result<String> {
        let Some(caps) = self.base_extraction_regex.captures(index_url) else {
            return Err(anyhow::anyhow!(
                "couldn't derive base url from index url: {}",
                index_url
            ));
        };
        let Some(match_) = caps.get(1) else {
            return Err(anyhow::anyhow!(
                "couldn't derive base url from index url: {}",
                index_url
            ));
        };
        Ok(match_.as_str().to_string())
    }
}

// Extension trait.
pub trait LoadFromEnv: DeserializeOwned {
    fn load_from_env() -> anyhow::Result<Self> {
        // Don't throw an error if .env file doesn't exist.
        let _ = dotenv::dotenv();
        let config =
            envy::from_env::<Self>().context("failed to load env variables into config struct")?;
        Ok(config)
    }
}

impl<T: DeserializeOwned> LoadFromEnv for T {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_is_index_url_without_document_name() {
        let extractor = BaseUrlExtractor::new().unwrap();
        let base = extractor
            .extract_base_url("https://buchung.example-hsp.de/angebote/aktueller_zeitraum/index.html")
            .unwrap();
        assert_eq!(base, "https://buchung.example-hsp.de/angebote/aktueller_zeitraum/");
    }

    #[test]
    fn directory_index_url_is_its_own_base() {
        let extractor = BaseUrlExtractor::new().unwrap();
        let base = extractor
            .extract_base_url("https://buchung.example-hsp.de/angebote/aktueller_zeitraum/")
            .unwrap();
        assert_eq!(base, "https://buchung.example-hsp.de/angebote/aktueller_zeitraum/");
    }

    #[test]
    fn slashless_url_has_no_base() {
        let extractor = BaseUrlExtractor::new().unwrap();
        assert!(extractor.extract_base_url("not-a-url").is_err());
    }
}
