use crate::{config::ScrapeConfig, requests::RequestClient};

pub struct ScrapingContext {
    pub config: ScrapeConfig,
    pub request_client: RequestClient,
}

impl ScrapingContext {
    pub fn new() -> anyhow::Result<Self> {
        let config = ScrapeConfig::new()?;
        let request_client = RequestClient::new()?;
        Ok(ScrapingContext {
            config,
            request_client,
        })
    }
}
