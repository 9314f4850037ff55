use std::time::Duration;

use futures::{StreamExt, stream};
use reqwest::{Client, ClientBuilder, Response};

use crate::ratelimit::RateLimiter;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

// Course page fetches are independent of one another; this bounds how
// many are in flight at once.
const MAX_IN_FLIGHT: usize = 8;

pub struct RequestClient {
    client: Client,
    rate_limiter: RateLimiter,
}

impl RequestClient {
    pub fn new() -> anyhow::Result<Self> {
        // The booking host presents a certificate chain that fails
        // verification in default TLS stacks. Accept it for this client
        // only; do not reuse the client for other hosts.
        let client = ClientBuilder::new()
            .danger_accept_invalid_certs(true)
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        let rate_limiter = RateLimiter::new();
        Ok(Self {
            client,
            rate_limiter,
        })
    }

    pub async fn fetch_url_response(&self, url: &str) -> anyhow::Result<Response> {
        // Wait (non-blocking) until we're allowed to make a request according
        // to our self-imposed rate-limiting policy.
        self.rate_limiter.wait_until_ready().await;

        let response = self.client.get(url).send().await?;
        Ok(response)
    }

    pub async fn fetch_url_body(&self, url: &str) -> anyhow::Result<String> {
        let response = self.fetch_url_response(url).await?;
        let response = response.error_for_status()?;
        let body = response.text().await?;
        Ok(body)
    }

    /// Batch fetch with bounded concurrency. Results come back in input
    /// order, one per url; an individual failure is returned in place and
    /// never aborts the rest of the batch.
    pub async fn fetch_all_bodies(
        &self,
        urls: Vec<String>,
    ) -> Vec<(String, anyhow::Result<String>)> {
        stream::iter(urls)
            .map(|url| async move {
                let body = self.fetch_url_body(&url).await;
                (url, body)
            })
            .buffered(MAX_IN_FLIGHT)
            .collect::<Vec<_>>()
            .await
    }
}
