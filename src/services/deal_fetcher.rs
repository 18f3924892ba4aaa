use std::time::Duration;

use async_trait::async_trait;
use reqwest::{
    header::{HeaderMap, HeaderValue, ACCEPT_LANGUAGE, REFERER, USER_AGENT},
    Client,
};

const DESKTOP_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124 Safari/537.36";
const ACCEPT_LANGUAGE_VALUE: &str = "en-US,en;q=0.9";
const REFERER_VALUE: &str = "https://www.google.com/";

/// Retrieves page markup. An empty string stands for "nothing usable came back".
#[async_trait]
pub trait PageFetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> String;
}

pub struct HttpPageFetcher {
    client: Client,
    timeout: Duration,
}

impl HttpPageFetcher {
    pub fn new(timeout: Duration) -> Result<Self, reqwest::Error> {
        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, HeaderValue::from_static(DESKTOP_USER_AGENT));
        headers.insert(
            ACCEPT_LANGUAGE,
            HeaderValue::from_static(ACCEPT_LANGUAGE_VALUE),
        );
        headers.insert(REFERER, HeaderValue::from_static(REFERER_VALUE));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .pool_max_idle_per_host(0)
            .build()?;

        Ok(HttpPageFetcher { client, timeout })
    }

    async fn fetch_body(&self, url: &str) -> Result<String, reqwest::Error> {
        self.client
            .get(url)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await
    }
}

#[async_trait]
impl PageFetcher for HttpPageFetcher {
    async fn fetch(&self, url: &str) -> String {
        // Dropping the request future on expiry cancels it.
        match tokio::time::timeout(self.timeout, self.fetch_body(url)).await {
            Ok(Ok(body)) => {
                log::info!("Fetched {} bytes from {}", body.len(), url);
                body
            }
            Ok(Err(e)) => {
                log::warn!("Fetch failed for {}, error: {:?}", url, e);
                String::new()
            }
            Err(_) => {
                log::warn!("Fetch timed out after {:?} for {}", self.timeout, url);
                String::new()
            }
        }
    }
}
