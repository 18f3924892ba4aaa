use std::sync::Arc;

use futures::future::join_all;

use crate::domain::{DealSet, Source};

use super::{extract_deals, PageFetcher};

/// Scrapes every source concurrently and always answers with a full [`DealSet`].
pub struct DealScraper {
    fetcher: Arc<dyn PageFetcher>,
    sources: Vec<Source>,
}

impl DealScraper {
    pub fn new(fetcher: Arc<dyn PageFetcher>, sources: Vec<Source>) -> Self {
        DealScraper { fetcher, sources }
    }

    pub async fn gather(&self) -> DealSet {
        // Settle-all join; each fetch owns its timeout and never errors.
        let pages = join_all(
            self.sources
                .iter()
                .map(|source| self.fetcher.fetch(&source.url)),
        )
        .await;

        let mut deals = DealSet::new();
        for (source, page) in self.sources.iter().zip(pages) {
            let found = extract_deals(&page);
            if found.is_empty() {
                log::info!("No deals found for {}, using fallback", source.key);
            }
            deals.insert_or_fallback(&source.key, found, &source.fallback);
        }

        deals
    }
}
