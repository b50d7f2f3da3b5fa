use crate::config::SiteConfig;
use crate::core::cleaning::{clean_detail_page, clean_list_page};
use crate::domain::ports::{ContentStore, PageSource};
use crate::utils::error::Result;
use scraper::Html;
use std::time::Duration;

pub const DEFAULT_DELAY: Duration = Duration::from_secs(3);

/// Cache-first page retrieval. A stored page is returned as is; a miss
/// waits `delay`, downloads, cleans and stores the page.
pub struct Fetcher<S: ContentStore, P: PageSource> {
    store: S,
    source: P,
    site: SiteConfig,
    delay: Duration,
}

impl<S: ContentStore, P: PageSource> Fetcher<S, P> {
    pub fn new(store: S, source: P, site: SiteConfig) -> Self {
        Self {
            store,
            source,
            site,
            delay: DEFAULT_DELAY,
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn site(&self) -> &SiteConfig {
        &self.site
    }

    pub async fn fetch(&self, url: &str) -> Result<String> {
        if let Some(cached) = self.store.read(url).await? {
            tracing::debug!("Cache hit: {}", url);
            return Ok(cached);
        }

        tracing::info!("Fetching (live): {}", url);
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        let raw = self.source.get(url).await?;
        let cleaned = self.clean(url, &raw)?;

        self.store.write(url, &cleaned).await?;
        tracing::debug!(
            "Cached {} bytes at {}",
            cleaned.len(),
            self.store.locate(url).display()
        );

        Ok(cleaned)
    }

    /// Parse and clean synchronously so the parsed tree never lives across
    /// an await.
    fn clean(&self, url: &str, raw: &str) -> Result<String> {
        let doc = Html::parse_document(raw);
        if self.site.is_listing_url(url) {
            clean_list_page(&doc, &self.site)
        } else {
            clean_detail_page(&doc, &self.site)
        }
    }
}
