use crate::core::console::render_table;
use crate::core::detail_scraper::details_for;
use crate::core::fetcher::Fetcher;
use crate::core::list_scraper::list_for;
use crate::core::report::{render_report, write_report};
use crate::domain::model::BankRecord;
use crate::domain::ports::{ConfigProvider, ContentStore, PageSource, Pipeline};
use crate::utils::error::Result;
use std::path::Path;

/// Register scrape: list pages per category, then one detail page per
/// institution, then a report or a console table.
pub struct BankPipeline<S: ContentStore, P: PageSource, C: ConfigProvider> {
    fetcher: Fetcher<S, P>,
    config: C,
}

impl<S: ContentStore, P: PageSource, C: ConfigProvider> BankPipeline<S, P, C> {
    pub fn new(fetcher: Fetcher<S, P>, config: C) -> Self {
        Self { fetcher, config }
    }

    pub fn fetcher(&self) -> &Fetcher<S, P> {
        &self.fetcher
    }
}

#[async_trait::async_trait]
impl<S: ContentStore, P: PageSource, C: ConfigProvider> Pipeline for BankPipeline<S, P, C> {
    async fn extract(&self) -> Result<Vec<BankRecord>> {
        let codes: Vec<String> = self
            .fetcher
            .site()
            .category_codes()
            .map(str::to_string)
            .collect();

        let mut records = Vec::new();
        for code in &codes {
            records.extend(list_for(&self.fetcher, code).await?);
        }
        Ok(records)
    }

    async fn transform(&self, mut records: Vec<BankRecord>) -> Result<Vec<BankRecord>> {
        for record in records.iter_mut() {
            let details = details_for(&self.fetcher, &record.details_url).await?;
            record.merge(details);
        }
        Ok(records)
    }

    async fn load(&self, records: Vec<BankRecord>) -> Result<String> {
        if !self.config.html_report() {
            println!("{}", render_table(&records));
            return Ok("stdout".to_string());
        }

        let generated_at = chrono::Local::now().format("%Y-%m-%d %H:%M").to_string();
        let html = render_report(&self.fetcher, &records, &generated_at).await?;
        let path = write_report(Path::new(self.config.report_path()), &html)?;
        Ok(path.display().to_string())
    }
}
