use crate::core::Pipeline;
use crate::domain::model::BankRecord;
use crate::utils::error::Result;

pub struct ScrapeEngine<P: Pipeline> {
    pipeline: P,
}

impl<P: Pipeline> ScrapeEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    pub fn pipeline(&self) -> &P {
        &self.pipeline
    }

    /// Listing pass over every category, then the detail pass. Records
    /// keep category order, then row order.
    pub async fn scrape_all(&self) -> Result<Vec<BankRecord>> {
        tracing::info!("Scraping listing pages...");
        let listed = self.pipeline.extract().await?;
        tracing::info!("Listed {} institutions", listed.len());

        tracing::info!("Scraping detail pages...");
        let records = self.pipeline.transform(listed).await?;
        tracing::info!("Total banks scraped: {}", records.len());

        Ok(records)
    }

    pub async fn run(&self) -> Result<String> {
        let records = self.scrape_all().await?;

        let output = self.pipeline.load(records).await?;
        tracing::info!("Output saved to: {}", output);

        Ok(output)
    }
}
