use crate::domain::model::BankRecord;
use crate::utils::error::Result;
use async_trait::async_trait;
use std::path::PathBuf;
use std::time::Duration;

/// URL-keyed store of cleaned HTML snapshots.
pub trait ContentStore: Send + Sync {
    /// Deterministic location for `url`; depends on the URL text only.
    fn locate(&self, url: &str) -> PathBuf;

    fn read(&self, url: &str) -> impl std::future::Future<Output = Result<Option<String>>> + Send;

    fn write(
        &self,
        url: &str,
        content: &str,
    ) -> impl std::future::Future<Output = Result<()>> + Send;

    fn contains(&self, url: &str) -> impl std::future::Future<Output = Result<bool>> + Send;
}

/// Live retrieval of a page body.
#[async_trait]
pub trait PageSource: Send + Sync {
    async fn get(&self, url: &str) -> Result<String>;
}

pub trait ConfigProvider: Send + Sync {
    fn cache_dir(&self) -> &str;
    fn report_path(&self) -> &str;
    fn html_report(&self) -> bool;
    fn request_delay(&self) -> Duration;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self) -> Result<Vec<BankRecord>>;
    async fn transform(&self, records: Vec<BankRecord>) -> Result<Vec<BankRecord>>;
    async fn load(&self, records: Vec<BankRecord>) -> Result<String>;
}
