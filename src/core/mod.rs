pub mod cleaning;
pub mod console;
pub mod detail_scraper;
pub mod etl;
pub mod fetcher;
pub mod html;
pub mod list_scraper;
pub mod pipeline;
pub mod report;

pub use crate::domain::model::{BankDetails, BankRecord};
pub use crate::domain::ports::{ConfigProvider, ContentStore, PageSource, Pipeline};
pub use crate::utils::error::Result;
