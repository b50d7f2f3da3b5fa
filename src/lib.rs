pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use adapters::{FileStore, HttpPageSource, MemoryStore};
pub use config::{CliConfig, SiteConfig};
pub use core::{etl::ScrapeEngine, fetcher::Fetcher, pipeline::BankPipeline};
pub use utils::error::{Result, ScrapeError};
