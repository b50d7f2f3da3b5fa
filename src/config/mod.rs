pub mod cli;
pub mod site;

pub use cli::CliConfig;
pub use site::{CategoryConfig, MarkupMarkers, SiteConfig};
