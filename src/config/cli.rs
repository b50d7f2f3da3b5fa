use crate::domain::ports::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{validate_path, validate_range, Validate};
use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone, Parser)]
#[command(name = "fi-banks")]
#[command(about = "Scrape the FI company register for banks and report them")]
pub struct CliConfig {
    #[arg(long, help = "Write an HTML report instead of printing a table")]
    pub html: bool,

    #[arg(
        long,
        default_value = "banks.html",
        help = "Report file; cached detail pages link back to it via the site profile's report_link (default ../banks.html, relative to --cache-dir)"
    )]
    pub output: String,

    #[arg(long, default_value = "cache")]
    pub cache_dir: String,

    #[arg(long, default_value = "3", help = "Pause before every live request")]
    pub delay_secs: u64,

    #[arg(long, help = "TOML file overriding the upstream site profile")]
    pub site_config: Option<PathBuf>,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            html: false,
            output: "banks.html".to_string(),
            cache_dir: "cache".to_string(),
            delay_secs: 3,
            site_config: None,
            verbose: false,
        }
    }
}

impl ConfigProvider for CliConfig {
    fn cache_dir(&self) -> &str {
        &self.cache_dir
    }

    fn report_path(&self) -> &str {
        &self.output
    }

    fn html_report(&self) -> bool {
        self.html
    }

    fn request_delay(&self) -> Duration {
        Duration::from_secs(self.delay_secs)
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validate_path("output", &self.output)?;
        validate_path("cache_dir", &self.cache_dir)?;
        validate_range("delay_secs", self.delay_secs, 0, 600)?;
        Ok(())
    }
}
