use clap::Parser;
use fi_banks::core::ConfigProvider;
use fi_banks::utils::{logger, validation::Validate};
use fi_banks::{
    BankPipeline, CliConfig, FileStore, Fetcher, HttpPageSource, ScrapeEngine, ScrapeError,
    SiteConfig,
};

fn load_site(config: &CliConfig) -> Result<SiteConfig, ScrapeError> {
    let site = match &config.site_config {
        Some(path) => {
            tracing::info!("Loading site profile from {}", path.display());
            SiteConfig::from_file(path)?
        }
        None => SiteConfig::default(),
    };
    site.validate()?;
    Ok(site)
}

async fn run(config: CliConfig) -> Result<String, ScrapeError> {
    config.validate()?;
    let site = load_site(&config)?;

    let store = FileStore::new(config.cache_dir());
    let fetcher = Fetcher::new(store, HttpPageSource::new()?, site)
        .with_delay(config.request_delay());

    let engine = ScrapeEngine::new(BankPipeline::new(fetcher, config));
    engine.run().await
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = CliConfig::parse();

    // logging first, so config errors are reported
    logger::init_cli_logger(config.verbose);
    tracing::debug!("CLI config: {:?}", config);

    match run(config).await {
        Ok(output) => {
            tracing::info!("Done: {}", output);
            Ok(())
        }
        Err(e) => {
            tracing::error!("Scrape failed: {}", e);
            tracing::error!("Suggestion: {}", e.recovery_suggestion());
            Err(e.into())
        }
    }
}
