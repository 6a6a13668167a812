//! Main entry point for langswap.

use anyhow::Context;
use langswap::run_console;
use langswap_common::init_logging;
use langswap_config::ConfigLoader;
use langswap_i18n::LanguageRegistry;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = ConfigLoader::load().context("loading configuration")?;

    // Held until exit so buffered file logs are flushed
    let _log_guard =
        init_logging(&config.logging.to_logging_config()).context("initializing logging")?;

    info!("Starting langswap");
    info!(
        "Resource directory: {}",
        config.resources.directory.display()
    );

    let registry = LanguageRegistry::open(&config);

    let stdin = tokio::io::BufReader::new(tokio::io::stdin());
    let result = run_console(&registry, stdin, tokio::io::stdout()).await;

    registry.shutdown().await;
    info!("langswap stopped");

    result.context("console session failed")
}
