// @file: src/main.rs
// @description: Binary entry point. Loads config, opens the logging context and runs the loader once.
// @author: LAS.

use kline_loader::connectors::binance_rest::BinanceRestClient;
use kline_loader::core::engine::LoaderEngine;
use kline_loader::core::errors::LoaderError;
use kline_loader::render::chart::SvgChartRenderer;
use kline_loader::utils::config::AppConfig;
use kline_loader::utils::logging::LoggingContext;

#[tokio::main]
async fn main() -> Result<(), LoaderError> {
    // 1. Optional overrides from .env, then the layered config
    dotenv::dotenv().ok();
    let config = AppConfig::load()?;

    // 2. Logging context lives for the whole run
    let logging = LoggingContext::init(&config)?;
    logging.base().info(">>> Kline Loader is Starting... <<<");

    // 3. Wire components
    let client = BinanceRestClient::new(&config.exchange_base_url, logging.binance())?;
    let renderer = SvgChartRenderer::from_config(&config);
    let engine = LoaderEngine::new(client, renderer, config, logging.base());

    // 4. Run
    let summary = engine.run().await;
    if !summary.is_clean() {
        logging.base().warn(format!("{} steps failed during the run", summary.failures.len()));
    }

    logging.shutdown();
    Ok(())
}
