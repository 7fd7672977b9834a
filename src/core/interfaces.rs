// @file: src/core/interfaces.rs
// @description: Seams between the orchestrator, the exchange transport and the chart backend.
// @author: LAS.

use async_trait::async_trait;
use std::path::PathBuf;
use crate::core::errors::LoaderError;
use crate::core::models::{Candle, TradingPair};
use crate::core::series::TimeSeries;

//
// TRAIT DEFINITIONS
//

#[async_trait]
pub trait ExchangeClient: Send + Sync {
    // #1. Exchange metadata, validated record by record. The first bad record aborts the call.
    async fn list_pairs(&self) -> Result<Vec<TradingPair>, LoaderError>;

    // #2. Historical klines for a single window, in response order
    async fn get_historical_candles(
        &self,
        symbol: &str,
        interval: &str,
        start_time_ms: i64,
        end_time_ms: i64,
    ) -> Result<Vec<Candle>, LoaderError>;

    // #3. Symbol projection of list_pairs
    async fn list_product_symbols(&self) -> Result<Vec<String>, LoaderError> {
        let pairs = self.list_pairs().await?;
        Ok(pairs.iter().map(|p| p.symbol().to_string()).collect())
    }
}

pub trait ChartRenderer {
    /// Draws the series and returns where the chart was written.
    fn render(&self, series: &TimeSeries, title: &str) -> Result<PathBuf, LoaderError>;
}
