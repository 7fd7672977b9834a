// @file: src/core/engine.rs
// @description: Drives product listing, per-window candle fetches, table output and chart rendering.
// @author: LAS.

use chrono::{DateTime, Utc};
use serde::Serialize;
use tabled::settings::Style;
use tabled::{Table, Tabled};
use std::fmt;
use crate::core::interfaces::{ChartRenderer, ExchangeClient};
use crate::core::series::{build_series, TimeSeries};
use crate::core::windows::WindowSpec;
use crate::utils::config::AppConfig;
use crate::utils::logging::LogHandle;


//
// RUN REPORT
//

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RunStage {
    Products,
    Fetch,
    Render,
}

impl fmt::Display for RunStage {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunFailure {
    pub stage: RunStage,
    pub symbol: Option<String>,
    pub window: Option<String>,
    pub message: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RunSummary {
    pub product_count: Option<usize>,
    pub series_built: usize,
    pub charts_rendered: usize,
    pub failures: Vec<RunFailure>,
}

impl RunSummary {
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn failures_in(&self, stage: RunStage) -> usize {
        self.failures.iter().filter(|f| f.stage == stage).count()
    }
}

#[derive(Tabled)]
struct ProductRow {
    #[tabled(rename = "Product")]
    product: String,
}


//
// ENGINE STRUCT
//

pub struct LoaderEngine<C, R> {
    client: C,
    renderer: R,
    config: AppConfig,
    log: LogHandle,
}

impl<C: ExchangeClient, R: ChartRenderer> LoaderEngine<C, R> {
    pub fn new(client: C, renderer: R, config: AppConfig, log: LogHandle) -> Self {
        LoaderEngine { client, renderer, config, log }
    }

    pub async fn run(&self) -> RunSummary {
        self.run_at(Utc::now()).await
    }

    /// Every step logs and records its own failure, then the loop moves on.
    pub async fn run_at(&self, now: DateTime<Utc>) -> RunSummary {
        let mut summary = RunSummary::default();
        self.log.info(format!(
            "Starting run for {} symbols at {}",
            self.config.symbols.len(),
            now.format("%Y-%m-%d %H:%M:%S")
        ));

        // #1. Product listing
        self.list_products(&mut summary).await;

        // #2. Per-symbol windows
        let windows = self.config.windows();
        for symbol in &self.config.symbols {
            println!("\nHistorical data for {}:", symbol);
            let collected = self.fetch_windows(symbol, &windows, now, &mut summary).await;

            println!("\nCharts for {}:", symbol);
            self.render_windows(symbol, &collected, &mut summary);
        }

        self.log.info(format!(
            "Run finished: {} series, {} charts, {} failures",
            summary.series_built,
            summary.charts_rendered,
            summary.failures.len()
        ));
        summary
    }

    async fn list_products(&self, summary: &mut RunSummary) {
        println!("Available products:");
        match self.client.list_product_symbols().await {
            Ok(symbols) => {
                let mut table = Table::new(symbols.iter().map(|s| ProductRow { product: s.clone() }));
                table.with(Style::psql());
                println!("{}", table);
                self.log.info(format!("Listed {} products", symbols.len()));
                summary.product_count = Some(symbols.len());
            }
            Err(e) => {
                self.log.error(format!("Product listing failed: {}", e));
                summary.failures.push(RunFailure {
                    stage: RunStage::Products,
                    symbol: None,
                    window: None,
                    message: e.to_string(),
                });
            }
        }
    }

    async fn fetch_windows(
        &self,
        symbol: &str,
        windows: &[WindowSpec],
        now: DateTime<Utc>,
        summary: &mut RunSummary,
    ) -> Vec<(WindowSpec, TimeSeries)> {
        let mut collected = Vec::with_capacity(windows.len());

        for window in windows {
            println!("\n{}:", window.label);
            let bounds = window.bounds(now);

            match self.client
                .get_historical_candles(symbol, &self.config.interval, bounds.start_ms, bounds.end_ms)
                .await
            {
                Ok(candles) => {
                    let series = build_series(&candles);
                    println!("{}", series);
                    summary.series_built += 1;
                    collected.push((window.clone(), series));
                }
                Err(e) => {
                    self.log.error(format!("{} {} fetch failed: {}", symbol, window.label, e));
                    summary.failures.push(RunFailure {
                        stage: RunStage::Fetch,
                        symbol: Some(symbol.to_string()),
                        window: Some(window.label.clone()),
                        message: e.to_string(),
                    });
                }
            }
        }

        collected
    }

    fn render_windows(&self, symbol: &str, collected: &[(WindowSpec, TimeSeries)], summary: &mut RunSummary) {
        for (window, series) in collected {
            let title = format!("{} - {}", symbol, window.label);
            println!("\nChart {}:", title);

            match self.renderer.render(series, &title) {
                Ok(path) => {
                    self.log.info(format!("Rendered {} to {}", title, path.display()));
                    summary.charts_rendered += 1;
                }
                Err(e) => {
                    self.log.warn(format!("Chart {} skipped: {}", title, e));
                    summary.failures.push(RunFailure {
                        stage: RunStage::Render,
                        symbol: Some(symbol.to_string()),
                        window: Some(window.label.clone()),
                        message: e.to_string(),
                    });
                }
            }
        }
    }
}
