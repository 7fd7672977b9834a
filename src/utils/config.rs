// @file: src/utils/config.rs
// @description: Run configuration. Defaults reproduce the fixed BTC/ETH/LTC daily run.
// @author: LAS.

use serde::Deserialize;
use config::{Config, ConfigError, File, Environment};
use crate::core::windows::WindowSpec;

//
// DEFAULTS
//

pub const DEFAULT_BASE_URL: &str = "https://api.binance.com/api/v3";
pub const DEFAULT_SYMBOLS: [&str; 3] = ["BTCUSDT", "ETHUSDT", "LTCUSDT"];
pub const DEFAULT_INTERVAL: &str = "1d";
pub const DEFAULT_WINDOW_DAYS: [i64; 3] = [1, 30, 365];
pub const DEFAULT_LOG_FILE: &str = "logfile.log";
pub const DEFAULT_CHART_DIR: &str = "charts";
// Longest accepted lookback, about a century
pub const MAX_WINDOW_DAYS: i64 = 36_500;

const BINANCE_INTERVALS: [&str; 16] = [
    "1s", "1m", "3m", "5m", "15m", "30m", "1h", "2h", "4h", "6h", "8h", "12h", "1d", "3d", "1w", "1M",
];


//
// TYPE DEFINITIONS
//

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ChartStyle {
    Line,
    Candlestick,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub log_level: String,
    pub log_file: String,

    // Exchange
    pub exchange_base_url: String,
    pub symbols: Vec<String>,
    pub interval: String,
    pub window_days: Vec<i64>,

    // Charts
    pub chart_dir: String,
    pub chart_style: ChartStyle,
    pub chart_width: u32,
    pub chart_height: u32,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            log_level: "info".to_string(),
            log_file: DEFAULT_LOG_FILE.to_string(),
            exchange_base_url: DEFAULT_BASE_URL.to_string(),
            symbols: DEFAULT_SYMBOLS.iter().map(|s| s.to_string()).collect(),
            interval: DEFAULT_INTERVAL.to_string(),
            window_days: DEFAULT_WINDOW_DAYS.to_vec(),
            chart_dir: DEFAULT_CHART_DIR.to_string(),
            chart_style: ChartStyle::Line,
            chart_width: 1280,
            chart_height: 800,
        }
    }
}

impl AppConfig {
    //
    // PUBLIC INTERFACE
    //

    pub fn load() -> Result<Self, ConfigError> {
        let builder = Config::builder()
            .set_default("log_level", "info")?
            .set_default("log_file", DEFAULT_LOG_FILE)?

            // Exchange
            .set_default("exchange_base_url", DEFAULT_BASE_URL)?
            .set_default("symbols", DEFAULT_SYMBOLS.to_vec())?
            .set_default("interval", DEFAULT_INTERVAL)?
            .set_default("window_days", DEFAULT_WINDOW_DAYS.to_vec())?

            // Charts
            .set_default("chart_dir", DEFAULT_CHART_DIR)?
            .set_default("chart_style", "line")?
            .set_default("chart_width", 1280)?
            .set_default("chart_height", 800)?

            // File & Env Overrides
            .add_source(File::with_name("kline_loader").required(false))
            .add_source(Environment::with_prefix("LOADER"));

        let config: AppConfig = builder.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.symbols.is_empty() {
            return Err(ConfigError::Message("symbols must not be empty".to_string()));
        }
        if !BINANCE_INTERVALS.contains(&self.interval.as_str()) {
            return Err(ConfigError::Message(format!("unsupported interval `{}`", self.interval)));
        }
        if let Some(days) = self.window_days.iter().find(|d| **d <= 0) {
            return Err(ConfigError::Message(format!("window of {} days is not positive", days)));
        }
        if let Some(days) = self.window_days.iter().find(|d| **d > MAX_WINDOW_DAYS) {
            return Err(ConfigError::Message(format!(
                "window of {} days exceeds the {} day limit", days, MAX_WINDOW_DAYS
            )));
        }
        if self.chart_width == 0 || self.chart_height == 0 {
            return Err(ConfigError::Message("chart dimensions must be non-zero".to_string()));
        }
        Ok(())
    }

    pub fn windows(&self) -> Vec<WindowSpec> {
        self.window_days.iter().copied().map(WindowSpec::from_days).collect()
    }
}
