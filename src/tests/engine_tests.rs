// @file: src/tests/engine_tests.rs
// @description: Orchestrator loop against scripted exchange and renderer doubles.
// @author: LAS.

#[cfg(test)]
mod engine_tests {
    use crate::core::engine::{LoaderEngine, RunStage};
    use crate::core::errors::{LoaderError, NetworkError, ParseError, ValidationError};
    use crate::core::interfaces::{ChartRenderer, ExchangeClient};
    use crate::core::models::{Candle, TradingPair};
    use crate::core::series::TimeSeries;
    use crate::utils::config::AppConfig;
    use crate::utils::logging::LoggingContext;
    use async_trait::async_trait;
    use chrono::{DateTime, TimeZone, Utc};
    use std::path::PathBuf;
    use std::sync::{Arc, Mutex};

    //
    // TEST DOUBLES
    //

    const DAY_MS: i64 = 86_400_000;

    #[derive(Default)]
    struct ScriptedExchange {
        fail_pairs: bool,
        // (symbol, lookback in days) combinations that fail
        failing_windows: Vec<(String, i64)>,
        // (symbol, lookback in days) combinations that answer with no klines
        empty_windows: Vec<(String, i64)>,
        calls: Arc<Mutex<Vec<(String, String, i64, i64)>>>,
    }

    impl ScriptedExchange {
        fn candles_for(start_ms: i64, end_ms: i64) -> Vec<Candle> {
            let mut out = Vec::new();
            let mut open_time = start_ms;
            while open_time < end_ms {
                out.push(Candle {
                    open_time,
                    open: 100.0,
                    high: 101.0,
                    low: 99.0,
                    close: 100.5,
                    volume: 10.0,
                    close_time: open_time + DAY_MS - 1,
                    quote_asset_volume: 1000.0,
                    num_trades: 42,
                    taker_buy_base_asset_volume: 5.0,
                    taker_buy_quote_asset_volume: 500.0,
                    ignore: 0.0,
                });
                open_time += DAY_MS;
            }
            out
        }
    }

    #[async_trait]
    impl ExchangeClient for ScriptedExchange {
        async fn list_pairs(&self) -> Result<Vec<TradingPair>, LoaderError> {
            if self.fail_pairs {
                return Err(ValidationError::MissingField("symbols").into());
            }
            Ok(vec![
                TradingPair::new("ETHBTC", "ETH", "BTC").unwrap(),
                TradingPair::new("LTCBTC", "LTC", "BTC").unwrap(),
            ])
        }

        async fn get_historical_candles(
            &self,
            symbol: &str,
            interval: &str,
            start_time_ms: i64,
            end_time_ms: i64,
        ) -> Result<Vec<Candle>, LoaderError> {
            self.calls.lock().unwrap().push((symbol.to_string(), interval.to_string(), start_time_ms, end_time_ms));

            let days = (end_time_ms - start_time_ms) / DAY_MS;
            let key = (symbol.to_string(), days);
            if self.failing_windows.contains(&key) {
                return Err(NetworkError::Status { status: 503, body: "maintenance".to_string() }.into());
            }
            if self.empty_windows.contains(&key) {
                return Ok(vec![]);
            }
            Ok(Self::candles_for(start_time_ms, end_time_ms))
        }
    }

    #[derive(Default, Clone)]
    struct RecordingRenderer {
        drawn: Arc<Mutex<Vec<(String, usize)>>>,
    }

    impl ChartRenderer for RecordingRenderer {
        fn render(&self, series: &TimeSeries, title: &str) -> Result<PathBuf, LoaderError> {
            if series.is_empty() {
                return Err(LoaderError::Render(format!("`{}` has no candles to draw", title)));
            }
            self.drawn.lock().unwrap().push((title.to_string(), series.len()));
            Ok(PathBuf::from(format!("{}.svg", title)))
        }
    }

    //
    // HELPERS
    //

    fn reference_now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 15, 0, 0, 0).unwrap()
    }

    fn engine(exchange: ScriptedExchange, renderer: RecordingRenderer) -> LoaderEngine<ScriptedExchange, RecordingRenderer> {
        LoaderEngine::new(exchange, renderer, AppConfig::default(), LoggingContext::detached().base())
    }

    //
    // SCENARIOS
    //

    #[tokio::test]
    async fn test_full_run_covers_every_symbol_and_window() {
        let exchange = ScriptedExchange::default();
        let calls = exchange.calls.clone();
        let renderer = RecordingRenderer::default();
        let drawn = renderer.drawn.clone();

        let summary = engine(exchange, renderer).run_at(reference_now()).await;

        // #1. Products listed, nine series, nine charts
        assert!(summary.is_clean());
        assert_eq!(summary.product_count, Some(2));
        assert_eq!(summary.series_built, 9);
        assert_eq!(summary.charts_rendered, 9);

        // #2. Requests: symbol-major, windows in day/month/year order, shared end
        let calls = calls.lock().unwrap();
        let now_ms = reference_now().timestamp_millis();
        let expected: Vec<(String, String, i64, i64)> = ["BTCUSDT", "ETHUSDT", "LTCUSDT"]
            .iter()
            .flat_map(|s| {
                [1i64, 30, 365].into_iter().map(move |d| (s.to_string(), "1d".to_string(), now_ms - d * DAY_MS, now_ms))
            })
            .collect();
        assert_eq!(*calls, expected);

        // #3. Titles and row counts
        let drawn = drawn.lock().unwrap();
        assert_eq!(drawn[0], ("BTCUSDT - Last Day".to_string(), 1));
        assert_eq!(drawn[1], ("BTCUSDT - Last Month".to_string(), 30));
        assert_eq!(drawn[2], ("BTCUSDT - Last Year".to_string(), 365));
        assert_eq!(drawn[8].0, "LTCUSDT - Last Year");
    }

    #[tokio::test]
    async fn test_failures_are_recorded_and_loop_continues() {
        let exchange = ScriptedExchange {
            fail_pairs: true,
            failing_windows: vec![("ETHUSDT".to_string(), 30)],
            empty_windows: vec![("LTCUSDT".to_string(), 1)],
            ..ScriptedExchange::default()
        };
        let calls = exchange.calls.clone();

        let summary = engine(exchange, RecordingRenderer::default()).run_at(reference_now()).await;

        // Every window was still requested
        assert_eq!(calls.lock().unwrap().len(), 9);

        assert_eq!(summary.product_count, None);
        assert_eq!(summary.failures_in(RunStage::Products), 1);
        assert_eq!(summary.failures_in(RunStage::Fetch), 1);
        assert_eq!(summary.failures_in(RunStage::Render), 1);

        // Eight series came back (one empty), seven were drawable
        assert_eq!(summary.series_built, 8);
        assert_eq!(summary.charts_rendered, 7);

        let fetch_failure = summary.failures.iter().find(|f| f.stage == RunStage::Fetch).unwrap();
        assert_eq!(fetch_failure.symbol.as_deref(), Some("ETHUSDT"));
        assert_eq!(fetch_failure.window.as_deref(), Some("Last Month"));
        assert!(fetch_failure.message.contains("503"));
    }

    #[tokio::test]
    async fn test_configured_symbols_and_windows_drive_the_run() {
        let exchange = ScriptedExchange::default();
        let calls = exchange.calls.clone();
        let config = AppConfig {
            symbols: vec!["BNBBTC".to_string()],
            interval: "1h".to_string(),
            window_days: vec![7],
            ..AppConfig::default()
        };

        let engine = LoaderEngine::new(exchange, RecordingRenderer::default(), config, LoggingContext::detached().base());
        let summary = engine.run_at(reference_now()).await;

        assert_eq!(summary.series_built, 1);
        let calls = calls.lock().unwrap();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].0, "BNBBTC");
        assert_eq!(calls[0].1, "1h");
    }

    #[test]
    fn test_parse_errors_surface_as_parse_variant() {
        let err: LoaderError = ParseError::NotAList.into();
        assert!(matches!(err, LoaderError::Parse(ParseError::NotAList)));
        assert_eq!(err.to_string(), "klines payload is not a list");
    }
}
