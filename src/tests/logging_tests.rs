// @file: src/tests/logging_tests.rs
// @description: Log line layout and the console+file dispatcher for the two named loaders.
// @author: LAS.

#[cfg(test)]
mod logging_tests {
    use crate::utils::config::AppConfig;
    use crate::utils::logging::{format_line, LoggingContext, BASE_LOGGER, BINANCE_LOGGER};
    use log::Level;
    use std::fs;

    #[test]
    fn test_line_layout() {
        let line = format_line("2024-03-15 12:30:00,123", BASE_LOGGER, Level::Info, "run started");
        assert_eq!(line, "2024-03-15 12:30:00,123 - baseloader - INFO - CUSTOM: run started");

        let line = format_line("ts", BINANCE_LOGGER, Level::Warn, format_args!("{} klines", 3));
        assert_eq!(line, "ts - binanceloader - WARNING - CUSTOM: 3 klines");
    }

    #[test]
    fn test_detached_context_exposes_named_handles() {
        let logging = LoggingContext::detached();

        assert_eq!(logging.base().name(), "baseloader");
        assert_eq!(logging.binance().name(), "binanceloader");
        assert!(logging.log_file().is_none());

        // Without a dispatcher these are no-ops
        logging.base().info("nothing installed");
        logging.shutdown();
    }

    // The only test that installs the global dispatcher.
    #[test]
    fn test_init_appends_named_records_to_file() {
        // #1. Pre-existing content must survive (append mode)
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("loader.log");
        fs::write(&path, "previous line\n").unwrap();

        let config = AppConfig {
            log_file: path.to_string_lossy().into_owned(),
            ..AppConfig::default()
        };

        // #2. Install and emit
        let logging = LoggingContext::init(&config).unwrap();
        logging.base().info("base says hi");
        logging.binance().warn("binance says careful");
        log::info!(target: "somebody_else", "should be filtered");
        logging.shutdown();

        // #3. Verify
        let contents = fs::read_to_string(&path).unwrap();
        assert!(contents.starts_with("previous line\n"));
        assert!(contents.contains(" - baseloader - INFO - CUSTOM: base says hi"));
        assert!(contents.contains(" - binanceloader - WARNING - CUSTOM: binance says careful"));
        assert!(!contents.contains("should be filtered"));
    }

    #[test]
    fn test_init_rejects_unknown_level() {
        let config = AppConfig {
            log_level: "chatty".to_string(),
            ..AppConfig::default()
        };
        assert!(LoggingContext::init(&config).is_err());
    }
}
