// @file: src/utils/logging.rs
// @description: Process logging context with the two named loaders writing to console and an append-mode file.
// @author: LAS.

use chrono::Local;
use log::{Level, LevelFilter};
use std::fmt;
use std::path::PathBuf;
use crate::core::errors::LoaderError;
use crate::utils::config::AppConfig;


//
// CONSTANTS
//

pub const BASE_LOGGER: &str = "baseloader";
pub const BINANCE_LOGGER: &str = "binanceloader";
const MESSAGE_PREFIX: &str = "CUSTOM: ";
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S,%3f";


//
// LOG HANDLE
//

/// A named logger. Copies are cheap and share the process dispatcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LogHandle {
    name: &'static str,
}

impl LogHandle {
    pub const fn named(name: &'static str) -> Self {
        LogHandle { name }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn info(&self, message: impl fmt::Display) {
        log::info!(target: self.name, "{}", message);
    }

    pub fn warn(&self, message: impl fmt::Display) {
        log::warn!(target: self.name, "{}", message);
    }

    pub fn error(&self, message: impl fmt::Display) {
        log::error!(target: self.name, "{}", message);
    }
}


//
// LOGGING CONTEXT
//

// Opened once at start-up, flushed by `shutdown` before the process exits.
#[derive(Debug)]
pub struct LoggingContext {
    base: LogHandle,
    binance: LogHandle,
    log_file: Option<PathBuf>,
}

impl LoggingContext {
    pub fn init(config: &AppConfig) -> Result<Self, LoaderError> {
        // #1. Resolve level
        let level: LevelFilter = config.log_level.parse()
            .map_err(|_| LoaderError::Logging(format!("unknown log level `{}`", config.log_level)))?;

        // #2. Open sinks
        let file = fern::log_file(&config.log_file)
            .map_err(|e| LoaderError::Logging(format!("cannot open {}: {}", config.log_file, e)))?;

        // #3. Install dispatcher. Only the two named loaders pass the filter.
        fern::Dispatch::new()
            .format(|out, message, record| {
                out.finish(format_args!(
                    "{}",
                    format_line(&Local::now().format(TIMESTAMP_FORMAT).to_string(), record.target(), record.level(), message)
                ))
            })
            .level(LevelFilter::Off)
            .level_for(BASE_LOGGER, level)
            .level_for(BINANCE_LOGGER, level)
            .chain(std::io::stderr())
            .chain(file)
            .apply()
            .map_err(|e| LoaderError::Logging(e.to_string()))?;

        Ok(LoggingContext {
            base: LogHandle::named(BASE_LOGGER),
            binance: LogHandle::named(BINANCE_LOGGER),
            log_file: Some(PathBuf::from(&config.log_file)),
        })
    }

    /// Handles without an installed dispatcher. Records go nowhere.
    pub fn detached() -> Self {
        LoggingContext {
            base: LogHandle::named(BASE_LOGGER),
            binance: LogHandle::named(BINANCE_LOGGER),
            log_file: None,
        }
    }

    pub fn base(&self) -> LogHandle {
        self.base
    }

    pub fn binance(&self) -> LogHandle {
        self.binance
    }

    pub fn log_file(&self) -> Option<&PathBuf> {
        self.log_file.as_ref()
    }

    pub fn shutdown(self) {
        log::logger().flush();
    }
}


//
// FORMATTING
//

/// `timestamp - logger_name - LEVEL - CUSTOM: message`
pub fn format_line(timestamp: &str, logger: &str, level: Level, message: impl fmt::Display) -> String {
    format!("{} - {} - {} - {}{}", timestamp, logger, level_name(level), MESSAGE_PREFIX, message)
}

fn level_name(level: Level) -> &'static str {
    match level {
        Level::Error => "ERROR",
        Level::Warn => "WARNING",
        Level::Info => "INFO",
        Level::Debug => "DEBUG",
        Level::Trace => "TRACE",
    }
}
