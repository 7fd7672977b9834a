// @file: src/core/series.rs
// @description: Assembles parsed candles into a time-indexed table for printing and charting.
// @author: LAS.

use chrono::{DateTime, Utc};
use serde::Serialize;
use tabled::settings::Style;
use tabled::{Table, Tabled};
use std::fmt;
use crate::core::models::Candle;


//
// TYPE DEFINITIONS
//

#[derive(Debug, Clone, PartialEq, Serialize, Tabled)]
pub struct SeriesRow {
    pub timestamp: DateTime<Utc>,
    #[tabled(inline)]
    pub candle: Candle,
}

/// Candles for one (symbol, window) pair, indexed by open time, in the order received.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TimeSeries {
    rows: Vec<SeriesRow>,
}


//
// ASSEMBLY
//

/// One row per candle, input order kept. No dedup, no gap filling.
pub fn build_series(candles: &[Candle]) -> TimeSeries {
    let rows = candles
        .iter()
        .map(|candle| SeriesRow {
            // Parsing already rejects unrepresentable open times
            timestamp: DateTime::from_timestamp_millis(candle.open_time).unwrap_or_default(),
            candle: candle.clone(),
        })
        .collect();

    TimeSeries { rows }
}


//
// PUBLIC INTERFACE
//

impl TimeSeries {
    pub fn rows(&self) -> &[SeriesRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &SeriesRow> {
        self.rows.iter()
    }

    /// From the first row's open time to the last candle's close time.
    pub fn span(&self) -> Option<(DateTime<Utc>, DateTime<Utc>)> {
        let first = self.rows.first()?;
        let last = self.rows.last()?;
        let end = DateTime::from_timestamp_millis(last.candle.close_time)
            .filter(|end| *end > last.timestamp)
            .unwrap_or(last.timestamp);
        Some((first.timestamp, end))
    }

    /// Lowest low and highest high across the series.
    pub fn price_bounds(&self) -> Option<(f64, f64)> {
        if self.rows.is_empty() {
            return None;
        }
        let low = self.rows.iter().map(|r| r.candle.low).fold(f64::INFINITY, f64::min);
        let high = self.rows.iter().map(|r| r.candle.high).fold(f64::NEG_INFINITY, f64::max);
        Some((low, high))
    }

    pub fn max_volume(&self) -> Option<f64> {
        self.rows.iter().map(|r| r.candle.volume).reduce(f64::max)
    }
}

impl fmt::Display for TimeSeries {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.rows.is_empty() {
            return write!(f, "Empty series");
        }
        let mut table = Table::new(&self.rows);
        table.with(Style::psql());
        write!(f, "{}", table)
    }
}
