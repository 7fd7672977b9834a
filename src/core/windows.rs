// @file: src/core/windows.rs
// @description: Lookback windows ending at a reference instant, expressed in exchange milliseconds.
// @author: LAS.

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;


//
// TYPE DEFINITIONS
//

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WindowSpec {
    pub label: String,
    pub lookback_days: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TimeWindow {
    pub start_ms: i64,
    pub end_ms: i64,
}


//
// PUBLIC INTERFACE
//

impl WindowSpec {
    pub fn from_days(lookback_days: i64) -> Self {
        let label = match lookback_days {
            1 => "Last Day".to_string(),
            30 => "Last Month".to_string(),
            365 => "Last Year".to_string(),
            n => format!("Last {} Days", n),
        };
        WindowSpec { label, lookback_days }
    }

    // Both ends are truncated to whole seconds before scaling to milliseconds.
    // A lookback past the calendar range starts at the earliest representable instant.
    pub fn bounds(&self, now: DateTime<Utc>) -> TimeWindow {
        let start = Duration::try_days(self.lookback_days)
            .and_then(|lookback| now.checked_sub_signed(lookback))
            .unwrap_or(DateTime::<Utc>::MIN_UTC);
        TimeWindow {
            start_ms: start.timestamp() * 1000,
            end_ms: now.timestamp() * 1000,
        }
    }
}

impl TimeWindow {
    pub fn duration_ms(&self) -> i64 {
        self.end_ms - self.start_ms
    }
}
