// @file: src/core/models.rs
// @description: Trading pair and candle records with constructor-time validation.
// @author: LAS.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tabled::Tabled;
use chrono::DateTime;
use std::fmt;
use crate::core::errors::{ParseError, ValidationError};


//
// CONSTANTS
//

const SYMBOL_LENGTH: usize = 6;
const MAX_ASSET_LENGTH: usize = 10;
pub const KLINE_FIELD_COUNT: usize = 12;


//
// TRADING PAIR
//

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct TradingPair {
    symbol: String,
    base_asset: String,
    quote_asset: String,
}

impl TradingPair {
    // Checks run in declaration order and stop at the first violation.
    pub fn new(
        symbol: impl Into<String>,
        base_asset: impl Into<String>,
        quote_asset: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        let symbol: String = symbol.into();
        let base_asset: String = base_asset.into();
        let quote_asset: String = quote_asset.into();

        // #1. Symbol shape
        let length = symbol.chars().count();
        if length != SYMBOL_LENGTH {
            return Err(ValidationError::SymbolLength { symbol, length });
        }
        if !symbol.chars().all(char::is_alphanumeric) {
            return Err(ValidationError::SymbolNotAlphanumeric(symbol));
        }

        // #2. Asset shape
        validate_asset("base_asset", &base_asset)?;
        validate_asset("quote_asset", &quote_asset)?;

        Ok(TradingPair { symbol, base_asset, quote_asset })
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn base_asset(&self) -> &str {
        &self.base_asset
    }

    pub fn quote_asset(&self) -> &str {
        &self.quote_asset
    }
}

impl TryFrom<&Value> for TradingPair {
    type Error = ValidationError;

    fn try_from(record: &Value) -> Result<Self, Self::Error> {
        let field = |key: &'static str| -> Result<&str, ValidationError> {
            record.get(key)
                .and_then(Value::as_str)
                .ok_or(ValidationError::MissingField(key))
        };

        TradingPair::new(field("symbol")?, field("baseAsset")?, field("quoteAsset")?)
    }
}

impl fmt::Display for TradingPair {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} ({}/{})", self.symbol, self.base_asset, self.quote_asset)
    }
}

fn validate_asset(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.chars().count() > MAX_ASSET_LENGTH {
        return Err(ValidationError::AssetTooLong { field, value: value.to_string() });
    }
    if !is_uppercase(value) {
        return Err(ValidationError::AssetNotUppercase { field, value: value.to_string() });
    }
    Ok(())
}

// At least one cased character and no lowercase ones, so "1INCH" passes and "123" does not.
fn is_uppercase(value: &str) -> bool {
    value.chars().any(char::is_uppercase) && !value.chars().any(char::is_lowercase)
}


//
// CANDLE
//

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Tabled)]
pub struct Candle {
    pub open_time: i64,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
    pub close_time: i64,
    pub quote_asset_volume: f64,
    pub num_trades: u64,
    pub taker_buy_base_asset_volume: f64,
    pub taker_buy_quote_asset_volume: f64,
    pub ignore: f64,
}

impl Candle {
    // Positional layout:
    // [open_time, open, high, low, close, volume, close_time,
    //  quote_asset_volume, num_trades, taker_buy_base, taker_buy_quote, ignore]
    pub fn from_kline(raw: &Value) -> Result<Self, ParseError> {
        let fields = raw.as_array().ok_or(ParseError::NotAnArray)?;
        if fields.len() < KLINE_FIELD_COUNT {
            return Err(ParseError::TooFewFields { found: fields.len() });
        }

        let open_time = coerce_i64(&fields[0], "open_time")?;
        if DateTime::from_timestamp_millis(open_time).is_none() {
            return Err(invalid("open_time", &fields[0]));
        }

        let num_trades = u64::try_from(coerce_i64(&fields[8], "num_trades")?)
            .map_err(|_| invalid("num_trades", &fields[8]))?;

        Ok(Candle {
            open_time,
            open: coerce_f64(&fields[1], "open")?,
            high: coerce_f64(&fields[2], "high")?,
            low: coerce_f64(&fields[3], "low")?,
            close: coerce_f64(&fields[4], "close")?,
            volume: coerce_f64(&fields[5], "volume")?,
            close_time: coerce_i64(&fields[6], "close_time")?,
            quote_asset_volume: coerce_f64(&fields[7], "quote_asset_volume")?,
            num_trades,
            taker_buy_base_asset_volume: coerce_f64(&fields[9], "taker_buy_base_asset_volume")?,
            taker_buy_quote_asset_volume: coerce_f64(&fields[10], "taker_buy_quote_asset_volume")?,
            ignore: coerce_f64(&fields[11], "ignore")?,
        })
    }
}


//
// COERCION HELPERS
//

fn invalid(field: &'static str, value: &Value) -> ParseError {
    ParseError::InvalidField { field, value: value.to_string() }
}

fn coerce_f64(value: &Value, field: &'static str) -> Result<f64, ParseError> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
    // str::parse accepts "NaN" and "inf"
    .filter(|f| f.is_finite())
    .ok_or_else(|| invalid(field, value))
}

fn coerce_i64(value: &Value, field: &'static str) -> Result<i64, ParseError> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| {
            n.as_f64()
                .filter(|f| f.fract() == 0.0 && *f >= i64::MIN as f64 && *f <= i64::MAX as f64)
                .map(|f| f as i64)
        }),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    }
    .ok_or_else(|| invalid(field, value))
}
