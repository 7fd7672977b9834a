// @file: src/connectors/binance_rest.rs
// @description: HTTP client for Binance exchange metadata and historical klines.
// @author: LAS.

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use url::Url;
use crate::core::errors::{LoaderError, NetworkError, ParseError, ValidationError};
use crate::core::interfaces::ExchangeClient;
use crate::core::models::{Candle, TradingPair};
use crate::utils::logging::LogHandle;


//
// CONSTANTS
//

const EXCHANGE_INFO_ENDPOINT: &str = "exchangeInfo";
const KLINES_ENDPOINT: &str = "klines";


//
// CLIENT
//

pub struct BinanceRestClient {
    http: Client,
    base_url: Url,
    log: LogHandle,
}

impl BinanceRestClient {
    pub fn new(base_url: &str, log: LogHandle) -> Result<Self, LoaderError> {
        // Url::join drops the last segment unless the base ends with a slash
        let mut base = base_url.to_string();
        if !base.ends_with('/') {
            base.push('/');
        }

        Ok(BinanceRestClient {
            http: Client::new(),
            base_url: Url::parse(&base)?,
            log,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, name: &str) -> Result<Url, LoaderError> {
        Ok(self.base_url.join(name)?)
    }

    async fn get_json(&self, url: Url) -> Result<Value, LoaderError> {
        // #1. Execute Request
        let response = self.http.get(url.clone()).send().await
            .map_err(|e| {
                self.log.error(format!("GET {} failed: {}", url, e));
                NetworkError::Transport(e)
            })?;

        // #2. Reject non-success statuses with whatever body the exchange sent
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            self.log.error(format!("GET {} answered {}: {}", url, status, body));
            return Err(NetworkError::Status { status: status.as_u16(), body }.into());
        }

        // #3. Decode
        let json = response.json::<Value>().await.map_err(|e| {
            self.log.error(format!("GET {} returned an undecodable body: {}", url, e));
            NetworkError::Decode(e)
        })?;
        Ok(json)
    }
}

#[async_trait]
impl ExchangeClient for BinanceRestClient {
    async fn list_pairs(&self) -> Result<Vec<TradingPair>, LoaderError> {
        let url = self.endpoint(EXCHANGE_INFO_ENDPOINT)?;
        self.log.info(format!("Requesting exchange info from {}", url));

        let json = self.get_json(url).await?;
        let pairs = parse_exchange_info(&json).map_err(|e| {
            self.log.error(format!("Exchange info rejected: {}", e));
            e
        })?;

        self.log.info(format!("Loaded {} trading pairs", pairs.len()));
        Ok(pairs)
    }

    async fn get_historical_candles(
        &self,
        symbol: &str,
        interval: &str,
        start_time_ms: i64,
        end_time_ms: i64,
    ) -> Result<Vec<Candle>, LoaderError> {
        // #1. Construct URL
        // Format: <base>/klines?symbol=BTCUSDT&interval=1d&startTime=..&endTime=..
        let mut url = self.endpoint(KLINES_ENDPOINT)?;
        url.query_pairs_mut()
            .append_pair("symbol", symbol)
            .append_pair("interval", interval)
            .append_pair("startTime", &start_time_ms.to_string())
            .append_pair("endTime", &end_time_ms.to_string());

        self.log.info(format!(
            "Requesting {} {} klines from {} to {}",
            symbol, interval, start_time_ms, end_time_ms
        ));

        // #2. Fetch and parse
        let json = self.get_json(url).await?;
        let candles = parse_kline_array(&json).map_err(|e| {
            self.log.error(format!("Klines for {} rejected: {}", symbol, e));
            e
        })?;

        self.log.info(format!("Received {} klines for {}", candles.len(), symbol));
        Ok(candles)
    }
}


//
// RESPONSE PARSING
//

/// `{ "symbols": [ {symbol, baseAsset, quoteAsset, ...}, ... ] }`, stopping at the first bad record.
pub fn parse_exchange_info(json: &Value) -> Result<Vec<TradingPair>, ValidationError> {
    let records = json.get("symbols")
        .and_then(Value::as_array)
        .ok_or(ValidationError::MissingField("symbols"))?;

    records.iter().map(TradingPair::try_from).collect()
}

/// Binance returns an array of arrays:
/// [ [Open Time, Open, High, Low, Close, Volume, Close Time, ...], ... ]
pub fn parse_kline_array(json: &Value) -> Result<Vec<Candle>, ParseError> {
    let raw_list = json.as_array().ok_or(ParseError::NotAList)?;
    raw_list.iter().map(Candle::from_kline).collect()
}
