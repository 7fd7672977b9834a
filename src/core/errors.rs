// @file: src/core/errors.rs
// @description: Error taxonomy for record validation, kline parsing, transport and rendering.
// @author: LAS.

use thiserror::Error;


//
// RECORD VALIDATION
//

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("symbol `{symbol}` must be 6 characters, got {length}")]
    SymbolLength { symbol: String, length: usize },

    #[error("symbol `{0}` must contain only alphanumeric characters")]
    SymbolNotAlphanumeric(String),

    #[error("{field} `{value}` must be at most 10 characters")]
    AssetTooLong { field: &'static str, value: String },

    #[error("{field} `{value}` must be uppercase")]
    AssetNotUppercase { field: &'static str, value: String },

    #[error("record is missing string field `{0}`")]
    MissingField(&'static str),
}


//
// KLINE PARSING
//

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("klines payload is not a list")]
    NotAList,

    #[error("kline record is not an array")]
    NotAnArray,

    #[error("kline record has {found} fields, expected at least 12")]
    TooFewFields { found: usize },

    #[error("kline field `{field}` cannot be coerced from `{value}`")]
    InvalidField { field: &'static str, value: String },
}


//
// TRANSPORT
//

#[derive(Debug, Error)]
pub enum NetworkError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("exchange answered {status}: {body}")]
    Status { status: u16, body: String },

    #[error("response body is not valid JSON: {0}")]
    Decode(#[source] reqwest::Error),

    #[error("invalid endpoint url: {0}")]
    InvalidUrl(#[from] url::ParseError),
}


//
// TOP LEVEL
//

#[derive(Debug, Error)]
pub enum LoaderError {
    #[error(transparent)]
    Network(#[from] NetworkError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error("chart rendering failed: {0}")]
    Render(String),

    #[error("configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("logging setup failed: {0}")]
    Logging(String),
}

impl From<reqwest::Error> for LoaderError {
    fn from(err: reqwest::Error) -> Self {
        LoaderError::Network(NetworkError::Transport(err))
    }
}

impl From<url::ParseError> for LoaderError {
    fn from(err: url::ParseError) -> Self {
        LoaderError::Network(NetworkError::InvalidUrl(err))
    }
}
