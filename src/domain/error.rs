//! Domain error types.

use rust_decimal::Decimal;

/// Top-level error type for bandtrader.
#[derive(Debug, thiserror::Error)]
pub enum BandtraderError {
    #[error("config parse error in {file}: {reason}")]
    ConfigParse { file: String, reason: String },

    #[error("missing config key [{section}] {key}")]
    ConfigMissing { section: String, key: String },

    #[error("invalid config value [{section}] {key}: {reason}")]
    ConfigInvalid {
        section: String,
        key: String,
        reason: String,
    },

    #[error("data error: {reason}")]
    Data { reason: String },

    #[error("no intraday data for {symbol}")]
    NoData { symbol: String },

    #[error("invalid order: {reason}")]
    InvalidOrder { reason: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl BandtraderError {
    pub(crate) fn invalid_order(price: Decimal, quantity: u32) -> Self {
        BandtraderError::InvalidOrder {
            reason: format!("price {price} and quantity {quantity} must both be positive"),
        }
    }
}

impl From<&BandtraderError> for std::process::ExitCode {
    fn from(err: &BandtraderError) -> Self {
        let code: u8 = match err {
            BandtraderError::Io(_) => 1,
            BandtraderError::ConfigParse { .. }
            | BandtraderError::ConfigMissing { .. }
            | BandtraderError::ConfigInvalid { .. } => 2,
            BandtraderError::Data { .. } | BandtraderError::NoData { .. } => 3,
            BandtraderError::InvalidOrder { .. } => 4,
        };
        std::process::ExitCode::from(code)
    }
}
