//! Domain error types.
//!
//! Metric queries never error: missing or degenerate state collapses to a
//! sentinel `0.0` result. This type covers the surrounding surface only,
//! loading market data files, configuration, and timestamps.

/// Top-level error type for minibourse.
#[derive(Debug, thiserror::Error)]
pub enum MarketError {
    #[error("data error: {reason}")]
    Data { reason: String },

    #[error("config parse error in {file}: {reason}")]
    ConfigParse { file: String, reason: String },

    #[error("invalid config value [{section}] {key}: {reason}")]
    ConfigInvalid {
        section: String,
        key: String,
        reason: String,
    },

    #[error("invalid timestamp {value:?}: {reason}")]
    BadTimestamp { value: String, reason: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<&MarketError> for std::process::ExitCode {
    fn from(err: &MarketError) -> Self {
        let code: u8 = match err {
            MarketError::Io(_) => 1,
            MarketError::ConfigParse { .. } | MarketError::ConfigInvalid { .. } => 2,
            MarketError::Data { .. } => 3,
            MarketError::BadTimestamp { .. } => 4,
        };
        std::process::ExitCode::from(code)
    }
}
