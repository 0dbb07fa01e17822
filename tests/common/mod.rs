#![allow(dead_code)]

use chrono::{DateTime, Duration, TimeZone, Utc};
use minibourse::domain::error::MarketError;
use minibourse::domain::instrument::Instrument;
use minibourse::domain::trade::{Side, Trade};
use minibourse::ports::data_port::MarketDataPort;

pub fn noon() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap()
}

pub fn minutes_before(now: DateTime<Utc>, minutes: i64) -> DateTime<Utc> {
    now - Duration::minutes(minutes)
}

/// The five illustrative instruments.
pub fn sample_catalog() -> Vec<Instrument> {
    vec![
        Instrument::common("TEA", 0.0),
        Instrument::common("POP", 8.0),
        Instrument::common("ALE", 23.0),
        Instrument::preferred("GIN", 8.0, 0.02, 100.0),
        Instrument::common("JOE", 13.0),
    ]
}

/// The three illustrative POP trades, all within the trailing window.
pub fn pop_trades(now: DateTime<Utc>) -> Vec<(String, Trade)> {
    vec![
        ("POP".into(), Trade::new(minutes_before(now, 1), Side::Buy, 100, 110.0)),
        ("POP".into(), Trade::new(minutes_before(now, 2), Side::Sell, 200, 105.0)),
        ("POP".into(), Trade::new(minutes_before(now, 3), Side::Buy, 50, 115.0)),
    ]
}

pub struct MockMarketData {
    pub instruments: Vec<Instrument>,
    pub trades: Vec<(String, Trade)>,
    pub error: Option<String>,
}

impl MockMarketData {
    pub fn new() -> Self {
        Self {
            instruments: Vec::new(),
            trades: Vec::new(),
            error: None,
        }
    }

    pub fn with_instruments(mut self, instruments: Vec<Instrument>) -> Self {
        self.instruments = instruments;
        self
    }

    pub fn with_trades(mut self, trades: Vec<(String, Trade)>) -> Self {
        self.trades = trades;
        self
    }

    pub fn with_error(mut self, reason: &str) -> Self {
        self.error = Some(reason.to_string());
        self
    }
}

impl MarketDataPort for MockMarketData {
    fn load_instruments(&self) -> Result<Vec<Instrument>, MarketError> {
        if let Some(reason) = &self.error {
            return Err(MarketError::Data {
                reason: reason.clone(),
            });
        }
        Ok(self.instruments.clone())
    }

    fn load_trades(&self) -> Result<Vec<(String, Trade)>, MarketError> {
        if let Some(reason) = &self.error {
            return Err(MarketError::Data {
                reason: reason.clone(),
            });
        }
        Ok(self.trades.clone())
    }
}
